use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::{debug, error};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

static RAW_MODE: AtomicBool = AtomicBool::new(false);

/// Line ending for text written straight to the terminal: `\r\n` while raw
/// mode is on, `\n` otherwise.
pub fn line_ending() -> &'static str {
    if RAW_MODE.load(Ordering::Relaxed) {
        "\r\n"
    } else {
        "\n"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Fill,
    Pattern,
}

impl Command {
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'q' => Some(Command::Quit),
            'f' => Some(Command::Fill),
            'r' => Some(Command::Pattern),
            _ => None,
        }
    }
}

/// Something the interactive loop can ask, without waiting, for the next
/// user command.
pub trait CommandSource {
    fn poll_command(&mut self) -> io::Result<Option<Command>>;
}

/// Keyboard commands from the controlling terminal. Raw mode stays on for as
/// long as this value lives.
#[derive(Debug)]
pub struct TerminalKeys {
    _private: (),
}

impl TerminalKeys {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        RAW_MODE.store(true, Ordering::Relaxed);
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            error!("failed to disable raw mode: {err}");
            return;
        }
        RAW_MODE.store(false, Ordering::Relaxed);
    }
}

impl CommandSource for TerminalKeys {
    fn poll_command(&mut self) -> io::Result<Option<Command>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) if modifiers.contains(KeyModifiers::CONTROL) => {
                debug!("Ctrl+C pressed...");
                Ok(Some(Command::Quit))
            }
            Event::Key(KeyEvent {
                code: KeyCode::Char(key),
                kind: KeyEventKind::Press,
                ..
            }) => {
                debug!("{key} pressed...");
                Ok(Command::from_key(key))
            }
            Event::Key(key) => {
                debug!("{:?} pressed...", key.code);
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

/// Writes `\r\n` for every `\n`, since raw mode turns off the terminal's own
/// translation.
pub struct CrlfWriter<W: Write> {
    inner: W,
}

impl<W: Write> CrlfWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for CrlfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for line in buf.split_inclusive(|byte| *byte == b'\n') {
            match line.strip_suffix(b"\n") {
                Some(content) => {
                    self.inner.write_all(content)?;
                    self.inner.write_all(b"\r\n")?;
                }
                None => self.inner.write_all(line)?,
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
