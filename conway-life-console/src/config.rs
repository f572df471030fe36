use log::warn;
use std::fmt;
use thiserror::Error;

use crate::grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::seed::{Percent, Seeder};

pub const DEFAULT_SILENT_GENERATIONS: u32 = 50;

const UNBOUNDED_SENTINEL: i64 = -1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("you can't have negative generations ({0})")]
    NegativeGenerations(i64),
    #[error(
        "silent mode cannot run forever; please specify a positive number for the final generation"
    )]
    SilentUnbounded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    Silent,
}

impl Mode {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "interactive" | "i" => Some(Mode::Interactive),
            "silent" | "s" => Some(Mode::Silent),
            _ => None,
        }
    }

    fn default_generations(&self) -> Generations {
        match self {
            Mode::Interactive => Generations::Unbounded,
            Mode::Silent => Generations::Limit(DEFAULT_SILENT_GENERATIONS),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Interactive => "interactive",
            Mode::Silent => "silent",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generations {
    Unbounded,
    Limit(u32),
}

impl Generations {
    pub fn is_reached(&self, generation: u32) -> bool {
        match self {
            Generations::Unbounded => false,
            Generations::Limit(limit) => generation >= *limit,
        }
    }
}

impl fmt::Display for Generations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generations::Unbounded => f.write_str("unbounded"),
            Generations::Limit(limit) => write!(f, "{limit}"),
        }
    }
}

/// Everything a run needs, fixed once the command line has been read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: Mode,
    pub seed: Seeder,
    pub generations: Generations,
    /// Percentage used when the fill key reseeds the grid.
    pub fill_percent: Percent,
    pub width: u32,
    pub height: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Interactive,
            seed: Seeder::RPentomino,
            generations: Generations::Unbounded,
            fill_percent: Percent::DEFAULT_FILL,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl RunConfig {
    /// Reads `[mode [pattern|percent [generations]]]`.
    ///
    /// Unknown tokens fall back to defaults. A negative generation count other
    /// than `-1`, or a silent run with no end, is an error.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if args.len() > 3 {
            warn!("ignoring {} extra arguments", args.len() - 3);
        }

        if let Some(token) = args.first().map(|token| token.as_ref()) {
            config.mode = Mode::parse(token).unwrap_or_else(|| {
                warn!("unrecognized mode {token:?}, using {}", Mode::Interactive);
                Mode::Interactive
            });
            config.generations = config.mode.default_generations();
        }

        if let Some(token) = args.get(1).map(|token| token.as_ref()) {
            config.apply_pattern(token);
        }

        if let Some(token) = args.get(2).map(|token| token.as_ref()) {
            config.generations = Self::parse_generations(token, config.mode)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode == Mode::Silent && self.generations == Generations::Unbounded {
            return Err(ConfigError::SilentUnbounded);
        }
        Ok(())
    }

    pub fn fill_seeder(&self) -> Seeder {
        Seeder::RandomFill {
            percent: self.fill_percent,
        }
    }

    fn apply_pattern(&mut self, token: &str) {
        if token.eq_ignore_ascii_case("r") {
            self.seed = Seeder::RPentomino;
            return;
        }
        match token.parse::<i64>() {
            Ok(value) => match Percent::new(value) {
                Some(percent) => {
                    self.seed = Seeder::RandomFill { percent };
                    self.fill_percent = percent;
                }
                None => warn!("fill percent {value} is outside 0..=100, using {}", self.seed),
            },
            Err(_) => warn!("unrecognized pattern {token:?}, using {}", self.seed),
        }
    }

    fn parse_generations(token: &str, mode: Mode) -> Result<Generations, ConfigError> {
        let fallback = mode.default_generations();
        match token.parse::<i64>() {
            Ok(UNBOUNDED_SENTINEL) => Ok(Generations::Unbounded),
            Ok(value) if value < 0 => Err(ConfigError::NegativeGenerations(value)),
            Ok(value) => Ok(u32::try_from(value).map(Generations::Limit).unwrap_or_else(|_| {
                warn!("generation count {value} is too large, using {fallback}");
                fallback
            })),
            Err(_) => {
                warn!("unrecognized generation count {token:?}, using {fallback}");
                Ok(fallback)
            }
        }
    }
}
