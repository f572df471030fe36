use log::{debug, info};
use std::io::Write;
use std::thread;
use std::time::Duration;
use world_grid::Random;

use crate::cell::CellState;
use crate::config::{ConfigError, Generations, RunConfig};
use crate::error::LifeError;
use crate::grid::LifeGrid;
use crate::seed::{SeedError, Seeder};
use crate::terminal::{Command, CommandSource};

/// Pause between interactive frames.
pub const FRAME_DELAY: Duration = Duration::from_millis(500);

/// The current grid and how many generations it has been through.
#[derive(Debug)]
pub struct Simulation {
    config: RunConfig,
    grid: LifeGrid,
    generation: u32,
    rand: Random,
    frame_delay: Duration,
}

impl Simulation {
    /// Builds the seeded generation-0 grid.
    pub fn new(config: RunConfig, mut rand: Random) -> Result<Self, LifeError> {
        config.validate()?;
        let mut grid = LifeGrid::new(config.width, config.height)?;
        info!("--- Filling grid with {}", config.seed);
        config.seed.populate(&mut grid, &mut rand)?;
        Ok(Self {
            config,
            grid,
            generation: 0,
            rand,
            frame_delay: FRAME_DELAY,
        })
    }

    pub fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay;
        self
    }

    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn step(&mut self) {
        self.grid.advance();
        self.generation += 1;
    }

    /// Steps to the target generation and prints it once.
    pub fn run_silent<W: Write>(&mut self, out: &mut W) -> Result<(), LifeError> {
        let Generations::Limit(target) = self.config.generations else {
            return Err(ConfigError::SilentUnbounded.into());
        };
        loop {
            self.log_generation();
            if self.generation >= target {
                break;
            }
            self.step();
        }
        self.write_banner(out, target)?;
        write!(out, "{}", self.grid)?;
        out.flush()?;
        Ok(())
    }

    /// Shows, waits, and steps until quit or the target generation has been
    /// shown.
    pub fn run_interactive<W, K>(&mut self, out: &mut W, commands: &mut K) -> Result<(), LifeError>
    where
        W: Write,
        K: CommandSource,
    {
        loop {
            let shown = self.generation;
            self.log_generation();
            write!(out, "{}", self.grid)?;
            out.flush()?;

            if !self.frame_delay.is_zero() {
                thread::sleep(self.frame_delay);
            }

            self.step();

            if let Some(command) = commands.poll_command()? {
                debug!("{command:?} requested at generation {}", self.generation);
                match command {
                    Command::Quit => break,
                    Command::Fill => self.reseed(self.config.fill_seeder())?,
                    Command::Pattern => self.reseed(Seeder::RPentomino)?,
                }
            }

            if self.config.generations.is_reached(shown) {
                break;
            }
        }
        Ok(())
    }

    fn log_generation(&self) {
        info!(
            "Generation: {}  aliveCount: {}",
            self.generation,
            self.grid.count_alive()
        );
    }

    fn reseed(&mut self, seeder: Seeder) -> Result<(), SeedError> {
        info!("--- Refilling grid with {seeder}");
        self.grid.fill_all(CellState::Dead);
        seeder.populate(&mut self.grid, &mut self.rand)
    }

    fn write_banner<W: Write>(&self, out: &mut W, target: u32) -> Result<(), LifeError> {
        writeln!(out, "ConwaysGameOfLife")?;
        writeln!(out, "{}", "=".repeat(38))?;
        writeln!(out, " {} mode", self.config.mode)?;
        writeln!(out, " Starting with: {}", self.config.seed)?;
        writeln!(out, " Running for {target} generations")?;
        writeln!(out, "Generation: {}", self.generation)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::seed::Percent;
    use log::{LevelFilter, Log, Metadata, Record};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use std::sync::Once;

    thread_local! {
        static LOG_LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    // Records land on the logging thread, so each test sees only its own lines.
    struct LineCapture;

    impl Log for LineCapture {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            LOG_LINES.with(|lines| lines.borrow_mut().push(record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static LINE_CAPTURE: LineCapture = LineCapture;
    static INSTALL_CAPTURE: Once = Once::new();

    fn captured_log<F: FnOnce()>(f: F) -> Vec<String> {
        INSTALL_CAPTURE.call_once(|| {
            log::set_logger(&LINE_CAPTURE).unwrap();
            log::set_max_level(LevelFilter::Debug);
        });
        LOG_LINES.with(|lines| lines.borrow_mut().clear());
        f();
        LOG_LINES.with(|lines| lines.borrow_mut().drain(..).collect())
    }

    /// Key presses, one per poll; `None` is a poll with nothing pending.
    struct Script {
        polls: VecDeque<Option<char>>,
        count: usize,
    }

    impl Script {
        fn new(polls: &[Option<char>]) -> Self {
            Self {
                polls: polls.iter().copied().collect(),
                count: 0,
            }
        }
    }

    impl CommandSource for Script {
        fn poll_command(&mut self) -> io::Result<Option<Command>> {
            self.count += 1;
            Ok(self.polls.pop_front().flatten().and_then(Command::from_key))
        }
    }

    fn config(mode: Mode, seed: Seeder, generations: Generations) -> RunConfig {
        RunConfig {
            mode,
            seed,
            generations,
            ..RunConfig::default()
        }
    }

    fn simulation(config: RunConfig) -> Simulation {
        Simulation::new(config, Random::from_seed(3))
            .unwrap()
            .with_frame_delay(Duration::ZERO)
    }

    fn frames(output: &[u8]) -> usize {
        let text = String::from_utf8_lossy(output);
        text.lines().filter(|line| line.starts_with('+')).count() / 2
    }

    fn empty_fill() -> Seeder {
        Seeder::RandomFill {
            percent: Percent::new(0).unwrap(),
        }
    }

    #[test]
    fn starts_at_generation_zero_with_seed() {
        let sim = simulation(RunConfig::default());
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.grid().count_alive(), 5);
    }

    #[test]
    fn rejects_silent_unbounded_before_building_grid() {
        let bad = RunConfig {
            mode: Mode::Silent,
            width: 0,
            ..RunConfig::default()
        };
        assert!(matches!(
            Simulation::new(bad, Random::from_seed(1)),
            Err(LifeError::Config(ConfigError::SilentUnbounded))
        ));
    }

    #[test]
    fn reports_grid_too_small_for_pattern() {
        let small = RunConfig {
            width: 3,
            height: 3,
            ..RunConfig::default()
        };
        assert!(matches!(
            Simulation::new(small, Random::from_seed(1)),
            Err(LifeError::Seed(SeedError::GridTooSmall { .. }))
        ));
    }

    #[test]
    fn silent_renders_once_at_target() {
        let mut sim = simulation(config(
            Mode::Silent,
            Seeder::RPentomino,
            Generations::Limit(12),
        ));
        let mut expected = LifeGrid::new(25, 25).unwrap();
        Seeder::RPentomino
            .populate(&mut expected, &mut Random::from_seed(0))
            .unwrap();
        for _ in 0..12 {
            expected = expected.step();
        }

        let mut out = Vec::new();
        sim.run_silent(&mut out).unwrap();

        assert_eq!(sim.generation(), 12);
        assert_eq!(sim.grid(), &expected);
        assert_eq!(frames(&out), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("ConwaysGameOfLife\n"));
        assert!(text.contains(" silent mode\n"));
        assert!(text.contains(" Starting with: R-Pentomino\n"));
        assert!(text.contains(" Running for 12 generations\n"));
        assert!(text.contains("Generation: 12\n"));
        assert!(text.ends_with(&expected.to_string()));
    }

    #[test]
    fn silent_zero_generations_shows_seed() {
        let mut sim = simulation(config(
            Mode::Silent,
            Seeder::RPentomino,
            Generations::Limit(0),
        ));
        let mut out = Vec::new();
        sim.run_silent(&mut out).unwrap();
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.grid().count_alive(), 5);
        assert_eq!(frames(&out), 1);
    }

    #[test]
    fn interactive_quit_key_stops_loop() {
        let mut sim = simulation(RunConfig::default());
        let mut script = Script::new(&[None, None, Some('q')]);
        let mut out = Vec::new();
        sim.run_interactive(&mut out, &mut script).unwrap();

        assert_eq!(frames(&out), 3);
        assert_eq!(script.count, 3);
        assert_eq!(sim.generation(), 3);
    }

    #[test]
    fn interactive_shows_every_generation_up_to_target() {
        let mut sim = simulation(config(
            Mode::Interactive,
            Seeder::RPentomino,
            Generations::Limit(4),
        ));
        let mut script = Script::new(&[]);
        let mut out = Vec::new();
        sim.run_interactive(&mut out, &mut script).unwrap();

        assert_eq!(frames(&out), 5);
        assert_eq!(script.count, 5);
    }

    #[test]
    fn fill_key_reseeds_with_fill_percent() {
        let mut run = config(Mode::Interactive, Seeder::RPentomino, Generations::Limit(0));
        run.fill_percent = Percent::new(100).unwrap();
        let mut sim = simulation(run);
        let mut script = Script::new(&[Some('F')]);
        sim.run_interactive(&mut Vec::new(), &mut script).unwrap();

        assert_eq!(sim.grid().count_alive(), 25 * 25);
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn pattern_key_reseeds_with_r_pentomino() {
        let mut sim = simulation(config(
            Mode::Interactive,
            empty_fill(),
            Generations::Limit(1),
        ));
        assert_eq!(sim.grid().count_alive(), 0);

        let mut script = Script::new(&[None, Some('r')]);
        let mut out = Vec::new();
        sim.run_interactive(&mut out, &mut script).unwrap();

        assert_eq!(frames(&out), 2);
        assert_eq!(sim.grid().count_alive(), 5);
        assert_eq!(sim.grid().get(13, 13), CellState::Alive);
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let mut sim = simulation(config(
            Mode::Interactive,
            Seeder::RPentomino,
            Generations::Limit(2),
        ));
        let mut expected = sim.grid().clone();
        for _ in 0..3 {
            expected.advance();
        }

        let mut script = Script::new(&[Some('x'), Some(' '), Some('z')]);
        let mut out = Vec::new();
        sim.run_interactive(&mut out, &mut script).unwrap();

        assert_eq!(frames(&out), 3);
        assert_eq!(script.count, 3);
        assert_eq!(sim.generation(), 3);
        assert_eq!(sim.grid(), &expected);
    }

    #[test]
    fn silent_logs_every_generation() {
        let mut sim = simulation(config(
            Mode::Silent,
            Seeder::RPentomino,
            Generations::Limit(3),
        ));
        let lines = captured_log(|| sim.run_silent(&mut Vec::new()).unwrap());
        let generations: Vec<&String> = lines
            .iter()
            .filter(|line| line.starts_with("Generation: "))
            .collect();

        assert_eq!(generations.len(), 4);
        assert_eq!(generations[0], "Generation: 0  aliveCount: 5");
        for (generation, line) in generations.iter().enumerate() {
            assert!(line.starts_with(&format!("Generation: {generation}  aliveCount: ")));
        }
    }
}
