#![deny(clippy::all)]
#![forbid(unsafe_code)]

use conway_life::{
    line_ending, CrlfWriter, LifeError, Mode, Random, RunConfig, Simulation, TerminalKeys,
};
use env_logger::Env;
use log::{error, info};
use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();
    info!("=== Starting Program ===");
    info!("Parsing arguments...");

    let args: Vec<String> = env::args().skip(1).collect();
    let config = match RunConfig::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!("... argument parsing complete");
    info!("{} mode", config.mode);
    info!("starting with: {}", config.seed);
    info!("running for {} generations", config.generations);

    let result = run(config);
    info!("=== Ending Program ===");
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: RunConfig) -> Result<(), LifeError> {
    let mut simulation = Simulation::new(config, Random::new())?;
    match config.mode {
        Mode::Silent => simulation.run_silent(&mut io::stdout().lock()),
        Mode::Interactive => {
            let mut keys = TerminalKeys::new()?;
            let mut out = CrlfWriter::new(io::stdout().lock());
            simulation.run_interactive(&mut out, &mut keys)
        }
    }
}

fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            write!(
                buf,
                "[{} {} {}] {}{}",
                buf.timestamp(),
                record.level(),
                record.target(),
                record.args(),
                line_ending()
            )
        })
        .init();
}
