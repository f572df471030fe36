#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Conway's Game of Life on a bounded grid, run either interactively in a
//! terminal or silently to a fixed generation.

mod cell;
mod config;
mod error;
mod grid;
mod seed;
mod simulation;
mod terminal;

pub use cell::CellState;
pub use config::{ConfigError, Generations, Mode, RunConfig};
pub use error::LifeError;
pub use grid::LifeGrid;
pub use seed::{Percent, SeedError, Seeder};
pub use simulation::{Simulation, FRAME_DELAY};
pub use terminal::{line_ending, Command, CommandSource, CrlfWriter, TerminalKeys};
pub use world_grid::{GridError, Random};
