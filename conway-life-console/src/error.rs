use std::io;
use thiserror::Error;
use world_grid::GridError;

use crate::config::ConfigError;
use crate::seed::SeedError;

#[derive(Debug, Error)]
pub enum LifeError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
