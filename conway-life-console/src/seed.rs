use std::fmt;
use thiserror::Error;
use world_grid::Random;

use crate::cell::CellState;
use crate::grid::LifeGrid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("a {width}x{height} grid is too small for the R-pentomino")]
    GridTooSmall { width: u32, height: u32 },
}

/// A fill percentage in `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Percent(u8);

impl Percent {
    pub const DEFAULT_FILL: Percent = Percent(20);

    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|value| *value <= 100)
            .map(Percent)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    fn probability(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// (dx, dy) from the pattern center
const R_PENTOMINO: [(i64, i64); 5] = [(0, -1), (1, -1), (-1, 0), (0, 0), (0, 1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seeder {
    RandomFill { percent: Percent },
    RPentomino,
}

impl Seeder {
    pub fn populate(&self, grid: &mut LifeGrid, rand: &mut Random) -> Result<(), SeedError> {
        match self {
            Seeder::RandomFill { percent } => {
                Self::fill_randomly(grid, *percent, rand);
                Ok(())
            }
            Seeder::RPentomino => Self::add_r_pentomino(grid),
        }
    }

    fn fill_randomly(grid: &mut LifeGrid, percent: Percent, rand: &mut Random) {
        let p = percent.probability();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let state = if rand.next_bool(p) {
                    CellState::Alive
                } else {
                    CellState::Dead
                };
                grid.set(x, y, state);
            }
        }
    }

    fn add_r_pentomino(grid: &mut LifeGrid) -> Result<(), SeedError> {
        let (width, height) = (grid.width(), grid.height());
        let cx = Self::center(width);
        let cy = Self::center(height);

        let mut locs = Vec::with_capacity(R_PENTOMINO.len());
        for (dx, dy) in R_PENTOMINO {
            let (x, y) = (cx + dx, cy + dy);
            if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                return Err(SeedError::GridTooSmall { width, height });
            }
            locs.push((x as u32, y as u32));
        }

        grid.fill_all(CellState::Dead);
        for (x, y) in locs {
            grid.set(x, y, CellState::Alive);
        }
        Ok(())
    }

    // Odd sizes round the center up.
    fn center(size: u32) -> i64 {
        (size / 2 + size % 2) as i64
    }
}

impl fmt::Display for Seeder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seeder::RandomFill { percent } => write!(f, "random fill at {percent}"),
            Seeder::RPentomino => f.write_str("R-Pentomino"),
        }
    }
}
