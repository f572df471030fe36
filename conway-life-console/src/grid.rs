use std::fmt;
use world_grid::{GridError, Loc, Neighborhood, WorldGrid};

use crate::cell::CellState;

pub const DEFAULT_WIDTH: u32 = 25;
pub const DEFAULT_HEIGHT: u32 = 25;

/// A fixed-size Life field addressed by `(x, y)`, with `x` running across
/// the width and `y` down the height.
#[derive(Clone, Debug)]
pub struct LifeGrid {
    grid: WorldGrid<CellState>,
}

impl LifeGrid {
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        Ok(Self {
            grid: WorldGrid::new(width, height)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Panics if `(x, y)` is outside the grid.
    pub fn get(&self, x: u32, y: u32) -> CellState {
        self.grid.cells[Loc::new(y, x)]
    }

    /// Panics if `(x, y)` is outside the grid.
    pub fn set(&mut self, x: u32, y: u32, state: CellState) {
        self.grid.cells[Loc::new(y, x)] = state;
    }

    pub fn fill_all(&mut self, state: CellState) {
        self.grid.cells.fill(state);
    }

    pub fn count_alive(&self) -> usize {
        self.grid.cells.count(CellState::is_alive)
    }

    pub fn living_neighbors(&self, x: u32, y: u32) -> u32 {
        Neighborhood::new(&self.grid.cells, Loc::new(y, x)).count_neighbors(CellState::is_alive)
    }

    /// Computes the next generation. `self` is left as it was.
    pub fn step(&self) -> LifeGrid {
        Self {
            grid: WorldGrid::from_cells(self.grid.next_cells()),
        }
    }

    /// Replaces this grid with its next generation.
    pub fn advance(&mut self) {
        self.grid.update();
    }

    fn border(&self) -> String {
        format!("+{}+", "-".repeat(3 * self.width() as usize))
    }
}

impl PartialEq for LifeGrid {
    fn eq(&self, other: &Self) -> bool {
        self.grid.cells == other.grid.cells
    }
}

impl Eq for LifeGrid {}

impl fmt::Display for LifeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = self.border();
        writeln!(f, "{border}")?;
        for y in 0..self.height() {
            f.write_str("|")?;
            for x in 0..self.width() {
                f.write_str(if self.get(x, y).is_alive() { " * " } else { "   " })?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{border}")
    }
}
