#![deny(clippy::all)]
#![forbid(unsafe_code)]

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fmt::Debug;
use std::mem;
use std::ops::{Index, IndexMut};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: u32, height: u32 },
}

/// A grid whose cells change together, one generation at a time.
///
/// The next generation is always computed from a complete, unmodified copy of
/// the current one.
#[derive(Clone, Debug)]
pub struct WorldGrid<C>
where
    C: Clone + GridCell,
{
    pub cells: WorldGridCells<C>,
    next_cells: WorldGridCells<C>,
}

impl<C> WorldGrid<C>
where
    C: Clone + Debug + GridCell,
{
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        Ok(Self {
            cells: WorldGridCells::new(width, height)?,
            next_cells: WorldGridCells::new(width, height)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.cells.width()
    }

    pub fn height(&self) -> u32 {
        self.cells.height()
    }

    /// Advances one generation in place by writing into the spare buffer and
    /// swapping it in.
    pub fn update(&mut self) {
        Self::update_cells(&self.cells, &mut self.next_cells);
        mem::swap(&mut self.next_cells, &mut self.cells);
    }

    /// Returns the next generation without touching the current one.
    pub fn next_cells(&self) -> WorldGridCells<C> {
        let mut next_cells = self.cells.clone();
        Self::update_cells(&self.cells, &mut next_cells);
        next_cells
    }

    fn update_cells(cells: &WorldGridCells<C>, next_cells: &mut WorldGridCells<C>) {
        for row in 0..cells.height() {
            for col in 0..cells.width() {
                let loc = Loc::new(row, col);
                let neighborhood = Neighborhood::new(cells, loc);
                cells[loc].update(&neighborhood, &mut next_cells[loc]);
            }
        }
    }

    pub fn from_cells(cells: WorldGridCells<C>) -> Self {
        Self {
            next_cells: cells.clone(),
            cells,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldGridCells<C>
where
    C: Clone + GridCell,
{
    cells: Vec<C>,
    width: u32,
    height: u32,
}

impl<C> WorldGridCells<C>
where
    C: Clone + Copy + Default + GridCell,
{
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimension { width, height });
        }
        Ok(Self {
            cells: vec![C::default(); width as usize * height as usize],
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell(&self, loc: Loc) -> Option<&C> {
        loc.grid_index(self.width, self.height)
            .map(|index| &self.cells[index])
    }

    fn cell_mut(&mut self, loc: Loc) -> Option<&mut C> {
        loc.grid_index(self.width, self.height)
            .map(|index| &mut self.cells[index])
    }

    pub fn fill(&mut self, cell: C) {
        self.cells.fill(cell);
    }

    pub fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&C) -> bool,
    {
        self.cells.iter().filter(|cell| predicate(cell)).count()
    }
}

impl<C> Index<Loc> for WorldGridCells<C>
where
    C: Clone + Copy + Default + GridCell,
{
    type Output = C;

    fn index(&self, loc: Loc) -> &Self::Output {
        self.cell(loc)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl<C> IndexMut<Loc> for WorldGridCells<C>
where
    C: Clone + Copy + Default + GridCell,
{
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        self.cell_mut(loc)
            .unwrap_or_else(|| panic!("Index_mut indices {}, {} out of bounds", loc.row, loc.col))
    }
}

pub trait GridCell
where
    Self: Copy + Default,
{
    fn update(&self, neighborhood: &Neighborhood<Self>, next_cell: &mut Self);
}

/// The up-to-eight cells around a center cell. Positions past the grid edge
/// are absent; they never wrap.
pub struct Neighborhood<'a, C>
where
    C: Clone + Copy + Default + GridCell,
{
    cells: &'a WorldGridCells<C>,
    center: Loc,
}

const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl<'a, C> Neighborhood<'a, C>
where
    C: Clone + Copy + Default + GridCell,
{
    pub fn new(cells: &'a WorldGridCells<C>, center: Loc) -> Self {
        Self { cells, center }
    }

    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(&C),
    {
        for (row_offset, col_offset) in NEIGHBOR_OFFSETS {
            if let Some(cell) = self.offset_cell(row_offset, col_offset) {
                f(cell);
            }
        }
    }

    pub fn count_neighbors<P>(&self, predicate: P) -> u32
    where
        P: Fn(&C) -> bool,
    {
        let mut result = 0;
        self.for_neighbor_cells(|neighbor| {
            if predicate(neighbor) {
                result += 1;
            }
        });
        result
    }

    fn offset_cell(&self, row_offset: i64, col_offset: i64) -> Option<&C> {
        let row = self.center.row as i64 + row_offset;
        let col = self.center.col as i64 + col_offset;
        if row < 0 || col < 0 {
            return None;
        }
        self.cells.cell(Loc::new(row as u32, col as u32))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, width: u32, height: u32) -> Option<usize> {
        if self.row < height && self.col < width {
            Some(self.row as usize * width as usize + self.col as usize)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
