use world_grid::{GridCell, Neighborhood};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(&self) -> bool {
        *self == CellState::Alive
    }

    fn num_live_neighbors(neighborhood: &Neighborhood<CellState>) -> u32 {
        neighborhood.count_neighbors(CellState::is_alive)
    }
}

impl GridCell for CellState {
    fn update(&self, neighborhood: &Neighborhood<CellState>, next_cell: &mut CellState) {
        let neighbors = Self::num_live_neighbors(neighborhood);
        let alive = match self {
            CellState::Alive => neighbors == 2 || neighbors == 3,
            CellState::Dead => neighbors == 3,
        };
        *next_cell = if alive {
            CellState::Alive
        } else {
            CellState::Dead
        };
    }
}
