//! 2D grid of cells.

use automata_core::{CellState, Dimensions, Direction, Error, Position, Result};
use serde::{Deserialize, Serialize};

/// A 2D toroidal grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(width: i32, height: i32, fill: CellState) -> Self {
        let size = Dimensions::new(width, height).area();
        Self {
            width,
            height,
            cells: vec![fill; size],
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Get cell at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> CellState {
        self.cells[self.pos_to_index(pos)]
    }

    /// Set cell at position (with toroidal wrapping)
    pub fn set(&mut self, pos: Position, state: CellState) {
        let index = self.pos_to_index(pos);
        self.cells[index] = state;
    }

    /// Whether `(x, y)` addresses a cell without wrapping
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.dimensions().contains(x, y)
    }

    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    /// Overwrite every cell with the state produced for its position
    pub fn fill_with(&mut self, mut f: impl FnMut(Position) -> CellState) {
        let width = self.width;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            let i = i as i32;
            *cell = f(Position::new(i % width, i / width));
        }
    }

    /// Count the Moore neighbors of `pos` whose state is one of `active`.
    ///
    /// On grids one cell wide or tall, an offset that wraps back onto `pos`
    /// itself is skipped; other offsets that alias the same cell are each counted.
    pub fn neighbor_alive_count(&self, pos: Position, active: &[CellState]) -> usize {
        let centre = pos.wrap(self.width, self.height);
        Direction::all()
            .iter()
            .map(|direction| {
                let (dx, dy) = direction.to_delta();
                centre.add(dx, dy).wrap(self.width, self.height)
            })
            .filter(|neighbor| *neighbor != centre)
            .filter(|neighbor| active.contains(&self.get(*neighbor)))
            .count()
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Swap in a whole new generation, handing back the previous buffer
    pub fn replace_cells(&mut self, cells: Vec<CellState>) -> Result<Vec<CellState>> {
        if cells.len() != self.cells.len() {
            return Err(Error::InvariantViolation(format!(
                "generation has {} cells, grid holds {}",
                cells.len(),
                self.cells.len()
            )));
        }
        Ok(std::mem::replace(&mut self.cells, cells))
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        let wrapped = pos.wrap(self.width, self.height);
        (wrapped.y * self.width + wrapped.x) as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.width;
        let y = (index as i32) / self.width;
        Position::new(x, y)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, state)| (self.index_to_pos(i), *state))
    }
}
