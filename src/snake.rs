use crate::error::GameError;
use crate::grid::Cell;
use serde::Serialize;
use std::collections::VecDeque;

pub const INITIAL_LENGTH: usize = 4;

/// Body cells, head first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Result<Self, GameError> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return Err(GameError::EmptySnake);
        }
        Ok(Self { body })
    }

    /// Starting layout along the top row, heading right. The gap between the
    /// last two segments closes once the tail moves.
    pub fn initial(unit: i32) -> Self {
        let body = [4, 3, 2, 0].into_iter().map(|i| Cell::new(unit * i, 0)).collect();
        Self { body }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Everything behind the head.
    pub fn trailing(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter().skip(1)
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    /// Drops the tail, keeping at least the head.
    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        if self.body.len() > 1 { self.body.pop_back() } else { None }
    }
}
