use serde::{Deserialize, Serialize};
use std::ops::Add;

/// One grid square, addressed by its top-left pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add<Velocity> for Cell {
    type Output = Cell;

    fn add(self, v: Velocity) -> Cell {
        Cell::new(self.x + v.dx, self.y + v.dy)
    }
}

/// One unit step along an axis. Built from a [`Direction`](crate::input::Direction),
/// so it is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub fn is_opposite(self, other: Velocity) -> bool {
        self.dx == -other.dx && self.dy == -other.dy
    }
}

/// Board size in pixels plus the edge length of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
    pub unit: i32,
}

impl Bounds {
    pub const fn new(width: i32, height: i32, unit: i32) -> Self {
        Self { width, height, unit }
    }

    /// Largest valid x coordinate of a cell.
    pub fn max_x(&self) -> i32 {
        self.width - self.unit
    }

    pub fn max_y(&self) -> i32 {
        self.height - self.unit
    }

    pub fn columns(&self) -> i32 {
        self.width / self.unit
    }

    pub fn rows(&self) -> i32 {
        self.height / self.unit
    }

    pub fn cell_count(&self) -> usize {
        (self.columns() * self.rows()) as usize
    }

    /// Half-open containment: `[0, width) x [0, height)`.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Every aligned cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let (columns, rows, unit) = (self.columns(), self.rows(), self.unit);
        (0..rows).flat_map(move |row| (0..columns).map(move |col| Cell::new(col * unit, row * unit)))
    }
}
