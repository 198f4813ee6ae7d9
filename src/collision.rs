use crate::grid::{Bounds, Cell};
use crate::snake::Snake;
use serde::Serialize;
use std::fmt;

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    Wall,
    SelfCollision,
    /// Nowhere left to put food. Counts as a win.
    BoardFilled,
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Ending::Wall => "hit the wall",
            Ending::SelfCollision => "ran into itself",
            Ending::BoardFilled => "filled the board",
        })
    }
}

pub fn out_of_bounds(head: Cell, bounds: &Bounds) -> bool {
    !bounds.contains(head)
}

pub fn hits_body(snake: &Snake) -> bool {
    let head = snake.head();
    snake.trailing().any(|&c| c == head)
}

/// Which termination condition, if any, the current body meets.
pub fn termination(snake: &Snake, bounds: &Bounds) -> Option<Ending> {
    if out_of_bounds(snake.head(), bounds) {
        Some(Ending::Wall)
    } else if hits_body(snake) {
        Some(Ending::SelfCollision)
    } else {
        None
    }
}

pub fn is_game_over(snake: &Snake, bounds: &Bounds) -> bool {
    termination(snake, bounds).is_some()
}
