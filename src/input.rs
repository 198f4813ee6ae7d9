use crate::grid::Velocity;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn velocity(self, unit: i32) -> Velocity {
        let (dx, dy) = match self {
            Direction::Up => (0, -unit),
            Direction::Down => (0, unit),
            Direction::Left => (-unit, 0),
            Direction::Right => (unit, 0),
        };
        Velocity { dx, dy }
    }

    /// Decodes one key of a headless script. Anything but `U`, `D`, `L`, `R`
    /// (either case) means "no key this tick".
    pub fn from_script_char(c: char) -> Option<Direction> {
        match c.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Velocity the snake should take after `key`, given the one it last moved with.
/// A key that would turn the snake straight back into its neck is dropped.
pub fn on_direction_key(key: Direction, current: Velocity, unit: i32) -> Velocity {
    accept(key, current, unit).unwrap_or(current)
}

/// Like [`on_direction_key`], but says whether the key was taken at all.
pub fn accept(key: Direction, current: Velocity, unit: i32) -> Option<Velocity> {
    let candidate = key.velocity(unit);
    (!candidate.is_opposite(current)).then_some(candidate)
}
