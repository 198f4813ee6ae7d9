//! Grid snake: a fixed-interval snake game on a pixel surface.
//!
//! The engine (`grid`, `snake`, `engine`, `collision`, `food`, `input`, `game`)
//! knows nothing about windows or clocks. `schedule` drives it on a fixed
//! cadence, `render` and `app` put it on screen, and `headless` plays it from a
//! key script for scripted runs and tests.

pub mod app;
pub mod collision;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod headless;
pub mod input;
pub mod render;
pub mod schedule;
pub mod snake;

pub use config::Config;
pub use error::{ConfigError, DriverError, GameError};
pub use game::{Game, RunStatus, Scene};
pub use grid::{Bounds, Cell, Velocity};
pub use input::Direction;
