//! Window-free driver. Plays a game from a key script on a simulated clock and
//! writes one JSON line per scheduler callback.

use crate::collision::Ending;
use crate::error::DriverError;
use crate::game::{Game, RunStatus, Scene};
use crate::input::Direction;
use crate::schedule::{Fired, Ticker};
use rand::Rng;
use serde::Serialize;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Script {
    /// One entry per tick; `None` means no key before that tick.
    keys: Vec<Option<Direction>>,
}

impl Script {
    pub fn parse(text: &str) -> Self {
        Self { keys: text.chars().filter(|c| !c.is_whitespace()).map(Direction::from_script_char).collect() }
    }

    fn key_for(&self, tick: usize) -> Option<Direction> {
        self.keys.get(tick).copied().flatten()
    }
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Line<'a> {
    Tick {
        tick: usize,
        ate_food: bool,
        #[serde(flatten)]
        scene: Scene<'a>,
    },
    GameOver {
        score: u32,
        ending: Option<Ending>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub ticks: usize,
    pub score: u32,
    pub status: RunStatus,
    pub ending: Option<Ending>,
}

/// Starts `game` and drives it until the game-over callback fires or
/// `max_ticks` ticks have run.
pub fn run<R: Rng, W: Write>(
    game: &mut Game<R>,
    interval: Duration,
    script: &Script,
    max_ticks: usize,
    mut out: W,
) -> Result<Summary, DriverError> {
    game.start()?;

    let mut ticker = Ticker::new(interval);
    let mut now = Instant::now();
    ticker.arm(now);
    let mut ticks = 0;

    while ticker.is_armed() && ticks < max_ticks {
        if let Some(key) = script.key_for(ticks) {
            game.on_direction_key(key);
        }

        now += interval;
        match ticker.fire(game, now)? {
            Some(Fired::Ticked(report)) => {
                let line = Line::Tick { tick: ticks, ate_food: report.step.ate_food, scene: game.scene() };
                serde_json::to_writer(&mut out, &line)?;
                ticks += 1;
            }
            Some(Fired::GameOver { score, ending }) => {
                serde_json::to_writer(&mut out, &Line::GameOver { score, ending })?;
            }
            None => continue,
        }
        writeln!(out)?;
    }
    out.flush()?;

    let summary = Summary { ticks, score: game.score(), status: game.status(), ending: game.ending() };
    info!(?summary, "headless run finished");
    Ok(summary)
}
