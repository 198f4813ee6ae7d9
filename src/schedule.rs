use crate::collision::Ending;
use crate::error::GameError;
use crate::game::{Game, TickReport};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::debug;

/// What a due callback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fired {
    Ticked(TickReport),
    /// The game stopped during the previous tick. Reported once; the ticker
    /// disarms afterwards.
    GameOver { score: u32, ending: Option<Ending> },
}

/// Fixed-delay driver for [`Game::tick`].
///
/// Each callback that finds the game running ticks it and re-arms, whatever
/// the tick did. So the tick that ends a game is followed by exactly one more
/// callback, which reports the game over and stops re-arming.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_due: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedules the next callback one interval after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Runs the callback if it is due at `now`.
    pub fn fire<R: Rng>(&mut self, game: &mut Game<R>, now: Instant) -> Result<Option<Fired>, GameError> {
        if !self.is_due(now) {
            return Ok(None);
        }

        if game.is_running() {
            let report = game.tick()?;
            self.arm(now);
            debug!(head = ?report.step.new_head, score = report.score, "tick");
            Ok(Some(Fired::Ticked(report)))
        } else {
            self.disarm();
            Ok(Some(Fired::GameOver { score: game.score(), ending: game.ending() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Bounds;

    const INTERVAL: Duration = Duration::from_millis(75);

    fn started() -> Game {
        let mut game = Game::seeded(Bounds::new(500, 500, 25), 7);
        game.start().unwrap();
        game
    }

    #[test]
    fn waits_for_the_interval() {
        let mut game = started();
        let mut ticker = Ticker::new(INTERVAL);
        let t0 = Instant::now();
        assert_eq!(ticker.fire(&mut game, t0).unwrap(), None);

        ticker.arm(t0);
        assert_eq!(ticker.fire(&mut game, t0 + Duration::from_millis(74)).unwrap(), None);
        assert!(matches!(ticker.fire(&mut game, t0 + INTERVAL).unwrap(), Some(Fired::Ticked(_))));
        assert!(ticker.is_armed());
        assert!(!ticker.is_due(t0 + INTERVAL));
        assert!(ticker.is_due(t0 + INTERVAL * 2));
    }

    #[test]
    fn game_over_is_reported_once() {
        let mut game = started();
        let mut ticker = Ticker::new(INTERVAL);
        let mut now = Instant::now();
        ticker.arm(now);

        let mut ticks = 0;
        let mut game_overs = 0;
        for _ in 0..100 {
            now += INTERVAL;
            match ticker.fire(&mut game, now).unwrap() {
                Some(Fired::Ticked(_)) => ticks += 1,
                Some(Fired::GameOver { ending, .. }) => {
                    game_overs += 1;
                    assert!(ending.is_some());
                }
                None => {}
            }
        }

        // Heading right from x=100 on a 500 wide board hits the wall on tick 16.
        assert_eq!(ticks, 16);
        assert_eq!(game_overs, 1);
        assert!(!ticker.is_armed());
    }

    #[test]
    fn rearms_after_reset() {
        let mut game = started();
        let mut ticker = Ticker::new(INTERVAL);
        let mut now = Instant::now();
        ticker.arm(now);
        while ticker.is_armed() {
            now += INTERVAL;
            ticker.fire(&mut game, now).unwrap();
        }

        game.reset();
        ticker.arm(now);
        now += INTERVAL;
        assert!(matches!(ticker.fire(&mut game, now).unwrap(), Some(Fired::Ticked(_))));
    }
}
