use crate::collision::{self, Ending};
use crate::engine::{self, Step};
use crate::error::GameError;
use crate::food;
use crate::grid::{Bounds, Cell, Velocity};
use crate::input::{self, Direction};
use crate::snake::Snake;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    NotStarted,
    Running,
    GameOver,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunStatus::NotStarted => "not started",
            RunStatus::Running => "running",
            RunStatus::GameOver => "over",
        })
    }
}

/// Result of one [`Game::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub step: Step,
    pub score: u32,
    /// Set when this tick ended the game.
    pub ending: Option<Ending>,
}

/// Borrowed view of everything a renderer needs.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Scene<'a> {
    pub status: RunStatus,
    pub score: u32,
    pub snake: &'a Snake,
    pub food: Option<Cell>,
    pub ending: Option<Ending>,
}

/// The game controller. Owns all mutable game state; nothing changes except
/// through [`start`](Game::start), [`tick`](Game::tick), [`reset`](Game::reset)
/// and [`on_direction_key`](Game::on_direction_key).
pub struct Game<R = SmallRng> {
    bounds: Bounds,
    rng: R,
    status: RunStatus,
    snake: Snake,
    /// Velocity the last tick moved with.
    velocity: Velocity,
    /// Velocity the next tick will move with.
    pending: Velocity,
    food: Option<Cell>,
    score: u32,
    ending: Option<Ending>,
}

impl Game<SmallRng> {
    pub fn new(bounds: Bounds) -> Self {
        Self::with_rng(bounds, SmallRng::from_entropy())
    }

    pub fn seeded(bounds: Bounds, seed: u64) -> Self {
        Self::with_rng(bounds, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(bounds: Bounds, rng: R) -> Self {
        let velocity = Direction::Right.velocity(bounds.unit);
        Self {
            bounds,
            rng,
            status: RunStatus::NotStarted,
            snake: Snake::initial(bounds.unit),
            velocity,
            pending: velocity,
            food: None,
            score: 0,
            ending: None,
        }
    }

    pub fn start(&mut self) -> Result<(), GameError> {
        if self.status != RunStatus::NotStarted {
            return Err(GameError::InvalidTransition { action: "start", status: self.status });
        }
        self.begin();
        info!(food = ?self.food, "game started");
        Ok(())
    }

    /// Reinitializes everything, whatever the current status, and starts over.
    pub fn reset(&mut self) {
        self.status = RunStatus::NotStarted;
        self.begin();
        info!(food = ?self.food, "game reset");
    }

    fn begin(&mut self) {
        self.snake = Snake::initial(self.bounds.unit);
        self.velocity = Direction::Right.velocity(self.bounds.unit);
        self.pending = self.velocity;
        self.score = 0;
        self.ending = None;
        self.food = food::spawn(&mut self.rng, &self.bounds, &self.snake);
        self.status = RunStatus::Running;
    }

    /// Queues a turn for the next tick. Reversals are dropped, and a later key
    /// before the same tick replaces an earlier one.
    pub fn on_direction_key(&mut self, key: Direction) {
        if self.status != RunStatus::Running {
            return;
        }
        if let Some(next) = input::accept(key, self.velocity, self.bounds.unit) {
            self.pending = next;
        }
    }

    /// Advances the game by one cell.
    pub fn tick(&mut self) -> Result<TickReport, GameError> {
        if self.status != RunStatus::Running {
            return Err(GameError::InvalidTransition { action: "tick", status: self.status });
        }

        self.velocity = self.pending;
        let step = engine::advance(&mut self.snake, self.velocity, self.food);
        if step.ate_food {
            self.score += 1;
        }

        let mut ending = collision::termination(&self.snake, &self.bounds);
        if ending.is_none() && step.ate_food {
            self.food = food::spawn(&mut self.rng, &self.bounds, &self.snake);
            debug!(score = self.score, food = ?self.food, "food eaten");
            if self.food.is_none() {
                ending = Some(Ending::BoardFilled);
            }
        }

        if let Some(reason) = ending {
            self.status = RunStatus::GameOver;
            self.ending = Some(reason);
            info!(score = self.score, length = self.snake.len(), "game over: snake {reason}");
        }

        Ok(TickReport { step, score: self.score, ending })
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ending(&self) -> Option<Ending> {
        self.ending
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            status: self.status,
            score: self.score,
            snake: &self.snake,
            food: self.food,
            ending: self.ending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds::new(500, 500, 25);
    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn running() -> Game {
        let mut game = Game::seeded(BOUNDS, RNG_SEED);
        game.start().unwrap();
        game
    }

    fn cells(game: &Game) -> Vec<Cell> {
        game.snake().cells().collect()
    }

    #[test]
    fn new_game_waits_for_start() {
        let mut game = Game::seeded(BOUNDS, RNG_SEED);
        assert_eq!(game.status(), RunStatus::NotStarted);
        assert_eq!(game.food(), None);
        assert!(matches!(
            game.tick(),
            Err(GameError::InvalidTransition { action: "tick", status: RunStatus::NotStarted })
        ));
    }

    #[test]
    fn start_initializes_state() {
        let game = running();
        assert_eq!(game.status(), RunStatus::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.velocity(), Velocity { dx: 25, dy: 0 });
        let food = game.food().unwrap();
        assert!(BOUNDS.contains(food));
        assert!(!game.snake().contains(food));
    }

    #[test]
    fn start_twice_is_an_error() {
        let mut game = running();
        assert!(matches!(
            game.start(),
            Err(GameError::InvalidTransition { action: "start", status: RunStatus::Running })
        ));
    }

    #[test]
    fn eating_scores_and_respawns() {
        let mut game = running();
        game.food = Some(Cell::new(125, 0));

        let report = game.tick().unwrap();
        assert!(report.step.ate_food);
        assert_eq!(report.score, 1);
        assert_eq!(report.ending, None);
        assert_eq!(
            cells(&game),
            vec![
                Cell::new(125, 0),
                Cell::new(100, 0),
                Cell::new(75, 0),
                Cell::new(50, 0),
                Cell::new(0, 0)
            ]
        );
        assert_eq!(game.score(), 1);
        let food = game.food().unwrap();
        assert!(!game.snake().contains(food));
    }

    #[test]
    fn moving_without_food() {
        let mut game = running();
        game.food = Some(Cell::new(500, 500));

        let report = game.tick().unwrap();
        assert!(!report.step.ate_food);
        assert_eq!(
            cells(&game),
            vec![Cell::new(125, 0), Cell::new(100, 0), Cell::new(75, 0), Cell::new(50, 0)]
        );
        assert_eq!(game.score(), 0);
        assert_eq!(game.food(), Some(Cell::new(500, 500)));
    }

    #[test]
    fn running_into_the_wall() {
        let mut game = running();
        game.food = None;
        for _ in 0..15 {
            assert_eq!(game.tick().unwrap().ending, None);
        }
        let report = game.tick().unwrap();
        assert_eq!(report.step.new_head, Cell::new(500, 0));
        assert_eq!(report.ending, Some(Ending::Wall));
        assert_eq!(game.status(), RunStatus::GameOver);
        assert_eq!(game.ending(), Some(Ending::Wall));
        assert!(game.tick().is_err());
    }

    #[test]
    fn running_into_itself() {
        let mut game = running();
        game.food = None;
        game.snake = Snake::from_cells(
            [(100, 100), (75, 100), (50, 100), (25, 100), (0, 100)].map(|(x, y)| Cell::new(x, y)),
        )
        .unwrap();

        game.on_direction_key(Direction::Down);
        game.tick().unwrap();
        game.on_direction_key(Direction::Left);
        game.tick().unwrap();
        game.on_direction_key(Direction::Up);
        let report = game.tick().unwrap();

        assert_eq!(report.ending, Some(Ending::SelfCollision));
        assert_eq!(game.status(), RunStatus::GameOver);
    }

    #[test]
    fn reversal_key_is_ignored() {
        let mut game = running();
        game.food = None;
        game.on_direction_key(Direction::Left);
        game.tick().unwrap();
        assert_eq!(game.snake().head(), Cell::new(125, 0));
    }

    #[test]
    fn two_quick_keys_cannot_reverse() {
        let mut game = running();
        game.food = None;
        // Up then Left inside one tick: Left is checked against the heading
        // the snake actually has (right), so it is dropped.
        game.on_direction_key(Direction::Up);
        game.on_direction_key(Direction::Left);
        game.tick().unwrap();
        assert_eq!(game.snake().head(), Cell::new(100, -25));
        assert_eq!(game.status(), RunStatus::GameOver);
    }

    #[test]
    fn last_key_wins() {
        let mut game = running();
        game.food = None;
        game.on_direction_key(Direction::Up);
        game.on_direction_key(Direction::Down);
        game.tick().unwrap();
        assert_eq!(game.snake().head(), Cell::new(100, 25));
        assert_eq!(game.velocity(), Velocity { dx: 0, dy: 25 });
    }

    #[test]
    fn keys_are_ignored_when_not_running() {
        let mut game = Game::seeded(BOUNDS, RNG_SEED);
        game.on_direction_key(Direction::Down);
        game.start().unwrap();
        assert_eq!(game.velocity(), Velocity { dx: 25, dy: 0 });
        game.food = None;
        game.tick().unwrap();
        assert_eq!(game.snake().head(), Cell::new(125, 0));
    }

    #[test]
    fn length_holds_without_food() {
        let mut game = running();
        game.food = None;
        for dir in [Direction::Down, Direction::Down, Direction::Right, Direction::Down, Direction::Left] {
            game.on_direction_key(dir);
            game.tick().unwrap();
            assert_eq!(game.snake().len(), 4);
        }
    }

    #[test]
    fn reset_from_game_over() {
        let mut game = running();
        game.food = Some(Cell::new(125, 0));
        game.tick().unwrap();
        game.on_direction_key(Direction::Up);
        game.tick().unwrap();
        assert_eq!(game.status(), RunStatus::GameOver);
        assert_eq!(game.score(), 1);

        game.reset();
        assert_eq!(game.status(), RunStatus::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.ending(), None);
        assert_eq!(cells(&game), Snake::initial(25).cells().collect::<Vec<_>>());
        assert_eq!(game.velocity(), Velocity { dx: 25, dy: 0 });
        assert!(game.food().is_some());
    }

    #[test]
    fn reset_works_from_any_state() {
        let mut fresh = Game::seeded(BOUNDS, RNG_SEED);
        fresh.reset();
        assert!(fresh.is_running());

        let mut mid = running();
        mid.on_direction_key(Direction::Down);
        mid.reset();
        assert!(mid.is_running());
        assert_eq!(mid.velocity(), Velocity { dx: 25, dy: 0 });
        mid.food = None;
        mid.tick().unwrap();
        assert_eq!(mid.snake().head(), Cell::new(125, 0));
    }

    #[test]
    fn filling_the_board_wins() {
        // 5x1 board, the starting snake leaves exactly one free cell.
        let bounds = Bounds::new(125, 25, 25);
        let mut game = Game::seeded(bounds, RNG_SEED);
        game.start().unwrap();
        assert_eq!(game.food(), Some(Cell::new(25, 0)));

        game.snake = Snake::from_cells([(75, 0), (50, 0), (25, 0), (0, 0)].map(|(x, y)| Cell::new(x, y))).unwrap();
        game.food = Some(Cell::new(100, 0));
        let report = game.tick().unwrap();

        assert!(report.step.ate_food);
        assert_eq!(report.ending, Some(Ending::BoardFilled));
        assert_eq!(game.status(), RunStatus::GameOver);
        assert_eq!(game.food(), None);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn scene_mirrors_state() {
        let game = running();
        let scene = game.scene();
        assert_eq!(scene.status, RunStatus::Running);
        assert_eq!(scene.score, 0);
        assert_eq!(scene.food, game.food());
        assert_eq!(scene.snake.len(), 4);

        let json = serde_json::to_value(scene).unwrap();
        assert_eq!(json["status"], "running");
        assert_eq!(json["snake"][0]["x"], 100);
    }
}
