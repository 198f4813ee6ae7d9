use crate::config::Config;
use crate::game::{Game, RunStatus};
use crate::input::Direction;
use crate::render::{Banner, Canvas, Renderer};
use crate::schedule::{Fired, Ticker};
use anyhow::Context;
use pixels::{Pixels, SurfaceTexture};
use rand::Rng;
use std::time::Instant;
use tracing::{error, info, warn};
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

const STEER_KEYS: [(VirtualKeyCode, VirtualKeyCode, Direction); 4] = [
    (VirtualKeyCode::Up, VirtualKeyCode::W, Direction::Up),
    (VirtualKeyCode::Down, VirtualKeyCode::S, Direction::Down),
    (VirtualKeyCode::Left, VirtualKeyCode::A, Direction::Left),
    (VirtualKeyCode::Right, VirtualKeyCode::D, Direction::Right),
];

/// Session around one game: the ticker, pause state, and whether the game-over
/// callback has fired yet.
pub struct App<R> {
    game: Game<R>,
    ticker: Ticker,
    paused: bool,
    game_over_shown: bool,
}

impl<R: Rng> App<R> {
    pub fn new(game: Game<R>, ticker: Ticker) -> Self {
        Self { game, ticker, paused: false, game_over_shown: false }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn start(&mut self, now: Instant) {
        match self.game.start() {
            Ok(()) => self.ticker.arm(now),
            Err(err) => warn!(%err, "start ignored"),
        }
    }

    pub fn reset(&mut self, now: Instant) {
        self.game.reset();
        self.paused = false;
        self.game_over_shown = false;
        self.ticker.arm(now);
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        if !self.game.is_running() {
            return;
        }
        self.paused = !self.paused;
        if self.paused {
            info!("paused");
        } else {
            info!("resumed");
            self.ticker.arm(now);
        }
    }

    pub fn steer(&mut self, dir: Direction) {
        if !self.paused {
            self.game.on_direction_key(dir);
        }
    }

    /// Lets the ticker run if a callback is due.
    pub fn update(&mut self, now: Instant) {
        if self.paused {
            return;
        }
        match self.ticker.fire(&mut self.game, now) {
            Ok(Some(Fired::GameOver { score, ending })) => {
                info!(score, ?ending, "showing game over");
                self.game_over_shown = true;
            }
            Ok(_) => {}
            Err(err) => error!(%err, "tick failed"),
        }
    }

    pub fn banner(&self) -> Banner {
        match self.game.status() {
            RunStatus::NotStarted => Banner::Title,
            _ if self.game_over_shown => Banner::Ended(self.game.ending()),
            _ if self.paused => Banner::Paused,
            _ => Banner::None,
        }
    }
}

/// Opens the window and runs the game until it is closed.
pub fn run(config: &Config, seed: Option<u64>) -> anyhow::Result<()> {
    let colors = config.palette.resolve()?;
    let bounds = config.bounds();
    let renderer = Renderer::new(colors, bounds);
    let (width, height) = renderer.surface_size();

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    let window = WindowBuilder::new()
        .with_title("Snake")
        .with_inner_size(LogicalSize::new(width, height))
        .with_resizable(false)
        .build(&event_loop)
        .context("failed to create window")?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(width, height, surface_texture).context("failed to create pixel surface")?
    };

    let game = match seed {
        Some(seed) => Game::seeded(bounds, seed),
        None => Game::new(bounds),
    };
    let mut app = App::new(game, Ticker::new(config.tick_interval()));
    info!(width, height, tick_ms = config.tick_ms, "window ready");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        if let Event::RedrawRequested(_) = event {
            let mut canvas = Canvas::new(pixels.frame_mut(), width, height);
            renderer.draw(&mut canvas, &app.game().scene(), app.banner());
            if let Err(err) = pixels.render() {
                error!(%err, "render failed");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape) || input.close_requested() || input.destroyed() {
                *control_flow = ControlFlow::Exit;
                return;
            }

            let now = Instant::now();
            if input.key_pressed(VirtualKeyCode::Return) || input.key_pressed(VirtualKeyCode::Space) {
                app.start(now);
            }
            if input.key_pressed(VirtualKeyCode::R) {
                app.reset(now);
            }
            if input.key_pressed(VirtualKeyCode::P) {
                app.toggle_pause(now);
            }
            for (arrow, letter, dir) in STEER_KEYS {
                if input.key_pressed(arrow) || input.key_pressed(letter) {
                    app.steer(dir);
                }
            }

            app.update(now);
            window.request_redraw();
        }
    });
}
