use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::headless::{self, Script};
use grid_snake::{Config, Game, app};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "grid-snake")]
#[command(about = "Snake on a grid, played with the arrow keys")]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Board height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Edge length of one cell in pixels
    #[arg(long)]
    unit: Option<i32>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window, printing one JSON line per tick
    #[arg(long)]
    headless: bool,

    /// Headless keys, one per tick: U, D, L, R; anything else is no key
    #[arg(long, default_value = "")]
    script: String,

    /// Stop a headless run after this many ticks
    #[arg(long, default_value = "10000")]
    max_ticks: usize,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "grid_snake=debug,info" } else { "grid_snake=info,warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let config = load_config(&args)?;
    info!(?config, "configuration loaded");

    if args.headless {
        let mut game = match args.seed {
            Some(seed) => Game::seeded(config.bounds(), seed),
            None => Game::new(config.bounds()),
        };
        let script = Script::parse(&args.script);
        let out = BufWriter::new(io::stdout().lock());
        let summary = headless::run(&mut game, config.tick_interval(), &script, args.max_ticks, out)?;
        info!(ticks = summary.ticks, score = summary.score, "done");
        return Ok(());
    }

    app::run(&config, args.seed)
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(width) = args.width {
        config.board_width = width;
    }
    if let Some(height) = args.height {
        config.board_height = height;
    }
    if let Some(unit) = args.unit {
        config.unit_size = unit;
    }
    if let Some(tick_ms) = args.tick_ms {
        config.tick_ms = tick_ms;
    }

    config.validate()?;
    Ok(config)
}
