mod canvas;
mod clock;
mod config;
mod error;
mod game;
mod input;
mod snake;
mod state;
mod term;

use std::process::exit;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::error::Result;
use crate::game::GameLoop;
use crate::term::TermManager;

pub type TermInt = u16;
/// Grid cell; may lie outside the visible grid.
pub type Coords = (i32, i32);

fn main() {
    // stdout is the game screen, so logs go to stderr and stay off unless
    // RUST_LOG asks for them.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .init();

    if let Err(e) = run() {
        eprintln!("munchy: {}", e);
        exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::default();
    info!(
        grid_width = config.grid_width(),
        grid_height = config.grid_height(),
        ticks_per_second = config.ticks_per_second,
        "starting munchy"
    );

    let mut term = TermManager::new(&config)?;
    term.setup()?;

    let mut game = GameLoop::new(config, term);
    let reason = game.run()?;
    info!(?reason, score = game.state().score(), "bye");

    // Dropping the game restores the terminal.
    Ok(())
}
