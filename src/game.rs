use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::info;

use crate::canvas::{Canvas, Rect};
use crate::clock::TickClock;
use crate::config::Config;
use crate::error::Result;
use crate::input::{EventSource, InputEvent};
use crate::state::GameState;

const GAME_OVER_TEXT: &str = "GAME OVER";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    Cancel,
}

/// Drives the game at a fixed rate: input, one state tick, one frame.
pub struct GameLoop<P, R = ThreadRng> {
    config: Config,
    platform: P,
    state: GameState<R>,
    clock: TickClock,
    exit: Option<ExitReason>,
}

impl<P: Canvas + EventSource> GameLoop<P> {
    pub fn new(config: Config, platform: P) -> Self {
        let state = GameState::new(&config);
        GameLoop::with_state(config, platform, state)
    }
}

impl<P: Canvas + EventSource, R: Rng> GameLoop<P, R> {
    pub fn with_state(config: Config, platform: P, state: GameState<R>) -> Self {
        let clock = TickClock::new(config.tick_interval());
        GameLoop { config, platform, state, clock, exit: None }
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    /// Runs frames until the player quits or cancels. The frame in which the
    /// request arrives is still simulated and drawn.
    pub fn run(&mut self) -> Result<ExitReason> {
        loop {
            if let Some(reason) = self.exit {
                info!(
                    ?reason,
                    direction = ?self.state.direction(),
                    running = self.state.is_running(),
                    "leaving game loop"
                );
                return Ok(reason);
            }

            self.clock.tick();
            self.handle_input()?;
            self.state.tick();
            self.draw()?;
        }
    }

    fn handle_input(&mut self) -> Result<()> {
        for event in self.platform.drain_events()? {
            match event {
                InputEvent::Move(dir) => self.state.set_direction(dir),
                InputEvent::Cancel => self.stop(ExitReason::Cancel),
                InputEvent::Quit => self.stop(ExitReason::Quit),
            }
        }
        Ok(())
    }

    fn stop(&mut self, reason: ExitReason) {
        if self.exit.is_none() {
            self.exit = Some(reason);
        }
    }

    fn draw(&mut self) -> Result<()> {
        let palette = self.config.palette;
        let cell_size = self.config.cell_size;

        self.platform.fill_background(palette.background)?;
        self.platform.fill_rect(Rect::cell(self.state.food(), cell_size), palette.food)?;

        for &segment in self.state.snake().body() {
            self.platform.fill_rect(Rect::cell(segment, cell_size), palette.snake)?;
        }

        self.platform.draw_text(&self.state.score().to_string(), (0, 0), palette.text)?;

        if !self.state.is_running() {
            self.platform.draw_text(GAME_OVER_TEXT, (0, cell_size as i32), palette.text)?;
        }

        self.platform.present()
    }
}
