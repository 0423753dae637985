use rand::rngs::ThreadRng;
use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::snake::{Direction, Snake};
use crate::Coords;

/// All of the game rules: movement, growth, food and self-collision.
pub struct GameState<R = ThreadRng> {
    grid_width: i32,
    grid_height: i32,
    growth: usize,
    direction: Direction,
    snake: Snake,
    food: Coords,
    score: u32,
    running: bool,
    rng: R,
}

impl GameState<ThreadRng> {
    pub fn new(config: &Config) -> Self {
        GameState::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(config: &Config, rng: R) -> Self {
        let grid_width = config.grid_width();
        let grid_height = config.grid_height();
        let center = (grid_width / 2, grid_height / 2);

        let mut state = GameState {
            grid_width,
            grid_height,
            growth: config.growth,
            direction: Direction::Stopped,
            snake: Snake::new(center, config.start_length),
            food: center,
            score: 0,
            running: true,
            rng,
        };
        state.place_food();
        state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Turns the snake, unless that would make it reverse onto itself.
    pub fn set_direction(&mut self, requested: Direction) {
        if requested == self.direction.opposite() {
            return;
        }

        if requested != self.direction {
            debug!(from = ?self.direction, to = ?requested, "direction changed");
        }
        self.direction = requested;
    }

    /// One simulation step. Safe to call after game over: the snake no longer
    /// moves, but the food and collision checks still run.
    pub fn tick(&mut self) {
        if self.running {
            self.snake.move_step(self.direction);
        }

        if self.snake.head() == self.food {
            self.score += 1;
            self.snake.grow(self.growth);
            self.place_food();
            debug!(score = self.score, target_len = self.snake.target_len(), food = ?self.food, "food eaten");
        }

        if self.running && self.snake.bites_itself() {
            self.running = false;
            info!(score = self.score, length = self.snake.len(), "game over");
        }
    }

    /// Moves the food to a random grid cell the snake does not cover. Tries
    /// plain rejection sampling first, then picks among the free cells.
    fn place_food(&mut self) {
        let cell_count = (self.grid_width * self.grid_height).max(0) as usize;

        for attempt in 1..=cell_count {
            let candidate = (self.rng.gen_range(0..self.grid_width), self.rng.gen_range(0..self.grid_height));
            if !self.snake.contains(candidate) {
                if attempt > 1 {
                    debug!(attempts = attempt, "food placed after resampling");
                }
                self.food = candidate;
                return;
            }
        }

        let (width, height) = (self.grid_width, self.grid_height);
        let snake = &self.snake;
        let free = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&pos| !snake.contains(pos))
            .choose(&mut self.rng);

        match free {
            Some(pos) => self.food = pos,
            None => warn!(food = ?self.food, "no free cell left for the food"),
        }
    }
}

#[cfg(test)]
impl<R: Rng> GameState<R> {
    pub(crate) fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    pub(crate) fn set_food(&mut self, food: Coords) {
        self.food = food;
    }

    pub(crate) fn force_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }
}
