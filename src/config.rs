use std::time::Duration;

use crossterm::style::Color;

const WINDOW_WIDTH: u32 = 640;
const WINDOW_HEIGHT: u32 = 480;
const CELL_SIZE: u32 = 20;
const TICKS_PER_SECOND: u32 = 15;
const SNAKE_START_LENGTH: usize = 8;
const SNAKE_GROWTH: usize = 4;

/// Colors used by the draw pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub food: Color,
    pub snake: Color,
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: Color::Black,
            food: Color::Red,
            snake: Color::Blue,
            text: Color::White,
        }
    }
}

/// Fixed process parameters, handed to both the game state and the game loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub window_width: u32,
    pub window_height: u32,
    pub cell_size: u32,
    pub ticks_per_second: u32,
    pub start_length: usize,
    pub growth: usize,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            cell_size: CELL_SIZE,
            ticks_per_second: TICKS_PER_SECOND,
            start_length: SNAKE_START_LENGTH,
            growth: SNAKE_GROWTH,
            palette: Palette::default(),
        }
    }
}

impl Config {
    pub fn grid_width(&self) -> i32 {
        (self.window_width / self.cell_size) as i32
    }

    pub fn grid_height(&self) -> i32 {
        (self.window_height / self.cell_size) as i32
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}
