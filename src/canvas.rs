use crossterm::style::Color;

use crate::error::Result;

/// Window-pixel rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect { x, y, width, height }
    }

    /// The square covering grid cell `(x, y)`.
    pub fn cell(pos: (i32, i32), cell_size: u32) -> Self {
        let size = cell_size as i32;
        Rect::new(pos.0 * size, pos.1 * size, cell_size, cell_size)
    }
}

/// Drawing surface the game loop renders into, in window pixels.
pub trait Canvas {
    fn fill_background(&mut self, color: Color) -> Result<()>;
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()>;
    fn draw_text(&mut self, text: &str, pos: (i32, i32), color: Color) -> Result<()>;
    fn present(&mut self) -> Result<()>;
}
