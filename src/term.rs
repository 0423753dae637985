use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event};
use crossterm::style::{self, Color};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};
use tracing::{debug, warn};

use crate::canvas::{Canvas, Rect};
use crate::config::Config;
use crate::error::{MunchyError, Result};
use crate::input::{translate, EventSource, InputEvent};
use crate::TermInt;

// Terminal characters are about twice as tall as they are wide, so each grid
// cell takes two columns to look square.
const COLUMNS_PER_CELL: i32 = 2;
const BLOCK_CHAR: char = '█';

#[derive(Copy, Clone, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Cell { ch: ' ', fg: bg, bg }
    }
}

/// Character-cell image of the logical window, addressed in window pixels.
struct Frame {
    cell_size: i32,
    width: TermInt,
    height: TermInt,
    cells: Vec<Cell>,
}

impl Frame {
    fn new(config: &Config) -> Self {
        let width = (config.grid_width() * COLUMNS_PER_CELL) as TermInt;
        let height = config.grid_height() as TermInt;
        let cells = vec![Cell::blank(Color::Reset); width as usize * height as usize];
        Frame { cell_size: config.cell_size as i32, width, height, cells }
    }

    fn column(&self, px: i32) -> i32 {
        px.div_euclid(self.cell_size) * COLUMNS_PER_CELL
    }

    fn row(&self, px: i32) -> i32 {
        px.div_euclid(self.cell_size)
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    fn fill(&mut self, color: Color) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::blank(color);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (x0, y0) = (self.column(rect.x), self.row(rect.y));
        // Round the far edge up so partial cells are still covered.
        let x1 = self.column(rect.x + rect.width as i32 + self.cell_size - 1);
        let y1 = self.row(rect.y + rect.height as i32 + self.cell_size - 1);

        for row in y0.max(0)..y1.min(self.height as i32) {
            for col in x0.max(0)..x1.min(self.width as i32) {
                if let Some(idx) = self.index(col, row) {
                    let bg = self.cells[idx].bg;
                    self.cells[idx] = Cell { ch: BLOCK_CHAR, fg: color, bg };
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: (i32, i32), color: Color) {
        let (col, row) = (self.column(pos.0), self.row(pos.1));

        for (i, ch) in text.chars().enumerate() {
            if let Some(idx) = self.index(col + i as i32, row) {
                let bg = self.cells[idx].bg;
                self.cells[idx] = Cell { ch, fg: color, bg };
            }
        }
    }

    #[cfg(test)]
    fn char_at(&self, col: i32, row: i32) -> Option<char> {
        self.index(col, row).map(|idx| self.cells[idx].ch)
    }
}

/// Owns the terminal for the lifetime of the game and draws frames into it.
pub struct TermManager<W: Write = Stdout> {
    out: W,
    origin: (TermInt, TermInt),
    back: Frame,
    // What is currently on screen; `None` forces a repaint of that cell.
    front: Vec<Option<Cell>>,
    // False while the terminal is smaller than the window; frames are dropped.
    fits: bool,
    active: bool,
}

impl TermManager<Stdout> {
    pub fn new(config: &Config) -> Result<Self> {
        TermManager::with_writer(config, stdout(), terminal::size()?)
    }
}

impl<W: Write> TermManager<W> {
    pub fn with_writer(config: &Config, out: W, term_size: (TermInt, TermInt)) -> Result<Self> {
        let back = Frame::new(config);
        let window = (back.width, back.height);
        check_size(term_size, window)?;

        let front = vec![None; back.cells.len()];
        let origin = centered_origin(term_size, window);
        Ok(TermManager { out, origin, back, front, fits: true, active: false })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.out, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            cursor::Hide,
            cursor::DisableBlinking,
            terminal::Clear(ClearType::All)
        )?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(
            self.out,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )?;
        Ok(())
    }

    fn handle_resize(&mut self, term_w: TermInt, term_h: TermInt) -> Result<()> {
        debug!(term_w, term_h, "terminal resized");
        let window = (self.back.width, self.back.height);

        let fits = check_size((term_w, term_h), window).is_ok();
        if !fits && self.fits {
            warn!(
                term_w,
                term_h,
                needed_w = window.0,
                needed_h = window.1,
                "terminal too small, drawing paused"
            );
        }
        self.fits = fits;

        self.origin = centered_origin((term_w, term_h), window);
        for cell in self.front.iter_mut() {
            *cell = None;
        }
        execute!(self.out, style::ResetColor, terminal::Clear(ClearType::All))?;
        Ok(())
    }
}

fn check_size(term: (TermInt, TermInt), window: (TermInt, TermInt)) -> Result<()> {
    if term.0 < window.0 || term.1 < window.1 {
        return Err(MunchyError::TerminalTooSmall {
            needed_w: window.0,
            needed_h: window.1,
            actual_w: term.0,
            actual_h: term.1,
        });
    }
    Ok(())
}

fn centered_origin(term: (TermInt, TermInt), window: (TermInt, TermInt)) -> (TermInt, TermInt) {
    (term.0.saturating_sub(window.0) / 2, term.1.saturating_sub(window.1) / 2)
}

impl<W: Write> Canvas for TermManager<W> {
    fn fill_background(&mut self, color: Color) -> Result<()> {
        self.back.fill(color);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.back.fill_rect(rect, color);
        Ok(())
    }

    fn draw_text(&mut self, text: &str, pos: (i32, i32), color: Color) -> Result<()> {
        self.back.draw_text(text, pos, color);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if !self.fits {
            return Ok(());
        }

        let width = self.back.width as usize;

        for (idx, cell) in self.back.cells.iter().enumerate() {
            if self.front[idx] == Some(*cell) {
                continue;
            }

            let x = self.origin.0 + (idx % width) as TermInt;
            let y = self.origin.1 + (idx / width) as TermInt;
            queue!(
                self.out,
                cursor::MoveTo(x, y),
                style::SetForegroundColor(cell.fg),
                style::SetBackgroundColor(cell.bg),
                style::Print(cell.ch)
            )?;
            self.front[idx] = Some(*cell);
        }

        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> EventSource for TermManager<W> {
    fn drain_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Resize(w, h) => self.handle_resize(w, h)?,
                ev => events.extend(translate(&ev)),
            }
        }

        Ok(events)
    }
}

impl<W: Write> Drop for TermManager<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "failed to restore the terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        let mut frame = Frame::new(&Config::default());
        frame.fill(Color::Black);
        frame
    }

    #[test]
    fn window_is_64_by_24_characters() {
        let frame = frame();
        assert_eq!((frame.width, frame.height), (64, 24));
        assert_eq!(frame.cells.len(), 64 * 24);
    }

    #[test]
    fn grid_cell_covers_two_columns() {
        let mut frame = frame();
        frame.fill_rect(Rect::cell((3, 2), 20), Color::Blue);

        assert_eq!(frame.char_at(5, 2), Some(' '));
        assert_eq!(frame.char_at(6, 2), Some(BLOCK_CHAR));
        assert_eq!(frame.char_at(7, 2), Some(BLOCK_CHAR));
        assert_eq!(frame.char_at(8, 2), Some(' '));
        assert_eq!(frame.char_at(6, 1), Some(' '));
        assert_eq!(frame.char_at(6, 3), Some(' '));
    }

    #[test]
    fn off_window_drawing_is_clipped() {
        let mut frame = frame();
        frame.fill_rect(Rect::cell((-1, 0), 20), Color::Blue);
        frame.fill_rect(Rect::cell((32, 5), 20), Color::Blue);
        frame.fill_rect(Rect::cell((0, 24), 20), Color::Blue);
        frame.draw_text("GAME OVER", (1260, 0), Color::White);

        assert!(frame.cells.iter().all(|cell| cell.ch == ' '));
    }

    #[test]
    fn text_keeps_background() {
        let mut frame = frame();
        frame.draw_text("12", (0, 20), Color::White);

        assert_eq!(frame.char_at(0, 1), Some('1'));
        assert_eq!(frame.char_at(1, 1), Some('2'));
        let idx = frame.index(0, 1).unwrap();
        assert_eq!(frame.cells[idx], Cell { ch: '1', fg: Color::White, bg: Color::Black });
    }

    #[test]
    fn window_is_centered_in_terminal() {
        assert_eq!(centered_origin((80, 30), (64, 24)), (8, 3));
        assert_eq!(centered_origin((64, 24), (64, 24)), (0, 0));
        assert_eq!(centered_origin((50, 20), (64, 24)), (0, 0));
    }

    fn manager(term_size: (TermInt, TermInt)) -> TermManager<Vec<u8>> {
        let mut term = TermManager::with_writer(&Config::default(), Vec::new(), term_size).unwrap();
        term.fill_background(Color::Black).unwrap();
        term
    }

    fn take_output(term: &mut TermManager<Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(&mut term.out)).unwrap()
    }

    // Cursor moves are `ESC [ row ; col H`.
    fn cursor_moves(output: &str) -> usize {
        output
            .split("\x1b[")
            .skip(1)
            .filter(|seq| {
                seq.find(|c: char| c.is_ascii_alphabetic())
                    .map_or(false, |end| seq[end..].starts_with('H'))
            })
            .count()
    }

    #[test]
    fn unchanged_frame_writes_nothing() {
        let mut term = manager((80, 30));
        term.present().unwrap();
        assert_eq!(cursor_moves(&take_output(&mut term)), 64 * 24);

        term.fill_background(Color::Black).unwrap();
        term.present().unwrap();
        assert!(take_output(&mut term).is_empty());
    }

    #[test]
    fn only_changed_cells_are_rewritten() {
        let mut term = manager((80, 30));
        term.present().unwrap();
        take_output(&mut term);

        term.draw_text("7", (0, 0), Color::White).unwrap();
        term.present().unwrap();

        let output = take_output(&mut term);
        assert_eq!(cursor_moves(&output), 1);
        // Window origin is (8, 3); the sequence is 1-based, row first.
        assert!(output.starts_with("\x1b[4;9H"), "{:?}", output);
        assert!(output.ends_with('7'), "{:?}", output);
    }

    #[test]
    fn resize_forces_full_repaint() {
        let mut term = manager((80, 30));
        term.present().unwrap();

        term.handle_resize(100, 40).unwrap();
        assert!(term.front.iter().all(Option::is_none));
        assert_eq!(term.origin, (18, 8));

        take_output(&mut term);
        term.present().unwrap();
        assert_eq!(cursor_moves(&take_output(&mut term)), 64 * 24);
    }

    #[test]
    fn startup_rejects_small_terminal() {
        let result = TermManager::with_writer(&Config::default(), Vec::new(), (63, 24));
        assert!(matches!(
            result,
            Err(MunchyError::TerminalTooSmall { needed_w: 64, needed_h: 24, actual_w: 63, actual_h: 24 })
        ));

        assert!(check_size((64, 23), (64, 24)).is_err());
        assert!(check_size((64, 24), (64, 24)).is_ok());
    }

    #[test]
    fn drawing_pauses_while_terminal_is_too_small() {
        let mut term = manager((80, 30));
        term.present().unwrap();

        term.handle_resize(50, 20).unwrap();
        take_output(&mut term);
        term.draw_text("1", (0, 0), Color::White).unwrap();
        term.present().unwrap();
        assert!(take_output(&mut term).is_empty());

        term.handle_resize(80, 30).unwrap();
        take_output(&mut term);
        term.present().unwrap();
        assert_eq!(cursor_moves(&take_output(&mut term)), 64 * 24);
    }
}
