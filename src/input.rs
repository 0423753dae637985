use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::Result;
use crate::snake::Direction::{self, *};

/// What the player asked for, translated from a raw terminal event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Move(Direction),
    Cancel,
    Quit,
}

/// Source of pending input, drained once per frame.
pub trait EventSource {
    /// Returns every event queued since the last call, oldest first. Never blocks.
    fn drain_events(&mut self) -> Result<Vec<InputEvent>>;
}

pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => translate_key(key),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<InputEvent> {
    if is_ctrl_c(key) {
        return Some(InputEvent::Quit);
    }

    match key.code {
        KeyCode::Char('w') | KeyCode::Up => Some(InputEvent::Move(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(InputEvent::Move(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(InputEvent::Move(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(InputEvent::Move(Right)),
        KeyCode::Esc => Some(InputEvent::Cancel),
        _ => None,
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
