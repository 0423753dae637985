use std::collections::VecDeque;

use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Stopped,
}

impl Direction {
    pub fn delta(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
            Stopped => (0, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
            Stopped => Stopped,
        }
    }
}

/// Snake body, tail first. The last segment is the head.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Coords>,
    target_len: usize,
}

impl Snake {
    pub fn new(pos: Coords, target_len: usize) -> Self {
        let mut body = VecDeque::new();
        body.push_back(pos);
        Snake { body, target_len: target_len.max(1) }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        // The body is never empty: it starts with one segment and only loses
        // its tail after a new head was pushed.
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    /// Moves the head one cell in `direction`, dropping the tail once the body
    /// is longer than the target length. Does nothing while stopped.
    pub fn move_step(&mut self, direction: Direction) {
        if direction == Stopped {
            return;
        }

        let (head_x, head_y) = self.head();
        let (dx, dy) = direction.delta();
        self.body.push_back((head_x + dx, head_y + dy));

        if self.body.len() > self.target_len {
            self.body.pop_front();
        }
    }

    pub fn grow(&mut self, by: usize) {
        self.target_len += by;
    }

    /// True when any segment other than the head sits on the head's cell.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.range(..self.body.len() - 1).any(|&segment| segment == head)
    }

    #[cfg(test)]
    pub(crate) fn from_segments(segments: &[Coords], target_len: usize) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");
        Snake { body: segments.iter().copied().collect(), target_len }
    }
}
