//! The snake actor
//!
//! Body is stored head-first. Direction changes are buffered in a single
//! pending slot (last write wins) and consumed when the next move starts.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::{Direction, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Position>,
    heading: Direction,
    pending: Direction,
}

impl Snake {
    /// One-segment snake at `head`
    pub fn new(head: Position, heading: Direction) -> Self {
        let mut body = VecDeque::with_capacity(16);
        body.push_back(head);
        Self {
            body,
            heading,
            pending: heading,
        }
    }

    /// Build a snake from explicit segments, head first. Empty input yields `None`.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        heading: Direction,
    ) -> Option<Self> {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            heading,
            pending: heading,
        })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Request a heading change. Reversal onto the current heading is ignored.
    pub fn set_direction(&mut self, dir: Direction) -> bool {
        if dir == self.heading.opposite() {
            return false;
        }
        self.pending = dir;
        true
    }

    /// Commit the pending heading and return the cell the head moves into
    pub fn begin_move(&mut self) -> Position {
        self.heading = self.pending;
        self.head() + self.heading.delta()
    }

    /// Prepend the new head; the tail stays unless `grow` is false
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Keep the front `ceil(len / 2)` segments
    pub fn shrink_half(&mut self) {
        let keep = self.body.len().div_ceil(2).max(1);
        self.body.truncate(keep);
    }

    /// Drop `count` tail segments, never going below one
    pub fn drop_tail(&mut self, count: usize) {
        let keep = self.body.len().saturating_sub(count).max(1);
        self.body.truncate(keep);
    }
}
