use std::collections::VecDeque;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Resolves raw key presses into at most one direction change per tick
///
/// Key handling and tick handling interleave within the same frame loop, so
/// candidates are buffered in arrival order and the tick consumer drains at
/// most one per tick. Reversals are rejected at enqueue time against the
/// committed direction; two rapid opposite keystrokes inside one tick can
/// therefore never turn the snake back into itself.
#[derive(Debug, Clone)]
pub struct DirectionArbiter {
    pending: VecDeque<Direction>,
    committed: Option<Direction>,
    capacity: usize,
}

impl DirectionArbiter {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            committed: None,
            capacity,
        }
    }

    /// The direction currently driving movement, if any
    ///
    /// `None` until the first key press of a session: the snake sits still.
    pub fn committed(&self) -> Option<Direction> {
        self.committed
    }

    /// Buffer a candidate direction from a key press
    ///
    /// Rejected when it reverses the committed direction while the snake has
    /// a body to run into; a length-1 snake may reverse freely. A full
    /// buffer drops the candidate.
    pub fn on_key(&mut self, dir: Direction, snake_len: usize) {
        if let Some(committed) = self.committed {
            if snake_len > 1 && committed.is_opposite(dir) {
                return;
            }
        }
        if self.pending.len() < self.capacity {
            self.pending.push_back(dir);
        }
    }

    /// Tick consumer: commit at most one buffered direction
    ///
    /// Non-blocking. If the buffer is empty the prior committed direction
    /// stands; later candidates stay queued for subsequent ticks.
    pub fn next(&mut self) -> Option<Direction> {
        if let Some(dir) = self.pending.pop_front() {
            self.committed = Some(dir);
        }
        self.committed
    }

    /// Drop all buffered candidates and the committed direction
    pub fn reset(&mut self) {
        self.pending.clear();
        self.committed = None;
    }
}
