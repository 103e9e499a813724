use super::grid::Cell;

/// The snake body: an ordered sequence of cells, head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    /// Create a one-cell snake at the given position
    pub fn new(head: Cell) -> Self {
        Self { body: vec![head] }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false during play: the body never drops below one cell
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// All body cells, head first, for rendering and placement checks
    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Move to a new (already wrapped) head cell
    ///
    /// The tail is kept when `grow` is set, so the snake gains one cell;
    /// otherwise length is unchanged.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }

    /// True iff the head occupies the same cell as any body segment
    pub fn self_collision(&self) -> bool {
        let head = self.head();
        self.body[1..].contains(&head)
    }
}
