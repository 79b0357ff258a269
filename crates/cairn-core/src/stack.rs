//! LIFO container of cells.
//!
//! A `Stack` is both the program state and the body of every quotation.
//! Items are stored bottom to top, so the top of the stack is the last
//! element. For a quotation the top is the next cell to execute, which is
//! why [`Stack::from_code`] reverses its input.

use crate::cell::Cell;

/// An ordered, last-in first-out sequence of cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stack {
    items: Vec<Cell>,
}

impl Stack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create a stack from cells listed bottom first.
    pub fn from_bottom_up(items: Vec<Cell>) -> Self {
        Self { items }
    }

    /// Create a stack from cells listed top first.
    ///
    /// This is the order quotations are written in, and the order code
    /// executes in.
    pub fn from_code(code: impl IntoIterator<Item = Cell>) -> Self {
        let mut items: Vec<Cell> = code.into_iter().collect();
        items.reverse();
        Self { items }
    }

    /// Get the number of items on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Push a cell onto the stack.
    pub fn push(&mut self, cell: Cell) {
        self.items.push(cell);
    }

    /// Pop the top cell.
    pub fn pop(&mut self) -> Option<Cell> {
        self.items.pop()
    }

    /// Peek at the top cell without removing it.
    pub fn peek(&self) -> Option<&Cell> {
        self.items.last()
    }

    /// Get a reference to the cell at a given depth (0 = top).
    pub fn peek_at(&self, depth: usize) -> Option<&Cell> {
        let len = self.items.len();
        if depth >= len {
            return None;
        }
        self.items.get(len - 1 - depth)
    }

    /// Splice `code` onto the top, so that its cells come off before the
    /// cells already here, in their own order.
    pub fn splice(&mut self, code: Stack) {
        self.items.extend(code.items);
    }

    /// Iterate top first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Cell> + ExactSizeIterator {
        self.items.iter().rev()
    }

    /// Get a slice of all items (bottom to top).
    pub fn as_slice(&self) -> &[Cell] {
        &self.items
    }

    /// Consume the stack, returning its cells top first.
    pub fn into_code(self) -> Vec<Cell> {
        let mut items = self.items;
        items.reverse();
        items
    }

    /// Consume the stack, returning its cells bottom first.
    pub fn into_bottom_up(self) -> Vec<Cell> {
        self.items
    }
}

impl FromIterator<Cell> for Stack {
    /// Collects cells top first, like [`Stack::from_code`].
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Stack::from_code(iter)
    }
}
