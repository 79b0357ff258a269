//! Continuation construction.
//!
//! An instruction asks for more code to run by leaving a
//! [`Cell::Continuation`] on top of its result. The engine removes the
//! marker and splices its code in front of the pending program, so the
//! spliced cells run before anything that followed the instruction.

use crate::cell::Cell;
use crate::stack::Stack;

/// Continuation that re-invokes `instruction` and then re-pushes `skipped`.
///
/// Used when `skipped` could not serve as an operand: the retry sees the
/// cells beneath it, and `skipped` returns to the data stack afterwards.
pub fn retry(instruction: &str, skipped: Cell) -> Cell {
    Cell::continuation([Cell::Symbol(instruction.to_owned()), skipped])
}

/// Continuation that runs `code` next.
pub fn run(code: Stack) -> Cell {
    Cell::Continuation(code)
}

/// Remove a continuation marker from the top of `data`, if there is one,
/// and splice its code onto `code`.
///
/// Returns true if a continuation was spliced.
pub fn splice_into(data: &mut Stack, code: &mut Stack) -> bool {
    if !matches!(data.peek(), Some(Cell::Continuation(_))) {
        return false;
    }
    match data.pop() {
        Some(Cell::Continuation(more)) => {
            log::debug!("splice {}", more);
            code.splice(more);
            true
        }
        _ => false,
    }
}
