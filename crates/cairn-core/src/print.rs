//! Canonical textual forms.
//!
//! Stacks print top first as `[top … bottom]`, which for a quotation is
//! the order its code runs in. The same text reads back through the
//! parser for every literal kind.

use std::fmt;

use crate::cell::Cell;
use crate::stack::Stack;

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        write_cells(f, self.iter())?;
        write!(f, "]")
    }
}

fn write_cells<'a>(
    f: &mut fmt::Formatter<'_>,
    cells: impl Iterator<Item = &'a Cell>,
) -> fmt::Result {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", cell)?;
    }
    Ok(())
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}f", v),
            // Debug formatting keeps the decimal point on whole numbers.
            Cell::Double(v) => write!(f, "{:?}", v),
            Cell::Bool(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{:?}", s),
            Cell::Symbol(name) => write!(f, "{}", name),
            Cell::Quotation(q) => write!(f, "{}", q),
            Cell::Instruction(i) => write!(f, "{}", i.name()),
            Cell::Continuation(code) => write!(f, "continue{}", code),
            Cell::Defer { record, result } => match result {
                Some(tag) => write!(f, "defer{}:{}", record, tag),
                None => write!(f, "defer{}", record),
            },
            Cell::Dummy(tag) => write!(f, "dummy:{}", tag),
            Cell::Type(tag) => write!(f, "{}", tag),
            Cell::Variable(name) => write!(f, "'{}", name),
            Cell::Bindings(theta) => write!(f, "{}", theta),
            Cell::Residual(needed) => write!(f, "needs{}", needed),
        }
    }
}

/// Debug view of a program state with the code/data split marked:
/// `[code… • data…]`.
pub struct Pivot<'a>(pub &'a Stack);

impl fmt::Display for Pivot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells = self.0.iter();
        match cells.next() {
            Some(Cell::Quotation(code)) => {
                write!(f, "[")?;
                write_cells(f, code.iter())?;
                if !code.is_empty() {
                    write!(f, " ")?;
                }
                write!(f, "•")?;
                for cell in cells {
                    write!(f, " {}", cell)?;
                }
                write!(f, "]")
            }
            _ => write!(f, "{}", self.0),
        }
    }
}

impl Stack {
    /// Display this state in pivot notation.
    pub fn pivot(&self) -> Pivot<'_> {
        Pivot(self)
    }
}
