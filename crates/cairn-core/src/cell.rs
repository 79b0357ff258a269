//! The universal value type.

use std::sync::Arc;

use crate::instruction::Instruction;
use crate::stack::Stack;
use crate::types::TypeTag;
use crate::unify::Substitution;

/// Shared handle to an instruction.
pub type InstructionRef = Arc<dyn Instruction>;

/// A cell on a stack: a value, a piece of code, or engine bookkeeping.
#[derive(Clone, Debug)]
pub enum Cell {
    /// 64-bit signed integer.
    Int(i64),
    /// Single-precision float, written `1.5f`.
    Float(f32),
    /// Double-precision float, written `1.5`.
    Double(f64),
    /// Boolean.
    Bool(bool),
    /// Text literal.
    Text(String),
    /// Bareword, resolved against the environment when evaluated.
    Symbol(String),
    /// Nested program or data fragment.
    Quotation(Stack),
    /// Already-resolved operator.
    Instruction(InstructionRef),
    /// Request to splice code in front of the pending program.
    Continuation(Stack),
    /// Recorded invocation that was not executed.
    Defer {
        /// The would-be invocation, arguments then symbol, in code order.
        record: Stack,
        /// Type of the value the record produces when replayed.
        result: Option<TypeTag>,
    },
    /// Inert stand-in for a value produced by a deferred record.
    Dummy(TypeTag),
    /// Concrete type, used as a value during inference.
    Type(TypeTag),
    /// Type-inference unknown.
    Variable(String),
    /// Variables pinned by inference.
    Bindings(Substitution),
    /// Inputs an inference run needed from outside, top first.
    Residual(Stack),
}

impl Cell {
    pub fn int(v: i64) -> Self {
        Cell::Int(v)
    }

    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Cell::Symbol(name.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Cell::Variable(name.into())
    }

    /// Build a quotation from cells listed in code order (first executed first).
    pub fn quotation(code: impl IntoIterator<Item = Cell>) -> Self {
        Cell::Quotation(Stack::from_code(code))
    }

    /// Build a continuation from cells listed in code order.
    pub fn continuation(code: impl IntoIterator<Item = Cell>) -> Self {
        Cell::Continuation(Stack::from_code(code))
    }

    /// The type of this cell when used as an ordinary value.
    ///
    /// Returns None for cells that are not values: unresolved symbols,
    /// instructions, continuations, inference bookkeeping, and the
    /// placeholders produced by deferral (see [`Cell::deferred_type`]).
    pub fn value_type(&self) -> Option<TypeTag> {
        match self {
            Cell::Int(_) => Some(TypeTag::INT),
            Cell::Float(_) => Some(TypeTag::FLOAT),
            Cell::Double(_) => Some(TypeTag::DOUBLE),
            Cell::Bool(_) => Some(TypeTag::BOOL),
            Cell::Text(_) => Some(TypeTag::TEXT),
            Cell::Quotation(_) => Some(TypeTag::QUOT),
            Cell::Type(_) | Cell::Variable(_) => Some(TypeTag::TYPE),
            Cell::Symbol(_)
            | Cell::Instruction(_)
            | Cell::Continuation(_)
            | Cell::Defer { .. }
            | Cell::Dummy(_)
            | Cell::Bindings(_)
            | Cell::Residual(_) => None,
        }
    }

    /// The type this cell will have once every deferral is replayed.
    pub fn deferred_type(&self) -> Option<TypeTag> {
        match self {
            Cell::Defer { result, .. } => result.clone(),
            Cell::Dummy(tag) => Some(tag.clone()),
            other => other.value_type(),
        }
    }

    /// Check if this cell stands in for a deferred computation.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Cell::Defer { .. } | Cell::Dummy(_))
    }

    pub fn as_quotation(&self) -> Option<&Stack> {
        match self {
            Cell::Quotation(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Int(a), Cell::Int(b)) => a == b,
            (Cell::Float(a), Cell::Float(b)) => a == b,
            (Cell::Double(a), Cell::Double(b)) => a == b,
            (Cell::Bool(a), Cell::Bool(b)) => a == b,
            (Cell::Text(a), Cell::Text(b)) => a == b,
            (Cell::Symbol(a), Cell::Symbol(b)) => a == b,
            (Cell::Quotation(a), Cell::Quotation(b)) => a == b,
            // Instructions are identified by name, as in symbolic lookup.
            (Cell::Instruction(a), Cell::Instruction(b)) => {
                Arc::ptr_eq(a, b) || a.name() == b.name()
            }
            (Cell::Continuation(a), Cell::Continuation(b)) => a == b,
            (
                Cell::Defer { record: ra, result: ta },
                Cell::Defer { record: rb, result: tb },
            ) => ra == rb && ta == tb,
            (Cell::Dummy(a), Cell::Dummy(b)) => a == b,
            (Cell::Type(a), Cell::Type(b)) => a == b,
            (Cell::Variable(a), Cell::Variable(b)) => a == b,
            (Cell::Bindings(a), Cell::Bindings(b)) => a == b,
            (Cell::Residual(a), Cell::Residual(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<f32> for Cell {
    fn from(v: f32) -> Self {
        Cell::Float(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Double(v)
    }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Bool(v)
    }
}

impl From<TypeTag> for Cell {
    fn from(tag: TypeTag) -> Self {
        Cell::Type(tag)
    }
}

impl From<Stack> for Cell {
    fn from(stack: Stack) -> Self {
        Cell::Quotation(stack)
    }
}
