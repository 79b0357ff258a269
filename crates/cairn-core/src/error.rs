//! Fatal conditions raised by the engine and the unifier.
//!
//! Unresolved symbols, deferred retries and malformed states are absorbed
//! inside the engine and never appear here.

use thiserror::Error;

use crate::types::TypeTag;

/// Error raised by an instruction, terminating the current `eval`/`run`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    /// Fewer data cells than a strict instruction requires.
    #[error("{instruction}: expected {expected} argument(s), found {found}")]
    Arity {
        instruction: String,
        expected: usize,
        found: usize,
    },
    /// A strict downcast failed.
    #[error("{instruction}: expected {expected}, found {found}")]
    TypeMismatch {
        instruction: String,
        expected: TypeTag,
        found: String,
    },
    /// Integer division by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Integer arithmetic left the 64-bit range.
    #[error("{instruction}: integer overflow")]
    Overflow { instruction: String },
    /// An inference instruction met a cell it cannot assign a type to.
    #[error("{instruction}: cannot determine the type of {cell}")]
    Untyped { instruction: String, cell: String },
    /// Contradictory or cyclic bindings.
    #[error(transparent)]
    Unification(#[from] UnifyError),
}

impl EngineError {
    pub fn type_mismatch(
        instruction: impl Into<String>,
        expected: TypeTag,
        found: impl ToString,
    ) -> Self {
        EngineError::TypeMismatch {
            instruction: instruction.into(),
            expected,
            found: found.to_string(),
        }
    }
}

/// Structural unification failure.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum UnifyError {
    /// The two terms have incompatible shapes or different constants.
    #[error("cannot unify {left} with {right}")]
    Conflict { left: String, right: String },
    /// Binding the variable would make a term contain itself.
    #[error("'{var} occurs in {term}")]
    Occurs { var: String, term: String },
    /// Two sequences of different length.
    #[error("length mismatch unifying {left} with {right}")]
    LengthMismatch { left: String, right: String },
}
