//! Core of the cairn concatenative language engine.
//!
//! This crate provides the pieces every other cairn crate builds on:
//! - Cells, stacks and type tags, with their canonical printed forms
//! - The instruction contract and its strict/non-strict helper families
//! - The rewriting engine (`eval`, `run`, `eval_stream`, `is_halted`)
//! - Continuation splicing
//! - Deferred records and their reconstruction into strict programs
//! - Structural unification over cells

pub mod cell;
pub mod check;
pub mod continuation;
pub mod engine;
pub mod env;
pub mod error;
pub mod instruction;
pub mod names;
pub mod number;
pub mod print;
pub mod reorder;
pub mod stack;
pub mod types;
pub mod unify;

// Re-export commonly used types at crate root
pub use cell::{Cell, InstructionRef};
pub use check::TypeCheckInstruction;
pub use engine::{EvalStream, eval, eval_stream, is_halted, run};
pub use env::{Environment, InstructionTable};
pub use error::{EngineError, UnifyError};
pub use instruction::{
    FromCell, Instruction, IntoCells, binary, nonstrict_binary, nonstrict_trinary,
    nonstrict_unary, nullary, transform, trinary, unary,
};
pub use names::NameContext;
pub use number::Number;
pub use print::Pivot;
pub use reorder::{
    DeferInstruction, ReorderWrapper, ResultType, flatten_record, reorder, reorder_post,
    reorder_wrapper, run_reorder_post,
};
pub use stack::Stack;
pub use types::TypeTag;
pub use unify::{Substitution, substitute, unify, unify_var};
