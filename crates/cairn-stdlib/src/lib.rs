//! cairn standard library
//!
//! This crate provides the instruction catalogue in each evaluation flavour
//! and ready-made environments built from it:
//! - Arithmetic, comparison and logic (`+ - * / minus < > = not`)
//! - Stack shuffling (`dup drop swap over rot`)
//! - Control flow and assignment (`if while call !`)
//! - Stack-effect declarations for inference
//!
//! | Environment        | Tables (first match wins) |
//! |--------------------|---------------------------|
//! | [`strict_env`]     | strict                    |
//! | [`non_strict_env`] | non-strict, strict        |
//! | [`reorder_env`]    | reorder, strict           |
//! | [`infer_env`]      | inference                 |

pub mod arith;
pub mod flow;
pub mod stack;
pub mod types;

use cairn_core::{Environment, InstructionTable};

pub use flow::Defined;
pub use types::SIGNATURES;

/// Instructions that fail on missing or mistyped operands.
pub fn strict_table() -> InstructionTable {
    let mut table = InstructionTable::new();
    arith::register_strict(&mut table);
    stack::register_strict(&mut table);
    flow::register_strict(&mut table);
    table
}

/// Instructions that step over operands of the wrong type.
pub fn nonstrict_table() -> InstructionTable {
    let mut table = InstructionTable::new();
    arith::register_nonstrict(&mut table);
    stack::register_nonstrict(&mut table);
    table
}

/// Instructions that record their invocation instead of computing.
pub fn reorder_table() -> InstructionTable {
    let mut table = InstructionTable::new();
    arith::register_reorder(&mut table);
    stack::register_reorder(&mut table);
    flow::register_reorder(&mut table);
    table
}

/// Instructions that push types according to their declared signature.
pub fn infer_table() -> InstructionTable {
    let mut table = InstructionTable::new();
    types::register_infer(&mut table);
    table
}

pub fn strict_env() -> Environment {
    Environment::with_tables(vec![strict_table()])
}

pub fn non_strict_env() -> Environment {
    Environment::with_tables(vec![nonstrict_table(), strict_table()])
}

pub fn reorder_env() -> Environment {
    Environment::with_tables(vec![reorder_table(), strict_table()])
}

pub fn infer_env() -> Environment {
    Environment::with_tables(vec![infer_table()])
}
