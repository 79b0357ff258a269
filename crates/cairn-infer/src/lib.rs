//! Stack-signature inference for cairn programs.
//!
//! Inference reuses the rewriting engine unchanged. Every operator is
//! replaced by a [`DetermineTypesInstruction`] that pushes the types its
//! declaration promises instead of values, and the program is run on a
//! stack of types. Inputs missing from the stack are left behind in
//! `Residual` cells; [`consumes_and_produces`] collects those, together
//! with whatever the run produced, into a [`Signature`].
//!
//! ```ignore
//! let mut env = cairn_stdlib::infer_env();
//! let sig = cairn_infer::infer(parse_state("[[typeof(int) dup]]")?, &mut env, None)?;
//! assert_eq!(sig.to_string(), "[] -> [int int]");
//! ```

mod infer;
mod signature;

pub use infer::{DetermineTypesInstruction, freshen};
pub use signature::{Signature, consumes_and_produces, infer};
