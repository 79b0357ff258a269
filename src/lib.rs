//! cairn: a concatenative language engine that can step over what it
//! cannot use yet.
//!
//! Programs are evaluated by rewriting a single stack whose top cell is the
//! pending code. On top of the usual strict evaluation, the engine can
//!
//! - run non-strictly, setting aside operands of the wrong type and
//!   continuing with deeper ones,
//! - record computation instead of performing it, then reconstruct a
//!   program with the computation first and the free data last,
//! - push types instead of values and read off a program's stack effect.
//!
//! ```
//! use cairn::Session;
//!
//! let mut session = Session::new();
//! let state = session.eval("2 1 +").unwrap();
//! assert_eq!(state.to_string(), "[[] 3]");
//!
//! let reordered = session.reorder("2 a 3 b c 5 + d +").unwrap();
//! assert_eq!(reordered.to_string(), "[[2 3 5 + + a b c d]]");
//!
//! let signature = session.infer("swap").unwrap();
//! assert_eq!(signature.to_string(), "['a_0 'b_1] -> ['b_1 'a_0]");
//! ```

pub mod config;
pub mod error;
pub mod session;

pub use config::{Mode, SessionConfig};
pub use error::{ConfigError, SessionError};
pub use session::{Outcome, Session, program_state};

pub use cairn_core::{Cell, EngineError, Environment, Stack};
pub use cairn_infer::Signature;
pub use cairn_parse::ParseError;
