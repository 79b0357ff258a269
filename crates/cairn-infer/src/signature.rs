//! Reading a stack effect off a finished inference run.

use std::fmt;

use cairn_core::{
    Cell, EngineError, Environment, Stack, Substitution, UnifyError, run, substitute, unify,
};

/// A program's stack effect, both sides top first.
#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    pub consumes: Stack,
    pub produces: Stack,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.consumes, self.produces)
    }
}

/// Split an inference state into what it consumed and what it produced.
///
/// `Residual` cells are concatenated into the consumed side, deepest
/// last. `Bindings` cells are folded into one substitution, which is then
/// applied to both sides. Everything else was produced. A code quotation
/// on top is ignored.
pub fn consumes_and_produces(state: &Stack) -> Result<Signature, UnifyError> {
    let mut data = state.as_slice();
    if let Some((Cell::Quotation(_), rest)) = data.split_last() {
        data = rest;
    }

    let mut theta = Substitution::new();
    let mut consumed: Vec<Cell> = Vec::new();
    let mut produced: Vec<Cell> = Vec::new();
    // Bottom to top.
    for cell in data {
        match cell {
            Cell::Residual(needed) => consumed.extend(needed.iter().cloned()),
            Cell::Bindings(bindings) => {
                for (var, bound) in bindings.iter() {
                    theta = unify(&Cell::Variable(var.to_owned()), bound, theta)?;
                }
            }
            other => produced.push(other.clone()),
        }
    }

    Ok(Signature {
        consumes: consumed.iter().map(|c| substitute(&theta, c)).collect(),
        produces: Stack::from_bottom_up(produced.iter().map(|c| substitute(&theta, c)).collect()),
    })
}

/// Run an inference program and read off its signature.
pub fn infer(
    state: Stack,
    env: &mut Environment,
    max_steps: Option<usize>,
) -> Result<Signature, EngineError> {
    let finished = run(state, env, max_steps)?;
    Ok(consumes_and_produces(&finished)?)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cairn_parse::{parse_signature, parse_state};

    use super::*;
    use crate::DetermineTypesInstruction;

    fn env() -> Environment {
        let mut env = Environment::new();
        for (name, sig) in [
            ("dup", "['a] -> ['a 'a]"),
            ("+", "['n 'n] -> ['n]"),
            ("swap", "['a 'b] -> ['b 'a]"),
        ] {
            let (consumes, produces) = parse_signature(sig).unwrap();
            env.add_instruction(name, Arc::new(DetermineTypesInstruction::new(name, consumes, produces)));
        }
        env
    }

    fn infer_str(text: &str) -> Signature {
        infer(parse_state(text).unwrap(), &mut env(), None).unwrap()
    }

    #[test]
    fn dup_of_int() {
        let sig = infer_str("[[typeof(int) dup]]");
        assert_eq!(sig.consumes, Stack::new());
        assert_eq!(sig.to_string(), "[] -> [int int]");
    }

    #[test]
    fn open_inputs() {
        assert_eq!(infer_str("[[dup]]").to_string(), "['a_0] -> ['a_0 'a_0]");
        assert_eq!(infer_str("[[+ +]]").to_string(), "['n_0 'n_0 'n_0] -> ['n_0]");
    }

    #[test]
    fn later_bindings_resolve_residuals() {
        assert_eq!(infer_str("[[+ typeof(int) +]]").to_string(), "[int int] -> [int]");
    }

    #[test]
    fn mixed_types() {
        assert_eq!(
            infer_str("[[typeof(text) swap]]").to_string(),
            "['b_1] -> ['b_1 text]"
        );
    }

    #[test]
    fn quotation_literals_are_values() {
        assert_eq!(infer_str("[[[1] dup]]").to_string(), "[] -> [quot quot]");
    }

    #[test]
    fn code_quotation_is_ignored() {
        let state = Stack::from_bottom_up(vec![
            Cell::Type(cairn_core::TypeTag::INT),
            Cell::quotation([Cell::symbol("dup")]),
        ]);
        assert_eq!(consumes_and_produces(&state).unwrap().to_string(), "[] -> [int]");
    }
}
