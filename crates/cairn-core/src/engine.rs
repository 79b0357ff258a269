//! The rewriting loop.
//!
//! A program state is a [`Stack`] whose top cell is the pending code, as a
//! quotation, with the data beneath it. [`eval`] performs one step: take
//! the next code cell, apply it if it names an instruction, push it as data
//! otherwise. A state is halted once its code quotation is empty.

use crate::cell::{Cell, InstructionRef};
use crate::continuation;
use crate::env::Environment;
use crate::error::EngineError;
use crate::stack::Stack;

/// Check whether a state has run out of code.
pub fn is_halted(state: &Stack) -> bool {
    matches!(state.peek(), Some(Cell::Quotation(code)) if code.is_empty())
}

/// Perform one rewriting step.
///
/// A state without a code quotation on top is malformed; it is turned into
/// a halted state that keeps the offending cell as data.
pub fn eval(mut state: Stack, env: &mut Environment) -> Result<Stack, EngineError> {
    let mut code = match state.pop() {
        None => {
            state.push(Cell::Quotation(Stack::new()));
            return Ok(state);
        }
        Some(Cell::Quotation(code)) => code,
        Some(other) => {
            log::warn!("malformed state: {} is not code, halting", other);
            state.push(other);
            state.push(Cell::Quotation(Stack::new()));
            return Ok(state);
        }
    };

    let Some(obj) = code.pop() else {
        state.push(Cell::Quotation(code));
        return Ok(state);
    };

    let mut data = match resolve(&obj, env) {
        Some(instruction) => {
            let mut data = instruction.apply(state, env)?;
            continuation::splice_into(&mut data, &mut code);
            data
        }
        None => {
            state.push(obj);
            state
        }
    };

    data.push(Cell::Quotation(code));
    Ok(data)
}

fn resolve(obj: &Cell, env: &Environment) -> Option<InstructionRef> {
    match obj {
        Cell::Symbol(name) => env.resolve(name),
        Cell::Instruction(instruction) => Some(instruction.clone()),
        _ => None,
    }
}

/// Step until halted, or until `max_steps` steps have been taken.
pub fn run(
    mut state: Stack,
    env: &mut Environment,
    max_steps: Option<usize>,
) -> Result<Stack, EngineError> {
    let mut steps = 0usize;
    while !is_halted(&state) {
        if max_steps.is_some_and(|limit| steps >= limit) {
            log::debug!("step budget of {} exhausted", steps);
            break;
        }
        log::trace!("{}", state.pivot());
        state = eval(state, env)?;
        steps += 1;
    }
    Ok(state)
}

/// Lazily step a state, yielding every intermediate state.
///
/// The input comes first, then each successor up to and including the
/// first halted one. A failing step yields its error after the state it
/// failed on and ends the stream, as does producing `max_steps`
/// successors.
pub fn eval_stream(state: Stack, env: &mut Environment, max_steps: Option<usize>) -> EvalStream<'_> {
    EvalStream {
        next: Some(Ok(state)),
        env,
        remaining: max_steps,
    }
}

/// Iterator returned by [`eval_stream`].
pub struct EvalStream<'env> {
    next: Option<Result<Stack, EngineError>>,
    env: &'env mut Environment,
    remaining: Option<usize>,
}

impl Iterator for EvalStream<'_> {
    type Item = Result<Stack, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = match self.next.take()? {
            Ok(state) => state,
            Err(e) => return Some(Err(e)),
        };
        let budget_left = self.remaining.is_none_or(|n| n > 0);
        if !is_halted(&current) && budget_left {
            if let Some(n) = self.remaining.as_mut() {
                *n -= 1;
            }
            self.next = Some(eval(current.clone(), self.env));
        }
        Some(Ok(current))
    }
}
