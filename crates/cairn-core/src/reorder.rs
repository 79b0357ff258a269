//! Deferred execution and reconstruction.
//!
//! In reorder mode an operator whose operands have the right types (or
//! stand in for values of the right types) does not compute anything. It
//! leaves a `Defer` cell holding the invocation it would have made, and
//! evaluation carries on with that cell as its result. Once the run is
//! over, [`run_reorder_post`] turns the data stack back into one program
//! that a strict environment can execute in order.
//!
//! ```text
//! [2 a 3 b c 5 + d +]   --reorder-->   [• d c b a defer[2 defer[3 5 +]:int +]:int]
//!                       --reorder_post--> [2 3 5 + + a b c d •]
//! ```

use smallvec::SmallVec;

use crate::cell::Cell;
use crate::check::TypeCheckInstruction;
use crate::engine;
use crate::env::Environment;
use crate::error::EngineError;
use crate::instruction::Instruction;
use crate::stack::Stack;
use crate::types::TypeTag;

/// How the type of one output is derived from the inputs.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultType {
    /// Always this type.
    Fixed(TypeTag),
    /// Same type as the input at this depth (0 = top).
    SameAs(usize),
    /// Numeric promotion over all inputs.
    Promote,
}

impl ResultType {
    fn resolve(&self, args: &[Cell]) -> Option<TypeTag> {
        match self {
            ResultType::Fixed(tag) => Some(tag.clone()),
            ResultType::SameAs(depth) => args.get(*depth).and_then(Cell::deferred_type),
            ResultType::Promote => {
                let mut types = args.iter().map(Cell::deferred_type);
                let first = types.next()??;
                types.try_fold(first, |acc, t| acc.promote(&t?))
            }
        }
    }
}

/// Records its own invocation instead of executing it.
///
/// Pops one operand per input, builds the record `[args… name]` (deepest
/// argument first) and pushes it as a `Defer`. An instruction with several
/// outputs leaves a `Dummy` for each output below the top one; the `Defer`
/// takes the top position.
#[derive(Debug)]
pub struct DeferInstruction {
    name: String,
    arity: usize,
    outputs: Vec<ResultType>,
}

impl DeferInstruction {
    /// `outputs` are listed top first.
    pub fn new(name: &str, arity: usize, outputs: Vec<ResultType>) -> Self {
        Self {
            name: name.to_owned(),
            arity,
            outputs,
        }
    }
}

impl Instruction for DeferInstruction {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut data: Stack, _env: &mut Environment) -> Result<Stack, EngineError> {
        if data.len() < self.arity {
            return Err(EngineError::Arity {
                instruction: self.name.clone(),
                expected: self.arity,
                found: data.len(),
            });
        }
        // Top first.
        let mut args: SmallVec<[Cell; 4]> = SmallVec::new();
        for _ in 0..self.arity {
            if let Some(cell) = data.pop() {
                args.push(cell);
            }
        }

        let types: Vec<Option<TypeTag>> = self.outputs.iter().map(|r| r.resolve(&args)).collect();

        let mut record: Vec<Cell> = args.into_iter().rev().collect();
        record.push(Cell::Symbol(self.name.clone()));
        let defer = Cell::Defer {
            record: Stack::from_code(record),
            result: types.first().cloned().flatten(),
        };
        log::debug!("record {}", defer);

        for tag in types.iter().skip(1).rev() {
            data.push(Cell::Dummy(tag.clone().unwrap_or(TypeTag::ANY)));
        }
        data.push(defer);
        Ok(data)
    }
}

/// A reorder-capable operator: a type check that admits deferred values in
/// front of a [`DeferInstruction`].
pub type ReorderWrapper = TypeCheckInstruction<DeferInstruction>;

/// Build a reorder-capable operator. `inputs` and `outputs` are top first.
pub fn reorder_wrapper(
    name: &str,
    inputs: SmallVec<[TypeTag; 4]>,
    outputs: Vec<ResultType>,
) -> ReorderWrapper {
    let arity = inputs.len();
    TypeCheckInstruction::accepting_deferred(inputs, DeferInstruction::new(name, arity, outputs))
}

/// Expand a record into runnable code, innermost records first.
///
/// Nested `Defer` cells are replaced by their own expansion and `Dummy`
/// cells are dropped: the value a dummy stands for is produced by the
/// replay of the record it came from.
pub fn flatten_record(record: &Stack) -> Vec<Cell> {
    let mut code = Vec::with_capacity(record.len());
    for cell in record.iter() {
        match cell {
            Cell::Defer { record, .. } => code.extend(flatten_record(record)),
            Cell::Dummy(_) => {}
            other => code.push(other.clone()),
        }
    }
    code
}

/// Move the top data cell into the front of the code.
///
/// A `Defer` contributes its flattened record, a `Dummy` is dropped and any
/// other cell becomes a literal. States without a code quotation, or with
/// no data left, are returned unchanged.
pub fn reorder_post(mut state: Stack) -> Stack {
    let mut code = match state.pop() {
        Some(Cell::Quotation(code)) => code,
        Some(other) => {
            state.push(other);
            return state;
        }
        None => return state,
    };
    match state.pop() {
        Some(Cell::Defer { record, .. }) => {
            let replay = flatten_record(&record);
            log::debug!("replay {}", Stack::from_code(replay.iter().cloned()));
            code.splice(Stack::from_code(replay));
        }
        Some(Cell::Dummy(_)) | None => {}
        Some(other) => code.push(other),
    }
    state.push(Cell::Quotation(code));
    state
}

/// Apply [`reorder_post`] until only the code quotation is left.
pub fn run_reorder_post(mut state: Stack) -> Stack {
    while state.len() > 1 && matches!(state.peek(), Some(Cell::Quotation(_))) {
        state = reorder_post(state);
    }
    state
}

/// Run `state` in a reorder environment and reconstruct the result.
pub fn reorder(
    state: Stack,
    env: &mut Environment,
    max_steps: Option<usize>,
) -> Result<Stack, EngineError> {
    let finished = engine::run(state, env, max_steps)?;
    Ok(run_reorder_post(finished))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use smallvec::smallvec;

    use super::*;
    use crate::instruction::{binary, nonstrict_binary};
    use crate::number::Number;

    fn add_reorder() -> ReorderWrapper {
        reorder_wrapper("+", smallvec![TypeTag::NUM, TypeTag::NUM], vec![ResultType::Promote])
    }

    fn program(code: Vec<Cell>) -> Stack {
        Stack::from_bottom_up(vec![Cell::quotation(code)])
    }

    fn mixed() -> Stack {
        let s = Cell::symbol;
        program(vec![
            Cell::Int(2),
            s("a"),
            Cell::Int(3),
            s("b"),
            s("c"),
            Cell::Int(5),
            s("+"),
            s("d"),
            s("+"),
        ])
    }

    fn strict_env() -> Environment {
        let mut env = Environment::new();
        env.add_instruction(
            "+",
            Arc::new(binary("+", |x: Number, y: Number| x.add(y, "+"))),
        );
        env
    }

    #[test]
    fn records_instead_of_computing() {
        let mut env = Environment::new();
        let out = add_reorder()
            .apply(Stack::from_bottom_up(vec![Cell::Int(3), Cell::Int(5)]), &mut env)
            .unwrap();
        assert_eq!(out.to_string(), "[defer[3 5 +]:int]");
    }

    #[test]
    fn promotes_result_type() {
        let mut env = Environment::new();
        let out = add_reorder()
            .apply(Stack::from_bottom_up(vec![Cell::Int(3), Cell::Double(0.5)]), &mut env)
            .unwrap();
        assert_eq!(out.peek().and_then(Cell::deferred_type), Some(TypeTag::DOUBLE));
    }

    #[test]
    fn multiple_outputs_leave_dummies() {
        let swap = reorder_wrapper(
            "swap",
            smallvec![TypeTag::ANY, TypeTag::ANY],
            vec![ResultType::SameAs(1), ResultType::SameAs(0)],
        );
        let mut env = Environment::new();
        let out = swap
            .apply(
                Stack::from_bottom_up(vec![Cell::Int(1), Cell::text("x")]),
                &mut env,
            )
            .unwrap();
        assert_eq!(out.to_string(), "[defer[1 \"x\" swap]:int dummy:text]");
    }

    #[test]
    fn flatten_is_depth_first() {
        let inner = Cell::Defer {
            record: Stack::from_code([Cell::Int(3), Cell::Int(5), Cell::symbol("+")]),
            result: Some(TypeTag::INT),
        };
        let outer = Stack::from_code([Cell::Int(2), inner, Cell::symbol("+")]);
        let code = Stack::from_code(flatten_record(&outer));
        assert_eq!(code.to_string(), "[2 3 5 + +]");
    }

    #[test]
    fn reorder_post_moves_one_cell() {
        let state = Stack::from_bottom_up(vec![
            Cell::Dummy(TypeTag::INT),
            Cell::Int(1),
            Cell::quotation([Cell::symbol("x")]),
        ]);
        let state = reorder_post(state);
        assert_eq!(state.to_string(), "[[1 x] dummy:int]");
        let state = reorder_post(state);
        assert_eq!(state.to_string(), "[[1 x]]");
        assert_eq!(reorder_post(state.clone()), state);
    }

    #[test]
    fn reorders_and_replays() {
        let mut env = Environment::new();
        env.add_instruction("+", Arc::new(add_reorder()));
        let reordered = reorder(mixed(), &mut env, None).unwrap();
        assert_eq!(reordered.to_string(), "[[2 3 5 + + a b c d]]");

        let replayed = engine::run(reordered, &mut strict_env(), None).unwrap();
        assert_eq!(replayed.to_string(), "[[] d c b a 10]");
    }

    #[test]
    fn reorder_agrees_with_nonstrict() {
        let mut env = Environment::new();
        env.add_instruction(
            "+",
            Arc::new(nonstrict_binary("+", |x: Number, y: Number| x.add(y, "+"))),
        );
        let direct = engine::run(mixed(), &mut env, None).unwrap();
        assert_eq!(direct.to_string(), "[[] d c b a 10]");
    }
}
