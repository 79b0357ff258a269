//! Argument type checks that defer instead of failing.

use smallvec::SmallVec;

use crate::cell::Cell;
use crate::continuation;
use crate::env::Environment;
use crate::error::EngineError;
use crate::instruction::Instruction;
use crate::stack::Stack;
use crate::types::TypeTag;

/// Wraps an instruction with a type check on its top operands.
///
/// Operands are examined one at a time, top first. When one does not
/// satisfy its requirement the accepted operands are put back and the
/// result is a continuation that re-invokes the instruction and then
/// re-pushes the offending cell, so the instruction retries against the
/// cells beneath it. When the stack runs out, the accepted operands are put
/// back and the instruction's name is left on the stack as inert data.
///
/// With `accept_deferred` set, `Defer` and `Dummy` placeholders satisfy a
/// requirement when their recorded type does, and the check keeps every
/// `Dummy` in step with the record that produces its value:
///
/// - Records without a result (`defer[1 drop]`, `defer[5 x !]`) are stepped
///   over and stay beneath the new result, so their replay still comes
///   first.
/// - A rejected record is skipped together with the dummies beneath it.
/// - When that would hand one of those dummies to the instruction, or the
///   rejected cell is itself a dummy, the instruction is left unapplied.
#[derive(Debug)]
pub struct TypeCheckInstruction<I> {
    inputs: SmallVec<[TypeTag; 4]>,
    accept_deferred: bool,
    inner: I,
}

impl<I: Instruction> TypeCheckInstruction<I> {
    /// Check `inputs` (top first) before running `inner`.
    pub fn new(inputs: SmallVec<[TypeTag; 4]>, inner: I) -> Self {
        Self {
            inputs,
            accept_deferred: false,
            inner,
        }
    }

    /// Like [`TypeCheckInstruction::new`], but placeholders for deferred
    /// values are accepted by their recorded type.
    pub fn accepting_deferred(inputs: SmallVec<[TypeTag; 4]>, inner: I) -> Self {
        Self {
            inputs,
            accept_deferred: true,
            inner,
        }
    }

    pub fn inputs(&self) -> &[TypeTag] {
        &self.inputs
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }

    fn admits(&self, required: &TypeTag, cell: &Cell) -> bool {
        let actual = if self.accept_deferred {
            cell.deferred_type()
        } else {
            cell.value_type()
        };
        actual.is_some_and(|actual| required.admits(&actual))
    }

    fn steps_over(&self, cell: &Cell) -> bool {
        self.accept_deferred && leaves_nothing(cell)
    }

    /// Pop the dummies directly beneath a rejected record, along with any
    /// result-less records between them. Returned top first.
    fn take_dummies(&self, data: &mut Stack) -> Vec<Cell> {
        let mut group = Vec::new();
        loop {
            let mut depth = 0;
            while data.peek_at(depth).is_some_and(|cell| self.steps_over(cell)) {
                depth += 1;
            }
            if !matches!(data.peek_at(depth), Some(Cell::Dummy(_))) {
                return group;
            }
            for _ in 0..=depth {
                if let Some(cell) = data.pop() {
                    group.push(cell);
                }
            }
        }
    }

    /// `rejected` did not satisfy `required`: retry beneath it.
    fn retry_beneath(
        &self,
        mut data: Stack,
        popped: SmallVec<[Cell; 4]>,
        rejected: Cell,
        required: &TypeTag,
    ) -> Stack {
        let dummies = if self.accept_deferred && matches!(rejected, Cell::Defer { .. }) {
            self.take_dummies(&mut data)
        } else {
            Vec::new()
        };
        let first = self.inputs.first();
        let separates_dummy = self.accept_deferred
            && (matches!(rejected, Cell::Dummy(_))
                || dummies.iter().any(|cell| {
                    matches!(cell, Cell::Dummy(_)) && first.is_some_and(|r| self.admits(r, cell))
                }));

        if separates_dummy {
            restore(&mut data, dummies);
            data.push(rejected);
            restore(&mut data, popped);
            log::debug!("{}: would split a record from its dummies, left unapplied", self.name());
            data.push(Cell::Symbol(self.name().to_owned()));
            return data;
        }

        restore(&mut data, popped);
        log::debug!("{}: {} is not {}, retrying beneath it", self.name(), rejected, required);
        if dummies.is_empty() {
            data.push(continuation::retry(self.name(), rejected));
        } else {
            let mut code = vec![Cell::Symbol(self.name().to_owned())];
            code.extend(dummies.into_iter().rev());
            code.push(rejected);
            data.push(Cell::continuation(code));
        }
        data
    }
}

/// A record whose replay leaves no value of its own.
fn leaves_nothing(cell: &Cell) -> bool {
    matches!(cell, Cell::Defer { result: None, .. })
}

impl<I: Instruction> Instruction for TypeCheckInstruction<I> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn apply(&self, mut data: Stack, env: &mut Environment) -> Result<Stack, EngineError> {
        // Everything popped so far, top first.
        let mut popped: SmallVec<[Cell; 4]> = SmallVec::new();
        for required in &self.inputs {
            let next = loop {
                match data.pop() {
                    Some(cell) if self.steps_over(&cell) => popped.push(cell),
                    other => break other,
                }
            };
            let Some(cell) = next else {
                restore(&mut data, popped);
                log::debug!("{}: out of operands, left unapplied", self.name());
                data.push(Cell::Symbol(self.name().to_owned()));
                return Ok(data);
            };
            if self.admits(required, &cell) {
                popped.push(cell);
                continue;
            }
            return Ok(self.retry_beneath(data, popped, cell, required));
        }

        if !self.accept_deferred {
            restore(&mut data, popped);
            return self.inner.apply(data, env);
        }

        let (passed, operands): (SmallVec<[Cell; 4]>, SmallVec<[Cell; 4]>) =
            popped.into_iter().partition(leaves_nothing);
        restore(&mut data, passed);
        let result = self
            .inner
            .apply(Stack::from_bottom_up(operands.into_iter().rev().collect()), env)?;
        for cell in result.into_bottom_up() {
            data.push(cell);
        }
        Ok(data)
    }
}

/// Push back cells that were popped top first.
fn restore<C>(data: &mut Stack, popped: C)
where
    C: IntoIterator<Item = Cell>,
    C::IntoIter: DoubleEndedIterator,
{
    for cell in popped.into_iter().rev() {
        data.push(cell);
    }
}
