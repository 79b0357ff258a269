//! Instructions that push types instead of values.

use cairn_core::{
    Cell, EngineError, Environment, Instruction, NameContext, Stack, Substitution, substitute,
    unify,
};

/// An instruction described only by its stack effect.
///
/// Applied to a stack of types it consumes one type per declared input,
/// unifying each against the declaration, and pushes the declared outputs
/// with every pinned variable substituted. Variables in the declaration are
/// renamed on each invocation so two uses of `dup` never share `'a`.
///
/// Bookkeeping left by earlier invocations is stepped over and kept:
/// `Bindings` cells (which also constrain this invocation) and `Residual`
/// cells. When the stack runs out, the declared inputs that were not found
/// are pushed as a `Residual`: the program needs them from outside. A
/// quotation literal is an ordinary value of type `quot`.
#[derive(Debug)]
pub struct DetermineTypesInstruction {
    name: String,
    consumes: Stack,
    produces: Stack,
}

impl DetermineTypesInstruction {
    /// Both signatures are listed top first.
    pub fn new(name: &str, consumes: Stack, produces: Stack) -> Self {
        Self {
            name: name.to_owned(),
            consumes,
            produces,
        }
    }

    pub fn consumes(&self) -> &Stack {
        &self.consumes
    }

    pub fn produces(&self) -> &Stack {
        &self.produces
    }

    /// The type a data cell stands for.
    fn type_of(&self, cell: Cell) -> Result<Cell, EngineError> {
        match cell {
            Cell::Type(_) | Cell::Variable(_) => Ok(cell),
            other => match other.value_type() {
                Some(tag) => Ok(Cell::Type(tag)),
                None => Err(EngineError::Untyped {
                    instruction: self.name.clone(),
                    cell: other.to_string(),
                }),
            },
        }
    }
}

/// Rename every variable in a signature to a fresh name.
pub fn freshen(consumes: &Stack, produces: &Stack, names: &mut NameContext) -> (Stack, Stack) {
    let mut renaming = Substitution::new();
    for cell in consumes.iter().chain(produces.iter()) {
        collect_renaming(cell, &mut renaming, names);
    }
    let rename = |stack: &Stack| -> Stack { stack.iter().map(|c| substitute(&renaming, c)).collect() };
    (rename(consumes), rename(produces))
}

fn collect_renaming(cell: &Cell, renaming: &mut Substitution, names: &mut NameContext) {
    match cell {
        Cell::Variable(name) if renaming.get(name).is_none() => {
            let fresh = names.fresh(name);
            renaming.bind(name.clone(), Cell::Variable(fresh));
        }
        Cell::Quotation(items) => {
            for item in items.iter() {
                collect_renaming(item, renaming, names);
            }
        }
        _ => {}
    }
}

impl Instruction for DetermineTypesInstruction {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut data: Stack, env: &mut Environment) -> Result<Stack, EngineError> {
        let (consumes, produces) = freshen(&self.consumes, &self.produces, env.names_mut());
        log::debug!("{}: {} -> {}", self.name, consumes, produces);

        let mut theta = Substitution::new();
        // Popped top first.
        let mut set_aside: Vec<Cell> = Vec::new();
        let mut residual: Option<Vec<Cell>> = None;

        let required: Vec<&Cell> = consumes.iter().collect();
        'inputs: for (i, req) in required.iter().enumerate() {
            loop {
                match data.pop() {
                    None => {
                        residual = Some(required[i..].iter().map(|c| (*c).clone()).collect());
                        break 'inputs;
                    }
                    Some(Cell::Bindings(earlier)) => {
                        for (var, bound) in earlier.iter() {
                            theta = unify(&Cell::Variable(var.to_owned()), bound, theta)?;
                        }
                        set_aside.push(Cell::Bindings(earlier));
                    }
                    Some(cell @ Cell::Residual(_)) => set_aside.push(cell),
                    Some(cell) => {
                        let actual = self.type_of(cell)?;
                        theta = unify(req, &actual, theta)?;
                        continue 'inputs;
                    }
                }
            }
        }

        for cell in set_aside.into_iter().rev() {
            data.push(cell);
        }
        if let Some(missing) = residual {
            log::debug!("{}: needs {} from outside", self.name, Stack::from_code(missing.iter().cloned()));
            data.push(Cell::Residual(Stack::from_code(missing)));
        }
        let outputs: Vec<Cell> = produces
            .as_slice()
            .iter()
            .map(|c| substitute(&theta, c))
            .collect();
        if !theta.is_empty() {
            data.push(Cell::Bindings(theta));
        }
        for cell in outputs {
            data.push(cell);
        }
        Ok(data)
    }
}
