//! Structural unification over cells.
//!
//! Variables unify with anything that does not contain them, quotations
//! unify element-wise (top first), and every other pair must already be
//! equal. The substitution is threaded by value through each call.

use std::collections::BTreeMap;
use std::fmt;

use crate::cell::Cell;
use crate::error::UnifyError;
use crate::stack::Stack;

/// Map from variable name to the cell it is bound to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Substitution {
    map: BTreeMap<String, Cell>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the binding for a variable.
    pub fn get(&self, var: &str) -> Option<&Cell> {
        self.map.get(var)
    }

    /// Bind a variable without checking; use [`unify_var`] to bind safely.
    pub fn bind(&mut self, var: impl Into<String>, cell: Cell) {
        self.map.insert(var.into(), cell);
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Iterate bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve every variable in `cell`; see [`substitute`].
    pub fn apply(&self, cell: &Cell) -> Cell {
        substitute(self, cell)
    }
}

impl FromIterator<(String, Cell)> for Substitution {
    fn from_iter<T: IntoIterator<Item = (String, Cell)>>(iter: T) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, cell)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}: {}", var, cell)?;
        }
        write!(f, "}}")
    }
}

/// Extend `theta` so that `a` and `b` become equal under it.
pub fn unify(a: &Cell, b: &Cell, theta: Substitution) -> Result<Substitution, UnifyError> {
    if a == b {
        return Ok(theta);
    }
    match (a, b) {
        (Cell::Variable(v), _) => unify_var(v, b, theta),
        (_, Cell::Variable(v)) => unify_var(v, a, theta),
        (Cell::Quotation(xs), Cell::Quotation(ys)) => unify_sequences(xs, ys, theta),
        _ => {
            if substitute(&theta, a) == substitute(&theta, b) {
                Ok(theta)
            } else {
                Err(UnifyError::Conflict {
                    left: a.to_string(),
                    right: b.to_string(),
                })
            }
        }
    }
}

fn unify_sequences(
    xs: &Stack,
    ys: &Stack,
    mut theta: Substitution,
) -> Result<Substitution, UnifyError> {
    let mut left = xs.iter();
    let mut right = ys.iter();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ok(theta),
            (Some(x), Some(y)) => theta = unify(x, y, theta)?,
            _ => {
                return Err(UnifyError::LengthMismatch {
                    left: xs.to_string(),
                    right: ys.to_string(),
                });
            }
        }
    }
}

/// Bind variable `var` to `term`, unless it is already bound or the binding
/// would be cyclic.
pub fn unify_var(var: &str, term: &Cell, mut theta: Substitution) -> Result<Substitution, UnifyError> {
    if let Some(bound) = theta.get(var).cloned() {
        return unify(&bound, term, theta);
    }
    if let Cell::Variable(other) = term
        && let Some(bound) = theta.get(other).cloned()
    {
        return unify(&Cell::Variable(var.to_owned()), &bound, theta);
    }
    if occurs(var, term, &theta) {
        return Err(UnifyError::Occurs {
            var: var.to_owned(),
            term: term.to_string(),
        });
    }
    theta.bind(var, term.clone());
    Ok(theta)
}

/// Check whether `var` appears anywhere inside `term`, following bindings.
fn occurs(var: &str, term: &Cell, theta: &Substitution) -> bool {
    match term {
        Cell::Variable(name) => {
            name == var || theta.get(name).is_some_and(|bound| occurs(var, bound, theta))
        }
        Cell::Quotation(items) => items.iter().any(|item| occurs(var, item, theta)),
        _ => false,
    }
}

/// Replace every bound variable in `cell`, including inside quotations.
///
/// Bindings are followed transitively, so `'a -> 'b, 'b -> int` resolves
/// `'a` to `int`.
pub fn substitute(theta: &Substitution, cell: &Cell) -> Cell {
    match cell {
        Cell::Variable(name) => match theta.get(name) {
            Some(bound) => substitute(theta, bound),
            None => cell.clone(),
        },
        Cell::Quotation(items) => {
            Cell::Quotation(items.iter().map(|item| substitute(theta, item)).collect())
        }
        other => other.clone(),
    }
}
