use crate::*;
use std::collections::HashMap;
use std::fmt;
use std::iter::FromIterator;

/// A state defined by the set of active variables, the others are implicitly inactive.
///
/// Each row of a truth table is a state. The row index is obtained by reading the variables in
/// order as the bits of an integer, the first variable being the most significant bit.
///
/// ```
/// use lokit::{State, Variable};
///
/// // With 3 variables, row 6 (110) activates the first and second variables
/// let state = State::from_row(6, 3);
/// assert!(state.is_active(Variable::from(0)));
/// assert!(state.is_active(Variable::from(1)));
/// assert!(!state.is_active(Variable::from(2)));
/// assert_eq!(state.row(3), 6);
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct State {
    pub(crate) active: VarSet,
}

impl State {
    /// Build the state of a truth table row over `count` variables
    pub fn from_row(row: usize, count: usize) -> Self {
        (0..count)
            .filter(|i| (row >> (count - 1 - i)) & 1 == 1)
            .map(Variable)
            .collect()
    }

    /// Index of this state in a truth table over `count` variables
    pub fn row(&self, count: usize) -> usize {
        self.active
            .iter()
            .filter(|v| v.uid() < count)
            .fold(0, |acc, v| acc | 1 << (count - 1 - v.uid()))
    }

    /// Test if a specific variable is active in this state
    pub fn is_active(&self, var: Variable) -> bool {
        self.active.contains(var)
    }

    pub fn active(&self) -> &VarSet {
        &self.active
    }

    /// Values of the variables of a collection, in order
    pub fn values(&self, variables: &VariableSet) -> Vec<bool> {
        variables.variables().map(|v| self.is_active(v)).collect()
    }

    /// Give names to the variables of this state
    pub fn named<'a>(&'a self, variables: &'a VariableSet) -> Assignment<'a> {
        Assignment {
            state: self,
            variables,
        }
    }
}

impl FromIterator<Variable> for State {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        Self {
            active: VarSet::from_iter(iter),
        }
    }
}

impl From<VarSet> for State {
    fn from(active: VarSet) -> Self {
        Self { active }
    }
}

/// A state seen through the names of its variables.
///
/// Variables which are not part of the collection are unbound.
#[derive(Clone, Copy, Debug)]
pub struct Assignment<'a> {
    state: &'a State,
    variables: &'a VariableSet,
}

impl Assignment<'_> {
    /// Copy the assignment into an owned map from names to values
    pub fn to_map(&self) -> HashMap<String, bool> {
        self.variables
            .variables()
            .filter_map(|v| {
                self.variables
                    .name(v)
                    .map(|name| (name.to_string(), self.state.is_active(v)))
            })
            .collect()
    }
}

impl Valuation for Assignment<'_> {
    fn value(&self, name: &str) -> Option<bool> {
        self.variables.get(name).map(|v| self.state.is_active(v))
    }
}

impl fmt::Display for Assignment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, v) in self.variables.variables().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            self.variables.format_variable(f, v)?;
            write!(f, "={}", self.state.is_active(v) as u8)?;
        }
        Ok(())
    }
}
