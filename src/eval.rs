//! Evaluate expressions under variable assignments.

use crate::*;
use std::collections::{BTreeMap, HashMap};

/// Source of values for named variables.
///
/// Returns `None` for unbound variables.
pub trait Valuation {
    fn value(&self, name: &str) -> Option<bool>;
}

impl Valuation for HashMap<String, bool> {
    fn value(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl Valuation for HashMap<&str, bool> {
    fn value(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl Valuation for BTreeMap<String, bool> {
    fn value(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl<V: Valuation + ?Sized> Valuation for &V {
    fn value(&self, name: &str) -> Option<bool> {
        (**self).value(name)
    }
}

/// Reduce RPN streams to Boolean values.
///
/// In the default lenient mode unbound variables are false: this keeps partially typed
/// expressions evaluable. In strict mode they raise [LokitError::UndefinedVariable].
pub struct Evaluator<V> {
    valuation: V,
    strict: bool,
}

impl<V: Valuation> Evaluator<V> {
    pub fn new(valuation: V) -> Self {
        Self {
            valuation,
            strict: false,
        }
    }

    pub fn strict(valuation: V) -> Self {
        Self {
            valuation,
            strict: true,
        }
    }

    pub fn with_strict(valuation: V, strict: bool) -> Self {
        Self { valuation, strict }
    }

    /// Evaluate a parsed expression
    pub fn eval(&mut self, rpn: &Rpn) -> Result<bool, LokitError> {
        reduce(rpn, self)
    }
}

impl<V: Valuation> Reducer for Evaluator<V> {
    type Value = bool;

    fn variable(&mut self, name: &str) -> Result<bool, LokitError> {
        match (self.valuation.value(name), self.strict) {
            (Some(b), _) => Ok(b),
            (None, false) => Ok(false),
            (None, true) => Err(LokitError::UndefinedVariable(name.into())),
        }
    }

    fn constant(&mut self, value: bool) -> Result<bool, LokitError> {
        Ok(value)
    }

    fn negate(&mut self, operand: bool) -> Result<bool, LokitError> {
        Ok(!operand)
    }

    fn combine(&mut self, op: Operator, left: bool, right: bool) -> Result<bool, LokitError> {
        Ok(op.apply(left, right))
    }
}
