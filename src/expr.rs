//! Boolean rules defined as expression trees

use crate::efmt::{ExprFormatter, Formula, InfixFormatter, PrefixFormatted};
use crate::*;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A Boolean expression tree.
///
/// Internal nodes are operators and leaves are variables or fixed Boolean values.
/// Subtrees are shared: expressions can not be [copied](Copy) but they can be [cloned](Clone)
/// in constant time.
///
/// The tree is built from the RPN stream of the parser and keeps its exact structure:
/// no operator is rewritten, double negations and constants are preserved.
///
/// ```
/// use lokit::{Expr, Operator};
/// # use lokit::LokitError;
/// # fn main() -> Result<(), LokitError> {
///
/// let expr: Expr = "¬(A ∧ B) ∨ C".parse()?;
/// assert_eq!(expr.operator(), Some(Operator::Or));
/// assert_eq!(expr.to_string(), "¬(A ∧ B) ∨ C");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expr {
    /// A fixed Boolean value
    Constant(bool),

    /// A single named variable
    Variable(Arc<str>),

    /// Negation of a sub-expression
    Not(Arc<Expr>),

    /// Two expressions connected with a binary operator
    Operation(Operator, Arc<(Expr, Expr)>),
}

impl Expr {
    pub fn variable(name: &str) -> Self {
        Expr::Variable(name.into())
    }

    pub fn negate(e: Expr) -> Self {
        Expr::Not(Arc::new(e))
    }

    /// Join two expressions with a binary operator.
    ///
    /// Panics if the operator is NOT.
    pub fn join(op: Operator, left: Expr, right: Expr) -> Self {
        assert!(!op.is_unary(), "NOT is not a binary operator");
        Expr::Operation(op, Arc::new((left, right)))
    }

    /// Parse an expression into a tree
    pub fn parse(expression: &str) -> Result<Self, LokitError> {
        Self::from_rpn(&Rpn::parse(expression)?)
    }

    /// Build the tree of a parsed expression.
    ///
    /// Fails with [LokitError::TooDeep] if operators are nested more than [MAX_EXPRESSION_DEPTH] levels.
    pub fn from_rpn(rpn: &Rpn) -> Result<Self, LokitError> {
        let (expr, _) = reduce(rpn, &mut TreeBuilder { max_depth: MAX_EXPRESSION_DEPTH })?;
        Ok(expr)
    }

    /// The operator at the root of the tree, if any
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Expr::Constant(_) | Expr::Variable(_) => None,
            Expr::Not(_) => Some(Operator::Not),
            Expr::Operation(op, _) => Some(*op),
        }
    }

    /// The name of a single variable, or None for any other node
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Expr::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// Test if the expression is a single variable or a constant
    pub fn is_atom(&self) -> bool {
        matches!(self, Expr::Constant(_) | Expr::Variable(_))
    }

    /// Test if an operator appears anywhere in the tree
    pub fn uses(&self, op: Operator) -> bool {
        match self {
            Expr::Constant(_) | Expr::Variable(_) => false,
            Expr::Not(e) => op == Operator::Not || e.uses(op),
            Expr::Operation(o, children) => {
                *o == op || children.0.uses(op) || children.1.uses(op)
            }
        }
    }

    /// Add the names of all variables to the list, in order of appearance
    pub fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Constant(_) => (),
            Expr::Variable(name) => names.push(name),
            Expr::Not(e) => e.collect_variables(names),
            Expr::Operation(_, children) => {
                children.0.collect_variables(names);
                children.1.collect_variables(names);
            }
        }
    }

    /// The sorted set of variables used in this expression
    pub fn variables(&self) -> VariableSet {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names.into_iter().collect()
    }

    /// Evaluate the expression, unbound variables are false
    pub fn eval(&self, valuation: &impl Valuation) -> bool {
        match self {
            Expr::Constant(b) => *b,
            Expr::Variable(name) => valuation.value(name).unwrap_or(false),
            Expr::Not(e) => !e.eval(valuation),
            Expr::Operation(op, children) => {
                op.apply(children.0.eval(valuation), children.1.eval(valuation))
            }
        }
    }

    /// Rewrite the tree bottom-up.
    ///
    /// The closure is called on every node after its children were rewritten and returns
    /// a replacement, or None to keep the node. Unchanged subtrees are shared with the original tree.
    pub fn rewrite<F>(&self, f: &F) -> Self
    where
        F: Fn(&Expr) -> Option<Expr>,
    {
        let node = match self {
            Expr::Constant(_) | Expr::Variable(_) => self.clone(),
            Expr::Not(e) => {
                let c = e.rewrite(f);
                match &c == e.as_ref() {
                    true => self.clone(),
                    false => Expr::negate(c),
                }
            }
            Expr::Operation(op, children) => {
                let c0 = children.0.rewrite(f);
                let c1 = children.1.rewrite(f);
                match c0 == children.0 && c1 == children.1 {
                    true => self.clone(),
                    false => Expr::join(*op, c0, c1),
                }
            }
        };
        f(&node).unwrap_or(node)
    }

    /// Display this expression in prefix notation
    pub fn prefix(&self) -> PrefixFormatted<'_, Self> {
        PrefixFormatted(self)
    }

    fn _fmt_expr(&self, f: &mut dyn ExprFormatter, parent: Option<(Operator, Side)>) -> fmt::Result {
        match self {
            Expr::Constant(b) => f.write_bool(*b),
            Expr::Variable(name) => f.write_variable(name),
            Expr::Not(e) => {
                // the negation encloses compound operands itself
                let bare = e.is_atom() || e.operator() == Some(Operator::Not);
                f.start_negation(bare)?;
                e._fmt_expr(f, None)?;
                f.end_negation(bare)
            }
            Expr::Operation(op, children) => {
                let grouped = needs_group(*op, parent);
                f.start_operation(*op, grouped)?;
                children.0._fmt_expr(f, Some((*op, Side::Left)))?;
                f.sep_operation(*op)?;
                children.1._fmt_expr(f, Some((*op, Side::Right)))?;
                f.end_operation(*op, grouped)
            }
        }
    }
}

/// Position of a sub-expression below a binary operator
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Decide if a binary operation must be enclosed in parenthesis to be parsed back identically
fn needs_group(op: Operator, parent: Option<(Operator, Side)>) -> bool {
    let (parent, side) = match parent {
        None => return false,
        Some(p) => p,
    };
    if op.precedence() < parent.precedence() {
        return true;
    }
    if op.precedence() > parent.precedence() {
        return false;
    }
    if op == parent && op.is_associative() {
        return false;
    }
    // Same precedence: only the side matching the associativity can stay bare
    match side {
        Side::Left => parent.is_right_associative(),
        Side::Right => !parent.is_right_associative(),
    }
}

/// Build expression trees from RPN streams, tracking the depth of each subtree.
///
/// Traversals of the tree are recursive: the depth is bounded while building.
struct TreeBuilder {
    max_depth: usize,
}

impl TreeBuilder {
    fn nest(&self, depth: usize) -> Result<usize, LokitError> {
        match depth < self.max_depth {
            true => Ok(depth + 1),
            false => Err(LokitError::TooDeep { max: self.max_depth }),
        }
    }
}

impl Reducer for TreeBuilder {
    type Value = (Expr, usize);

    fn variable(&mut self, name: &str) -> Result<Self::Value, LokitError> {
        Ok((Expr::variable(name), 1))
    }

    fn constant(&mut self, value: bool) -> Result<Self::Value, LokitError> {
        Ok((Expr::Constant(value), 1))
    }

    fn negate(&mut self, (operand, depth): Self::Value) -> Result<Self::Value, LokitError> {
        Ok((Expr::negate(operand), self.nest(depth)?))
    }

    fn combine(
        &mut self,
        op: Operator,
        (left, dl): Self::Value,
        (right, dr): Self::Value,
    ) -> Result<Self::Value, LokitError> {
        Ok((Expr::join(op, left, right), self.nest(dl.max(dr))?))
    }
}

impl Formula for Expr {
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result {
        self._fmt_expr(f, None)
    }
}

impl FromStr for Expr {
    type Err = LokitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Constant(b)
    }
}

// Display with the Unicode glyphs
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(&mut InfixFormatter::new(f))
    }
}
