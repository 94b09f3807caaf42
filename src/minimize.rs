//! Candidate simplified forms of an expression.
//!
//! The minimizer does not search for a minimal expression: it lists the canonical forms of the truth
//! table, the result of two algebraic theorems applied on the expression tree, and the terms
//! found by the grouping heuristic of the [Karnaugh map](KarnaughMap).

use crate::efmt::FormatterConfig;
use crate::*;

use itertools::Itertools;
use std::fmt;
use tracing::debug;

/// How a candidate expression was obtained
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    CanonicalSop,
    CanonicalPos,
    Absorption,
    DeMorgan,
    Karnaugh,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Method::CanonicalSop => write!(f, "Canonical sum of products"),
            Method::CanonicalPos => write!(f, "Canonical product of sums"),
            Method::Absorption => write!(f, "Absorption theorem"),
            Method::DeMorgan => write!(f, "De Morgan theorem"),
            Method::Karnaugh => write!(f, "Karnaugh map"),
        }
    }
}

/// Theorems applied by the minimizer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theorem {
    Absorption,
    DeMorgan,
    Karnaugh,
}

impl fmt::Display for Theorem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Theorem::Absorption => write!(f, "Absorption"),
            Theorem::DeMorgan => write!(f, "De Morgan"),
            Theorem::Karnaugh => write!(f, "Karnaugh"),
        }
    }
}

/// A candidate form of an expression, with the steps justifying it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinimizedExpression {
    pub method: Method,
    pub expression: String,
    pub steps: Vec<String>,
    pub theorem: Option<Theorem>,
}

/// List candidate forms, written with a given formatter.
///
/// ```
/// use lokit::{Expr, Method, Minimizer, TruthTable};
/// # use lokit::LokitError;
/// # fn main() -> Result<(), LokitError> {
///
/// let expr = Expr::parse("¬(A ∧ B)")?;
/// let table = TruthTable::build("¬(A ∧ B)")?;
/// let candidates = Minimizer::default().minimize(Some(&expr), &table);
///
/// assert_eq!(candidates[0].method, Method::CanonicalSop);
/// assert_eq!(candidates[1].method, Method::CanonicalPos);
/// assert!(candidates.iter().any(|c| c.expression == "¬A ∨ ¬B"));
/// # Ok(())
/// # }
/// ```
pub struct Minimizer<'a> {
    cfg: &'a FormatterConfig<'a>,
}

impl Default for Minimizer<'static> {
    fn default() -> Self {
        Self {
            cfg: &efmt::UNICODE_FMT_CFG,
        }
    }
}

impl<'a> Minimizer<'a> {
    pub fn with(cfg: &'a FormatterConfig<'a>) -> Self {
        Self { cfg }
    }

    /// List the candidates in order: canonical sum of products, canonical product of sums,
    /// rewritten expressions if a theorem applies, Karnaugh terms if groups are found.
    ///
    /// Without a parsed expression, the theorems are skipped.
    pub fn minimize(&self, expr: Option<&Expr>, table: &TruthTable) -> Vec<MinimizedExpression> {
        let mut results = vec![
            MinimizedExpression {
                method: Method::CanonicalSop,
                expression: self.cfg.infix(&table.sop()).to_string(),
                steps: vec![format!("Minterms: {}", table.minterms().iter().join(", "))],
                theorem: None,
            },
            MinimizedExpression {
                method: Method::CanonicalPos,
                expression: self.cfg.infix(&table.pos()).to_string(),
                steps: vec![format!("Maxterms: {}", table.maxterms().iter().join(", "))],
                theorem: None,
            },
        ];

        if let Some(expr) = expr {
            if let Some(absorbed) = absorption(expr) {
                results.push(MinimizedExpression {
                    method: Method::Absorption,
                    expression: self.cfg.infix(&absorbed).to_string(),
                    steps: vec![self.law(&absorption_law())],
                    theorem: Some(Theorem::Absorption),
                });
            }
            if let Some(rewritten) = de_morgan(expr) {
                results.push(MinimizedExpression {
                    method: Method::DeMorgan,
                    expression: self.cfg.infix(&rewritten).to_string(),
                    steps: de_morgan_laws().iter().map(|l| self.law(l)).collect(),
                    theorem: Some(Theorem::DeMorgan),
                });
            }
        }

        if let Some(candidate) = self.karnaugh(table) {
            results.push(candidate);
        }

        debug!("{} candidate forms", results.len());
        results
    }

    fn law(&self, (lhs, rhs): &(Expr, Expr)) -> String {
        format!("{} = {}", self.cfg.infix(lhs), self.cfg.infix(rhs))
    }

    fn karnaugh(&self, table: &TruthTable) -> Option<MinimizedExpression> {
        let map = KarnaughMap::new(table.variables(), table)?;
        let variables = map.variables();

        let (terms, step) = match variables.len() {
            2 => {
                let grid = map.grid();
                if grid.iter().flatten().all(|b| *b) {
                    return Some(MinimizedExpression {
                        method: Method::Karnaugh,
                        expression: "1".to_string(),
                        steps: vec!["All cells are grouped".to_string()],
                        theorem: Some(Theorem::Karnaugh),
                    });
                }

                let mut terms = vec![];
                // a full row fixes the first variable, a full column fixes the second one
                for (row, cells) in grid.iter().enumerate() {
                    if cells.iter().all(|b| *b) {
                        terms.push(literal(Variable(0), row == 1));
                    }
                }
                for column in 0..2 {
                    if grid.iter().all(|cells| cells[column]) {
                        terms.push(literal(Variable(1), column == 1));
                    }
                }
                (terms, "Groups")
            }
            _ => {
                let terms = map.groups().iter().map(|g| g.pattern.clone()).collect();
                (terms, "Groups found")
            }
        };

        if terms.is_empty() {
            return None;
        }

        let terms = terms
            .iter()
            .map(|p| self.cfg.infix(&p.named(variables, true)).to_string())
            .collect_vec();
        let sep = format!(" {} ", self.cfg.operator(Operator::Or));
        Some(MinimizedExpression {
            method: Method::Karnaugh,
            expression: terms.join(sep.as_str()),
            steps: vec![format!("{}: {}", step, terms.join(", "))],
            theorem: Some(Theorem::Karnaugh),
        })
    }
}

fn literal(var: Variable, value: bool) -> Pattern {
    let mut p = Pattern::default();
    p.set(var, value);
    p
}

fn absorption_law() -> (Expr, Expr) {
    let (x, y) = (Expr::variable("X"), Expr::variable("Y"));
    let product = Expr::join(Operator::And, x.clone(), y);
    (Expr::join(Operator::Or, x.clone(), product), x)
}

fn de_morgan_laws() -> [(Expr, Expr); 2] {
    [Operator::And, Operator::Or].map(|op| {
        let (x, y) = (Expr::variable("X"), Expr::variable("Y"));
        (
            Expr::negate(Expr::join(op, x.clone(), y.clone())),
            Expr::join(dual(op), Expr::negate(x), Expr::negate(y)),
        )
    })
}

fn dual(op: Operator) -> Operator {
    match op {
        Operator::And => Operator::Or,
        _ => Operator::And,
    }
}

/// Apply the absorption theorem `X ∨ (X ∧ Y) = X` and its mirror `(X ∧ Y) ∨ X = X`.
///
/// Only single variables are matched and the expression must use both AND and OR.
/// Returns None if nothing was absorbed.
pub fn absorption(expr: &Expr) -> Option<Expr> {
    if !(expr.uses(Operator::And) && expr.uses(Operator::Or)) {
        return None;
    }

    let absorbed = expr.rewrite(&|node| {
        let (left, right) = binary(node, Operator::Or)?;
        let x = left.as_variable().or_else(|| right.as_variable())?;
        let (product, kept) = match left.as_variable() {
            Some(_) => (right, left),
            None => (left, right),
        };
        let (a, b) = binary(product, Operator::And)?;
        match (a.as_variable(), b.as_variable()) {
            (Some(a), Some(_)) if a == x => Some(kept.clone()),
            _ => None,
        }
    });
    Some(absorbed).filter(|e| e != expr)
}

/// Apply the De Morgan laws `¬(X ∧ Y) = ¬X ∨ ¬Y` and `¬(X ∨ Y) = ¬X ∧ ¬Y`.
///
/// Only negations of two single variables are matched.
/// Returns None if no law was applied.
pub fn de_morgan(expr: &Expr) -> Option<Expr> {
    let rewritten = expr.rewrite(&|node| match node {
        Expr::Not(inner) => {
            let op = inner.operator().filter(|op| matches!(op, Operator::And | Operator::Or))?;
            let (a, b) = binary(inner, op)?;
            if a.as_variable().is_none() || b.as_variable().is_none() {
                return None;
            }
            Some(Expr::join(
                dual(op),
                Expr::negate(a.clone()),
                Expr::negate(b.clone()),
            ))
        }
        _ => None,
    });
    Some(rewritten).filter(|e| e != expr)
}

/// Operands of a binary operation using a specific operator
fn binary(expr: &Expr, op: Operator) -> Option<(&Expr, &Expr)> {
    match expr {
        Expr::Operation(o, children) if *o == op => Some((&children.0, &children.1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::efmt::ASCII_FMT_CFG;
    use crate::minimize::*;

    fn candidates(s: &str) -> Result<Vec<MinimizedExpression>, LokitError> {
        let expr = Expr::parse(s)?;
        let table = TruthTable::build(s)?;
        Ok(Minimizer::default().minimize(Some(&expr), &table))
    }

    fn find(candidates: &[MinimizedExpression], method: Method) -> Option<&MinimizedExpression> {
        candidates.iter().find(|c| c.method == method)
    }

    #[test]
    fn canonical_first() -> Result<(), LokitError> {
        let c = candidates("A ⊼ B")?;
        assert_eq!(c[0].method, Method::CanonicalSop);
        assert_eq!(c[0].steps, vec!["Minterms: 0, 1, 2"]);
        assert_eq!(c[1].method, Method::CanonicalPos);
        assert_eq!(c[1].expression, "(¬A ∨ ¬B)");
        assert_eq!(c[1].steps, vec!["Maxterms: 3"]);
        assert_eq!(c[0].theorem, None);
        Ok(())
    }

    #[test]
    fn de_morgan_rewrite() -> Result<(), LokitError> {
        let c = candidates("¬(A ∧ B)")?;
        let d = find(&c, Method::DeMorgan).unwrap();
        assert_eq!(d.expression, "¬A ∨ ¬B");
        assert_eq!(d.theorem, Some(Theorem::DeMorgan));
        assert_eq!(d.steps, vec!["¬(X ∧ Y) = ¬X ∨ ¬Y", "¬(X ∨ Y) = ¬X ∧ ¬Y"]);

        let c = candidates("¬(A ∨ B)")?;
        assert_eq!(find(&c, Method::DeMorgan).unwrap().expression, "¬A ∧ ¬B");

        let c = candidates("¬(A ∧ B) ∨ C")?;
        assert_eq!(find(&c, Method::DeMorgan).unwrap().expression, "¬A ∨ ¬B ∨ C");

        // compound operands are not rewritten
        assert_eq!(de_morgan(&Expr::parse("¬((A ∨ C) ∧ B)")?), None);
        assert_eq!(de_morgan(&Expr::parse("A ∧ B")?), None);
        Ok(())
    }

    #[test]
    fn absorption_rewrite() -> Result<(), LokitError> {
        let c = candidates("A ∨ (A ∧ B)")?;
        let a = find(&c, Method::Absorption).unwrap();
        assert_eq!(a.expression, "A");
        assert_eq!(a.steps, vec!["X ∨ X ∧ Y = X"]);

        assert_eq!(absorption(&Expr::parse("(A ∧ B) ∨ A")?), Some(Expr::variable("A")));
        assert_eq!(
            absorption(&Expr::parse("C ∧ (B ∨ (B ∧ D))")?).map(|e| e.to_string()),
            Some("C ∧ B".to_string())
        );

        // no match, or missing operators
        assert_eq!(absorption(&Expr::parse("A ∨ (B ∧ A)")?), None);
        assert_eq!(absorption(&Expr::parse("A ∨ (B ∧ C)")?), None);
        assert_eq!(absorption(&Expr::parse("A ∨ B")?), None);
        assert!(find(&candidates("A ∨ (B ∧ C)")?, Method::Absorption).is_none());
        Ok(())
    }

    #[test]
    fn karnaugh_two_variables() -> Result<(), LokitError> {
        let c = candidates("A ∨ B")?;
        let k = find(&c, Method::Karnaugh).unwrap();
        assert_eq!(k.expression, "A ∨ B");
        assert_eq!(k.steps, vec!["Groups: A, B"]);

        let c = candidates("¬A ∧ (B ∨ ¬B)")?;
        assert_eq!(find(&c, Method::Karnaugh).unwrap().expression, "¬A");

        let c = candidates("A ∨ ¬A ∨ B")?;
        assert_eq!(find(&c, Method::Karnaugh).unwrap().expression, "1");

        let c = candidates("A ⊕ B")?;
        assert!(find(&c, Method::Karnaugh).is_none());
        Ok(())
    }

    #[test]
    fn karnaugh_groups() -> Result<(), LokitError> {
        let c = candidates("B ∧ ¬C ∧ ¬A ∨ A ∧ B")?;
        let k = find(&c, Method::Karnaugh).unwrap();
        assert_eq!(k.expression, "A ∧ B ∨ B ∧ ¬C");
        assert_eq!(k.steps, vec!["Groups found: A ∧ B, B ∧ ¬C"]);

        // a single variable yields no map
        assert!(find(&candidates("A")?, Method::Karnaugh).is_none());
        Ok(())
    }

    #[test]
    fn configured_glyphs() -> Result<(), LokitError> {
        let expr = Expr::parse("~(A | B)")?;
        let table = TruthTable::build("~(A | B)")?;
        let c = Minimizer::with(&ASCII_FMT_CFG).minimize(Some(&expr), &table);
        assert_eq!(c[0].expression, "~A & ~B");
        assert_eq!(find(&c, Method::DeMorgan).unwrap().expression, "~A & ~B");

        // without a parsed expression only the table is used
        let c = Minimizer::default().minimize(None, &table);
        assert!(find(&c, Method::DeMorgan).is_none());
        Ok(())
    }
}
