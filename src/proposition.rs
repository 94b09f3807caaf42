//! Structural kind and classification of propositions.

use crate::*;
use std::fmt;

/// The main connective of a proposition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropositionKind {
    Variable,
    Constant,
    /// Negation of a variable or constant (simple) or of a compound proposition
    Negation { compound: bool },
    DoubleNegation,
    Conjunction,
    Disjunction,
    ExclusiveDisjunction,
    /// NAND
    AlternativeDenial,
    /// NOR
    JointDenial,
    /// Implication with a single variable (simple) or a compound proposition as antecedent
    Implication { compound_antecedent: bool },
    Equivalence,
}

impl PropositionKind {
    /// Identify the kind of a proposition from the root of its tree
    pub fn of(expr: &Expr) -> Self {
        match expr {
            Expr::Variable(_) => PropositionKind::Variable,
            Expr::Constant(_) => PropositionKind::Constant,
            Expr::Not(e) => match e.as_ref() {
                Expr::Not(_) => PropositionKind::DoubleNegation,
                e => PropositionKind::Negation {
                    compound: !e.is_atom(),
                },
            },
            Expr::Operation(op, children) => match op {
                Operator::And => PropositionKind::Conjunction,
                Operator::Or => PropositionKind::Disjunction,
                Operator::Xor => PropositionKind::ExclusiveDisjunction,
                Operator::Nand => PropositionKind::AlternativeDenial,
                Operator::Nor => PropositionKind::JointDenial,
                Operator::Iff => PropositionKind::Equivalence,
                Operator::Implies => PropositionKind::Implication {
                    compound_antecedent: !children.0.is_atom(),
                },
                Operator::Not => unreachable!("negations are not binary operations"),
            },
        }
    }
}

impl fmt::Display for PropositionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            PropositionKind::Variable => "Propositional variable",
            PropositionKind::Constant => "Constant",
            PropositionKind::Negation { compound: false } => "Simple negation",
            PropositionKind::Negation { compound: true } => "Compound negation",
            PropositionKind::DoubleNegation => "Double negation",
            PropositionKind::Conjunction => "Conjunction",
            PropositionKind::Disjunction => "Disjunction",
            PropositionKind::ExclusiveDisjunction => "Exclusive disjunction",
            PropositionKind::AlternativeDenial => "Alternative denial",
            PropositionKind::JointDenial => "Joint denial",
            PropositionKind::Implication {
                compound_antecedent: false,
            } => "Simple implication",
            PropositionKind::Implication {
                compound_antecedent: true,
            } => "Compound implication",
            PropositionKind::Equivalence => "Equivalence",
        };
        write!(f, "{}", s)
    }
}

/// Kind and classification of a proposition
///
/// ```
/// use lokit::{Analysis, Classification, Expr, PropositionKind, TruthTable};
/// # use lokit::LokitError;
/// # fn main() -> Result<(), LokitError> {
///
/// let expr = Expr::parse("P → P ∨ Q")?;
/// let table = TruthTable::build("P → P ∨ Q")?;
/// let analysis = Analysis::new(&expr, &table);
/// assert_eq!(analysis.classification, Classification::Tautology);
/// assert_eq!(analysis.kind, PropositionKind::Implication { compound_antecedent: false });
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Analysis {
    pub kind: PropositionKind,
    pub classification: Classification,
}

impl Analysis {
    pub fn new(expr: &Expr, table: &TruthTable) -> Self {
        Self {
            kind: PropositionKind::of(expr),
            classification: table.classification(),
        }
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.classification)
    }
}
