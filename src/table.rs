//! Truth tables and canonical forms.

use crate::efmt::{ExprFormatter, Formula, InfixFormatter};
use crate::*;

use itertools::Itertools;
use std::fmt;
use tracing::debug;

/// A single row of a truth table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTableRow {
    /// Position of the row, reading the values of the variables as the bits of an integer
    pub index: usize,
    /// Active variables in this row
    pub state: State,
    pub output: bool,
}

/// Global behaviour of an expression over all assignments
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// True in all rows
    Tautology,
    /// False in all rows
    Contradiction,
    /// True in some rows and false in others
    Contingent,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Classification::Tautology => write!(f, "Tautology"),
            Classification::Contradiction => write!(f, "Contradiction"),
            Classification::Contingent => write!(f, "Contingent"),
        }
    }
}

/// The truth table of an expression, with its minterms and maxterms.
///
/// Rows enumerate all assignments of the sorted variables, the first variable being the most
/// significant bit of the row index. Each row index is either a minterm (the expression is true)
/// or a maxterm (the expression is false).
///
/// ```
/// use lokit::TruthTable;
/// # use lokit::LokitError;
/// # fn main() -> Result<(), LokitError> {
///
/// let table = TruthTable::build("A ⊼ B")?;
/// assert_eq!(table.minterms(), &[0, 1, 2]);
/// assert_eq!(table.maxterms(), &[3]);
/// assert_eq!(table.sop().to_string(), "¬A ∧ ¬B ∨ ¬A ∧ B ∨ A ∧ ¬B");
/// assert_eq!(table.pos().to_string(), "(¬A ∨ ¬B)");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTable {
    variables: VariableSet,
    rows: Vec<TruthTableRow>,
    minterms: Vec<usize>,
    maxterms: Vec<usize>,
}

impl TruthTable {
    /// Parse an expression and build its truth table with the default variable limit
    pub fn build(expression: &str) -> Result<Self, LokitError> {
        Self::from_rpn(&Rpn::parse(expression)?, DEFAULT_MAX_VARIABLES)
    }

    /// Build the truth table of a parsed expression
    pub fn from_rpn(rpn: &Rpn, max_variables: usize) -> Result<Self, LokitError> {
        let variables = rpn.variables();
        if variables.len() > max_variables {
            return Err(LokitError::TooManyVariables {
                count: variables.len(),
                max: max_variables,
            });
        }
        Self::from_fn(variables, |assignment| {
            Evaluator::new(assignment).eval(rpn)
        })
    }

    /// Build a truth table by calling a function on each row
    pub fn from_fn<F>(variables: VariableSet, mut f: F) -> Result<Self, LokitError>
    where
        F: FnMut(Assignment) -> Result<bool, LokitError>,
    {
        let count = variables.len();
        let mut rows = Vec::with_capacity(1 << count);
        for index in 0..(1usize << count) {
            let state = State::from_row(index, count);
            let output = f(state.named(&variables))?;
            rows.push(TruthTableRow {
                index,
                state,
                output,
            });
        }

        let (minterms, maxterms): (Vec<usize>, Vec<usize>) =
            rows.iter().map(|r| r.index).partition(|i| rows[*i].output);

        debug!(
            "Truth table over [{}]: {} minterms, {} maxterms",
            &variables,
            minterms.len(),
            maxterms.len()
        );
        Ok(Self {
            variables,
            rows,
            minterms,
            maxterms,
        })
    }

    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    pub fn rows(&self) -> &[TruthTableRow] {
        &self.rows
    }

    /// Indices of the rows where the expression is true
    pub fn minterms(&self) -> &[usize] {
        &self.minterms
    }

    /// Indices of the rows where the expression is false
    pub fn maxterms(&self) -> &[usize] {
        &self.maxterms
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Output of a row, None if the index is out of range
    pub fn output(&self, index: usize) -> Option<bool> {
        self.rows.get(index).map(|r| r.output)
    }

    pub fn classification(&self) -> Classification {
        match (self.minterms.is_empty(), self.maxterms.is_empty()) {
            (_, true) => Classification::Tautology,
            (true, false) => Classification::Contradiction,
            (false, false) => Classification::Contingent,
        }
    }

    pub fn is_tautology(&self) -> bool {
        self.classification() == Classification::Tautology
    }

    pub fn is_contradiction(&self) -> bool {
        self.classification() == Classification::Contradiction
    }

    /// Canonical sum of products: one product term for each minterm
    pub fn sop(&self) -> CanonicalForm<'_> {
        CanonicalForm {
            variables: &self.variables,
            terms: self.patterns(&self.minterms),
            kind: CanonicalKind::SumOfProducts,
        }
    }

    /// Canonical product of sums: one clause for each maxterm
    pub fn pos(&self) -> CanonicalForm<'_> {
        CanonicalForm {
            variables: &self.variables,
            terms: self.patterns(&self.maxterms),
            kind: CanonicalKind::ProductOfSums,
        }
    }

    fn patterns(&self, indices: &[usize]) -> Vec<Pattern> {
        indices
            .iter()
            .map(|i| Pattern::from_row(*i, self.variables.len()))
            .collect()
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} | out", self.variables.iter().join(" "))?;
        for row in &self.rows {
            let values = row
                .state
                .values(&self.variables)
                .into_iter()
                .zip(self.variables.iter())
                .map(|(b, name)| format!("{:>w$}", b as u8, w = name.chars().count()))
                .join(" ");
            writeln!(f, "{} | {}", values, row.output as u8)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanonicalKind {
    SumOfProducts,
    ProductOfSums,
}

/// A canonical form of a truth table.
///
/// Each term is a [Pattern] fixing all variables. In a sum of products, the expression is true
/// in the states of the terms. In a product of sums, each term is written as the clause which is
/// false exactly in its state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalForm<'a> {
    variables: &'a VariableSet,
    terms: Vec<Pattern>,
    kind: CanonicalKind,
}

impl CanonicalForm<'_> {
    pub fn kind(&self) -> CanonicalKind {
        self.kind
    }

    pub fn terms(&self) -> &[Pattern] {
        &self.terms
    }

    /// Evaluate the canonical form in a state
    pub fn eval(&self, state: &State) -> bool {
        let matched = self.terms.iter().any(|t| t.contains_state(state));
        match self.kind {
            CanonicalKind::SumOfProducts => matched,
            CanonicalKind::ProductOfSums => !matched,
        }
    }
}

impl Formula for CanonicalForm<'_> {
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result {
        let (op, value) = match self.kind {
            CanonicalKind::SumOfProducts => (Operator::Or, true),
            CanonicalKind::ProductOfSums => (Operator::And, false),
        };
        if self.terms.is_empty() {
            return f.write_bool(!value);
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.sep_operation(op)?;
            }
            f.write_pattern(term, self.variables, value, !value)?;
        }
        Ok(())
    }
}

impl fmt::Display for CanonicalForm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_with(&mut InfixFormatter::new(f))
    }
}

#[cfg(test)]
mod tests {
    use crate::efmt::ASCII_FMT_CFG;
    use crate::*;

    #[test]
    fn nand_table() -> Result<(), LokitError> {
        let table = TruthTable::build("A ⊼ B")?;
        let outputs: Vec<bool> = table.rows().iter().map(|r| r.output).collect();
        assert_eq!(outputs, vec![true, true, true, false]);
        assert_eq!(table.minterms(), &[0, 1, 2]);
        assert_eq!(table.maxterms(), &[3]);
        assert_eq!(table.classification(), Classification::Contingent);
        assert_eq!(table.output(3), Some(false));
        assert_eq!(table.output(4), None);

        assert_eq!(
            ASCII_FMT_CFG.infix(&table.sop()).to_string(),
            "~A & ~B | ~A & B | A & ~B"
        );
        Ok(())
    }

    #[test]
    fn row_order() -> Result<(), LokitError> {
        // the first variable is the most significant bit
        let table = TruthTable::build("B ∧ ¬A")?;
        assert_eq!(table.variables().to_string(), "A, B");
        assert_eq!(table.minterms(), &[1]);

        let table = TruthTable::build("C")?;
        assert_eq!(table.minterms(), &[1]);
        let table = TruthTable::build("A ∨ C ∨ B")?;
        assert_eq!(table.maxterms(), &[0]);
        assert_eq!(table.pos().to_string(), "(A ∨ B ∨ C)");
        Ok(())
    }

    #[test]
    fn classify() -> Result<(), LokitError> {
        let table = TruthTable::build("A ∨ ¬A")?;
        assert!(table.is_tautology());
        assert!(table.maxterms().is_empty());
        assert_eq!(table.pos().to_string(), "1");

        let table = TruthTable::build("A ∧ ¬A")?;
        assert!(table.is_contradiction());
        assert!(table.minterms().is_empty());
        assert_eq!(table.sop().to_string(), "0");
        Ok(())
    }

    #[test]
    fn constant_expressions() -> Result<(), LokitError> {
        let table = TruthTable::build("1")?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.minterms(), &[0]);
        assert_eq!(table.sop().to_string(), "1");
        assert_eq!(table.pos().to_string(), "1");

        let table = TruthTable::build("0 ∧ 1")?;
        assert_eq!(table.sop().to_string(), "0");
        assert_eq!(table.pos().to_string(), "0");
        Ok(())
    }

    #[test]
    fn canonical_forms_match_table() -> Result<(), LokitError> {
        let table = TruthTable::build("(A → B) ⊕ C")?;
        let sop = table.sop();
        let pos = table.pos();
        for row in table.rows() {
            assert_eq!(sop.eval(&row.state), row.output);
            assert_eq!(pos.eval(&row.state), row.output);
        }
        assert_eq!(sop.terms().len() + pos.terms().len(), 8);
        Ok(())
    }

    #[test]
    fn variable_limit() -> Result<(), LokitError> {
        let rpn = Rpn::parse("A ∧ B ∧ C ∧ D ∧ E ∧ F")?;
        assert_eq!(
            TruthTable::from_rpn(&rpn, DEFAULT_MAX_VARIABLES),
            Err(LokitError::TooManyVariables { count: 6, max: 5 })
        );
        assert_eq!(TruthTable::from_rpn(&rpn, 6)?.len(), 64);
        Ok(())
    }

    #[test]
    fn display() -> Result<(), LokitError> {
        let table = TruthTable::build("A ∧ Bc")?;
        assert_eq!(
            table.to_string(),
            "A Bc | out\n0  0 | 0\n0  1 | 0\n1  0 | 0\n1  1 | 1\n"
        );
        Ok(())
    }
}
