use crate::efmt::{ExprFormatter, Formula, InfixFormatter};
use crate::*;

use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

/// A subspace defined by sets of active and inactive variables, the others are implicitly free.
///
/// They are represented as a pair of [VarSet] to store positive and negative variables.
/// In a well-formed pattern, a variable should not be constrained to both values,
/// i.e. the intersection of both bitsets should be empty.
///
/// A pattern is a conjunction of literals: the product terms of a canonical sum of products,
/// the complement of the clauses of a canonical product of sums, and the terms of Karnaugh
/// groups are all patterns. A pattern fixing all variables matches a single truth table row.
///
/// A Pattern can be parsed from strings where the position in the string defines the
/// variable position and the character defines the activation state: - for free, 0 for inactive, 1 for active.
/// To make the strings easier to read, spaces and single quotes are ignored around and inside the string.
/// For example "0-100-100", "  0-100-100", and "0-100 -100" are equivalent.
///
/// ```
/// use lokit::{Pattern, State, VariableSet};
/// # use lokit::LokitError;
/// # fn main() -> Result<(), LokitError> {
///
/// let vars: VariableSet = ["A", "B", "C"].into_iter().collect();
/// let pattern: Pattern = "1-0".parse()?;
///
/// assert!(pattern.contains_state(&State::from_row(0b100, 3)));
/// assert!(pattern.contains_state(&State::from_row(0b110, 3)));
/// assert!(!pattern.contains_state(&State::from_row(0b101, 3)));
/// assert_eq!(pattern.named(&vars, true).to_string(), "A ∧ ¬C");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Pattern {
    pub(crate) positive: VarSet,
    pub(crate) negative: VarSet,
}

impl Pattern {
    /// Create a pattern from the two inner sets of fixed variables
    pub fn with(positive: VarSet, negative: VarSet) -> Self {
        Self { positive, negative }
    }

    /// Create a pattern restricted to a single state
    /// To properly set all variables fixed at 0, this requires
    /// an extra parameter giving the list of variables.
    pub fn from_state(state: &State, variables: impl IntoIterator<Item = Variable>) -> Pattern {
        let mut neg = VarSet::from_iter(variables);
        let mut pos = state.active.clone();
        pos.intersect_with(&neg);
        neg.difference_with(&pos);
        Pattern::with(pos, neg)
    }

    /// Create the pattern of a truth table row over `count` variables
    pub fn from_row(row: usize, count: usize) -> Pattern {
        Self::from_state(&State::from_row(row, count), (0..count).map(Variable))
    }

    /// Fix a variable to a specific value.
    ///
    /// If this variable was free, this leads to a restriction of the pattern.
    /// If it was fixed to the same value, the pattern is unchanged.
    /// If it was fixed to the opposite value, the existing restriction
    /// is replaced by the new one (giving a mirror pattern).
    pub fn set(&mut self, var: Variable, value: bool) {
        if value {
            self.negative.remove(var);
            self.positive.insert(var);
        } else {
            self.positive.remove(var);
            self.negative.insert(var);
        }
    }

    /// Test if no variable is fixed
    pub fn is_free_pattern(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Number of fixed variables
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_free_pattern()
    }

    /// Iterate over the fixed variables and their values, in variable order
    pub fn iter_fixed_values(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        let mut fixed = self.positive.clone();
        fixed.union_with(&self.negative);
        fixed
            .iter()
            .map(|v| (v, self.positive.contains(v)))
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Retain only the restrictions shared with another pattern.
    ///
    /// The result is the smallest pattern containing both patterns.
    pub fn retain_common(&mut self, other: &Self) {
        self.positive.intersect_with(&other.positive);
        self.negative.intersect_with(&other.negative);
    }

    /// Extract the smallest pattern containing all given patterns, or None for an empty list
    pub fn common<'a>(patterns: impl IntoIterator<Item = &'a Pattern>) -> Option<Pattern> {
        let mut patterns = patterns.into_iter();
        let mut result = patterns.next()?.clone();
        for p in patterns {
            result.retain_common(p);
        }
        Some(result)
    }

    /// Check if a state is contained in this pattern
    pub fn contains_state(&self, state: &State) -> bool {
        state.active.contains_all(&self.positive) && state.active.is_disjoint(&self.negative)
    }

    /// Test if this pattern contains the given pattern.
    pub fn contains(&self, p: &Pattern) -> bool {
        p.positive.contains_all(&self.positive) && p.negative.contains_all(&self.negative)
    }

    /// Name the variables of this pattern.
    ///
    /// When `value` is true the pattern is written as a product of literals,
    /// otherwise as the parenthesized sum of the opposite literals (a clause which is false
    /// exactly in the states of the pattern).
    pub fn named<'a>(&'a self, variables: &'a VariableSet, value: bool) -> NamedPattern<'a> {
        NamedPattern {
            pattern: self,
            variables,
            value,
        }
    }
}

impl FromStr for Pattern {
    type Err = LokitError;

    fn from_str(descr: &str) -> Result<Pattern, LokitError> {
        let mut p = Pattern::default();
        let mut idx = 0;
        for c in descr.chars() {
            match c {
                ' ' | '\t' | '\'' => (), // skip spacing and ` for formatting
                '-' => idx += 1,
                '0' => {
                    p.negative.insert(Variable(idx));
                    idx += 1;
                }
                '1' => {
                    p.positive.insert(Variable(idx));
                    idx += 1;
                }
                _ => return Err(LokitError::InvalidExpression),
            };
        }
        Ok(p)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = vec![];
        for v in &self.positive {
            if result.len() <= v.uid() {
                result.resize(v.uid() + 1, '-');
            }
            result[v.uid()] = '1';
        }
        for v in &self.negative {
            if self.positive.contains(v) {
                result[v.uid()] = '%';
            } else {
                if result.len() <= v.uid() {
                    result.resize(v.uid() + 1, '-');
                }
                result[v.uid()] = '0';
            }
        }
        let s: String = result.iter().collect();
        write!(f, "{}", &s)
    }
}

/// A pattern written with the names of its variables, see [Pattern::named]
#[derive(Clone, Copy, Debug)]
pub struct NamedPattern<'a> {
    pattern: &'a Pattern,
    variables: &'a VariableSet,
    value: bool,
}

impl Formula for NamedPattern<'_> {
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result {
        f.write_pattern(self.pattern, self.variables, self.value, !self.value)
    }
}

impl fmt::Display for NamedPattern<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_with(&mut InfixFormatter::new(f))
    }
}

#[cfg(test)]
mod tests {
    use crate::pattern::*;

    #[test]
    fn construct_and_display() -> Result<(), LokitError> {
        let p = Pattern::from_str("-0--01-11--0-1---")?;
        assert_eq!(format!("{}", p), "-0--01-11--0-1");
        assert_eq!(p.len(), 7);

        let mut p = Pattern::default();
        for v in [1, 3, 5, 8] {
            p.set(Variable(v), true);
        }
        p.set(Variable(3), false);
        assert_eq!(format!("{}", p), "-1-0-1--1");
        assert_eq!(Pattern::from_str(&p.to_string())?, p);

        assert_eq!(Pattern::from_str("1x0"), Err(LokitError::InvalidExpression));
        Ok(())
    }

    #[test]
    fn rows() {
        let p = Pattern::from_row(0b101, 3);
        assert_eq!(p.to_string(), "101");
        for row in 0..8 {
            assert_eq!(p.contains_state(&State::from_row(row, 3)), row == 0b101);
        }

        let vars: VariableSet = ["A", "B", "C"].into_iter().collect();
        assert_eq!(p.named(&vars, true).to_string(), "A ∧ ¬B ∧ C");
        assert_eq!(p.named(&vars, false).to_string(), "(¬A ∨ B ∨ ¬C)");
    }

    #[test]
    fn common_literals() -> Result<(), LokitError> {
        let cells = [
            Pattern::from_row(0b0000, 4),
            Pattern::from_row(0b0001, 4),
            Pattern::from_row(0b0100, 4),
            Pattern::from_row(0b0101, 4),
        ];
        let common = Pattern::common(&cells).unwrap();
        assert_eq!(common, "0-0".parse()?);
        assert!(cells.iter().all(|c| common.contains(c)));
        assert!(Pattern::common(std::iter::empty()).is_none());
        Ok(())
    }

    #[test]
    fn contained() {
        let mut p = Pattern::default();
        let mut t = Pattern::default();
        p.set(Variable(3), true);
        p.set(Variable(2), true);
        assert!(t.contains(&p));

        t.set(Variable(2), true);
        assert!(t.contains(&p));

        t.set(Variable(3), true);
        assert!(t.contains(&p));

        t.set(Variable(5), true);
        assert!(!t.contains(&p));
    }
}
