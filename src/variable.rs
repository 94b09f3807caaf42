//! Variables, sets of variables and the ordered collection of names used by an expression.

use crate::*;

use bit_set::BitSet;
use delegate::delegate;
use itertools::Itertools;
use std::fmt;
use std::iter::FromIterator;
use std::slice;

/// A Boolean variable identified by its position in a [VariableSet].
///
/// Positions follow the sorted order of the names: the first variable is the most significant
/// bit of a row index in truth tables.
#[derive(Clone, Copy, Default, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Variable(pub(crate) usize);

impl Variable {
    /// Create a new variable with a specific position
    pub fn new(uid: usize) -> Self {
        Self(uid)
    }

    /// Return the position of this variable
    pub fn uid(&self) -> usize {
        self.0
    }
}

impl From<usize> for Variable {
    fn from(uid: usize) -> Self {
        Self(uid)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}_", self.0)
    }
}

/// A set of selected variables with efficient bitwise operations.
///
/// A VarSet is an abstraction over [BitSet], providing a similar API.
///
/// ```
/// use lokit::{Variable, VarSet};
///
/// let mut vs = VarSet::default();
/// vs.insert(Variable::from(1));
/// vs.insert(Variable::from(3));
/// vs.remove(Variable::from(3));
///
/// # assert!(!vs.contains(Variable::from(0)));
/// # assert!( vs.contains(Variable::from(1)));
/// # assert!(!vs.contains(Variable::from(3)));
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct VarSet {
    pub(crate) variables: BitSet,
}

impl VarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an iterator over the contained variables
    pub fn iter(&self) -> Iter<'_> {
        self.into_iter()
    }

    pub fn insert(&mut self, var: Variable) {
        self.variables.insert(var.uid());
    }

    pub fn remove(&mut self, var: Variable) {
        self.variables.remove(var.uid());
    }

    pub fn contains(&self, var: Variable) -> bool {
        self.variables.contains(var.uid())
    }

    /// Remove all variables from the other set
    pub fn difference_with(&mut self, vars: &Self) {
        self.variables.difference_with(&vars.variables);
    }

    /// Retain only the variables also included in the other set
    pub fn intersect_with(&mut self, vars: &Self) {
        self.variables.intersect_with(&vars.variables);
    }

    /// Add all variables from the other set
    pub fn union_with(&mut self, vars: &Self) {
        self.variables.union_with(&vars.variables);
    }

    /// Return true if this set contains all variables of the other set
    pub fn contains_all(&self, other: &Self) -> bool {
        self.variables.is_superset(&other.variables)
    }

    /// Return true if the two sets have no common variable
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.variables.is_disjoint(&other.variables)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl FromIterator<Variable> for VarSet {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        let mut vs = VarSet::default();
        for v in iter {
            vs.insert(v);
        }
        vs
    }
}

/// Iterate over variables in a [VarSet]
pub struct Iter<'a>(bit_set::Iter<'a, u32>);

impl Iterator for Iter<'_> {
    type Item = Variable;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|uid| uid.into())
    }
}

impl<'a> IntoIterator for &'a VarSet {
    type Item = Variable;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.variables.iter())
    }
}

/// The ordered set of distinct variable names of an expression.
///
/// Names are sorted lexicographically and each name is associated to its position, which
/// defines the column order and the bit order of truth tables.
///
/// ```
/// use lokit::VariableSet;
///
/// let vars: VariableSet = ["B", "A", "B", "C"].into_iter().collect();
/// assert_eq!(vars.len(), 3);
/// assert_eq!(vars.name(vars.get("B").unwrap()), Some("B"));
/// assert_eq!(vars.to_string(), "A, B, C");
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct VariableSet {
    names: Vec<String>,
}

impl VariableSet {
    delegate! {
        to self.names {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
        }
    }

    /// Find the variable associated to a name
    pub fn get(&self, name: &str) -> Option<Variable> {
        self.names
            .binary_search_by(|n| n.as_str().cmp(name))
            .ok()
            .map(Variable)
    }

    /// Name of the variable at a given position
    pub fn name(&self, var: Variable) -> Option<&str> {
        self.names.get(var.uid()).map(String::as_str)
    }

    /// Iterate over the names in order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Iterate over the variables in order
    pub fn variables(&self) -> impl Iterator<Item = Variable> {
        (0..self.names.len()).map(Variable)
    }

    /// Insert the name of a variable, or write its default UID-based name if it is out of range
    pub fn format_variable(&self, f: &mut fmt::Formatter, var: Variable) -> fmt::Result {
        match self.name(var) {
            None => write!(f, "{}", var),
            Some(s) => write!(f, "{}", s),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl<'a> FromIterator<&'a str> for VariableSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let names = iter.into_iter().map(String::from).sorted().dedup().collect();
        Self { names }
    }
}

impl FromIterator<String> for VariableSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let names = iter.into_iter().sorted().dedup().collect();
        Self { names }
    }
}

impl<'a> IntoIterator for &'a VariableSet {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

impl fmt::Display for VariableSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.names.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn sorted_names() {
        let vars: VariableSet = ["D", "B", "A", "B"].into_iter().collect();
        assert_eq!(vars.len(), 3);
        assert_eq!(vars.get("A"), Some(Variable(0)));
        assert_eq!(vars.get("B"), Some(Variable(1)));
        assert_eq!(vars.get("D"), Some(Variable(2)));
        assert_eq!(vars.get("C"), None);
        assert_eq!(vars.name(Variable(2)), Some("D"));
        assert_eq!(vars.name(Variable(3)), None);
        assert_eq!(vars.variables().count(), 3);
    }

    #[test]
    fn varset_operations() {
        let a: VarSet = [0, 2, 3].into_iter().map(Variable).collect();
        let b: VarSet = [2].into_iter().map(Variable).collect();
        assert!(a.contains_all(&b));
        assert!(!b.contains_all(&a));

        let mut c = a.clone();
        c.difference_with(&b);
        assert_eq!(c.len(), 2);
        assert!(c.is_disjoint(&b));

        c.intersect_with(&b);
        assert!(c.is_empty());

        c.union_with(&a);
        assert_eq!(c, a);
        assert_eq!(c.iter().map(|v| v.uid()).collect::<Vec<_>>(), vec![0, 2, 3]);
    }
}
