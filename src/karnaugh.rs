//! Karnaugh maps and a limited detection of groups of adjacent ones.
//!
//! The grouping is a heuristic: it looks for the 2×2 block at the origin of the map, for
//! horizontal and vertical pairs of adjacent cells without wraparound and, in maps over 5
//! variables, for pairs of corresponding cells in the two layers. It is not a complete cover
//! by prime implicants.

use crate::tools::{bit_label, gray_code};
use crate::*;

use itertools::Itertools;
use std::fmt;
use tracing::debug;

/// Position of a cell in a Karnaugh map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPosition {
    pub layer: usize,
    pub row: usize,
    pub column: usize,
}

impl CellPosition {
    pub fn new(layer: usize, row: usize, column: usize) -> Self {
        Self { layer, row, column }
    }
}

/// A group of true cells covered by a single product term
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KarnaughGroup {
    pub cells: Vec<CellPosition>,
    pub is_prime_implicant: bool,
    /// Literals shared by all cells of the group
    pub pattern: Pattern,
    /// The pattern written as a product term
    pub term: String,
}

/// A truth table laid out on a grid with Gray coded rows and columns.
///
/// | variables | rows | columns | layers |
/// |-----------|------|---------|--------|
/// | 2         | A    | B       | 1      |
/// | 3         | A    | BC      | 1      |
/// | 4         | AB   | CD      | 1      |
/// | 5         | AB   | CD      | E      |
///
/// ```
/// use lokit::{KarnaughMap, TruthTable};
/// # use lokit::LokitError;
/// # fn main() -> Result<(), LokitError> {
///
/// let table = TruthTable::build("¬A ∧ ¬B ∧ (C ∨ ¬C)")?;
/// let map = KarnaughMap::new(table.variables(), &table).unwrap();
/// assert_eq!(map.column_labels(), vec!["00", "01", "11", "10"]);
/// assert_eq!(map.grid()[0], vec![true, true, false, false]);
/// assert_eq!(map.groups()[0].term, "¬A ∧ ¬B");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KarnaughMap {
    variables: VariableSet,
    row_bits: usize,
    column_bits: usize,
    layer_bits: usize,
    layers: Vec<Vec<Vec<bool>>>,
    groups: Vec<KarnaughGroup>,
}

impl KarnaughMap {
    /// Lay out a truth table over the given variables.
    ///
    /// Returns None for less than 2 or more than 5 variables, or if the size of
    /// the table does not match the number of variables.
    pub fn new(variables: &VariableSet, table: &TruthTable) -> Option<Self> {
        let count = variables.len();
        let (row_bits, column_bits, layer_bits) = match count {
            2 => (1, 1, 0),
            3 => (1, 2, 0),
            4 => (2, 2, 0),
            5 => (2, 2, 1),
            _ => return None,
        };
        if table.len() != 1 << count {
            return None;
        }

        let mut map = Self {
            variables: variables.clone(),
            row_bits,
            column_bits,
            layer_bits,
            layers: vec![],
            groups: vec![],
        };
        map.layers = (0..1 << layer_bits)
            .map(|layer| {
                (0..1 << row_bits)
                    .map(|row| {
                        (0..1 << column_bits)
                            .map(|column| {
                                let idx = map.index_of(CellPosition::new(layer, row, column));
                                table.output(idx).unwrap_or(false)
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect();
        map.find_groups();

        debug!(
            "Karnaugh map over {} variables: {} groups",
            count,
            map.groups.len()
        );
        Some(map)
    }

    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    /// Names of the variables selecting the row
    pub fn row_variables(&self) -> &[String] {
        &self.variables.as_slice()[..self.row_bits]
    }

    /// Names of the variables selecting the column
    pub fn column_variables(&self) -> &[String] {
        &self.variables.as_slice()[self.row_bits..self.row_bits + self.column_bits]
    }

    /// Name of the variable selecting the layer, if any
    pub fn layer_variable(&self) -> Option<&str> {
        match self.layer_bits {
            0 => None,
            _ => self.variables.as_slice().last().map(String::as_str),
        }
    }

    pub fn row_labels(&self) -> Vec<String> {
        gray_code(self.row_bits)
            .into_iter()
            .map(|g| bit_label(g, self.row_bits))
            .collect()
    }

    pub fn column_labels(&self) -> Vec<String> {
        gray_code(self.column_bits)
            .into_iter()
            .map(|g| bit_label(g, self.column_bits))
            .collect()
    }

    /// The first layer, which is the whole map below 5 variables
    pub fn grid(&self) -> &[Vec<bool>] {
        &self.layers[0]
    }

    pub fn layers(&self) -> &[Vec<Vec<bool>>] {
        &self.layers
    }

    pub fn groups(&self) -> &[KarnaughGroup] {
        &self.groups
    }

    /// Test if a cell is true, cells outside of the map are false
    pub fn cell(&self, pos: CellPosition) -> bool {
        self.layers
            .get(pos.layer)
            .and_then(|l| l.get(pos.row))
            .and_then(|r| r.get(pos.column))
            .copied()
            .unwrap_or(false)
    }

    /// Index of the truth table row displayed in a cell
    pub fn index_of(&self, pos: CellPosition) -> usize {
        let row = pos.row ^ (pos.row >> 1);
        let column = pos.column ^ (pos.column >> 1);
        (row << (self.column_bits + self.layer_bits)) | (column << self.layer_bits) | pos.layer
    }

    fn pattern_of(&self, pos: CellPosition) -> Pattern {
        Pattern::from_row(self.index_of(pos), self.variables.len())
    }

    fn group(&self, cells: Vec<CellPosition>, is_prime_implicant: bool) -> KarnaughGroup {
        let pattern =
            Pattern::common(&cells.iter().map(|c| self.pattern_of(*c)).collect_vec())
                .unwrap_or_default();
        let term = pattern.named(&self.variables, true).to_string();
        KarnaughGroup {
            cells,
            is_prime_implicant,
            pattern,
            term,
        }
    }

    fn find_groups(&mut self) {
        let rows = 1 << self.row_bits;
        let columns = 1 << self.column_bits;
        let first = |row, column| CellPosition::new(0, row, column);
        let mut groups = vec![];

        let block = [first(0, 0), first(0, 1), first(1, 0), first(1, 1)];
        let has_block = block.iter().all(|c| self.cell(*c));
        if has_block {
            groups.push(self.group(block.to_vec(), true));
        }
        let in_block = |c: &CellPosition| has_block && c.row < 2 && c.column < 2;

        let horizontal = (0..rows)
            .cartesian_product(0..columns - 1)
            .map(|(r, c)| [first(r, c), first(r, c + 1)]);
        let vertical = (0..columns)
            .cartesian_product(0..rows - 1)
            .map(|(c, r)| [first(r, c), first(r + 1, c)]);
        for pair in horizontal.chain(vertical) {
            if pair.iter().all(|c| self.cell(*c)) && !pair.iter().all(|c| in_block(c)) {
                groups.push(self.group(pair.to_vec(), true));
            }
        }

        if self.layer_bits > 0 {
            for (r, c) in (0..rows).cartesian_product(0..columns) {
                let pair = [CellPosition::new(0, r, c), CellPosition::new(1, r, c)];
                if pair.iter().all(|c| self.cell(*c)) {
                    groups.push(self.group(pair.to_vec(), false));
                }
            }
        }

        self.groups = groups;
    }
}

impl fmt::Display for KarnaughMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows = self.row_variables().join("");
        let columns = self.column_variables().join("");
        let width = rows.chars().count().max(self.row_bits);
        for (l, layer) in self.layers.iter().enumerate() {
            if let Some(name) = self.layer_variable() {
                writeln!(f, "{}={}", name, l)?;
            }
            writeln!(
                f,
                "{:>w$}\\{} {}",
                rows,
                columns,
                self.column_labels().join(" "),
                w = width
            )?;
            for (label, row) in self.row_labels().iter().zip(layer) {
                let cells = row
                    .iter()
                    .map(|b| format!("{:>w$}", *b as u8, w = self.column_bits))
                    .join(" ");
                writeln!(
                    f,
                    "{:>w$} {:>c$} {}",
                    label,
                    "",
                    cells,
                    w = width,
                    c = columns.chars().count()
                )?;
            }
        }
        Ok(())
    }
}
