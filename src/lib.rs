//! Parse, evaluate and analyse propositional expressions.
//!
//! Expressions combine named variables and the constants `0` and `1` with Boolean operators.
//! Each operator can be written with a Unicode glyph or with an ASCII spelling, both forms
//! can be mixed in the same expression:
//!
//! | operator    | glyph | ASCII     | precedence |
//! |-------------|-------|-----------|------------|
//! | NOT         | `¬`   | `~` `!`   | 4          |
//! | AND, NAND   | `∧` `⊼` | `&` `!&` | 3        |
//! | OR, NOR, XOR | `∨` `⊽` `⊕` | <code>&#124;</code> <code>!&#124;</code> `^` | 2 |
//! | IMPLIES     | `→`   | `->`      | 1          |
//! | IFF         | `↔`   | `<->`     | 0          |
//!
//! Expressions are [tokenized](tokenize) and converted into [reverse polish notation](Rpn) by a
//! shunting-yard parser. The RPN stream is then [reduced](reduce) into a Boolean value by the
//! [Evaluator], into an [expression tree](Expr) or into a [circuit of logic gates](Circuit).
//!
//! ```
//! use lokit::{evaluate, LokitError};
//! use std::collections::HashMap;
//! # fn main() -> Result<(), LokitError> {
//!
//! let mut values = HashMap::new();
//! values.insert("A", true);
//! values.insert("B", false);
//!
//! assert!(evaluate("A ∧ ¬B", &values)?);
//! assert!(evaluate("A & ~B", &values)?);
//!
//! // Unbound variables are false
//! assert!(!evaluate("A ∧ C", &values)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Truth tables and canonical forms
//!
//! A [truth table](TruthTable) enumerates all assignments of the [sorted variables](VariableSet) of an
//! expression, the first variable being the most significant bit of the row index. Rows where the
//! expression is true are the minterms, the others are the maxterms. Canonical forms are built
//! from lists of [patterns](Pattern) fixing all variables.
//!
//! ```
//! use lokit::{build_truth_table, Classification};
//! # use lokit::LokitError;
//! # fn main() -> Result<(), LokitError> {
//!
//! let table = build_truth_table("A ⊼ B")?;
//! assert_eq!(table.minterms(), &[0, 1, 2]);
//! assert_eq!(table.maxterms(), &[3]);
//! assert_eq!(table.pos().to_string(), "(¬A ∨ ¬B)");
//!
//! assert_eq!(build_truth_table("A ∨ ¬A")?.classification(), Classification::Tautology);
//! # Ok(())
//! # }
//! ```
//!
//! # Minimization and Karnaugh maps
//!
//! The [Minimizer] lists candidate forms of an expression: both canonical forms, the result
//! of the absorption and De Morgan theorems when they apply, and the terms of the groups found
//! on the [Karnaugh map](KarnaughMap) of the table.
//!
//! ```
//! use lokit::{build_truth_table, minimize, Method};
//! # use lokit::LokitError;
//! # fn main() -> Result<(), LokitError> {
//!
//! let table = build_truth_table("¬(A ∨ B)")?;
//! let candidates = minimize("¬(A ∨ B)", &table);
//!
//! let de_morgan = candidates.iter().find(|c| c.method == Method::DeMorgan).unwrap();
//! assert_eq!(de_morgan.expression, "¬A ∧ ¬B");
//! # Ok(())
//! # }
//! ```
//!
//! # Circuits
//!
//! ```
//! use lokit::{compile_circuit, simulate};
//! # use lokit::LokitError;
//! # fn main() -> Result<(), LokitError> {
//!
//! let circuit = compile_circuit("(A ∧ B) ⊕ C")?;
//! assert_eq!(circuit.inputs().len(), 3);
//! assert!(simulate(&circuit, &[true, true, false]));
//! assert!(!simulate(&circuit, &[true, true, true]));
//! # Ok(())
//! # }
//! ```

mod circuit;
mod config;
pub mod efmt;
mod error;
mod eval;
mod expr;
mod karnaugh;
mod minimize;
mod parse;
mod pattern;
mod proposition;
mod reduce;
mod states;
mod table;
mod token;
pub mod tools;
mod variable;

use tracing::debug;

// Export public structures and API
pub use circuit::{Circuit, Connection, Gate, GateKind, Operand, Position};
pub use config::{EngineConfig, LayoutConfig, DEFAULT_MAX_VARIABLES, MAX_EXPRESSION_DEPTH};
pub use error::LokitError;
pub use eval::{Evaluator, Valuation};
pub use expr::Expr;
pub use karnaugh::{CellPosition, KarnaughGroup, KarnaughMap};
pub use minimize::{absorption, de_morgan, Method, MinimizedExpression, Minimizer, Theorem};
pub use parse::Rpn;
pub use pattern::{NamedPattern, Pattern};
pub use proposition::{Analysis, PropositionKind};
pub use reduce::{reduce, Reducer};
pub use states::{Assignment, State};
pub use table::{CanonicalForm, CanonicalKind, Classification, TruthTable, TruthTableRow};
pub use token::{normalize, tokenize, Bracket, Operator, Parenthesis, Token};
pub use variable::{VarSet, Variable, VariableSet};

/// Run all operations with a shared configuration.
///
/// Each call runs the full pipeline from the expression text and returns a new result:
/// nothing is cached between calls.
///
/// ```
/// use lokit::{Engine, EngineConfig, LokitError, efmt::ASCII_FMT_CFG};
/// use std::collections::HashMap;
/// # fn main() -> Result<(), LokitError> {
///
/// let engine = Engine::new(
///     EngineConfig::default()
///         .with_strict_variables(true)
///         .with_formatter(&ASCII_FMT_CFG),
/// );
///
/// let values: HashMap<&str, bool> = [("A", true)].into_iter().collect();
/// let err = engine.evaluate("A ∧ B", &values).unwrap_err();
/// assert!(err.is_undefined_variable());
///
/// let table = engine.build_truth_table("A ∧ B")?;
/// assert_eq!(engine.minimize("A ∧ B", &table)[0].expression, "A & B");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate an expression with the given values
    pub fn evaluate(&self, expression: &str, assignment: &impl Valuation) -> Result<bool, LokitError> {
        let rpn = Rpn::parse(expression)?;
        Evaluator::with_strict(assignment, self.config.strict_variables).eval(&rpn)
    }

    /// Build the truth table of an expression
    pub fn build_truth_table(&self, expression: &str) -> Result<TruthTable, LokitError> {
        TruthTable::from_rpn(&Rpn::parse(expression)?, self.config.max_variables)
    }

    /// List candidate simplified forms of an expression and its truth table.
    ///
    /// The theorems are skipped if the expression can not be parsed.
    pub fn minimize(&self, expression: &str, table: &TruthTable) -> Vec<MinimizedExpression> {
        let expr = match Expr::parse(expression) {
            Ok(expr) => Some(expr),
            Err(e) => {
                debug!("Skipping theorems for '{}': {}", expression, e);
                None
            }
        };
        Minimizer::with(self.config.formatter).minimize(expr.as_ref(), table)
    }

    /// Lay out a truth table over 2 to 5 variables on a Karnaugh map
    pub fn build_karnaugh_map(&self, variables: &VariableSet, table: &TruthTable) -> Option<KarnaughMap> {
        KarnaughMap::new(variables, table)
    }

    /// Compile an expression into a circuit of logic gates
    pub fn compile_circuit(&self, expression: &str) -> Result<Circuit, LokitError> {
        Circuit::from_rpn(&Rpn::parse(expression)?, &self.config.layout)
    }

    /// Propagate input values, given in the order of the variables, through a circuit
    pub fn simulate(&self, circuit: &Circuit, inputs: &[bool]) -> bool {
        circuit.simulate(inputs)
    }

    /// Identify the kind of an expression and classify it over its truth table
    pub fn analyze(&self, expression: &str) -> Result<Analysis, LokitError> {
        let expr = Expr::parse(expression)?;
        let table = self.build_truth_table(expression)?;
        Ok(Analysis::new(&expr, &table))
    }
}

/// Evaluate an expression, unbound variables are false
pub fn evaluate(expression: &str, assignment: &impl Valuation) -> Result<bool, LokitError> {
    Engine::default().evaluate(expression, assignment)
}

/// Build the truth table of an expression using at most [DEFAULT_MAX_VARIABLES] variables
pub fn build_truth_table(expression: &str) -> Result<TruthTable, LokitError> {
    Engine::default().build_truth_table(expression)
}

/// List candidate simplified forms, see [Minimizer]
pub fn minimize(expression: &str, table: &TruthTable) -> Vec<MinimizedExpression> {
    Engine::default().minimize(expression, table)
}

/// Lay out a truth table on a Karnaugh map, None outside of 2 to 5 variables
pub fn build_karnaugh_map(variables: &VariableSet, table: &TruthTable) -> Option<KarnaughMap> {
    KarnaughMap::new(variables, table)
}

/// Compile an expression into a circuit with the default layout
pub fn compile_circuit(expression: &str) -> Result<Circuit, LokitError> {
    Engine::default().compile_circuit(expression)
}

/// Propagate input values through a circuit, missing inputs are false
pub fn simulate(circuit: &Circuit, inputs: &[bool]) -> bool {
    circuit.simulate(inputs)
}

/// Kind and classification of an expression
pub fn analyze(expression: &str) -> Result<Analysis, LokitError> {
    Engine::default().analyze(expression)
}
