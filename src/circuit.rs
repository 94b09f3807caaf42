//! Compile expressions into circuits of logic gates and simulate them.

use crate::*;

use slab::Slab;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use tracing::{debug, trace};

/// The function of a gate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    And,
    Or,
    Not,
    Xor,
    Xnor,
    Nand,
    Nor,
    /// Leaf gate carrying the value of a variable
    Input,
    /// Sink gate copying the value of the expression
    Output,
}

impl GateKind {
    /// Compute the value of a gate from the values of its inputs
    pub fn apply(&self, inputs: &[bool]) -> bool {
        let first = || inputs.first().copied().unwrap_or(false);
        let ones = || inputs.iter().filter(|b| **b).count();
        match self {
            GateKind::And => inputs.iter().all(|b| *b),
            GateKind::Or => inputs.iter().any(|b| *b),
            GateKind::Nand => !inputs.iter().all(|b| *b),
            GateKind::Nor => !inputs.iter().any(|b| *b),
            GateKind::Xor => ones() % 2 == 1,
            GateKind::Xnor => ones() % 2 == 0,
            GateKind::Not => !first(),
            GateKind::Input | GateKind::Output => first(),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Input => "INPUT",
            GateKind::Output => "OUTPUT",
        };
        write!(f, "{}", s)
    }
}

/// Coordinates of a gate in the layout
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A gate of a compiled circuit
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    /// Index of the gate in the circuit
    pub id: usize,
    pub kind: GateKind,
    /// Indices of the gates driving this gate, in operand order
    pub inputs: Vec<usize>,
    /// Column of the gate: inputs and gates reading only inputs are at level 0
    pub level: usize,
    pub position: Position,
    pub label: Option<String>,
}

/// A directed wire between two gates, given by their indices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
}

/// Operands on the stack of the circuit compiler
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Variable(String),
    Gate(usize),
}

/// A directed acyclic circuit of logic gates with a single output.
///
/// The gates start with one input per variable, in sorted order, followed by the compiled gates
/// in creation order and end with the output gate.
///
/// ```
/// use lokit::{Circuit, GateKind};
/// # use lokit::LokitError;
/// # fn main() -> Result<(), LokitError> {
///
/// let circuit = Circuit::compile("¬(A ∧ B)")?;
/// let kinds: Vec<GateKind> = circuit.gates().iter().map(|g| g.kind).collect();
/// assert_eq!(kinds, vec![GateKind::Input, GateKind::Input, GateKind::And, GateKind::Not, GateKind::Output]);
///
/// assert!(circuit.simulate(&[true, false]));
/// assert!(!circuit.simulate(&[true, true]));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Circuit {
    variables: VariableSet,
    gates: Vec<Gate>,
    connections: Vec<Connection>,
    inputs: Vec<usize>,
    output: usize,
}

/// Gates created while reducing the RPN stream, before the layout
struct PendingGate {
    kind: GateKind,
    inputs: Vec<Operand>,
}

/// Allocate one gate for each operator of an RPN stream
#[derive(Default)]
struct CircuitBuilder {
    gates: Slab<PendingGate>,
}

impl CircuitBuilder {
    fn gate(&mut self, kind: GateKind, inputs: Vec<Operand>) -> Operand {
        Operand::Gate(self.gates.insert(PendingGate { kind, inputs }))
    }
}

impl Reducer for CircuitBuilder {
    type Value = Operand;

    fn variable(&mut self, name: &str) -> Result<Operand, LokitError> {
        Ok(Operand::Variable(name.to_string()))
    }

    fn constant(&mut self, _value: bool) -> Result<Operand, LokitError> {
        Err(LokitError::InvalidToken)
    }

    fn negate(&mut self, operand: Operand) -> Result<Operand, LokitError> {
        Ok(self.gate(GateKind::Not, vec![operand]))
    }

    fn combine(&mut self, op: Operator, left: Operand, right: Operand) -> Result<Operand, LokitError> {
        let kind = match op {
            Operator::And => GateKind::And,
            Operator::Or => GateKind::Or,
            Operator::Xor => GateKind::Xor,
            Operator::Nand => GateKind::Nand,
            Operator::Nor => GateKind::Nor,
            Operator::Iff => GateKind::Xnor,
            Operator::Implies => {
                let negated = self.gate(GateKind::Not, vec![left]);
                return Ok(self.gate(GateKind::Or, vec![negated, right]));
            }
            Operator::Not => return Err(LokitError::InvalidExpression),
        };
        Ok(self.gate(kind, vec![left, right]))
    }

    fn finish(&mut self, value: Operand) -> Result<Operand, LokitError> {
        match value {
            Operand::Variable(_) => Err(LokitError::InvalidExpression),
            Operand::Gate(_) => Ok(value),
        }
    }
}

impl Circuit {
    /// Parse and compile an expression with the default layout
    pub fn compile(expression: &str) -> Result<Self, LokitError> {
        Self::from_rpn(&Rpn::parse(expression)?, &LayoutConfig::default())
    }

    /// Compile a parsed expression.
    ///
    /// Fails with [LokitError::InvalidExpression] if the expression is a single variable or if
    /// operands are missing, and with [LokitError::InvalidToken] if it contains constants.
    pub fn from_rpn(rpn: &Rpn, layout: &LayoutConfig) -> Result<Self, LokitError> {
        let mut builder = CircuitBuilder::default();
        let root = match reduce(rpn, &mut builder)? {
            Operand::Gate(id) => id,
            Operand::Variable(_) => return Err(LokitError::InvalidExpression),
        };

        let variables = rpn.variables();
        let offset = variables.len();
        let mut gates: Vec<Gate> = variables
            .iter()
            .enumerate()
            .map(|(i, name)| Gate {
                id: i,
                kind: GateKind::Input,
                inputs: vec![],
                level: 0,
                position: Position {
                    x: layout.start_x,
                    y: layout.start_y + i as f64 * layout.input_spacing,
                },
                label: Some(name.to_string()),
            })
            .collect();

        // Slab keys are allocated in creation order: inputs of a gate always come first
        let mut columns: Vec<Vec<usize>> = vec![];
        for (key, pending) in &builder.gates {
            let idx = offset + key;
            let mut inputs = Vec::with_capacity(pending.inputs.len());
            let mut level = 0;
            for operand in &pending.inputs {
                match operand {
                    Operand::Variable(name) => {
                        let var = variables.get(name).ok_or(LokitError::InvalidExpression)?;
                        inputs.push(var.uid());
                    }
                    Operand::Gate(id) => {
                        let src = offset + id;
                        level = level.max(gates[src].level + 1);
                        inputs.push(src);
                    }
                }
            }
            if columns.len() <= level {
                columns.resize(level + 1, vec![]);
            }
            let row = columns[level].len();
            columns[level].push(idx);
            gates.push(Gate {
                id: idx,
                kind: pending.kind,
                inputs,
                level,
                position: Position {
                    x: layout.start_x + (level + 1) as f64 * layout.horizontal_spacing,
                    y: layout.start_y + row as f64 * layout.vertical_spacing,
                },
                label: None,
            });
        }

        let max_level = columns.len() - 1;
        let last_column = columns.last().map(|c| c.len()).unwrap_or(0);
        let output = gates.len();
        gates.push(Gate {
            id: output,
            kind: GateKind::Output,
            inputs: vec![offset + root],
            level: max_level + 1,
            position: Position {
                x: layout.start_x + (max_level + 2) as f64 * layout.horizontal_spacing,
                y: layout.start_y + last_column as f64 * layout.vertical_spacing / 2.0,
            },
            label: Some("OUT".to_string()),
        });

        let connections: Vec<Connection> = gates
            .iter()
            .flat_map(|g| g.inputs.iter().map(move |from| Connection { from: *from, to: g.id }))
            .collect();

        debug!(
            "Compiled circuit: {} inputs, {} gates, {} connections, {} levels",
            offset,
            gates.len() - offset - 1,
            connections.len(),
            max_level + 1
        );
        Ok(Self {
            inputs: (0..offset).collect(),
            variables,
            gates,
            connections,
            output,
        })
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn gate(&self, idx: usize) -> Option<&Gate> {
        self.gates.get(idx)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Indices of the input gates, in the order of the variables
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    /// Index of the output gate
    pub fn output(&self) -> usize {
        self.output
    }

    /// Names of the variables associated to the inputs
    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    /// Order the gates such that each gate comes after all the gates driving it.
    ///
    /// Among the gates which are ready, the smallest index is always taken first.
    pub fn topological_order(&self) -> Vec<usize> {
        let mut degree = vec![0usize; self.gates.len()];
        let mut successors = vec![vec![]; self.gates.len()];
        for c in &self.connections {
            degree[c.to] += 1;
            successors[c.from].push(c.to);
        }

        let mut ready: BinaryHeap<Reverse<usize>> = degree
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();
        let mut order = Vec::with_capacity(self.gates.len());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(idx);
            for next in &successors[idx] {
                degree[*next] -= 1;
                if degree[*next] == 0 {
                    ready.push(Reverse(*next));
                }
            }
        }
        order
    }

    /// Propagate input values through the circuit.
    ///
    /// Values are given in the order of the variables, missing values are false.
    pub fn simulate(&self, inputs: &[bool]) -> bool {
        let mut drivers = vec![vec![]; self.gates.len()];
        for c in &self.connections {
            drivers[c.to].push(c.from);
        }

        let mut values = vec![false; self.gates.len()];
        for idx in self.topological_order() {
            let gate = &self.gates[idx];
            values[idx] = match gate.kind {
                GateKind::Input => inputs.get(idx).copied().unwrap_or(false),
                kind => {
                    let driven: Vec<bool> = drivers[idx].iter().map(|d| values[*d]).collect();
                    kind.apply(&driven)
                }
            };
            trace!("{} {} = {}", gate.kind, idx, values[idx]);
        }
        values[self.output]
    }

    /// Simulate the circuit with values given by name, unbound variables are false
    pub fn simulate_with(&self, valuation: &impl Valuation) -> bool {
        let inputs: Vec<bool> = self
            .variables
            .iter()
            .map(|name| valuation.value(name).unwrap_or(false))
            .collect();
        self.simulate(&inputs)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::collections::HashMap;

    #[test]
    fn structure() -> Result<(), LokitError> {
        let c = Circuit::compile("(A ∧ B) ∨ ¬A")?;
        // 2 inputs, AND, NOT, OR, OUTPUT
        assert_eq!(c.gates().len(), 6);
        assert_eq!(c.inputs(), &[0, 1]);
        assert_eq!(c.output(), 5);

        let out = c.gate(c.output()).unwrap();
        assert_eq!(out.kind, GateKind::Output);
        assert_eq!(out.inputs, vec![4]);
        assert_eq!(out.label.as_deref(), Some("OUT"));

        // the variable A feeds both the AND and the NOT gates through a single input
        let from_a: Vec<usize> = c.connections().iter().filter(|w| w.from == 0).map(|w| w.to).collect();
        assert_eq!(from_a, vec![2, 3]);
        assert_eq!(c.gates().iter().filter(|g| g.kind == GateKind::Output).count(), 1);
        Ok(())
    }

    #[test]
    fn levels_and_layout() -> Result<(), LokitError> {
        let c = Circuit::compile("(A ∧ B) ∨ ¬A")?;
        let levels: Vec<usize> = c.gates().iter().map(|g| g.level).collect();
        assert_eq!(levels, vec![0, 0, 0, 0, 1, 2]);

        let g = c.gates();
        assert_eq!(g[1].position, Position { x: 100.0, y: 230.0 });
        assert_eq!(g[2].position, Position { x: 250.0, y: 150.0 });
        assert_eq!(g[3].position, Position { x: 250.0, y: 250.0 });
        assert_eq!(g[4].position, Position { x: 400.0, y: 150.0 });
        // after the last level, centered on its single gate
        assert_eq!(g[5].position, Position { x: 550.0, y: 200.0 });
        Ok(())
    }

    #[test]
    fn derived_operators() -> Result<(), LokitError> {
        let c = Circuit::compile("A → B")?;
        let kinds: Vec<GateKind> = c.gates().iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![GateKind::Input, GateKind::Input, GateKind::Not, GateKind::Or, GateKind::Output]
        );
        assert!(!c.simulate(&[true, false]));
        assert!(c.simulate(&[false, false]));

        let c = Circuit::compile("A ↔ B")?;
        assert_eq!(c.gates()[2].kind, GateKind::Xnor);
        assert!(c.simulate(&[true, true]));
        assert!(!c.simulate(&[false, true]));
        Ok(())
    }

    #[test]
    fn compile_errors() -> Result<(), LokitError> {
        assert_eq!(Circuit::compile("A"), Err(LokitError::InvalidExpression));
        assert_eq!(Circuit::compile("A ∧ ∧ B"), Err(LokitError::InvalidExpression));
        assert_eq!(Circuit::compile("A B ∧ C"), Err(LokitError::InvalidExpression));
        assert_eq!(Circuit::compile("A ∧ 1"), Err(LokitError::InvalidToken));
        assert_eq!(Circuit::compile("(A ∧ B"), Err(LokitError::MismatchedParentheses));
        Ok(())
    }

    #[test]
    fn simulation_matches_evaluation() -> Result<(), LokitError> {
        let s = "(A ⊼ B) ⊕ (C ⊽ ¬A) ∨ (B → C) ↔ A";
        let c = Circuit::compile(s)?;
        let rpn = Rpn::parse(s)?;
        let vars = rpn.variables();
        for row in 0..8 {
            let state = State::from_row(row, 3);
            let inputs = state.values(&vars);
            let expected = Evaluator::new(state.named(&vars)).eval(&rpn)?;
            assert_eq!(c.simulate(&inputs), expected, "row {}", row);
        }

        // missing inputs are false
        let c = Circuit::compile("¬A ∧ ¬B")?;
        assert!(c.simulate(&[]));
        let values: HashMap<&str, bool> = [("B", true)].into_iter().collect();
        assert!(!c.simulate_with(&values));
        Ok(())
    }

    #[test]
    fn topological_order() -> Result<(), LokitError> {
        let c = Circuit::compile("¬(A ∨ B) ∧ ¬C")?;
        let order = c.topological_order();
        assert_eq!(order.len(), c.gates().len());
        let rank = |idx: usize| order.iter().position(|i| *i == idx).unwrap();
        for w in c.connections() {
            assert!(rank(w.from) < rank(w.to));
        }
        assert_eq!(order[..3], [0, 1, 2]);
        Ok(())
    }
}
