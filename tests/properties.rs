//! Property-based tests for the expression pipeline
//!
//! Random expressions are checked against their truth table: canonical forms, rewritten
//! candidates and compiled circuits must agree with direct evaluation on every row.

use proptest::prelude::*;
use std::collections::HashMap;

use lokit::*;

// ============================================================================
// Helper functions
// ============================================================================

const BINARY: &[&str] = &[
    "∧", "∨", "⊕", "⊼", "⊽", "→", "↔", "&", "|", "^", "!&", "!|", "->", "<->",
];

/// Random expressions over the variables A to E, mixing glyphs and ASCII operators
fn arb_expression() -> impl Strategy<Value = String> {
    let leaf = prop::sample::select(vec!["A", "B", "C", "D", "E"]).prop_map(String::from);
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| format!("¬({})", e)),
            inner.clone().prop_map(|e| format!("~{}", e)),
            (inner.clone(), prop::sample::select(BINARY.to_vec()), inner)
                .prop_map(|(a, op, b)| format!("({}) {} ({})", a, op, b)),
        ]
    })
}

fn row_values(table: &TruthTable, row: &TruthTableRow) -> HashMap<String, bool> {
    row.state.named(table.variables()).to_map()
}

// ============================================================================
// Truth table properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_rows_match_evaluation(expression in arb_expression()) {
        let table = build_truth_table(&expression).unwrap();
        prop_assert_eq!(table.len(), 1 << table.variables().len());
        for (idx, row) in table.rows().iter().enumerate() {
            prop_assert_eq!(row.index, idx);
            let values = row_values(&table, row);
            prop_assert_eq!(evaluate(&expression, &values).unwrap(), row.output);
        }
    }

    #[test]
    fn prop_minterms_and_maxterms_partition_rows(expression in arb_expression()) {
        let table = build_truth_table(&expression).unwrap();
        let mut all: Vec<usize> = table.minterms().iter().chain(table.maxterms()).copied().collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..table.len()).collect::<Vec<_>>());

        for idx in table.minterms() {
            prop_assert_eq!(table.output(*idx), Some(true));
        }
        for idx in table.maxterms() {
            prop_assert_eq!(table.output(*idx), Some(false));
        }
    }

    #[test]
    fn prop_canonical_forms_are_equivalent(expression in arb_expression()) {
        let table = build_truth_table(&expression).unwrap();
        let sop = table.sop().to_string();
        let pos = table.pos().to_string();
        for row in table.rows() {
            let values = row_values(&table, row);
            prop_assert_eq!(evaluate(&sop, &values).unwrap(), row.output, "{}", sop);
            prop_assert_eq!(evaluate(&pos, &values).unwrap(), row.output, "{}", pos);
            prop_assert_eq!(table.sop().eval(&row.state), row.output);
            prop_assert_eq!(table.pos().eval(&row.state), row.output);
        }
    }

    #[test]
    fn prop_candidates_are_sound(expression in arb_expression()) {
        let table = build_truth_table(&expression).unwrap();
        for candidate in minimize(&expression, &table) {
            for row in table.rows() {
                let values = row_values(&table, row);
                let value = evaluate(&candidate.expression, &values).unwrap();
                if candidate.method == Method::Karnaugh {
                    // the groups may not cover all minterms, but they never cover a maxterm
                    prop_assert!(!value || row.output, "{}", candidate.expression);
                } else {
                    prop_assert_eq!(value, row.output, "{}", candidate.expression);
                }
            }
        }
    }

    #[test]
    fn prop_circuit_matches_evaluation(expression in arb_expression()) {
        let table = build_truth_table(&expression).unwrap();
        match compile_circuit(&expression) {
            Ok(circuit) => {
                prop_assert_eq!(circuit.variables(), table.variables());
                for row in table.rows() {
                    let inputs = row.state.values(table.variables());
                    prop_assert_eq!(simulate(&circuit, &inputs), row.output);
                }
            }
            Err(e) => {
                // only a lone variable has no gate to connect to the output
                prop_assert_eq!(e, LokitError::InvalidExpression);
                prop_assert!(Expr::parse(&expression).unwrap().as_variable().is_some());
            }
        }
    }

    #[test]
    fn prop_display_is_reparsed(expression in arb_expression()) {
        // associative chains may be regrouped, the function stays the same
        let displayed = Expr::parse(&expression).unwrap().to_string();
        let table = build_truth_table(&expression).unwrap();
        let reparsed = build_truth_table(&displayed).unwrap();
        prop_assert_eq!(reparsed.variables(), table.variables());
        prop_assert_eq!(reparsed.minterms(), table.minterms(), "{}", displayed);
    }
}

// ============================================================================
// Fixed scenarios
// ============================================================================

#[test]
fn nand_table() -> Result<(), LokitError> {
    let table = build_truth_table("A ⊼ B")?;
    assert_eq!(table.minterms(), &[0, 1, 2]);
    assert_eq!(table.maxterms(), &[3]);
    assert_eq!(table.sop().to_string(), "¬A ∧ ¬B ∨ ¬A ∧ B ∨ A ∧ ¬B");
    assert_eq!(table.pos().to_string(), "(¬A ∨ ¬B)");
    Ok(())
}

#[test]
fn implication_and_equivalence() -> Result<(), LokitError> {
    assert_eq!(build_truth_table("A → B")?.minterms(), &[0, 1, 3]);
    assert_eq!(build_truth_table("A <-> B")?.minterms(), &[0, 3]);

    // implication is right-associative
    let chained = build_truth_table("A → B → C")?;
    assert_eq!(chained.minterms(), build_truth_table("A → (B → C)")?.minterms());
    assert_ne!(chained.minterms(), build_truth_table("(A → B) → C")?.minterms());
    Ok(())
}

#[test]
fn precedence() -> Result<(), LokitError> {
    let values: HashMap<&str, bool> = [("A", true), ("B", false), ("C", false)].into_iter().collect();
    assert!(evaluate("A ∨ B ∧ C", &values)?);
    assert!(!evaluate("(A ∨ B) ∧ C", &values)?);
    assert!(evaluate("¬B ∧ A", &values)?);
    assert!(evaluate("A → B ↔ C", &values)?);
    Ok(())
}

#[test]
fn classification() -> Result<(), LokitError> {
    assert!(build_truth_table("P ∨ ¬P")?.is_tautology());
    assert!(build_truth_table("P ∧ ¬P")?.is_contradiction());
    assert_eq!(analyze("P → Q")?.classification, Classification::Contingent);
    assert_eq!(analyze("¬(P ∨ Q) ↔ ¬P ∧ ¬Q")?.to_string(), "Equivalence (Tautology)");
    Ok(())
}

#[test]
fn de_morgan_candidates() -> Result<(), LokitError> {
    let expression = "¬(A ∧ B)";
    let candidates = minimize(expression, &build_truth_table(expression)?);
    let rewritten = candidates
        .iter()
        .find(|c| c.method == Method::DeMorgan)
        .map(|c| c.expression.as_str());
    assert_eq!(rewritten, Some("¬A ∨ ¬B"));
    Ok(())
}

#[test]
fn syntax_errors() {
    assert_eq!(build_truth_table("(A ∧ B").unwrap_err(), LokitError::MismatchedParentheses);
    assert_eq!(build_truth_table("A ∧ B)").unwrap_err(), LokitError::MismatchedParentheses);
    assert_eq!(build_truth_table("[A ∧ B)").unwrap_err(), LokitError::MismatchedParentheses);
    assert_eq!(build_truth_table("A ∧ ∧ B").unwrap_err(), LokitError::InvalidExpression);
    assert_eq!(
        build_truth_table("A $ B").unwrap_err(),
        LokitError::MalformedToken { found: '$', position: 2 }
    );
    assert_eq!(
        build_truth_table("A ∧ B ∧ C ∧ D ∧ E ∧ F").unwrap_err(),
        LokitError::TooManyVariables { count: 6, max: 5 }
    );
}

#[test]
fn deep_nesting_is_reported() -> Result<(), LokitError> {
    let expression = format!("{}A", "¬".repeat(5000));
    let table = build_truth_table(&expression)?;
    assert_eq!(table.minterms(), &[1]);

    // the theorems are skipped, the table based candidates remain
    let candidates = minimize(&expression, &table);
    assert!(candidates.iter().all(|c| c.theorem.is_none()));
    assert_eq!(candidates[0].expression, "A");

    assert_eq!(
        analyze(&expression).unwrap_err(),
        LokitError::TooDeep { max: MAX_EXPRESSION_DEPTH }
    );
    Ok(())
}

#[test]
fn configured_engine()-> Result<(), LokitError> {
    let engine = Engine::new(EngineConfig::default().with_max_variables(6).with_strict_variables(true));
    assert_eq!(engine.build_truth_table("A ∧ B ∧ C ∧ D ∧ E ∧ F")?.len(), 64);

    let values: HashMap<&str, bool> = [("A", true)].into_iter().collect();
    assert_eq!(
        engine.evaluate("A ∨ B", &values).unwrap_err(),
        LokitError::UndefinedVariable("B".into())
    );
    Ok(())
}

#[test]
fn karnaugh_map_of_table() -> Result<(), LokitError> {
    let table = build_truth_table("A ∧ B ∨ C")?;
    let map = build_karnaugh_map(table.variables(), &table).unwrap();
    assert_eq!(map.row_variables(), &["A"]);
    assert_eq!(map.column_variables(), &["B", "C"]);

    let single = build_truth_table("A ∨ 0")?;
    assert!(build_karnaugh_map(single.variables(), &single).is_none());
    Ok(())
}
