use lokit::*;

fn main() -> Result<(), LokitError> {
    println!("A simple example!");

    let expression = "(P → Q) ∧ ¬(Q ∧ R)";
    let table = build_truth_table(expression)?;
    println!("{}", table);
    println!("SOP: {}", table.sop());
    println!("POS: {}", table.pos());

    for candidate in minimize(expression, &table) {
        println!("{}: {}", candidate.method, candidate.expression);
        for step in &candidate.steps {
            println!("    {}", step);
        }
    }

    if let Some(map) = build_karnaugh_map(table.variables(), &table) {
        println!("{}", map);
    }

    let circuit = compile_circuit(expression)?;
    for gate in circuit.gates() {
        println!(
            "{:>2} {:<6} {:?} at ({}, {})",
            gate.id, gate.kind, gate.inputs, gate.position.x, gate.position.y
        );
    }
    println!("P=1 Q=1 R=0 -> {}", simulate(&circuit, &[true, true, false]));

    println!("{}", analyze(expression)?);
    Ok(())
}
