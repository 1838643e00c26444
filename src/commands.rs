//! CLI command implementations

use gantry_core::{compute_plan, write_synth, Plan, StackGraph};
use gantry_stack::{demo_stack, load_params};
use std::path::{Path, PathBuf};

pub fn validate(root: PathBuf) -> anyhow::Result<()> {
    let graph = compile_stack(&root)?;

    tracing::info!(
        "Stack is valid: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(())
}

pub fn plan(root: PathBuf) -> anyhow::Result<()> {
    let graph = compile_stack(&root)?;
    let plan = compute_plan(&graph)?;

    print_plan(&graph, &plan);

    Ok(())
}

pub fn synth(root: PathBuf) -> anyhow::Result<()> {
    let graph = compile_stack(&root)?;
    let plan = compute_plan(&graph)?;

    let path = write_synth(&graph, &plan, &root)?;

    tracing::info!("Synthesized {} steps to {}", plan.steps.len(), path.display());

    Ok(())
}

/// Declare the stack and compile it, logging every validation error before
/// bailing out.
fn compile_stack(root: &Path) -> anyhow::Result<StackGraph> {
    let params = load_params(root)?;
    let nodes = demo_stack(&params)?;

    tracing::info!("Declared {} resources", nodes.len());

    match StackGraph::compile(nodes) {
        Ok(graph) => Ok(graph),
        Err(failure) => {
            for error in &failure.errors {
                tracing::error!("{}", error);
            }
            Err(failure.into())
        }
    }
}

fn print_plan(graph: &StackGraph, plan: &Plan) {
    println!("Apply order:");
    for (position, step) in plan.steps.iter().enumerate() {
        println!(
            "  {:>2}. {} ({}) [wave {}]",
            position + 1,
            step.name,
            step.kind,
            step.wave
        );
    }

    println!("\nWaves (independent nodes may apply concurrently):");
    for (index, wave) in plan.waves.iter().enumerate() {
        println!("  wave {}: {}", index, wave.join(", "));
    }

    if !plan.outputs.is_empty() {
        println!("\nOutputs (resolved after apply):");
        for output in &plan.outputs {
            println!("  {} = {}", output.name, output.value);
        }
    }

    tracing::debug!(
        "Planned {} steps across {} waves for {} edges",
        plan.steps.len(),
        plan.waves.len(),
        graph.edge_count()
    );
}
