//! Integration tests for Gantry
//!
//! These tests verify that multiple systems work together correctly.

use std::process::Command;

use gantry_core::{compute_plan, load_synth, write_synth, EdgeOrigin, StackGraph};
use gantry_stack::{demo_stack, load_params, StackParams};

/// Test that the CLI can be invoked
#[test]
fn test_cli_invocation() {
    let output = Command::new("cargo")
        .args(["run", "--", "--help"])
        .current_dir(".")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gantry"));
    assert!(stdout.contains("Declarative resource-graph stack toolkit"));
}

/// Test that the demo stack validates and plans through the CLI
#[test]
fn test_cli_plan() {
    let output = Command::new("cargo")
        .args(["run", "--", "plan"])
        .current_dir(".")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Apply order:"));
    assert!(stdout.contains("hello-eks"));
    assert!(stdout.contains("alb-cname = hello-lb.dns_name"));
}

/// Test the full declare -> compile -> plan pipeline across crates
#[test]
fn test_end_to_end_plan() {
    let params = StackParams::default();
    let nodes = demo_stack(&params).unwrap();
    let graph = StackGraph::compile(nodes).unwrap();
    let plan = compute_plan(&graph).unwrap();

    // The cluster has no dependencies, so it opens the plan
    assert_eq!(plan.steps[0].name, "hello-eks");
    assert_eq!(plan.steps[0].wave, 0);

    // The binding manifest applies only after the controller release — the
    // ordering the explicit edge exists to guarantee
    let controller = plan.position_of("alb-controller").unwrap();
    let binding = plan.position_of("hello-binding").unwrap();
    assert!(controller < binding);

    // Both edge origins are present in the compiled graph
    assert!(graph.all_edges().any(|e| e.origin == EdgeOrigin::Inferred));
    assert!(graph.all_edges().any(|e| e.origin == EdgeOrigin::Explicit));
}

/// Test that synth writes a document the engine side can read back
#[test]
fn test_synth_round_trip_for_demo_stack() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let root = temp_dir.path();

    let params = StackParams::default();
    let nodes = demo_stack(&params).unwrap();
    let graph = StackGraph::compile(nodes).unwrap();
    let plan = compute_plan(&graph).unwrap();

    write_synth(&graph, &plan, root).unwrap();
    let doc = load_synth(root).unwrap().expect("document should exist");

    assert_eq!(doc.node_count, 10);
    assert_eq!(doc.plan.steps.len(), 10);
    assert_eq!(doc.plan.outputs[0].name, "alb-cname");

    // Every edge in the document names declared nodes
    for edge in &doc.edges {
        assert!(doc.nodes.iter().any(|n| n.name == edge.from));
        assert!(doc.nodes.iter().any(|n| n.name == edge.to));
    }
}

/// Test that a parameter file flows through declaration into the plan
#[test]
fn test_params_file_changes_declared_stack() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let root = temp_dir.path();
    std::fs::write(root.join("gantry.toml"), "cluster_name = \"prod-eks\"\n").unwrap();

    let params = load_params(root).unwrap();
    let nodes = demo_stack(&params).unwrap();
    let graph = StackGraph::compile(nodes).unwrap();

    assert!(graph.find_by_name("prod-eks").is_some());
    assert!(graph.find_by_name("hello-eks").is_none());
}
