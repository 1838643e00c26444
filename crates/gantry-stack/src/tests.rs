//! Unit tests for the declared demo stack

use gantry_core::{compute_plan, EdgeOrigin, ResourceKind, StackGraph};

use crate::params::StackParams;
use crate::stack::{self, demo_stack};

fn compiled_demo() -> (StackGraph, gantry_core::Plan) {
    let params = StackParams::default();
    let nodes = demo_stack(&params).expect("demo stack should declare");
    let graph = StackGraph::compile(nodes).expect("demo stack should validate");
    let plan = compute_plan(&graph).expect("demo stack should plan");
    (graph, plan)
}

#[test]
fn test_demo_stack_validates_cleanly() {
    let (graph, plan) = compiled_demo();
    assert_eq!(graph.node_count(), 10);
    assert_eq!(plan.steps.len(), 10);
}

#[test]
fn test_cluster_applies_first() {
    let (_, plan) = compiled_demo();
    let cluster = plan.position_of("hello-eks").unwrap();

    for name in [
        stack::SERVICE_ACCOUNT,
        stack::CONTROLLER,
        stack::LOAD_BALANCER,
        stack::TARGET_GROUP,
        stack::WORKLOAD,
        stack::BINDING,
    ] {
        assert!(
            cluster < plan.position_of(name).unwrap(),
            "cluster must precede {name}"
        );
    }
}

#[test]
fn test_binding_waits_for_controller_and_target_group() {
    let (_, plan) = compiled_demo();
    let binding = plan.position_of(stack::BINDING).unwrap();

    assert!(plan.position_of(stack::CONTROLLER).unwrap() < binding);
    assert!(plan.position_of(stack::TARGET_GROUP).unwrap() < binding);
}

#[test]
fn test_binding_ordering_is_explicit_not_inferred() {
    let (graph, _) = compiled_demo();
    let controller = graph.find_by_name(stack::CONTROLLER).unwrap();
    let binding = graph.find_by_name(stack::BINDING).unwrap();

    // The binding's document embeds the target group ARN inside an opaque
    // payload, so the only edges from controller and target group to the
    // binding are the author-declared ones.
    let explicit: Vec<_> = graph
        .edges_to(binding)
        .filter(|e| e.origin == EdgeOrigin::Explicit)
        .map(|e| e.source)
        .collect();
    assert!(explicit.contains(&controller));
    assert!(explicit.contains(&graph.find_by_name(stack::TARGET_GROUP).unwrap()));

    // The inferred edges on the binding come only from its cluster reference
    let inferred: Vec<_> = graph
        .edges_to(binding)
        .filter(|e| e.origin == EdgeOrigin::Inferred)
        .map(|e| e.source)
        .collect();
    assert_eq!(inferred, vec![graph.find_by_name("hello-eks").unwrap()]);
}

#[test]
fn test_listener_waits_for_target_group() {
    let (graph, plan) = compiled_demo();

    assert!(
        plan.position_of(stack::TARGET_GROUP).unwrap()
            < plan.position_of(stack::LISTENER).unwrap()
    );

    // Inferred from the listener's default_target_group reference
    let tg = graph.find_by_name(stack::TARGET_GROUP).unwrap();
    let listener = graph.find_by_name(stack::LISTENER).unwrap();
    assert!(graph.has_edge_between(tg, listener));
}

#[test]
fn test_controller_values_reference_service_account() {
    let (graph, plan) = compiled_demo();

    // The chart values carry a structural reference to the service account,
    // so the ordering is inferred without any depends_on.
    let sa = graph.find_by_name(stack::SERVICE_ACCOUNT).unwrap();
    let controller = graph.find_by_name(stack::CONTROLLER).unwrap();
    assert!(graph.has_edge_between(sa, controller));
    assert!(
        plan.position_of(stack::SERVICE_ACCOUNT).unwrap()
            < plan.position_of(stack::CONTROLLER).unwrap()
    );
}

#[test]
fn test_alarm_watches_load_balancer() {
    let (graph, plan) = compiled_demo();

    let lb = graph.find_by_name(stack::LOAD_BALANCER).unwrap();
    let alarm = graph.find_by_name(stack::ALARM).unwrap();
    assert!(graph.has_edge_between(lb, alarm));
    assert!(
        plan.position_of(stack::LOAD_BALANCER).unwrap()
            < plan.position_of(stack::ALARM).unwrap()
    );
}

#[test]
fn test_output_surfaces_load_balancer_address() {
    let (_, plan) = compiled_demo();

    assert_eq!(plan.outputs.len(), 1);
    assert_eq!(plan.outputs[0].name, stack::ALB_CNAME);
    assert_eq!(plan.outputs[0].value.node, stack::LOAD_BALANCER);
    assert_eq!(plan.outputs[0].value.attr, "dns_name");
}

#[test]
fn test_manifest_documents_are_opaque() {
    let params = StackParams::default();
    let nodes = demo_stack(&params).unwrap();

    let workload = nodes
        .iter()
        .find(|n| n.name == stack::WORKLOAD)
        .expect("workload manifest declared");
    assert_eq!(workload.kind, ResourceKind::Manifest);
    assert!(matches!(
        workload.properties.get("documents"),
        Some(gantry_core::PropValue::Opaque(_))
    ));
}

#[test]
fn test_parameters_flow_into_declared_properties() {
    let params = StackParams {
        listener_port: 8443,
        alarm_threshold: 99,
        ..StackParams::default()
    };
    let nodes = demo_stack(&params).unwrap();

    let listener = nodes.iter().find(|n| n.name == stack::LISTENER).unwrap();
    assert_eq!(
        listener.properties.get("port"),
        Some(&gantry_core::PropValue::Int(8443))
    );

    let alarm = nodes.iter().find(|n| n.name == stack::ALARM).unwrap();
    assert_eq!(
        alarm.properties.get("threshold"),
        Some(&gantry_core::PropValue::Int(99))
    );
}
