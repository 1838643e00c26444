//! Test utilities for Gantry

use crate::model::{PropValue, ResourceKind, ResourceNode};

/// Create a bare node with no properties or dependencies.
pub fn create_test_node(name: &str, kind: ResourceKind) -> ResourceNode {
    ResourceNode::new(name, kind)
}

/// Create a node whose property bag holds a structural reference to
/// another node's attribute.
pub fn create_node_with_ref(
    name: &str,
    kind: ResourceKind,
    prop: &str,
    target: &str,
    attr: &str,
) -> ResourceNode {
    let mut node = ResourceNode::new(name, kind);
    node.properties
        .insert(prop.to_string(), PropValue::reference(target, attr));
    node
}

/// Create a node with explicit `depends_on` entries.
pub fn create_node_with_deps(name: &str, kind: ResourceKind, deps: Vec<&str>) -> ResourceNode {
    let mut node = ResourceNode::new(name, kind);
    node.depends_on = deps.into_iter().map(|s| s.to_string()).collect();
    node
}

/// Create a manifest node whose opaque document embeds another resource's
/// identifier as a plain string — invisible to edge inference.
pub fn create_opaque_manifest(name: &str, embedded_identifier: &str) -> ResourceNode {
    let mut node = ResourceNode::new(name, ResourceKind::Manifest);
    node.properties.insert(
        "documents".to_string(),
        PropValue::Opaque(serde_json::json!([{
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": { "name": name },
            "data": { "target": embedded_identifier }
        }])),
    );
    node
}
