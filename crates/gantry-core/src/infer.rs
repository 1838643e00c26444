//! Edge inference from structural property references

use crate::model::{AttrRef, PropValue, ResourceNode};

/// Collect every structurally visible reference in a node's property bag.
///
/// `Opaque` payloads are not descended into: an identifier embedded inside
/// one is invisible here, which is exactly why `depends_on` exists.
pub fn collect_refs(node: &ResourceNode) -> Vec<AttrRef> {
    let mut refs = Vec::new();
    for value in node.properties.values() {
        walk(value, &mut refs);
    }
    refs
}

fn walk(value: &PropValue, refs: &mut Vec<AttrRef>) {
    match value {
        PropValue::Ref(attr_ref) => refs.push(attr_ref.clone()),
        PropValue::List(items) => {
            for item in items {
                walk(item, refs);
            }
        }
        PropValue::Map(entries) => {
            for entry in entries.values() {
                walk(entry, refs);
            }
        }
        // Engine-unreadable payload: never walked.
        PropValue::Opaque(_) => {}
        PropValue::Str(_) | PropValue::Int(_) | PropValue::Bool(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceKind;
    use std::collections::BTreeMap;

    #[test]
    fn test_collect_refs_walks_nested_structures() {
        let mut node = ResourceNode::new("release", ResourceKind::HelmRelease);
        let mut values = BTreeMap::new();
        values.insert(
            "clusterName".to_string(),
            PropValue::reference("hello-eks", "name"),
        );
        values.insert(
            "tags".to_string(),
            PropValue::List(vec![PropValue::reference("hello-lb", "arn")]),
        );
        node.properties
            .insert("values".to_string(), PropValue::Map(values));

        let refs = collect_refs(&node);
        assert_eq!(refs.len(), 2);
        assert!(refs.iter().any(|r| r.node == "hello-eks"));
        assert!(refs.iter().any(|r| r.node == "hello-lb"));
    }

    #[test]
    fn test_collect_refs_skips_opaque_payloads() {
        let mut node = ResourceNode::new("binding", ResourceKind::Manifest);
        node.properties.insert(
            "documents".to_string(),
            PropValue::Opaque(serde_json::json!({
                "spec": { "targetGroupARN": "${hello-tg.arn}" }
            })),
        );

        let refs = collect_refs(&node);
        assert!(
            refs.is_empty(),
            "identifiers inside opaque payloads must not be inferred"
        );
    }
}
