//! Deployment plan computation — topological apply order and waves

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::StackError;
use crate::graph::StackGraph;
use crate::model::{AttrRef, NodeId, PropValue, ResourceKind};

/// One entry in the computed apply order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanStep {
    pub node: NodeId,
    pub name: String,
    pub kind: ResourceKind,
    /// Index of the wave this step belongs to.
    pub wave: usize,
}

/// A named value surfaced after apply, e.g. the load balancer address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StackOutput {
    pub name: String,
    pub value: AttrRef,
}

/// The synthesized deployment plan handed to the external apply engine.
///
/// Steps are a valid topological order of the stack graph. Waves partition
/// the steps into batches the engine may apply concurrently: no two nodes in
/// a wave are connected by an edge, and wave n+1 never starts before wave n
/// completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
    pub waves: Vec<Vec<String>>,
    pub outputs: Vec<StackOutput>,
}

impl Plan {
    /// Apply-order position of a node by name, if present.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name == name)
    }
}

/// Compute the deployment plan for a compiled graph.
///
/// Kahn's algorithm with declaration order as the tie-break, so the plan is
/// deterministic across runs. Compilation already rejects cycles; a cycle
/// here is a defect and still refuses to produce a plan.
pub fn compute_plan(graph: &StackGraph) -> Result<Plan, StackError> {
    let ids = graph.node_ids();
    let position: HashMap<NodeId, usize> =
        ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

    let mut remaining: HashMap<NodeId, usize> = HashMap::with_capacity(ids.len());
    let mut ready: BTreeSet<usize> = BTreeSet::new();
    for &id in &ids {
        let deps = graph.dependencies_of(id).len();
        remaining.insert(id, deps);
        if deps == 0 {
            ready.insert(position[&id]);
        }
    }

    let mut order: Vec<NodeId> = Vec::with_capacity(ids.len());
    let mut level: HashMap<NodeId, usize> = HashMap::with_capacity(ids.len());

    while let Some(&pos) = ready.iter().next() {
        ready.remove(&pos);
        let id = ids[pos];

        let wave = graph
            .dependencies_of(id)
            .iter()
            .map(|dep| level[dep] + 1)
            .max()
            .unwrap_or(0);
        level.insert(id, wave);
        order.push(id);

        for dependent in graph.dependents_of(id) {
            if let Some(count) = remaining.get_mut(&dependent) {
                *count -= 1;
                if *count == 0 {
                    ready.insert(position[&dependent]);
                }
            }
        }
    }

    if order.len() != ids.len() {
        let stuck: Vec<&str> = ids
            .iter()
            .filter(|id| !level.contains_key(*id))
            .filter_map(|id| graph.node(*id).map(|n| n.name.as_str()))
            .collect();
        return Err(StackError::Cycle {
            path: stuck.join(" -> "),
        });
    }

    let mut steps = Vec::with_capacity(order.len());
    let mut waves: Vec<Vec<String>> = Vec::new();
    for id in order {
        // Compilation owns the id, so the node is always present.
        let Some(node) = graph.node(id) else { continue };
        let wave = level[&id];
        while waves.len() <= wave {
            waves.push(Vec::new());
        }
        waves[wave].push(node.name.clone());
        steps.push(PlanStep {
            node: id,
            name: node.name.clone(),
            kind: node.kind,
            wave,
        });
    }

    Ok(Plan {
        steps,
        waves,
        outputs: collect_outputs(graph),
    })
}

/// Gather the output surface: every Output node's resolved value reference.
fn collect_outputs(graph: &StackGraph) -> Vec<StackOutput> {
    let mut outputs = Vec::new();
    for node in graph.all_nodes() {
        if node.kind != ResourceKind::Output {
            continue;
        }
        match node.properties.get("value") {
            Some(PropValue::Ref(attr_ref)) => outputs.push(StackOutput {
                name: node.name.clone(),
                value: attr_ref.clone(),
            }),
            _ => {
                tracing::warn!("Output '{}' has no value reference, skipping", node.name);
            }
        }
    }
    outputs
}
