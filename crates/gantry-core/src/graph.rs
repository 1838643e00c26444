//! Graph wrapper using petgraph::StableDiGraph with custom NodeId/EdgeId

use crate::error::ValidationFailure;
use crate::infer::collect_refs;
use crate::model::{DependencyEdge, EdgeId, EdgeOrigin, NodeId, ResourceNode};
use crate::validate::validate;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// The stack graph — declared resources connected by "must exist before"
/// edges, with stable node/edge indices.
pub struct StackGraph {
    inner: StableDiGraph<ResourceNode, DependencyEdge>,
    index: HashMap<NodeId, NodeIndex>,
}

impl std::fmt::Debug for StackGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl StackGraph {
    pub fn new() -> Self {
        StackGraph {
            inner: StableDiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Validate a declared node set and assemble the full graph: explicit
    /// `depends_on` edges first, then edges inferred from property
    /// references. Pure — no I/O happens here or anywhere downstream of it.
    pub fn compile(nodes: Vec<ResourceNode>) -> Result<StackGraph, ValidationFailure> {
        let errors = validate(&nodes);
        if !errors.is_empty() {
            return Err(ValidationFailure::new(errors));
        }

        let mut graph = StackGraph::new();
        let mut by_name: HashMap<String, NodeId> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            by_name.insert(node.name.clone(), node.id);
            graph.add_node(node);
        }

        // Validation guarantees every name resolves, so edge insertion cannot
        // fail past this point.
        let mut declared: Vec<(NodeId, NodeId, EdgeOrigin, Option<String>)> = Vec::new();
        let mut seen: HashSet<(NodeId, NodeId, EdgeOrigin)> = HashSet::new();

        for node in graph.all_nodes() {
            for dep in &node.depends_on {
                let source = by_name[dep.as_str()];
                if seen.insert((source, node.id, EdgeOrigin::Explicit)) {
                    declared.push((source, node.id, EdgeOrigin::Explicit, None));
                }
            }

            for attr_ref in collect_refs(node) {
                let source = by_name[attr_ref.node.as_str()];
                if seen.insert((source, node.id, EdgeOrigin::Inferred)) {
                    declared.push((
                        source,
                        node.id,
                        EdgeOrigin::Inferred,
                        Some(attr_ref.to_string()),
                    ));
                }
            }
        }

        for (source, target, origin, label) in declared {
            graph.add_edge(DependencyEdge {
                id: EdgeId(0), // Assigned by the graph
                source,
                target,
                origin,
                label,
            });
        }

        tracing::debug!(
            "Compiled stack graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(graph)
    }

    /// Add a node to the graph. Returns its stable NodeId.
    pub fn add_node(&mut self, node: ResourceNode) -> NodeId {
        let id = node.id;
        let idx = self.inner.add_node(node);
        self.index.insert(id, idx);
        id
    }

    /// Add an edge to the graph. Returns the assigned EdgeId, or None if
    /// either endpoint is not in the graph.
    pub fn add_edge(&mut self, edge: DependencyEdge) -> Option<EdgeId> {
        let source = self.index.get(&edge.source).copied()?;
        let target = self.index.get(&edge.target).copied()?;
        let idx = self.inner.add_edge(source, target, edge);
        let id = EdgeId(idx.index() as u64);
        if let Some(weight) = self.inner.edge_weight_mut(idx) {
            weight.id = id;
        }
        Some(id)
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&ResourceNode> {
        let idx = self.index.get(&id)?;
        self.inner.node_weight(*idx)
    }

    /// Find a node by logical name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.inner
            .node_indices()
            .find(|&idx| {
                self.inner
                    .node_weight(idx)
                    .map_or(false, |n| n.name == name)
            })
            .and_then(|idx| self.inner.node_weight(idx).map(|n| n.id))
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes in declaration order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &ResourceNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all edges.
    pub fn all_edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Node IDs in declaration order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.inner
            .node_indices()
            .filter_map(|idx| self.inner.node_weight(idx).map(|n| n.id))
            .collect()
    }

    /// All outgoing edges from a node.
    pub fn edges_from(&self, source: NodeId) -> impl Iterator<Item = &DependencyEdge> {
        self.index
            .get(&source)
            .into_iter()
            .flat_map(move |&idx| {
                self.inner
                    .edges_directed(idx, Direction::Outgoing)
                    .filter_map(move |edge_ref| self.inner.edge_weight(edge_ref.id()))
            })
    }

    /// All incoming edges to a node.
    pub fn edges_to(&self, target: NodeId) -> impl Iterator<Item = &DependencyEdge> {
        self.index
            .get(&target)
            .into_iter()
            .flat_map(move |&idx| {
                self.inner
                    .edges_directed(idx, Direction::Incoming)
                    .filter_map(move |edge_ref| self.inner.edge_weight(edge_ref.id()))
            })
    }

    /// Check if an edge exists between two nodes, regardless of origin.
    pub fn has_edge_between(&self, source: NodeId, target: NodeId) -> bool {
        self.edges_from(source).any(|e| e.target == target)
    }

    /// Nodes this node depends on (deduplicated).
    pub fn dependencies_of(&self, id: NodeId) -> Vec<NodeId> {
        let mut deps: Vec<NodeId> = self.edges_to(id).map(|e| e.source).collect();
        deps.sort_by_key(|d| d.0);
        deps.dedup();
        deps
    }

    /// Nodes that depend on this node (deduplicated).
    pub fn dependents_of(&self, id: NodeId) -> Vec<NodeId> {
        let mut deps: Vec<NodeId> = self.edges_from(id).map(|e| e.target).collect();
        deps.sort_by_key(|d| d.0);
        deps.dedup();
        deps
    }
}

impl Default for StackGraph {
    fn default() -> Self {
        Self::new()
    }
}
