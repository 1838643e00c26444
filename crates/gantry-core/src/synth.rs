//! Synthesized stack document serialization

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::graph::StackGraph;
use crate::model::{EdgeOrigin, ResourceNode};
use crate::plan::Plan;

/// Output directory: .gantry/
pub const OUT_DIR: &str = ".gantry";

/// Synthesized stack document file
pub const STACK_DOC: &str = "stack.json";

/// An edge rendered by logical name for the synth document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthEdge {
    pub from: String,
    pub to: String,
    pub origin: EdgeOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The full synthesized stack: everything the external apply engine needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthDoc {
    pub version: String,
    pub synthesized_at: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<ResourceNode>,
    pub edges: Vec<SynthEdge>,
    pub plan: Plan,
}

/// Get output directory path
pub fn out_dir(root: &Path) -> PathBuf {
    root.join(OUT_DIR)
}

/// Get synthesized stack document path
pub fn stack_doc_path(root: &Path) -> PathBuf {
    root.join(OUT_DIR).join(STACK_DOC)
}

/// Ensure output directory exists
pub fn ensure_out_dir(root: &Path) -> std::io::Result<()> {
    let dir = out_dir(root);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(())
}

/// Render a compiled graph and its plan into a synth document.
pub fn synthesize(graph: &StackGraph, plan: &Plan) -> SynthDoc {
    let edges = graph
        .all_edges()
        .map(|edge| SynthEdge {
            from: graph
                .node(edge.source)
                .map(|n| n.name.clone())
                .unwrap_or_default(),
            to: graph
                .node(edge.target)
                .map(|n| n.name.clone())
                .unwrap_or_default(),
            origin: edge.origin,
            label: edge.label.clone(),
        })
        .collect();

    SynthDoc {
        version: env!("CARGO_PKG_VERSION").to_string(),
        synthesized_at: chrono::Utc::now().to_rfc3339(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        nodes: graph.all_nodes().cloned().collect(),
        edges,
        plan: plan.clone(),
    }
}

/// Serialize the synth document to `.gantry/stack.json` under root.
/// Returns the path written.
pub fn write_synth(graph: &StackGraph, plan: &Plan, root: &Path) -> anyhow::Result<PathBuf> {
    ensure_out_dir(root)?;
    let path = stack_doc_path(root);

    let doc = synthesize(graph, plan);
    let json_str = serde_json::to_string_pretty(&doc)?;
    std::fs::write(&path, json_str)?;

    tracing::debug!("Synth document written: {}", path.display());
    Ok(path)
}

/// Load a previously synthesized document, if one exists.
pub fn load_synth(root: &Path) -> anyhow::Result<Option<SynthDoc>> {
    let path = stack_doc_path(root);
    if !path.exists() {
        return Ok(None);
    }

    let json_str = std::fs::read_to_string(&path)?;
    let doc: SynthDoc = serde_json::from_str(&json_str)?;

    tracing::debug!("Synth document loaded from: {}", path.display());
    Ok(Some(doc))
}
