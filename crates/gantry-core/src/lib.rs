//! Gantry Core — resource graph model, validation, and plan computation

pub mod error;
pub mod graph;
pub mod infer;
pub mod model;
pub mod plan;
pub mod synth;
pub mod validate;


#[cfg(test)]
pub mod test_utils;

pub use error::{StackError, ValidationFailure};
pub use graph::StackGraph;
pub use infer::collect_refs;
pub use model::{
    AttrRef, DependencyEdge, EdgeId, EdgeOrigin, NodeId, PropValue, ResourceKind, ResourceNode,
};
pub use plan::{compute_plan, Plan, PlanStep, StackOutput};
pub use synth::{
    ensure_out_dir, load_synth, out_dir, stack_doc_path, synthesize, write_synth, SynthDoc,
    SynthEdge, OUT_DIR, STACK_DOC,
};
pub use validate::validate;
