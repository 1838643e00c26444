//! Gantry Stack — the declared demo stack and its builders

pub mod builders;
pub mod iam;
pub mod manifests;
pub mod params;
pub mod stack;

#[cfg(test)]
pub mod tests;

pub use builders::{
    Alarm, Cluster, HelmRelease, Listener, LoadBalancer, Manifest, Output, ServiceAccount,
    TargetGroup,
};
pub use iam::controller_policy_statements;
pub use params::{load_params, StackParams, PARAMS_FILE};
pub use stack::demo_stack;
