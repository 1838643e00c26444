//! Error types for stack validation and planning

use thiserror::Error;

/// A single validation violation. Validation reports every violation it
/// finds, so a graph with several problems surfaces all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("duplicate resource name '{0}' - names must be unique within a stack")]
    DuplicateName(String),

    #[error("resource '{referrer}' references undeclared resource '{name}'")]
    UnknownReference { referrer: String, name: String },

    #[error("resource '{0}' depends on itself")]
    SelfDependency(String),

    #[error("dependency cycle detected: {path}")]
    Cycle { path: String },
}

/// Returned when a stack fails to compile. Carries every violation found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stack validation failed with {} error(s)", errors.len())]
pub struct ValidationFailure {
    pub errors: Vec<StackError>,
}

impl ValidationFailure {
    pub fn new(errors: Vec<StackError>) -> Self {
        ValidationFailure { errors }
    }
}
