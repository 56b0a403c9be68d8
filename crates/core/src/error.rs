//! Planning error model.

use thiserror::Error;

/// Result type used across the planning layers.
pub type PlanningResult<T> = Result<T, PlanningError>;

/// Planning-level error.
///
/// Keep this focused on deterministic input failures (configuration,
/// malformed records). Solver degradation is not an error at this level:
/// the pipeline recovers from it internally and reports a warning on the
/// plan instead of failing the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// Configuration failed validation; the run never started.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An input record violated the data contract (e.g. negative stock,
    /// self-referential lane). The message identifies the offending record.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl PlanningError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }
}
