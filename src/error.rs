//! Error types shared by every stage of the benchmark pipeline.
use crate::graph::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TwinError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Synthesis was attempted on a node or edge that was never parametrized.
    #[error("Missing parameter: {what}")]
    MissingParameter { what: String },
    #[error("Division by zero: {0}")]
    DivisionByZero(String),
    #[error("Cycle detected involving node {}", .node.index())]
    CycleDetected { node: NodeId },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TwinError>;

/// Checks that `value` is a probability in `[0, 1]`.
pub(crate) fn check_probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TwinError::InvalidArgument(format!(
            "{} must lie in [0, 1], got {}",
            name, value
        )))
    }
}
