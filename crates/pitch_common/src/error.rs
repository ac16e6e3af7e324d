//! Error types for pitch_common.

use thiserror::Error;

/// Why the evaluator's output could not be turned into an `Evaluation`.
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}
