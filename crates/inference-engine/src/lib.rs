//! Medical Cost Model
//!
//! Loads the pre-trained transform and estimator stages once and runs
//! them over patient feature vectors using tract-onnx.

mod engine;
mod stage;

pub use engine::{CostEstimate, CostModel, ModelPaths, ModelStatus};
pub use stage::{AffineStage, OnnxStage, Stage};

use thiserror::Error;

/// Errors during model loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
}
