//! Cost Model Implementation

use crate::stage::{OnnxStage, Stage};
use crate::InferenceError;
use feature_engine::{FeatureVector, FEATURE_DIMENSION};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Locations of the two serialized model stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPaths {
    /// Transform stage (feature vector -> refined features)
    pub transform: PathBuf,
    /// Estimator stage (refined features -> annual cost)
    pub estimator: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            transform: PathBuf::from("models/medical_transform.onnx"),
            estimator: PathBuf::from("models/medical_estimator.onnx"),
        }
    }
}

/// Result of one cost estimation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Estimated annual medical cost
    pub annual_cost: f64,
    /// Inference latency in microseconds
    pub latency_us: u64,
}

/// Pre-trained two-stage regression pipeline.
///
/// The transform stage is applied with the parameters fixed at training
/// time; nothing is re-fitted per request.
pub struct CostModel {
    transform: Box<dyn Stage>,
    estimator: Box<dyn Stage>,
}

impl CostModel {
    /// Load both stages from disk
    pub fn load(paths: &ModelPaths) -> Result<Self, InferenceError> {
        let transform = OnnxStage::load("transform", &paths.transform, Some(FEATURE_DIMENSION))?;
        let estimator = OnnxStage::load("estimator", &paths.estimator, None)?;
        info!("Cost model loaded");
        Ok(Self::from_stages(Box::new(transform), Box::new(estimator)))
    }

    /// Assemble a model from already-built stages
    pub fn from_stages(transform: Box<dyn Stage>, estimator: Box<dyn Stage>) -> Self {
        Self {
            transform,
            estimator,
        }
    }

    /// Run the transform stage over a feature vector
    pub fn transform(&self, features: &FeatureVector) -> Result<Vec<f32>, InferenceError> {
        let refined = self.transform.run(&features.values())?;
        if refined.is_empty() {
            return Err(InferenceError::InferenceFailed(format!(
                "{} stage produced no features",
                self.transform.name()
            )));
        }
        Ok(refined)
    }

    /// Run the estimator stage over refined features
    pub fn predict(&self, refined: &[f32]) -> Result<f64, InferenceError> {
        let output = self.estimator.run(refined)?;
        let value = output.first().copied().ok_or_else(|| {
            InferenceError::InferenceFailed(format!("{} stage produced no prediction", self.estimator.name()))
        })?;

        if !value.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "{} stage produced non-finite prediction {}",
                self.estimator.name(),
                value
            )));
        }
        Ok(value as f64)
    }

    /// Transform then predict
    pub fn estimate(&self, features: &FeatureVector) -> Result<CostEstimate, InferenceError> {
        let start = Instant::now();

        let refined = self.transform(features)?;
        let annual_cost = self.predict(&refined)?;

        let latency_us = start.elapsed().as_micros() as u64;
        debug!(
            "Estimated annual cost {:.2} for {:?} in {}us",
            annual_cost,
            features.as_tuple(),
            latency_us
        );

        Ok(CostEstimate {
            annual_cost,
            latency_us,
        })
    }
}

impl fmt::Debug for CostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CostModel")
            .field("transform", &self.transform.name())
            .field("estimator", &self.estimator.name())
            .finish()
    }
}

/// Model availability, settled once at startup
#[derive(Debug, Clone)]
pub enum ModelStatus {
    /// Both stages loaded; shared read-only handle
    Ready(Arc<CostModel>),
    /// Prediction is disabled
    Disabled { reason: String },
}

impl ModelStatus {
    /// Load the model, turning any failure into a disabled state
    pub fn load(paths: &ModelPaths) -> Self {
        match CostModel::load(paths) {
            Ok(model) => ModelStatus::Ready(Arc::new(model)),
            Err(e) => {
                error!("Prediction disabled: {}", e);
                let reason = match e {
                    InferenceError::ModelUnavailable(reason) => reason,
                    other => other.to_string(),
                };
                ModelStatus::Disabled { reason }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelStatus::Ready(_))
    }

    /// Borrow the model, or explain why there is none
    pub fn model(&self) -> Result<&Arc<CostModel>, InferenceError> {
        match self {
            ModelStatus::Ready(model) => Ok(model),
            ModelStatus::Disabled { reason } => Err(InferenceError::ModelUnavailable(reason.clone())),
        }
    }
}

impl From<CostModel> for ModelStatus {
    fn from(model: CostModel) -> Self {
        ModelStatus::Ready(Arc::new(model))
    }
}
