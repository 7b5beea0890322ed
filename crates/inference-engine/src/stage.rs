//! Model Stages

use crate::InferenceError;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};
use tract_onnx::prelude::*;

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// One half of the cost model: maps a flat row of floats to another.
///
/// Stages are read-only after construction and shared across requests.
pub trait Stage: Send + Sync {
    /// Stage name for logs and errors
    fn name(&self) -> &str;

    /// Expected input width, if fixed
    fn input_width(&self) -> Option<usize>;

    /// Run the stage over a single row
    fn run(&self, input: &[f32]) -> Result<Vec<f32>, InferenceError>;

    /// Reject rows of the wrong width
    fn check_width(&self, input: &[f32]) -> Result<(), InferenceError> {
        match self.input_width() {
            Some(width) if width != input.len() => Err(InferenceError::InvalidInputShape {
                expected: format!("[1, {}]", width),
                actual: format!("[1, {}]", input.len()),
            }),
            _ => Ok(()),
        }
    }
}

/// Stage backed by an ONNX graph
pub struct OnnxStage {
    name: String,
    width: Option<usize>,
    plan: OnnxPlan,
}

impl OnnxStage {
    /// Load and optimize an ONNX graph.
    ///
    /// With `width` set the input is pinned to `[1, width]`; otherwise the
    /// shape declared by the graph is kept.
    pub fn load(name: &str, path: &Path, width: Option<usize>) -> Result<Self, InferenceError> {
        if !path.is_file() {
            return Err(InferenceError::ModelUnavailable(format!(
                "{} stage not found at {}",
                name,
                path.display()
            )));
        }

        info!("Loading {} stage from {}", name, path.display());

        let unavailable = |e: TractError| {
            InferenceError::ModelUnavailable(format!(
                "{} stage at {} failed to load: {}",
                name,
                path.display(),
                e
            ))
        };

        let mut model = tract_onnx::onnx().model_for_path(path).map_err(unavailable)?;
        if let Some(width) = width {
            model = model
                .with_input_fact(0, f32::fact([1, width]).into())
                .map_err(unavailable)?;
        }
        let plan = model
            .into_optimized()
            .and_then(|m| m.into_runnable())
            .map_err(unavailable)?;

        Ok(Self {
            name: name.to_string(),
            width,
            plan,
        })
    }
}

impl Stage for OnnxStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_width(&self) -> Option<usize> {
        self.width
    }

    fn run(&self, input: &[f32]) -> Result<Vec<f32>, InferenceError> {
        self.check_width(input)?;

        let failed = |e: TractError| InferenceError::InferenceFailed(format!("{}: {}", self.name, e));

        let tensor = Tensor::from_shape(&[1, input.len()], input).map_err(failed)?;
        let outputs = self.plan.run(tvec!(tensor.into())).map_err(failed)?;
        let output = outputs.first().ok_or_else(|| {
            InferenceError::InferenceFailed(format!("{} produced no output", self.name))
        })?;

        // Converted regressors may emit f64; normalize to f32
        let output = output.cast_to::<f32>().map_err(failed)?;
        let values = output.as_slice::<f32>().map_err(failed)?.to_vec();

        debug!("{} stage: {} -> {} values", self.name, input.len(), values.len());
        Ok(values)
    }
}

impl fmt::Debug for OnnxStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnnxStage")
            .field("name", &self.name)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// Dense affine stage: `y = W x + b`.
///
/// Used for wiring tests and for smoke runs without ONNX artifacts.
#[derive(Debug, Clone)]
pub struct AffineStage {
    name: String,
    /// One row per output
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

impl AffineStage {
    /// Create a stage from row-major weights and a bias per output
    pub fn new(name: &str, weights: Vec<Vec<f32>>, bias: Vec<f32>) -> Result<Self, InferenceError> {
        if weights.is_empty() || weights.len() != bias.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: format!("{} bias terms", weights.len()),
                actual: format!("{}", bias.len()),
            });
        }
        let width = weights[0].len();
        if let Some(row) = weights.iter().find(|row| row.len() != width) {
            return Err(InferenceError::InvalidInputShape {
                expected: format!("rows of width {}", width),
                actual: format!("row of width {}", row.len()),
            });
        }
        Ok(Self {
            name: name.to_string(),
            weights,
            bias,
        })
    }

    /// Pass-through stage of the given width
    pub fn identity(name: &str, width: usize) -> Self {
        let weights = (0..width)
            .map(|i| (0..width).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        Self {
            name: name.to_string(),
            weights,
            bias: vec![0.0; width],
        }
    }
}

impl Stage for AffineStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_width(&self) -> Option<usize> {
        self.weights.first().map(Vec::len)
    }

    fn run(&self, input: &[f32]) -> Result<Vec<f32>, InferenceError> {
        self.check_width(input)?;
        Ok(self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + b)
            .collect())
    }
}
