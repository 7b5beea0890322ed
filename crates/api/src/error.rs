//! API Error Mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationError;
use feature_engine::FeatureError;
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Errors surfaced to API clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more fields outside the intake form's domains
    #[error("Patient input out of domain: {}", join(.0))]
    InvalidInput(Vec<ValidationError>),
    #[error(transparent)]
    Features(#[from] FeatureError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApiError {
    /// Stable machine-readable code
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "input_out_of_domain",
            ApiError::Features(FeatureError::UndefinedBmi { .. }) => "undefined_bmi",
            ApiError::Inference(InferenceError::ModelUnavailable(_)) => "model_unavailable",
            ApiError::Inference(_) => "inference_failed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::Features(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(InferenceError::ModelUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ValidationError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        }

        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
            details: match self {
                ApiError::InvalidInput(errors) => errors,
                _ => Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}
