//! Profile Routes

use axum::{extract::State, Json};
use feature_engine::{compute_bmi, PatientInput};
use serde::Serialize;
use std::sync::Arc;

use crate::report::ProfileSummary;
use crate::{ApiError, AppState};

/// Response for the profile endpoint
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: ProfileSummary,
    /// Unrounded BMI
    pub bmi: f64,
    /// Whether a report can be generated right now
    pub prediction_available: bool,
}

/// Summarize a patient without running the model
pub async fn post_profile(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PatientInput>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let validation = state.validator.validate_patient(&input);
    if !validation.valid {
        return Err(ApiError::InvalidInput(validation.errors));
    }

    // BMI only; bucketing belongs to the prediction path
    let bmi = compute_bmi(input.height_cm, input.weight_kg);

    Ok(Json(ProfileResponse {
        profile: ProfileSummary::new(&input, bmi),
        bmi,
        prediction_available: state.model.is_ready(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::test_support::{disabled_state, post_json, ready_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_profile_without_model() {
        let app = create_router(disabled_state());
        let (status, body) = post_json(
            app,
            "/api/v1/profile",
            json!({"age": 25, "sex": "Male", "height_cm": 170, "weight_kg": 70, "smoker": "No"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["age"], "25 yrs");
        assert_eq!(body["profile"]["bmi"], "24.2");
        assert_eq!(body["profile"]["sex"], "Male");
        assert_eq!(body["profile"]["smoker"], "No");
        assert_eq!(body["prediction_available"], false);
    }

    #[tokio::test]
    async fn test_profile_without_model_has_no_buckets() {
        let app = create_router(disabled_state());
        let (status, body) = post_json(
            app,
            "/api/v1/profile",
            json!({"age": 65, "sex": "Female", "height_cm": 160, "weight_kg": 90, "smoker": "Yes"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["bmi"], "35.2");
        assert!((body["bmi"].as_f64().unwrap() - 35.156).abs() < 1e-3);
        assert!(body.get("bmi_bucket").is_none());
        assert!(body.get("features").is_none());
        assert_eq!(body["prediction_available"], false);
    }

    #[tokio::test]
    async fn test_profile_with_model() {
        let app = create_router(ready_state());
        let (status, body) = post_json(
            app,
            "/api/v1/profile",
            json!({"age": 25, "sex": "Male", "height_cm": 170, "weight_kg": 70, "smoker": "No"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction_available"], true);
        assert!(body.get("bmi_bucket").is_none());
    }

    #[tokio::test]
    async fn test_profile_rejects_out_of_domain() {
        let app = create_router(disabled_state());
        let (status, body) = post_json(
            app,
            "/api/v1/profile",
            json!({"age": 25, "sex": "Female", "height_cm": 90, "weight_kg": 70, "smoker": "Yes"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "input_out_of_domain");
        assert_eq!(body["details"][0]["field"], "height_cm");
    }
}
