//! Prediction Routes

use axum::{extract::State, Json};
use feature_engine::{derive_features, PatientInput};
use metrics::{counter, histogram};
use std::sync::Arc;
use tracing::info;

use crate::report::{MedicalReport, ProfileSummary};
use crate::{ApiError, AppState};

/// Generate a medical cost report
pub async fn post_predict(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PatientInput>,
) -> Result<Json<MedicalReport>, ApiError> {
    let result = predict(&state, &input);
    match &result {
        Ok(report) => {
            counter!("healthpredict_predictions_total").increment(1);
            info!(
                "Report {} generated: features={:?}, cost={}",
                report.report_id,
                report.features.as_tuple(),
                report.annual_cost_display
            );
        }
        Err(e) => {
            counter!("healthpredict_prediction_errors_total", "kind" => e.kind()).increment(1);
        }
    }
    result.map(Json)
}

fn predict(state: &AppState, input: &PatientInput) -> Result<MedicalReport, ApiError> {
    let validation = state.validator.validate_patient(input);
    if !validation.valid {
        return Err(ApiError::InvalidInput(validation.errors));
    }

    // No model, no pipeline
    let model = state.model.model()?;

    let derived = derive_features(input);
    let features = derived.feature_vector()?;
    let estimate = model.estimate(&features)?;

    histogram!("healthpredict_inference_seconds").record(estimate.latency_us as f64 / 1_000_000.0);

    Ok(MedicalReport::new(
        ProfileSummary::new(input, derived.bmi),
        features,
        &estimate,
    ))
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::test_support::{disabled_state, post_json, ready_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_predict_young_male_non_smoker() {
        let app = create_router(ready_state());
        let (status, body) = post_json(
            app,
            "/api/v1/predict",
            json!({"age": 25, "sex": "Male", "height_cm": 170, "weight_kg": 70, "smoker": "No"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["features"], json!({"bmi": 1, "age": 0, "sex": 1, "smoker": 0}));
        assert_eq!(body["annual_cost"], 3200.0);
        assert_eq!(body["annual_cost_display"], "$3,200.00");
        assert_eq!(body["profile"]["bmi"], "24.2");
        assert!(body["report_id"].is_string());
        assert!(body["disclaimer"].as_str().unwrap().contains("informational"));
    }

    #[tokio::test]
    async fn test_predict_senior_female_smoker() {
        let app = create_router(ready_state());
        let (status, body) = post_json(
            app,
            "/api/v1/predict",
            json!({"age": 65, "sex": "Female", "height_cm": 160, "weight_kg": 90, "smoker": "Yes"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["features"], json!({"bmi": 3, "age": 4, "sex": 0, "smoker": 1}));
        assert_eq!(body["annual_cost_display"], "$25,200.00");
    }

    #[tokio::test]
    async fn test_predict_with_model_disabled() {
        let app = create_router(disabled_state());
        let (status, body) = post_json(
            app,
            "/api/v1/predict",
            json!({"age": 25, "sex": "Male", "height_cm": 170, "weight_kg": 70, "smoker": "No"}),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "model_unavailable");
        assert!(body["message"].as_str().unwrap().contains("Model unavailable"));
    }

    #[tokio::test]
    async fn test_predict_lists_every_bad_field() {
        let app = create_router(ready_state());
        let (status, body) = post_json(
            app,
            "/api/v1/predict",
            json!({"age": 0, "sex": "Male", "height_cm": 300, "weight_kg": 70, "smoker": "No"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "input_out_of_domain");
        let fields: Vec<_> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(fields, vec!["age", "height_cm"]);
    }

    #[tokio::test]
    async fn test_predict_rejects_unknown_category() {
        let app = create_router(ready_state());
        let (status, _) = post_json(
            app,
            "/api/v1/predict",
            json!({"age": 25, "sex": "Unknown", "height_cm": 170, "weight_kg": 70, "smoker": "No"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
