//! Router test helpers

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use data_validator::Validator;
use feature_engine::FEATURE_DIMENSION;
use inference_engine::{AffineStage, CostModel, ModelPaths, ModelStatus};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::AppState;

/// cost = 2000 + 1000*bmi + 50*age + 200*sex + 20000*smoker
pub fn linear_model() -> CostModel {
    let estimator = AffineStage::new(
        "estimator",
        vec![vec![1000.0, 50.0, 200.0, 20000.0]],
        vec![2000.0],
    )
    .unwrap();
    CostModel::from_stages(
        Box::new(AffineStage::identity("transform", FEATURE_DIMENSION)),
        Box::new(estimator),
    )
}

pub fn ready_state() -> Arc<AppState> {
    Arc::new(AppState::new(linear_model().into(), Validator::default()))
}

pub fn disabled_state() -> Arc<AppState> {
    let dir = std::env::temp_dir().join("healthpredict-absent-models");
    let status = ModelStatus::load(&ModelPaths {
        transform: dir.join("transform.onnx"),
        estimator: dir.join("estimator.onnx"),
    });
    Arc::new(AppState::new(status, Validator::default()))
}

pub fn state_with_animation(animation: Value) -> Arc<AppState> {
    Arc::new(AppState::new(linear_model().into(), Validator::default()).with_animation(Some(animation)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
