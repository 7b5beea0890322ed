//! Asset Routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::AppState;

/// Decorative animation, or 204 when none was loaded
pub async fn get_animation(State(state): State<Arc<AppState>>) -> Response {
    match &state.animation {
        Some(animation) => Json(animation.clone()).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::test_support::{get, ready_state, state_with_animation};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_no_animation() {
        let app = create_router(ready_state());
        let (status, body) = get(app, "/api/v1/assets/animation").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_animation_served() {
        let app = create_router(state_with_animation(json!({"v": "5.7.4", "layers": []})));
        let (status, body) = get(app, "/api/v1/assets/animation").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["v"], "5.7.4");
    }
}
