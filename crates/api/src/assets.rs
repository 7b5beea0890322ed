//! Decorative Asset Loading
//!
//! The form shows an optional animation fetched once at startup. Any
//! failure just means no animation.

use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::AssetConfig;

/// Fetch the animation JSON, or `None` on any failure
pub async fn fetch_animation(config: &AssetConfig) -> Option<Value> {
    let url = config.animation_url.as_deref()?;

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!("Animation disabled, HTTP client unavailable: {}", e);
            return None;
        }
    };

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("Animation fetch from {} failed: {}", url, e);
            return None;
        }
    };

    if response.status() != reqwest::StatusCode::OK {
        warn!("Animation fetch from {} returned {}", url, response.status());
        return None;
    }

    match response.json::<Value>().await {
        Ok(animation) => {
            info!("Loaded animation from {}", url);
            Some(animation)
        }
        Err(e) => {
            warn!("Animation from {} is not valid JSON: {}", url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config(url: Option<String>) -> AssetConfig {
        AssetConfig {
            animation_url: url,
            timeout_ms: 2000,
        }
    }

    #[tokio::test]
    async fn test_no_url_skips_fetch() {
        assert!(fetch_animation(&config(None)).await.is_none());
    }

    #[tokio::test]
    async fn test_fetches_json() {
        let app = Router::new().route("/anim.json", get(|| async { Json(json!({"v": "5.7.4", "fr": 30})) }));
        let base = serve(app).await;

        let animation = fetch_animation(&config(Some(format!("{}/anim.json", base)))).await;
        assert_eq!(animation, Some(json!({"v": "5.7.4", "fr": 30})));
    }

    #[tokio::test]
    async fn test_non_200_degrades() {
        let app = Router::new().route("/anim.json", get(|| async { StatusCode::NOT_FOUND }));
        let base = serve(app).await;

        assert!(fetch_animation(&config(Some(format!("{}/anim.json", base)))).await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_json_degrades() {
        let app = Router::new().route("/anim.json", get(|| async { "<html>not json</html>" }));
        let base = serve(app).await;

        assert!(fetch_animation(&config(Some(format!("{}/anim.json", base)))).await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_degrades() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}/anim.json", addr);
        assert!(fetch_animation(&config(Some(url))).await.is_none());
    }
}
