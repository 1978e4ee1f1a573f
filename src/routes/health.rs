use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use super::AppState;

/// GET /health - Liveness probe
/// Returns 200 OK if the process is alive
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// GET /ready - Readiness probe
/// Ready means the REST backend answers; without it every page is a wall of
/// error banners.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let up = state.api.health().await;
    *state.backend_up.lock().await = Some(up);

    if up {
        (StatusCode::OK, Json(json!({"status": "ready"})))
    } else {
        tracing::error!("Readiness check failed: backend unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "reason": "backend_unavailable"
            })),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
