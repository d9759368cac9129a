//! Readiness and health routes.
//!
//! ```json
//! { "status": "ok", "database": true }
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use ts_rs::TS;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ready))
        .route("/health", get(health))
}

/// Plain readiness string for humans and load balancers.
async fn ready() -> &'static str {
    "SALMA pharmacy server ready"
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: String,
    pub database: bool,
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                database: true,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded".to_string(),
                database: false,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{get, send, test_app};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_root_is_plain_text() {
        let (app, _db) = test_app().await;
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"SALMA pharmacy server ready");
    }

    #[tokio::test]
    async fn test_health_ok() {
        let (app, _db) = test_app().await;
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], true);
    }

    #[tokio::test]
    async fn test_health_degraded_when_pool_closed() {
        let (app, db) = test_app().await;
        db.close().await;
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["database"], false);
    }
}
