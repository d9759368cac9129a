//! # Routes
//!
//! | Method | Path                                          | Module          |
//! |--------|-----------------------------------------------|-----------------|
//! | GET    | `/`                                           | [`health`]        |
//! | GET    | `/health`                                     | [`health`]        |
//! | GET    | `/api/drugs-list`                             | [`catalog`]       |
//! | GET    | `/api/patients-list`                          | [`catalog`]       |
//! | GET    | `/api/doctors-list`                           | [`catalog`]       |
//! | POST   | `/api/submit-prescription`                    | [`prescriptions`] |
//! | GET    | `/api/cashier/search-bill?keyword=`           | [`cashier`]       |
//! | GET    | `/api/cashier/bill-details/{prescription_id}` | [`cashier`]       |

use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod cashier;
pub mod catalog;
pub mod health;
pub mod prescriptions;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(catalog::router())
        .merge(prescriptions::router())
        .merge(cashier::router())
}

/// Build the fully configured application with middleware and state.
///
/// Used by `main` and by the handler tests.
pub fn build_app(state: AppState) -> Router {
    build_router()
        // CORS - any origin, the screens are served from elsewhere
        .layer(CorsLayer::permissive())
        // Trace - request/response spans
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `{ "status": "success", "data": [...] }`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub status: &'static str,
    pub data: Vec<T>,
}

impl<T> DataResponse<T> {
    pub fn success(data: Vec<T>) -> Self {
        DataResponse {
            status: "success",
            data,
        }
    }
}

/// Shared helpers for the handler tests.
#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use salma_core::{Doctor, Medicine, Patient};
    use salma_db::{Database, DbConfig};

    use crate::{build_app, AppState};

    /// App over a fresh in-memory database.
    pub async fn test_app() -> (Router, Database) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (build_app(AppState::new(db.clone())), db)
    }

    /// Same catalog as the repository tests: `med-a` sells for 1221,
    /// `med-b` for 375 and has no KFA code.
    pub async fn seed(db: &Database) {
        for medicine in [
            Medicine {
                id: "med-a".to_string(),
                name: "Paracetamol 500mg".to_string(),
                stock: 10,
                hna_price: Some(1000.0),
                margin_percentage: Some(10.0),
                tax_rate: Some(11.0),
                kfa_code: Some("KFA-001".to_string()),
            },
            Medicine {
                id: "med-b".to_string(),
                name: "Vitamin C 100mg".to_string(),
                stock: 5,
                hna_price: Some(333.0),
                margin_percentage: Some(5.0),
                tax_rate: Some(7.0),
                kfa_code: None,
            },
        ] {
            db.medicines().insert(&medicine).await.unwrap();
        }
        db.patients()
            .insert(&Patient {
                id: "pat-1".to_string(),
                full_name: "Siti Rahma".to_string(),
                mr_no: Some("MR-0001".to_string()),
            })
            .await
            .unwrap();
        db.doctors()
            .insert(&Doctor {
                id: "doc-1".to_string(),
                name: "dr. Budi".to_string(),
                specialization: Some("Umum".to_string()),
            })
            .await
            .unwrap();
    }

    /// Sends `request` and returns status plus the body parsed as JSON
    /// (`Value::Null` if the body is not JSON).
    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}
