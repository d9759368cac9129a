//! Catalog list routes for the pharmacist screen.
//!
//! Drug prices are computed by the pricing engine on every request from the
//! catalog's HNA, margin and tax; nothing is cached.
//!
//! A store failure on any list is a 500 with the JSON error body
//! `{status:"error", message}`, the same shape as every other route, not a
//! plain-text message.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::debug;

use salma_core::pricing::selling_price;
use salma_core::{Doctor, MedicineListing, Patient};

use super::DataResponse;
use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/drugs-list", get(drugs_list))
        .route("/api/patients-list", get(patients_list))
        .route("/api/doctors-list", get(doctors_list))
}

async fn drugs_list(State(state): State<AppState>) -> ApiResult<Json<DataResponse<MedicineListing>>> {
    let medicines = state.db.medicines().list_all().await?;

    let listings: Vec<MedicineListing> = medicines
        .iter()
        .map(|medicine| MedicineListing {
            id: medicine.id.clone(),
            name: medicine.name.clone(),
            stock: medicine.stock,
            price: selling_price(medicine),
        })
        .collect();

    debug!(count = listings.len(), "Drug list priced");
    Ok(Json(DataResponse::success(listings)))
}

async fn patients_list(State(state): State<AppState>) -> ApiResult<Json<DataResponse<Patient>>> {
    let patients = state.db.patients().list_all().await?;
    Ok(Json(DataResponse::success(patients)))
}

async fn doctors_list(State(state): State<AppState>) -> ApiResult<Json<DataResponse<Doctor>>> {
    let doctors = state.db.doctors().list_active().await?;
    Ok(Json(DataResponse::success(doctors)))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{get, seed, send, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_drugs_list_prices_each_row() {
        let (app, db) = test_app().await;
        seed(&db).await;

        let (status, body) = send(&app, get("/api/drugs-list")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "status": "success",
                "data": [
                    { "id": "med-a", "name": "Paracetamol 500mg", "stock": 10, "price": 1221 },
                    { "id": "med-b", "name": "Vitamin C 100mg", "stock": 5, "price": 375 }
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_drugs_list_empty_catalog() {
        let (app, _db) = test_app().await;
        let (status, body) = send(&app, get("/api/drugs-list")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_patients_and_doctors_lists() {
        let (app, db) = test_app().await;
        seed(&db).await;

        let (status, body) = send(&app, get("/api/patients-list")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!([{ "id": "pat-1", "full_name": "Siti Rahma", "mr_no": "MR-0001" }])
        );

        let (status, body) = send(&app, get("/api/doctors-list")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!([{ "id": "doc-1", "name": "dr. Budi", "specialization": "Umum" }])
        );
    }

    #[tokio::test]
    async fn test_store_failure_is_500_json() {
        let (app, db) = test_app().await;
        sqlx::query("DROP TABLE medicines")
            .execute(db.pool())
            .await
            .unwrap();

        let (status, body) = send(&app, get("/api/drugs-list")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("medicines"));
    }
}
