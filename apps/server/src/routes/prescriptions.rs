//! Prescription submission route.
//!
//! ## Request
//! ```http
//! POST /api/submit-prescription
//! Content-Type: application/json
//! Idempotency-Key: 3b1f0c9e-…        (optional)
//!
//! { "patient_id": "…", "doctor_id": "…", "items": [{ "drug_id": "…", "qty": 2 }] }
//! ```
//!
//! ## Response
//! ```json
//! {
//!   "status": "success",
//!   "message": "Prescription submitted",
//!   "invoice_id": "…",
//!   "prescription_id": "…",
//!   "total_amount": 2817
//! }
//! ```
//! A retry with the same `Idempotency-Key` returns the first response's ids
//! with the message "Prescription already submitted". A key that is not
//! visible ASCII is rejected with 400 rather than ignored.
//!
//! ## Errors
//! | Cause                                   | Status |
//! |-----------------------------------------|--------|
//! | malformed JSON, empty cart, no patient  | 400    |
//! | unknown drug, patient or doctor         | 422    |
//! | any other store failure                 | 500    |
//!
//! An unknown drug is the client's reference error, so it is 422 rather than
//! a server error. Every error body is `{status:"error", message}`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use ts_rs::TS;

use salma_core::{Money, SubmitPrescription};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Header carrying the client's retry token.
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/submit-prescription", post(submit_prescription))
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct SubmitPrescriptionResponse {
    pub status: String,
    pub message: String,
    pub invoice_id: String,
    pub prescription_id: String,
    pub total_amount: Money,
}

async fn submit_prescription(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmitPrescription>, JsonRejection>,
) -> ApiResult<Json<SubmitPrescriptionResponse>> {
    let Json(mut request) = payload?;

    request.idempotency_key = headers
        .get(IDEMPOTENCY_KEY_HEADER)
        .map(|value| {
            value
                .to_str()
                .map(str::to_string)
                .map_err(|_| ApiError::client_input("Idempotency-Key must be visible ASCII"))
        })
        .transpose()?;

    let receipt = state.db.prescriptions().submit(&request).await?;

    let message = if receipt.replayed {
        "Prescription already submitted"
    } else {
        "Prescription submitted"
    };

    Ok(Json(SubmitPrescriptionResponse {
        status: "success".to_string(),
        message: message.to_string(),
        invoice_id: receipt.invoice_id,
        prescription_id: receipt.prescription_id,
        total_amount: receipt.total_amount,
    }))
}
