//! Cashier routes: find unpaid bills and show one bill's lines.
//!
//! ## Search
//! ```text
//! GET /api/cashier/search-bill?keyword=siti
//!
//! keyword missing/blank ──► 400 {status:"error"}
//! unpaid bills found    ──► 200 {status:"success",   data:[Invoice…]}
//! none                  ──► 200 {status:"not_found", message, data:[]}
//! ```
//! The keyword is required but does not narrow the result: every unpaid
//! bill is returned, newest first.
//!
//! ## Details
//! `GET /api/cashier/bill-details/{prescription_id}` lists the bill's lines
//! and grand total. An unknown id is an empty bill, not an error. A store
//! failure is a 500 with the JSON error body rather than plain text.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use salma_core::validation::validate_search_keyword;
use salma_core::{BillLine, Invoice, Money};

use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/cashier/search-bill", get(search_bill))
        .route(
            "/api/cashier/bill-details/{prescription_id}",
            get(bill_details),
        )
}

#[derive(Debug, Deserialize)]
pub struct SearchBillQuery {
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct SearchBillResponse {
    /// `success` or `not_found`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Vec<Invoice>,
}

async fn search_bill(
    State(state): State<AppState>,
    Query(query): Query<SearchBillQuery>,
) -> ApiResult<Json<SearchBillResponse>> {
    let keyword = validate_search_keyword(query.keyword.as_deref())?;
    debug!(keyword = %keyword, "Cashier bill search");

    let invoices = state.db.invoices().search_unpaid().await?;

    let response = if invoices.is_empty() {
        SearchBillResponse {
            status: "not_found".to_string(),
            message: Some("No unpaid bills".to_string()),
            data: Vec::new(),
        }
    } else {
        SearchBillResponse {
            status: "success".to_string(),
            message: None,
            data: invoices,
        }
    };

    Ok(Json(response))
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct BillDetailsResponse {
    pub status: String,
    pub data: Vec<BillLine>,
    pub grand_total: Money,
}

async fn bill_details(
    State(state): State<AppState>,
    Path(prescription_id): Path<String>,
) -> ApiResult<Json<BillDetailsResponse>> {
    let bill = state.db.invoices().bill_details(&prescription_id).await?;

    Ok(Json(BillDetailsResponse {
        status: "success".to_string(),
        data: bill.items,
        grand_total: bill.grand_total,
    }))
}
