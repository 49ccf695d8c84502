//! API Handlers
//!
//! Each handler maps 1:1 onto a `BillLedger` operation.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use splitbill_ledger::{Bill, BillSummary, NewBill};

use super::error::ApiError;
use super::AppState;

// ============ Request Types ============
//
// Body rejections (bad JSON, wrong content type, missing fields) are answered
// as 400 `{"error": ...}` through `ApiError`.

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub participant_address: String,
    #[serde(alias = "txHash")]
    pub payment_reference: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub wallet_address: String,
}

// ============ Handlers ============

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Bills created by or owed by a wallet
pub async fn list_bills(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Json<Vec<Bill>> {
    Json(state.ledger.list_for(&address))
}

/// Dashboard figures for a wallet
pub async fn bill_summary(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Json<BillSummary> {
    Json(state.ledger.summary_for(&address))
}

/// Get a bill by ID
pub async fn get_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
) -> Result<Json<Bill>, ApiError> {
    Ok(Json(state.ledger.get(&bill_id)?))
}

/// Create a new bill
pub async fn create_bill(
    State(state): State<AppState>,
    payload: Result<Json<NewBill>, JsonRejection>,
) -> Result<(StatusCode, Json<Bill>), ApiError> {
    let Json(payload) = payload?;
    let bill = state.ledger.create(payload)?;
    Ok((StatusCode::CREATED, Json(bill)))
}

/// Record a participant's payment
pub async fn record_payment(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<Bill>, ApiError> {
    let Json(payload) = payload?;
    let bill = state.ledger.record_payment(
        &bill_id,
        &payload.participant_address,
        payload.payment_reference,
    )?;
    Ok(Json(bill))
}

/// Delete a bill (creator only)
pub async fn delete_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    state.ledger.remove(&bill_id, &payload.wallet_address)?;
    Ok(Json(serde_json::json!({ "message": "Bill deleted successfully" })))
}
