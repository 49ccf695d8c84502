//! Ledger error → HTTP response mapping

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use splitbill_ledger::LedgerError;
use tracing::{debug, error};

/// Request failure surfaced to an HTTP caller as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    /// Rejected by the ledger
    Ledger(LedgerError),
    /// Body could not be read as JSON of the expected shape
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Ledger(err) => match err {
                LedgerError::Validation(_) => StatusCode::BAD_REQUEST,
                LedgerError::BillNotFound(_) | LedgerError::ParticipantNotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                LedgerError::Forbidden { .. } => StatusCode::FORBIDDEN,
                LedgerError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Ledger(err) => err.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError::Ledger(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "rejected request body");
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!(error = %message, "request failed");
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
