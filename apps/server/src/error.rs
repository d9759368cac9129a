//! # API Error
//!
//! The one error type handlers return. The HTTP status comes from the
//! error's [`ErrorKind`], never from its message text.
//!
//! | Kind                | Status | Raised for                                   |
//! |---------------------|--------|----------------------------------------------|
//! | `ClientInput`       | 400    | empty cart, no patient, bad JSON, overflow   |
//! | `ReferenceNotFound` | 422    | unknown drug, patient or doctor              |
//! | `StoreFailure`      | 500    | query/transaction failure                    |
//! | `Unavailable`       | 503    | pool exhausted, database unreachable         |
//!
//! Every error body has the same shape:
//! ```json
//! { "status": "error", "message": "Medicine 7f3e… not found in catalog" }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use salma_core::{CoreError, ValidationError};
use salma_db::DbError;

/// Error category deciding the response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ClientInput,
    ReferenceNotFound,
    StoreFailure,
    Unavailable,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::ClientInput => StatusCode::BAD_REQUEST,
            ErrorKind::ReferenceNotFound => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Handler error.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ApiError {
            kind,
            message: message.into(),
        }
    }

    pub fn client_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ClientInput, message)
    }

    pub fn reference_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ReferenceNotFound, message)
    }

    pub fn store_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreFailure, message)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.kind {
            ErrorKind::StoreFailure | ErrorKind::Unavailable => {
                error!(kind = ?self.kind, message = %self.message, "Request failed");
            }
            ErrorKind::ClientInput | ErrorKind::ReferenceNotFound => {
                warn!(kind = ?self.kind, message = %self.message, "Request rejected");
            }
        }

        let body = ErrorBody {
            status: "error",
            message: &self.message,
        };
        (self.kind.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::client_input(err.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Domain(CoreError::Validation(validation)) => validation.into(),
            DbError::Domain(err @ CoreError::TotalOverflow { .. }) => {
                ApiError::client_input(err.to_string())
            }
            DbError::Domain(err @ CoreError::MedicineNotFound(_)) => {
                ApiError::reference_not_found(err.to_string())
            }
            DbError::ForeignKeyViolation { .. } => {
                ApiError::reference_not_found("Unknown patient or doctor reference")
            }
            err @ DbError::NotFound { .. } => ApiError::reference_not_found(err.to_string()),
            err @ (DbError::PoolExhausted | DbError::ConnectionFailed(_)) => {
                ApiError::new(ErrorKind::Unavailable, err.to_string())
            }
            other => ApiError::store_failure(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::client_input(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_kind() {
        assert_eq!(ErrorKind::ClientInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorKind::ReferenceNotFound.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorKind::StoreFailure.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ErrorKind::Unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_db_error_mapping() {
        let err: ApiError = DbError::from(ValidationError::EmptyCart).into();
        assert_eq!(err.kind, ErrorKind::ClientInput);
        assert_eq!(err.message, "Cart is empty");

        let err: ApiError = DbError::from(CoreError::MedicineNotFound("m-9".to_string())).into();
        assert_eq!(err.kind, ErrorKind::ReferenceNotFound);
        assert!(err.message.contains("m-9"));

        let err: ApiError = DbError::from(CoreError::TotalOverflow { line: 2 }).into();
        assert_eq!(err.kind, ErrorKind::ClientInput);

        let err: ApiError = DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::ReferenceNotFound);

        let err: ApiError = DbError::PoolExhausted.into();
        assert_eq!(err.kind, ErrorKind::Unavailable);

        let err: ApiError = DbError::QueryFailed("no such table: invoices".to_string()).into();
        assert_eq!(err.kind, ErrorKind::StoreFailure);
        assert!(err.message.contains("no such table"));
    }
}
