//! API error handling
//!
//! Maps the domain taxonomy onto HTTP statuses with `{code, message}`
//! JSON bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use skinforge_types::SkinforgeError;
use thiserror::Error;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Domain(#[from] SkinforgeError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::Domain(err) => match err {
                SkinforgeError::InvalidAmount { .. }
                | SkinforgeError::InvalidRequiredQuantity { .. }
                | SkinforgeError::PresetKindMismatch { .. } => StatusCode::BAD_REQUEST,
                SkinforgeError::PresetNotFound { .. }
                | SkinforgeError::LedgerEntryNotFound { .. } => StatusCode::NOT_FOUND,
                SkinforgeError::PresetInactive { .. }
                | SkinforgeError::InsufficientFragments { .. } => StatusCode::CONFLICT,
                SkinforgeError::UnresolvableIdentity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                SkinforgeError::RewardGrantFailed { .. } => StatusCode::BAD_GATEWAY,
                SkinforgeError::BalanceOverflow | SkinforgeError::Storage { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::Domain(err) => err.error_code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
