//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;
use verdura_core::VerduraError;

/// Wrapper turning domain errors into JSON error responses.
pub struct ApiError(pub VerduraError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<VerduraError> for ApiError {
    fn from(e: VerduraError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            VerduraError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
            VerduraError::AuthenticationFailed { reason } => {
                (StatusCode::UNAUTHORIZED, reason.clone())
            }
            VerduraError::Forbidden { reason } => (StatusCode::FORBIDDEN, reason.clone()),
            VerduraError::NotFound { entity, .. } => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            VerduraError::AlreadyExists { entity } => {
                (StatusCode::CONFLICT, format!("{entity} already exists"))
            }
            VerduraError::Database(_) | VerduraError::Crypto(_) | VerduraError::Internal(_) => {
                // Internal details stay in the logs, not the response.
                error!(error = %self.0, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".into())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
