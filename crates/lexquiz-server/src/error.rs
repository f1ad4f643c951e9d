use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors a handler can return; each maps to a status and a
/// `{message, error?}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// `detail` is only populated outside production.
    #[error("{message}")]
    Internal { message: String, detail: Option<String> },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Internal {
                message,
                detail: Some(detail),
            } => json!({ "message": message, "error": detail }),
            other => json!({ "message": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Log an unexpected failure and turn it into a 500.
pub(crate) fn internal(message: &str, production: bool, e: impl std::fmt::Display) -> ApiError {
    tracing::error!("{message}: {e}");
    ApiError::Internal {
        message: message.to_string(),
        detail: (!production).then(|| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_hides_detail_in_production() {
        match internal("Server error", true, "disk full") {
            ApiError::Internal { detail, .. } => assert!(detail.is_none()),
            other => panic!("unexpected {other:?}"),
        }
        match internal("Server error", false, "disk full") {
            ApiError::Internal { detail, .. } => assert_eq!(detail.as_deref(), Some("disk full")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn statuses() {
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
    }
}
