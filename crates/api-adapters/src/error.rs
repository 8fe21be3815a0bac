use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use domains::DomainError;
use serde_json::json;
use tracing::Level;

/// A `DomainError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self.0 {
            DomainError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
            DomainError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            DomainError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            DomainError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };
        match refusal_level(status) {
            Some(Level::WARN) => tracing::warn!(%status, %message, "request refused"),
            Some(_) => tracing::debug!(%status, %message, "request refused"),
            None => {}
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Authorization refusals are worth a warning; other client errors are
/// routine. Server errors are logged where their detail is still known.
fn refusal_level(status: StatusCode) -> Option<Level> {
    match status {
        StatusCode::FORBIDDEN => Some(Level::WARN),
        s if s.is_client_error() => Some(Level::DEBUG),
        _ => None,
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(DomainError::Unauthenticated("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(DomainError::forbidden("x")), StatusCode::FORBIDDEN);
        assert_eq!(status_of(DomainError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::conflict("x")), StatusCode::CONFLICT);
        assert_eq!(status_of(DomainError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::internal("x")), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_forbidden_is_logged_as_warning() {
        assert_eq!(refusal_level(StatusCode::FORBIDDEN), Some(Level::WARN));
        assert_eq!(refusal_level(StatusCode::NOT_FOUND), Some(Level::DEBUG));
        assert_eq!(refusal_level(StatusCode::UNAUTHORIZED), Some(Level::DEBUG));
        assert_eq!(refusal_level(StatusCode::INTERNAL_SERVER_ERROR), None);
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = ApiError(DomainError::Unauthenticated("expired".into())).into_response();
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");

        let response = ApiError(DomainError::forbidden("no")).into_response();
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }
}
