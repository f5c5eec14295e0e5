//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use folio_core::error::{DomainError, RepoError};
use folio_core::ports::AuthError;
use folio_shared::ErrorResponse;

use crate::observability::RequestId;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Upstream failure: {0}")]
    BadGateway(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn body(&self) -> ErrorResponse {
        match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized().with_detail(detail),
            AppError::Forbidden(detail) => ErrorResponse::forbidden(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::BadGateway(detail) => {
                tracing::error!(detail = %detail, "Hosted backend failure");
                ErrorResponse::bad_gateway()
            }
            AppError::Internal(detail) => {
                tracing::error!(detail = %detail, "Internal error");
                ErrorResponse::internal_error()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

/// Body rejections from extractors, rendered like every other error.
pub fn rejection(req: &HttpRequest, detail: String) -> actix_web::Error {
    let mut body = ErrorResponse::bad_request(detail);
    if let Some(id) = RequestId::of(req) {
        body = body.with_request_id(id.as_str());
    }
    actix_web::error::InternalError::from_response(
        "invalid request body",
        HttpResponse::BadRequest().json(body),
    )
    .into()
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{entity_type} with id {id} not found"))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Unauthorized => AppError::Unauthorized("Sign in to continue.".to_string()),
            DomainError::Forbidden(reason) => AppError::Forbidden(reason.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => AppError::BadGateway(msg),
            RepoError::Query(msg) | RepoError::Decode(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password.".to_string())
            }
            AuthError::TokenExpired => {
                AppError::Unauthorized("Your session has expired. Please sign in again.".to_string())
            }
            AuthError::InvalidToken(_) | AuthError::MissingAuth => {
                AppError::Unauthorized("Sign in to continue.".to_string())
            }
            AuthError::AlreadyRegistered => {
                AppError::Conflict("This email is already registered.".to_string())
            }
            AuthError::ConfirmationPending => AppError::Forbidden(
                "Confirm your email address before signing in.".to_string(),
            ),
            AuthError::Rejected(msg) => AppError::BadRequest(msg),
            AuthError::HashingError(msg) => AppError::Internal(msg),
            AuthError::Provider(msg) => AppError::BadGateway(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_codes() {
        let demo = AppError::from(DomainError::Forbidden("the demo account cannot manage posts"));
        assert_eq!(demo.status_code(), StatusCode::FORBIDDEN);

        let missing = AppError::from(DomainError::NotFound {
            entity_type: "Post",
            id: Uuid::nil(),
        });
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        assert_eq!(AppError::from(RepoError::NotFound).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(RepoError::Connection("timeout".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::from(AuthError::AlreadyRegistered).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let err = AppError::from(RepoError::Query("relation \"posts\" does not exist".into()));
        let body = err.body();

        assert_eq!(body.status, 500);
        assert!(body.detail.as_deref().is_none_or(|d| !d.contains("relation")));
    }
}
