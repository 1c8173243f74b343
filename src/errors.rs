use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::error;

/// Every failure a handler or store operation can report.
///
/// A repeated like is deliberately NOT in here: it is an informational
/// outcome (`alreadyLiked: true`), not an error.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Unauthenticated,
    InvalidCredentials,
    UsernameTaken,
    NotFound(&'static str),
    SelfFollow,
    AlreadyFollowing,
    RateLimited,
    Store(String),
    Upload(String),
}

impl ApiError {
    /// Transient failures are worth one retry on write paths.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Store(_))
    }
}

/// Convert our custom errors to HTTP responses
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({
                      "error": msg
                    })),
                )
                    .into_response();
            }
            // Unauthenticated writes land on the login prompt instead of a
            // hard failure.
            ApiError::Unauthenticated => return Redirect::to("/log-in").into_response(),
            // Same public message for unknown user and wrong password.
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
            ApiError::UsernameTaken => {
                (StatusCode::CONFLICT, "Username is already taken".to_string())
            }
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            ApiError::SelfFollow => {
                (StatusCode::BAD_REQUEST, "You cannot follow yourself".to_string())
            }
            ApiError::AlreadyFollowing => (
                StatusCode::BAD_REQUEST,
                "You are already following this user".to_string(),
            ),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many login attempts, try again later".to_string(),
            ),
            ApiError::Store(detail) => {
                error!("store error: {}", detail);
                let message = if cfg!(debug_assertions) {
                    format!("Internal server error: {detail}")
                } else {
                    "Internal server error".to_string()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            ApiError::Upload(detail) => {
                error!("upload error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error uploading file".to_string(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({
              "error": message
            })),
        )
            .into_response()
    }
}
