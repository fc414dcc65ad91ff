//! Client-side error handling for calls to the job-board API.
//!
//! Every failure is classified into an [`ErrorCode`] so callers can branch on the
//! kind of failure (e.g. "token rejected" vs. "server unreachable") without
//! matching on HTTP status numbers.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable classification of an API failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Server answered with a client error (4xx)
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    UnprocessableEntity,
    TooManyRequests,

    // Server answered with a server error (5xx)
    ServerError,

    // No usable answer
    Transport,
    InvalidResponse,
    InvalidToken,
}

impl ErrorCode {
    /// Classify an HTTP status
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ErrorCode::Unauthorized,
            StatusCode::FORBIDDEN => ErrorCode::Forbidden,
            StatusCode::NOT_FOUND => ErrorCode::NotFound,
            StatusCode::CONFLICT => ErrorCode::Conflict,
            StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::UnprocessableEntity,
            StatusCode::TOO_MANY_REQUESTS => ErrorCode::TooManyRequests,
            s if s.is_server_error() => ErrorCode::ServerError,
            _ => ErrorCode::BadRequest,
        }
    }

    /// Get the string representation of the error code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "bad_request",
            ErrorCode::Unauthorized => "unauthorized",
            ErrorCode::Forbidden => "forbidden",
            ErrorCode::NotFound => "not_found",
            ErrorCode::Conflict => "conflict",
            ErrorCode::UnprocessableEntity => "unprocessable_entity",
            ErrorCode::TooManyRequests => "too_many_requests",
            ErrorCode::ServerError => "server_error",
            ErrorCode::Transport => "transport",
            ErrorCode::InvalidResponse => "invalid_response",
            ErrorCode::InvalidToken => "invalid_token",
        }
    }
}

/// Failure of a single API call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to reach server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("bearer token contains characters that cannot be sent in a header")]
    InvalidToken,
}

impl ApiError {
    /// Build a status error from a non-2xx response body.
    ///
    /// The backend reports failures as `{"message": ...}`, the JWT layer as
    /// `{"msg": ...}`; anything else falls back to the raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["message", "msg", "error"]
                    .iter()
                    .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(str::to_string))
            })
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    trimmed.to_string()
                }
            });

        ApiError::Status { status, message }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Transport(_) => ErrorCode::Transport,
            ApiError::Status { status, .. } => ErrorCode::from_status(*status),
            ApiError::Decode(_) => ErrorCode::InvalidResponse,
            ApiError::InvalidToken => ErrorCode::InvalidToken,
        }
    }

    /// True when the server rejected the credential
    pub fn is_unauthorized(&self) -> bool {
        self.code() == ErrorCode::Unauthorized
    }

    /// Server-provided message, if the server answered at all
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_from_status() {
        assert_eq!(ErrorCode::from_status(StatusCode::UNAUTHORIZED), ErrorCode::Unauthorized);
        assert_eq!(ErrorCode::from_status(StatusCode::NOT_FOUND), ErrorCode::NotFound);
        assert_eq!(ErrorCode::from_status(StatusCode::CONFLICT), ErrorCode::Conflict);
        assert_eq!(ErrorCode::from_status(StatusCode::BAD_GATEWAY), ErrorCode::ServerError);
        assert_eq!(ErrorCode::from_status(StatusCode::IM_A_TEAPOT), ErrorCode::BadRequest);
    }

    #[test]
    fn test_message_from_backend_envelope() {
        let err = ApiError::from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"success": false, "message": "Invalid credentials"}"#,
        );
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), Some("Invalid credentials"));
    }

    #[test]
    fn test_message_from_jwt_layer() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, r#"{"msg": "Token has expired"}"#);
        assert_eq!(err.server_message(), Some("Token has expired"));
    }

    #[test]
    fn test_message_falls_back_to_body_then_reason() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.server_message(), Some("upstream down"));
        assert_eq!(err.code(), ErrorCode::ServerError);

        let err = ApiError::from_response(StatusCode::NOT_FOUND, "");
        assert_eq!(err.server_message(), Some("Not Found"));
    }

    #[test]
    fn test_display() {
        let err = ApiError::from_response(StatusCode::CONFLICT, r#"{"message": "Email already registered"}"#);
        assert_eq!(err.to_string(), "server returned 409 Conflict: Email already registered");
        assert_eq!(err.code().as_str(), "conflict");
    }
}
