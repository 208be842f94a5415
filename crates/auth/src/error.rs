//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
    UserNotFound,
    UserLoadError,
    UserProvisionFailed,
    MissingEmail,
    AuthenticationFailed,
    InvalidUserId,
    /// Caller's role is insufficient for this surface
    InsufficientRole,
    /// Account has been suspended by an administrator
    AccountSuspended,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingAuthorization => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTHORIZATION",
                "Authorization header required",
            ),
            AuthError::InvalidAuthorizationFormat => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token",
            ),
            AuthError::UserNotFound => {
                (StatusCode::UNAUTHORIZED, "USER_NOT_FOUND", "User not found")
            }
            AuthError::UserLoadError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "USER_LOAD_ERROR",
                "Failed to load user",
            ),
            AuthError::UserProvisionFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "USER_PROVISION_FAILED",
                "Failed to provision user profile",
            ),
            AuthError::MissingEmail => (
                StatusCode::UNAUTHORIZED,
                "MISSING_EMAIL",
                "Token is missing an email claim",
            ),
            AuthError::AuthenticationFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_ERROR",
                "Authentication failed",
            ),
            AuthError::InvalidUserId => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid user ID in token",
            ),
            AuthError::InsufficientRole => (
                StatusCode::FORBIDDEN,
                "INSUFFICIENT_ROLE",
                "Caller role does not allow this operation",
            ),
            AuthError::AccountSuspended => (
                StatusCode::FORBIDDEN,
                "ACCOUNT_SUSPENDED",
                "Account has been suspended",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        let cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::MissingAuthorization, StatusCode::UNAUTHORIZED),
            (
                AuthError::InvalidAuthorizationFormat,
                StatusCode::UNAUTHORIZED,
            ),
            (AuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AuthError::UserNotFound, StatusCode::UNAUTHORIZED),
            (AuthError::UserLoadError, StatusCode::INTERNAL_SERVER_ERROR),
            (
                AuthError::UserProvisionFailed,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AuthError::MissingEmail, StatusCode::UNAUTHORIZED),
            (
                AuthError::AuthenticationFailed,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AuthError::InvalidUserId, StatusCode::UNAUTHORIZED),
            (AuthError::InsufficientRole, StatusCode::FORBIDDEN),
            (AuthError::AccountSuspended, StatusCode::FORBIDDEN),
        ];

        for (error, expected_status) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }
}
