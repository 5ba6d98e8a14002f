/// Unified Error Handling Module
///
/// Domain-specific error types for the session token core, unified under
/// a single `AppError` that maps onto HTTP responses. Rejections carry a
/// fixed, user-facing message from the taxonomy below; internal error
/// detail goes to the structured log, never to the client.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

/// Validation errors for input data
#[derive(Debug, Clone)]
pub enum ValidationError {
    EmptyField(String),
    TooShort(String, usize),
    TooLong(String, usize),
    InvalidFormat(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField(field) => write!(f, "{} is empty", field),
            ValidationError::TooShort(field, min) => {
                write!(f, "{} is too short (minimum {} characters)", field, min)
            }
            ValidationError::TooLong(field, max) => {
                write!(f, "{} is too long (maximum {} characters)", field, max)
            }
            ValidationError::InvalidFormat(field) => write!(f, "{} has invalid format", field),
        }
    }
}

impl StdError for ValidationError {}

/// Token verification failures.
///
/// `Expired` and `IssuerMismatch` are only ever produced for a token whose
/// signature already checked out; everything else collapses into
/// `MalformedOrTampered`.
#[derive(Debug, Clone)]
pub enum TokenError {
    MalformedOrTampered,
    Expired,
    IssuerMismatch,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::MalformedOrTampered => write!(f, "token is malformed or tampered"),
            TokenError::Expired => write!(f, "token has expired"),
            TokenError::IssuerMismatch => write!(f, "token issuer does not match configuration"),
        }
    }
}

impl StdError for TokenError {}

/// Revocation ledger failures. A missing key is never an error; this only
/// covers the backing store itself misbehaving.
#[derive(Debug)]
pub enum LedgerError {
    Backend(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::Backend(msg) => write!(f, "revocation ledger error: {}", msg),
        }
    }
}

impl StdError for LedgerError {}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    MissingRequired(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingRequired(key) => write!(f, "missing required config: {}", key),
        }
    }
}

impl StdError for ConfigError {}

/// Request rejection reasons surfaced to the client as 401 responses.
///
/// Expired and issuer-mismatched tokens share `SessionInvalid` so the
/// response does not reveal which check failed.
#[derive(Debug, Clone)]
pub enum AuthError {
    MissingHeader,
    InvalidHeaderFormat,
    EmptyToken,
    Revoked,
    SessionInvalid,
    InvalidCredentials,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingHeader => write!(f, "authorization header is missing"),
            AuthError::InvalidHeaderFormat => write!(f, "authorization header format is invalid"),
            AuthError::EmptyToken => write!(f, "bearer token is empty"),
            AuthError::Revoked => write!(f, "token has been revoked"),
            AuthError::SessionInvalid => write!(f, "session is no longer valid"),
            AuthError::InvalidCredentials => write!(f, "invalid credentials"),
        }
    }
}

impl StdError for AuthError {}

/// Central error type that all application errors map to
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    Token(TokenError),
    Ledger(LedgerError),
    Config(ConfigError),
    Auth(AuthError),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "{}", e),
            AppError::Token(e) => write!(f, "{}", e),
            AppError::Ledger(e) => write!(f, "{}", e),
            AppError::Config(e) => write!(f, "{}", e),
            AppError::Auth(e) => write!(f, "{}", e),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for AppError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::Token(err)
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        AppError::Ledger(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Human-readable error message
    pub message: String,
    /// Error code for client-side handling
    pub code: String,
    /// HTTP status code
    pub status: u16,
    /// Timestamp when error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_id: String, message: String, code: String, status: u16) -> Self {
        Self {
            error_id,
            message,
            code,
            status,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Trait for converting errors to HTTP responses with proper logging
pub trait ErrorHandler {
    fn error_response(&self, request_id: &str) -> (StatusCode, ErrorResponse);
    fn log_error(&self, request_id: &str);
}

impl ErrorHandler for AppError {
    fn error_response(&self, request_id: &str) -> (StatusCode, ErrorResponse) {
        let (status, code, message) = match self {
            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR".to_string(),
                e.to_string(),
            ),

            AppError::Auth(e) => {
                let (code, message) = match e {
                    AuthError::MissingHeader | AuthError::EmptyToken => {
                        ("MISSING_TOKEN", "Please log in first")
                    }
                    AuthError::InvalidHeaderFormat => {
                        ("INVALID_AUTH_HEADER", "Format authorization header invalid")
                    }
                    AuthError::Revoked => (
                        "TOKEN_REVOKED",
                        "The token has logged out, please log in again",
                    ),
                    AuthError::SessionInvalid => ("TOKEN_INVALID", "Please log in again"),
                    AuthError::InvalidCredentials => {
                        ("INVALID_CREDENTIALS", "Invalid email or password")
                    }
                };
                (
                    StatusCode::UNAUTHORIZED,
                    code.to_string(),
                    message.to_string(),
                )
            }

            AppError::Token(e) => match e {
                TokenError::Expired | TokenError::IssuerMismatch => (
                    StatusCode::UNAUTHORIZED,
                    "TOKEN_INVALID".to_string(),
                    "Please log in again".to_string(),
                ),
                TokenError::MalformedOrTampered => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR".to_string(),
                    "Internal server error".to_string(),
                ),
            },

            AppError::Ledger(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR".to_string(),
                "Internal server error".to_string(),
            ),

            AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR".to_string(),
                "Server configuration error".to_string(),
            ),

            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR".to_string(),
                "Internal server error".to_string(),
            ),
        };

        let error_response =
            ErrorResponse::new(request_id.to_string(), message, code, status.as_u16());

        (status, error_response)
    }

    fn log_error(&self, request_id: &str) {
        match self {
            AppError::Validation(e) => {
                tracing::warn!(
                    request_id = request_id,
                    error = %e,
                    "Validation error"
                );
            }
            AppError::Auth(e) => {
                tracing::warn!(
                    request_id = request_id,
                    error = %e,
                    "Request rejected"
                );
            }
            AppError::Token(TokenError::Expired) | AppError::Token(TokenError::IssuerMismatch) => {
                tracing::warn!(
                    request_id = request_id,
                    error = %self,
                    "Token rejected"
                );
            }
            AppError::Token(TokenError::MalformedOrTampered) => {
                tracing::error!(
                    request_id = request_id,
                    error = %self,
                    "Token verification error"
                );
            }
            AppError::Ledger(e) => {
                tracing::error!(
                    request_id = request_id,
                    error = %e,
                    "Revocation ledger error"
                );
            }
            AppError::Config(e) => {
                tracing::error!(
                    request_id = request_id,
                    error = %e,
                    "Configuration error"
                );
            }
            AppError::Internal(msg) => {
                tracing::error!(
                    request_id = request_id,
                    error = %msg,
                    "Internal error"
                );
            }
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let request_id = uuid::Uuid::new_v4().to_string();
        self.log_error(&request_id);

        let (status, error_response) = <Self as ErrorHandler>::error_response(self, &request_id);

        HttpResponse::build(status).json(error_response)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Token(TokenError::Expired) | AppError::Token(TokenError::IssuerMismatch) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Token(TokenError::MalformedOrTampered) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error context for enhanced logging
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub request_id: String,
    pub operation: String,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            operation: operation.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = ValidationError::EmptyField("email".to_string());
        assert_eq!(err.to_string(), "email is empty");
    }

    #[test]
    fn token_error_converts_to_app_error() {
        let app_err: AppError = TokenError::Expired.into();
        match app_err {
            AppError::Token(TokenError::Expired) => (),
            _ => panic!("Expected Token(Expired)"),
        }
    }

    #[test]
    fn rejection_reasons_map_to_unauthorized() {
        for reason in [
            AuthError::MissingHeader,
            AuthError::InvalidHeaderFormat,
            AuthError::EmptyToken,
            AuthError::Revoked,
            AuthError::SessionInvalid,
            AuthError::InvalidCredentials,
        ] {
            assert_eq!(
                AppError::Auth(reason).status_code(),
                StatusCode::UNAUTHORIZED
            );
        }
    }

    #[test]
    fn ledger_failure_maps_to_internal_error() {
        let err = AppError::Ledger(LedgerError::Backend("connection refused".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let (_, response) = <AppError as ErrorHandler>::error_response(&err, "req-1");
        assert_eq!(response.message, "Internal server error");
        assert!(!response.message.contains("connection refused"));
    }

    #[test]
    fn malformed_token_maps_to_internal_error() {
        let err = AppError::Token(TokenError::MalformedOrTampered);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn expired_and_issuer_mismatch_share_one_message() {
        let (_, expired) = <AppError as ErrorHandler>::error_response(
            &AppError::Token(TokenError::Expired),
            "req-1",
        );
        let (_, mismatch) = <AppError as ErrorHandler>::error_response(
            &AppError::Token(TokenError::IssuerMismatch),
            "req-2",
        );
        assert_eq!(expired.message, mismatch.message);
    }

    #[test]
    fn error_response_creation() {
        let response = ErrorResponse::new(
            "test-123".to_string(),
            "Test error".to_string(),
            "TEST_ERROR".to_string(),
            400,
        );

        assert_eq!(response.error_id, "test-123");
        assert_eq!(response.code, "TEST_ERROR");
        assert_eq!(response.status, 400);
    }
}
