//! Gate Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Gate-specific result type alias
pub type GateResult<T> = Result<T, GateError>;

/// Gate-specific error variants
#[derive(Debug, Error)]
pub enum GateError {
    /// Malformed credential data at construction time; fatal to startup
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Expected outcome of a failed login attempt (wrong user or password)
    #[error("credential pair presented matches no known user")]
    CredentialMismatch,

    /// Verifier comparison failed for a structural reason
    #[error("credential verification fault: {0}")]
    VerificationFault(String),

    /// Cookie header present but unreadable
    #[error("malformed cookie header")]
    CookieRetrieval,
}

impl GateError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GateError::CredentialMismatch => StatusCode::UNAUTHORIZED,
            GateError::Configuration(_)
            | GateError::VerificationFault(_)
            | GateError::CookieRetrieval => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            GateError::VerificationFault(detail) => {
                tracing::error!(detail = %detail, "Credential verification fault");
            }
            GateError::Configuration(reason) => {
                tracing::error!(reason = %reason, "Gate configuration rejected");
            }
            GateError::CookieRetrieval => {
                tracing::warn!("Discarding request with malformed Cookie header");
            }
            GateError::CredentialMismatch => {
                tracing::warn!("Rejected login attempt");
            }
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        self.log();
        // Fault detail stays in the operator log; clients get a fixed line.
        let body = match &self {
            GateError::CredentialMismatch => "credential pair presented matches no known user",
            _ => "internal fault while processing request",
        };
        (self.status_code(), body).into_response()
    }
}
