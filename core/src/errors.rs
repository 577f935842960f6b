//! Error types for MedStat core operations

use thiserror::Error;

/// Errors surfaced by the generation gateway.
///
/// Every failure inside the gateway collapses into one of these variants; no
/// fault crosses the component boundary uncaught. Each variant carries enough
/// context to render a `{"error": ...}` body with the matching HTTP status.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("credential not configured")]
    CredentialMissing,

    #[error("request blocked by content policy: {0}")]
    UpstreamBlocked(String),

    #[error("response withheld for safety: {0}")]
    UpstreamSafetyBlock(String),

    #[error("malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("upstream API error {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("could not reach AI after multiple attempts")]
    TransportExhausted,

    #[error("could not process AI's structured response: {0}")]
    ResponseParseFailure(String),
}

impl GatewayError {
    /// HTTP status code this failure maps to at the API boundary
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::CredentialMissing => 500,
            GatewayError::UpstreamBlocked(_) => 400,
            GatewayError::UpstreamSafetyBlock(_) => 400,
            GatewayError::MalformedUpstreamResponse(_) => 500,
            GatewayError::UpstreamStatus { status, .. } => *status,
            GatewayError::TransportExhausted => 502,
            GatewayError::ResponseParseFailure(_) => 500,
        }
    }
}

/// Errors raised while assembling process configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors related to presentation adapters
#[derive(Error, Debug)]
pub enum PresentationError {
    #[error("server startup failed: {0}")]
    StartupFailed(String),

    #[error("server shutdown failed: {0}")]
    ShutdownFailed(String),
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
