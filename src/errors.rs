use thiserror::Error;

use crate::implementations::config::ConfigError;

/// Custom error types for the fact-checking system
#[derive(Debug, Error)]
pub enum FactCheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Error in external service {service}: {message}")]
    ExternalService { service: String, message: String },

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("System error: {0}")]
    System(String),
}

/// Result type specific to fact-checking operations
pub type FactCheckResult<T> = Result<T, FactCheckError>;

/// Classes of failure the pipeline distinguishes when deciding whether to
/// degrade or abort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Network, timeout or quota problem on a model or fetch call
    TransientExternalFailure,
    /// Structured data could not be recovered from model text
    MalformedModelOutput,
    /// No usable article content; consumed by the verifier, never raised
    NoEvidenceFound,
    /// Resource exhaustion or configuration error; aborts the run
    FatalProcessFailure,
}

impl ErrorClass {
    /// How the pipeline continues after a failure of this class; `None` aborts
    pub fn recovery_strategy(self) -> Option<&'static str> {
        match self {
            ErrorClass::TransientExternalFailure => {
                Some("substitute the stage fallback value and continue")
            }
            ErrorClass::MalformedModelOutput => Some("use the caller-supplied default record"),
            ErrorClass::NoEvidenceFound => Some("verify against an empty evidence set"),
            ErrorClass::FatalProcessFailure => None,
        }
    }
}

impl FactCheckError {
    pub fn class(&self) -> ErrorClass {
        match self {
            FactCheckError::ExternalService { .. } | FactCheckError::Timeout(_) => {
                ErrorClass::TransientExternalFailure
            }
            FactCheckError::MalformedOutput(_) => ErrorClass::MalformedModelOutput,
            FactCheckError::Config(_)
            | FactCheckError::InvalidInput(_)
            | FactCheckError::System(_) => ErrorClass::FatalProcessFailure,
        }
    }
}

/// Recoverable vs. non-recoverable errors
pub trait RecoverableError {
    fn is_recoverable(&self) -> bool;
    fn recovery_strategy(&self) -> Option<String>;
}

impl RecoverableError for FactCheckError {
    fn is_recoverable(&self) -> bool {
        self.class() != ErrorClass::FatalProcessFailure
    }

    fn recovery_strategy(&self) -> Option<String> {
        self.class().recovery_strategy().map(str::to_string)
    }
}

/// Errors raised by the HTTP-backed collaborators (model, feed, page fetch)
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl From<ClientError> for FactCheckError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Network(msg) => FactCheckError::ExternalService {
                service: "Network".to_string(),
                message: msg,
            },
            ClientError::Http { status, message } => FactCheckError::ExternalService {
                service: "HTTP".to_string(),
                message: format!("Status {}: {}", status, message),
            },
            ClientError::Parse(msg) => FactCheckError::MalformedOutput(msg),
            ClientError::Config(err) => FactCheckError::Config(err),
            ClientError::Serde(err) => FactCheckError::MalformedOutput(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ClientError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        ClientError::Network(err.to_string())
    }
}
