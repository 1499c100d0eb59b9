use thiserror::Error;

/// Errors raised while talking to the remote evaluation service.
///
/// These never escape the session as-is: the orchestrator folds them into the
/// same failure shape the service uses for application errors, and listing
/// failures are logged and dropped.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The service answered with `success: false`.
    #[error("{0}")]
    Rejected(String),
}

impl ServiceError {
    /// Message shown to the operator for a failed request.
    pub fn display_message(&self) -> String {
        match self {
            ServiceError::Rejected(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
