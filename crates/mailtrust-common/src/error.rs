//! Error types for MailTrust

use thiserror::Error;

/// Main error type for MailTrust
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A mechanism was handed over as present but without the fields it
    /// requires. This is an integration defect in the upstream parser.
    #[error("Malformed {mechanism} result: {reason}")]
    MalformedMechanismResult {
        mechanism: &'static str,
        reason: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for MailTrust
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a malformed mechanism result
    pub fn malformed(mechanism: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedMechanismResult {
            mechanism,
            reason: reason.into(),
        }
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::MalformedMechanismResult { .. } => "MALFORMED_MECHANISM_RESULT",
            Error::Internal(_) => "INTERNAL_ERROR",
            Error::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error stems from bad input rather than a runtime fault.
    /// Retrying such an error with the same input cannot succeed.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Error::MalformedMechanismResult { .. })
    }
}
