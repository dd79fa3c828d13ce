use thiserror::Error;

use certseal_crypto::CryptoError;

/// Classification of collaborator (ledger, content store, persistence)
/// failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalErrorKind {
    /// Unreachable or timed out. May be retried by the caller with backoff;
    /// the core itself never retries.
    Unavailable,
    /// The collaborator has no entry for the requested key.
    NotFound,
    /// The collaborator refused the operation (e.g. a uniqueness conflict).
    Rejected,
}

/// Error reported by a collaborator behind one of the `external` traits.
#[derive(Debug, Clone)]
pub struct ExternalError {
    pub message: String,
    pub kind: ExternalErrorKind,
}

impl ExternalError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ExternalErrorKind::Unavailable,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ExternalErrorKind::NotFound,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ExternalErrorKind::Rejected,
        }
    }
}

impl std::fmt::Display for ExternalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExternalError {}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Integrity mismatch: {0}")]
    IntegrityMismatch(String),

    #[error("Crypto failure: {0}")]
    Crypto(#[from] CryptoError),

    #[error("External collaborator failed: {0}")]
    External(#[from] ExternalError),

    #[error("Policy violation: {0}")]
    PolicyViolation(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
