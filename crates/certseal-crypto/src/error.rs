use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Invalid document key length: expected {expected} bytes, got {got}")]
    InvalidDocumentKeyLength { expected: usize, got: usize },

    #[error("Invalid IV length: expected {expected} bytes, got {got}")]
    InvalidIvLength { expected: usize, got: usize },

    #[error("Invalid wrapped key length: expected {expected} bytes, got {got}")]
    InvalidWrappedKeyLength { expected: usize, got: usize },

    #[error("Unwrapped key is not {expected} bytes (got {got})")]
    InvalidUnwrappedKeyLength { expected: usize, got: usize },

    #[error("Encrypted data too short")]
    DataTooShort,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Key wrap failed: {0}")]
    WrapFailed(String),

    #[error("Key unwrap failed: {0}")]
    UnwrapFailed(String),

    #[error("MAC keying failed: {0}")]
    MacFailed(String),

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}
