//! Certificate issuance and verification core.
//!
//! Documents are encrypted with a per-document AES-256-GCM key, the key is
//! wrapped under an operator master key, the ciphertext hash is anchored on
//! a blockchain ledger, and the ciphertext itself lives in content-addressed
//! storage. Verification reconciles all four sources of truth — database
//! record, on-chain record, off-chain ciphertext, and a freshly hashed
//! candidate document — into one of valid / tampered / revoked / expired /
//! error.
//!
//! The ledger, the content store, and persistence are consumed through the
//! [`external`] traits; this crate contains no transport or storage
//! technology of its own.

pub mod config;
pub mod error;
pub mod external;
pub mod lifecycle;
pub mod prepare;
pub mod service;
pub mod types;
mod verify;

pub use config::CoreConfig;
pub use error::{CoreError, ExternalError, ExternalErrorKind, Result};
pub use external::{CertificateStore, ContentStore, Ledger};
pub use lifecycle::{apply_revocation, evaluate_expiry, mark_forged};
pub use prepare::prepare_document;
pub use service::CertificateService;
pub use types::{
    normalize_document_hash, CertificateRecord, CertificateStatus, LedgerReceipt, OnChainRecord,
    PreparedCertificate, PreparedDocument, ValidDetails, VerificationReport, VerificationStatus,
    WalletAddress, DEFAULT_MAX_DOCUMENT_SIZE, DEFAULT_NETWORK,
};
