//! Core data model: certificate records, on-chain records, prepared bundles,
//! and verification reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use certseal_crypto::SHA256_HEX_LENGTH;

use crate::error::{CoreError, Result};

/// Network label stamped on issued records.
pub const DEFAULT_NETWORK: &str = "polygon-amoy";

/// Default ceiling on document size, enforced before any cryptographic work.
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 10 * 1024 * 1024;

// ============================================================================
// Wallet addresses
// ============================================================================

/// A checksummed-agnostic wallet address: `0x` + 40 hex chars, normalized to
/// lowercase on parse. The all-zero address is the ledger's "not found"
/// sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let digits = normalized
            .strip_prefix("0x")
            .ok_or_else(|| CoreError::MalformedInput("wallet address must start with 0x".into()))?;
        if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::MalformedInput(format!(
                "invalid wallet address: {s}"
            )));
        }
        Ok(Self(normalized))
    }

    /// The zero address, used by the ledger to signal a missing record.
    pub fn zero() -> Self {
        Self(format!("0x{}", "0".repeat(40)))
    }

    pub fn is_zero(&self) -> bool {
        self.0[2..].bytes().all(|b| b == b'0')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Certificate lifecycle states
// ============================================================================

/// Lifecycle state of a certificate. `Active` is the sole initial state;
/// the other three are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Active,
    Revoked,
    Expired,
    /// Set only by out-of-band reconciliation when the stored document hash
    /// disagrees with the ledger, never by normal user flows.
    Forged,
}

impl CertificateStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, CertificateStatus::Active)
    }
}

// ============================================================================
// Records
// ============================================================================

/// Persisted certificate metadata. Created atomically with a successful
/// on-chain anchoring; mutated only by lifecycle transitions; never deleted.
///
/// `document_hash` is the SHA-256 of the ciphertext blob and must equal the
/// hash anchored on-chain. The clear document key is never part of this
/// record — only the CBC envelope (`wrapped_key_hex` + `wrap_iv_hex`) is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// HMAC dedup tag; the raw plaintext hash is never stored.
    pub dedup_tag: String,
    pub document_hash: String,
    pub cid: String,
    pub wrapped_key_hex: String,
    pub wrap_iv_hex: String,
    pub file_iv_hex: String,
    pub issuer: WalletAddress,
    pub recipient: WalletAddress,
    pub contract_certificate_id: u64,
    pub tx_hash: String,
    pub network: String,
    pub issue_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub status: CertificateStatus,
}

/// The ledger's view of a certificate. Source of truth for revocation and
/// expiry; `CertificateRecord.status` caches it plus local expiry
/// evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnChainRecord {
    pub issuer: WalletAddress,
    pub recipient: WalletAddress,
    pub document_hash: String,
    /// Unix seconds.
    pub issued_at: u64,
    /// Unix seconds; 0 means no expiry.
    pub expiry: u64,
    pub revoked: bool,
}

/// Receipt of a confirmed anchoring transaction, validated against the
/// configured contract address before a record is committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerReceipt {
    pub tx_hash: String,
    pub contract_address: WalletAddress,
    pub contract_certificate_id: u64,
}

/// Output of the pure crypto prepare step, before any external writes.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    pub ciphertext: Vec<u8>,
    pub plain_hash: String,
    pub cipher_hash: String,
    pub dedup_tag: String,
    pub wrapped_key_hex: String,
    pub wrap_iv_hex: String,
    pub file_iv_hex: String,
}

/// A prepared certificate bundle: the crypto artifacts plus the uploaded
/// ciphertext's CID and the issuance metadata, ready for anchoring.
#[derive(Debug, Clone)]
pub struct PreparedCertificate {
    pub title: String,
    pub description: Option<String>,
    pub recipient: WalletAddress,
    pub ciphertext: Vec<u8>,
    pub cid: String,
    pub plain_hash: String,
    pub cipher_hash: String,
    pub dedup_tag: String,
    pub wrapped_key_hex: String,
    pub wrap_iv_hex: String,
    pub file_iv_hex: String,
    pub expiry_date: Option<DateTime<Utc>>,
}

// ============================================================================
// Verification reports
// ============================================================================

/// Outcome of a verification call. The four document states are ordinary
/// results; `Error` covers infrastructure and input failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Valid,
    Tampered,
    Revoked,
    Expired,
    Error,
}

/// Issuance details surfaced for display when a certificate verifies as
/// valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidDetails {
    pub issuer: WalletAddress,
    pub recipient: WalletAddress,
    /// Unix seconds.
    pub issued_at: u64,
    pub tx_hash: String,
}

/// Discriminated verification result with a human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub status: VerificationStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ValidDetails>,
}

impl VerificationReport {
    pub fn valid(details: ValidDetails) -> Self {
        Self {
            status: VerificationStatus::Valid,
            message: "Certificate is valid and authentic.".into(),
            details: Some(details),
        }
    }

    pub fn tampered() -> Self {
        Self {
            status: VerificationStatus::Tampered,
            message: "Document has been tampered.".into(),
            details: None,
        }
    }

    pub fn revoked() -> Self {
        Self {
            status: VerificationStatus::Revoked,
            message: "Certificate has been revoked.".into(),
            details: None,
        }
    }

    pub fn expired() -> Self {
        Self {
            status: VerificationStatus::Expired,
            message: "Certificate has expired.".into(),
            details: None,
        }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Error,
            message: reason.into(),
            details: None,
        }
    }
}

/// Normalize and validate a SHA-256 hex digest supplied at the boundary.
pub fn normalize_document_hash(s: &str) -> Result<String> {
    let normalized = s.trim().to_ascii_lowercase();
    if normalized.len() != SHA256_HEX_LENGTH
        || !normalized.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return Err(CoreError::MalformedInput(
            "document hash must be 64 hex characters".into(),
        ));
    }
    Ok(normalized)
}
