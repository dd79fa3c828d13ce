//! Collaborator traits: the ledger, the content-addressed store, and
//! certificate persistence. The core consumes these as `Arc<dyn _>` and
//! treats them as oracles; their transports, consensus, and storage
//! technology live behind these seams.

use async_trait::async_trait;

use crate::error::ExternalError;
use crate::types::{
    CertificateRecord, CertificateStatus, LedgerReceipt, OnChainRecord, WalletAddress,
};

/// The blockchain ledger. Issuer-role writes, anyone-reads.
///
/// Implementations should use bounded timeouts and report timeouts as
/// `ExternalErrorKind::Unavailable`; the core never retries. A submitted
/// transaction is not cancellable: a client-side timeout must not be taken
/// to mean the anchoring did not happen.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Anchor a document hash on-chain. Emits the certificate event and
    /// returns the confirmed receipt.
    async fn issue_certificate(
        &self,
        document_hash: &str,
        cid: &str,
        recipient: &WalletAddress,
        expiry: u64,
    ) -> Result<LedgerReceipt, ExternalError>;

    /// Submit an on-chain revocation for a certificate.
    async fn revoke_certificate(
        &self,
        contract_certificate_id: u64,
    ) -> Result<(), ExternalError>;

    /// Read a certificate's on-chain record. A zero issuer in the returned
    /// record means "not found"; interpreting the sentinel is the caller's
    /// job, not the implementation's.
    async fn get_certificate(
        &self,
        contract_certificate_id: u64,
    ) -> Result<OnChainRecord, ExternalError>;
}

/// Content-addressed off-chain storage for ciphertext blobs.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store bytes and return their content identifier.
    async fn put(&self, bytes: &[u8]) -> Result<String, ExternalError>;

    /// Retrieve bytes by content identifier.
    async fn get(&self, cid: &str) -> Result<Vec<u8>, ExternalError>;
}

/// Persistence for certificate records.
#[async_trait]
pub trait CertificateStore: Send + Sync {
    /// Fetch a record by certificate id. `Ok(None)` when absent.
    async fn get(&self, id: &str) -> Result<Option<CertificateRecord>, ExternalError>;

    /// Find the active record for a (dedup_tag, recipient) pair, if any.
    async fn find_active(
        &self,
        dedup_tag: &str,
        recipient: &WalletAddress,
    ) -> Result<Option<CertificateRecord>, ExternalError>;

    /// Insert a new record. Implementations MUST enforce atomically that at
    /// most one active record exists per (dedup_tag, recipient) — e.g. via a
    /// unique partial index — and report a duplicate as
    /// `ExternalErrorKind::Rejected`. An application-level pre-check alone
    /// cannot close the check-then-act race under concurrent issuance.
    async fn insert(&self, record: &CertificateRecord) -> Result<(), ExternalError>;

    /// Persist a lifecycle transition.
    async fn update_status(
        &self,
        id: &str,
        status: CertificateStatus,
    ) -> Result<(), ExternalError>;

    /// Certificates held by a recipient, newest first.
    async fn list_for_recipient(
        &self,
        recipient: &WalletAddress,
    ) -> Result<Vec<CertificateRecord>, ExternalError>;

    /// Certificates issued by an issuer, newest first.
    async fn list_for_issuer(
        &self,
        issuer: &WalletAddress,
    ) -> Result<Vec<CertificateRecord>, ExternalError>;
}
