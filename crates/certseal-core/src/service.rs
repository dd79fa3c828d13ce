//! Certificate service: issuance and verification flows over the ledger,
//! the content store, and certificate persistence.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;
use zeroize::Zeroize;

use certseal_crypto::{decrypt_document, sha256_hex, unwrap_key};

use crate::config::CoreConfig;
use crate::error::{CoreError, ExternalError, ExternalErrorKind, Result};
use crate::external::{CertificateStore, ContentStore, Ledger};
use crate::lifecycle::{apply_revocation, evaluate_expiry, mark_forged};
use crate::prepare::prepare_document;
use crate::types::{
    CertificateRecord, CertificateStatus, LedgerReceipt, PreparedCertificate, VerificationReport,
    VerificationStatus, WalletAddress, DEFAULT_NETWORK,
};
use crate::verify::{decode_hex_field, run_pipeline};

/// Issuer- and verifier-side operations over a certificate collection.
///
/// Stateless per call: every operation is an independent pipeline over the
/// collaborators, so concurrent requests for different certificates never
/// interact. The one shared-resource hazard — at most one active certificate
/// per (dedup tag, recipient) — is closed by `CertificateStore::insert`'s
/// atomic uniqueness guarantee, not here.
pub struct CertificateService {
    ledger: Arc<dyn Ledger>,
    content_store: Arc<dyn ContentStore>,
    certificates: Arc<dyn CertificateStore>,
    config: CoreConfig,
}

impl CertificateService {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        content_store: Arc<dyn ContentStore>,
        certificates: Arc<dyn CertificateStore>,
        config: CoreConfig,
    ) -> Self {
        Self {
            ledger,
            content_store,
            certificates,
            config,
        }
    }

    /// Encrypt and fingerprint a document, then stage its ciphertext in the
    /// content store. Rejects a document that already has an active
    /// certificate for this recipient (revoke-before-reissue).
    pub async fn prepare(
        &self,
        document: &[u8],
        recipient: &WalletAddress,
        title: impl Into<String>,
        description: Option<String>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<PreparedCertificate> {
        let prepared = prepare_document(document, &self.config)?;

        if self
            .certificates
            .find_active(&prepared.dedup_tag, recipient)
            .await?
            .is_some()
        {
            return Err(CoreError::PolicyViolation(
                "an active certificate already exists for this document and recipient; \
                 revoke it before reissuing"
                    .into(),
            ));
        }

        let cid = self.content_store.put(&prepared.ciphertext).await?;
        debug!(%recipient, %cid, "prepared certificate ciphertext");

        Ok(PreparedCertificate {
            title: title.into(),
            description,
            recipient: recipient.clone(),
            ciphertext: prepared.ciphertext,
            cid,
            plain_hash: prepared.plain_hash,
            cipher_hash: prepared.cipher_hash,
            dedup_tag: prepared.dedup_tag,
            wrapped_key_hex: prepared.wrapped_key_hex,
            wrap_iv_hex: prepared.wrap_iv_hex,
            file_iv_hex: prepared.file_iv_hex,
            expiry_date,
        })
    }

    /// Anchor a prepared certificate's ciphertext hash on the ledger.
    ///
    /// Not cancellable once submitted; a timeout does not mean the anchoring
    /// did not happen.
    pub async fn anchor(&self, prepared: &PreparedCertificate) -> Result<LedgerReceipt> {
        let expiry = prepared
            .expiry_date
            .map(|d| d.timestamp().max(0) as u64)
            .unwrap_or(0);
        let receipt = self
            .ledger
            .issue_certificate(
                &prepared.cipher_hash,
                &prepared.cid,
                &prepared.recipient,
                expiry,
            )
            .await?;
        debug!(
            tx_hash = %receipt.tx_hash,
            contract_certificate_id = receipt.contract_certificate_id,
            "anchored certificate on ledger"
        );
        Ok(receipt)
    }

    /// Commit a certificate record after a successful anchoring.
    ///
    /// The receipt must be for the configured contract; the insert is
    /// rejected if another active certificate for the same (dedup tag,
    /// recipient) won a concurrent race.
    pub async fn issue(
        &self,
        prepared: PreparedCertificate,
        receipt: LedgerReceipt,
        issuer: &WalletAddress,
    ) -> Result<CertificateRecord> {
        if &receipt.contract_address != self.config.contract_address() {
            return Err(CoreError::MalformedInput(format!(
                "transaction receipt is for contract {}, expected {}",
                receipt.contract_address,
                self.config.contract_address()
            )));
        }

        let record = CertificateRecord {
            id: Uuid::new_v4().to_string(),
            title: prepared.title,
            description: prepared.description,
            dedup_tag: prepared.dedup_tag,
            document_hash: prepared.cipher_hash,
            cid: prepared.cid,
            wrapped_key_hex: prepared.wrapped_key_hex,
            wrap_iv_hex: prepared.wrap_iv_hex,
            file_iv_hex: prepared.file_iv_hex,
            issuer: issuer.clone(),
            recipient: prepared.recipient,
            contract_certificate_id: receipt.contract_certificate_id,
            tx_hash: receipt.tx_hash,
            network: DEFAULT_NETWORK.into(),
            issue_date: Utc::now(),
            expiry_date: prepared.expiry_date,
            status: CertificateStatus::Active,
        };

        self.certificates
            .insert(&record)
            .await
            .map_err(duplicate_to_policy)?;
        debug!(cert_id = %record.id, %issuer, "issued certificate");
        Ok(record)
    }

    /// Verify an uploaded document against a certificate.
    ///
    /// Always returns a report; infrastructure and input failures are folded
    /// into status `error` with the reason, never raised for the four
    /// terminal document states.
    pub async fn verify(&self, cert_id: &str, candidate_hash: &str) -> VerificationReport {
        let now_unix = Utc::now().timestamp().max(0) as u64;
        let outcome = run_pipeline(
            self.certificates.as_ref(),
            self.ledger.as_ref(),
            self.content_store.as_ref(),
            &self.config,
            cert_id,
            candidate_hash,
            now_unix,
        )
        .await;

        match outcome {
            Ok(report) => {
                if report.status == VerificationStatus::Expired {
                    self.cache_observed_expiry(cert_id.trim()).await;
                }
                report
            }
            Err(err) => {
                debug!(cert_id, error = %err, "verification failed");
                VerificationReport::error(err.to_string())
            }
        }
    }

    /// Mirror an on-chain revocation into the local record. Caller must be
    /// the original issuer and the ledger must already show the certificate
    /// as revoked.
    pub async fn revoke(
        &self,
        cert_id: &str,
        caller: &WalletAddress,
    ) -> Result<CertificateRecord> {
        let mut record = self.require_record(cert_id).await?;
        if evaluate_expiry(&mut record, Utc::now()) {
            self.persist_status(&record).await;
        }

        let on_chain = self
            .ledger
            .get_certificate(record.contract_certificate_id)
            .await?;
        if on_chain.issuer.is_zero() {
            return Err(CoreError::NotFound(
                "the ledger has no record for this certificate".into(),
            ));
        }

        apply_revocation(&mut record, caller, &on_chain)?;
        self.certificates
            .update_status(&record.id, record.status)
            .await?;
        debug!(cert_id = %record.id, %caller, "certificate revoked");
        Ok(record)
    }

    /// Out-of-band audit: compare the stored document hash against the
    /// ledger and flag a mismatch as forged. The only path into the forged
    /// state.
    pub async fn reconcile(&self, cert_id: &str) -> Result<CertificateRecord> {
        let mut record = self.require_record(cert_id).await?;
        let on_chain = self
            .ledger
            .get_certificate(record.contract_certificate_id)
            .await?;
        if on_chain.issuer.is_zero() {
            return Err(CoreError::NotFound(
                "the ledger has no record for this certificate".into(),
            ));
        }

        if record.document_hash != on_chain.document_hash
            && record.status == CertificateStatus::Active
        {
            warn!(
                cert_id = %record.id,
                "stored document hash disagrees with the ledger; flagging as forged"
            );
            mark_forged(&mut record)?;
            self.certificates
                .update_status(&record.id, record.status)
                .await?;
        }
        Ok(record)
    }

    /// Recipient-side decrypt: fetch the ciphertext, unwrap the key, and
    /// return the original document bytes.
    pub async fn open_document(&self, cert_id: &str) -> Result<Vec<u8>> {
        let record = self.require_record(cert_id).await?;

        let ciphertext = self.content_store.get(&record.cid).await?;
        if sha256_hex(&ciphertext) != record.document_hash {
            return Err(CoreError::IntegrityMismatch(
                "fetched ciphertext does not match the stored document hash".into(),
            ));
        }

        let wrapped = decode_hex_field(&record.wrapped_key_hex, "wrapped key")?;
        let wrap_iv = decode_hex_field(&record.wrap_iv_hex, "wrap IV")?;
        let file_iv = decode_hex_field(&record.file_iv_hex, "file IV")?;

        let mut key = unwrap_key(&wrapped, &wrap_iv, self.config.master_key())?;
        let decrypted = decrypt_document(&ciphertext, &key, &file_iv);
        key.zeroize();
        Ok(decrypted?)
    }

    /// Read a certificate, lazily expiring it if its expiry date has passed.
    pub async fn get_certificate(&self, cert_id: &str) -> Result<CertificateRecord> {
        let mut record = self.require_record(cert_id).await?;
        if evaluate_expiry(&mut record, Utc::now()) {
            self.persist_status(&record).await;
        }
        Ok(record)
    }

    /// Certificates held by a recipient, with lazy expiry applied.
    pub async fn certificates_for_recipient(
        &self,
        recipient: &WalletAddress,
    ) -> Result<Vec<CertificateRecord>> {
        let records = self.certificates.list_for_recipient(recipient).await?;
        Ok(self.expire_lazily(records).await)
    }

    /// Certificates issued by an issuer, with lazy expiry applied.
    pub async fn certificates_for_issuer(
        &self,
        issuer: &WalletAddress,
    ) -> Result<Vec<CertificateRecord>> {
        let records = self.certificates.list_for_issuer(issuer).await?;
        Ok(self.expire_lazily(records).await)
    }

    async fn require_record(&self, cert_id: &str) -> Result<CertificateRecord> {
        let cert_id = cert_id.trim();
        Uuid::parse_str(cert_id)
            .map_err(|_| CoreError::MalformedInput(format!("invalid certificate id: {cert_id}")))?;
        self.certificates
            .get(cert_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("no certificate with id {cert_id}")))
    }

    async fn expire_lazily(&self, mut records: Vec<CertificateRecord>) -> Vec<CertificateRecord> {
        let now = Utc::now();
        for record in &mut records {
            if evaluate_expiry(record, now) {
                self.persist_status(record).await;
            }
        }
        records
    }

    /// Best-effort cache write for an expiry observed during verification.
    /// The on-chain record stays the source of truth either way.
    async fn cache_observed_expiry(&self, cert_id: &str) {
        match self.certificates.get(cert_id).await {
            Ok(Some(record)) if record.status == CertificateStatus::Active => {
                if let Err(err) = self
                    .certificates
                    .update_status(cert_id, CertificateStatus::Expired)
                    .await
                {
                    warn!(cert_id, error = %err, "failed to cache observed expiry");
                }
            }
            Ok(_) => {}
            Err(err) => warn!(cert_id, error = %err, "failed to re-read record for expiry cache"),
        }
    }

    async fn persist_status(&self, record: &CertificateRecord) {
        if let Err(err) = self
            .certificates
            .update_status(&record.id, record.status)
            .await
        {
            warn!(cert_id = %record.id, error = %err, "failed to persist status transition");
        }
    }
}

/// A store-level uniqueness rejection is the duplicate-active policy
/// violation; everything else stays an external failure.
fn duplicate_to_policy(err: ExternalError) -> CoreError {
    if err.kind == ExternalErrorKind::Rejected {
        CoreError::PolicyViolation(err.message)
    } else {
        CoreError::External(err)
    }
}
