//! The verification pipeline: reconcile the database record, the on-chain
//! record, the off-chain ciphertext, and a freshly hashed candidate document
//! into one status.
//!
//! The step order is a policy and must not be rearranged: authenticity of
//! content (step 7) is judged before lifecycle state (steps 8–9), so a
//! tampered upload is never reported as merely revoked or expired. Every
//! failure before the plaintext comparison is an infrastructure error, never
//! `tampered`.

use tracing::{debug, warn};
use uuid::Uuid;
use zeroize::Zeroize;

use certseal_crypto::{decrypt_document, sha256_hex, unwrap_key};

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::external::{CertificateStore, ContentStore, Ledger};
use crate::types::{normalize_document_hash, ValidDetails, VerificationReport};

/// Decode a persisted hex field, surfacing corruption as malformed input.
pub(crate) fn decode_hex_field(value: &str, field: &str) -> Result<Vec<u8>> {
    hex::decode(value)
        .map_err(|e| CoreError::MalformedInput(format!("stored {field} is not valid hex: {e}")))
}

/// Run steps 1–10 against a certificate identifier and the verifier-computed
/// SHA-256 of the candidate document.
///
/// Returns `Ok` for the four terminal document states and `Err` for
/// infrastructure or input failures; the caller folds errors into a report
/// with status `error`.
pub(crate) async fn run_pipeline(
    certificates: &dyn CertificateStore,
    ledger: &dyn Ledger,
    content_store: &dyn ContentStore,
    config: &CoreConfig,
    cert_id: &str,
    candidate_hash: &str,
    now_unix: u64,
) -> Result<VerificationReport> {
    // Step 1: input format.
    let cert_id = cert_id.trim();
    Uuid::parse_str(cert_id)
        .map_err(|_| CoreError::MalformedInput(format!("invalid certificate id: {cert_id}")))?;
    let candidate = normalize_document_hash(candidate_hash)?;

    // Step 2: database record.
    let record = certificates
        .get(cert_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("no certificate with id {cert_id}")))?;

    // Step 3: on-chain record; a zero issuer means the ledger has no entry.
    let on_chain = ledger
        .get_certificate(record.contract_certificate_id)
        .await?;
    if on_chain.issuer.is_zero() {
        return Err(CoreError::NotFound(
            "the ledger has no record for this certificate".into(),
        ));
    }

    // Step 4: the stored hash and the anchored hash must agree. A mismatch
    // is an internal inconsistency, not attributable to the uploaded file.
    if record.document_hash != on_chain.document_hash {
        warn!(
            cert_id,
            "stored document hash disagrees with the on-chain record"
        );
        return Err(CoreError::IntegrityMismatch(
            "stored document hash disagrees with the ledger".into(),
        ));
    }

    // Step 5: the off-chain ciphertext must hash to the anchored value.
    // Storage-layer corruption, distinct from document tampering.
    let ciphertext = content_store.get(&record.cid).await?;
    if sha256_hex(&ciphertext) != on_chain.document_hash {
        return Err(CoreError::IntegrityMismatch(
            "fetched ciphertext does not match the anchored hash".into(),
        ));
    }

    // Step 6: unwrap the document key and decrypt. A tag failure here means
    // envelope or ciphertext corruption, not a tampered upload.
    let wrapped = decode_hex_field(&record.wrapped_key_hex, "wrapped key")?;
    let wrap_iv = decode_hex_field(&record.wrap_iv_hex, "wrap IV")?;
    let file_iv = decode_hex_field(&record.file_iv_hex, "file IV")?;

    let mut key = unwrap_key(&wrapped, &wrap_iv, config.master_key())?;
    let decrypted = decrypt_document(&ciphertext, &key, &file_iv);
    key.zeroize();
    let plaintext = decrypted?;

    // Step 7: authenticity before lifecycle. A document that does not hash
    // to the certified plaintext is not "the" certified document at all.
    if sha256_hex(&plaintext) != candidate {
        warn!(cert_id, "candidate hash does not match the certified document");
        return Ok(VerificationReport::tampered());
    }

    // Step 8: revocation, from the ledger.
    if on_chain.revoked {
        return Ok(VerificationReport::revoked());
    }

    // Step 9: expiry, from the ledger (0 = no expiry).
    if on_chain.expiry != 0 && on_chain.expiry < now_unix {
        return Ok(VerificationReport::expired());
    }

    // Step 10: valid, with issuance details for display.
    debug!(cert_id, "certificate verified as valid");
    Ok(VerificationReport::valid(ValidDetails {
        issuer: on_chain.issuer,
        recipient: on_chain.recipient,
        issued_at: on_chain.issued_at,
        tx_hash: record.tx_hash,
    }))
}
