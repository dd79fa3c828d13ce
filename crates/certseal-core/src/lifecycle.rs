//! The certificate state machine: `active → revoked | expired | forged`,
//! all terminal. Pure functions; persistence of a transition is the
//! caller's job.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, Result};
use crate::types::{CertificateRecord, CertificateStatus, OnChainRecord, WalletAddress};

/// Lazily expire a record on read. Returns `true` if the status changed.
///
/// Idempotent and safe to call on every read path; no background sweeper is
/// required. Terminal states are never touched.
pub fn evaluate_expiry(record: &mut CertificateRecord, now: DateTime<Utc>) -> bool {
    if record.status != CertificateStatus::Active {
        return false;
    }
    match record.expiry_date {
        Some(expiry) if expiry < now => {
            record.status = CertificateStatus::Expired;
            true
        }
        _ => false,
    }
}

/// Mirror an on-chain revocation into the local record.
///
/// The local state machine never revokes ahead of the ledger: the caller
/// must be the original issuer, the record must still be active, and the
/// on-chain record must already show `revoked`. Violations are policy
/// rejections with no state change.
pub fn apply_revocation(
    record: &mut CertificateRecord,
    caller: &WalletAddress,
    on_chain: &OnChainRecord,
) -> Result<()> {
    if caller != &record.issuer {
        return Err(CoreError::PolicyViolation(
            "only the issuing wallet may revoke a certificate".into(),
        ));
    }
    if record.status != CertificateStatus::Active {
        return Err(CoreError::PolicyViolation(format!(
            "cannot revoke a certificate in state {:?}",
            record.status
        )));
    }
    if !on_chain.revoked {
        return Err(CoreError::PolicyViolation(
            "the ledger does not show this certificate as revoked".into(),
        ));
    }
    record.status = CertificateStatus::Revoked;
    Ok(())
}

/// Flag a record as forged. Only reached from out-of-band reconciliation
/// when the stored document hash disagrees with the ledger.
pub fn mark_forged(record: &mut CertificateRecord) -> Result<()> {
    if record.status != CertificateStatus::Active {
        return Err(CoreError::PolicyViolation(format!(
            "cannot flag a certificate in state {:?} as forged",
            record.status
        )));
    }
    record.status = CertificateStatus::Forged;
    Ok(())
}
