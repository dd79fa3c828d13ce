//! Process-wide configuration. The master key is decoded and validated once
//! at construction; a wrong length is a fatal startup error, never a
//! per-request error. Rotation requires re-wrapping every stored envelope
//! and is an operational procedure outside this crate.

use zeroize::Zeroize;

use certseal_crypto::AES_KEY_LENGTH;

use crate::error::{CoreError, Result};
use crate::types::{WalletAddress, DEFAULT_MAX_DOCUMENT_SIZE};

pub struct CoreConfig {
    master_key: [u8; AES_KEY_LENGTH],
    dedup_secret: Vec<u8>,
    contract_address: WalletAddress,
    max_document_size: usize,
}

impl CoreConfig {
    /// Build a configuration from the operator-held secrets.
    ///
    /// `master_key_hex` must decode to exactly 32 bytes; `dedup_secret` must
    /// be non-empty; `contract_address` must be a valid wallet address.
    pub fn new(
        master_key_hex: &str,
        dedup_secret: impl Into<Vec<u8>>,
        contract_address: &str,
    ) -> Result<Self> {
        let mut decoded = hex::decode(master_key_hex.trim())
            .map_err(|e| CoreError::MalformedInput(format!("master key is not valid hex: {e}")))?;
        if decoded.len() != AES_KEY_LENGTH {
            let got = decoded.len();
            decoded.zeroize();
            return Err(CoreError::MalformedInput(format!(
                "master key must be {AES_KEY_LENGTH} bytes, got {got}"
            )));
        }
        let mut master_key = [0u8; AES_KEY_LENGTH];
        master_key.copy_from_slice(&decoded);
        decoded.zeroize();

        let dedup_secret = dedup_secret.into();
        if dedup_secret.is_empty() {
            return Err(CoreError::MalformedInput(
                "deduplication secret must not be empty".into(),
            ));
        }

        Ok(Self {
            master_key,
            dedup_secret,
            contract_address: WalletAddress::parse(contract_address)?,
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
        })
    }

    pub fn with_max_document_size(mut self, max_document_size: usize) -> Self {
        self.max_document_size = max_document_size;
        self
    }

    pub(crate) fn master_key(&self) -> &[u8; AES_KEY_LENGTH] {
        &self.master_key
    }

    pub(crate) fn dedup_secret(&self) -> &[u8] {
        &self.dedup_secret
    }

    pub fn contract_address(&self) -> &WalletAddress {
        &self.contract_address
    }

    pub fn max_document_size(&self) -> usize {
        self.max_document_size
    }
}

impl Drop for CoreConfig {
    fn drop(&mut self) {
        self.master_key.zeroize();
        self.dedup_secret.zeroize();
    }
}

// Secrets stay out of logs and error output.
impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("master_key", &"<redacted>")
            .field("dedup_secret", &"<redacted>")
            .field("contract_address", &self.contract_address)
            .field("max_document_size", &self.max_document_size)
            .finish()
    }
}
