//! The pure crypto step of issuance: hash → encrypt → hash → wrap → tag.
//! No external writes; the clear document key never leaves this module.

use zeroize::Zeroize;

use certseal_crypto::{
    dedup_tag, encrypt_document, generate_document_key, sha256_hex, wrap_key,
};

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::types::PreparedDocument;

/// Produce ciphertext, wrapped key, and fingerprints for a document.
///
/// The size ceiling is enforced before any cryptographic work. The
/// generated document key is wrapped under the master key and zeroized
/// before this function returns (it is never persisted or logged in the
/// clear).
pub fn prepare_document(document: &[u8], config: &CoreConfig) -> Result<PreparedDocument> {
    if document.len() > config.max_document_size() {
        return Err(CoreError::MalformedInput(format!(
            "document of {} bytes exceeds the {} byte ceiling",
            document.len(),
            config.max_document_size()
        )));
    }

    let plain_hash = sha256_hex(document);
    let tag = dedup_tag(&plain_hash, config.dedup_secret())?;

    let mut document_key = generate_document_key()?;
    let encrypted = encrypt_document(document, &document_key);
    let wrapped = wrap_key(&document_key, config.master_key());
    document_key.zeroize();

    let (ciphertext, file_iv) = encrypted?;
    let (wrapped_key, wrap_iv) = wrapped?;
    let cipher_hash = sha256_hex(&ciphertext);

    Ok(PreparedDocument {
        ciphertext,
        plain_hash,
        cipher_hash,
        dedup_tag: tag,
        wrapped_key_hex: hex::encode(wrapped_key),
        wrap_iv_hex: hex::encode(wrap_iv),
        file_iv_hex: hex::encode(file_iv),
    })
}
