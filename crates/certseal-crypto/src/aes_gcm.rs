//! AES-256-GCM encryption for document bytes.
//!
//! Persisted blob format: [ciphertext][16-byte auth tag]. The 96-bit IV is
//! carried separately alongside the blob, not prefixed into it. The tag check
//! on decrypt is the sole integrity gate against ciphertext corruption or a
//! wrong (e.g. mis-unwrapped) key.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::CryptoError;
use crate::types::{AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH};

/// Generate a random 256-bit per-document key.
pub fn generate_document_key() -> Result<[u8; AES_KEY_LENGTH], CryptoError> {
    let mut key = [0u8; AES_KEY_LENGTH];
    getrandom::getrandom(&mut key).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(key)
}

/// Generate a random 12-byte IV for AES-GCM.
pub fn generate_file_iv() -> Result<[u8; AES_GCM_IV_LENGTH], CryptoError> {
    let mut iv = [0u8; AES_GCM_IV_LENGTH];
    getrandom::getrandom(&mut iv).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(iv)
}

/// Encrypt document bytes under a per-document key with a fresh IV.
///
/// Returns `(blob, iv)` where `blob` is `ciphertext || tag`.
pub fn encrypt_document(
    plaintext: &[u8],
    key: &[u8],
) -> Result<(Vec<u8>, [u8; AES_GCM_IV_LENGTH]), CryptoError> {
    if key.len() != AES_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: AES_KEY_LENGTH,
            got: key.len(),
        });
    }
    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    let iv = generate_file_iv()?;
    let nonce = Nonce::from_slice(&iv);

    let blob = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    Ok((blob, iv))
}

/// Decrypt a `ciphertext || tag` blob. Fails closed on tag mismatch: no
/// partial plaintext is ever returned.
pub fn decrypt_document(blob: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if key.len() != AES_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: AES_KEY_LENGTH,
            got: key.len(),
        });
    }
    if iv.len() != AES_GCM_IV_LENGTH {
        return Err(CryptoError::InvalidIvLength {
            expected: AES_GCM_IV_LENGTH,
            got: iv.len(),
        });
    }
    if blob.len() < AES_GCM_TAG_LENGTH {
        return Err(CryptoError::DataTooShort);
    }

    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|e| CryptoError::DecryptionFailed(e.to_string()))?;
    let nonce = Nonce::from_slice(iv);

    cipher
        .decrypt(nonce, blob)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
}
