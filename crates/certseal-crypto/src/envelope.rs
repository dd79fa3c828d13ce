//! Key envelopes: AES-256-CBC wrapping of the per-document key under the
//! operator master key.
//!
//! Wrapped form: [AES-256-CBC(masterKey, documentKey):48] plus a separate
//! 16-byte IV. CBC provides confidentiality only; a corrupted or wrongly
//! keyed unwrap yields a key that fails the AES-GCM tag check downstream.
//! That downstream check is the detection path for envelope corruption.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::types::{AES_KEY_LENGTH, ENVELOPE_IV_LENGTH, WRAPPED_KEY_LENGTH};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Generate a random 16-byte IV for the envelope cipher.
pub fn generate_wrap_iv() -> Result<[u8; ENVELOPE_IV_LENGTH], CryptoError> {
    let mut iv = [0u8; ENVELOPE_IV_LENGTH];
    getrandom::getrandom(&mut iv).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(iv)
}

/// Wrap a 32-byte document key under the 32-byte master key with a fresh IV.
///
/// Returns `(wrapped_key, wrap_iv)`; the wrapped key is 48 bytes (the key
/// plus one PKCS#7 padding block).
pub fn wrap_key(
    document_key: &[u8],
    master_key: &[u8],
) -> Result<(Vec<u8>, [u8; ENVELOPE_IV_LENGTH]), CryptoError> {
    if document_key.len() != AES_KEY_LENGTH {
        return Err(CryptoError::InvalidDocumentKeyLength {
            expected: AES_KEY_LENGTH,
            got: document_key.len(),
        });
    }
    if master_key.len() != AES_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: AES_KEY_LENGTH,
            got: master_key.len(),
        });
    }

    let iv = generate_wrap_iv()?;
    let enc = Aes256CbcEnc::new_from_slices(master_key, &iv)
        .map_err(|e| CryptoError::WrapFailed(e.to_string()))?;
    let wrapped = enc.encrypt_padded_vec_mut::<Pkcs7>(document_key);
    Ok((wrapped, iv))
}

/// Unwrap a document key. Rejects any plaintext that is not exactly 32 bytes.
pub fn unwrap_key(
    wrapped: &[u8],
    wrap_iv: &[u8],
    master_key: &[u8],
) -> Result<[u8; AES_KEY_LENGTH], CryptoError> {
    if wrapped.len() != WRAPPED_KEY_LENGTH {
        return Err(CryptoError::InvalidWrappedKeyLength {
            expected: WRAPPED_KEY_LENGTH,
            got: wrapped.len(),
        });
    }
    if wrap_iv.len() != ENVELOPE_IV_LENGTH {
        return Err(CryptoError::InvalidIvLength {
            expected: ENVELOPE_IV_LENGTH,
            got: wrap_iv.len(),
        });
    }
    if master_key.len() != AES_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: AES_KEY_LENGTH,
            got: master_key.len(),
        });
    }

    let dec = Aes256CbcDec::new_from_slices(master_key, wrap_iv)
        .map_err(|e| CryptoError::UnwrapFailed(e.to_string()))?;
    let mut plaintext = dec
        .decrypt_padded_vec_mut::<Pkcs7>(wrapped)
        .map_err(|e| CryptoError::UnwrapFailed(e.to_string()))?;

    if plaintext.len() != AES_KEY_LENGTH {
        let got = plaintext.len();
        plaintext.zeroize();
        return Err(CryptoError::InvalidUnwrappedKeyLength {
            expected: AES_KEY_LENGTH,
            got,
        });
    }

    let mut key = [0u8; AES_KEY_LENGTH];
    key.copy_from_slice(&plaintext);
    plaintext.zeroize();
    Ok(key)
}
