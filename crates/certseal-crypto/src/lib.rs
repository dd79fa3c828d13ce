//! Cryptographic primitives for certificate issuance and verification:
//! AES-256-GCM document encryption, AES-256-CBC key envelopes, and SHA-256
//! fingerprinting with keyed deduplication tags.
//!
//! Everything in this crate is a stateless pure function over byte slices.
//! Clear document keys only exist between generation and wrapping; callers
//! are expected to zeroize them as soon as they are wrapped or used.

pub mod aes_gcm;
pub mod envelope;
pub mod error;
pub mod fingerprint;
pub mod types;

pub use aes_gcm::{decrypt_document, encrypt_document, generate_document_key, generate_file_iv};
pub use envelope::{generate_wrap_iv, unwrap_key, wrap_key};
pub use error::CryptoError;
pub use fingerprint::{dedup_tag, sha256_hex};
pub use types::{
    AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH, ENVELOPE_IV_LENGTH, SHA256_HEX_LENGTH,
    WRAPPED_KEY_LENGTH,
};
