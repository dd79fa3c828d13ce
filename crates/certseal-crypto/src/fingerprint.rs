//! Document fingerprints: plain SHA-256 for integrity comparison and a keyed
//! HMAC tag for privacy-preserving deduplication lookups.
//!
//! The dedup tag is the only value ever indexed for duplicate detection; the
//! raw plaintext hash is never stored verbatim.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 of arbitrary bytes as lowercase hex. Pure and deterministic.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// HMAC-SHA256 of a plaintext-hash hex string under the deduplication
/// secret, as lowercase hex. Deterministic, so equal documents for equal
/// secrets always produce the same tag.
pub fn dedup_tag(plain_hash_hex: &str, secret: &[u8]) -> Result<String, CryptoError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| CryptoError::MacFailed(e.to_string()))?;
    mac.update(plain_hash_hex.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SHA256_HEX_LENGTH;

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"hello-cert"),
            "52884f792db4c510c3378c6f5cf79358cd3e1f61943424d9e8e24f682de00e4f"
        );
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_is_lowercase_hex() {
        let digest = sha256_hex(b"anything");
        assert_eq!(digest.len(), SHA256_HEX_LENGTH);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn dedup_tag_known_vector() {
        let plain_hash = sha256_hex(b"hello-cert");
        let tag = dedup_tag(&plain_hash, b"secret").unwrap();
        assert_eq!(
            tag,
            "b901acf7409e6dd53a8cae6e26db10291416cb43eed824ad7d7ffec1663e2c40"
        );
    }

    #[test]
    fn dedup_tag_is_deterministic() {
        let plain_hash = sha256_hex(b"some document");
        let a = dedup_tag(&plain_hash, b"dedup-secret").unwrap();
        let b = dedup_tag(&plain_hash, b"dedup-secret").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn dedup_tag_differs_per_document() {
        let a = dedup_tag(&sha256_hex(b"doc-a"), b"dedup-secret").unwrap();
        let b = dedup_tag(&sha256_hex(b"doc-b"), b"dedup-secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn dedup_tag_differs_per_secret() {
        let plain_hash = sha256_hex(b"doc");
        let a = dedup_tag(&plain_hash, b"secret-1").unwrap();
        let b = dedup_tag(&plain_hash, b"secret-2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn dedup_tag_is_not_the_plain_hash() {
        let plain_hash = sha256_hex(b"doc");
        let tag = dedup_tag(&plain_hash, b"secret").unwrap();
        assert_ne!(tag, plain_hash);
    }
}
