/// AES key length in bytes (256 bits). Used for both the per-document key
/// and the operator master key.
pub const AES_KEY_LENGTH: usize = 32;

/// AES-GCM IV length in bytes (96 bits per NIST recommendation).
pub const AES_GCM_IV_LENGTH: usize = 12;

/// AES-GCM tag length in bytes (128 bits). The tag is stored inline as the
/// last 16 bytes of the persisted ciphertext blob.
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// Envelope (AES-256-CBC) IV length in bytes (one block, 128 bits).
pub const ENVELOPE_IV_LENGTH: usize = 16;

/// Length of a wrapped document key: 32-byte key + one PKCS#7 padding block.
pub const WRAPPED_KEY_LENGTH: usize = 48;

/// Length of a SHA-256 digest rendered as lowercase hex.
pub const SHA256_HEX_LENGTH: usize = 64;
