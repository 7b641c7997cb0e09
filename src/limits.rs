//! Size limit constants for input validation

// ============================================================================
// Compact serialization limits
// ============================================================================

/// Maximum size for a decoded header or claims segment (64KB)
pub(crate) const MAX_SEGMENT_SIZE: usize = 64 * 1024;

/// Maximum size for a signature, decoded or produced by a provider (2KB)
/// Enough for RSA with a 16384-bit modulus and every ECDSA curve
pub(crate) const MAX_SIGNATURE_SIZE: usize = 2048;

/// Maximum size for a message digest (SHA-512 is 64 bytes)
pub(crate) const MAX_HASH_SIZE: usize = 128;

/// Maximum length for the `alg` header field (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

// ============================================================================
// JWK field size limits
// ============================================================================

/// Maximum size for a decoded JWK coordinate or secret (1KB)
/// An 8192-bit RSA modulus is exactly 1024 bytes
pub(crate) const MAX_JWK_FIELD_SIZE: usize = 1024;

/// Maximum size for a Base64URL-encoded JWK coordinate (1366 characters)
pub(crate) const MAX_JWK_FIELD_B64_SIZE: usize = encoded_len(MAX_JWK_FIELD_SIZE);

/// Largest accepted RSA modulus in bits
#[cfg(feature = "rsa")]
pub(crate) const MAX_RSA_MODULUS_BITS: usize = 8192;

/// Length of unpadded Base64URL text for `len` bytes
pub(crate) const fn encoded_len(len: usize) -> usize {
    (len * 4 + 2) / 3
}
