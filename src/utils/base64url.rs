//! Base64URL encoding/decoding per RFC 4648
//!
//! This module provides a thin wrapper around the `base64` crate with
//! size limit validation for security.

use crate::error::{Error, Result};
use crate::limits::encoded_len;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encode bytes to Base64URL string (no padding)
pub fn encode_bytes(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode Base64URL string to bytes with maximum size limit
///
/// The encoded length is checked before decoding so oversized input is
/// rejected without allocating for it.
pub fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>> {
    if input.len() > encoded_len(max_size) {
        return Err(Error::FormatInvalidBase64(format!(
            "Encoded size exceeds limit: {} characters (max: {})",
            input.len(),
            encoded_len(max_size)
        )));
    }

    let result = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::FormatInvalidBase64(format!("Base64URL decode failed: {e}")))?;

    if result.len() > max_size {
        return Err(Error::FormatInvalidBase64(format!(
            "Decoded size exceeds limit: {} bytes (max: {})",
            result.len(),
            max_size
        )));
    }

    Ok(result)
}

/// Decode Base64URL string to UTF-8 string with size limit
pub fn decode_string(input: &str, max_size: usize) -> Result<String> {
    decode_bytes(input, max_size).and_then(|bytes| {
        String::from_utf8(bytes)
            .map_err(|e| Error::FormatInvalidBase64(format!("Invalid UTF-8: {e}")))
    })
}
