//! JWS compact serialization
//!
//! `b64u(header) "." b64u(claims) "." b64u(signature)`, URL-safe alphabet
//! without padding. An unsigned token keeps the final separator and an empty
//! signature segment; the signing input stops after the claims segment.

use crate::error::{Error, Result};
use crate::limits::{encoded_len, MAX_SEGMENT_SIZE, MAX_SIGNATURE_SIZE};
use crate::utils::{base64url, SignatureBuffer};

use tracing::trace;

/// Decoded parts of a compact token
#[derive(Debug)]
pub struct CompactParts {
    /// Header JSON text
    pub header: String,
    /// Claims JSON text
    pub claims: String,
    /// Raw signature, empty for an unsigned token
    pub signature: SignatureBuffer,
}

/// Split and decode a compact token
///
/// Requires exactly two `.` separators. Each segment is decoded on its own and
/// bounded: 64 KiB for header and claims, the signature buffer capacity for
/// the signature.
pub fn decode_compact(text: &str) -> Result<CompactParts> {
    let mut segments = text.split('.');
    let (Some(header), Some(claims), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(Error::FormatInvalid);
    };

    trace!(
        header_len = header.len(),
        claims_len = claims.len(),
        signature_len = signature.len(),
        "decoding compact token"
    );

    let header = decode_text_segment("header", header)?;
    let claims = decode_text_segment("claims", claims)?;

    check_segment_size("signature", signature, MAX_SIGNATURE_SIZE)?;
    let signature = SignatureBuffer::try_from_vec(base64url::decode_bytes(
        signature,
        MAX_SIGNATURE_SIZE,
    )?)?;

    Ok(CompactParts {
        header,
        claims,
        signature,
    })
}

/// Assemble a compact token
///
/// With `signature` set the result has three segments (the last one empty
/// for an empty signature). Without it the result is the signing input.
pub fn encode_compact(header: &str, claims: &str, signature: Option<&[u8]>) -> String {
    let mut out = signing_input(header, claims);
    if let Some(signature) = signature {
        out.push('.');
        out.push_str(&base64url::encode_bytes(signature));
    }
    trace!(len = out.len(), signed = signature.is_some(), "encoded compact token");
    out
}

/// `b64u(header) "." b64u(claims)`
pub fn signing_input(header: &str, claims: &str) -> String {
    let mut out = base64url::encode_bytes(header);
    out.push('.');
    out.push_str(&base64url::encode_bytes(claims));
    out
}

fn decode_text_segment(segment: &'static str, encoded: &str) -> Result<String> {
    check_segment_size(segment, encoded, MAX_SEGMENT_SIZE)?;
    base64url::decode_string(encoded, MAX_SEGMENT_SIZE)
}

/// Reject a segment whose encoded form cannot fit `max` decoded bytes
fn check_segment_size(segment: &'static str, encoded: &str, max: usize) -> Result<()> {
    if encoded.len() > encoded_len(max) {
        return Err(Error::SegmentTooLarge {
            segment,
            size: encoded.len(),
            max: encoded_len(max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn test_round_trip_signed() {
        let text = encode_compact(r#"{"alg":"HS256"}"#, r#"{"sub":"alice"}"#, Some(&[1, 2, 3]));
        assert_eq!(text.split('.').count(), 3);

        let parts = decode_compact(&text).unwrap();
        assert_eq!(parts.header, r#"{"alg":"HS256"}"#);
        assert_eq!(parts.claims, r#"{"sub":"alice"}"#);
        assert_eq!(parts.signature.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_unsigned_keeps_empty_segment() {
        let text = encode_compact(r#"{"alg":"none"}"#, "{}", Some(&[]));
        assert!(text.ends_with('.'));
        assert!(decode_compact(&text).unwrap().signature.is_empty());
    }

    #[test]
    fn test_signing_input_has_two_segments() {
        let input = encode_compact("{}", "{}", None);
        assert_eq!(input, "e30.e30");
        assert_eq!(input, signing_input("{}", "{}"));
    }

    #[test]
    fn test_segment_count() {
        for text in ["", "e30", "e30.e30", "e30.e30.e30.e30", "...."] {
            assert!(
                matches!(decode_compact(text), Err(Error::FormatInvalid)),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_invalid_base64() {
        for text in ["e30.e3$.", "e30.e30.a+b", "e=0.e30.", "e30. e30."] {
            let err = decode_compact(text).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::MalformedInput, "{text:?}");
        }
    }

    #[test]
    fn test_oversized_segments() {
        let huge = "A".repeat(encoded_len(MAX_SEGMENT_SIZE) + 4);
        assert!(matches!(
            decode_compact(&format!("e30.{huge}.")),
            Err(Error::SegmentTooLarge {
                segment: "claims",
                ..
            })
        ));

        let long_sig = "A".repeat(encoded_len(MAX_SIGNATURE_SIZE) + 4);
        assert!(matches!(
            decode_compact(&format!("e30.e30.{long_sig}")),
            Err(Error::SegmentTooLarge {
                segment: "signature",
                ..
            })
        ));
    }
}
