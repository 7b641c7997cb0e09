//! Errors for jwsign
//!
//! Every variant belongs to one of four categories (see [`ErrorCategory`]).
//! Callers of [`Token::has_valid_signature`](crate::Token::has_valid_signature)
//! only ever see `false`; the category is there for diagnostics.

use thiserror::Error;

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad Base64URL, bad JSON, wrong segment count, oversized segment,
    /// or an algorithm/signature inconsistency in an imported token
    MalformedInput,

    /// The caller passed something that can never succeed
    InvalidArgument,

    /// The key description document cannot produce a usable key
    KeyMaterial,

    /// The cryptographic operation itself failed
    Provider,
}

/// jwsign errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid JWT format: expected three parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    #[error("Token segment '{segment}' too large: {size} bytes (maximum: {max} bytes)")]
    SegmentTooLarge {
        segment: &'static str,
        size: usize,
        max: usize,
    },

    #[error("Algorithm '{algorithm}' is inconsistent with a signature of {signature_len} bytes")]
    SignatureAlgorithmMismatch {
        algorithm: String,
        signature_len: usize,
    },

    // ============================================================================
    // Argument Errors
    // ============================================================================
    #[error("The 'none' algorithm cannot be used to sign")]
    AlgorithmNoneRejected,

    #[error("Algorithm '{0}' is not supported or not enabled")]
    AlgorithmUnsupported(String),

    #[error("Key description must be a JSON object")]
    KeyDocumentMissing,

    #[error("Claim number must be finite, got {0}")]
    ClaimNumberNotFinite(f64),

    // ============================================================================
    // Key Material Errors
    // ============================================================================
    #[error("JWK is missing required field '{0}'")]
    JwkMissingField(&'static str),

    #[error("JWK field '{field}' could not be decoded: {reason}")]
    JwkFieldInvalid { field: &'static str, reason: String },

    #[error("JWK field '{field}' too large: {size} bytes (maximum: {max} bytes)")]
    JwkFieldTooLarge {
        field: &'static str,
        size: usize,
        max: usize,
    },

    #[error("JWK key type '{0}' is not supported")]
    KeyTypeUnsupported(String),

    #[error("JWK curve '{0}' is not supported")]
    KeyCurveUnsupported(String),

    #[error("Key type mismatch for algorithm '{algorithm}': expected {expected}, got {found}")]
    KeyTypeMismatch {
        algorithm: String,
        expected: String,
        found: String,
    },

    #[error("Curve mismatch for algorithm '{algorithm}': expected {expected}, got {found}")]
    KeyCurveMismatch {
        algorithm: String,
        expected: String,
        found: String,
    },

    #[error("Key material rejected: {0}")]
    KeyInvalid(String),

    // ============================================================================
    // Provider Errors
    // ============================================================================
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Buffer capacity exceeded: {size} bytes (maximum: {max} bytes)")]
    CapacityExceeded { size: usize, max: usize },
}

impl Error {
    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::FormatInvalid
            | Error::FormatInvalidBase64(_)
            | Error::FormatInvalidJson(_)
            | Error::SegmentTooLarge { .. }
            | Error::SignatureAlgorithmMismatch { .. } => ErrorCategory::MalformedInput,

            Error::AlgorithmNoneRejected
            | Error::AlgorithmUnsupported(_)
            | Error::KeyDocumentMissing
            | Error::ClaimNumberNotFinite(_) => ErrorCategory::InvalidArgument,

            Error::JwkMissingField(_)
            | Error::JwkFieldInvalid { .. }
            | Error::JwkFieldTooLarge { .. }
            | Error::KeyTypeUnsupported(_)
            | Error::KeyCurveUnsupported(_)
            | Error::KeyTypeMismatch { .. }
            | Error::KeyCurveMismatch { .. }
            | Error::KeyInvalid(_) => ErrorCategory::KeyMaterial,

            Error::SigningFailed(_) | Error::SignatureInvalid | Error::CapacityExceeded { .. } => {
                ErrorCategory::Provider
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::FormatInvalidJson(e.to_string())
    }
}

/// Result type alias for jwsign operations
pub type Result<T> = std::result::Result<T, Error>;
