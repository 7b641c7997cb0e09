//! The token aggregate
//!
//! A [`Token`] owns a header object, a claims object, their cached serialized
//! forms, the signing algorithm and the raw signature. Every mutator drops the
//! cached text it affects, so export and signing always see current JSON.
//!
//! Invariant: the algorithm is [`Algorithm::None`] exactly when the signature is
//! empty. [`Token::import`] is the only place untrusted input can break it, and
//! it rejects such input.

mod claims;

pub use claims::ClaimType;

use crate::algorithm::Algorithm;
use crate::compact::{decode_compact, encode_compact, signing_input};
use crate::engine;
use crate::error::{Error, Result};
use crate::jwk::{materialize_signing_key, materialize_verification_key};
use crate::utils::SignatureBuffer;

use serde_json::{Map, Value};
use std::cell::OnceCell;
use tracing::{debug, trace};

/// Default `typ` header value
pub const DEFAULT_TOKEN_TYPE: &str = "JWT";

/// A JSON Web Token, signed or unsigned
#[derive(Debug, Clone)]
pub struct Token {
    header: Map<String, Value>,
    claims: Map<String, Value>,
    header_text: OnceCell<String>,
    claims_text: OnceCell<String>,
    algorithm: Algorithm,
    signature: SignatureBuffer,
}

impl Token {
    /// Create an empty, unsigned token
    ///
    /// The header starts as `{"typ": <token_type>}`, defaulting to `"JWT"`.
    pub fn new(token_type: Option<&str>) -> Self {
        let mut header = Map::new();
        header.insert(
            "typ".into(),
            Value::String(token_type.unwrap_or(DEFAULT_TOKEN_TYPE).into()),
        );

        Self {
            header,
            claims: Map::new(),
            header_text: OnceCell::new(),
            claims_text: OnceCell::new(),
            algorithm: Algorithm::None,
            signature: SignatureBuffer::new(),
        }
    }

    /// Parse a compact serialization
    ///
    /// An absent, non-string or unrecognised `alg` reads as [`Algorithm::None`].
    /// The decoded header and claims texts are kept, so exporting an unmodified
    /// import reproduces the input.
    ///
    /// # Errors
    ///
    /// Malformed input: wrong segment count, bad Base64URL, JSON that is not an
    /// object, an oversized segment, or a signature present for `none` (or
    /// missing for a signing algorithm).
    pub fn import(text: &str) -> Result<Self> {
        let parts = decode_compact(text)?;
        let header = parse_object("header", &parts.header)?;
        let claims = parse_object("claims", &parts.claims)?;

        let algorithm = header
            .get("alg")
            .and_then(Value::as_str)
            .and_then(|alg| Algorithm::from_str(alg).ok())
            .unwrap_or_default();

        if algorithm.is_signing() == parts.signature.is_empty() {
            return Err(Error::SignatureAlgorithmMismatch {
                algorithm: algorithm.as_str().into(),
                signature_len: parts.signature.len(),
            });
        }

        trace!(
            algorithm = algorithm.as_str(),
            claims = claims.len(),
            signature_len = parts.signature.len(),
            "imported token"
        );

        Ok(Self {
            header,
            claims,
            header_text: OnceCell::from(parts.header),
            claims_text: OnceCell::from(parts.claims),
            algorithm,
            signature: parts.signature,
        })
    }

    /// Compact serialization
    ///
    /// With `with_signature` the result always has three segments; the last is
    /// empty for an unsigned token. Without it the result is the signing input.
    pub fn export(&self, with_signature: bool) -> Result<String> {
        let signature = with_signature.then(|| self.signature.as_bytes());
        Ok(encode_compact(
            self.header_text()?,
            self.claims_text()?,
            signature,
        ))
    }

    /// Sign the token with the key described by `jwk`
    ///
    /// Sets the header `alg` and replaces any previous signature. On failure
    /// the token is left unsigned and the header carries no `alg`, so its
    /// export still imports.
    ///
    /// # Errors
    ///
    /// [`Error::AlgorithmNoneRejected`] for `none`, [`Error::KeyDocumentMissing`]
    /// unless `jwk` is an object, otherwise any key material or provider error.
    pub fn sign(&mut self, algorithm: Algorithm, jwk: &Value) -> Result<()> {
        if !algorithm.is_signing() {
            return Err(Error::AlgorithmNoneRejected);
        }
        if !jwk.is_object() {
            return Err(Error::KeyDocumentMissing);
        }

        self.header
            .insert("alg".into(), Value::String(algorithm.as_str().into()));
        self.header_text.take();

        self.signature.clear();
        self.algorithm = Algorithm::None;

        let result = self.sign_with(algorithm, jwk);
        if result.is_err() {
            self.header.shift_remove("alg");
            self.header_text.take();
        }
        result
    }

    fn sign_with(&mut self, algorithm: Algorithm, jwk: &Value) -> Result<()> {
        let input = signing_input(self.header_text()?, self.claims_text()?);
        let key = materialize_signing_key(jwk, algorithm).map_err(|e| {
            debug!(algorithm = algorithm.as_str(), error = %e, "signing key rejected");
            e
        })?;
        let signature = engine::sign(input.as_bytes(), algorithm, &key)?;

        self.signature = signature;
        self.algorithm = algorithm;
        Ok(())
    }

    /// Whether the stored signature verifies under the key described by `jwk`
    ///
    /// Unsigned tokens, non-object key documents, unusable keys and mismatching
    /// signatures all yield `false`.
    pub fn has_valid_signature(&self, jwk: &Value) -> bool {
        if !self.algorithm.is_signing() || self.signature.is_empty() {
            debug!("token is unsigned");
            return false;
        }

        let key = match materialize_verification_key(jwk, self.algorithm) {
            Ok(key) => key,
            Err(e) => {
                debug!(
                    algorithm = self.algorithm.as_str(),
                    category = ?e.category(),
                    error = %e,
                    "verification key rejected"
                );
                return false;
            }
        };

        let input = match (self.header_text(), self.claims_text()) {
            (Ok(header), Ok(claims)) => signing_input(header, claims),
            _ => return false,
        };

        engine::verify(
            input.as_bytes(),
            self.signature.as_bytes(),
            self.algorithm,
            &key,
        )
    }

    /// Algorithm of the current signature
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Raw signature bytes, empty when unsigned
    pub fn signature(&self) -> &[u8] {
        self.signature.as_bytes()
    }

    /// Header object
    pub fn header(&self) -> &Map<String, Value> {
        &self.header
    }

    /// Header `typ`, if present and a string
    pub fn token_type(&self) -> Option<&str> {
        self.header.get("typ").and_then(Value::as_str)
    }

    fn header_text(&self) -> Result<&str> {
        cached_text(&self.header_text, &self.header)
    }

    fn claims_text(&self) -> Result<&str> {
        cached_text(&self.claims_text, &self.claims)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self.export(true).map_err(|_| std::fmt::Error)?;
        f.write_str(&text)
    }
}

fn cached_text<'a>(cell: &'a OnceCell<String>, object: &Map<String, Value>) -> Result<&'a str> {
    if let Some(text) = cell.get() {
        return Ok(text.as_str());
    }
    let text = serde_json::to_string(object)?;
    Ok(cell.get_or_init(|| text).as_str())
}

fn parse_object(segment: &str, text: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(Error::FormatInvalidJson(format!(
            "{segment} is not a JSON object"
        ))),
        Err(e) => Err(Error::FormatInvalidJson(format!("{segment}: {e}"))),
    }
}
