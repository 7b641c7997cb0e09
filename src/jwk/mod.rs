//! JWK (JSON Web Key) documents
//!
//! A [`Jwk`] is a borrowed view over a JSON object. Nothing is validated when
//! the view is created; each materializer pulls and decodes only the members
//! its key family needs.

mod materialize;

pub use materialize::{materialize_signing_key, materialize_verification_key};

use crate::algorithm::{Algorithm, KeyFamily};
use crate::error::{Error, Result};
use crate::limits::{MAX_JWK_FIELD_B64_SIZE, MAX_JWK_FIELD_SIZE};
use crate::utils::base64url;

use serde_json::{Map, Value};
use tracing::warn;
use zeroize::Zeroizing;

/// Borrowed view over a key description document
#[derive(Debug, Clone, Copy)]
pub struct Jwk<'a> {
    members: &'a Map<String, Value>,
}

impl<'a> Jwk<'a> {
    /// View `document` as a JWK
    ///
    /// Fails with [`Error::KeyDocumentMissing`] unless `document` is a JSON object.
    pub fn from_value(document: &'a Value) -> Result<Self> {
        document
            .as_object()
            .map(|members| Self { members })
            .ok_or(Error::KeyDocumentMissing)
    }

    /// Key type (`kty`), if present and a string
    pub fn kty(&self) -> Option<&'a str> {
        self.members.get("kty").and_then(Value::as_str)
    }

    /// Advisory algorithm (`alg`), if present and a string
    pub fn alg(&self) -> Option<&'a str> {
        self.members.get("alg").and_then(Value::as_str)
    }

    /// Curve name (`crv`), if present and a string
    pub fn crv(&self) -> Option<&'a str> {
        self.members.get("crv").and_then(Value::as_str)
    }

    /// A string member that must be present
    fn required_str(&self, name: &'static str) -> Result<&'a str> {
        match self.members.get(name) {
            None => Err(Error::JwkMissingField(name)),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(Error::JwkFieldInvalid {
                field: name,
                reason: "expected a string".into(),
            }),
        }
    }

    /// Decode an optional Base64URL coordinate
    ///
    /// Decoded bytes are wiped on drop; they may be private key material.
    fn coordinate(&self, name: &'static str) -> Result<Option<Zeroizing<Vec<u8>>>> {
        let encoded = match self.members.get(name) {
            None => return Ok(None),
            Some(Value::String(s)) => s,
            Some(_) => {
                return Err(Error::JwkFieldInvalid {
                    field: name,
                    reason: "expected a Base64URL string".into(),
                })
            }
        };

        if encoded.len() > MAX_JWK_FIELD_B64_SIZE {
            return Err(Error::JwkFieldTooLarge {
                field: name,
                size: encoded.len(),
                max: MAX_JWK_FIELD_B64_SIZE,
            });
        }

        let bytes = base64url::decode_bytes(encoded, MAX_JWK_FIELD_SIZE).map_err(|e| {
            Error::JwkFieldInvalid {
                field: name,
                reason: e.to_string(),
            }
        })?;

        if bytes.is_empty() {
            return Err(Error::JwkFieldInvalid {
                field: name,
                reason: "empty value".into(),
            });
        }

        Ok(Some(Zeroizing::new(bytes)))
    }

    /// Decode a Base64URL coordinate that must be present
    fn required_coordinate(&self, name: &'static str) -> Result<Zeroizing<Vec<u8>>> {
        self.coordinate(name)?
            .ok_or(Error::JwkMissingField(name))
    }

    /// Check `kty` against the family `algorithm` signs with
    ///
    /// A disagreeing `alg` member is only warned about.
    fn check_algorithm(&self, algorithm: Algorithm, family: KeyFamily) -> Result<()> {
        let kty = self.required_str("kty")?;
        if !matches!(kty, "oct" | "RSA" | "EC") {
            return Err(Error::KeyTypeUnsupported(kty.into()));
        }

        if kty != family.jwk_kty() {
            return Err(Error::KeyTypeMismatch {
                algorithm: algorithm.as_str().into(),
                expected: family.jwk_kty().into(),
                found: kty.into(),
            });
        }

        if let Some(alg) = self.alg() {
            if alg != algorithm.as_str() {
                warn!(
                    jwk_alg = alg,
                    algorithm = algorithm.as_str(),
                    "JWK alg member does not match the requested algorithm"
                );
            }
        }

        Ok(())
    }
}
