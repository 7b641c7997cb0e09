//! Key handles for JWT signing and verification
//!
//! This module provides a type-safe abstraction over the key material each
//! algorithm family needs:
//! - Symmetric keys (for HMAC algorithms)
//! - RSA private/public keys
//! - ECDSA signing/verifying keys on P-256, P-384 and P-521
//!
//! Handles are built from raw big-endian coordinates; mapping JWK members to
//! those coordinates happens in [`crate::jwk`].

#[cfg(feature = "ecdsa")]
mod ecdsa;
#[cfg(feature = "rsa")]
mod rsa;

#[cfg(feature = "ecdsa")]
pub use self::ecdsa::{EcdsaKey, EcdsaSigningKey, EcdsaVerifyingKey};
#[cfg(feature = "rsa")]
pub use self::rsa::{RsaCrtComponents, RsaKey, RsaPrimes, RsaPrivateComponents};

use crate::error::{Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A key that can be used for JWT signing or verification
pub enum Key {
    /// Symmetric key for HMAC algorithms
    Symmetric(SymmetricKey),

    /// RSA key for RS256/RS384/RS512
    #[cfg(feature = "rsa")]
    Rsa(RsaKey),

    /// ECDSA key for ES256/ES384/ES512
    #[cfg(feature = "ecdsa")]
    Ecdsa(EcdsaKey),
}

impl Key {
    /// Create a symmetric key from bytes
    pub fn symmetric(secret: impl Into<Vec<u8>>) -> Self {
        Key::Symmetric(SymmetricKey::new(secret.into()))
    }

    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            Key::Symmetric(_) => "Symmetric",
            #[cfg(feature = "rsa")]
            Key::Rsa(RsaKey::Private(_)) => "RSA private",
            #[cfg(feature = "rsa")]
            Key::Rsa(RsaKey::Public(_)) => "RSA public",
            #[cfg(feature = "ecdsa")]
            Key::Ecdsa(EcdsaKey::Signing(_)) => "ECDSA signing",
            #[cfg(feature = "ecdsa")]
            Key::Ecdsa(EcdsaKey::Verifying(_)) => "ECDSA verifying",
        }
    }

    /// Get as symmetric key or return error
    pub fn as_symmetric(&self) -> Result<&SymmetricKey> {
        match self {
            Key::Symmetric(key) => Ok(key),
            #[allow(unreachable_patterns)]
            _ => Err(self.mismatch("HMAC", "Symmetric")),
        }
    }

    /// Get as RSA key or return error
    #[cfg(feature = "rsa")]
    pub fn as_rsa(&self) -> Result<&RsaKey> {
        match self {
            Key::Rsa(key) => Ok(key),
            _ => Err(self.mismatch("RSA", "RSA")),
        }
    }

    /// Get as ECDSA key or return error
    #[cfg(feature = "ecdsa")]
    pub fn as_ecdsa(&self) -> Result<&EcdsaKey> {
        match self {
            Key::Ecdsa(key) => Ok(key),
            _ => Err(self.mismatch("ECDSA", "ECDSA")),
        }
    }

    fn mismatch(&self, algorithm: &str, expected: &str) -> Error {
        Error::KeyTypeMismatch {
            algorithm: algorithm.into(),
            expected: expected.into(),
            found: self.key_type().into(),
        }
    }
}

// Never print key material.
impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Key").field(&self.key_type()).finish()
    }
}

/// Symmetric key for HMAC algorithms
///
/// The secret is wiped from memory when the key is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    secret: Vec<u8>,
}

impl SymmetricKey {
    /// Create a new symmetric key
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl From<&[u8]> for SymmetricKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<&str> for SymmetricKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &self.secret.len())
            .finish()
    }
}
