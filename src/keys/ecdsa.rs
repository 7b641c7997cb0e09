//! ECDSA key construction from curve coordinates

use super::Key;
use crate::algorithm::EcdsaCurve;
use crate::error::{Error, Result};

/// ECDSA key handle
pub enum EcdsaKey {
    /// Private scalar with its derived public point
    Signing(EcdsaSigningKey),
    /// Public point only
    Verifying(EcdsaVerifyingKey),
}

impl EcdsaKey {
    pub fn curve(&self) -> EcdsaCurve {
        match self {
            EcdsaKey::Signing(key) => key.curve(),
            EcdsaKey::Verifying(key) => key.curve(),
        }
    }
}

/// ECDSA private key on one of the supported curves
pub enum EcdsaSigningKey {
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
    P521(p521::ecdsa::SigningKey),
}

impl EcdsaSigningKey {
    pub fn curve(&self) -> EcdsaCurve {
        match self {
            EcdsaSigningKey::P256(_) => EcdsaCurve::P256,
            EcdsaSigningKey::P384(_) => EcdsaCurve::P384,
            EcdsaSigningKey::P521(_) => EcdsaCurve::P521,
        }
    }
}

/// ECDSA public key on one of the supported curves
pub enum EcdsaVerifyingKey {
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
    P521(p521::ecdsa::VerifyingKey),
}

impl EcdsaVerifyingKey {
    pub fn curve(&self) -> EcdsaCurve {
        match self {
            EcdsaVerifyingKey::P256(_) => EcdsaCurve::P256,
            EcdsaVerifyingKey::P384(_) => EcdsaCurve::P384,
            EcdsaVerifyingKey::P521(_) => EcdsaCurve::P521,
        }
    }
}

/// Left-pad a big-endian integer to the curve's field size
fn pad_to_field(bytes: &[u8], curve: EcdsaCurve) -> Result<Vec<u8>> {
    let size = curve.field_size();
    if bytes.len() > size {
        return Err(Error::KeyInvalid(format!(
            "ecdsa: coordinate of {} bytes is too long for {curve} ({size} bytes)",
            bytes.len()
        )));
    }
    let mut padded = vec![0u8; size - bytes.len()];
    padded.extend_from_slice(bytes);
    Ok(padded)
}

impl Key {
    /// Create an ECDSA signing key from the private scalar `d`
    ///
    /// The public point is derived from `d`; no supplied coordinates are trusted.
    pub fn ecdsa_signing(curve: EcdsaCurve, d: &[u8]) -> Result<Self> {
        let mut scalar = pad_to_field(d, curve)?;
        let invalid = |_| Error::KeyInvalid(format!("ecdsa: private scalar is invalid for {curve}"));

        let key = match curve {
            EcdsaCurve::P256 => {
                p256::ecdsa::SigningKey::from_slice(&scalar).map(EcdsaSigningKey::P256)
            }
            EcdsaCurve::P384 => {
                p384::ecdsa::SigningKey::from_slice(&scalar).map(EcdsaSigningKey::P384)
            }
            EcdsaCurve::P521 => {
                p521::ecdsa::SigningKey::from_slice(&scalar).map(EcdsaSigningKey::P521)
            }
        };
        zeroize::Zeroize::zeroize(&mut scalar);

        Ok(Key::Ecdsa(EcdsaKey::Signing(key.map_err(invalid)?)))
    }

    /// Create an ECDSA verifying key from affine coordinates
    pub fn ecdsa_verifying(curve: EcdsaCurve, x: &[u8], y: &[u8]) -> Result<Self> {
        // SEC1 uncompressed point: 0x04 || x || y
        let mut sec1 = Vec::with_capacity(1 + 2 * curve.field_size());
        sec1.push(0x04);
        sec1.extend_from_slice(&pad_to_field(x, curve)?);
        sec1.extend_from_slice(&pad_to_field(y, curve)?);

        let key = match curve {
            EcdsaCurve::P256 => {
                p256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1).map(EcdsaVerifyingKey::P256)
            }
            EcdsaCurve::P384 => {
                p384::ecdsa::VerifyingKey::from_sec1_bytes(&sec1).map(EcdsaVerifyingKey::P384)
            }
            EcdsaCurve::P521 => {
                p521::ecdsa::VerifyingKey::from_sec1_bytes(&sec1).map(EcdsaVerifyingKey::P521)
            }
        }
        .map_err(|_| Error::KeyInvalid(format!("ecdsa: point is not on {curve}")))?;

        Ok(Key::Ecdsa(EcdsaKey::Verifying(key)))
    }
}
