use super::{Algorithm, KeyFamily};
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::utils::SignatureBuffer;

/// Core trait that every JWS signature family implements
///
/// Implementations receive the raw signing input (`header.claims` in
/// Base64URL) and raw signature bytes; encoding is handled by the caller.
pub trait SignatureAlgorithm {
    /// The algorithm identifier (e.g., "HS256", "RS256")
    fn name(&self) -> &'static str;

    /// Produce a signature over `signing_input`
    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<SignatureBuffer>;

    /// Verify `signature` over `signing_input`
    ///
    /// Returns [`Error::SignatureInvalid`] when the signature does not match.
    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()>;
}

/// Type alias for boxed algorithm trait objects
pub type SignatureEngine = Box<dyn SignatureAlgorithm + Send + Sync>;

/// Get the signature engine for an algorithm
///
/// Fails for [`Algorithm::None`] and for families whose cargo feature is disabled.
pub fn get_engine(algorithm: Algorithm) -> Result<SignatureEngine> {
    let info = algorithm
        .info()
        .ok_or_else(|| Error::AlgorithmUnsupported(algorithm.as_str().into()))?;

    match info.family {
        KeyFamily::Symmetric => Ok(Box::new(super::hmac::Hmac::new(algorithm, info.hash))),

        #[cfg(feature = "rsa")]
        KeyFamily::Rsa => Ok(Box::new(super::rsa::RsaPkcs1::new(algorithm, info.hash))),

        #[cfg(feature = "ecdsa")]
        KeyFamily::Ecdsa => match info.curve {
            Some(curve) => Ok(Box::new(super::ecdsa::Ecdsa::new(
                algorithm, info.hash, curve,
            ))),
            None => Err(Error::AlgorithmUnsupported(algorithm.as_str().into())),
        },

        #[allow(unreachable_patterns)]
        _ => Err(Error::AlgorithmUnsupported(algorithm.as_str().into())),
    }
}
