//! Algorithm-dispatched signing and verification over raw signing input
//!
//! The signing input is `b64u(header) "." b64u(claims)` as bytes. Signatures are
//! raw bytes held in a capacity-checked [`SignatureBuffer`].

use crate::algorithm::{get_engine, Algorithm};
use crate::error::Result;
use crate::keys::Key;
use crate::utils::SignatureBuffer;

use tracing::debug;

/// Sign `signing_input` with `algorithm`
///
/// Fails for [`Algorithm::None`], for a key of the wrong family or curve, and
/// when the provider output would not fit the signature buffer.
pub fn sign(signing_input: &[u8], algorithm: Algorithm, key: &Key) -> Result<SignatureBuffer> {
    let engine = get_engine(algorithm)?;

    match engine.sign(signing_input, key) {
        Ok(signature) => {
            debug!(
                algorithm = engine.name(),
                signature_len = signature.len(),
                "signed"
            );
            Ok(signature)
        }
        Err(e) => {
            debug!(algorithm = engine.name(), key = key.key_type(), error = %e, "signing failed");
            Err(e)
        }
    }
}

/// Check `signature` over `signing_input`
///
/// Every failure (unsupported algorithm, unsuitable key, mismatch) is `false`;
/// the reason is logged at debug level.
pub fn verify(signing_input: &[u8], signature: &[u8], algorithm: Algorithm, key: &Key) -> bool {
    let result = get_engine(algorithm)
        .and_then(|engine| engine.verify(signing_input, signature, key));

    match result {
        Ok(()) => true,
        Err(e) => {
            debug!(
                algorithm = algorithm.as_str(),
                signature_len = signature.len(),
                category = ?e.category(),
                error = %e,
                "signature rejected"
            );
            false
        }
    }
}
