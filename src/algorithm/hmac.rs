use crate::algorithm::{Algorithm, HashAlgorithm, SignatureAlgorithm};
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::utils::SignatureBuffer;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac as HmacCore, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HMAC family (HS256, HS384, HS512)
pub struct Hmac {
    algorithm: Algorithm,
    hash: HashAlgorithm,
}

impl Hmac {
    pub fn new(algorithm: Algorithm, hash: HashAlgorithm) -> Self {
        Self { algorithm, hash }
    }
}

impl SignatureAlgorithm for Hmac {
    fn name(&self) -> &'static str {
        self.algorithm.as_str()
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<SignatureBuffer> {
        let secret = key.as_symmetric()?;
        SignatureBuffer::try_from_vec(compute_mac(self.hash, signing_input, secret.as_bytes())?)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        let secret = key.as_symmetric()?;
        let expected = compute_mac(self.hash, signing_input, secret.as_bytes())?;

        if signature.len() != expected.len() {
            return Err(Error::SignatureInvalid);
        }

        if constant_time_eq(signature, &expected) {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }
}

/// Compute the MAC of `signing_input` under `secret`
fn compute_mac(hash: HashAlgorithm, signing_input: &[u8], secret: &[u8]) -> Result<Vec<u8>> {
    let invalid = |_| Error::SigningFailed("hmac: invalid key length".into());
    let tag = match hash {
        HashAlgorithm::Sha256 => {
            let mut mac = HmacCore::<Sha256>::new_from_slice(secret).map_err(invalid)?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
        HashAlgorithm::Sha384 => {
            let mut mac = HmacCore::<Sha384>::new_from_slice(secret).map_err(invalid)?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
        HashAlgorithm::Sha512 => {
            let mut mac = HmacCore::<Sha512>::new_from_slice(secret).map_err(invalid)?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(tag)
}
