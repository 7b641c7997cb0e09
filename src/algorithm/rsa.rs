use crate::algorithm::{Algorithm, HashAlgorithm, SignatureAlgorithm};
use crate::error::{Error, Result};
use crate::keys::{Key, RsaKey};
use crate::utils::SignatureBuffer;

use ::rsa::Pkcs1v15Sign;
use sha2::{Sha256, Sha384, Sha512};

/// RSASSA-PKCS1-v1_5 family (RS256, RS384, RS512)
pub struct RsaPkcs1 {
    algorithm: Algorithm,
    hash: HashAlgorithm,
}

impl RsaPkcs1 {
    pub fn new(algorithm: Algorithm, hash: HashAlgorithm) -> Self {
        Self { algorithm, hash }
    }

    fn padding(&self) -> Pkcs1v15Sign {
        match self.hash {
            HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
            HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
            HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        }
    }
}

impl SignatureAlgorithm for RsaPkcs1 {
    fn name(&self) -> &'static str {
        self.algorithm.as_str()
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<SignatureBuffer> {
        let private_key = match key.as_rsa()? {
            RsaKey::Private(private_key) => private_key,
            RsaKey::Public(_) => {
                return Err(Error::KeyTypeMismatch {
                    algorithm: self.name().into(),
                    expected: "RSA private".into(),
                    found: key.key_type().into(),
                })
            }
        };

        let digest = self.hash.digest(signing_input)?;
        let signature = private_key
            .sign(self.padding(), digest.as_bytes())
            .map_err(|e| Error::SigningFailed(format!("rsa: {e}")))?;

        SignatureBuffer::try_from_vec(signature)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        let public_key = key.as_rsa()?.public_key();
        let digest = self.hash.digest(signing_input)?;

        public_key
            .verify(self.padding(), digest.as_bytes(), signature)
            .map_err(|_| Error::SignatureInvalid)
    }
}
