use crate::algorithm::{Algorithm, EcdsaCurve, HashAlgorithm, SignatureAlgorithm};
use crate::error::{Error, Result};
use crate::keys::{EcdsaKey, EcdsaSigningKey, EcdsaVerifyingKey, Key};
use crate::utils::SignatureBuffer;

use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};

/// ECDSA family (ES256, ES384, ES512)
///
/// Signatures use the fixed-width JWS form: `R || S`, each left-padded to
/// the curve's field size.
pub struct Ecdsa {
    algorithm: Algorithm,
    hash: HashAlgorithm,
    curve: EcdsaCurve,
}

impl Ecdsa {
    pub fn new(algorithm: Algorithm, hash: HashAlgorithm, curve: EcdsaCurve) -> Self {
        Self {
            algorithm,
            hash,
            curve,
        }
    }

    /// Reject keys on a curve other than the algorithm's
    fn check_curve(&self, key: &EcdsaKey) -> Result<()> {
        if key.curve() != self.curve {
            return Err(Error::KeyCurveMismatch {
                algorithm: self.name().into(),
                expected: self.curve.jwk_name().into(),
                found: key.curve().jwk_name().into(),
            });
        }
        Ok(())
    }
}

impl SignatureAlgorithm for Ecdsa {
    fn name(&self) -> &'static str {
        self.algorithm.as_str()
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<SignatureBuffer> {
        let ecdsa_key = key.as_ecdsa()?;
        self.check_curve(ecdsa_key)?;

        let signing_key = match ecdsa_key {
            EcdsaKey::Signing(signing_key) => signing_key,
            EcdsaKey::Verifying(_) => {
                return Err(Error::KeyTypeMismatch {
                    algorithm: self.name().into(),
                    expected: "ECDSA signing".into(),
                    found: key.key_type().into(),
                })
            }
        };

        let digest = self.hash.digest(signing_input)?;
        let failed = |e: p256::ecdsa::Error| Error::SigningFailed(format!("ecdsa: {e}"));

        let signature = match signing_key {
            EcdsaSigningKey::P256(sk) => {
                let sig: p256::ecdsa::Signature =
                    sk.sign_prehash(digest.as_bytes()).map_err(failed)?;
                sig.to_bytes().to_vec()
            }
            EcdsaSigningKey::P384(sk) => {
                let sig: p384::ecdsa::Signature =
                    sk.sign_prehash(digest.as_bytes()).map_err(failed)?;
                sig.to_bytes().to_vec()
            }
            EcdsaSigningKey::P521(sk) => {
                let sig: p521::ecdsa::Signature =
                    sk.sign_prehash(digest.as_bytes()).map_err(failed)?;
                sig.to_bytes().to_vec()
            }
        };

        SignatureBuffer::try_from_vec(signature)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        let ecdsa_key = key.as_ecdsa()?;
        self.check_curve(ecdsa_key)?;

        if signature.len() != 2 * self.curve.field_size() {
            return Err(Error::SignatureInvalid);
        }

        let digest = self.hash.digest(signing_input)?;
        let prehash = digest.as_bytes();

        let verified = match ecdsa_key {
            EcdsaKey::Signing(EcdsaSigningKey::P256(sk)) => {
                verify_p256(sk.verifying_key(), prehash, signature)
            }
            EcdsaKey::Verifying(EcdsaVerifyingKey::P256(vk)) => {
                verify_p256(vk, prehash, signature)
            }
            EcdsaKey::Signing(EcdsaSigningKey::P384(sk)) => {
                verify_p384(sk.verifying_key(), prehash, signature)
            }
            EcdsaKey::Verifying(EcdsaVerifyingKey::P384(vk)) => {
                verify_p384(vk, prehash, signature)
            }
            EcdsaKey::Signing(EcdsaSigningKey::P521(sk)) => {
                verify_p521(&p521::ecdsa::VerifyingKey::from(sk), prehash, signature)
            }
            EcdsaKey::Verifying(EcdsaVerifyingKey::P521(vk)) => {
                verify_p521(vk, prehash, signature)
            }
        };

        if verified {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }
}

fn verify_p256(key: &p256::ecdsa::VerifyingKey, prehash: &[u8], signature: &[u8]) -> bool {
    p256::ecdsa::Signature::from_slice(signature)
        .and_then(|sig| key.verify_prehash(prehash, &sig))
        .is_ok()
}

fn verify_p384(key: &p384::ecdsa::VerifyingKey, prehash: &[u8], signature: &[u8]) -> bool {
    p384::ecdsa::Signature::from_slice(signature)
        .and_then(|sig| key.verify_prehash(prehash, &sig))
        .is_ok()
}

fn verify_p521(key: &p521::ecdsa::VerifyingKey, prehash: &[u8], signature: &[u8]) -> bool {
    p521::ecdsa::Signature::from_slice(signature)
        .and_then(|sig| key.verify_prehash(prehash, &sig))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNING_INPUT: &[u8] = b"eyJhbGciOiJFUzI1NiJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

    fn engine(alg: Algorithm) -> Ecdsa {
        Ecdsa::new(alg, alg.hash().unwrap(), alg.curve().unwrap())
    }

    fn p256_pair() -> (Key, Key) {
        let sk = p256::ecdsa::SigningKey::random(&mut rand::thread_rng());
        let point = sk.verifying_key().to_encoded_point(false);
        let signing = Key::ecdsa_signing(EcdsaCurve::P256, &sk.to_bytes()).unwrap();
        let verifying =
            Key::ecdsa_verifying(EcdsaCurve::P256, point.x().unwrap(), point.y().unwrap())
                .unwrap();
        (signing, verifying)
    }

    #[test]
    fn test_es256_round_trip() {
        let (signing, verifying) = p256_pair();
        let es256 = engine(Algorithm::ES256);
        let signature = es256.sign(SIGNING_INPUT, &signing).unwrap();
        assert_eq!(signature.len(), 64);
        assert!(es256.verify(SIGNING_INPUT, signature.as_bytes(), &verifying).is_ok());
        assert!(es256.verify(SIGNING_INPUT, signature.as_bytes(), &signing).is_ok());
    }

    #[test]
    fn test_es384_and_es512_lengths() {
        let sk384 = p384::ecdsa::SigningKey::random(&mut rand::thread_rng());
        let key384 = Key::ecdsa_signing(EcdsaCurve::P384, &sk384.to_bytes()).unwrap();
        let sig384 = engine(Algorithm::ES384).sign(SIGNING_INPUT, &key384).unwrap();
        assert_eq!(sig384.len(), 96);

        let sk521 = p521::ecdsa::SigningKey::random(&mut rand::thread_rng());
        let key521 = Key::ecdsa_signing(EcdsaCurve::P521, &sk521.to_bytes()).unwrap();
        let es512 = engine(Algorithm::ES512);
        let sig521 = es512.sign(SIGNING_INPUT, &key521).unwrap();
        assert_eq!(sig521.len(), 132);
        assert!(es512.verify(SIGNING_INPUT, sig521.as_bytes(), &key521).is_ok());
    }

    #[test]
    fn test_es512_signing_key_matches_public_point() {
        let sk = p521::ecdsa::SigningKey::random(&mut rand::thread_rng());
        let point = p521::ecdsa::VerifyingKey::from(&sk).to_encoded_point(false);
        let signing = Key::ecdsa_signing(EcdsaCurve::P521, &sk.to_bytes()).unwrap();
        let verifying =
            Key::ecdsa_verifying(EcdsaCurve::P521, point.x().unwrap(), point.y().unwrap())
                .unwrap();

        let es512 = engine(Algorithm::ES512);
        let signature = es512.sign(SIGNING_INPUT, &signing).unwrap();
        assert!(es512.verify(SIGNING_INPUT, signature.as_bytes(), &verifying).is_ok());
        assert!(es512.verify(SIGNING_INPUT, signature.as_bytes(), &signing).is_ok());
        assert!(matches!(
            es512.verify(b"tampered", signature.as_bytes(), &signing),
            Err(Error::SignatureInvalid)
        ));
    }

    #[test]
    fn test_tampered_input_fails() {
        let (signing, verifying) = p256_pair();
        let es256 = engine(Algorithm::ES256);
        let signature = es256.sign(SIGNING_INPUT, &signing).unwrap();
        assert!(matches!(
            es256.verify(b"tampered", signature.as_bytes(), &verifying),
            Err(Error::SignatureInvalid)
        ));
    }

    #[test]
    fn test_curve_mismatch() {
        let (signing, _) = p256_pair();
        assert!(matches!(
            engine(Algorithm::ES384).sign(SIGNING_INPUT, &signing),
            Err(Error::KeyCurveMismatch { .. })
        ));
    }

    #[test]
    fn test_verifying_key_cannot_sign() {
        let (_, verifying) = p256_pair();
        assert!(matches!(
            engine(Algorithm::ES256).sign(SIGNING_INPUT, &verifying),
            Err(Error::KeyTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_wrong_signature_length() {
        let (_, verifying) = p256_pair();
        assert!(matches!(
            engine(Algorithm::ES256).verify(SIGNING_INPUT, &[0u8; 70], &verifying),
            Err(Error::SignatureInvalid)
        ));
    }
}
