//! RSA key construction from big-endian components

use super::Key;
use crate::error::{Error, Result};
use crate::limits::MAX_RSA_MODULUS_BITS;

use ::rsa::traits::{PrivateKeyParts, PublicKeyParts};
use ::rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// RSA key handle
pub enum RsaKey {
    /// Private key (signing)
    Private(Box<RsaPrivateKey>),
    /// Public key (verification)
    Public(Box<RsaPublicKey>),
}

impl RsaKey {
    /// Public half of the key
    pub fn public_key(&self) -> RsaPublicKey {
        match self {
            RsaKey::Private(key) => key.to_public_key(),
            RsaKey::Public(key) => key.as_ref().clone(),
        }
    }
}

/// Both prime factors of the modulus
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct RsaPrimes {
    pub p: Vec<u8>,
    pub q: Vec<u8>,
}

/// CRT exponents and coefficient (`dp`, `dq`, `qi`)
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct RsaCrtComponents {
    pub dp: Vec<u8>,
    pub dq: Vec<u8>,
    pub qi: Vec<u8>,
}

/// Raw RSA private key components
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct RsaPrivateComponents {
    pub n: Vec<u8>,
    pub e: Vec<u8>,
    pub d: Vec<u8>,
    pub primes: Option<RsaPrimes>,
    pub crt: Option<RsaCrtComponents>,
}

impl Key {
    /// Create an RSA public key from modulus and exponent bytes
    pub fn rsa_public(n: &[u8], e: &[u8]) -> Result<Self> {
        let key = RsaPublicKey::new_with_max_size(
            BigUint::from_bytes_be(n),
            BigUint::from_bytes_be(e),
            MAX_RSA_MODULUS_BITS,
        )
        .map_err(|e| Error::KeyInvalid(format!("rsa: {e}")))?;

        Ok(Key::Rsa(RsaKey::Public(Box::new(key))))
    }

    /// Create an RSA private key
    ///
    /// Without `p` and `q` the primes are recovered from `n`, `e` and `d`.
    /// CRT values are always precomputed; supplied ones must agree with the
    /// supplied primes.
    pub fn rsa_private(components: &RsaPrivateComponents) -> Result<Self> {
        let primes = match &components.primes {
            Some(primes) => vec![
                BigUint::from_bytes_be(&primes.p),
                BigUint::from_bytes_be(&primes.q),
            ],
            None => Vec::new(),
        };

        let mut key = RsaPrivateKey::from_components(
            BigUint::from_bytes_be(&components.n),
            BigUint::from_bytes_be(&components.e),
            BigUint::from_bytes_be(&components.d),
            primes,
        )
        .map_err(|e| Error::KeyInvalid(format!("rsa: {e}")))?;

        if key.size() * 8 > MAX_RSA_MODULUS_BITS {
            return Err(Error::KeyInvalid(format!(
                "rsa: modulus of {} bits exceeds {MAX_RSA_MODULUS_BITS}",
                key.size() * 8
            )));
        }

        key.validate()
            .map_err(|e| Error::KeyInvalid(format!("rsa: {e}")))?;
        key.precompute()
            .map_err(|e| Error::KeyInvalid(format!("rsa: {e}")))?;

        if let (Some(crt), Some(_)) = (&components.crt, &components.primes) {
            let dp = BigUint::from_bytes_be(&crt.dp);
            let dq = BigUint::from_bytes_be(&crt.dq);
            if key.dp() != Some(&dp) || key.dq() != Some(&dq) {
                return Err(Error::KeyInvalid(
                    "rsa: CRT exponents do not match the prime factors".into(),
                ));
            }

            // qi is the inverse of q modulo p
            let qi = BigUint::from_bytes_be(&crt.qi);
            let coefficient_ok = match key.primes() {
                [p, q, ..] => &qi < p && (&qi * q) % p == BigUint::from(1u32),
                _ => false,
            };
            if !coefficient_ok {
                return Err(Error::KeyInvalid(
                    "rsa: CRT coefficient does not match the prime factors".into(),
                ));
            }
        }

        Ok(Key::Rsa(RsaKey::Private(Box::new(key))))
    }
}
