//! Mapping JWK members onto algorithm-specific key handles

use super::Jwk;
use crate::algorithm::{Algorithm, KeyFamily};
use crate::error::{Error, Result};
use crate::keys::Key;

use serde_json::Value;
use tracing::trace;

#[cfg(feature = "rsa")]
use crate::keys::{RsaCrtComponents, RsaPrimes, RsaPrivateComponents};
#[cfg(feature = "rsa")]
use tracing::warn;

/// Build a key able to sign with `algorithm`
///
/// - `oct`: `k`
/// - `RSA`: `n`, `e`, `d`; `p`/`q` when both are present; `dp`/`dq`/`qi`
///   only as a complete set
/// - `EC`: `crv` and `d`; the public point is derived from `d` and any `x`/`y`
///   members are ignored
pub fn materialize_signing_key(jwk: &Value, algorithm: Algorithm) -> Result<Key> {
    let jwk = Jwk::from_value(jwk)?;
    let family = family_of(algorithm)?;
    jwk.check_algorithm(algorithm, family)?;

    trace!(algorithm = algorithm.as_str(), kty = family.jwk_kty(), "materializing signing key");

    match family {
        KeyFamily::Symmetric => symmetric_key(&jwk),

        #[cfg(feature = "rsa")]
        KeyFamily::Rsa => rsa_private_key(&jwk),

        #[cfg(feature = "ecdsa")]
        KeyFamily::Ecdsa => {
            let curve = ecdsa_curve(&jwk, algorithm)?;
            let d = jwk.required_coordinate("d")?;
            Key::ecdsa_signing(curve, &d)
        }

        #[allow(unreachable_patterns)]
        _ => Err(Error::AlgorithmUnsupported(algorithm.as_str().into())),
    }
}

/// Build a key able to verify `algorithm` signatures
///
/// - `oct`: `k`
/// - `RSA`: `n`, `e`
/// - `EC`: `crv`, `x`, `y`
pub fn materialize_verification_key(jwk: &Value, algorithm: Algorithm) -> Result<Key> {
    let jwk = Jwk::from_value(jwk)?;
    let family = family_of(algorithm)?;
    jwk.check_algorithm(algorithm, family)?;

    trace!(algorithm = algorithm.as_str(), kty = family.jwk_kty(), "materializing verification key");

    match family {
        KeyFamily::Symmetric => symmetric_key(&jwk),

        #[cfg(feature = "rsa")]
        KeyFamily::Rsa => {
            let n = jwk.required_coordinate("n")?;
            let e = jwk.required_coordinate("e")?;
            Key::rsa_public(&n, &e)
        }

        #[cfg(feature = "ecdsa")]
        KeyFamily::Ecdsa => {
            let curve = ecdsa_curve(&jwk, algorithm)?;
            let x = jwk.required_coordinate("x")?;
            let y = jwk.required_coordinate("y")?;
            Key::ecdsa_verifying(curve, &x, &y)
        }

        #[allow(unreachable_patterns)]
        _ => Err(Error::AlgorithmUnsupported(algorithm.as_str().into())),
    }
}

fn family_of(algorithm: Algorithm) -> Result<KeyFamily> {
    algorithm
        .family()
        .ok_or_else(|| Error::AlgorithmUnsupported(algorithm.as_str().into()))
}

fn symmetric_key(jwk: &Jwk<'_>) -> Result<Key> {
    let k = jwk.required_coordinate("k")?;
    Ok(Key::symmetric(k.as_slice()))
}

#[cfg(feature = "ecdsa")]
fn ecdsa_curve(jwk: &Jwk<'_>, algorithm: Algorithm) -> Result<crate::algorithm::EcdsaCurve> {
    let curve = crate::algorithm::EcdsaCurve::from_jwk_name(jwk.required_str("crv")?)?;

    match algorithm.curve() {
        Some(expected) if expected == curve => Ok(curve),
        Some(expected) => Err(Error::KeyCurveMismatch {
            algorithm: algorithm.as_str().into(),
            expected: expected.jwk_name().into(),
            found: curve.jwk_name().into(),
        }),
        None => Err(Error::AlgorithmUnsupported(algorithm.as_str().into())),
    }
}

#[cfg(feature = "rsa")]
fn rsa_private_key(jwk: &Jwk<'_>) -> Result<Key> {
    let n = jwk.required_coordinate("n")?;
    let e = jwk.required_coordinate("e")?;
    let d = jwk.required_coordinate("d")?;

    let primes = match (jwk.coordinate("p")?, jwk.coordinate("q")?) {
        (Some(p), Some(q)) => Some(RsaPrimes {
            p: p.to_vec(),
            q: q.to_vec(),
        }),
        (None, None) => None,
        _ => {
            warn!("JWK carries only one of p/q; recovering primes from n, e, d");
            None
        }
    };

    let crt = match (
        jwk.coordinate("dp")?,
        jwk.coordinate("dq")?,
        jwk.coordinate("qi")?,
    ) {
        (Some(dp), Some(dq), Some(qi)) => Some(RsaCrtComponents {
            dp: dp.to_vec(),
            dq: dq.to_vec(),
            qi: qi.to_vec(),
        }),
        (None, None, None) => None,
        _ => {
            warn!("JWK carries a partial dp/dq/qi set; ignoring CRT parameters");
            None
        }
    };

    if crt.is_some() && primes.is_none() {
        warn!("JWK carries CRT parameters without p and q; ignoring CRT parameters");
    }

    let components = RsaPrivateComponents {
        n: n.to_vec(),
        e: e.to_vec(),
        d: d.to_vec(),
        crt: if primes.is_some() { crt } else { None },
        primes,
    };

    Key::rsa_private(&components)
}
