//! Shared fixtures for integration tests

#![allow(dead_code)]

use jwsign::utils::encode_bytes;
use serde_json::{json, Value};
#[cfg(feature = "rsa")]
use std::sync::OnceLock;

/// Route `tracing` output to the test harness (`RUST_LOG=jwsign=debug`)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn oct_jwk(secret: &[u8]) -> Value {
    json!({"kty": "oct", "k": encode_bytes(secret)})
}

/// Drop every private member from a JWK
pub fn public_only(jwk: &Value) -> Value {
    let mut public = jwk.clone();
    if let Some(members) = public.as_object_mut() {
        for name in ["d", "p", "q", "dp", "dq", "qi", "k"] {
            members.remove(name);
        }
    }
    public
}

/// A full RSA private JWK; generated once per test binary
#[cfg(feature = "rsa")]
pub fn rsa_jwk() -> Value {
    static JWK: OnceLock<Value> = OnceLock::new();
    JWK.get_or_init(generate_rsa_jwk).clone()
}

/// A second, unrelated RSA private JWK
#[cfg(feature = "rsa")]
pub fn other_rsa_jwk() -> Value {
    static JWK: OnceLock<Value> = OnceLock::new();
    JWK.get_or_init(generate_rsa_jwk).clone()
}

#[cfg(feature = "rsa")]
fn generate_rsa_jwk() -> Value {
    use rsa::traits::{PrivateKeyParts, PublicKeyParts};
    use rsa::RsaPrivateKey;

    let mut key = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
    key.precompute().unwrap();
    let b64 = |n: &rsa::BigUint| encode_bytes(n.to_bytes_be());

    json!({
        "kty": "RSA",
        "n": b64(key.n()),
        "e": b64(key.e()),
        "d": b64(key.d()),
        "p": b64(&key.primes()[0]),
        "q": b64(&key.primes()[1]),
        "dp": b64(key.dp().unwrap()),
        "dq": b64(key.dq().unwrap()),
        "qi": encode_bytes(key.qinv().unwrap().to_bytes_be().1),
    })
}

#[cfg(feature = "ecdsa")]
pub fn ec_jwk(crv: &str) -> Value {
    let (d, x, y) = match crv {
        "P-256" => {
            let sk = p256::ecdsa::SigningKey::random(&mut rand::thread_rng());
            let point = sk.verifying_key().to_encoded_point(false);
            (
                encode_bytes(sk.to_bytes()),
                encode_bytes(point.x().unwrap()),
                encode_bytes(point.y().unwrap()),
            )
        }
        "P-384" => {
            let sk = p384::ecdsa::SigningKey::random(&mut rand::thread_rng());
            let point = sk.verifying_key().to_encoded_point(false);
            (
                encode_bytes(sk.to_bytes()),
                encode_bytes(point.x().unwrap()),
                encode_bytes(point.y().unwrap()),
            )
        }
        "P-521" => {
            let sk = p521::ecdsa::SigningKey::random(&mut rand::thread_rng());
            let point = p521::ecdsa::VerifyingKey::from(&sk).to_encoded_point(false);
            (
                encode_bytes(sk.to_bytes()),
                encode_bytes(point.x().unwrap()),
                encode_bytes(point.y().unwrap()),
            )
        }
        other => panic!("unsupported test curve {other}"),
    };

    json!({"kty": "EC", "crv": crv, "d": d, "x": x, "y": y})
}
