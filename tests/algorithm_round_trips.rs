//! Per-algorithm round-trip tests
//!
//! Each supported algorithm must:
//! 1. Sign a token built through the public API
//! 2. Survive export and import with header, claims and signature intact
//! 3. Verify under the matching public key and fail under an unrelated one

mod common;

use jwsign::*;
use serde_json::{json, Value};

fn build_token() -> Token {
    let mut token = Token::new(None);
    token.set_claim_string("iss", "https://example.com");
    token.set_claim_string("sub", "test-user");
    token.set_claim_number("exp", 1_700_003_600.0).unwrap();
    token.set_claim_number("iat", 1_700_000_000.0).unwrap();
    token.set_claim_value("roles", json!(["admin", "ops"]));
    token
}

/// Sign with `signing`, round-trip, verify with `verifying`, reject with `other`
fn round_trip(alg: Algorithm, signing: &Value, verifying: &Value, other: &Value) {
    common::init_tracing();

    let mut token = build_token();
    token.sign(alg, signing).expect("sign failed");
    assert_eq!(token.algorithm(), alg);
    assert!(!token.signature().is_empty());

    let text = token.export(true).unwrap();
    let imported = Token::import(&text).expect("import failed");

    assert_eq!(imported.algorithm(), alg);
    assert_eq!(imported.signature(), token.signature());
    assert_eq!(imported.header(), token.header());
    assert_eq!(imported.claims(), token.claims());
    assert_eq!(imported.header().get("alg"), Some(&json!(alg.as_str())));
    assert_eq!(imported.token_type(), Some("JWT"));
    assert_eq!(imported.claim_string("sub"), Some("test-user"));
    assert_eq!(imported.claim_number("exp"), Some(1_700_003_600.0));
    assert_eq!(imported.claim_type("roles"), ClaimType::Array);

    assert!(imported.has_valid_signature(verifying), "{alg} should verify");
    assert!(!imported.has_valid_signature(other), "{alg} must reject other key");

    // Re-exporting the import is byte-identical
    assert_eq!(imported.export(true).unwrap(), text);
}

// ============================================================================
// HMAC Algorithm Round-Trips (HS256, HS384, HS512)
// ============================================================================

mod hmac_tests {
    use super::*;

    #[test]
    fn test_round_trip_hs256() {
        let jwk = common::oct_jwk(b"test-secret-hs256-key");
        round_trip(Algorithm::HS256, &jwk, &jwk, &common::oct_jwk(b"other"));
    }

    #[test]
    fn test_round_trip_hs384() {
        let jwk = common::oct_jwk(b"test-secret-hs384-key-needs-to-be-longer");
        round_trip(Algorithm::HS384, &jwk, &jwk, &common::oct_jwk(b"other"));
    }

    #[test]
    fn test_round_trip_hs512() {
        let jwk = common::oct_jwk(b"test-secret-hs512-key-needs-to-be-even-longer-than-384");
        round_trip(Algorithm::HS512, &jwk, &jwk, &common::oct_jwk(b"other"));
    }

    #[test]
    fn test_signature_sizes() {
        let jwk = common::oct_jwk(b"secret");
        for (alg, len) in [
            (Algorithm::HS256, 32),
            (Algorithm::HS384, 48),
            (Algorithm::HS512, 64),
        ] {
            let mut token = Token::new(None);
            token.sign(alg, &jwk).unwrap();
            assert_eq!(token.signature().len(), len, "{alg}");
        }
    }
}

// ============================================================================
// RSA Algorithm Round-Trips (RS256, RS384, RS512)
// ============================================================================

#[cfg(feature = "rsa")]
mod rsa_tests {
    use super::*;

    fn check(alg: Algorithm) {
        let private = common::rsa_jwk();
        let public = common::public_only(&private);
        let other = common::public_only(&common::other_rsa_jwk());
        round_trip(alg, &private, &public, &other);
    }

    #[test]
    fn test_round_trip_rs256() {
        check(Algorithm::RS256);
    }

    #[test]
    fn test_round_trip_rs384() {
        check(Algorithm::RS384);
    }

    #[test]
    fn test_round_trip_rs512() {
        check(Algorithm::RS512);
    }

    #[test]
    fn test_signature_is_modulus_sized() {
        let mut token = Token::new(None);
        token.sign(Algorithm::RS256, &common::rsa_jwk()).unwrap();
        assert_eq!(token.signature().len(), 256);
    }

    #[test]
    fn test_private_key_without_primes() {
        let mut jwk = common::rsa_jwk();
        let members = jwk.as_object_mut().unwrap();
        for name in ["p", "q", "dp", "dq", "qi"] {
            members.remove(name);
        }

        let mut token = build_token();
        token.sign(Algorithm::RS256, &jwk).unwrap();
        assert!(token.has_valid_signature(&common::public_only(&common::rsa_jwk())));
    }
}

// ============================================================================
// ECDSA Algorithm Round-Trips (ES256, ES384, ES512)
// ============================================================================

#[cfg(feature = "ecdsa")]
mod ecdsa_tests {
    use super::*;

    fn check(alg: Algorithm, crv: &str) {
        let private = common::ec_jwk(crv);
        let public = common::public_only(&private);
        let other = common::public_only(&common::ec_jwk(crv));
        round_trip(alg, &private, &public, &other);
    }

    #[test]
    fn test_round_trip_es256() {
        check(Algorithm::ES256, "P-256");
    }

    #[test]
    fn test_round_trip_es384() {
        check(Algorithm::ES384, "P-384");
    }

    #[test]
    fn test_round_trip_es512() {
        check(Algorithm::ES512, "P-521");
    }

    #[test]
    fn test_signatures_are_fixed_width() {
        for (alg, crv, len) in [
            (Algorithm::ES256, "P-256", 64),
            (Algorithm::ES384, "P-384", 96),
            (Algorithm::ES512, "P-521", 132),
        ] {
            let mut token = Token::new(None);
            token.sign(alg, &common::ec_jwk(crv)).unwrap();
            assert_eq!(token.signature().len(), len, "{alg}");
        }
    }

    #[test]
    fn test_curve_must_match_algorithm() {
        let mut token = Token::new(None);
        let err = token
            .sign(Algorithm::ES384, &common::ec_jwk("P-256"))
            .unwrap_err();
        assert!(matches!(err, Error::KeyCurveMismatch { .. }));
        assert_eq!(err.category(), ErrorCategory::KeyMaterial);

        token.sign(Algorithm::ES256, &common::ec_jwk("P-256")).unwrap();
        assert!(!token.has_valid_signature(&common::public_only(&common::ec_jwk("P-384"))));
    }
}
