//! # jwsign - JSON Web Token objects
//!
//! > Build, sign, serialize, parse and verify JSON Web Tokens.
//!
//! **jwsign** models a token as one mutable object: a header, a claims set, the
//! signing algorithm and the raw signature. Tokens are exchanged in the JWS
//! compact serialization and signed with keys described by JSON Web Keys (JWK).
//!
//! ## Quick Start
//!
//! ```
//! use jwsign::{Algorithm, Token};
//! use serde_json::json;
//!
//! let jwk = json!({"kty": "oct", "k": "c2VjcmV0"});
//!
//! let mut token = Token::new(None);
//! token.set_claim_string("sub", "alice");
//! token.set_claim_number("exp", 1_700_000_000.0)?;
//! token.sign(Algorithm::HS256, &jwk)?;
//!
//! let text = token.export(true)?;
//! let received = Token::import(&text)?;
//! assert!(received.has_valid_signature(&jwk));
//! assert_eq!(received.claim_string("sub"), Some("alice"));
//! # Ok::<(), jwsign::Error>(())
//! ```
//!
//! ## Token Lifecycle
//!
//! ```text
//! Token::new(typ)           Token::import(text)
//!     │ set_claim_*()            │ header, claims, alg, signature
//!     ▼                          ▼
//! Token::sign(alg, jwk)     Token::has_valid_signature(jwk)
//!     │
//!     ▼
//! Token::export(true) ──────────► "header.claims.signature"
//! ```
//!
//! The algorithm is `none` exactly when the signature is empty. Importing a
//! token that breaks this rule fails; signing is the only way to set both.
//!
//! ## Algorithm Support
//!
//! - **HMAC** (always enabled): HS256, HS384, HS512
//! - **RSA** (with `rsa` feature): RS256, RS384, RS512
//! - **ECDSA** (with `ecdsa` feature): ES256 (P-256), ES384 (P-384), ES512 (P-521)
//!
//! ## Keys
//!
//! Each sign or verify call takes one JWK document and builds a key for it:
//!
//! - `oct`: `k`
//! - `RSA`: `n`, `e` to verify; additionally `d` (and optionally `p`, `q`,
//!   `dp`, `dq`, `qi`) to sign
//! - `EC`: `crv`, `x`, `y` to verify; `crv`, `d` to sign
//!
//! A key whose type or curve does not fit the algorithm is rejected; there is
//! no fallback to another algorithm.
//!
//! ## Features
//!
//! - **`rsa`** (default): RSA algorithms via the [`rsa`](https://crates.io/crates/rsa) crate
//! - **`ecdsa`** (default): ECDSA algorithms via `p256`, `p384` and `p521`
//!
//! ## Diagnostics
//!
//! Verification only ever answers `true` or `false`. The reason for a `false`
//! is emitted through [`tracing`] at debug level; signature and key bytes are
//! never logged.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515): JSON Web Signature (JWS)
//! - [RFC 7517](https://datatracker.ietf.org/doc/html/rfc7517): JSON Web Key (JWK)
//! - [RFC 7518](https://datatracker.ietf.org/doc/html/rfc7518): JSON Web Algorithms (JWA)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519): JSON Web Token (JWT)

// Core modules
pub mod error;
mod limits;
pub mod utils;

// Algorithm system
pub mod algorithm;
pub mod engine;
pub mod keys;

// Key documents
pub mod jwk;

// Serialization and the token aggregate
pub mod compact;
pub mod token;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use algorithm::{Algorithm, EcdsaCurve, HashAlgorithm, KeyFamily};
pub use error::{Error, ErrorCategory, Result};
pub use jwk::{materialize_signing_key, materialize_verification_key, Jwk};
pub use keys::Key;
pub use token::{ClaimType, Token};
