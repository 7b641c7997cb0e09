mod traits;

pub mod hmac;

#[cfg(feature = "rsa")]
pub mod rsa;

#[cfg(feature = "ecdsa")]
pub mod ecdsa;

pub use traits::{get_engine, SignatureAlgorithm, SignatureEngine};

use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;
use crate::utils::HashBuffer;

use sha2::{Digest, Sha256, Sha384, Sha512};

/// Signature algorithm named by the `alg` header field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Unsigned token
    #[default]
    None,

    /// HMAC with SHA-256
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,

    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,

    /// ECDSA with P-256 and SHA-256
    ES256,
    /// ECDSA with P-384 and SHA-384
    ES384,
    /// ECDSA with P-521 and SHA-512
    ES512,
}

/// Key family an algorithm signs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    /// Shared secret (JWK `kty` "oct")
    Symmetric,
    /// RSA key pair (JWK `kty` "RSA")
    Rsa,
    /// Elliptic-curve key pair (JWK `kty` "EC")
    Ecdsa,
}

impl KeyFamily {
    /// JWK `kty` value for this family
    pub const fn jwk_kty(&self) -> &'static str {
        match self {
            KeyFamily::Symmetric => "oct",
            KeyFamily::Rsa => "RSA",
            KeyFamily::Ecdsa => "EC",
        }
    }
}

/// Hash strength of an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Hash `data`
    pub fn digest(&self, data: &[u8]) -> Result<HashBuffer> {
        match self {
            HashAlgorithm::Sha256 => HashBuffer::try_from_slice(&Sha256::digest(data)),
            HashAlgorithm::Sha384 => HashBuffer::try_from_slice(&Sha384::digest(data)),
            HashAlgorithm::Sha512 => HashBuffer::try_from_slice(&Sha512::digest(data)),
        }
    }
}

/// NIST curves usable with ECDSA
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcdsaCurve {
    /// P-256 (secp256r1)
    P256,
    /// P-384 (secp384r1)
    P384,
    /// P-521 (secp521r1)
    P521,
}

impl EcdsaCurve {
    /// Parse the JWK `crv` member
    pub fn from_jwk_name(crv: &str) -> Result<Self> {
        match crv {
            "P-256" => Ok(EcdsaCurve::P256),
            "P-384" => Ok(EcdsaCurve::P384),
            "P-521" => Ok(EcdsaCurve::P521),
            _ => Err(Error::KeyCurveUnsupported(crv.into())),
        }
    }

    /// JWK `crv` member for this curve
    pub const fn jwk_name(&self) -> &'static str {
        match self {
            EcdsaCurve::P256 => "P-256",
            EcdsaCurve::P384 => "P-384",
            EcdsaCurve::P521 => "P-521",
        }
    }

    /// Size in bytes of a scalar or affine coordinate
    pub const fn field_size(&self) -> usize {
        match self {
            EcdsaCurve::P256 => 32,
            EcdsaCurve::P384 => 48,
            EcdsaCurve::P521 => 66,
        }
    }
}

impl std::fmt::Display for EcdsaCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.jwk_name())
    }
}

/// Static description of a signing algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub algorithm: Algorithm,
    pub family: KeyFamily,
    pub hash: HashAlgorithm,
    /// Curve implied by the algorithm (ECDSA only)
    pub curve: Option<EcdsaCurve>,
}

const fn entry(
    algorithm: Algorithm,
    family: KeyFamily,
    hash: HashAlgorithm,
    curve: Option<EcdsaCurve>,
) -> AlgorithmInfo {
    AlgorithmInfo {
        algorithm,
        family,
        hash,
        curve,
    }
}

/// Every signing algorithm, its key family and hash strength
static ALGORITHM_TABLE: [AlgorithmInfo; 9] = [
    entry(Algorithm::HS256, KeyFamily::Symmetric, HashAlgorithm::Sha256, None),
    entry(Algorithm::HS384, KeyFamily::Symmetric, HashAlgorithm::Sha384, None),
    entry(Algorithm::HS512, KeyFamily::Symmetric, HashAlgorithm::Sha512, None),
    entry(Algorithm::RS256, KeyFamily::Rsa, HashAlgorithm::Sha256, None),
    entry(Algorithm::RS384, KeyFamily::Rsa, HashAlgorithm::Sha384, None),
    entry(Algorithm::RS512, KeyFamily::Rsa, HashAlgorithm::Sha512, None),
    entry(
        Algorithm::ES256,
        KeyFamily::Ecdsa,
        HashAlgorithm::Sha256,
        Some(EcdsaCurve::P256),
    ),
    entry(
        Algorithm::ES384,
        KeyFamily::Ecdsa,
        HashAlgorithm::Sha384,
        Some(EcdsaCurve::P384),
    ),
    entry(
        Algorithm::ES512,
        KeyFamily::Ecdsa,
        HashAlgorithm::Sha512,
        Some(EcdsaCurve::P521),
    ),
];

impl Algorithm {
    /// All algorithms, `None` first
    pub const ALL: [Algorithm; 10] = [
        Algorithm::None,
        Algorithm::HS256,
        Algorithm::HS384,
        Algorithm::HS512,
        Algorithm::RS256,
        Algorithm::RS384,
        Algorithm::RS512,
        Algorithm::ES256,
        Algorithm::ES384,
        Algorithm::ES512,
    ];

    /// Parse algorithm string from JWT header
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        if s.len() > MAX_ALG_LENGTH {
            return Err(Error::AlgorithmUnsupported(format!(
                "Algorithm string too long: {} bytes (maximum: {} bytes)",
                s.len(),
                MAX_ALG_LENGTH
            )));
        }

        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| Error::AlgorithmUnsupported(s.into()))
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::None => "none",
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
            Algorithm::ES512 => "ES512",
        }
    }

    /// Table entry for a signing algorithm, `None` for [`Algorithm::None`]
    pub fn info(&self) -> Option<&'static AlgorithmInfo> {
        ALGORITHM_TABLE.iter().find(|e| e.algorithm == *self)
    }

    /// Key family, `None` for an unsigned token
    pub fn family(&self) -> Option<KeyFamily> {
        self.info().map(|s| s.family)
    }

    /// Hash strength, `None` for an unsigned token
    pub fn hash(&self) -> Option<HashAlgorithm> {
        self.info().map(|s| s.hash)
    }

    /// Curve implied by an ECDSA algorithm
    pub fn curve(&self) -> Option<EcdsaCurve> {
        self.info().and_then(|s| s.curve)
    }

    /// Whether this algorithm produces a signature
    pub fn is_signing(&self) -> bool {
        *self != Algorithm::None
    }

    /// Check if algorithm is HMAC-based (symmetric)
    pub fn is_symmetric(&self) -> bool {
        self.family() == Some(KeyFamily::Symmetric)
    }
}

impl std::str::FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::from_str(s)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
