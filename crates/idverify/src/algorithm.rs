//! Algorithm selection for signature verification
//!
//! The `alg` header only chooses a digest. The signature scheme comes from
//! the resolved key, and ECDSA signatures are the fixed-length `R || S`
//! encoding used by JWS (RFC 7518 §3.4), not ASN.1 DER.

use crate::error::{Error, Result};
use crate::keys::material::{Curve, KeyFamily, PublicKey};

use aws_lc_rs::signature::{self, UnparsedPublicKey, VerificationAlgorithm};

/// Message digest applied before signing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageDigest {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl MessageDigest {
    /// Digest for a known `alg` name
    ///
    /// `ES256` maps to SHA-512, which no P-256 verifier accepts, so `ES256`
    /// tokens never verify.
    pub fn for_algorithm(alg: &str) -> Option<Self> {
        match alg {
            "RS256" => Some(MessageDigest::Sha256),
            "RS384" => Some(MessageDigest::Sha384),
            "RS512" => Some(MessageDigest::Sha512),
            "ES384" => Some(MessageDigest::Sha384),
            "ES256" => Some(MessageDigest::Sha512),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            MessageDigest::Sha256 => "SHA-256",
            MessageDigest::Sha384 => "SHA-384",
            MessageDigest::Sha512 => "SHA-512",
        }
    }
}

impl std::fmt::Display for MessageDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an `alg` name agrees with the key family
fn family_matches(alg: &str, family: KeyFamily) -> bool {
    match family {
        KeyFamily::Rsa => !alg.starts_with("ES"),
        KeyFamily::Ec(_) => !alg.starts_with("RS"),
    }
}

/// Pick the verifier for a key family and digest
fn verification_algorithm(
    family: KeyFamily,
    digest: MessageDigest,
) -> Option<&'static dyn VerificationAlgorithm> {
    use MessageDigest::*;

    let algorithm: &'static dyn VerificationAlgorithm = match (family, digest) {
        (KeyFamily::Rsa, Sha256) => &signature::RSA_PKCS1_2048_8192_SHA256,
        (KeyFamily::Rsa, Sha384) => &signature::RSA_PKCS1_2048_8192_SHA384,
        (KeyFamily::Rsa, Sha512) => &signature::RSA_PKCS1_2048_8192_SHA512,
        (KeyFamily::Ec(Curve::P256), Sha256) => &signature::ECDSA_P256_SHA256_FIXED,
        (KeyFamily::Ec(Curve::P384), Sha384) => &signature::ECDSA_P384_SHA384_FIXED,
        (KeyFamily::Ec(Curve::P521), Sha256) => &signature::ECDSA_P521_SHA256_FIXED,
        (KeyFamily::Ec(Curve::P521), Sha384) => &signature::ECDSA_P521_SHA384_FIXED,
        (KeyFamily::Ec(Curve::P521), Sha512) => &signature::ECDSA_P521_SHA512_FIXED,
        _ => return None,
    };

    Some(algorithm)
}

/// Verify `signature` over `message`
///
/// Unknown `alg` names use `fallback` as the digest. Any outcome other than
/// an explicit success from the verifier is `SignatureInvalid`.
pub(crate) fn verify_signature(
    alg: &str,
    fallback: MessageDigest,
    key: &PublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    let digest = match MessageDigest::for_algorithm(alg) {
        Some(_) if !family_matches(alg, key.family) => return Err(Error::SignatureInvalid),
        Some(digest) => digest,
        None => fallback,
    };

    let algorithm = verification_algorithm(key.family, digest).ok_or(Error::SignatureInvalid)?;

    UnparsedPublicKey::new(algorithm, &key.der)
        .verify(message, signature)
        .map_err(|_| Error::SignatureInvalid)
}
