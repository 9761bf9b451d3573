//! Signature verification stage

use crate::algorithm::{MessageDigest, verify_signature};
use crate::claims::Claims;
use crate::error::{Error, Result};
use crate::keys::KeyResolver;
use crate::keys::material::PublicKey;
use crate::token::ParsedToken;

/// Token whose signature checked out
///
/// `claims` is `None` when the signed payload is not a JSON object.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub key_id: String,
    pub algorithm: String,
    pub claims: Option<Claims>,
}

/// Check a parsed token's signature against the key its header names
pub(crate) async fn verify_parsed(
    parsed: &ParsedToken,
    resolver: &dyn KeyResolver,
    fallback: MessageDigest,
) -> Result<VerifiedToken> {
    let header = parsed.header();
    let (kid, alg) = header.require_kid_and_alg()?;

    let key_not_found = || Error::KeyNotFound {
        kid: kid.to_string(),
    };
    let pem = resolver
        .get_public_key(Some(kid))
        .await
        .ok_or_else(key_not_found)?;
    let key = PublicKey::from_pem(&pem).ok_or_else(key_not_found)?;

    let signature = parsed
        .signature_bytes()
        .map_err(|_| Error::SignatureInvalid)?;

    verify_signature(
        alg,
        fallback,
        &key,
        parsed.signing_input().as_bytes(),
        &signature,
    )?;

    Ok(VerifiedToken {
        key_id: kid.to_string(),
        algorithm: alg.to_string(),
        claims: Claims::from_bytes(parsed.payload_bytes()),
    })
}
