use crate::claims::Claims;
use std::ops::Deref;

/// Verified identity
///
/// Built only from a token whose signature and claims both passed. Claim
/// accessors are available directly through `Deref<Target = Claims>`.
#[derive(Debug, Clone)]
pub struct Identity {
    claims: Claims,
    key_id: String,
    algorithm: String,
}

impl Identity {
    pub(crate) fn new(claims: Claims, key_id: String, algorithm: String) -> Self {
        Self {
            claims,
            key_id,
            algorithm,
        }
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn into_claims(self) -> Claims {
        self.claims
    }

    /// Key id the signature was verified with
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// `alg` header value of the token
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }
}

impl Deref for Identity {
    type Target = Claims;

    fn deref(&self) -> &Claims {
        &self.claims
    }
}
