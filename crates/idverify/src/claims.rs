//! Identity claims and their validation
//!
//! Claims are kept as an untyped JSON object. The fields the verifier
//! checks (`aud`, `iss`, `exp`, `hd`) have typed accessors; anything else a
//! provider sends is reachable through [`Claims::get`].

use crate::config::{TRUSTED_ISSUERS, VerifierConfig};
use crate::error::{Error, Result};
use miniserde::json::{Number, Object, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Claim set from a token payload
#[derive(Debug, Clone)]
pub struct Claims(Object);

impl Claims {
    /// Read claims from decoded payload bytes
    ///
    /// Returns `None` unless the payload is a UTF-8 JSON object.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let json = std::str::from_utf8(bytes).ok()?;
        match miniserde::json::from_str::<Value>(json).ok()? {
            Value::Object(object) => Some(Self(object)),
            _ => None,
        }
    }

    /// Raw claim value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Claim value if it is a JSON string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Claim value if it is an integral JSON number
    ///
    /// Floats are truncated toward negative infinity.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(Number::U64(n)) => i64::try_from(*n).ok(),
            Value::Number(Number::I64(n)) => Some(*n),
            Value::Number(Number::F64(n)) if n.is_finite() => Some(n.floor() as i64),
            _ => None,
        }
    }

    /// Audience (`aud`), only when it is a single string
    pub fn audience(&self) -> Option<&str> {
        self.get_str("aud")
    }

    /// Issuer (`iss`)
    pub fn issuer(&self) -> Option<&str> {
        self.get_str("iss")
    }

    /// Expiration time (`exp`) in seconds since the Unix epoch
    pub fn expiration(&self) -> Option<i64> {
        self.get_i64("exp")
    }

    /// Hosted domain (`hd`) of a Google Workspace account
    pub fn hosted_domain(&self) -> Option<&str> {
        self.get_str("hd")
    }

    /// Subject (`sub`), the stable account identifier
    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    pub fn email_verified(&self) -> Option<bool> {
        match self.get("email_verified")? {
            Value::Bool(verified) => Some(*verified),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn picture(&self) -> Option<&str> {
        self.get_str("picture")
    }

    /// Claim names present in the payload
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Serialize back to compact JSON
    pub fn to_json(&self) -> String {
        miniserde::json::to_string(&self.0)
    }
}

/// Validate claims against the current system time
pub fn validate_claims(claims: Option<&Claims>, config: &VerifierConfig) -> Result<()> {
    validate_claims_at(claims, config, unix_now())
}

/// Validate claims at a given time (seconds since the Unix epoch)
///
/// Checks run in a fixed order and stop at the first failure: presence,
/// audience, issuer, expiry, hosted domain. A token whose `exp` equals
/// `now` is still valid; a token without `exp` is expired.
pub fn validate_claims_at(claims: Option<&Claims>, config: &VerifierConfig, now: i64) -> Result<()> {
    let claims = claims.ok_or(Error::NoIdentity)?;

    let audience = claims.audience();
    if audience != Some(config.client_id.as_str()) {
        return Err(Error::AudienceMismatch {
            expected: config.client_id.clone(),
            found: audience.map(ToString::to_string),
        });
    }

    let issuer = claims.issuer();
    if !issuer.is_some_and(|iss| TRUSTED_ISSUERS.contains(&iss)) {
        return Err(Error::IssuerMismatch {
            found: issuer.map(ToString::to_string),
        });
    }

    let expiration = claims.expiration();
    if !expiration.is_some_and(|exp| exp >= now) {
        return Err(Error::TokenExpired {
            expired_at: expiration,
            now,
        });
    }

    let allowed = config.allowed_domains();
    if !allowed.is_empty() {
        let hosted_domain = claims.hosted_domain();
        let permitted = hosted_domain
            .map(str::to_lowercase)
            .is_some_and(|hd| allowed.contains(&hd));

        if !permitted {
            return Err(Error::DomainNotAllowed {
                found: hosted_domain.map(ToString::to_string),
            });
        }
    }

    Ok(())
}

/// Current time in seconds since the Unix epoch
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs() as i64
}
