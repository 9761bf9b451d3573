use crate::error::{Error, Result};
use crate::limits::{MAX_ALG_LENGTH, MAX_KID_LENGTH};
use crate::utils::bounds::validate_field_size;
use miniserde::json::{Object, Value};

/// Default `typ` when the header omits it
const DEFAULT_TOKEN_TYPE: &str = "JWT";

/// Token header
///
/// A header that is not a JSON object reads as one with every field absent.
/// Each field is read on its own: a field that is not a JSON string is
/// treated as absent without affecting the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Key ID used to look up the signing key
    pub key_id: Option<String>,

    /// Signing algorithm name, e.g. `RS256`
    pub algorithm: Option<String>,

    /// Token type, `JWT` unless the header says otherwise
    pub token_type: String,
}

impl Header {
    /// Read a header from its decoded JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let object = std::str::from_utf8(bytes)
            .ok()
            .and_then(|json| miniserde::json::from_str::<Value>(json).ok())
            .and_then(|value| match value {
                Value::Object(object) => Some(object),
                _ => None,
            })
            .unwrap_or_else(Object::new);

        Self {
            key_id: string_field(&object, "kid"),
            algorithm: string_field(&object, "alg"),
            token_type: string_field(&object, "typ")
                .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
        }
    }

    /// Key ID and algorithm, both required to go any further
    ///
    /// Empty strings count as missing.
    pub(crate) fn require_kid_and_alg(&self) -> Result<(&str, &str)> {
        let kid = self.key_id.as_deref().filter(|s| !s.is_empty());
        let alg = self.algorithm.as_deref().filter(|s| !s.is_empty());

        match (kid, alg) {
            (Some(kid), Some(alg)) => {
                validate_field_size("kid", kid, MAX_KID_LENGTH)?;
                validate_field_size("alg", alg, MAX_ALG_LENGTH)?;
                Ok((kid, alg))
            }
            (kid, alg) => Err(Error::MissingHeaderFields {
                kid: kid.is_none(),
                alg: alg.is_none(),
            }),
        }
    }
}

fn string_field(object: &Object, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
