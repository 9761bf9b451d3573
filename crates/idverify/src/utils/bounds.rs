//! Bounds validation utilities

use crate::error::{Error, Result};
use crate::limits::MAX_KID_LENGTH;

/// Validate header string field size
pub(crate) fn validate_field_size(field: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(Error::MalformedToken(format!(
            "Header field '{field}' too long: {} bytes (maximum: {max} bytes)",
            value.len()
        )));
    }
    Ok(())
}

/// Check if a key id is short enough to be used as a cache key
pub(crate) fn is_valid_cache_key(kid: &str) -> bool {
    !kid.is_empty() && kid.len() <= MAX_KID_LENGTH
}
