//! URL validation for the certificate endpoint

use crate::error::{Error, Result};
use crate::limits::MAX_CERTS_URL_LENGTH;

/// Validate the certificate endpoint URL format and size
pub(crate) fn validate_certs_url(url: &str) -> Result<::url::Url> {
    if url.trim().is_empty() {
        return Err(Error::ConfigurationInvalid(
            "certificate URL cannot be empty".into(),
        ));
    }

    if url.len() > MAX_CERTS_URL_LENGTH {
        return Err(Error::ConfigurationInvalid(format!(
            "certificate URL too long: {} characters (maximum: {MAX_CERTS_URL_LENGTH})",
            url.len()
        )));
    }

    let parsed = url
        .parse::<::url::Url>()
        .map_err(|e| Error::ConfigurationInvalid(format!("invalid certificate URL: {e}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::ConfigurationInvalid(
            "certificate URL must use http or https scheme".into(),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(Error::ConfigurationInvalid(
            "certificate URL must have a valid host".into(),
        ));
    }

    Ok(parsed)
}
