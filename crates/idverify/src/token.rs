//! Compact serialization parsing
//!
//! A [`ParsedToken`] only exists for input that had exactly three
//! dot-separated segments whose header and payload decoded to non-empty
//! bytes. Nothing here looks at what those bytes mean.

use crate::error::{Error, Result};
use crate::header::Header;
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_SIGNATURE_B64_SIZE, MAX_TOKEN_LENGTH,
};
use crate::utils::base64url;

/// Structurally valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedToken {
    header_b64: String,
    payload_b64: String,
    signature_b64: String,
    header: Vec<u8>,
    payload: Vec<u8>,
}

/// Split and decode a raw compact token
pub fn parse(raw: &str) -> Result<ParsedToken> {
    if raw.is_empty() {
        return Err(Error::MalformedToken("token is empty".into()));
    }

    if raw.len() > MAX_TOKEN_LENGTH {
        return Err(Error::MalformedToken(format!(
            "token too large: {} bytes (maximum: {MAX_TOKEN_LENGTH} bytes)",
            raw.len()
        )));
    }

    let segments: Vec<&str> = raw.split('.').collect();
    let [header_b64, payload_b64, signature_b64] = segments[..] else {
        return Err(Error::MalformedToken(format!(
            "expected 3 segments separated by '.', found {}",
            segments.len()
        )));
    };

    if signature_b64.len() > MAX_SIGNATURE_B64_SIZE {
        return Err(Error::MalformedToken(format!(
            "signature segment too large: {} bytes (maximum: {MAX_SIGNATURE_B64_SIZE} bytes)",
            signature_b64.len()
        )));
    }

    let header = decode_required("header", header_b64, MAX_DECODED_HEADER_SIZE)?;
    let payload = decode_required("payload", payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;

    Ok(ParsedToken {
        header_b64: header_b64.to_string(),
        payload_b64: payload_b64.to_string(),
        signature_b64: signature_b64.to_string(),
        header,
        payload,
    })
}

fn decode_required(segment: &str, input: &str, max_size: usize) -> Result<Vec<u8>> {
    let bytes = base64url::decode_limited(input, max_size)
        .map_err(|e| match e {
            Error::MalformedToken(msg) => Error::MalformedToken(format!("{segment}: {msg}")),
            other => other,
        })?;

    if bytes.is_empty() {
        return Err(Error::MalformedToken(format!("{segment} segment is empty")));
    }

    Ok(bytes)
}

impl ParsedToken {
    /// Decoded header bytes
    pub fn header_bytes(&self) -> &[u8] {
        &self.header
    }

    /// Decoded payload bytes
    pub fn payload_bytes(&self) -> &[u8] {
        &self.payload
    }

    /// Header segment as it appeared in the token
    pub fn header_segment(&self) -> &str {
        &self.header_b64
    }

    /// Payload segment as it appeared in the token
    pub fn payload_segment(&self) -> &str {
        &self.payload_b64
    }

    /// Signature segment, still Base64URL-encoded
    pub fn signature_segment(&self) -> &str {
        &self.signature_b64
    }

    /// Header view
    pub fn header(&self) -> Header {
        Header::from_bytes(&self.header)
    }

    /// Message the signature covers
    ///
    /// Built by re-encoding the decoded header and payload, so a segment that
    /// only decodes leniently does not verify against its original encoding.
    pub fn signing_input(&self) -> String {
        format!(
            "{}.{}",
            base64url::encode(&self.header),
            base64url::encode(&self.payload)
        )
    }

    /// Decode the signature segment
    pub(crate) fn signature_bytes(&self) -> Result<Vec<u8>> {
        base64url::decode_limited(&self.signature_b64, MAX_DECODED_SIGNATURE_SIZE)
    }
}
