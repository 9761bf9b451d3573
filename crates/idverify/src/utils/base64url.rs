//! Base64URL encoding/decoding per RFC 4648 §5
//!
//! Encoding always produces the unpadded URL-safe form used in compact JWTs.
//! Decoding is lenient in the same way identity providers' own libraries are:
//! both alphabets, optional `=` padding and non-zero trailing bits in the
//! last symbol are accepted.

use crate::error::{Error, Result};
use base64::{
    Engine, alphabet,
    engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD},
    engine::DecodePaddingMode,
};

/// Standard alphabet, padding optional, trailing bits ignored
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encode bytes as unpadded Base64URL
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode a Base64URL string
///
/// `-` and `_` are mapped back to `+` and `/` before decoding with the
/// standard alphabet, so standard base64 input is accepted as well.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let standard: String = input
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();

    STANDARD_LENIENT
        .decode(standard)
        .map_err(|e| Error::MalformedToken(format!("Base64URL decode failed: {e}")))
}

/// Decode with a maximum decoded size
pub(crate) fn decode_limited(input: &str, max_size: usize) -> Result<Vec<u8>> {
    // 4 input chars never decode to more than 3 bytes
    if input.len() / 4 * 3 > max_size + 3 {
        return Err(Error::MalformedToken(format!(
            "Encoded segment too large: {} bytes (max decoded: {max_size})",
            input.len()
        )));
    }

    let result = decode(input)?;
    if result.len() > max_size {
        return Err(Error::MalformedToken(format!(
            "Decoded size exceeds limit: {} bytes (max: {max_size})",
            result.len()
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_url_safe_and_unpadded() {
        // 0xfb 0xff encodes to "+/8=" in standard base64
        assert_eq!(encode([0xfb, 0xff]), "-_8");
        assert_eq!(encode(b"Hello"), "SGVsbG8");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn test_decode_valid() {
        assert_eq!(decode("SGVsbG8").unwrap(), b"Hello");
        assert_eq!(decode("-_8").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_decode_accepts_padding_and_standard_alphabet() {
        assert_eq!(decode("SGVsbG8=").unwrap(), b"Hello");
        assert_eq!(decode("+/8=").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_decode_ignores_trailing_bits() {
        // "e30" is the canonical form of "{}"
        assert_eq!(decode("e31").unwrap(), b"{}");
        assert_eq!(encode(decode("e31").unwrap()), "e30");
    }

    #[test]
    fn test_decode_invalid() {
        assert!(matches!(decode("!!!"), Err(Error::MalformedToken(_))));
        assert!(decode("SGVs bG8").is_err());
        assert!(decode("S").is_err());
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_round_trip_all_lengths() {
        let data: Vec<u8> = (0..=255u8).collect();
        for len in 0..data.len() {
            let slice = &data[..len];
            assert_eq!(decode(&encode(slice)).unwrap(), slice);
        }
    }

    #[test]
    fn test_decode_with_limit() {
        assert_eq!(decode_limited("SGVsbG8", 10).unwrap(), b"Hello");
        assert!(decode_limited("SGVsbG8", 3).is_err());
        assert!(decode_limited(&"A".repeat(4096), 16).is_err());
    }
}
