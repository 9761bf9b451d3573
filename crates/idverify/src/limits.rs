//! Size limit constants for input validation

/// Maximum length for a raw token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum length for the certificate endpoint URL (2048 characters)
pub(crate) const MAX_CERTS_URL_LENGTH: usize = 2048;

/// Maximum size for the certificate endpoint response (512KB)
pub(crate) const MAX_CERTS_RESPONSE_SIZE: usize = 512 * 1024;

// ============================================================================
// Decoded segment size limits
// ============================================================================

/// Maximum size for decoded header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA-8192 signatures are 1024 bytes
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Maximum size for the Base64URL-encoded signature segment (1.5KB)
pub(crate) const MAX_SIGNATURE_B64_SIZE: usize = 1536;

// ============================================================================
// Header field size limits
// ============================================================================

/// Maximum length for the `alg` header field (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

/// Maximum length for the `kid` header field (256 bytes)
pub(crate) const MAX_KID_LENGTH: usize = 256;
