//! Errors for idverify

use thiserror::Error;

/// Verification failures
///
/// Every variant is terminal: nothing in the crate retries after producing one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Structural Errors
    // ============================================================================
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token header is missing required fields (kid missing: {kid}, alg missing: {alg})")]
    MissingHeaderFields { kid: bool, alg: bool },

    // ============================================================================
    // Key and Signature Errors
    // ============================================================================
    #[error("No usable public key found for kid '{kid}'")]
    KeyNotFound { kid: String },

    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Token payload carries no identity claims")]
    NoIdentity,

    #[error("Token audience mismatch: expected '{expected}', found {found:?}")]
    AudienceMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("Token issuer not trusted: found {found:?}")]
    IssuerMismatch { found: Option<String> },

    #[error("Token expired at {expired_at:?} (now: {now})")]
    TokenExpired { expired_at: Option<i64>, now: i64 },

    #[error("Hosted domain not allowed: found {found:?}")]
    DomainNotAllowed { found: Option<String> },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),
}

impl Error {
    /// Stable tag for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MalformedToken(_) => "malformed_token",
            Error::MissingHeaderFields { .. } => "missing_header_fields",
            Error::KeyNotFound { .. } => "key_not_found",
            Error::SignatureInvalid => "signature_invalid",
            Error::NoIdentity => "no_identity",
            Error::AudienceMismatch { .. } => "audience_mismatch",
            Error::IssuerMismatch { .. } => "issuer_mismatch",
            Error::TokenExpired { .. } => "token_expired",
            Error::DomainNotAllowed { .. } => "domain_not_allowed",
            Error::ConfigurationInvalid(_) => "configuration_invalid",
        }
    }

    /// Message suitable for showing to the person trying to log in
    ///
    /// Deliberately vague about internals. Callers choose the response status.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::MalformedToken(_) | Error::MissingHeaderFields { .. } => {
                "ID token is invalid"
            }
            Error::KeyNotFound { .. } | Error::SignatureInvalid => {
                "Cannot verify the ID token signature. Please try again."
            }
            Error::NoIdentity => "No user present to validate",
            Error::AudienceMismatch { .. } => "Invalid data found for authentication",
            Error::IssuerMismatch { .. } => "Invalid source found for authentication",
            Error::TokenExpired { .. } => "User data is stale! Please try again.",
            Error::DomainNotAllowed { .. } => "Cannot login with this email.",
            Error::ConfigurationInvalid(_) => "Login is not configured correctly",
        }
    }
}

/// Result type alias for idverify operations
pub type Result<T> = std::result::Result<T, Error>;
