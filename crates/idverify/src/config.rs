//! Per-call verification settings and provider constants

use std::time::Duration;

/// Google's certificate endpoint, a JSON object of key id to X.509 PEM
pub const GOOGLE_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v1/certs";

/// Issuers Google signs ID tokens as
pub const TRUSTED_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Default time-to-live for cached public keys
pub const DEFAULT_KEY_CACHE_TTL: Duration = Duration::from_secs(300);

/// Default number of public keys kept in a key cache
pub const DEFAULT_KEY_CACHE_CAPACITY: u64 = 64;

/// Settings snapshot for one verification
///
/// ```
/// use idverify::VerifierConfig;
///
/// let config = VerifierConfig::new("1234.apps.googleusercontent.com")
///     .whitelisted_domains("example.com, Other.org");
///
/// assert_eq!(config.allowed_domains(), vec!["example.com", "other.org"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// OAuth client ID the token must be issued for
    pub client_id: String,

    /// Comma-separated hosted domains; `None` or blank allows every domain
    pub whitelisted_domains: Option<String>,
}

impl VerifierConfig {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            whitelisted_domains: None,
        }
    }

    /// Restrict logins to these hosted domains
    pub fn whitelisted_domains(mut self, domains: impl Into<String>) -> Self {
        self.whitelisted_domains = Some(domains.into());
        self
    }

    /// Normalized allow-list: trimmed, lowercased, blanks dropped
    ///
    /// Empty means no restriction.
    pub fn allowed_domains(&self) -> Vec<String> {
        self.whitelisted_domains
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|domain| domain.trim().to_lowercase())
            .filter(|domain| !domain.is_empty())
            .collect()
    }
}
