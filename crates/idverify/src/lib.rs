//! Verification of Google-issued OpenID Connect ID tokens.
//!
//! A raw compact token goes through three stages, each of which can reject
//! it with a typed [`Error`]:
//!
//! 1. structural parsing ([`parse`]),
//! 2. key lookup by `kid` and asymmetric signature verification,
//! 3. claim validation ([`validate_claims`]): audience, issuer, expiry and
//!    the optional hosted-domain allow-list.
//!
//! ```no_run
//! use idverify::{CachingKeyResolver, HttpKeyResolver, Verifier, VerifierConfig};
//!
//! # async fn login(credential: &str) -> idverify::Result<()> {
//! let verifier = Verifier::new()
//!     .resolver(CachingKeyResolver::new(HttpKeyResolver::google(
//!         reqwest::Client::new(),
//!     )))
//!     .build();
//!
//! let config = VerifierConfig::new("1234.apps.googleusercontent.com")
//!     .whitelisted_domains("example.com");
//!
//! let identity = verifier.verify_token(credential, &config).await?;
//! println!("signed in: {:?}", identity.email());
//! # Ok(())
//! # }
//! ```

mod error;
mod keys;

// Internal modules
pub(crate) mod algorithm;
pub(crate) mod claims;
pub(crate) mod config;
pub(crate) mod header;
pub(crate) mod identity;
pub(crate) mod limits;
pub(crate) mod observer;
pub(crate) mod signature;
pub(crate) mod token;
pub(crate) mod url;
pub(crate) mod utils {
    pub mod base64url;
    pub(crate) mod bounds;
}
pub(crate) mod validator;

// Public Interface
pub use algorithm::MessageDigest;
pub use claims::{Claims, validate_claims, validate_claims_at};
pub use config::{
    DEFAULT_KEY_CACHE_CAPACITY, DEFAULT_KEY_CACHE_TTL, GOOGLE_CERTS_URL, TRUSTED_ISSUERS,
    VerifierConfig,
};
pub use error::{Error, Result};
pub use header::Header;
pub use identity::Identity;
pub use keys::caching::CachingKeyResolver;
pub use keys::http::HttpKeyResolver;
pub use keys::{BoxFuture, KeyResolver, PublicKeySet, StaticKeyResolver};
pub use observer::{FailureObserver, TracingObserver};
pub use signature::VerifiedToken;
pub use token::{ParsedToken, parse};
pub use utils::base64url;
pub use validator::Verifier;

/// Raw claim values, as returned by [`Claims::get`]
pub use miniserde::json::Value as ClaimValue;
