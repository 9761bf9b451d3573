use crate::algorithm::MessageDigest;
use crate::claims::{unix_now, validate_claims_at};
use crate::config::VerifierConfig;
use crate::error::{Error, Result};
use crate::identity::Identity;
use crate::keys::KeyResolver;
use crate::keys::http::HttpKeyResolver;
use crate::observer::{FailureObserver, TracingObserver};
use crate::signature::{VerifiedToken, verify_parsed};
use crate::token::{ParsedToken, parse};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// ID token verifier
///
/// Configured once and reused. Clones share the resolver and observer.
/// Settings that vary per request (client id, domain allow-list) are passed
/// to each [`verify_token`](Self::verify_token) call instead.
#[derive(Clone)]
pub struct Verifier {
    config_resolver: Option<Arc<dyn KeyResolver>>,
    config_observer: Arc<dyn FailureObserver>,
    config_fallback: MessageDigest,
}

impl Verifier {
    /// Verifier against Google's certificate endpoint
    ///
    /// Unless [`resolver`](Self::resolver) is configured, keys are fetched
    /// on every call through one process-wide [`HttpKeyResolver`], created
    /// on first use. Failures are logged through `tracing` and unknown
    /// algorithms are treated as SHA-256.
    pub fn new() -> Self {
        Self {
            config_resolver: None,
            config_observer: Arc::new(TracingObserver),
            config_fallback: MessageDigest::default(),
        }
    }

    /// Configure where public keys come from
    pub fn resolver<R>(&mut self, resolver: R) -> &mut Self
    where
        R: KeyResolver + 'static,
    {
        self.config_resolver = Some(Arc::new(resolver));
        self
    }

    /// Configure who hears about failures
    pub fn observer<O>(&mut self, observer: O) -> &mut Self
    where
        O: FailureObserver + 'static,
    {
        self.config_observer = Arc::new(observer);
        self
    }

    /// Configure the digest used for unrecognized `alg` values
    pub fn fallback_digest(&mut self, digest: MessageDigest) -> &mut Self {
        self.config_fallback = digest;
        self
    }

    pub fn build(&mut self) -> Self {
        self.clone()
    }
}

impl Verifier {
    /// Verify a raw token and return the identity it asserts
    ///
    /// Parsing, signature verification and claim validation run strictly in
    /// that order. The first failure is returned unchanged and reported to
    /// the observer.
    pub async fn verify_token(&self, raw: &str, config: &VerifierConfig) -> Result<Identity> {
        self.observe(self.run(raw, config, None).await)
    }

    /// Like [`verify_token`](Self::verify_token), with a fixed current time
    pub async fn verify_token_at(
        &self,
        raw: &str,
        config: &VerifierConfig,
        now: i64,
    ) -> Result<Identity> {
        self.observe(self.run(raw, config, Some(now)).await)
    }

    /// Signature stage on its own
    ///
    /// Does not validate claims and does not notify the observer.
    pub async fn verify_signature(&self, parsed: &ParsedToken) -> Result<VerifiedToken> {
        verify_parsed(parsed, self.key_resolver(), self.config_fallback).await
    }

    async fn run(&self, raw: &str, config: &VerifierConfig, now: Option<i64>) -> Result<Identity> {
        // 1. Structure
        let parsed = parse(raw)?;

        // 2. Key lookup and signature
        let verified = self.verify_signature(&parsed).await?;

        // 3. Claims, with the clock read after the key fetch
        let now = now.unwrap_or_else(unix_now);
        validate_claims_at(verified.claims.as_ref(), config, now)?;

        let claims = verified.claims.ok_or(Error::NoIdentity)?;
        debug!(kid = %verified.key_id, alg = %verified.algorithm, "ID token verified");

        Ok(Identity::new(claims, verified.key_id, verified.algorithm))
    }

    fn key_resolver(&self) -> &dyn KeyResolver {
        match &self.config_resolver {
            Some(resolver) => resolver.as_ref(),
            None => google_resolver(),
        }
    }

    fn observe(&self, result: Result<Identity>) -> Result<Identity> {
        if let Err(error) = &result {
            self.config_observer.on_failure(error);
        }
        result
    }
}

fn google_resolver() -> &'static HttpKeyResolver {
    static RESOLVER: OnceLock<HttpKeyResolver> = OnceLock::new();
    RESOLVER.get_or_init(|| HttpKeyResolver::google(reqwest::Client::new()))
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}
