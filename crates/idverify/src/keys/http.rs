//! Key resolution from an HTTP certificate endpoint

use crate::config::GOOGLE_CERTS_URL;
use crate::error::Result;
use crate::keys::{BoxFuture, KeyResolver, PublicKeySet};
use crate::limits::MAX_CERTS_RESPONSE_SIZE;
use crate::url::validate_certs_url;
use reqwest::StatusCode;
use tracing::debug;

/// Resolver that fetches the key set on every lookup
///
/// Timeouts, proxies and TLS settings belong to the `reqwest::Client` it is
/// given. Wrap it in a [`CachingKeyResolver`](crate::CachingKeyResolver) to
/// avoid one request per verification.
#[derive(Debug, Clone)]
pub struct HttpKeyResolver {
    client: reqwest::Client,
    url: String,
}

impl HttpKeyResolver {
    /// Resolver for Google's certificate endpoint
    pub fn google(client: reqwest::Client) -> Self {
        Self {
            client,
            url: GOOGLE_CERTS_URL.to_string(),
        }
    }

    /// Resolver for any endpoint serving a JSON object of key id to PEM
    pub fn new(client: reqwest::Client, url: &str) -> Result<Self> {
        validate_certs_url(url)?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Endpoint this resolver fetches from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the current key set
    pub async fn fetch_key_set(&self) -> Option<PublicKeySet> {
        let bytes = self.fetch_body().await?;

        let Ok(body) = std::str::from_utf8(&bytes) else {
            debug!(url = %self.url, "certificate response is not UTF-8");
            return None;
        };

        let set = PublicKeySet::from_json(body);
        if set.is_none() {
            debug!(url = %self.url, "certificate response is not a key id to PEM object");
        }
        set
    }

    async fn fetch_body(&self) -> Option<Vec<u8>> {
        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %self.url, error = %e, "certificate fetch failed");
                return None;
            }
        };

        let status = response.status();
        debug!(url = %self.url, status = status.as_u16(), "fetched certificates");
        if status != StatusCode::OK {
            return None;
        }

        // Reject early when the server announces an oversized body
        if response
            .content_length()
            .is_some_and(|len| len > MAX_CERTS_RESPONSE_SIZE as u64)
        {
            debug!(url = %self.url, "certificate response too large");
            return None;
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(url = %self.url, error = %e, "certificate body read failed");
                return None;
            }
        };

        if bytes.len() > MAX_CERTS_RESPONSE_SIZE {
            debug!(url = %self.url, size = bytes.len(), "certificate response too large");
            return None;
        }

        Some(bytes.to_vec())
    }
}

impl KeyResolver for HttpKeyResolver {
    fn get_public_key<'a>(&'a self, kid: Option<&'a str>) -> BoxFuture<'a, Option<String>> {
        Box::pin(async move {
            let kid = kid?;
            let set = self.fetch_key_set().await?;
            set.get(kid).map(ToString::to_string)
        })
    }
}
