//! Public key resolution
//!
//! A [`KeyResolver`] turns a key id into PEM key material. Every failure
//! (network, status, body, missing entry) is reported the same way, as
//! `None`; the verifier turns that into [`Error::KeyNotFound`].
//!
//! [`Error::KeyNotFound`]: crate::Error::KeyNotFound

pub(crate) mod caching;
pub(crate) mod http;
pub(crate) mod material;

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`KeyResolver`]
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of public keys by key id
///
/// Implementations must return `None` for a missing `kid` without doing
/// any I/O.
pub trait KeyResolver: Send + Sync {
    fn get_public_key<'a>(&'a self, kid: Option<&'a str>) -> BoxFuture<'a, Option<String>>;
}

impl<R: KeyResolver + ?Sized> KeyResolver for Arc<R> {
    fn get_public_key<'a>(&'a self, kid: Option<&'a str>) -> BoxFuture<'a, Option<String>> {
        (**self).get_public_key(kid)
    }
}

/// Key id to PEM mapping, as published by a certificate endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicKeySet(BTreeMap<String, String>);

impl PublicKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an endpoint response body
    ///
    /// Returns `None` unless the body is a JSON object of string values.
    pub fn from_json(body: &str) -> Option<Self> {
        miniserde::json::from_str::<BTreeMap<String, String>>(body)
            .ok()
            .map(Self)
    }

    pub fn insert(&mut self, kid: impl Into<String>, pem: impl Into<String>) {
        self.0.insert(kid.into(), pem.into());
    }

    pub fn get(&self, kid: &str) -> Option<&str> {
        self.0.get(kid).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn key_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PublicKeySet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(kid, pem)| (kid.into(), pem.into()))
                .collect(),
        )
    }
}

/// Resolver over a fixed key set
///
/// For pinned keys and tests. Never performs I/O.
#[derive(Debug, Clone, Default)]
pub struct StaticKeyResolver {
    keys: PublicKeySet,
}

impl StaticKeyResolver {
    pub fn new(keys: PublicKeySet) -> Self {
        Self { keys }
    }
}

impl KeyResolver for StaticKeyResolver {
    fn get_public_key<'a>(&'a self, kid: Option<&'a str>) -> BoxFuture<'a, Option<String>> {
        let pem = kid.and_then(|kid| self.keys.get(kid)).map(ToString::to_string);
        Box::pin(async move { pem })
    }
}
