//! Token signing utilities for integration tests
//!
//! Tokens are signed locally with the key pairs under `tests/fixtures/`, so
//! every test runs without network access to a real identity provider.

#![allow(dead_code)]

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    ECDSA_P256_SHA256_FIXED_SIGNING, ECDSA_P384_SHA384_FIXED_SIGNING, EcdsaKeyPair,
    EcdsaSigningAlgorithm, RSA_PKCS1_SHA256, RSA_PKCS1_SHA384, RSA_PKCS1_SHA512, RsaKeyPair,
};
use idverify::{
    BoxFuture, KeyResolver, PublicKeySet, StaticKeyResolver, Verifier, base64url,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const CLIENT_ID: &str = "1234567890-abc.apps.googleusercontent.com";
pub const KID: &str = "test-key-1";

/// Fixed "now" for tests that need an exact expiry boundary
pub const NOW: i64 = 1_750_000_000;

pub const SIGNING_KEY: &str = include_str!("../fixtures/signing_key.pem");
pub const SIGNING_CERT: &str = include_str!("../fixtures/signing_cert.pem");
pub const SIGNING_PUBKEY: &str = include_str!("../fixtures/signing_pubkey.pem");
pub const ROGUE_PUBKEY: &str = include_str!("../fixtures/rogue_pubkey.pem");
pub const P256_KEY: &str = include_str!("../fixtures/ec_p256_key.pem");
pub const P256_PUBKEY: &str = include_str!("../fixtures/ec_p256_pubkey.pem");
pub const P384_KEY: &str = include_str!("../fixtures/ec_p384_key.pem");
pub const P384_PUBKEY: &str = include_str!("../fixtures/ec_p384_pubkey.pem");

/// Private key used to sign a test token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SigningKey {
    Rsa,
    P256,
    P384,
}

fn pkcs8(pem_text: &str) -> Vec<u8> {
    pem::parse(pem_text).expect("fixture pem").into_contents()
}

/// Sign `message` with a fixture key
///
/// RSA picks the PKCS#1 digest from `alg` (SHA-256 unless RS384/RS512).
pub fn sign(key: SigningKey, alg: &str, message: &[u8]) -> Vec<u8> {
    let rng = SystemRandom::new();

    match key {
        SigningKey::Rsa => {
            let keypair = RsaKeyPair::from_pkcs8(&pkcs8(SIGNING_KEY)).expect("rsa key");
            let padding = match alg {
                "RS384" => &RSA_PKCS1_SHA384,
                "RS512" => &RSA_PKCS1_SHA512,
                _ => &RSA_PKCS1_SHA256,
            };
            let mut signature = vec![0u8; keypair.public_modulus_len()];
            keypair
                .sign(padding, &rng, message, &mut signature)
                .expect("rsa sign");
            signature
        }
        SigningKey::P256 => sign_ecdsa(&ECDSA_P256_SHA256_FIXED_SIGNING, P256_KEY, message),
        SigningKey::P384 => sign_ecdsa(&ECDSA_P384_SHA384_FIXED_SIGNING, P384_KEY, message),
    }
}

fn sign_ecdsa(alg: &'static EcdsaSigningAlgorithm, key: &str, message: &[u8]) -> Vec<u8> {
    let keypair = EcdsaKeyPair::from_pkcs8(alg, &pkcs8(key)).expect("ecdsa key");
    keypair
        .sign(&SystemRandom::new(), message)
        .expect("ecdsa sign")
        .as_ref()
        .to_vec()
}

/// Claims Google puts in a Sign-In ID token, expiring an hour after `now`
pub fn google_claims(now: i64) -> Value {
    json!({
        "iss": "https://accounts.google.com",
        "azp": CLIENT_ID,
        "aud": CLIENT_ID,
        "sub": "110169484474386276334",
        "hd": "example.com",
        "email": "jane@example.com",
        "email_verified": true,
        "name": "Jane Doe",
        "picture": "https://lh3.googleusercontent.com/a/default-user",
        "iat": now - 60,
        "exp": now + 3600,
    })
}

/// Builder for signed test tokens
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    header: Value,
    payload: Value,
}

impl TokenBuilder {
    /// RS256 token with Google claims and the default `kid`
    pub fn new() -> Self {
        Self {
            header: json!({"alg": "RS256", "kid": KID, "typ": "JWT"}),
            payload: google_claims(unix_now()),
        }
    }

    /// Set the `alg` header
    pub fn alg(mut self, alg: &str) -> Self {
        self.header["alg"] = json!(alg);
        self
    }

    /// Set the `kid` header
    pub fn kid(mut self, kid: &str) -> Self {
        self.header["kid"] = json!(kid);
        self
    }

    /// Set a header field
    pub fn header(mut self, field: &str, value: Value) -> Self {
        self.header[field] = value;
        self
    }

    /// Remove a header field
    pub fn without_header(mut self, field: &str) -> Self {
        if let Some(header) = self.header.as_object_mut() {
            header.remove(field);
        }
        self
    }

    /// Set a claim
    pub fn claim(mut self, key: &str, value: Value) -> Self {
        self.payload[key] = value;
        self
    }

    /// Remove a claim
    pub fn without_claim(mut self, key: &str) -> Self {
        if let Some(payload) = self.payload.as_object_mut() {
            payload.remove(key);
        }
        self
    }

    /// Replace the whole payload
    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn claims(&self) -> &Value {
        &self.payload
    }

    /// Sign with a fixture key
    pub fn sign(&self, key: SigningKey) -> String {
        let alg = self.header["alg"].as_str().unwrap_or("RS256").to_string();
        let signing_input = format!(
            "{}.{}",
            base64url::encode(self.header.to_string()),
            base64url::encode(self.payload.to_string())
        );
        let signature = sign(key, &alg, signing_input.as_bytes());
        format!("{signing_input}.{}", base64url::encode(signature))
    }
}

/// Current Unix time
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Key set with the RSA certificate under [`KID`]
pub fn google_key_set() -> PublicKeySet {
    PublicKeySet::from_iter([(KID, SIGNING_CERT)])
}

/// Verifier resolving from a fixed key set, with a silent observer
pub fn verifier(keys: PublicKeySet) -> Verifier {
    Verifier::new()
        .resolver(StaticKeyResolver::new(keys))
        .observer(|_: &idverify::Error| {})
        .build()
}

/// Replace byte `index` of the decoded signature with its bitwise complement
pub fn corrupt_signature_byte(token: &str, index: usize) -> String {
    let (signing_input, signature) = token.rsplit_once('.').expect("three segments");
    let mut bytes = base64url::decode(signature).expect("signature");
    bytes[index] = !bytes[index];
    format!("{signing_input}.{}", base64url::encode(bytes))
}

/// Resolver that counts lookups before delegating
#[derive(Clone)]
pub struct CountingResolver {
    inner: StaticKeyResolver,
    calls: Arc<AtomicUsize>,
}

impl CountingResolver {
    pub fn new(keys: PublicKeySet) -> Self {
        Self {
            inner: StaticKeyResolver::new(keys),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KeyResolver for CountingResolver {
    fn get_public_key<'a>(&'a self, kid: Option<&'a str>) -> BoxFuture<'a, Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_public_key(kid)
    }
}
