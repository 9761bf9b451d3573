//! PEM public key material
//!
//! Certificate endpoints publish either X.509 certificates or bare public
//! keys. Both end up as DER that `aws-lc-rs` can verify against, tagged with
//! the key family so the right signature scheme can be picked.

use x509_parser::prelude::{FromDer, SubjectPublicKeyInfo, parse_x509_certificate};
use x509_parser::public_key::PublicKey as SpkiKey;

/// Elliptic curve of an EC key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Curve {
    P256,
    P384,
    P521,
}

/// Key family, decides the signature scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyFamily {
    Rsa,
    Ec(Curve),
}

/// Public key ready for verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PublicKey {
    pub family: KeyFamily,
    /// SubjectPublicKeyInfo DER, or PKCS#1 DER for `RSA PUBLIC KEY` blocks
    pub der: Vec<u8>,
}

impl PublicKey {
    /// Parse a PEM block
    ///
    /// Accepts `CERTIFICATE`, `PUBLIC KEY` and `RSA PUBLIC KEY`. Anything
    /// else, including keys of unsupported types, yields `None`.
    pub(crate) fn from_pem(text: &str) -> Option<Self> {
        let block = pem::parse(text.trim()).ok()?;

        match block.tag() {
            "CERTIFICATE" => {
                let (_, cert) = parse_x509_certificate(block.contents()).ok()?;
                Self::from_spki(cert.public_key())
            }
            "PUBLIC KEY" => {
                let (_, spki) = SubjectPublicKeyInfo::from_der(block.contents()).ok()?;
                Self::from_spki(&spki)
            }
            "RSA PUBLIC KEY" => Some(Self {
                family: KeyFamily::Rsa,
                der: block.into_contents(),
            }),
            _ => None,
        }
    }

    fn from_spki(spki: &SubjectPublicKeyInfo<'_>) -> Option<Self> {
        let family = match spki.parsed().ok()? {
            SpkiKey::RSA(_) => KeyFamily::Rsa,
            SpkiKey::EC(point) => match point.key_size() {
                256 => KeyFamily::Ec(Curve::P256),
                384 => KeyFamily::Ec(Curve::P384),
                // 66-byte coordinates
                528 => KeyFamily::Ec(Curve::P521),
                _ => return None,
            },
            _ => return None,
        };

        Some(Self {
            family,
            der: spki.raw.to_vec(),
        })
    }
}
