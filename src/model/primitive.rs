//! Hash primitives used to derive leaf and parent digests

use super::Digest;
use crate::Error;
use serde::{Deserialize, Serialize};
use sha2::Digest as _;
use std::fmt;
use std::str::FromStr;

/// A deterministic, collision-resistant digest function
///
/// Implementations must be pure: the same input always yields the same
/// digest. Trees and verifiers only agree on a root when they are driven
/// by the same primitive.
pub trait HashPrimitive: Send + Sync {
    /// Digest of an arbitrary byte sequence (used for leaves)
    fn hash(&self, data: &[u8]) -> Digest;

    /// Digest of a parent node from its left and right children
    /// Default implementation hashes `left || right`
    fn combine(&self, left: &Digest, right: &Digest) -> Digest {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(left.as_bytes());
        buf[32..].copy_from_slice(right.as_bytes());
        self.hash(&buf)
    }

    /// Get the primitive name/identifier
    fn name(&self) -> &str;
}

/// SHA-256 primitive
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256;

impl HashPrimitive for Sha256 {
    fn hash(&self, data: &[u8]) -> Digest {
        let result = sha2::Sha256::digest(data);
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        Digest::from_bytes(hash)
    }

    fn name(&self) -> &str {
        "sha256"
    }
}

/// BLAKE3 primitive
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3;

impl HashPrimitive for Blake3 {
    fn hash(&self, data: &[u8]) -> Digest {
        Digest::from_bytes(*blake3::hash(data).as_bytes())
    }

    fn combine(&self, left: &Digest, right: &Digest) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left.as_bytes());
        hasher.update(right.as_bytes());
        Digest::from_bytes(*hasher.finalize().as_bytes())
    }

    fn name(&self) -> &str {
        "blake3"
    }
}

/// Wraps a primitive so that parents hash the concatenated hex renderings
/// of their children instead of the raw bytes
///
/// `HexJoin<Sha256>` reproduces roots published by tools that keep digests
/// as hex strings and join them as text.
#[derive(Clone, Debug)]
pub struct HexJoin<P> {
    inner: P,
    name: String,
}

impl<P: HashPrimitive> HexJoin<P> {
    pub fn new(inner: P) -> Self {
        let name = format!("{}-hex", inner.name());
        HexJoin { inner, name }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: HashPrimitive> HashPrimitive for HexJoin<P> {
    fn hash(&self, data: &[u8]) -> Digest {
        self.inner.hash(data)
    }

    fn combine(&self, left: &Digest, right: &Digest) -> Digest {
        let mut joined = String::with_capacity(128);
        joined.push_str(&left.to_hex());
        joined.push_str(&right.to_hex());
        self.inner.hash(joined.as_bytes())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Selectable hash algorithm
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Sha256,
    Blake3,
}

impl Algorithm {
    /// Build the primitive, optionally wrapped in [`HexJoin`]
    pub fn primitive(self, hex_join: bool) -> Box<dyn HashPrimitive> {
        match (self, hex_join) {
            (Algorithm::Sha256, false) => Box::new(Sha256),
            (Algorithm::Sha256, true) => Box::new(HexJoin::new(Sha256)),
            (Algorithm::Blake3, false) => Box::new(Blake3),
            (Algorithm::Blake3, true) => Box::new(HexJoin::new(Blake3)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Sha256 => "sha256",
            Algorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Algorithm::Sha256),
            "blake3" => Ok(Algorithm::Blake3),
            other => Err(Error::Config(format!("Unknown hash algorithm: {}", other))),
        }
    }
}
