//! Hashing utilities for produced archives.
//!
//! Archives are byte-for-byte reproducible, so a digest of the bytes is a
//! cheap way to tell whether two assemblies of a project differ.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// A full 64-character SHA256 hash, lowercase hexadecimal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContentHash(pub String);

impl std::fmt::Display for ContentHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Hash arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> ContentHash {
  let mut hasher = Sha256::new();
  hasher.update(data);
  ContentHash(format!("{:x}", hasher.finalize()))
}
