//! Content-addressed digests with domain separation.
//!
//! Algorithm: SHA-256 over `domain || data`. Result format:
//! `"sha256:<hex_digest>"`.

use sha2::{Digest, Sha256};

/// Domain prefix for search trace hashing. Null-terminated.
pub const DOMAIN_SEARCH_TRACE: &[u8] = b"WAYFIND::SEARCH_TRACE::V1\0";

/// Domain prefix for scenario report hashing. Null-terminated.
pub const DOMAIN_RUN_REPORT: &[u8] = b"WAYFIND::RUN_REPORT::V1\0";

/// A content-addressed hash with algorithm identifier.
///
/// Invariant: exactly one `:` separator with non-empty text on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// SHA-256 of `domain || data`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let hex = hex::encode(hasher.finalize());
    ContentHash {
        colon: "sha256".len(),
        full: format!("sha256:{hex}"),
    }
}
