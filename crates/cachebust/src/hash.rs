//! BustHash: an uppercase hex SHA-256 digest, truncated for use as a filename prefix.
//!
//! The prefix only has to change when content changes, so a short slice of a
//! strong digest is plenty. Uppercase is part of the on-disk format: stale copy
//! detection only recognises `[A-F0-9]` prefixes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::{BustError, Result};

/// Shortest hash prefix we accept.
pub const MIN_HASH_LENGTH: usize = 8;

/// Hash prefix length used when a registry asks for 0.
pub const DEFAULT_HASH_LENGTH: usize = MIN_HASH_LENGTH;

/// Number of hex chars in a full SHA-256 digest.
pub const FULL_HASH_LENGTH: usize = 64;

/// A content hash prefix - uppercase hex of SHA-256, possibly truncated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BustHash(String);

impl BustHash {
    /// Hash data and keep the full 64-char digest.
    pub fn from_data(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        Self(hex::encode_upper(digest))
    }

    /// Hash data and truncate to `length` chars.
    ///
    /// A length longer than the digest keeps the whole digest rather than
    /// failing; validation is responsible for the lower bound.
    pub fn truncated(data: &[u8], length: usize) -> Self {
        let mut hash = Self::from_data(data);
        if length < hash.0.len() {
            hash.0.truncate(length);
        }
        hash
    }

    /// The busted filename for an original base filename: `<HASH>.<original>`.
    pub fn filename_for(&self, original: &str) -> String {
        format!("{}.{}", self.0, original)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BustHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for BustHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolve a requested prefix length: 0 means the default, anything else
/// must be at least [`MIN_HASH_LENGTH`].
pub fn resolve_hash_length(length: usize) -> Result<usize> {
    match length {
        0 => Ok(DEFAULT_HASH_LENGTH),
        n if n < MIN_HASH_LENGTH => Err(BustError::too_short(n)),
        n => Ok(n),
    }
}

/// Whether `c` can appear in a hash prefix we generated.
pub(crate) fn is_hash_char(c: u8) -> bool {
    c.is_ascii_digit() || (b'A'..=b'F').contains(&c)
}
