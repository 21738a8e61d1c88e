//! Errors raised while validating, creating, and looking up cache-busted files.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::hash::MIN_HASH_LENGTH;

pub type Result<T> = std::result::Result<T, BustError>;

/// Filesystem operation that failed, for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Read,
    Write,
    ListDir,
    Remove,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IoOp::Read => "read",
            IoOp::Write => "write",
            IoOp::ListDir => "list directory",
            IoOp::Remove => "remove",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum BustError {
    #[error("cachebust: no files registered")]
    NoFilesRegistered,

    #[error("cachebust: entry {index} has an empty source or public path")]
    EmptyPath { index: usize },

    #[error("cachebust: hash length {given} too short, must be at least {min}")]
    HashLengthTooShort { given: usize, min: usize },

    #[error("cachebust: embedded storage selected but no embedded source provided")]
    NoEmbeddedSourceProvided,

    #[error("cachebust: disabled because the development flag is set")]
    CacheBustingDisabled,

    #[error("cachebust: file data is stored on disk, not in memory")]
    FileNotStoredOnDisk,

    #[error("cachebust: no busted file for {path}")]
    NotFound { path: String },

    #[error("cachebust: creation cancelled")]
    Cancelled,

    #[error("cachebust: failed to {op} {path}: {source}")]
    Io {
        op: IoOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BustError {
    pub(crate) fn io(op: IoOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn too_short(given: usize) -> Self {
        Self::HashLengthTooShort {
            given,
            min: MIN_HASH_LENGTH,
        }
    }

    /// True for the development short-circuit, which callers should treat as expected.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::CacheBustingDisabled)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
