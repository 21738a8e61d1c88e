//! FileEntry: one original static file and, after creation, its busted copy.

use bytes::Bytes;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the busted copy of an entry ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum BustedCopy {
    /// Written next to the original on disk.
    OnDisk(PathBuf),
    /// Held in process memory under this filename.
    InMemory(String),
}

impl fmt::Display for BustedCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BustedCopy::OnDisk(path) => write!(f, "{}", path.display()),
            BustedCopy::InMemory(name) => write!(f, "{} (in memory)", name),
        }
    }
}

/// A static file to cache bust.
///
/// `source_path` is where the original is read from: a disk path, or a
/// root-relative `/`-separated path inside an embedded archive.
/// `public_path` is the URL path the original is served on, e.g.
/// `/static/js/script.min.js`. It is used to build the URL of the busted copy.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub(crate) source_path: String,
    pub(crate) public_path: String,
    pub(crate) busted_copy: Option<BustedCopy>,
    pub(crate) busted_public_path: Option<String>,
    #[serde(skip)]
    pub(crate) bytes: Option<Bytes>,
}

impl FileEntry {
    pub fn new(source_path: impl Into<String>, public_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            public_path: public_path.into(),
            busted_copy: None,
            busted_public_path: None,
            bytes: None,
        }
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    pub fn busted_copy(&self) -> Option<&BustedCopy> {
        self.busted_copy.as_ref()
    }

    /// Full path of the on-disk copy, or a `"<name> (in memory)"` placeholder.
    pub fn busted_local_path(&self) -> Option<String> {
        self.busted_copy.as_ref().map(ToString::to_string)
    }

    pub fn busted_public_path(&self) -> Option<&str> {
        self.busted_public_path.as_deref()
    }

    /// In-memory copy; only set for memory and embedded storage.
    pub fn bytes(&self) -> Option<&Bytes> {
        self.bytes.as_ref()
    }

    pub fn is_created(&self) -> bool {
        self.busted_public_path.is_some()
    }

    /// Last segment of `source_path`, accepting either separator.
    pub fn original_filename(&self) -> &str {
        base_name(&self.source_path)
    }

    /// Last segment of the busted URL path.
    pub fn busted_filename(&self) -> Option<&str> {
        self.busted_public_path.as_deref().map(base_name)
    }

    /// Directory holding the original on disk.
    pub(crate) fn source_dir(&self) -> &Path {
        match Path::new(&self.source_path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// Last path segment, splitting on both `/` and `\`.
pub(crate) fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    }
}
