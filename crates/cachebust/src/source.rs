//! Embedded sources: read-only archives of static files compiled into the binary.
//!
//! The registry only needs two capabilities from an archive: read a file by its
//! root-relative `/`-separated path, and list the paths under a root. Busted
//! copies of embedded files can't be written back into the archive, so they
//! always live in memory.

use bytes::Bytes;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// A read-only, `/`-keyed archive of files.
pub trait EmbeddedSource: Send + Sync {
    /// Read the file at `path`. A leading `/` is ignored.
    fn read(&self, path: &str) -> io::Result<Bytes>;

    /// All file paths at or below `root`, sorted. `""` or `"."` means everything.
    fn walk(&self, root: &str) -> Vec<String>;
}

/// Strip the leading `/` and `./` that callers tend to put on archive paths.
pub(crate) fn archive_key(path: &str) -> &str {
    let mut key = path;
    loop {
        if let Some(rest) = key.strip_prefix("./") {
            key = rest;
        } else if let Some(rest) = key.strip_prefix('/') {
            key = rest;
        } else {
            return key;
        }
    }
}

fn under_root(key: &str, root: &str) -> bool {
    let root = archive_key(root).trim_end_matches('/');
    if root.is_empty() || root == "." {
        return true;
    }
    key == root || key.strip_prefix(root).is_some_and(|rest| rest.starts_with('/'))
}

fn not_in_archive(path: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} not found in embedded source", path),
    )
}

/// An owned in-memory archive.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    files: BTreeMap<String, Bytes>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, normalising `\` separators and any leading `/`.
    pub fn insert(&mut self, path: impl AsRef<str>, data: impl Into<Bytes>) {
        let key = archive_key(&path.as_ref().replace('\\', "/")).to_string();
        self.files.insert(key, data.into());
    }

    pub fn with_file(mut self, path: impl AsRef<str>, data: impl Into<Bytes>) -> Self {
        self.insert(path, data);
        self
    }

    /// Load every file below `dir` into an archive.
    ///
    /// Keys are relative to `dir` and prefixed with `prefix` (e.g. `website`),
    /// matching the layout an embed macro would produce for that folder.
    pub fn from_dir(dir: &Path, prefix: &str) -> io::Result<Self> {
        let mut archive = Self::new();
        let mut pending = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            for entry in std::fs::read_dir(&current)? {
                let entry = entry?;
                let path = entry.path();
                if entry.file_type()?.is_dir() {
                    pending.push(path);
                    continue;
                }

                let relative = path
                    .strip_prefix(dir)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                let relative = relative.to_string_lossy().replace('\\', "/");
                let key = if prefix.is_empty() {
                    relative
                } else {
                    format!("{}/{}", prefix.trim_end_matches('/'), relative)
                };
                archive.insert(key, std::fs::read(&path)?);
            }
        }

        Ok(archive)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl EmbeddedSource for MemoryArchive {
    fn read(&self, path: &str) -> io::Result<Bytes> {
        self.files
            .get(archive_key(path))
            .cloned()
            .ok_or_else(|| not_in_archive(path))
    }

    fn walk(&self, root: &str) -> Vec<String> {
        self.files
            .keys()
            .filter(|key| under_root(key, root))
            .cloned()
            .collect()
    }
}

/// Adapter for archives generated by `#[derive(rust_embed::RustEmbed)]`.
#[cfg(feature = "rust-embed")]
pub struct RustEmbedSource<T> {
    _assets: std::marker::PhantomData<fn() -> T>,
}

#[cfg(feature = "rust-embed")]
impl<T: rust_embed::RustEmbed> RustEmbedSource<T> {
    pub fn new() -> Self {
        Self {
            _assets: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "rust-embed")]
impl<T: rust_embed::RustEmbed> Default for RustEmbedSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "rust-embed")]
impl<T: rust_embed::RustEmbed> EmbeddedSource for RustEmbedSource<T> {
    fn read(&self, path: &str) -> io::Result<Bytes> {
        let file = T::get(archive_key(path)).ok_or_else(|| not_in_archive(path))?;
        Ok(match file.data {
            std::borrow::Cow::Borrowed(data) => Bytes::from_static(data),
            std::borrow::Cow::Owned(data) => Bytes::from(data),
        })
    }

    fn walk(&self, root: &str) -> Vec<String> {
        let mut paths: Vec<String> = T::iter()
            .filter(|key| under_root(key, root))
            .map(|key| key.into_owned())
            .collect();
        paths.sort();
        paths
    }
}

/// Log every file in an embedded source and return the list.
///
/// Diagnostics only: confirms what actually got embedded.
pub fn list_embedded(source: &dyn EmbeddedSource) -> Vec<String> {
    let paths = source.walk(".");
    for path in &paths {
        tracing::info!(path = %path, "embedded file");
    }
    paths
}
