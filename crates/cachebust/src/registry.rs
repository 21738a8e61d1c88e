//! Registry: the set of files to cache bust and the procedure that busts them.
//!
//! ```text
//! build entries ──► Registry ──► create() ──► filename_pairs()  (templates)
//!                                   │
//!                                   └──────► lookup(url)        (serving, memory only)
//! ```
//!
//! Creation is not transactional. Entries are processed in registration order
//! and a failure stops the run, leaving every earlier entry's copy written and
//! its derived fields set. Re-running `create` after fixing the cause is safe.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::sync::Arc;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;

use crate::cleanup::remove_stale_copies_except;
use crate::entry::{base_name, BustedCopy, FileEntry};
use crate::error::{BustError, IoOp, Result};
use crate::hash::{resolve_hash_length, BustHash, DEFAULT_HASH_LENGTH};
use crate::source::EmbeddedSource;
use crate::storage::StorageMode;
use crate::urlpath;

/// Files to cache bust plus global settings.
#[derive(Clone)]
pub struct Registry {
    entries: Vec<FileEntry>,
    hash_length: usize,
    disabled: bool,
    debug: bool,
    storage: StorageMode,
    embedded: Option<Arc<dyn EmbeddedSource>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries)
            .field("hash_length", &self.hash_length)
            .field("disabled", &self.disabled)
            .field("debug", &self.debug)
            .field("storage", &self.storage)
            .field("embedded", &self.embedded.is_some())
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Where creation reads originals from.
enum Reader<'a> {
    Disk,
    Archive(&'a dyn EmbeddedSource),
}

impl Reader<'_> {
    fn read(&self, path: &str) -> Result<Bytes> {
        match self {
            Reader::Disk => fs::read(path)
                .map(Bytes::from)
                .map_err(|e| BustError::io(IoOp::Read, path, e)),
            Reader::Archive(source) => source
                .read(path)
                .map_err(|e| BustError::io(IoOp::Read, path, e)),
        }
    }
}

impl Registry {
    /// Empty registry storing copies on disk with the default hash length.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            hash_length: DEFAULT_HASH_LENGTH,
            disabled: false,
            debug: false,
            storage: StorageMode::Disk,
            embedded: None,
        }
    }

    /// Originals on disk, busted copies written next to them.
    pub fn on_disk(entries: impl IntoIterator<Item = FileEntry>) -> Self {
        Self::new().with_entries(entries)
    }

    /// Originals on disk, busted copies kept in memory.
    ///
    /// For hosts that can't write to their static directory.
    pub fn in_memory(entries: impl IntoIterator<Item = FileEntry>) -> Self {
        Self::new()
            .with_storage(StorageMode::Memory)
            .with_entries(entries)
    }

    /// Originals in an embedded archive, busted copies kept in memory.
    ///
    /// Source paths are root-relative archive paths, e.g.
    /// `website/static/js/script.min.js`.
    pub fn embedded(
        source: impl EmbeddedSource + 'static,
        entries: impl IntoIterator<Item = FileEntry>,
    ) -> Self {
        Self::new()
            .with_storage(StorageMode::Embedded)
            .with_embedded_source(Arc::new(source))
            .with_entries(entries)
    }

    pub fn with_entries(mut self, entries: impl IntoIterator<Item = FileEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Prefix length; 0 means the default, anything else must be at least 8.
    pub fn with_hash_length(mut self, hash_length: usize) -> Self {
        self.hash_length = hash_length;
        self
    }

    pub fn with_storage(mut self, storage: StorageMode) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_embedded_source(mut self, source: Arc<dyn EmbeddedSource>) -> Self {
        self.embedded = Some(source);
        self
    }

    /// Development mode: `create` does nothing and reports `CacheBustingDisabled`.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Log the original/busted report after each `create`.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn push(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    pub fn set_hash_length(&mut self, hash_length: usize) {
        self.hash_length = hash_length;
    }

    pub fn set_storage(&mut self, storage: StorageMode) {
        self.storage = storage;
    }

    pub fn set_embedded_source(&mut self, source: Arc<dyn EmbeddedSource>) {
        self.embedded = Some(source);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn hash_length(&self) -> usize {
        self.hash_length
    }

    pub fn storage(&self) -> StorageMode {
        self.storage
    }

    pub fn embedded_source(&self) -> Option<&Arc<dyn EmbeddedSource>> {
        self.embedded.as_ref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Check the registry and normalise its paths in place.
    ///
    /// Public paths become rooted and `/`-separated; embedded source paths get
    /// `/` separators; a hash length of 0 becomes the default.
    pub fn validate(&mut self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(BustError::NoFilesRegistered);
        }

        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.source_path.trim().is_empty() || entry.public_path.trim().is_empty() {
                return Err(BustError::EmptyPath { index });
            }

            if self.storage == StorageMode::Embedded {
                entry.source_path = entry.source_path.trim().replace('\\', "/");
            }
            entry.public_path = urlpath::clean(entry.public_path.trim());
        }

        self.hash_length = resolve_hash_length(self.hash_length)?;

        if self.storage == StorageMode::Embedded && self.embedded.is_none() {
            return Err(BustError::NoEmbeddedSourceProvided);
        }

        Ok(())
    }

    /// Hash every original and store a busted copy of it.
    ///
    /// Disk storage writes `<dir>/<HASH>.<name>` next to each original after
    /// deleting copies left by earlier runs; memory and embedded storage keep
    /// the bytes on the entry. See the module docs for the partial-failure
    /// contract.
    pub fn create(&mut self) -> Result<()> {
        self.create_with_cancel(&CancellationToken::new())
    }

    /// As [`Registry::create`], checking `cancel` before each entry.
    ///
    /// Entries finished before cancellation keep their copies.
    pub fn create_with_cancel(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.validate()?;

        if self.disabled {
            if self.debug {
                tracing::info!("creation of cache busting files is disabled, development flag is set");
            }
            return Err(BustError::CacheBustingDisabled);
        }

        let storage = self.storage;
        let hash_length = self.hash_length;
        let reader = match storage {
            StorageMode::Disk | StorageMode::Memory => Reader::Disk,
            StorageMode::Embedded => Reader::Archive(
                self.embedded
                    .as_deref()
                    .ok_or(BustError::NoEmbeddedSourceProvided)?,
            ),
        };

        for entry in self.entries.iter_mut() {
            if cancel.is_cancelled() {
                return Err(BustError::Cancelled);
            }
            bust_entry(entry, &reader, storage, hash_length)?;
        }

        if self.debug {
            tracing::info!("cache busted files\n{}", self.report());
        }

        Ok(())
    }

    /// Bytes of the busted copy served at `request_path`.
    ///
    /// Only memory and embedded storage keep bytes; disk storage fails with
    /// `FileNotStoredOnDisk` without searching. The path must equal the
    /// entry's busted public path exactly.
    pub fn lookup(&self, request_path: &str) -> Result<&Bytes> {
        if self.debug {
            tracing::debug!(path = %request_path, "looking up busted file");
        }

        match self.storage {
            StorageMode::Disk => Err(BustError::FileNotStoredOnDisk),
            StorageMode::Memory | StorageMode::Embedded => self
                .entries
                .iter()
                .find(|entry| entry.busted_public_path.as_deref() == Some(request_path))
                .and_then(|entry| entry.bytes.as_ref())
                .ok_or_else(|| BustError::NotFound {
                    path: request_path.to_string(),
                }),
        }
    }

    /// Original filename → busted filename, for templates.
    ///
    /// Entries that haven't been created are left out so templates fall back
    /// to the original name. Two entries with the same base filename collide;
    /// the later one wins.
    pub fn filename_pairs(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .filter_map(|entry| {
                entry
                    .busted_filename()
                    .map(|busted| (entry.original_filename().to_string(), busted.to_string()))
            })
            .collect()
    }

    /// Two aligned tables matching originals to busted copies, by filename and by URL.
    pub fn report(&self) -> String {
        let files: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|entry| {
                let busted = match &entry.busted_copy {
                    Some(BustedCopy::OnDisk(path)) => path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string()),
                    Some(copy @ BustedCopy::InMemory(_)) => copy.to_string(),
                    None => "-".to_string(),
                };
                (entry.original_filename().to_string(), busted)
            })
            .collect();

        let urls: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|entry| {
                (
                    entry.public_path.clone(),
                    entry.busted_public_path.clone().unwrap_or_else(|| "-".to_string()),
                )
            })
            .collect();

        let mut output = render_table(("ORIGINAL FILENAME", "CACHEBUST FILENAME"), &files);
        output.push('\n');
        output.push_str(&render_table(("ORIGINAL URL PATH", "CACHEBUST URL PATH"), &urls));
        output
    }
}

fn bust_entry(
    entry: &mut FileEntry,
    reader: &Reader<'_>,
    storage: StorageMode,
    hash_length: usize,
) -> Result<()> {
    let original = base_name(&entry.source_path).to_string();

    let data = reader.read(&entry.source_path)?;
    let hash = BustHash::truncated(&data, hash_length);
    let busted = hash.filename_for(&original);

    let copy = match storage {
        StorageMode::Disk => {
            let dir = entry.source_dir().to_path_buf();
            remove_stale_copies_except(&dir, &original, hash_length, Some(&busted))?;

            let path = dir.join(&busted);
            fs::write(&path, &data).map_err(|e| BustError::io(IoOp::Write, &path, e))?;
            tracing::debug!(source = %entry.source_path, busted = %path.display(), "wrote busted copy");
            BustedCopy::OnDisk(path)
        }
        StorageMode::Memory | StorageMode::Embedded => {
            tracing::debug!(source = %entry.source_path, busted = %busted, "kept busted copy in memory");
            entry.bytes = Some(data);
            BustedCopy::InMemory(busted.clone())
        }
    };

    entry.busted_copy = Some(copy);
    entry.busted_public_path = Some(urlpath::join(urlpath::dir(&entry.public_path), &busted));
    Ok(())
}

fn render_table(headers: (&str, &str), rows: &[(String, String)]) -> String {
    let width = rows
        .iter()
        .map(|(left, _)| left.len())
        .fold(headers.0.len(), usize::max);

    let mut output = String::new();
    output.push_str(&format!("{:<width$} | {}\n", headers.0, headers.1, width = width));
    for (left, right) in rows {
        output.push_str(&format!("{:<width$} | {}\n", left, right, width = width));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryArchive;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_site(root: &Path) -> anyhow::Result<(String, String)> {
        let css_dir = root.join("static").join("css");
        let js_dir = root.join("static").join("js");
        fs::create_dir_all(&css_dir)?;
        fs::create_dir_all(&js_dir)?;

        let css = css_dir.join("app.css");
        let js = js_dir.join("script.min.js");
        fs::write(&css, "body{}")?;
        fs::write(&js, "console.log(1);")?;

        Ok((css.to_string_lossy().into_owned(), js.to_string_lossy().into_owned()))
    }

    fn archive() -> MemoryArchive {
        MemoryArchive::new()
            .with_file("website/static/css/app.css", "body{}")
            .with_file("website/static/js/script.min.js", "console.log(1);")
    }

    #[test]
    fn test_new_defaults() {
        let registry = Registry::new();
        assert_eq!(registry.hash_length(), DEFAULT_HASH_LENGTH);
        assert_eq!(registry.storage(), StorageMode::Disk);
        assert!(registry.entries().is_empty());
        assert!(!registry.is_disabled());
    }

    #[test]
    fn test_constructors() {
        let entries = || {
            vec![
                FileEntry::new("a.css", "/static/a.css"),
                FileEntry::new("b.js", "/static/b.js"),
            ]
        };
        assert_eq!(Registry::on_disk(entries()).entries().len(), 2);
        assert_eq!(Registry::in_memory(entries()).storage(), StorageMode::Memory);

        let embedded = Registry::embedded(archive(), entries());
        assert_eq!(embedded.storage(), StorageMode::Embedded);
        assert!(embedded.embedded_source().is_some());
    }

    #[test]
    fn test_validate_no_files() {
        let err = Registry::on_disk(vec![]).validate().unwrap_err();
        assert!(matches!(err, BustError::NoFilesRegistered));
    }

    #[test]
    fn test_validate_empty_paths() {
        let err = Registry::on_disk(vec![FileEntry::new(" ", "/static/css/app.css")])
            .validate()
            .unwrap_err();
        assert!(matches!(err, BustError::EmptyPath { index: 0 }));

        let err = Registry::on_disk(vec![
            FileEntry::new("app.css", "/static/css/app.css"),
            FileEntry::new("app.js", "\t"),
        ])
        .validate()
        .unwrap_err();
        assert!(matches!(err, BustError::EmptyPath { index: 1 }));
    }

    #[test]
    fn test_validate_hash_length() {
        let entries = || vec![FileEntry::new("app.css", "/static/css/app.css")];

        let err = Registry::on_disk(entries())
            .with_hash_length(3)
            .validate()
            .unwrap_err();
        assert!(matches!(err, BustError::HashLengthTooShort { given: 3, min: 8 }));

        let mut registry = Registry::on_disk(entries()).with_hash_length(0);
        registry.validate().unwrap();
        assert_eq!(registry.hash_length(), DEFAULT_HASH_LENGTH);

        let mut registry = Registry::on_disk(entries()).with_hash_length(8);
        registry.validate().unwrap();
        assert_eq!(registry.hash_length(), 8);
    }

    #[test]
    fn test_validate_normalises_paths() {
        let mut registry = Registry::new()
            .with_storage(StorageMode::Embedded)
            .with_embedded_source(Arc::new(archive()))
            .with_entries(vec![FileEntry::new(
                r"website\static\css\app.css",
                r"static\css//app.css",
            )]);
        registry.validate().unwrap();

        let entry = &registry.entries()[0];
        assert_eq!(entry.source_path(), "website/static/css/app.css");
        assert_eq!(entry.public_path(), "/static/css/app.css");
    }

    #[test]
    fn test_validate_embedded_requires_source() {
        let err = Registry::new()
            .with_storage(StorageMode::Embedded)
            .with_entries(vec![FileEntry::new("website/app.css", "/app.css")])
            .validate()
            .unwrap_err();
        assert!(matches!(err, BustError::NoEmbeddedSourceProvided));
    }

    #[test]
    fn test_create_on_disk() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let (css, js) = write_site(temp_dir.path())?;

        let mut registry = Registry::on_disk(vec![
            FileEntry::new(&css, "/static/css/app.css"),
            FileEntry::new(&js, "static/js/script.min.js"),
        ]);
        registry.create()?;

        let busted_css = temp_dir.path().join("static/css/7C98040A.app.css");
        assert_eq!(fs::read_to_string(&busted_css)?, "body{}");

        let entry = &registry.entries()[0];
        assert_eq!(entry.busted_copy(), Some(&BustedCopy::OnDisk(busted_css.clone())));
        assert_eq!(entry.busted_public_path(), Some("/static/css/7C98040A.app.css"));
        assert!(entry.bytes().is_none());

        let pairs = registry.filename_pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs["app.css"], "7C98040A.app.css");
        let js_busted = &pairs["script.min.js"];
        assert!(js_busted.ends_with(".script.min.js"));
        assert!(registry.entries()[1]
            .busted_public_path()
            .is_some_and(|p| p.starts_with("/static/js/")));
        Ok(())
    }

    #[test]
    fn test_create_twice_unchanged_content() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let (css, _) = write_site(temp_dir.path())?;

        let mut registry = Registry::on_disk(vec![FileEntry::new(&css, "/static/css/app.css")]);
        registry.create()?;
        let first = registry.filename_pairs();
        registry.create()?;
        let second = registry.filename_pairs();

        assert_eq!(first, second);
        assert!(temp_dir.path().join("static/css/7C98040A.app.css").exists());
        Ok(())
    }

    #[test]
    fn test_create_removes_previous_copy_after_change() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let (css, _) = write_site(temp_dir.path())?;
        let css_dir = temp_dir.path().join("static/css");

        let mut registry = Registry::on_disk(vec![FileEntry::new(&css, "/static/css/app.css")]);
        registry.create()?;
        fs::write(&css, "body{color:red}")?;
        registry.create()?;

        let busted = &registry.filename_pairs()["app.css"];
        assert_ne!(busted, "7C98040A.app.css");
        assert!(!css_dir.join("7C98040A.app.css").exists());
        assert_eq!(fs::read_to_string(css_dir.join(busted))?, "body{color:red}");
        assert!(css_dir.join("app.css").exists());
        Ok(())
    }

    #[test]
    fn test_create_long_hash_uses_full_digest() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let (css, _) = write_site(temp_dir.path())?;

        let mut registry = Registry::in_memory(vec![FileEntry::new(&css, "/static/css/app.css")])
            .with_hash_length(100);
        registry.create()?;

        let busted = &registry.filename_pairs()["app.css"];
        assert_eq!(busted.len(), 64 + ".app.css".len());
        Ok(())
    }

    #[test]
    fn test_create_in_memory() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let (css, _) = write_site(temp_dir.path())?;

        let mut registry = Registry::in_memory(vec![FileEntry::new(&css, "/static/css/app.css")]);
        registry.create()?;

        // Nothing new on disk.
        let files = fs::read_dir(temp_dir.path().join("static/css"))?.count();
        assert_eq!(files, 1);

        let entry = &registry.entries()[0];
        assert_eq!(
            entry.busted_local_path().as_deref(),
            Some("7C98040A.app.css (in memory)")
        );
        assert_eq!(registry.lookup("/static/css/7C98040A.app.css")?, "body{}");
        Ok(())
    }

    #[test]
    fn test_create_embedded() -> anyhow::Result<()> {
        let mut registry = Registry::embedded(
            archive(),
            vec![
                FileEntry::new("/website/static/css/app.css", "/static/css/app.css"),
                FileEntry::new("website/static/js/script.min.js", "/static/js/script.min.js"),
            ],
        );
        registry.create()?;

        assert_eq!(registry.lookup("/static/css/7C98040A.app.css")?, "body{}");
        let js = &registry.filename_pairs()["script.min.js"];
        assert_eq!(registry.lookup(&format!("/static/js/{}", js))?, "console.log(1);");
        Ok(())
    }

    #[test]
    fn test_create_missing_source_keeps_earlier_entries() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let (css, _) = write_site(temp_dir.path())?;
        let missing = temp_dir.path().join("static/css/missing.css");

        let mut registry = Registry::on_disk(vec![
            FileEntry::new(&css, "/static/css/app.css"),
            FileEntry::new(missing.to_string_lossy(), "/static/css/missing.css"),
        ]);
        let err = registry.create().unwrap_err();

        assert!(matches!(err, BustError::Io { op: IoOp::Read, .. }));
        assert!(registry.entries()[0].is_created());
        assert!(!registry.entries()[1].is_created());
        assert!(temp_dir.path().join("static/css/7C98040A.app.css").exists());
        Ok(())
    }

    #[test]
    fn test_create_disabled() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let (css, _) = write_site(temp_dir.path())?;

        let mut registry =
            Registry::on_disk(vec![FileEntry::new(&css, "/static/css/app.css")]).with_disabled(true);
        let err = registry.create().unwrap_err();

        assert!(err.is_disabled());
        assert!(!registry.entries()[0].is_created());
        assert_eq!(fs::read_dir(temp_dir.path().join("static/css"))?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_create_validation_error_propagates() {
        let mut registry = Registry::on_disk(vec![]).with_disabled(true);
        assert!(matches!(registry.create(), Err(BustError::NoFilesRegistered)));
    }

    #[test]
    fn test_create_cancelled() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let (css, _) = write_site(temp_dir.path())?;

        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut registry = Registry::on_disk(vec![FileEntry::new(&css, "/static/css/app.css")]);
        let err = registry.create_with_cancel(&cancel).unwrap_err();

        assert!(matches!(err, BustError::Cancelled));
        assert!(!registry.entries()[0].is_created());
        Ok(())
    }

    #[test]
    fn test_lookup_on_disk_fails_without_search() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let (css, _) = write_site(temp_dir.path())?;

        let mut registry = Registry::on_disk(vec![FileEntry::new(&css, "/static/css/app.css")]);
        registry.create()?;

        let err = registry.lookup("/static/css/7C98040A.app.css").unwrap_err();
        assert!(matches!(err, BustError::FileNotStoredOnDisk));
        Ok(())
    }

    #[test]
    fn test_lookup_not_found() -> anyhow::Result<()> {
        let mut registry = Registry::embedded(
            archive(),
            vec![FileEntry::new("website/static/css/app.css", "/static/css/app.css")],
        );
        registry.create()?;

        // The original URL isn't the busted one, and lookup never normalises.
        assert!(registry.lookup("/static/css/app.css").unwrap_err().is_not_found());
        assert!(registry.lookup("static/css/7C98040A.app.css").unwrap_err().is_not_found());
        Ok(())
    }

    #[test]
    fn test_filename_pairs_last_write_wins() -> anyhow::Result<()> {
        let archive = MemoryArchive::new()
            .with_file("website/a/app.css", "a{}")
            .with_file("website/b/app.css", "b{}");
        let mut registry = Registry::embedded(
            archive,
            vec![
                FileEntry::new("website/a/app.css", "/a/app.css"),
                FileEntry::new("website/b/app.css", "/b/app.css"),
            ],
        );
        registry.create()?;

        let pairs = registry.filename_pairs();
        assert_eq!(pairs.len(), 1);
        assert_eq!(
            Some(pairs["app.css"].as_str()),
            registry.entries()[1].busted_filename()
        );
        Ok(())
    }

    #[test]
    fn test_filename_pairs_skips_uncreated() {
        let registry = Registry::on_disk(vec![FileEntry::new("app.css", "/app.css")]);
        assert!(registry.filename_pairs().is_empty());
    }

    #[test]
    fn test_report() -> anyhow::Result<()> {
        let mut registry = Registry::embedded(
            archive(),
            vec![FileEntry::new("website/static/css/app.css", "/static/css/app.css")],
        );
        registry.create()?;

        let report = registry.report();
        assert!(report.contains("ORIGINAL FILENAME | CACHEBUST FILENAME"));
        assert!(report.contains("app.css           | 7C98040A.app.css (in memory)"));
        assert!(report.contains("/static/css/app.css | /static/css/7C98040A.app.css"));
        Ok(())
    }
}
