//! Process-wide registry for apps that want cache busting as ambient state.
//!
//! Every function here goes through one [`SharedRegistry`], so the usual
//! locking applies: setters and `create` are exclusive, lookups are shared.
//!
//! ```rust,no_run
//! use cachebust::{global, FileEntry};
//!
//! global::configure_on_disk(vec![FileEntry::new(
//!     "website/static/css/styles.min.css",
//!     "/static/css/styles.min.css",
//! )]);
//! global::set_hash_length(12);
//! global::create().unwrap();
//! let pairs = global::filename_pairs();
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use bytes::Bytes;

use crate::entry::FileEntry;
use crate::error::Result;
use crate::registry::Registry;
use crate::shared::SharedRegistry;
use crate::source::EmbeddedSource;
use crate::storage::StorageMode;

static GLOBAL: OnceLock<SharedRegistry> = OnceLock::new();

/// The process-wide registry, created empty on first use.
pub fn registry() -> &'static SharedRegistry {
    GLOBAL.get_or_init(SharedRegistry::default)
}

/// Replace the process-wide registry.
pub fn install(registry: Registry) {
    self::registry().replace(registry);
}

pub fn configure_on_disk(entries: impl IntoIterator<Item = FileEntry>) {
    install(Registry::on_disk(entries));
}

pub fn configure_in_memory(entries: impl IntoIterator<Item = FileEntry>) {
    install(Registry::in_memory(entries));
}

pub fn configure_embedded(
    source: impl EmbeddedSource + 'static,
    entries: impl IntoIterator<Item = FileEntry>,
) {
    install(Registry::embedded(source, entries));
}

pub fn push(entry: FileEntry) {
    registry().write().push(entry);
}

pub fn set_hash_length(hash_length: usize) {
    registry().write().set_hash_length(hash_length);
}

pub fn set_storage(storage: StorageMode) {
    registry().write().set_storage(storage);
}

pub fn set_disabled(disabled: bool) {
    registry().write().set_disabled(disabled);
}

pub fn set_debug(debug: bool) {
    registry().write().set_debug(debug);
}

pub fn create() -> Result<()> {
    registry().create()
}

pub fn lookup(request_path: &str) -> Result<Bytes> {
    registry().lookup(request_path)
}

pub fn filename_pairs() -> HashMap<String, String> {
    registry().filename_pairs()
}
