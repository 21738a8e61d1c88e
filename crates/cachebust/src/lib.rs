//! Cache-busted copies of static web assets.
//!
//! Each registered file is hashed (SHA-256, uppercase hex, truncated) and a
//! copy is stored under `<HASH>.<original name>`, either next to the original
//! on disk or in memory. Templates then swap original names for busted ones
//! using [`Registry::filename_pairs`], and browsers never see a stale cached
//! copy after a deploy.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cachebust::{FileEntry, Registry};
//!
//! let mut registry = Registry::on_disk(vec![
//!     FileEntry::new("website/static/css/styles.min.css", "/static/css/styles.min.css"),
//!     FileEntry::new("website/static/js/script.min.js", "/static/js/script.min.js"),
//! ]);
//!
//! match registry.create() {
//!     Ok(()) => {}
//!     Err(e) if e.is_disabled() => {} // development mode
//!     Err(e) => panic!("cache busting failed: {}", e),
//! }
//!
//! // "styles.min.css" -> "1F2E3D4C.styles.min.css"
//! let pairs = registry.filename_pairs();
//! ```
//!
//! # Storage
//!
//! | [`StorageMode`] | originals        | busted copies |
//! |-----------------|------------------|---------------|
//! | `Disk`          | disk             | disk          |
//! | `Memory`        | disk             | memory        |
//! | `Embedded`      | embedded archive | memory        |
//!
//! Memory-held copies are served with [`Registry::lookup`], keyed by the
//! busted URL path (`/static/css/1F2E3D4C.styles.min.css`).
//!
//! # Expected layout
//!
//! ```text
//! website/
//! └── static/
//!     ├── css/styles.min.css
//!     └── js/script.min.js
//! ```

pub mod cleanup;
pub mod config;
pub mod entry;
pub mod error;
pub mod global;
pub mod hash;
pub mod registry;
pub mod shared;
pub mod source;
pub mod storage;
pub mod urlpath;

// Re-exports for convenience
pub use cleanup::{is_stale_copy, remove_stale_copies};
pub use config::{BustConfig, ConfigError, ConfigSources, FileConfig};
pub use entry::{BustedCopy, FileEntry};
pub use error::{BustError, IoOp, Result};
pub use hash::{resolve_hash_length, BustHash, DEFAULT_HASH_LENGTH, MIN_HASH_LENGTH};
pub use registry::Registry;
pub use shared::SharedRegistry;
pub use source::{list_embedded, EmbeddedSource, MemoryArchive};
pub use storage::StorageMode;

#[cfg(feature = "rust-embed")]
pub use source::RustEmbedSource;

pub use tokio_util::sync::CancellationToken;
