//! SharedRegistry: a registry that HTTP handlers can read while a redeploy
//! regenerates it.
//!
//! Lookups and pair exports take the read lock; creation takes the write lock,
//! so readers never see an entry half way through being busted.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::registry::Registry;
use crate::storage::StorageMode;

/// The lock is a blocking `std::sync::RwLock`. Async handlers take the read
/// side directly, which is fine while `create` runs before serving starts.
/// Regenerating under live traffic holds the write lock for the whole file
/// I/O pass and stalls every runtime worker waiting on a lookup; run it on a
/// blocking thread and expect lookups to wait for it.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Read access. A panic in another holder doesn't invalidate the data.
    pub fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Swap in a new registry, returning the old one.
    pub fn replace(&self, registry: Registry) -> Registry {
        std::mem::replace(&mut *self.write(), registry)
    }

    pub fn create(&self) -> Result<()> {
        self.write().create()
    }

    pub fn create_with_cancel(&self, cancel: &CancellationToken) -> Result<()> {
        self.write().create_with_cancel(cancel)
    }

    /// Owned bytes for `request_path`; the clone is a refcount bump.
    pub fn lookup(&self, request_path: &str) -> Result<Bytes> {
        self.read().lookup(request_path).cloned()
    }

    pub fn filename_pairs(&self) -> HashMap<String, String> {
        self.read().filename_pairs()
    }

    pub fn storage(&self) -> StorageMode {
        self.read().storage()
    }

    pub fn report(&self) -> String {
        self.read().report()
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
