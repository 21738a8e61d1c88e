//! Where originals are read from and where busted copies are kept.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage mode for a registry.
///
/// | mode       | originals read from | busted copies kept |
/// |------------|---------------------|--------------------|
/// | `Disk`     | disk                | disk, next to the original |
/// | `Memory`   | disk                | process memory     |
/// | `Embedded` | embedded archive    | process memory     |
///
/// An embedded archive is read-only, so there is no "embedded, copies on
/// disk" mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Disk,
    Memory,
    Embedded,
}

impl StorageMode {
    /// True when busted copies live in memory and can be served by lookup.
    pub fn in_memory(self) -> bool {
        match self {
            StorageMode::Disk => false,
            StorageMode::Memory | StorageMode::Embedded => true,
        }
    }

    /// Value for the `X-Static-Served-From` header on fall-through responses.
    pub fn fallback_origin(self) -> &'static str {
        match self {
            StorageMode::Disk | StorageMode::Memory => "disk",
            StorageMode::Embedded => "embedded",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StorageMode::Disk => "disk",
            StorageMode::Memory => "memory",
            StorageMode::Embedded => "embedded",
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disk" => Ok(StorageMode::Disk),
            "memory" => Ok(StorageMode::Memory),
            "embedded" => Ok(StorageMode::Embedded),
            other => Err(format!(
                "unknown storage mode {:?}, expected disk, memory or embedded",
                other
            )),
        }
    }
}
