//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use cachebust::{
    list_embedded, remove_stale_copies, resolve_hash_length, BustConfig, ConfigSources,
    MemoryArchive, Registry, StorageMode,
};

/// Flags that override whatever the config files and environment say.
#[derive(Debug, Default)]
pub struct Overrides {
    pub hash_length: Option<usize>,
    pub storage: Option<StorageMode>,
    pub disabled: bool,
    pub debug: bool,
}

/// Load the layered config, then apply command line flags on top.
pub fn load_config(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<(BustConfig, ConfigSources)> {
    if let Some(path) = path {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
    }

    let (mut config, sources) =
        BustConfig::load_with_sources_from(path).context("Failed to load configuration")?;

    if let Some(hash_length) = overrides.hash_length {
        config.hash_length = hash_length;
    }
    if let Some(storage) = overrides.storage {
        config.storage = storage;
    }
    config.disabled |= overrides.disabled;
    config.debug |= overrides.debug;

    Ok((config, sources))
}

/// Build a registry for `config`.
///
/// There is no compiled-in archive in the command line tool, so embedded
/// storage loads the static root into memory under the embedded root prefix.
pub fn build_registry(config: &BustConfig) -> Result<Registry> {
    let registry = config.to_registry();
    if config.storage != StorageMode::Embedded {
        return Ok(registry);
    }

    let archive = MemoryArchive::from_dir(&config.static_root, &config.embedded_root)
        .with_context(|| format!("Failed to load {}", config.static_root.display()))?;
    tracing::debug!(files = archive.len(), "loaded embedded archive");
    Ok(registry.with_embedded_source(Arc::new(archive)))
}

/// Run creation and print the resulting pairs.
pub fn create(config: &BustConfig, json: bool) -> Result<()> {
    let mut registry = build_registry(config)?;

    match registry.create() {
        Ok(()) => {}
        Err(e) if e.is_disabled() => {
            tracing::info!("Cache busting disabled, templates keep original names");
        }
        Err(e) => return Err(e).context("Cache busting failed"),
    }

    if json {
        let pairs = registry.filename_pairs();
        println!("{}", serde_json::to_string_pretty(&pairs)?);
    } else {
        println!("{}", registry.report());
    }
    Ok(())
}

/// Remove busted copies of `file` left over from earlier runs.
///
/// `hash_length` follows the config rules: 0 is the default length.
pub fn clean(file: &Path, hash_length: usize) -> Result<()> {
    let hash_length = resolve_hash_length(hash_length)
        .with_context(|| format!("Invalid hash length for cleaning {}", file.display()))?;
    let Some(name) = file.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        bail!("Not a file: {}", file.display());
    };
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let removed = remove_stale_copies(dir, &name, hash_length)?;
    for path in &removed {
        println!("removed {}", path.display());
    }
    if removed.is_empty() {
        println!("no stale copies of {}", name);
    }
    Ok(())
}

/// List what an embedded archive built from `dir` would contain.
pub fn embedded(dir: &Path, prefix: &str) -> Result<()> {
    let archive = MemoryArchive::from_dir(dir, prefix)
        .with_context(|| format!("Failed to load {}", dir.display()))?;
    let paths = list_embedded(&archive);
    println!("{} embedded files", paths.len());
    Ok(())
}

pub fn show_config(config: &BustConfig, sources: &ConfigSources) -> Result<()> {
    if sources.files.is_empty() {
        println!("# no config files found, using defaults");
    }
    for file in &sources.files {
        println!("# from {}", file.display());
    }
    for var in &sources.env_overrides {
        println!("# env {}", var);
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
