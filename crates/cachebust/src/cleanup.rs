//! Removal of stale busted copies left on disk by earlier runs.
//!
//! A busted copy is named `<HASH>.<original>`, where HASH is exactly
//! `hash_length` chars of `[A-F0-9]`. When the original changes its hash
//! changes too, so the previous copy would otherwise sit in the directory
//! forever. The original itself never matches: it has no hash prefix.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BustError, IoOp, Result};
use crate::hash::{is_hash_char, resolve_hash_length, MIN_HASH_LENGTH};

/// Whether `name` is a busted copy of `original` with a `hash_length` prefix.
///
/// The whole name must match; there is no substring or regex matching.
/// Lengths below [`MIN_HASH_LENGTH`] were never generated and match nothing.
pub fn is_stale_copy(name: &str, original: &str, hash_length: usize) -> bool {
    if hash_length < MIN_HASH_LENGTH
        || original.is_empty()
        || name.len() != hash_length + 1 + original.len()
    {
        return false;
    }

    let bytes = name.as_bytes();
    bytes[..hash_length].iter().copied().all(is_hash_char)
        && bytes[hash_length] == b'.'
        && &name[hash_length + 1..] == original
}

/// Delete every busted copy of `original` in `directory`.
///
/// A `hash_length` of 0 means the default; other lengths below
/// [`MIN_HASH_LENGTH`] fail with `HashLengthTooShort` before anything is
/// touched. Returns the removed paths. Finding nothing is not an error;
/// failing to list the directory or to remove a match is.
pub fn remove_stale_copies(
    directory: &Path,
    original: &str,
    hash_length: usize,
) -> Result<Vec<PathBuf>> {
    let hash_length = resolve_hash_length(hash_length)?;
    remove_stale_copies_except(directory, original, hash_length, None)
}

/// As [`remove_stale_copies`], but leaves `keep` in place.
///
/// Creation passes the name it is about to write so an unchanged file is
/// overwritten rather than deleted and recreated.
pub(crate) fn remove_stale_copies_except(
    directory: &Path,
    original: &str,
    hash_length: usize,
    keep: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let listing = fs::read_dir(directory).map_err(|e| BustError::io(IoOp::ListDir, directory, e))?;

    let mut removed = Vec::new();
    for entry in listing {
        let entry = entry.map_err(|e| BustError::io(IoOp::ListDir, directory, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| BustError::io(IoOp::ListDir, entry.path(), e))?;
        if file_type.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if keep == Some(name) || !is_stale_copy(name, original, hash_length) {
            continue;
        }

        let path = entry.path();
        fs::remove_file(&path).map_err(|e| BustError::io(IoOp::Remove, &path, e))?;
        tracing::debug!(path = %path.display(), "removed stale busted copy");
        removed.push(path);
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_stale_copy() {
        assert!(is_stale_copy("ABCDEF12.style.css", "style.css", 8));
        assert!(is_stale_copy("0123456789.style.css", "style.css", 10));

        // Wrong prefix length either way.
        assert!(!is_stale_copy("ABCDEF12DEAD.style.css", "style.css", 8));
        assert!(!is_stale_copy("ABCDEF1.style.css", "style.css", 8));
        // Lowercase hex was never generated by us.
        assert!(!is_stale_copy("abcdef12.style.css", "style.css", 8));
        // Separator must be a literal dot.
        assert!(!is_stale_copy("ABCDEF12-style.css", "style.css", 8));
        // The original and unrelated names.
        assert!(!is_stale_copy("style.css", "style.css", 8));
        assert!(!is_stale_copy("ABCDEF12.other.css", "style.css", 8));
        assert!(!is_stale_copy("ABCDEF12.style.css.map", "style.css", 8));
        // Too short to have come from creation.
        assert!(!is_stale_copy(".style.css", "style.css", 0));
        assert!(!is_stale_copy("ABC.style.css", "style.css", 3));
    }

    #[test]
    fn test_zero_length_means_default() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let dir = temp_dir.path();
        for name in ["ABCDEF12.style.css", ".style.css", "style.css"] {
            fs::write(dir.join(name), name)?;
        }

        let removed = remove_stale_copies(dir, "style.css", 0)?;

        assert_eq!(removed, vec![dir.join("ABCDEF12.style.css")]);
        assert!(dir.join(".style.css").exists());
        assert!(dir.join("style.css").exists());
        Ok(())
    }

    #[test]
    fn test_short_length_is_rejected() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let dir = temp_dir.path();
        fs::write(dir.join("ABC.style.css"), "old")?;

        let err = remove_stale_copies(dir, "style.css", 3).unwrap_err();
        assert!(matches!(err, BustError::HashLengthTooShort { given: 3, .. }));
        assert!(dir.join("ABC.style.css").exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_failure_is_an_error() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new()?;
        let dir = temp_dir.path().join("locked");
        fs::create_dir(&dir)?;
        fs::write(dir.join("ABCDEF12.style.css"), "old")?;
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555))?;

        // Permission bits don't bind root; nothing to check there.
        let writable = fs::write(dir.join("write-check"), "").is_ok();
        let result = if writable {
            None
        } else {
            Some(remove_stale_copies(&dir, "style.css", 8))
        };
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755))?;

        if let Some(result) = result {
            let err = result.unwrap_err();
            assert!(matches!(err, BustError::Io { op: IoOp::Remove, .. }));
            assert!(dir.join("ABCDEF12.style.css").exists());
        }
        Ok(())
    }

    #[test]
    fn test_removes_only_exact_matches() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let dir = temp_dir.path();
        for name in ["ABCDEF12.style.css", "ABCDEF12DEAD.style.css", "style.css"] {
            fs::write(dir.join(name), name)?;
        }

        let removed = remove_stale_copies(dir, "style.css", 8)?;

        assert_eq!(removed, vec![dir.join("ABCDEF12.style.css")]);
        assert!(!dir.join("ABCDEF12.style.css").exists());
        assert!(dir.join("ABCDEF12DEAD.style.css").exists());
        assert!(dir.join("style.css").exists());
        Ok(())
    }

    #[test]
    fn test_no_matches_is_ok() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("style.css"), "body{}")?;

        let removed = remove_stale_copies(temp_dir.path(), "style.css", 8)?;
        assert!(removed.is_empty());
        Ok(())
    }

    #[test]
    fn test_skips_directories() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        fs::create_dir(temp_dir.path().join("ABCDEF12.style.css"))?;
        fs::write(temp_dir.path().join("12345678.style.css"), "old")?;

        let removed = remove_stale_copies(temp_dir.path(), "style.css", 8)?;
        assert_eq!(removed.len(), 1);
        assert!(temp_dir.path().join("ABCDEF12.style.css").is_dir());
        Ok(())
    }

    #[test]
    fn test_keeps_current_copy() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let dir = temp_dir.path();
        fs::write(dir.join("ABCDEF12.style.css"), "old")?;
        fs::write(dir.join("7C98040A.style.css"), "current")?;

        let removed = remove_stale_copies_except(dir, "style.css", 8, Some("7C98040A.style.css"))?;
        assert_eq!(removed, vec![dir.join("ABCDEF12.style.css")]);
        assert!(dir.join("7C98040A.style.css").exists());
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = remove_stale_copies(&missing, "style.css", 8).unwrap_err();
        assert!(matches!(err, BustError::Io { op: IoOp::ListDir, .. }));
    }
}
