//! # deeplink Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Files matched by a copy pattern (`--copy`, `--copy-list-file`) are copied
//! into the mirror instead of linked, so they can be edited without touching
//! the source. This module wraps the `fs_extra` single-file copy used for that.
//!
use crate::core::error::{DeeplinkError, Result};
use std::io;
use std::path::Path;
use tracing::debug;

/// Copies the regular file at `source` to `target`.
///
/// `target` must not exist; the walker removes or rejects occupants before
/// calling this, according to the conflict policy.
///
/// # Returns
///
/// * `Result<u64>` - Number of bytes copied.
///
/// # Errors
///
/// * `PermissionDenied` if either side refuses access.
/// * `Io` for any other failure, including an occupied `target`.
pub fn copy_file(source: &Path, target: &Path) -> Result<u64> {
    let mut options = fs_extra::file::CopyOptions::new();
    options.overwrite = false;
    options.skip_exist = false;

    let copied = fs_extra::file::copy(source, target, &options).map_err(|e| {
        let kind = match e.kind {
            fs_extra::error::ErrorKind::PermissionDenied => io::ErrorKind::PermissionDenied,
            fs_extra::error::ErrorKind::NotFound => io::ErrorKind::NotFound,
            fs_extra::error::ErrorKind::AlreadyExists => io::ErrorKind::AlreadyExists,
            _ => io::ErrorKind::Other,
        };
        DeeplinkError::io("copy file to", target, io::Error::new(kind, e.to_string()))
    })?;
    debug!("Copied {} bytes from {:?} to {:?}", copied, source, target);
    Ok(copied)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_copy_file_contents_are_independent() -> Result<()> {
        let dir = tempdir()?;
        let source = dir.path().join("settings.ini");
        let target = dir.path().join("copy.ini");
        fs::write(&source, "mode=fast")?;

        let copied = copy_file(&source, &target)?;
        assert_eq!(copied, "mode=fast".len() as u64);
        assert!(!target.is_symlink());

        fs::write(&target, "mode=slow")?;
        assert_eq!(fs::read_to_string(&source)?, "mode=fast");
        Ok(())
    }

    #[test]
    fn test_copy_file_refuses_existing_target() -> Result<()> {
        let dir = tempdir()?;
        let source = dir.path().join("a");
        let target = dir.path().join("b");
        fs::write(&source, "new")?;
        fs::write(&target, "old")?;

        let err = copy_file(&source, &target).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeeplinkError>(),
            Some(DeeplinkError::Io { .. })
        ));
        assert_eq!(fs::read_to_string(&target)?, "old");
        Ok(())
    }
}
