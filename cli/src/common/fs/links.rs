//! # deeplink Filesystem Link Operations
//!
//! File: cli/src/common/fs/links.rs
//!
//! ## Overview
//!
//! This module provides the link primitives the mirror is built from:
//! creating symbolic and hard links, computing relative link targets, and
//! deciding whether a link already in the destination points where it should.
//!
//! ## Architecture
//!
//! - **`create_symlink`**: Platform-specific symbolic link creation (`std::os::unix::fs::symlink`, or `symlink_file`/`symlink_dir` on Windows).
//! - **`create_hard_link`**: `std::fs::hard_link`. Links across devices fail; there is no copy fallback.
//! - **`relative_target`**: Path from the link's directory to the source, via `pathdiff`.
//! - **`points_to`**: Resolves an existing link relative to its own directory and compares it with the expected source, first lexically and then by canonical path.
//! - **`is_same_file`**: Device and inode comparison used to recognise existing hard links.
//!
//! None of these functions inspect conflict policy; the walker decides what
//! to do with an occupied path before calling them.
//!
use crate::common::fs::io::normalize_lexically;
use crate::core::error::{DeeplinkError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Creates a symbolic link at `link` whose content is `target`.
///
/// `target` is written verbatim, so a relative target is resolved against
/// the directory containing `link`.
///
/// # Errors
///
/// * `PermissionDenied` / `Io` if the link cannot be created (for example
///   because something already occupies `link`).
/// * `Io` with `Unsupported` on platforms other than Unix and Windows.
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
            .map_err(|e| DeeplinkError::io("create symbolic link", link, e))?;
    }
    #[cfg(windows)]
    {
        // Windows requires different functions for file vs. directory links.
        let result = if link
            .parent()
            .map_or(target.to_path_buf(), |parent| parent.join(target))
            .is_dir()
        {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        };
        result.map_err(|e| DeeplinkError::io("create symbolic link", link, e))?;
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = target;
        return Err(DeeplinkError::io(
            "create symbolic link",
            link,
            std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "symbolic links are not supported on this platform",
            ),
        )
        .into());
    }
    debug!("Created symlink: {:?} -> {:?}", link, target);
    Ok(())
}

/// Creates a hard link at `link` sharing the inode of `original`.
///
/// # Errors
///
/// `PermissionDenied` / `Io` if the link cannot be created, including the
/// cross-device case.
pub fn create_hard_link(original: &Path, link: &Path) -> Result<()> {
    fs::hard_link(original, link).map_err(|e| DeeplinkError::io("create hard link", link, e))?;
    debug!("Created hard link: {:?} => {:?}", link, original);
    Ok(())
}

/// Computes the symlink content that makes `link` resolve to `source`
/// through a relative path.
///
/// Both paths must be absolute. Falls back to `source` itself when no
/// relative path exists (different prefixes on Windows).
pub fn relative_target(source: &Path, link: &Path) -> PathBuf {
    link.parent()
        .and_then(|parent| pathdiff::diff_paths(source, parent))
        .unwrap_or_else(|| source.to_path_buf())
}

/// Returns `true` if the symbolic link at `link` resolves to `expected`.
///
/// The link's content is joined onto the link's directory and compared with
/// `expected` lexically, which also handles links to dangling or
/// symlinked sources. If that fails, both sides are canonicalized.
pub fn points_to(link: &Path, expected: &Path) -> bool {
    let raw_target = match fs::read_link(link) {
        Ok(target) => target,
        Err(_) => return false,
    };
    let link_dir = link.parent().unwrap_or_else(|| Path::new("."));
    let resolved = link_dir.join(&raw_target);
    debug!(
        "Existing link {:?} has content {:?} (resolved {:?}), expected {:?}",
        link, raw_target, resolved, expected
    );

    if normalize_lexically(&resolved) == normalize_lexically(expected) {
        return true;
    }
    match (resolved.canonicalize(), expected.canonicalize()) {
        (Ok(actual), Ok(wanted)) => actual == wanted,
        _ => false,
    }
}

/// Returns `true` if `a` and `b` are the same filesystem object (hard links
/// of each other). Links are not followed.
#[cfg(unix)]
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

/// Without inode access an existing hard link is never recognised, so the
/// conflict policy decides.
#[cfg(not(unix))]
pub fn is_same_file(_a: &Path, _b: &Path) -> bool {
    false
}
