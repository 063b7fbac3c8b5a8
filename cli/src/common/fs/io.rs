//! # deeplink Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the low-level filesystem operations the mirror
//! walker needs: classifying entries, probing a destination path without
//! following links, creating and removing entries, reading pattern list
//! files, and resolving a destination path that may not exist yet.
//!
//! ## Architecture
//!
//! - **`EntryKind`**: Classification of a filesystem object (directory, file, symbolic link, other).
//! - **`probe`**: `symlink_metadata` that turns "not found" into `None`, so a dangling link still counts as occupying its path.
//! - **`ensure_dir_exists`**: Creates a directory unless one is already there; any other object is a `DestinationConflict`. Parents are never created.
//! - **`remove_leaf`**: Removes a file or link that is about to be replaced. Never removes a real directory.
//! - **`read_file_to_string`**: Reads a file with the path attached to the error.
//! - **`resolve_lenient`**: Canonical form of a path whose tail may not exist yet.
//!
//! Every failure is reported as a `DeeplinkError` carrying the path and the
//! operation, so permission problems surface as `PermissionDenied`.
//!
use crate::core::error::{DeeplinkError, Result};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// What kind of filesystem object sits at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    /// Sockets, FIFOs, block and character devices.
    Other,
}

impl From<fs::FileType> for EntryKind {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Directory => "directory",
            EntryKind::File => "file",
            EntryKind::Symlink => "symbolic link",
            EntryKind::Other => "special file",
        };
        f.write_str(name)
    }
}

/// Returns the metadata of whatever occupies `path`, without following links.
///
/// # Returns
///
/// * `Ok(None)` if nothing is there.
/// * `Ok(Some(metadata))` for any object, including dangling symbolic links.
///
/// # Errors
///
/// Any failure other than "not found" (e.g. permission denied on a parent).
pub fn probe(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::symlink_metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(DeeplinkError::io("inspect", path, e).into()),
    }
}

/// Ensures that a directory exists at the specified path.
///
/// If nothing is at `path`, the directory is created (like a plain `mkdir`);
/// its parent must already exist. A symbolic link is not accepted as a directory,
/// even one pointing at a directory: writing through it would place mirror
/// entries outside the destination tree.
///
/// # Returns
///
/// * `Ok(true)` if the directory was created, `Ok(false)` if it already existed.
///
/// # Errors
///
/// * `DestinationConflict` if a non-directory occupies `path`.
/// * `PermissionDenied` / `Io` if creation fails.
pub fn ensure_dir_exists(path: &Path) -> Result<bool> {
    match probe(path)? {
        Some(meta) if meta.is_dir() => {
            debug!("Directory already exists: {:?}", path);
            Ok(false)
        }
        Some(meta) => Err(DeeplinkError::DestinationConflict {
            path: path.to_path_buf(),
            existing: EntryKind::from(meta.file_type()),
        }
        .into()),
        None => {
            fs::create_dir(path).map_err(|e| DeeplinkError::io("create directory", path, e))?;
            info!("Created directory: {:?}", path);
            Ok(true)
        }
    }
}

/// Removes the file or link at `path` so a new entry can take its place.
///
/// # Errors
///
/// * `DestinationConflict` if `path` is a real directory.
/// * `PermissionDenied` / `Io` if removal fails.
pub fn remove_leaf(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| DeeplinkError::io("inspect", path, e))?;
    if meta.is_dir() {
        return Err(DeeplinkError::DestinationConflict {
            path: path.to_path_buf(),
            existing: EntryKind::Directory,
        }
        .into());
    }
    // Directory symlinks on Windows are removed like directories.
    #[cfg(windows)]
    {
        if meta.file_type().is_symlink() && path.is_dir() {
            fs::remove_dir(path).map_err(|e| DeeplinkError::io("remove", path, e))?;
            return Ok(());
        }
    }
    fs::remove_file(path).map_err(|e| DeeplinkError::io("remove", path, e))?;
    debug!("Removed {:?}", path);
    Ok(())
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// `PatternFile` if the file cannot be opened or read; this helper is only
/// used for ignore/copy list files.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| {
        DeeplinkError::PatternFile {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Resolves `path` to an absolute canonical form even if its tail does not exist.
///
/// The path is made absolute against the current directory and `.`/`..` are
/// folded lexically. The longest existing ancestor is then canonicalized and
/// the missing components are appended unchanged.
pub fn resolve_lenient(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| DeeplinkError::io("read current directory", ".", e))?;
        cwd.join(path)
    };
    let normalized = normalize_lexically(&absolute);

    let mut existing = normalized.as_path();
    let mut missing = Vec::new();
    while fs::symlink_metadata(existing).is_err() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = fs::canonicalize(existing)
        .map_err(|e| DeeplinkError::io("resolve", existing, e))?;
    for name in missing.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

/// Folds `.` and `..` components without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
