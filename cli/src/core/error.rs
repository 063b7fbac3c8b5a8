//! # deeplink Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error kinds surfaced by a mirror run and the
//! process exit codes they map to. Every kind names the failing path so the
//! message printed by `main` is enough to locate the problem.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `DeeplinkError`: A custom error enum using `thiserror` for the specific kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! Kinds are grouped by exit code:
//! - `1` (invalid arguments): `InvalidSource`, `InvalidDestination`,
//!   `InvalidPattern`, `PatternFile`, plus clap usage errors
//! - `2` (filesystem errors): `DestinationConflict`, `PermissionDenied`,
//!   `UnsupportedEntry`, `Io`, `Walk`, `Incomplete`
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error kind
//! if !meta.is_dir() {
//!     bail!(DeeplinkError::InvalidSource {
//!         path: source.to_path_buf(),
//!         reason: "not a directory".into(),
//!     });
//! }
//!
//! // Pick the exit code for whatever reached `main`
//! let code = exit_code(&err);
//! ```
//!
use crate::common::fs::io::EntryKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status for usage errors and unusable source/destination/pattern input.
pub const EXIT_INVALID_ARGS: i32 = 1;
/// Exit status for failures while reading the source or writing the mirror.
pub const EXIT_FS_ERROR: i32 = 2;

/// Error kinds produced while validating input and mirroring a tree.
#[derive(Error, Debug)]
pub enum DeeplinkError {
    #[error("Invalid source '{}': {reason}", path.display())]
    InvalidSource { path: PathBuf, reason: String },

    #[error("Invalid destination '{}': {reason}", path.display())]
    InvalidDestination { path: PathBuf, reason: String },

    #[error("Destination conflict at '{}': a {existing} is already there", path.display())]
    DestinationConflict { path: PathBuf, existing: EntryKind },

    #[error("Permission denied: cannot {op} '{}'", path.display())]
    PermissionDenied { path: PathBuf, op: &'static str },

    #[error("Unsupported entry '{}': {kind} entries are rejected", path.display())]
    UnsupportedEntry { path: PathBuf, kind: EntryKind },

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Cannot read pattern list file '{}': {source}", path.display())]
    PatternFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to {op} '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        op: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Failed to traverse source tree")]
    Walk {
        #[from]
        source: walkdir::Error,
    },

    #[error("Mirror incomplete: {failed} entries failed")]
    Incomplete { failed: usize },
}

impl DeeplinkError {
    /// Wraps an I/O error for `op` on `path`, promoting permission failures
    /// to `PermissionDenied`.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::PermissionDenied {
            DeeplinkError::PermissionDenied { path, op }
        } else {
            DeeplinkError::Io { path, op, source }
        }
    }

    /// Process exit status for this kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeeplinkError::InvalidSource { .. }
            | DeeplinkError::InvalidDestination { .. }
            | DeeplinkError::InvalidPattern { .. }
            | DeeplinkError::PatternFile { .. } => EXIT_INVALID_ARGS,
            DeeplinkError::DestinationConflict { .. }
            | DeeplinkError::PermissionDenied { .. }
            | DeeplinkError::UnsupportedEntry { .. }
            | DeeplinkError::Io { .. }
            | DeeplinkError::Walk { .. }
            | DeeplinkError::Incomplete { .. } => EXIT_FS_ERROR,
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// `DeeplinkError` values travel inside it and are recovered with `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;

/// Finds the first `DeeplinkError` in the chain and returns its exit code.
/// Errors that carry no kind (unexpected I/O surfaced through context) are
/// treated as filesystem errors.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    kind_of(err).map_or(EXIT_FS_ERROR, DeeplinkError::exit_code)
}

/// Returns the `DeeplinkError` carried by `err`, looking through any context layers.
pub fn kind_of(err: &anyhow::Error) -> Option<&DeeplinkError> {
    err.chain().find_map(|cause| cause.downcast_ref::<DeeplinkError>())
}
