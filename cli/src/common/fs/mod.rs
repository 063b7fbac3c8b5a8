//! # deeplink Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! This module groups the filesystem helpers the mirror walker and its
//! executors are built on.
//!
//! ## Architecture
//!
//! - **`copy`**: Single-file copies through `fs_extra`, used when a copy pattern matches.
//! - **`io`**: Entry classification, non-following probes, directory creation, leaf removal, lenient path resolution.
//! - **`links`**: Symbolic and hard link creation and verification of existing links.
//!
//! Callers import the submodule they need, e.g. `crate::common::fs::io::probe`.
//!

/// Single-file copy (`copy_file`).
pub mod copy;
/// Probing, directory creation and path resolution (`probe`, `ensure_dir_exists`, `resolve_lenient`).
pub mod io;
/// Link creation and checks (`create_symlink`, `create_hard_link`, `points_to`).
pub mod links;
