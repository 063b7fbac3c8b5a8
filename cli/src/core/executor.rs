//! # deeplink Executors
//!
//! File: cli/src/core/executor.rs
//!
//! ## Overview
//!
//! The walker decides *what* to do with each entry; an `Executor` decides
//! whether it actually happens. `FsExecutor` performs the changes,
//! `DryRunExecutor` prints one line per planned change and leaves the
//! filesystem alone. Every read-only check (conflicts, existing links) runs
//! in the walker, so a dry run reports the same errors a real run would hit.
//!
//! ## Dry-run output
//!
//! ```text
//! mkdir /abs/mirror/subdir
//! link /abs/src/subdir/file2 /abs/mirror/subdir/file2
//! hardlink /abs/src/file1 /abs/mirror/file1
//! copy /abs/src/app.ini /abs/mirror/app.ini
//! remove /abs/mirror/stale
//! ```
//!
use crate::common::fs::{copy, io as fsio, links};
use crate::core::error::{DeeplinkError, Result};
use std::io::Write;
use std::path::Path;

/// Filesystem mutations performed during a mirror run.
pub trait Executor {
    /// Creates `path` as a directory; its parent must exist.
    fn create_dir(&mut self, path: &Path) -> Result<()>;
    /// Creates a symbolic link at `link` with content `target`.
    fn symlink(&mut self, target: &Path, link: &Path) -> Result<()>;
    /// Creates a hard link at `link` to `original`.
    fn hard_link(&mut self, original: &Path, link: &Path) -> Result<()>;
    /// Copies the regular file `source` to `target`.
    fn copy_file(&mut self, source: &Path, target: &Path) -> Result<()>;
    /// Removes the file or link at `path`.
    fn remove(&mut self, path: &Path) -> Result<()>;
}

/// Applies every action to the filesystem.
#[derive(Debug, Default)]
pub struct FsExecutor;

impl Executor for FsExecutor {
    fn create_dir(&mut self, path: &Path) -> Result<()> {
        fsio::ensure_dir_exists(path).map(|_| ())
    }

    fn symlink(&mut self, target: &Path, link: &Path) -> Result<()> {
        links::create_symlink(target, link)
    }

    fn hard_link(&mut self, original: &Path, link: &Path) -> Result<()> {
        links::create_hard_link(original, link)
    }

    fn copy_file(&mut self, source: &Path, target: &Path) -> Result<()> {
        copy::copy_file(source, target).map(|_| ())
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        fsio::remove_leaf(path)
    }
}

/// Prints each action instead of performing it.
#[derive(Debug)]
pub struct DryRunExecutor<W: Write> {
    out: W,
}

impl<W: Write> DryRunExecutor<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the writer, e.g. to inspect a `Vec<u8>` in tests.
    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, action: &str, paths: &[&Path]) -> Result<()> {
        let rendered: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        writeln!(self.out, "{} {}", action, rendered.join(" "))
            .map_err(|e| DeeplinkError::io("write dry-run output for", paths[0], e))?;
        Ok(())
    }
}

impl<W: Write> Executor for DryRunExecutor<W> {
    fn create_dir(&mut self, path: &Path) -> Result<()> {
        self.emit("mkdir", &[path])
    }

    fn symlink(&mut self, target: &Path, link: &Path) -> Result<()> {
        self.emit("link", &[target, link])
    }

    fn hard_link(&mut self, original: &Path, link: &Path) -> Result<()> {
        self.emit("hardlink", &[original, link])
    }

    fn copy_file(&mut self, source: &Path, target: &Path) -> Result<()> {
        self.emit("copy", &[source, target])
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        self.emit("remove", &[path])
    }
}
