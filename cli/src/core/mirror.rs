//! # deeplink Mirror Walker
//!
//! File: cli/src/core/mirror.rs
//!
//! ## Overview
//!
//! This module implements the mirror itself: a depth-first walk of the
//! source tree that recreates every directory under the destination and
//! replaces every other entry with a link back to the original.
//!
//! ## Architecture
//!
//! A run goes through these steps:
//! 1. **Validate the source**: It must be an existing directory; it is canonicalized so every walked path is absolute.
//! 2. **Resolve the destination**: It must be absent or a directory, and must not be the source or one of its ancestors. Nothing is created before these checks pass.
//! 3. **Create the destination** (its parent must already exist) and take its canonical path as the *excluded path*.
//! 4. **Walk** the source with `walkdir`, sorted by file name, directories before their children. For each entry:
//!    - skip it (and its subtree) if it resolves to the excluded path or matches an ignore pattern;
//!    - directories: reuse an existing directory or create one; anything else there is a `DestinationConflict`;
//!    - other entries: leave an already-correct link alone, otherwise apply the conflict policy and link (or copy) it.
//!
//!    When following symlinks, walkdir reports a dangling link as an error; it is
//!    mirrored as a leaf all the same.
//! 5. **Return `MirrorStats`**.
//!
//! With `keep_going`, per-entry errors are logged and counted in
//! `MirrorStats::failed`; the subtree of a failed directory is skipped.
//! Otherwise the first error aborts the run. Nothing is rolled back: a
//! re-run reuses existing directories and counts correct links as unchanged.
//!
//! ## Examples
//!
//! ```rust
//! let stats = mirror::mirror(Path::new("photos"), Path::new("photos-view"), &MirrorOptions::default())?;
//! println!("{} links created", stats.links_created);
//! ```
//!
use crate::common::fs::io::{self as fsio, EntryKind};
use crate::common::fs::links;
use crate::core::config::{ConflictPolicy, LinkStyle, MirrorOptions, SpecialPolicy, SymlinkPolicy};
use crate::core::error::{DeeplinkError, Result};
use crate::core::executor::{DryRunExecutor, Executor, FsExecutor};
use anyhow::{bail, Context};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Counters describing what a mirror run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorStats {
    /// Directories created under the destination (the root included).
    pub dirs_created: usize,
    /// Directories that already existed and were reused.
    pub dirs_existing: usize,
    /// Symbolic or hard links created (replacements included).
    pub links_created: usize,
    /// Files copied because a copy pattern matched (replacements included).
    pub files_copied: usize,
    /// Links that already pointed at the right source.
    pub unchanged: usize,
    /// Occupied paths cleared by the overwrite policy.
    pub replaced: usize,
    /// Entries skipped because they resolve to the destination root.
    pub skipped_excluded: usize,
    /// Entries skipped by an ignore pattern.
    pub skipped_ignored: usize,
    /// Entries skipped by the skip policy.
    pub skipped_conflict: usize,
    /// Entries that failed while `keep_going` was set.
    pub failed: usize,
}

impl MirrorStats {
    /// All skipped entries: self-exclusion, ignore patterns and skip policy.
    pub fn skipped(&self) -> usize {
        self.skipped_excluded + self.skipped_ignored + self.skipped_conflict
    }
}

/// Whether the walker should descend into the entry it just handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Descend,
    Prune,
}

/// Mirrors `source` into `destination`, applying changes to the filesystem
/// or, with `options.dry_run`, printing them to stdout.
pub fn mirror(source: &Path, destination: &Path, options: &MirrorOptions) -> Result<MirrorStats> {
    if options.dry_run {
        let stdout = io::stdout();
        let mut executor = DryRunExecutor::new(stdout.lock());
        mirror_with(source, destination, options, &mut executor)
    } else {
        mirror_with(source, destination, options, &mut FsExecutor)
    }
}

/// Mirrors `source` into `destination` through the given executor.
///
/// # Errors
///
/// * `InvalidSource` if `source` is missing or not a directory.
/// * `InvalidDestination` if `destination` exists as a non-directory, is
///   the source itself or one of its ancestors, or is missing along with its
///   parent. Nothing is created.
/// * Without `keep_going`, the first entry error (`DestinationConflict`,
///   `PermissionDenied`, `UnsupportedEntry`, `Io`, `Walk`).
pub fn mirror_with<E: Executor>(
    source: &Path,
    destination: &Path,
    options: &MirrorOptions,
    executor: &mut E,
) -> Result<MirrorStats> {
    let source_root = validate_source(source)?;
    let planned_root = resolve_destination(destination)?;
    if source_root.starts_with(&planned_root) {
        bail!(DeeplinkError::InvalidDestination {
            path: destination.to_path_buf(),
            reason: "it is the source directory or contains it".into(),
        });
    }

    info!(
        "Mirroring {:?} into {:?}",
        source_root.display(),
        planned_root.display()
    );

    let mut stats = MirrorStats::default();
    if fsio::probe(&planned_root)?.is_none() {
        let parent_missing = match planned_root.parent() {
            Some(parent) => fsio::probe(parent)?.is_none(),
            None => false,
        };
        if parent_missing {
            bail!(DeeplinkError::InvalidDestination {
                path: destination.to_path_buf(),
                reason: "its parent directory does not exist".into(),
            });
        }
        executor.create_dir(&planned_root)?;
        stats.dirs_created += 1;
    }
    // A dry run leaves a missing root missing; the planned path stands in.
    let excluded = fs::canonicalize(&planned_root).unwrap_or(planned_root);
    debug!("Excluded path: {:?}", excluded);

    let walker = MirrorWalker {
        source_root,
        dest_root: excluded,
        options,
    };
    walker.run(executor, &mut stats)?;

    info!("Mirror finished: {:?}", stats);
    Ok(stats)
}

fn validate_source(source: &Path) -> Result<PathBuf> {
    let meta = match fs::metadata(source) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => bail!(DeeplinkError::InvalidSource {
            path: source.to_path_buf(),
            reason: "does not exist".into(),
        }),
        Err(e) => return Err(DeeplinkError::io("inspect", source, e).into()),
    };
    if !meta.is_dir() {
        bail!(DeeplinkError::InvalidSource {
            path: source.to_path_buf(),
            reason: "not a directory".into(),
        });
    }
    fs::canonicalize(source)
        .map_err(|e| DeeplinkError::io("resolve", source, e))
        .with_context(|| format!("Failed to resolve source directory {:?}", source))
}

/// Canonical form of the destination root, whether or not it exists yet.
fn resolve_destination(destination: &Path) -> Result<PathBuf> {
    match fs::metadata(destination) {
        Ok(meta) if meta.is_dir() => fs::canonicalize(destination)
            .map_err(|e| DeeplinkError::io("resolve", destination, e).into()),
        Ok(_) => bail!(DeeplinkError::InvalidDestination {
            path: destination.to_path_buf(),
            reason: "exists and is not a directory".into(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if fs::symlink_metadata(destination).is_ok() {
                bail!(DeeplinkError::InvalidDestination {
                    path: destination.to_path_buf(),
                    reason: "is a dangling symbolic link".into(),
                });
            }
            fsio::resolve_lenient(destination)
        }
        Err(e) => Err(DeeplinkError::io("inspect", destination, e).into()),
    }
}

/// Unreadable directories surface as `PermissionDenied`; loops and other
/// traversal failures as `Walk`.
fn walk_error(e: walkdir::Error) -> DeeplinkError {
    let denied = e
        .io_error()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::PermissionDenied);
    if let Some(path) = e.path().filter(|_| denied).map(Path::to_path_buf) {
        return DeeplinkError::PermissionDenied {
            path,
            op: "read directory",
        };
    }
    DeeplinkError::from(e)
}

/// The path of a dangling symbolic link that walkdir failed to follow.
fn dangling_link(e: &walkdir::Error) -> Option<PathBuf> {
    let path = e.path()?;
    let is_link = fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink());
    let target_missing = matches!(fs::metadata(path), Err(err) if err.kind() == io::ErrorKind::NotFound);
    (is_link && target_missing).then(|| path.to_path_buf())
}

/// State shared by every entry of one run.
struct MirrorWalker<'a> {
    source_root: PathBuf,
    /// Canonical destination root; also the excluded path.
    dest_root: PathBuf,
    options: &'a MirrorOptions,
}

impl MirrorWalker<'_> {
    fn run<E: Executor>(&self, executor: &mut E, stats: &mut MirrorStats) -> Result<()> {
        let follow = self.options.symlinks == SymlinkPolicy::Follow;
        let mut entries = WalkDir::new(&self.source_root)
            .min_depth(1)
            .follow_links(follow)
            .sort_by_file_name()
            .into_iter();

        while let Some(next) = entries.next() {
            let entry = match next {
                Ok(entry) => entry,
                Err(e) => {
                    let dangling = if follow { dangling_link(&e) } else { None };
                    let err = match dangling {
                        Some(path) => match self.visit_dangling(&path, executor, stats) {
                            Ok(()) => continue,
                            Err(err) => err,
                        },
                        None => walk_error(e).into(),
                    };
                    self.record_failure(stats, err)?;
                    continue;
                }
            };
            let is_dir = entry.file_type().is_dir();
            match self.visit(&entry, executor, stats) {
                Ok(Visit::Descend) => {}
                Ok(Visit::Prune) => {
                    if is_dir {
                        entries.skip_current_dir();
                    }
                }
                Err(err) => {
                    // Children of a directory that could not be mirrored are never processed.
                    if is_dir {
                        entries.skip_current_dir();
                    }
                    self.record_failure(stats, err)?;
                }
            }
        }
        Ok(())
    }

    fn record_failure(&self, stats: &mut MirrorStats, err: anyhow::Error) -> Result<()> {
        if self.options.keep_going {
            warn!("{:#}", err);
            stats.failed += 1;
            Ok(())
        } else {
            Err(err)
        }
    }

    fn visit<E: Executor>(
        &self,
        entry: &DirEntry,
        executor: &mut E,
        stats: &mut MirrorStats,
    ) -> Result<Visit> {
        let source_path = entry.path();
        let relative = self.relative_path(source_path)?;
        let is_dir = entry.file_type().is_dir();

        if self.is_excluded(entry) {
            debug!("Skipping destination root found at {:?}", source_path);
            stats.skipped_excluded += 1;
            return Ok(Visit::Prune);
        }
        if self.options.ignore.is_match(relative, is_dir) {
            debug!("Ignoring {:?}", relative);
            stats.skipped_ignored += 1;
            return Ok(Visit::Prune);
        }

        let target = self.dest_root.join(relative);
        if is_dir {
            self.mirror_dir(&target, executor, stats)?;
        } else {
            let kind = EntryKind::from(entry.file_type());
            self.mirror_leaf(source_path, kind, relative, &target, executor, stats)?;
        }
        Ok(Visit::Descend)
    }

    /// Mirrors a dangling source symlink met while following links. It cannot
    /// resolve to the destination root, so only the ignore patterns apply.
    fn visit_dangling<E: Executor>(
        &self,
        source_path: &Path,
        executor: &mut E,
        stats: &mut MirrorStats,
    ) -> Result<()> {
        let relative = self.relative_path(source_path)?;
        if self.options.ignore.is_match(relative, false) {
            debug!("Ignoring {:?}", relative);
            stats.skipped_ignored += 1;
            return Ok(());
        }
        debug!("Linking dangling symlink {:?}", source_path);
        let target = self.dest_root.join(relative);
        self.mirror_leaf(source_path, EntryKind::Symlink, relative, &target, executor, stats)
    }

    fn relative_path<'p>(&self, source_path: &'p Path) -> Result<&'p Path> {
        source_path
            .strip_prefix(&self.source_root)
            .with_context(|| format!("Walked outside the source root: {:?}", source_path))
    }

    /// True if the entry is the destination root, directly or through a link.
    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if entry.path() == self.dest_root {
            return true;
        }
        // Paths reached through a link are not canonical; resolve them.
        let via_link =
            entry.path_is_symlink() || self.options.symlinks == SymlinkPolicy::Follow;
        via_link && fs::canonicalize(entry.path()).is_ok_and(|resolved| resolved == self.dest_root)
    }

    fn mirror_dir<E: Executor>(
        &self,
        target: &Path,
        executor: &mut E,
        stats: &mut MirrorStats,
    ) -> Result<()> {
        match fsio::probe(target)? {
            None => {
                executor.create_dir(target)?;
                stats.dirs_created += 1;
            }
            Some(meta) if meta.is_dir() => {
                trace!("Reusing directory {:?}", target);
                stats.dirs_existing += 1;
            }
            Some(meta) => bail!(DeeplinkError::DestinationConflict {
                path: target.to_path_buf(),
                existing: EntryKind::from(meta.file_type()),
            }),
        }
        Ok(())
    }

    fn mirror_leaf<E: Executor>(
        &self,
        source_path: &Path,
        kind: EntryKind,
        relative: &Path,
        target: &Path,
        executor: &mut E,
        stats: &mut MirrorStats,
    ) -> Result<()> {
        if kind == EntryKind::Other && self.options.special == SpecialPolicy::Reject {
            bail!(DeeplinkError::UnsupportedEntry {
                path: source_path.to_path_buf(),
                kind,
            });
        }
        let copy = kind == EntryKind::File && self.options.copy.is_match(relative, false);

        if let Some(existing) = fsio::probe(target)? {
            if !copy && self.already_linked(source_path, target, &existing) {
                trace!("Link already in place: {:?}", target);
                stats.unchanged += 1;
                return Ok(());
            }
            let conflict = DeeplinkError::DestinationConflict {
                path: target.to_path_buf(),
                existing: EntryKind::from(existing.file_type()),
            };
            match self.options.on_conflict {
                ConflictPolicy::Fail => bail!(conflict),
                ConflictPolicy::Skip => {
                    info!("Skipping occupied path {:?}", target);
                    stats.skipped_conflict += 1;
                    return Ok(());
                }
                ConflictPolicy::Overwrite => {
                    if existing.is_dir() {
                        bail!(conflict);
                    }
                    executor.remove(target)?;
                    stats.replaced += 1;
                }
            }
        }

        if copy {
            executor.copy_file(source_path, target)?;
            stats.files_copied += 1;
            return Ok(());
        }
        match self.options.link_style {
            LinkStyle::Absolute => executor.symlink(source_path, target)?,
            LinkStyle::Relative => {
                executor.symlink(&links::relative_target(source_path, target), target)?
            }
            LinkStyle::Hard => executor.hard_link(source_path, target)?,
        }
        stats.links_created += 1;
        Ok(())
    }

    fn already_linked(&self, source: &Path, target: &Path, existing: &fs::Metadata) -> bool {
        match self.options.link_style {
            LinkStyle::Hard => links::is_same_file(source, target),
            LinkStyle::Absolute | LinkStyle::Relative => {
                existing.file_type().is_symlink() && links::points_to(target, source)
            }
        }
    }
}
