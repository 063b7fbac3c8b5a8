//! # deeplink Configuration
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! deeplink has no configuration file. A run is configured entirely from
//! the command line, and this module holds the resulting `MirrorOptions`
//! together with the policy enums that steer the walker. It also loads the
//! optional ignore/copy pattern list files and expands `~` in user paths.
//!
//! ## Architecture
//!
//! - `MirrorOptions`: Everything the walker needs besides the two root paths
//! - `ConflictPolicy`, `LinkStyle`, `SymlinkPolicy`, `SpecialPolicy`: Behaviour switches, each with the safe choice as `Default`
//! - `load_pattern_list`: Reads a list file (one regex per line, `#` comments, blank lines ignored)
//! - `expand_path`: Tilde expansion via `shellexpand`
//!
//! ## Examples
//!
//! ```rust
//! let mut patterns = args.ignore.clone();
//! if let Some(file) = &args.ignore_list_file {
//!     patterns.extend(config::load_pattern_list(&config::expand_path(file))?);
//! }
//! let options = MirrorOptions {
//!     ignore: PatternSet::compile(&patterns)?,
//!     ..MirrorOptions::default()
//! };
//! ```
//!
use crate::common::fs::io::read_file_to_string;
use crate::core::error::Result;
use crate::core::patterns::PatternSet;
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What to do when a leaf's destination path is already occupied by
/// something other than the correct link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConflictPolicy {
    /// Stop with `DestinationConflict`.
    #[default]
    Fail,
    /// Leave the existing object and move on.
    Skip,
    /// Remove the existing file or link and create the new entry.
    /// Real directories are never removed.
    Overwrite,
}

/// How leaves are linked back to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    /// Symbolic link holding the absolute canonical source path.
    #[default]
    Absolute,
    /// Symbolic link holding the source path relative to the link's directory.
    Relative,
    /// Hard link to the source inode.
    Hard,
}

/// How symbolic links found in the source are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymlinkPolicy {
    /// Source symlinks are leaves; the mirror links to the symlink itself.
    #[default]
    Preserve,
    /// Symlinks to directories are descended into.
    Follow,
}

/// How sockets, FIFOs and device nodes are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecialPolicy {
    /// Link them like regular files.
    #[default]
    Link,
    /// Report them as `UnsupportedEntry`.
    Reject,
}

/// Options for a single mirror run.
#[derive(Debug, Clone, Default)]
pub struct MirrorOptions {
    pub link_style: LinkStyle,
    pub on_conflict: ConflictPolicy,
    pub symlinks: SymlinkPolicy,
    pub special: SpecialPolicy,
    /// Entries whose relative path matches are skipped (directories are pruned).
    pub ignore: PatternSet,
    /// Regular files whose relative path matches are copied instead of linked.
    pub copy: PatternSet,
    /// Report planned actions without changing the filesystem.
    pub dry_run: bool,
    /// Record per-entry errors and continue instead of aborting.
    pub keep_going: bool,
}

/// Loads a pattern list file.
///
/// One pattern per line. Lines starting with `#` and lines containing only
/// whitespace are ignored; every other line is kept verbatim (apart from a
/// trailing `\r`), since leading or trailing spaces may be part of a regex.
///
/// # Errors
///
/// `PatternFile` if the file cannot be read. Pattern validity is checked
/// later, when the list is compiled.
pub fn load_pattern_list(path: &Path) -> Result<Vec<String>> {
    let content = read_file_to_string(path)?;
    let patterns = parse_pattern_list(&content);
    debug!("Loaded {} patterns from {:?}", patterns.len(), path);
    Ok(patterns)
}

fn parse_pattern_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Expands a leading `~` in a user-supplied path.
pub fn expand_path(raw: &Path) -> PathBuf {
    match raw.to_str() {
        Some(text) => PathBuf::from(shellexpand::tilde(text).into_owned()),
        // Non-UTF-8 paths are used as given.
        None => raw.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DeeplinkError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_conservative() {
        let options = MirrorOptions::default();
        assert_eq!(options.on_conflict, ConflictPolicy::Fail);
        assert_eq!(options.link_style, LinkStyle::Absolute);
        assert_eq!(options.symlinks, SymlinkPolicy::Preserve);
        assert_eq!(options.special, SpecialPolicy::Link);
        assert!(options.ignore.is_empty());
        assert!(!options.dry_run);
        assert!(!options.keep_going);
    }

    #[test]
    fn test_parse_pattern_list_skips_comments_and_blanks() {
        let content = "#This is a comment\n.*ignore-file-a.*\n\n   \n\\.tmp$\r\n# trailing\n";
        assert_eq!(
            parse_pattern_list(content),
            vec![".*ignore-file-a.*".to_string(), "\\.tmp$".to_string()]
        );
    }

    #[test]
    fn test_parse_pattern_list_keeps_lines_after_blank() {
        let content = "first\n\nsecond\n";
        assert_eq!(parse_pattern_list(content), vec!["first", "second"]);
    }

    #[test]
    fn test_load_pattern_list_from_file() -> Result<()> {
        let dir = tempdir()?;
        let list = dir.path().join("ignore-list");
        fs::write(&list, "# ignore build output\n^target/\n")?;
        assert_eq!(load_pattern_list(&list)?, vec!["^target/"]);
        Ok(())
    }

    #[test]
    fn test_load_pattern_list_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_pattern_list(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeeplinkError>(),
            Some(DeeplinkError::PatternFile { .. })
        ));
    }

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path(Path::new("~/mirror"));
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("mirror"));

        let untouched = expand_path(Path::new("/abs/path"));
        assert_eq!(untouched, PathBuf::from("/abs/path"));
    }
}
