//! # deeplink Path Patterns
//!
//! File: cli/src/core/patterns.rs
//!
//! ## Overview
//!
//! Compiled regular expressions for the ignore and copy filters. A pattern
//! is searched (unanchored) in the entry's path relative to the source root,
//! written with `/` separators, so `^build/` only matches the top-level
//! `build` directory while `\.lock$` matches lock files at any depth.
//! Directories are also tried with a trailing `/`, so `^build/` matches the
//! `build` directory itself and not only its children.
//!
use crate::core::error::{DeeplinkError, Result};
use regex::Regex;
use std::path::{Component, Path};

/// An ordered set of compiled patterns; matches if any pattern matches.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compiles every pattern, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` naming the pattern that did not compile.
    pub fn compile<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|source| DeeplinkError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if any pattern matches `relative`, or `relative/`
    /// when it names a directory.
    pub fn is_match(&self, relative: &Path, is_dir: bool) -> bool {
        if self.is_empty() {
            return false;
        }
        let mut subject = slash_path(relative);
        if self.patterns.iter().any(|re| re.is_match(&subject)) {
            return true;
        }
        if !is_dir {
            return false;
        }
        subject.push('/');
        self.patterns.iter().any(|re| re.is_match(&subject))
    }
}

/// Renders a relative path with `/` separators regardless of platform.
fn slash_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
