//! # deeplink Terminal Output (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! User-facing output that is not logging. At the moment that is the
//! one-line summary printed to stdout after a run.
//!
use crate::core::mirror::MirrorStats;
use std::path::Path;

/// Renders the end-of-run summary line.
pub fn format_summary(source: &Path, destination: &Path, stats: &MirrorStats, dry_run: bool) -> String {
    let mut line = format!(
        "{} '{}' into '{}': {} directories created, {} links created",
        if dry_run { "Would mirror" } else { "Mirrored" },
        source.display(),
        destination.display(),
        stats.dirs_created,
        stats.links_created,
    );
    if stats.files_copied > 0 {
        line.push_str(&format!(", {} files copied", stats.files_copied));
    }
    if stats.replaced > 0 {
        line.push_str(&format!(", {} replaced", stats.replaced));
    }
    line.push_str(&format!(
        ", {} unchanged, {} skipped",
        stats.unchanged,
        stats.skipped()
    ));
    if stats.failed > 0 {
        line.push_str(&format!(", {} failed", stats.failed));
    }
    line
}

/// Prints the end-of-run summary to stdout.
pub fn print_summary(source: &Path, destination: &Path, stats: &MirrorStats, dry_run: bool) {
    println!("{}", format_summary(source, destination, stats, dry_run));
}
