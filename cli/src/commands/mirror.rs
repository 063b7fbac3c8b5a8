//! # deeplink Mirror Command
//!
//! File: cli/src/commands/mirror.rs
//!
//! ## Overview
//!
//! This module defines the arguments of the `deeplink` command and its
//! handler. The handler turns the parsed arguments into `MirrorOptions`,
//! runs the Mirror Walker and prints the summary.
//!
//! ## Usage
//!
//! ```bash
//! # Mirror the current directory into ./mirror (the mirror is excluded from itself)
//! deeplink mirror
//!
//! # Mirror a source tree, copying config files and skipping VCS metadata
//! deeplink -s ~/project ~/project-view -c '\.ini$' -i '^\.git$'
//!
//! # Show what would happen without touching anything
//! deeplink -n -s data /tmp/data-links
//! ```
//!
use crate::common::ui;
use crate::core::config::{
    self, ConflictPolicy, LinkStyle, MirrorOptions, SpecialPolicy, SymlinkPolicy,
};
use crate::core::error::{DeeplinkError, Result};
use crate::core::mirror;
use crate::core::patterns::PatternSet;
use anyhow::bail;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// # Mirror Arguments (`MirrorArgs`)
///
/// Options of a mirror run. Flattened into the top-level CLI.
#[derive(Parser, Debug)]
pub struct MirrorArgs {
    /// Source directory to mirror.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    source: PathBuf,

    /// Directory that receives the link tree. Created if missing; its parent must exist.
    #[arg(value_name = "DESTINATION")]
    destination: PathBuf,

    /// Create hard links instead of symbolic links.
    #[arg(short = 'l', long)]
    hard_links: bool,

    /// Make symbolic links relative to their own directory.
    #[arg(short, long, conflicts_with = "hard_links")]
    relative: bool,

    /// Copy files whose source-relative path matches REGEX instead of linking them.
    /// Can be given multiple times.
    #[arg(short, long = "copy", value_name = "REGEX", action = clap::ArgAction::Append)]
    copy: Vec<String>,

    /// Read copy patterns from FILE (one per line, `#` comments).
    #[arg(short = 'C', long, value_name = "FILE")]
    copy_list_file: Option<PathBuf>,

    /// Skip entries whose source-relative path matches REGEX. Matching
    /// directories are not descended. Can be given multiple times.
    #[arg(short, long = "ignore", value_name = "REGEX", action = clap::ArgAction::Append)]
    ignore: Vec<String>,

    /// Read ignore patterns from FILE (one per line, `#` comments).
    #[arg(short = 'I', long, value_name = "FILE")]
    ignore_list_file: Option<PathBuf>,

    /// Print what would be done without changing anything.
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// What to do when a destination path is already occupied.
    #[arg(long, value_enum, value_name = "POLICY", default_value_t = ConflictPolicy::Fail)]
    on_conflict: ConflictPolicy,

    /// Descend into symbolic links to directories instead of linking them.
    #[arg(short = 'L', long)]
    follow_symlinks: bool,

    /// Fail on sockets, FIFOs and device nodes instead of linking them.
    #[arg(long)]
    reject_special: bool,

    /// Keep going after an entry fails; exit with an error at the end.
    #[arg(short, long)]
    keep_going: bool,
}

/// # Handle Mirror Command (`handle_mirror`)
///
/// 1. Builds `MirrorOptions`, loading and compiling the pattern lists.
/// 2. Runs `mirror::mirror` on the `~`-expanded source and destination.
/// 3. Prints the summary line.
/// 4. Turns failures recorded under `--keep-going` into `Incomplete`.
///
/// ## Errors
///
/// Any error from option building or the walker, unchanged, so `main` can
/// map it to an exit code.
pub fn handle_mirror(args: MirrorArgs) -> Result<()> {
    let options = build_options(&args)?;
    let source = config::expand_path(&args.source);
    let destination = config::expand_path(&args.destination);
    info!(
        "Mirroring {} into {} ({:?}, on conflict: {:?})",
        source.display(),
        destination.display(),
        options.link_style,
        options.on_conflict
    );

    let stats = mirror::mirror(&source, &destination, &options)?;
    ui::print_summary(&source, &destination, &stats, options.dry_run);

    if stats.failed > 0 {
        bail!(DeeplinkError::Incomplete {
            failed: stats.failed
        });
    }
    Ok(())
}

/// Assembles `MirrorOptions` from the command line.
fn build_options(args: &MirrorArgs) -> Result<MirrorOptions> {
    let link_style = if args.hard_links {
        LinkStyle::Hard
    } else if args.relative {
        LinkStyle::Relative
    } else {
        LinkStyle::Absolute
    };

    let ignore = collect_patterns(&args.ignore, args.ignore_list_file.as_ref())?;
    let copy = collect_patterns(&args.copy, args.copy_list_file.as_ref())?;
    debug!(
        "Compiled {} ignore and {} copy patterns",
        ignore.len(),
        copy.len()
    );

    Ok(MirrorOptions {
        link_style,
        on_conflict: args.on_conflict,
        symlinks: if args.follow_symlinks {
            SymlinkPolicy::Follow
        } else {
            SymlinkPolicy::Preserve
        },
        special: if args.reject_special {
            SpecialPolicy::Reject
        } else {
            SpecialPolicy::Link
        },
        ignore,
        copy,
        dry_run: args.dry_run,
        keep_going: args.keep_going,
    })
}

/// Inline patterns first, then the list file's, compiled into one set.
fn collect_patterns(inline: &[String], list_file: Option<&PathBuf>) -> Result<PatternSet> {
    let mut patterns = inline.to_vec();
    if let Some(file) = list_file {
        patterns.extend(config::load_pattern_list(&config::expand_path(file))?);
    }
    PatternSet::compile(&patterns)
}
