//! # deeplink Commands (`commands`)
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Command argument definitions and their handlers. deeplink has a single
//! command, so `mirror::MirrorArgs` is flattened into the top-level CLI
//! rather than exposed as a subcommand.
//!

/// Arguments and handler for mirroring a source tree into a link tree.
pub mod mirror;
