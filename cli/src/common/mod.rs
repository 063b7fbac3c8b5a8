//! # deeplink Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers that are not specific to the mirror algorithm:
//! filesystem primitives and terminal output.
//!

/// Utilities for filesystem operations (probing, links, copies).
pub mod fs;
/// Terminal output such as the run summary.
pub mod ui;
