//! # deeplink Core (`core`)
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Core infrastructure and the mirror engine:
//! - `config`: run options, policies and pattern list files
//! - `error`: error kinds and exit codes
//! - `executor`: real and dry-run filesystem executors
//! - `mirror`: the Mirror Walker
//! - `patterns`: compiled ignore/copy patterns
//!
pub mod config;
pub mod error;
pub mod executor;
pub mod mirror;
pub mod patterns;
