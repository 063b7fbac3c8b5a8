//! # deeplink Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the deeplink CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Running the mirror and mapping failures to stable exit codes
//!
//! ## Examples
//!
//! ```bash
//! # Mirror ./photos into ./photos-view
//! deeplink -s photos photos-view
//!
//! # Same, with info-level logs on stderr
//! deeplink -v -s photos photos-view
//! ```
//!
//! Processing flow:
//! 1. Parse command-line args via Clap (usage errors exit with 1)
//! 2. Configure logging based on verbosity level (`RUST_LOG` wins)
//! 3. Run the mirror command
//! 4. Print any error to stderr and exit with its code
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command arguments and handlers
mod common; // Shared utilities (fs, ui)
mod core; // Errors, options, executors and the mirror walker

use crate::core::error::{self, EXIT_INVALID_ARGS};

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0  success
  1  invalid arguments: bad usage, unusable source or destination, bad pattern or pattern file
  2  filesystem error: destination conflict, permission denied, unsupported entry, I/O failure,
     or failures recorded with --keep-going";

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "deeplink",
    about = "Mirror a directory tree as real directories full of links to the original files",
    long_about = "Recreates every directory of SOURCE under DESTINATION and replaces every other \
                  entry with a link back to the original. DESTINATION may live inside SOURCE; \
                  it is never mirrored into itself.",
    after_help = EXIT_CODES_HELP,
    version
)]
struct Cli {
    #[command(flatten)]
    mirror: commands::mirror::MirrorArgs,
    /// Increase log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here and must exit with 0.
            let code = if e.use_stderr() { EXIT_INVALID_ARGS } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = commands::mirror::handle_mirror(cli.mirror) {
        tracing::debug!("Mirror failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(error::exit_code(&e));
    }

    Ok(())
}
