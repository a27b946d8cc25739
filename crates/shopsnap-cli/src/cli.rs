//! # CLI Structure and Argument Parsing
//!
//! Defines the command-line interface for `shopsnap`, built with `clap`
//! derive macros. The binary follows a command-subcommand pattern with a
//! handful of global options.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # Render the snapshot for an escaped fragment
//! shopsnap render "/Kitchen/p/42"
//!
//! # Render from a crawler request URL, as JSON
//! shopsnap render --url "https://shop.example/?_escaped_fragment_=%2Fp%2F42" --format json
//!
//! # Check that the store API answers for the configured token
//! shopsnap probe
//! ```
//!
//! Store credentials come from `--config FILE` (TOML) or, when no file is
//! given, from `SHOPSNAP_*` environment variables.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI structure for the `shopsnap` command.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "shopsnap",
    version,
    about = "Render crawler-ready HTML snapshots of a hash-routed storefront"
)]
pub struct Cli {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors and command results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the store configuration file (TOML)
    #[arg(long, global = true, env = "SHOPSNAP_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render the snapshot for an escaped fragment or crawler page URL
    Render {
        /// The escaped fragment to render, e.g. "/Kitchen/p/42".
        /// Omit it to render the root category listing.
        fragment: Option<String>,

        /// Full crawler request URL; the `_escaped_fragment_` query
        /// parameter is extracted from it
        #[arg(long, conflicts_with = "fragment", value_name = "PAGE_URL")]
        url: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check whether the store API answers for the configured token
    Probe,

    /// Fetch and print the store profile
    Profile,
}

/// Output format for command results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output: the HTML fragment followed by metadata lines
    Text,
    /// Machine-readable JSON
    Json,
}
