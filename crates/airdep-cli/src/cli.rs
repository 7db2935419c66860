//! CLI argument definitions for airdep.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "airdep",
    version,
    about = "Resolve package wants against multi-version catalogs",
    long_about = "airdep loads package catalogs from the repositories declared in airdep.json, \
                  narrows every package's versions under the constraints of the want-graph, \
                  and writes the selected versions to airbuild.json."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to airdep.json (default: search upward from the current directory)
    #[arg(short, long, global = true, env = "AIRDEP_MANIFEST")]
    pub manifest: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve wants and write the build manifest
    Resolve {
        /// Where to write the build manifest
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display the resolved want-graph
    Tree {
        /// Maximum depth to display
        #[arg(long)]
        depth: Option<u32>,
        /// Show why a package is included
        #[arg(long, conflicts_with = "inverted")]
        why: Option<String>,
        /// Show everything that wants a package
        #[arg(long)]
        inverted: Option<String>,
    },

    /// List catalog packages and their available versions
    List {
        /// Only list this package
        package: Option<String>,
    },
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
