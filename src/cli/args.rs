//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--manifest <path>`: Use a specific project manifest
//! - `--debug`: Enable debug output
//! - `--quiet` / `-q`: Minimal output

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::project::MANIFEST_FILE;

/// Skirmish - project descriptor tooling and a deterministic combat sandbox
#[derive(Parser, Debug)]
#[command(name = "sk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the project manifest
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// The manifest path to operate on, defaulting to `skirmish.toml` in
    /// the current directory.
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| PathBuf::from(MANIFEST_FILE))
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter project manifest
    #[command(
        long_about = "Write a starter project manifest.\n\n\
            The generated manifest declares a game target, an editor target, \
            and one project module wired to the standard engine module set. \
            Existing manifests are not overwritten unless --force is given."
    )]
    Init {
        /// Overwrite an existing manifest
        #[arg(long)]
        force: bool,
    },

    /// Validate the project manifest
    #[command(
        long_about = "Validate the project manifest.\n\n\
            Checks that every target names at least one module, that primary \
            modules are declared in the manifest, and that every module \
            reference resolves to a declared module or an engine module \
            without duplicates."
    )]
    Validate,

    /// Show targets and modules from the manifest
    Info {
        /// Target to show; all targets when omitted
        target: Option<String>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the manifest fingerprint
    #[command(
        long_about = "Print the manifest fingerprint.\n\n\
            The fingerprint is a stable digest over the manifest's targets \
            and modules. It ignores declaration order but is sensitive to \
            dependency order, so it changes exactly when a rebuild-relevant \
            edit is made."
    )]
    Fingerprint,

    /// Run a seeded duel between two stock characters
    #[command(
        long_about = "Run a seeded duel between two stock characters.\n\n\
            A melee fighter and an archer are placed in the arena and set on \
            each other until one dies or the time limit passes. The same seed \
            always replays the same fight."
    )]
    Duel {
        /// Random seed for the simulation
        #[arg(long, default_value_t = 7)]
        seed: u64,

        /// Simulated time limit in seconds
        #[arg(long, default_value_t = 120.0, value_name = "SECONDS")]
        limit: f32,

        /// Output the combat log as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Shells supported for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
