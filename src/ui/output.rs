//! ui::output
//!
//! Terminal output helpers for the `sk` commands.
//!
//! Human-readable output flows through these helpers so `--quiet` and
//! `--debug` behave identically everywhere. Machine-readable output
//! (`--json`, the fingerprint digest) is printed directly by the command
//! that owns it and ignores verbosity.

use std::fmt::Display;

/// How much a command invocation should say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Essential output only.
    Quiet,
    /// The default.
    Normal,
    /// Diagnostics on stderr as well.
    Debug,
}

impl Verbosity {
    /// Map the global flags to a level. Quiet wins over debug.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a line of normal command output. Suppressed under quiet.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a diagnostic line to stderr. Shown only under debug.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error to stderr. Errors are never suppressed.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning to stderr. Suppressed under quiet.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Prefix each item onto its own line, for indented detail listings.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
