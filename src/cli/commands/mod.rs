//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the project or combat layer to do the work
//! 3. Formats and displays output
//!
//! Handlers do NOT hold state of their own.

mod completion;
mod duel;
mod fingerprint_cmd;
mod info;
mod init;
mod validate;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use duel::duel;
pub use fingerprint_cmd::fingerprint;
pub use info::info;
pub use init::init;
pub use validate::validate;

use anyhow::Result;

use crate::cli::args::Command;
use crate::cli::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Init { force } => init::init(ctx, force),
        Command::Validate => validate::validate(ctx),
        Command::Info { target, json } => info::info(ctx, target.as_deref(), json),
        Command::Fingerprint => fingerprint_cmd::fingerprint(ctx),
        Command::Duel { seed, limit, json } => duel::duel(ctx, seed, limit, json),
        Command::Completion { shell } => completion::completion(shell),
    }
}
