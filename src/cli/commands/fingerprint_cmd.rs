//! fingerprint command - Print the manifest fingerprint

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::project::{self, Fingerprint};
use crate::ui::output;

/// Print the fingerprint of a validated manifest.
pub fn fingerprint(ctx: &Context) -> Result<()> {
    let manifest = project::load(&ctx.manifest_path)
        .with_context(|| format!("failed to load {}", ctx.manifest_path.display()))?;
    project::validate(&manifest)?;

    let fingerprint = Fingerprint::compute(&manifest);
    output::debug(
        format!("fingerprint covers {} descriptor(s)", manifest.targets.len() + manifest.modules.len()),
        ctx.verbosity,
    );
    // The digest itself prints even under --quiet; it is the output.
    println!("{}", fingerprint);
    Ok(())
}
