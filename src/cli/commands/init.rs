//! init command - Write a starter project manifest

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::project::{self, ProjectManifest};
use crate::ui::output;

/// Write a starter manifest at the context's manifest path.
pub fn init(ctx: &Context, force: bool) -> Result<()> {
    if ctx.manifest_path.exists() && !force {
        bail!(
            "manifest already exists at {} (use --force to overwrite)",
            ctx.manifest_path.display()
        );
    }

    let manifest = ProjectManifest::sample();
    project::save(&manifest, &ctx.manifest_path)
        .with_context(|| format!("failed to write {}", ctx.manifest_path.display()))?;

    output::print(
        format!("Wrote {}", ctx.manifest_path.display()),
        ctx.verbosity,
    );
    Ok(())
}
