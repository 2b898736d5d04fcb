//! validate command - Check the project manifest for consistency

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::project;
use crate::ui::output;

/// Load and validate the manifest, reporting what was checked.
pub fn validate(ctx: &Context) -> Result<()> {
    let manifest = project::load(&ctx.manifest_path)
        .with_context(|| format!("failed to load {}", ctx.manifest_path.display()))?;
    project::validate(&manifest)?;

    output::print(
        format!(
            "{} is valid: {} target(s), {} module(s)",
            ctx.manifest_path.display(),
            manifest.targets.len(),
            manifest.modules.len()
        ),
        ctx.verbosity,
    );
    Ok(())
}
