//! info command - Show targets and modules from the manifest

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::project::{self, ModuleDescriptor, ProjectManifest, TargetDescriptor};
use crate::ui::output;

/// Show the manifest, or one target of it.
pub fn info(ctx: &Context, target: Option<&str>, json: bool) -> Result<()> {
    let manifest = project::load(&ctx.manifest_path)
        .with_context(|| format!("failed to load {}", ctx.manifest_path.display()))?;

    match target {
        Some(name) => {
            let Some(target) = manifest.targets.iter().find(|t| t.name.as_str() == name) else {
                bail!("no target named '{}' in {}", name, ctx.manifest_path.display());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(target)?);
            } else {
                print_target(ctx, &manifest, target);
            }
        }
        None => {
            if json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                for target in &manifest.targets {
                    print_target(ctx, &manifest, target);
                }
                for module in &manifest.modules {
                    print_module(ctx, module);
                }
            }
        }
    }
    Ok(())
}

fn print_target(ctx: &Context, manifest: &ProjectManifest, target: &TargetDescriptor) {
    output::print(
        format!("target {} ({})", target.name, target.kind),
        ctx.verbosity,
    );
    match target.primary_module() {
        Some(primary) => output::print(format!("  primary: {}", primary), ctx.verbosity),
        None => output::warn("  no modules declared", ctx.verbosity),
    }
    for module in &target.extra_modules {
        let origin = if manifest.module(module).is_some() {
            "project"
        } else {
            "engine"
        };
        output::print(format!("  module: {} ({})", module, origin), ctx.verbosity);
    }
}

fn print_module(ctx: &Context, module: &ModuleDescriptor) {
    output::print(
        format!("module {} (pch: {})", module.name, module.pch_mode),
        ctx.verbosity,
    );
    if !module.public_dependencies.is_empty() {
        let deps: Vec<String> = module
            .public_dependencies
            .iter()
            .map(|d| d.to_string())
            .collect();
        output::print(output::format_list(&deps, "  dep: "), ctx.verbosity);
    }
}
