//! project::schema
//!
//! Serde schema for project manifests.
//!
//! # Overview
//!
//! A manifest declares two descriptor kinds:
//!
//! - **Target descriptors**: the build output kind (game vs. editor
//!   executable) and the modules linked into that output. The first listed
//!   module is the target's primary module.
//! - **Module descriptors**: a precompiled-header strategy and an ordered
//!   list of public dependency modules. Order is preserved exactly because
//!   it can matter for link order; duplicates are rejected at validation.
//!
//! The descriptors are declarative records consumed by a host build tool;
//! this crate models, validates, and fingerprints them but never builds
//! anything.
//!
//! # Manifest Format
//!
//! ```toml
//! [[target]]
//! name = "MOBA"
//! kind = "game"
//! extra_modules = ["MOBA"]
//!
//! [[module]]
//! name = "MOBA"
//! pch_mode = "explicit_or_shared"
//! public_dependencies = ["Core", "CoreUObject", "Engine"]
//! ```

use serde::{Deserialize, Serialize};

use super::types::{ModuleName, PchMode, TargetKind};

/// Engine-provided modules every project may depend on without declaring
/// them. Resolution of these is the host build tool's job; the set here is
/// the subset the sample project references.
pub const ENGINE_MODULES: [&str; 10] = [
    "Core",
    "CoreUObject",
    "Engine",
    "InputCore",
    "HeadMountedDisplay",
    "NavigationSystem",
    "AIModule",
    "GameplayTasks",
    "GameplayAbilities",
    "GameplayTags",
];

/// A target descriptor: one build output and the modules linked into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// Target name (also names the produced executable).
    pub name: ModuleName,
    /// Build output kind.
    pub kind: TargetKind,
    /// Modules linked into the output. The first entry is the primary
    /// module and must be declared in the same manifest.
    pub extra_modules: Vec<ModuleName>,
}

impl TargetDescriptor {
    /// The target's primary module, if any modules are listed.
    pub fn primary_module(&self) -> Option<&ModuleName> {
        self.extra_modules.first()
    }
}

/// A module descriptor: PCH strategy plus ordered public dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Module name.
    pub name: ModuleName,
    /// Precompiled-header strategy.
    #[serde(default)]
    pub pch_mode: PchMode,
    /// Public dependency modules, in declared (link) order.
    #[serde(default)]
    pub public_dependencies: Vec<ModuleName>,
}

/// The full descriptor set of a project.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Declared targets.
    #[serde(rename = "target", default)]
    pub targets: Vec<TargetDescriptor>,
    /// Declared modules.
    #[serde(rename = "module", default)]
    pub modules: Vec<ModuleDescriptor>,
}

impl ProjectManifest {
    /// Look up a declared module by name.
    pub fn module(&self, name: &ModuleName) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| &m.name == name)
    }

    /// Look up a declared target by name.
    pub fn target(&self, name: &ModuleName) -> Option<&TargetDescriptor> {
        self.targets.iter().find(|t| &t.name == name)
    }

    /// A starter manifest: a game target and an editor target both linking
    /// a single `MOBA` module, which depends on the ten standard engine
    /// modules in a fixed order.
    pub fn sample() -> Self {
        let name = |s: &str| ModuleName::new(s).expect("static module name");
        let moba = name("MOBA");
        ProjectManifest {
            targets: vec![
                TargetDescriptor {
                    name: moba.clone(),
                    kind: TargetKind::Game,
                    extra_modules: vec![moba.clone()],
                },
                TargetDescriptor {
                    name: name("MOBAEditor"),
                    kind: TargetKind::Editor,
                    extra_modules: vec![moba.clone()],
                },
            ],
            modules: vec![ModuleDescriptor {
                name: moba,
                pch_mode: PchMode::ExplicitOrShared,
                public_dependencies: ENGINE_MODULES.iter().map(|m| name(m)).collect(),
            }],
        }
    }
}
