//! project
//!
//! Build descriptor loading and validation.
//!
//! # Overview
//!
//! A project manifest (`skirmish.toml`) declares targets and modules. This
//! module loads manifests from disk, validates cross-references, and
//! computes content fingerprints. Validation here is a courtesy to the
//! user: the host build tool is the final authority on resolution, but
//! catching an unknown module name or a duplicated dependency before
//! handing off saves a build round-trip.
//!
//! # Validation Rules
//!
//! - Every target must list at least one module (the primary module).
//! - A target's primary module must be declared in the manifest.
//! - Non-primary target modules and module dependencies must resolve to a
//!   declared module or a known engine module.
//! - A module's dependency list must not contain duplicates (duplicates
//!   are not meaningful and usually indicate a merge mistake).
//! - Target and module names must be unique.
//!
//! # Example
//!
//! ```
//! use skirmish::project::{validate, ProjectManifest};
//!
//! let manifest = ProjectManifest::sample();
//! validate(&manifest).unwrap();
//! ```

pub mod fingerprint;
pub mod schema;
pub mod types;

pub use fingerprint::Fingerprint;
pub use schema::{ModuleDescriptor, ProjectManifest, TargetDescriptor, ENGINE_MODULES};
pub use types::{ModuleName, PchMode, TargetKind};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default manifest file name, looked up in the working directory.
pub const MANIFEST_FILE: &str = "skirmish.toml";

/// Errors from manifest operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read manifest '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write manifest '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("target '{target}' lists no modules")]
    EmptyTarget { target: ModuleName },

    #[error("target '{target}' links unknown module '{module}'")]
    UnknownTargetModule { target: ModuleName, module: ModuleName },

    #[error("module '{module}' depends on unknown module '{dependency}'")]
    UnknownDependency {
        module: ModuleName,
        dependency: ModuleName,
    },

    #[error("module '{module}' lists dependency '{dependency}' more than once (entry {index})")]
    DuplicateDependency {
        module: ModuleName,
        dependency: ModuleName,
        index: usize,
    },

    #[error("duplicate target name '{0}'")]
    DuplicateTarget(ModuleName),

    #[error("duplicate module name '{0}'")]
    DuplicateModule(ModuleName),
}

/// Load a manifest from a TOML file.
///
/// # Errors
///
/// Returns `ReadError` if the file cannot be read and `ParseError` if it
/// is not a valid manifest. Loading does not validate cross-references;
/// call [`validate`] for that.
pub fn load(path: &Path) -> Result<ProjectManifest, ProjectError> {
    let text = fs::read_to_string(path).map_err(|source| ProjectError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|e| ProjectError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write a manifest to a TOML file.
pub fn save(manifest: &ProjectManifest, path: &Path) -> Result<(), ProjectError> {
    let text = toml::to_string_pretty(manifest).map_err(|e| ProjectError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    fs::write(path, text).map_err(|source| ProjectError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

/// Validate a manifest's cross-references.
///
/// Returns the first violation found, in declaration order. The rules are
/// listed in the module documentation.
pub fn validate(manifest: &ProjectManifest) -> Result<(), ProjectError> {
    let mut target_names = HashSet::new();
    for target in &manifest.targets {
        if !target_names.insert(&target.name) {
            return Err(ProjectError::DuplicateTarget(target.name.clone()));
        }
    }

    let mut module_names = HashSet::new();
    for module in &manifest.modules {
        if !module_names.insert(&module.name) {
            return Err(ProjectError::DuplicateModule(module.name.clone()));
        }
    }

    let resolves = |name: &ModuleName| {
        module_names.contains(name) || ENGINE_MODULES.contains(&name.as_str())
    };

    for target in &manifest.targets {
        let primary = target
            .primary_module()
            .ok_or_else(|| ProjectError::EmptyTarget {
                target: target.name.clone(),
            })?;
        // The primary module must be ours, not an engine module.
        if !module_names.contains(primary) {
            return Err(ProjectError::UnknownTargetModule {
                target: target.name.clone(),
                module: primary.clone(),
            });
        }
        for module in &target.extra_modules[1..] {
            if !resolves(module) {
                return Err(ProjectError::UnknownTargetModule {
                    target: target.name.clone(),
                    module: module.clone(),
                });
            }
        }
    }

    for module in &manifest.modules {
        let mut seen = HashSet::new();
        for (index, dependency) in module.public_dependencies.iter().enumerate() {
            if !seen.insert(dependency) {
                return Err(ProjectError::DuplicateDependency {
                    module: module.name.clone(),
                    dependency: dependency.clone(),
                    index,
                });
            }
            if !resolves(dependency) {
                return Err(ProjectError::UnknownDependency {
                    module: module.name.clone(),
                    dependency: dependency.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::types::TargetKind;

    fn name(s: &str) -> ModuleName {
        ModuleName::new(s).unwrap()
    }

    mod validation {
        use super::*;

        #[test]
        fn sample_is_valid() {
            validate(&ProjectManifest::sample()).unwrap();
        }

        #[test]
        fn empty_manifest_is_valid() {
            validate(&ProjectManifest::default()).unwrap();
        }

        #[test]
        fn target_without_modules_rejected() {
            let mut manifest = ProjectManifest::sample();
            manifest.targets[0].extra_modules.clear();
            assert!(matches!(
                validate(&manifest),
                Err(ProjectError::EmptyTarget { .. })
            ));
        }

        #[test]
        fn primary_module_must_be_declared() {
            let mut manifest = ProjectManifest::sample();
            manifest.targets[0].extra_modules = vec![name("Missing")];
            assert!(matches!(
                validate(&manifest),
                Err(ProjectError::UnknownTargetModule { .. })
            ));
        }

        #[test]
        fn engine_module_cannot_be_primary() {
            let mut manifest = ProjectManifest::sample();
            manifest.targets[0].extra_modules = vec![name("Core")];
            assert!(matches!(
                validate(&manifest),
                Err(ProjectError::UnknownTargetModule { .. })
            ));
        }

        #[test]
        fn unknown_dependency_rejected() {
            let mut manifest = ProjectManifest::sample();
            manifest.modules[0]
                .public_dependencies
                .push(name("NoSuchModule"));
            assert!(matches!(
                validate(&manifest),
                Err(ProjectError::UnknownDependency { .. })
            ));
        }

        #[test]
        fn duplicate_dependency_rejected_with_index() {
            let mut manifest = ProjectManifest::sample();
            manifest.modules[0].public_dependencies.push(name("Core"));
            match validate(&manifest) {
                Err(ProjectError::DuplicateDependency {
                    dependency, index, ..
                }) => {
                    assert_eq!(dependency.as_str(), "Core");
                    assert_eq!(index, 10);
                }
                other => panic!("expected DuplicateDependency, got {other:?}"),
            }
        }

        #[test]
        fn duplicate_target_rejected() {
            let mut manifest = ProjectManifest::sample();
            let dup = manifest.targets[0].clone();
            manifest.targets.push(dup);
            assert!(matches!(
                validate(&manifest),
                Err(ProjectError::DuplicateTarget(_))
            ));
        }

        #[test]
        fn module_depending_on_sibling_module_resolves() {
            let manifest = ProjectManifest {
                targets: vec![TargetDescriptor {
                    name: name("Game"),
                    kind: TargetKind::Game,
                    extra_modules: vec![name("GameCore"), name("GameUi")],
                }],
                modules: vec![
                    ModuleDescriptor {
                        name: name("GameCore"),
                        pch_mode: Default::default(),
                        public_dependencies: vec![name("Core")],
                    },
                    ModuleDescriptor {
                        name: name("GameUi"),
                        pch_mode: Default::default(),
                        public_dependencies: vec![name("GameCore")],
                    },
                ],
            };
            validate(&manifest).unwrap();
        }
    }

    mod io {
        use super::*;

        #[test]
        fn load_save_roundtrip() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join(MANIFEST_FILE);
            let manifest = ProjectManifest::sample();
            save(&manifest, &path).unwrap();
            let loaded = load(&path).unwrap();
            assert_eq!(manifest, loaded);
        }

        #[test]
        fn missing_file_is_read_error() {
            let dir = tempfile::tempdir().unwrap();
            let err = load(&dir.path().join("absent.toml")).unwrap_err();
            assert!(matches!(err, ProjectError::ReadError { .. }));
        }

        #[test]
        fn malformed_toml_is_parse_error() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("bad.toml");
            std::fs::write(&path, "[[module]]\nname = 7\n").unwrap();
            let err = load(&path).unwrap_err();
            assert!(matches!(err, ProjectError::ParseError { .. }));
        }
    }
}
