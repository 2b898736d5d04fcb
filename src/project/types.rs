//! project::types
//!
//! Strong types for build descriptor concepts.
//!
//! # Types
//!
//! - [`ModuleName`] - Validated module identifier
//! - [`TargetKind`] - Build output kind (game or editor executable)
//! - [`PchMode`] - Precompiled-header strategy for a module
//!
//! # Validation
//!
//! [`ModuleName`] enforces validity at construction time. Invalid values
//! cannot be represented, so descriptor consumers never see a name the
//! host build tool would reject.
//!
//! # Examples
//!
//! ```
//! use skirmish::project::types::{ModuleName, TargetKind};
//!
//! let name = ModuleName::new("GameplayAbilities").unwrap();
//! assert_eq!(name.as_str(), "GameplayAbilities");
//!
//! assert!(ModuleName::new("").is_err());
//! assert!(ModuleName::new("7thModule").is_err());
//! assert!(ModuleName::new("has space").is_err());
//!
//! assert_eq!(TargetKind::Game.to_string(), "game");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid module name: {0}")]
    InvalidModuleName(String),
}

/// A validated module identifier.
///
/// Module names follow the conventions UnrealBuildTool accepts for module
/// rule classes:
/// - Cannot be empty
/// - May contain only ASCII letters, digits, and `_`
/// - Cannot start with a digit
///
/// # Example
///
/// ```
/// use skirmish::project::types::ModuleName;
///
/// let name = ModuleName::new("CoreUObject").unwrap();
/// assert_eq!(name.as_str(), "CoreUObject");
///
/// assert!(ModuleName::new("Core-UObject").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleName(String);

impl ModuleName {
    /// Create a new validated module name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidModuleName` if the name violates the
    /// identifier rules above.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidModuleName(
                "module name cannot be empty".into(),
            ));
        }

        let mut chars = name.chars();
        // First character: letter or underscore only.
        if let Some(first) = chars.next() {
            if !(first.is_ascii_alphabetic() || first == '_') {
                return Err(TypeError::InvalidModuleName(format!(
                    "module name cannot start with '{first}'"
                )));
            }
        }

        for c in name.chars() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                return Err(TypeError::InvalidModuleName(format!(
                    "module name cannot contain '{c}'"
                )));
            }
        }

        Ok(())
    }

    /// Get the module name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ModuleName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ModuleName> for String {
    fn from(name: ModuleName) -> Self {
        name.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of executable a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Shipping game executable.
    Game,
    /// Editor executable.
    Editor,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Game => write!(f, "game"),
            TargetKind::Editor => write!(f, "editor"),
        }
    }
}

/// Precompiled-header strategy declared by a module.
///
/// Irrelevant to runtime behavior; carried because the host build tool
/// consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PchMode {
    /// No precompiled headers.
    None,
    /// Project-wide shared PCH only.
    Shared,
    /// Module-provided PCH where present, shared PCH otherwise.
    #[default]
    ExplicitOrShared,
}

impl std::fmt::Display for PchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PchMode::None => write!(f, "none"),
            PchMode::Shared => write!(f, "shared"),
            PchMode::ExplicitOrShared => write!(f, "explicit_or_shared"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod module_name {
        use super::*;

        #[test]
        fn valid_names() {
            assert!(ModuleName::new("Core").is_ok());
            assert!(ModuleName::new("CoreUObject").is_ok());
            assert!(ModuleName::new("MOBA").is_ok());
            assert!(ModuleName::new("_Internal").is_ok());
            assert!(ModuleName::new("Slate2D").is_ok());
        }

        #[test]
        fn empty_rejected() {
            assert!(ModuleName::new("").is_err());
        }

        #[test]
        fn leading_digit_rejected() {
            assert!(ModuleName::new("7zip").is_err());
        }

        #[test]
        fn punctuation_rejected() {
            assert!(ModuleName::new("Core.UObject").is_err());
            assert!(ModuleName::new("Core-UObject").is_err());
            assert!(ModuleName::new("Core UObject").is_err());
            assert!(ModuleName::new("Core/UObject").is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let name = ModuleName::new("NavigationSystem").unwrap();
            let json = serde_json::to_string(&name).unwrap();
            let parsed: ModuleName = serde_json::from_str(&json).unwrap();
            assert_eq!(name, parsed);
        }

        #[test]
        fn serde_rejects_invalid() {
            assert!(serde_json::from_str::<ModuleName>("\"bad name\"").is_err());
        }
    }

    mod target_kind {
        use super::*;

        #[test]
        fn serde_tags() {
            assert_eq!(serde_json::to_string(&TargetKind::Game).unwrap(), "\"game\"");
            assert_eq!(
                serde_json::to_string(&TargetKind::Editor).unwrap(),
                "\"editor\""
            );
        }
    }

    mod pch_mode {
        use super::*;

        #[test]
        fn default_is_explicit_or_shared() {
            assert_eq!(PchMode::default(), PchMode::ExplicitOrShared);
        }

        #[test]
        fn serde_roundtrip() {
            for mode in [PchMode::None, PchMode::Shared, PchMode::ExplicitOrShared] {
                let json = serde_json::to_string(&mode).unwrap();
                let parsed: PchMode = serde_json::from_str(&json).unwrap();
                assert_eq!(mode, parsed);
            }
        }
    }
}
