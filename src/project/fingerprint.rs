//! project::fingerprint
//!
//! Content fingerprint over a descriptor set.
//!
//! Used to detect manifest drift between invocations. The hash is
//! independent of declaration order: descriptors are sorted by name before
//! hashing, with each entry's canonical JSON keyed by its name.

use sha2::{Digest, Sha256};

use super::schema::ProjectManifest;

/// A SHA-256 fingerprint of a project manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a manifest.
    ///
    /// Deterministic and declaration-order independent: two manifests with
    /// the same descriptors fingerprint identically regardless of the order
    /// the descriptors appear in the file. Dependency order *within* a
    /// module is significant and is hashed as-is.
    pub fn compute(manifest: &ProjectManifest) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for target in &manifest.targets {
            let body = serde_json::to_string(target).unwrap_or_default();
            entries.push((format!("target/{}", target.name), body));
        }
        for module in &manifest.modules {
            let body = serde_json::to_string(module).unwrap_or_default();
            entries.push((format!("module/{}", module.name), body));
        }
        entries.sort();

        let mut hasher = Sha256::new();
        for (key, body) in entries {
            hasher.update(key.as_bytes());
            hasher.update(b"\0");
            hasher.update(body.as_bytes());
            hasher.update(b"\n");
        }

        Self(hex::encode(hasher.finalize()))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
