//! attributes::experience
//!
//! Experience-per-level table.
//!
//! A plain serde structure so tables can live in a TOML file next to the
//! project manifest, with a built-in standard curve as the default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of the table: the experience required to leave `level`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRow {
    /// Current level.
    pub level: u32,
    /// Experience required to level up from `level`.
    pub experience: f32,
}

/// Experience thresholds keyed by level.
///
/// Levels greater than the last row have no threshold: a character at max
/// level accumulates no experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ExperienceRow>", into = "Vec<ExperienceRow>")]
pub struct ExperienceTable {
    rows: BTreeMap<u32, f32>,
}

/// Experience needed to leave level 1 in the standard curve. Matches the
/// attribute set's default `MaxExperience`.
pub const BASE_EXPERIENCE: f32 = 280.0;

/// Per-level increase of the standard curve.
pub const EXPERIENCE_STEP: f32 = 100.0;

impl ExperienceTable {
    /// Build a table from explicit rows. Later rows win on duplicate levels.
    pub fn from_rows(rows: impl IntoIterator<Item = ExperienceRow>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|row| (row.level, row.experience))
                .collect(),
        }
    }

    /// The standard curve for levels 1 through `max_level - 1`:
    /// `280 + 100 * (level - 1)`.
    pub fn standard(max_level: u32) -> Self {
        Self::from_rows((1..max_level).map(|level| ExperienceRow {
            level,
            experience: BASE_EXPERIENCE + EXPERIENCE_STEP * (level - 1) as f32,
        }))
    }

    /// Experience required to level up from `level`, if the table has a row.
    pub fn threshold(&self, level: u32) -> Option<f32> {
        self.rows.get(&level).copied()
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for ExperienceTable {
    fn default() -> Self {
        Self::standard(crate::attributes::DEFAULT_MAX_LEVEL)
    }
}

impl From<Vec<ExperienceRow>> for ExperienceTable {
    fn from(rows: Vec<ExperienceRow>) -> Self {
        Self::from_rows(rows)
    }
}

impl From<ExperienceTable> for Vec<ExperienceRow> {
    fn from(table: ExperienceTable) -> Self {
        table
            .rows
            .into_iter()
            .map(|(level, experience)| ExperienceRow { level, experience })
            .collect()
    }
}
