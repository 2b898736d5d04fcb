//! combat::projectile
//!
//! Projectiles in flight. A projectile either homes on a single target
//! or travels in a straight line until it hits something hostile or
//! runs out of distance. The arena owns collision resolution; this
//! module only moves the projectile and reports what happened.

use serde::Serialize;

use crate::abilities::AbilityData;
use crate::effects::WeaponRoll;

use super::{CharacterId, Team, Vec2};

/// Projectile travel speed, world units per second.
pub const PROJECTILE_SPEED: f32 = 1500.0;

/// Distance at which a projectile counts as hitting a character.
pub const PROJECTILE_HIT_RADIUS: f32 = 15.0;

/// How a projectile travels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProjectileFlight {
    /// Follows one target until it connects or the target dies.
    Homing { target: CharacterId },
    /// Travels along a direction, hitting the first hostile character,
    /// and expires after `max_distance`.
    Directional { direction: Vec2, max_distance: f32 },
}

/// What one simulation step did to a projectile.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectileStep {
    /// Still in flight.
    Flying,
    /// Reached its homing target this step.
    Reached,
    /// Ran out of travel distance.
    Expired,
}

/// A projectile in flight, carrying the damage parameters captured at
/// launch. Source attributes are read at impact, not at launch.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub source: CharacterId,
    pub team: Team,
    pub position: Vec2,
    pub speed: f32,
    pub flight: ProjectileFlight,
    /// Name of the ability that launched it, for the combat log.
    pub ability: String,
    pub data: AbilityData,
    pub rolls: Vec<WeaponRoll>,
    traveled: f32,
}

impl Projectile {
    pub fn new(
        source: CharacterId,
        team: Team,
        position: Vec2,
        flight: ProjectileFlight,
        ability: impl Into<String>,
        data: AbilityData,
        rolls: Vec<WeaponRoll>,
    ) -> Self {
        Self {
            source,
            team,
            position,
            speed: PROJECTILE_SPEED,
            flight,
            ability: ability.into(),
            data,
            rolls,
            traveled: 0.0,
        }
    }

    /// Advance by `dt` seconds. For homing flight the caller supplies the
    /// target's current position; `None` means the target is gone and the
    /// projectile expires.
    pub fn advance(&mut self, dt: f32, homing_target: Option<Vec2>) -> ProjectileStep {
        let step = self.speed * dt;
        match &self.flight {
            ProjectileFlight::Homing { .. } => {
                let Some(target) = homing_target else {
                    return ProjectileStep::Expired;
                };
                if self.position.distance(target) <= step + PROJECTILE_HIT_RADIUS {
                    self.position = target;
                    return ProjectileStep::Reached;
                }
                self.position = self.position.step_towards(target, step);
                ProjectileStep::Flying
            }
            ProjectileFlight::Directional {
                direction,
                max_distance,
            } => {
                // Never travel past the limit, even within one step.
                let step = step.min((*max_distance - self.traveled).max(0.0));
                let dir = direction.normalized();
                self.position =
                    Vec2::new(self.position.x + dir.x * step, self.position.y + dir.y * step);
                self.traveled += step;
                if self.traveled >= *max_distance {
                    ProjectileStep::Expired
                } else {
                    ProjectileStep::Flying
                }
            }
        }
    }
}
