//! abilities
//!
//! Ability definitions and activation gating.
//!
//! # Overview
//!
//! An [`Ability`] bundles its activation parameters (range, mana cost,
//! cooldown) with an [`AbilityData`] describing how its damage or healing
//! is calculated. Characters hold abilities in an [`AbilityBook`] keyed by
//! input slot; the book tracks per-slot cooldown timers and enforces the
//! activation rules: the slot must be granted, off cooldown, affordable,
//! and the target must be in range.
//!
//! The weapon slot is the basic attack. Its cooldown is not a fixed number
//! but derives from attack speed (see [`crate::effects::magnitude`]), so
//! the combat layer activates it with an explicit cooldown.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attributes::{AttributeKind, AttributeSet};

/// Default ability range, world units.
pub const DEFAULT_ABILITY_RANGE: f32 = 150.0;

/// The kind of damage an ability deals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    /// Deals no damage.
    #[default]
    None,
    /// Mitigated by physical damage reduction.
    Physical,
    /// Mitigated by environmental damage reduction.
    Environmental,
    /// Bypasses both reductions.
    True,
    /// Restores health instead of removing it.
    Heal,
}

/// Which equipped weapons contribute their damage roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponDamageKind {
    /// No weapon contribution.
    #[default]
    None,
    /// Main-hand weapon only.
    MainHand,
    /// Off-hand weapon only.
    OffHand,
    /// Both weapons hit.
    BothHands,
}

/// How an ability's damage or healing magnitude is computed.
///
/// The final magnitude is the base value plus each ratio times the
/// corresponding source or target stat.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AbilityData {
    /// What type of damage the ability does, if any.
    #[serde(default)]
    pub damage_type: DamageType,
    /// What type of weapon damage the ability does, if any.
    #[serde(default)]
    pub weapon_damage: WeaponDamageKind,
    /// Scaling on the source's attack power.
    #[serde(default)]
    pub attack_power_ratio: f32,
    /// Scaling on the source's spell power.
    #[serde(default)]
    pub spell_power_ratio: f32,
    /// Scaling on the target's maximum health.
    #[serde(default)]
    pub max_health_ratio: f32,
    /// Scaling on the target's missing health.
    #[serde(default)]
    pub missing_health_ratio: f32,
    /// Base damage/healing before ratios.
    #[serde(default)]
    pub base_value: f32,
}

/// One ability a character can be granted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    /// Display name.
    pub name: String,
    /// Magnitude calculation parameters.
    pub data: AbilityData,
    /// Passive abilities are always active and cannot be triggered.
    #[serde(default)]
    pub passive: bool,
    /// Maximum distance to the target, world units.
    pub range: f32,
    /// Mana committed on activation.
    pub mana_cost: f32,
    /// Cooldown committed on activation, seconds. The weapon slot ignores
    /// this and derives its cooldown from attack speed.
    pub cooldown: f32,
}

impl Ability {
    /// The basic attack bound to the weapon slot: physical main-hand
    /// weapon damage, no mana cost, attack-speed-driven cooldown.
    pub fn auto_attack() -> Self {
        Self {
            name: "AutoAttack".to_string(),
            data: AbilityData {
                damage_type: DamageType::Physical,
                weapon_damage: WeaponDamageKind::MainHand,
                attack_power_ratio: 1.0,
                ..AbilityData::default()
            },
            passive: false,
            range: DEFAULT_ABILITY_RANGE,
            mana_cost: 0.0,
            cooldown: 0.0,
        }
    }
}

/// Input slots abilities are granted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityInput {
    Ability1,
    Ability2,
    Ability3,
    Ability4,
    /// The basic attack.
    WeaponAbility,
}

impl std::fmt::Display for AbilityInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbilityInput::Ability1 => write!(f, "ability1"),
            AbilityInput::Ability2 => write!(f, "ability2"),
            AbilityInput::Ability3 => write!(f, "ability3"),
            AbilityInput::Ability4 => write!(f, "ability4"),
            AbilityInput::WeaponAbility => write!(f, "weapon"),
        }
    }
}

/// Errors from ability activation.
#[derive(Debug, Error, PartialEq)]
pub enum AbilityError {
    #[error("no ability granted in slot {0}")]
    NotGranted(AbilityInput),

    #[error("ability '{name}' is passive and cannot be activated")]
    Passive { name: String },

    #[error("ability '{name}' is on cooldown ({remaining:.2}s remaining)")]
    OnCooldown { name: String, remaining: f32 },

    #[error("not enough mana for '{name}': need {required}, have {available}")]
    NotEnoughMana {
        name: String,
        required: f32,
        available: f32,
    },

    #[error("target out of range for '{name}': range {range}, distance {distance:.1}")]
    OutOfRange {
        name: String,
        range: f32,
        distance: f32,
    },
}

/// Granted abilities and their cooldown state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityBook {
    abilities: BTreeMap<AbilityInput, Ability>,
    /// Seconds remaining per slot. Absent means ready.
    #[serde(default)]
    cooldowns: BTreeMap<AbilityInput, f32>,
}

impl AbilityBook {
    /// Grant an ability to a slot, replacing any previous grant. Replacing
    /// a grant clears the slot's cooldown.
    pub fn grant(&mut self, slot: AbilityInput, ability: Ability) {
        self.cooldowns.remove(&slot);
        self.abilities.insert(slot, ability);
    }

    /// Remove the grant from a slot, returning it.
    pub fn remove(&mut self, slot: AbilityInput) -> Option<Ability> {
        self.cooldowns.remove(&slot);
        self.abilities.remove(&slot)
    }

    /// The ability granted to a slot, if any.
    pub fn get(&self, slot: AbilityInput) -> Option<&Ability> {
        self.abilities.get(&slot)
    }

    /// Seconds until a slot is ready again. Zero when ready.
    pub fn cooldown_remaining(&self, slot: AbilityInput) -> f32 {
        self.cooldowns.get(&slot).copied().unwrap_or(0.0)
    }

    /// Advance all cooldown timers by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.cooldowns.retain(|_, remaining| {
            *remaining -= dt;
            *remaining > 0.0
        });
    }

    /// Check whether a slot can activate right now.
    ///
    /// `distance` is the distance to the intended target; `None` means the
    /// ability is untargeted and range is not checked.
    pub fn can_activate(
        &self,
        slot: AbilityInput,
        attrs: &AttributeSet,
        distance: Option<f32>,
    ) -> Result<(), AbilityError> {
        let ability = self
            .abilities
            .get(&slot)
            .ok_or(AbilityError::NotGranted(slot))?;

        if ability.passive {
            return Err(AbilityError::Passive {
                name: ability.name.clone(),
            });
        }

        let remaining = self.cooldown_remaining(slot);
        if remaining > 0.0 {
            return Err(AbilityError::OnCooldown {
                name: ability.name.clone(),
                remaining,
            });
        }

        if attrs.mana < ability.mana_cost {
            return Err(AbilityError::NotEnoughMana {
                name: ability.name.clone(),
                required: ability.mana_cost,
                available: attrs.mana,
            });
        }

        if let Some(distance) = distance {
            if distance > ability.range {
                return Err(AbilityError::OutOfRange {
                    name: ability.name.clone(),
                    range: ability.range,
                    distance,
                });
            }
        }

        Ok(())
    }

    /// Activate a slot: check, then commit mana cost and the ability's own
    /// cooldown. Returns the activated ability.
    pub fn activate(
        &mut self,
        slot: AbilityInput,
        attrs: &mut AttributeSet,
        distance: Option<f32>,
    ) -> Result<Ability, AbilityError> {
        let cooldown = self
            .abilities
            .get(&slot)
            .ok_or(AbilityError::NotGranted(slot))?
            .cooldown;
        self.activate_with_cooldown(slot, attrs, distance, cooldown)
    }

    /// Activate a slot with an explicit cooldown. The combat layer uses
    /// this for the weapon slot, whose cooldown derives from attack speed.
    pub fn activate_with_cooldown(
        &mut self,
        slot: AbilityInput,
        attrs: &mut AttributeSet,
        distance: Option<f32>,
        cooldown: f32,
    ) -> Result<Ability, AbilityError> {
        self.can_activate(slot, attrs, distance)?;
        let ability = self
            .abilities
            .get(&slot)
            .ok_or(AbilityError::NotGranted(slot))?
            .clone();
        if ability.mana_cost > 0.0 {
            attrs.apply(AttributeKind::Mana, -ability.mana_cost);
        }
        if cooldown > 0.0 {
            self.cooldowns.insert(slot, cooldown);
        }
        Ok(ability)
    }
}
