//! combat
//!
//! Characters, teams, and the deterministic combat simulation.
//!
//! A [`Character`] bundles the per-character state the other layers
//! define: an attribute set, an inventory, an ability book, and an
//! effect set. The [`Arena`] owns every character plus the single
//! random source, advances the world in fixed steps, and resolves
//! attacks, projectiles, and deaths. Same seed, same inputs, same
//! outcome.

mod arena;
mod projectile;

pub use arena::{Arena, CombatLogEntry, COMBAT_DECAY_SECONDS, KILL_EXPERIENCE_PER_LEVEL};
pub use projectile::{
    Projectile, ProjectileFlight, ProjectileStep, PROJECTILE_HIT_RADIUS, PROJECTILE_SPEED,
};

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::abilities::{Ability, AbilityBook, AbilityError, AbilityInput};
use crate::attributes::AttributeSet;
use crate::effects::{
    magnitude::{basic_attack_cooldown, weapon_attack_cooldown, DUAL_WIELD_ATTACK_SPEED_BONUS},
    DamageBreakdown, EffectSet, WeaponRoll,
};
use crate::equipment::{Inventory, InventoryError, SlotType};

/// Identifies a character within an arena.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Team affiliation, which decides hostility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    BottomSide,
    TopSide,
    /// Hostile to both sides.
    NeutralHostile,
    /// Hostile to nobody.
    NeutralFriendly,
}

impl Team {
    /// Whether members of `self` may attack members of `other`.
    pub fn is_hostile(self, other: Team) -> bool {
        if self == other {
            return false;
        }
        match (self, other) {
            (Team::NeutralFriendly, _) | (_, Team::NeutralFriendly) => false,
            _ => true,
        }
    }
}

/// A 2D world position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        Vec2::new(other.x - self.x, other.y - self.y).length()
    }

    /// Unit vector in this direction, or zero for the zero vector.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len <= f32::EPSILON {
            Vec2::default()
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }

    /// Distance from `point` to the segment running from `self` to `end`.
    pub fn segment_distance(self, end: Vec2, point: Vec2) -> f32 {
        let seg = Vec2::new(end.x - self.x, end.y - self.y);
        let len_sq = seg.x * seg.x + seg.y * seg.y;
        if len_sq <= f32::EPSILON {
            return self.distance(point);
        }
        let t = ((point.x - self.x) * seg.x + (point.y - self.y) * seg.y) / len_sq;
        let t = t.clamp(0.0, 1.0);
        Vec2::new(self.x + seg.x * t, self.y + seg.y * t).distance(point)
    }

    /// Move up to `max_step` toward `target`, never overshooting.
    pub fn step_towards(self, target: Vec2, max_step: f32) -> Vec2 {
        let distance = self.distance(target);
        if distance <= max_step {
            return target;
        }
        let dir = Vec2::new(target.x - self.x, target.y - self.y).normalized();
        Vec2::new(self.x + dir.x * max_step, self.y + dir.y * max_step)
    }
}

/// Combat operations that can fail.
#[derive(Debug, Error)]
pub enum CombatError {
    #[error("unknown character '{0}'")]
    UnknownCharacter(CharacterId),

    #[error("character '{0}' already exists in the arena")]
    DuplicateCharacter(CharacterId),

    #[error("'{target}' is not hostile to '{attacker}'")]
    NotHostile {
        attacker: CharacterId,
        target: CharacterId,
    },

    #[error("character '{0}' is dead")]
    Dead(CharacterId),

    #[error("no target selected")]
    NoTarget,

    #[error("character '{0}' has no projectile weapon")]
    NotRanged(CharacterId),

    #[error(transparent)]
    Ability(#[from] AbilityError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Something that happened during simulation, for the combat log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CombatEvent {
    Damage {
        source: CharacterId,
        target: CharacterId,
        ability: String,
        breakdown: DamageBreakdown,
    },
    Healing {
        source: CharacterId,
        target: CharacterId,
        ability: String,
        amount: f32,
    },
    EffectExpired {
        target: CharacterId,
        effect: String,
    },
    ProjectileFired {
        source: CharacterId,
        ability: String,
    },
    Death {
        target: CharacterId,
        /// Absent when nothing attributable killed them, such as an
        /// expiring damage-over-time effect.
        killer: Option<CharacterId>,
    },
    LevelUp {
        target: CharacterId,
        level: u32,
    },
}

/// One combatant.
#[derive(Debug, Clone)]
pub struct Character {
    pub name: String,
    pub team: Team,
    pub position: Vec2,
    pub attrs: AttributeSet,
    pub inventory: Inventory,
    pub abilities: AbilityBook,
    pub effects: EffectSet,
    target: Option<CharacterId>,
    attacking: bool,
    in_combat: bool,
    combat_timer: f32,
    // Alternates hands while dual wielding.
    use_off_hand: bool,
}

impl Character {
    /// A character at a position with default attributes and the basic
    /// attack granted.
    pub fn new(name: impl Into<String>, team: Team, position: Vec2) -> Self {
        let mut abilities = AbilityBook::default();
        abilities.grant(AbilityInput::WeaponAbility, Ability::auto_attack());
        Self {
            name: name.into(),
            team,
            position,
            attrs: AttributeSet::default(),
            inventory: Inventory::default(),
            abilities,
            effects: EffectSet::default(),
            target: None,
            attacking: false,
            in_combat: false,
            combat_timer: 0.0,
            use_off_hand: false,
        }
    }

    pub fn target(&self) -> Option<&CharacterId> {
        self.target.as_ref()
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn is_in_combat(&self) -> bool {
        self.in_combat
    }

    pub(crate) fn set_target(&mut self, target: Option<CharacterId>) {
        self.target = target;
        if self.target.is_none() {
            self.attacking = false;
        }
    }

    pub(crate) fn set_attacking(&mut self, attacking: bool) {
        self.attacking = attacking && self.target.is_some();
    }

    pub(crate) fn enter_combat(&mut self, decay: f32) {
        self.in_combat = true;
        self.combat_timer = decay;
    }

    pub(crate) fn tick_combat_timer(&mut self, dt: f32) {
        if self.in_combat {
            self.combat_timer -= dt;
            if self.combat_timer <= 0.0 {
                self.in_combat = false;
                self.combat_timer = 0.0;
            }
        }
    }

    /// Equip a carried item, wiring its granted effects and abilities.
    pub fn equip(&mut self, slot: SlotType, id: uuid::Uuid) -> Result<(), InventoryError> {
        let outcome = self.inventory.equip(slot, id)?;
        self.wire_outcome(outcome);
        Ok(())
    }

    /// Unequip a slot, reverting what the item granted.
    pub fn unequip(&mut self, slot: SlotType) -> Result<(), InventoryError> {
        let outcome = self.inventory.unequip(slot)?;
        self.wire_outcome(outcome);
        Ok(())
    }

    /// Use a carried consumable: apply its effects and spend one stack.
    pub fn use_item(&mut self, id: uuid::Uuid) -> Result<(), InventoryError> {
        let item = self
            .inventory
            .items()
            .iter()
            .find(|i| i.id == id)
            .ok_or(InventoryError::DoesNotExist)?;
        if item.spec.item_type != crate::equipment::ItemType::Consumable {
            return Err(InventoryError::InvalidEquipment {
                item: item.spec.name.clone(),
            });
        }
        let effects = item.spec.granted_effects.clone();
        for effect in effects {
            self.effects.apply(effect, &mut self.attrs);
        }
        self.inventory.consume(id, 1)
    }

    fn wire_outcome(&mut self, outcome: crate::equipment::EquipOutcome) {
        for name in &outcome.remove_effects {
            self.effects.remove(name, &mut self.attrs);
        }
        for name in &outcome.revoke_abilities {
            self.revoke_ability(name);
        }
        for effect in outcome.apply_effects {
            self.effects.apply(effect, &mut self.attrs);
        }
        for ability in outcome.grant_abilities {
            self.grant_to_free_slot(ability);
        }
    }

    fn grant_to_free_slot(&mut self, ability: Ability) {
        const SLOTS: [AbilityInput; 4] = [
            AbilityInput::Ability1,
            AbilityInput::Ability2,
            AbilityInput::Ability3,
            AbilityInput::Ability4,
        ];
        for slot in SLOTS {
            if self.abilities.get(slot).is_none() {
                self.abilities.grant(slot, ability);
                return;
            }
        }
    }

    fn revoke_ability(&mut self, name: &str) {
        const SLOTS: [AbilityInput; 4] = [
            AbilityInput::Ability1,
            AbilityInput::Ability2,
            AbilityInput::Ability3,
            AbilityInput::Ability4,
        ];
        for slot in SLOTS {
            if self.abilities.get(slot).is_some_and(|a| a.name == name) {
                self.abilities.remove(slot);
                return;
            }
        }
    }

    /// Range of the basic attack: the main-hand weapon's range if one is
    /// equipped, otherwise the attack range attribute.
    pub fn attack_range(&self) -> f32 {
        self.inventory
            .weapon_in(SlotType::MainHand)
            .map(|w| w.attack_range)
            .unwrap_or(self.attrs.attack_range)
    }

    /// Seconds between basic attacks, weapon speed and dual-wield bonus
    /// included.
    pub fn attack_cooldown(&self) -> f32 {
        match self.inventory.weapon_in(SlotType::MainHand) {
            Some(weapon) => {
                let bonus = if self.inventory.is_dual_wielding() {
                    DUAL_WIELD_ATTACK_SPEED_BONUS
                } else {
                    0.0
                };
                weapon_attack_cooldown(weapon.attack_speed, bonus)
            }
            None => basic_attack_cooldown(&self.attrs),
        }
    }

    /// Whether the basic attack fires a projectile.
    pub fn attacks_with_projectile(&self) -> bool {
        self.inventory
            .weapon_in(SlotType::MainHand)
            .is_some_and(|w| w.projectile)
    }

    /// The weapon roll for the next basic attack, alternating hands when
    /// dual wielding.
    pub(crate) fn next_attack_roll(&mut self) -> Vec<WeaponRoll> {
        if self.inventory.is_dual_wielding() {
            let slot = if self.use_off_hand {
                SlotType::OffHand
            } else {
                SlotType::MainHand
            };
            self.use_off_hand = !self.use_off_hand;
            return self
                .inventory
                .weapon_in(slot)
                .map(|w| vec![w.roll()])
                .unwrap_or_default();
        }
        self.inventory
            .weapon_in(SlotType::MainHand)
            .map(|w| vec![w.roll()])
            .unwrap_or_default()
    }

    /// Weapon rolls for an ability's weapon damage contribution.
    pub(crate) fn rolls_for(&self, kind: crate::abilities::WeaponDamageKind) -> Vec<WeaponRoll> {
        use crate::abilities::WeaponDamageKind;
        let hands: &[SlotType] = match kind {
            WeaponDamageKind::None => &[],
            WeaponDamageKind::MainHand => &[SlotType::MainHand],
            WeaponDamageKind::OffHand => &[SlotType::OffHand],
            WeaponDamageKind::BothHands => &[SlotType::MainHand, SlotType::OffHand],
        };
        hands
            .iter()
            .filter_map(|&slot| self.inventory.weapon_in(slot))
            .map(|w| w.roll())
            .collect()
    }
}
