//! attributes
//!
//! Character attribute set.
//!
//! # Overview
//!
//! Every character carries an [`AttributeSet`]: health, mana, experience,
//! combat stats, and movement. All mutation flows through [`AttributeSet::apply`]
//! (or [`AttributeSet::override_value`]), which clamps the touched attribute,
//! recomputes derived stats, runs the experience/level-up rules, and reports
//! everything that changed as a list of [`AttributeEvent`]s for the caller to
//! react to.
//!
//! # Clamping Rules
//!
//! | attribute | range |
//! |---|---|
//! | Health | 0 ..= MaxHealth |
//! | Mana | 0 ..= MaxMana |
//! | HealthRegen, ManaRegen | 0 ..= 9999 |
//! | Level | 1 ..= MaxLevel |
//! | AttackPower | 0 ..= 1000 |
//! | SpellPower | 0 ..= 2000 |
//! | AttackSpeed | 0 ..= 2.5 |
//! | CriticalChance | 0 ..= 1 |
//! | AttackRange | 0 ..= 800 |
//!
//! # Derived Stats
//!
//! Armor drives `PhysicalDamageReduction` and environmental resistance
//! drives `EnvironmentalDamageReduction`, both through the same curve:
//! 100 points of resistance halve incoming damage of that type, and
//! negative resistance amplifies it symmetrically.

pub mod experience;

pub use experience::{ExperienceRow, ExperienceTable};

use serde::{Deserialize, Serialize};

/// Default level cap.
pub const DEFAULT_MAX_LEVEL: u32 = 18;

/// Regeneration attributes are expressed per this many seconds.
pub const REGEN_PERIOD_SECONDS: f32 = 5.0;

/// Identifies one attribute of an [`AttributeSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Health,
    MaxHealth,
    /// Health restored per [`REGEN_PERIOD_SECONDS`].
    HealthRegen,
    Mana,
    MaxMana,
    /// Mana restored per [`REGEN_PERIOD_SECONDS`].
    ManaRegen,
    Level,
    MaxLevel,
    Experience,
    MaxExperience,
    AttackPower,
    SpellPower,
    /// Attacks per second.
    AttackSpeed,
    CriticalChance,
    CriticalDamage,
    AttackRange,
    /// Drives [`AttributeKind::PhysicalDamageReduction`].
    Armor,
    PhysicalDamageReduction,
    /// Drives [`AttributeKind::EnvironmentalDamageReduction`].
    EnvironmentalResistance,
    EnvironmentalDamageReduction,
    /// Flat amount subtracted from incoming damage, granted by effects.
    FlatDamageReduction,
    /// World units traveled per second.
    MovementSpeed,
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AttributeKind::Health => "health",
            AttributeKind::MaxHealth => "max_health",
            AttributeKind::HealthRegen => "health_regen",
            AttributeKind::Mana => "mana",
            AttributeKind::MaxMana => "max_mana",
            AttributeKind::ManaRegen => "mana_regen",
            AttributeKind::Level => "level",
            AttributeKind::MaxLevel => "max_level",
            AttributeKind::Experience => "experience",
            AttributeKind::MaxExperience => "max_experience",
            AttributeKind::AttackPower => "attack_power",
            AttributeKind::SpellPower => "spell_power",
            AttributeKind::AttackSpeed => "attack_speed",
            AttributeKind::CriticalChance => "critical_chance",
            AttributeKind::CriticalDamage => "critical_damage",
            AttributeKind::AttackRange => "attack_range",
            AttributeKind::Armor => "armor",
            AttributeKind::PhysicalDamageReduction => "physical_damage_reduction",
            AttributeKind::EnvironmentalResistance => "environmental_resistance",
            AttributeKind::EnvironmentalDamageReduction => "environmental_damage_reduction",
            AttributeKind::FlatDamageReduction => "flat_damage_reduction",
            AttributeKind::MovementSpeed => "movement_speed",
        };
        write!(f, "{name}")
    }
}

/// Something that changed while applying a modification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeEvent {
    /// An attribute's value changed (post-clamp value).
    Changed { kind: AttributeKind, value: f32 },
    /// Health reached zero.
    Died,
    /// A level was gained through experience.
    LeveledUp { level: u32 },
}

/// Resistance-to-reduction curve shared by armor and environmental
/// resistance.
///
/// For `r >= 0` the reduction is `1 - 100 / (100 + r)`; negative resistance
/// mirrors the curve and yields a negative reduction (amplified damage).
pub fn damage_reduction(resistance: f32) -> f32 {
    if resistance >= 0.0 {
        1.0 - (100.0 / (100.0 + resistance))
    } else {
        1.0 - (2.0 - (100.0 / (100.0 - resistance)))
    }
}

/// The full attribute set of one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    pub health: f32,
    pub max_health: f32,
    pub health_regen: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub mana_regen: f32,
    pub level: f32,
    pub max_level: f32,
    pub experience: f32,
    pub max_experience: f32,
    pub attack_power: f32,
    pub spell_power: f32,
    pub attack_speed: f32,
    pub critical_chance: f32,
    pub critical_damage: f32,
    pub attack_range: f32,
    pub armor: f32,
    pub physical_damage_reduction: f32,
    pub environmental_resistance: f32,
    pub environmental_damage_reduction: f32,
    pub flat_damage_reduction: f32,
    pub movement_speed: f32,
    /// Experience thresholds used by the level-up rules.
    pub experience_table: ExperienceTable,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self {
            health: 500.0,
            max_health: 500.0,
            health_regen: 7.0,
            mana: 300.0,
            max_mana: 300.0,
            mana_regen: 7.3,
            level: 1.0,
            max_level: DEFAULT_MAX_LEVEL as f32,
            experience: 0.0,
            max_experience: 280.0,
            attack_power: 55.0,
            spell_power: 0.0,
            attack_speed: 0.7,
            critical_chance: 0.1,
            critical_damage: 2.0,
            attack_range: 150.0,
            armor: 0.0,
            physical_damage_reduction: 0.0,
            environmental_resistance: 0.0,
            environmental_damage_reduction: 0.0,
            flat_damage_reduction: 0.0,
            movement_speed: 600.0,
            experience_table: ExperienceTable::default(),
        }
    }
}

impl AttributeSet {
    /// Read an attribute's current value.
    pub fn value(&self, kind: AttributeKind) -> f32 {
        match kind {
            AttributeKind::Health => self.health,
            AttributeKind::MaxHealth => self.max_health,
            AttributeKind::HealthRegen => self.health_regen,
            AttributeKind::Mana => self.mana,
            AttributeKind::MaxMana => self.max_mana,
            AttributeKind::ManaRegen => self.mana_regen,
            AttributeKind::Level => self.level,
            AttributeKind::MaxLevel => self.max_level,
            AttributeKind::Experience => self.experience,
            AttributeKind::MaxExperience => self.max_experience,
            AttributeKind::AttackPower => self.attack_power,
            AttributeKind::SpellPower => self.spell_power,
            AttributeKind::AttackSpeed => self.attack_speed,
            AttributeKind::CriticalChance => self.critical_chance,
            AttributeKind::CriticalDamage => self.critical_damage,
            AttributeKind::AttackRange => self.attack_range,
            AttributeKind::Armor => self.armor,
            AttributeKind::PhysicalDamageReduction => self.physical_damage_reduction,
            AttributeKind::EnvironmentalResistance => self.environmental_resistance,
            AttributeKind::EnvironmentalDamageReduction => self.environmental_damage_reduction,
            AttributeKind::FlatDamageReduction => self.flat_damage_reduction,
            AttributeKind::MovementSpeed => self.movement_speed,
        }
    }

    fn set_raw(&mut self, kind: AttributeKind, value: f32) {
        match kind {
            AttributeKind::Health => self.health = value,
            AttributeKind::MaxHealth => self.max_health = value,
            AttributeKind::HealthRegen => self.health_regen = value,
            AttributeKind::Mana => self.mana = value,
            AttributeKind::MaxMana => self.max_mana = value,
            AttributeKind::ManaRegen => self.mana_regen = value,
            AttributeKind::Level => self.level = value,
            AttributeKind::MaxLevel => self.max_level = value,
            AttributeKind::Experience => self.experience = value,
            AttributeKind::MaxExperience => self.max_experience = value,
            AttributeKind::AttackPower => self.attack_power = value,
            AttributeKind::SpellPower => self.spell_power = value,
            AttributeKind::AttackSpeed => self.attack_speed = value,
            AttributeKind::CriticalChance => self.critical_chance = value,
            AttributeKind::CriticalDamage => self.critical_damage = value,
            AttributeKind::AttackRange => self.attack_range = value,
            AttributeKind::Armor => self.armor = value,
            AttributeKind::PhysicalDamageReduction => self.physical_damage_reduction = value,
            AttributeKind::EnvironmentalResistance => self.environmental_resistance = value,
            AttributeKind::EnvironmentalDamageReduction => {
                self.environmental_damage_reduction = value
            }
            AttributeKind::FlatDamageReduction => self.flat_damage_reduction = value,
            AttributeKind::MovementSpeed => self.movement_speed = value,
        }
    }

    /// Current level as an integer.
    pub fn level(&self) -> u32 {
        self.level as u32
    }

    /// Whether health has reached zero.
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Add `delta` to an attribute and run the post-modification rules.
    pub fn apply(&mut self, kind: AttributeKind, delta: f32) -> Vec<AttributeEvent> {
        self.set_raw(kind, self.value(kind) + delta);
        self.post_modify(kind)
    }

    /// Replace an attribute's value and run the post-modification rules.
    pub fn override_value(&mut self, kind: AttributeKind, value: f32) -> Vec<AttributeEvent> {
        self.set_raw(kind, value);
        self.post_modify(kind)
    }

    /// Clamp the touched attribute, recompute derived stats, and run the
    /// experience rules. Returns every resulting change.
    fn post_modify(&mut self, kind: AttributeKind) -> Vec<AttributeEvent> {
        let mut events = Vec::new();
        match kind {
            AttributeKind::Health => {
                self.health = self.health.clamp(0.0, self.max_health);
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.health,
                });
                if self.health <= 0.0 {
                    events.push(AttributeEvent::Died);
                }
            }
            AttributeKind::HealthRegen => {
                self.health_regen = self.health_regen.clamp(0.0, 9999.0);
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.health_regen,
                });
            }
            AttributeKind::Mana => {
                self.mana = self.mana.clamp(0.0, self.max_mana);
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.mana,
                });
            }
            AttributeKind::ManaRegen => {
                self.mana_regen = self.mana_regen.clamp(0.0, 9999.0);
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.mana_regen,
                });
            }
            AttributeKind::Level => {
                self.level = self.level.clamp(1.0, self.max_level);
                // At the cap there is nothing left to earn.
                if self.level >= self.max_level {
                    self.experience = 0.0;
                    self.max_experience = 0.0;
                    events.push(AttributeEvent::Changed {
                        kind: AttributeKind::Experience,
                        value: 0.0,
                    });
                    events.push(AttributeEvent::Changed {
                        kind: AttributeKind::MaxExperience,
                        value: 0.0,
                    });
                }
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.level,
                });
            }
            AttributeKind::Experience => {
                if self.level < self.max_level {
                    if let Some(threshold) = self.experience_table.threshold(self.level()) {
                        if self.experience >= threshold {
                            self.experience = 0.0;
                            self.level = (self.level + 1.0).clamp(1.0, self.max_level);
                            self.max_experience =
                                self.experience_table.threshold(self.level()).unwrap_or(0.0);
                            events.push(AttributeEvent::LeveledUp {
                                level: self.level(),
                            });
                            events.push(AttributeEvent::Changed {
                                kind: AttributeKind::Level,
                                value: self.level,
                            });
                            events.push(AttributeEvent::Changed {
                                kind: AttributeKind::MaxExperience,
                                value: self.max_experience,
                            });
                        }
                    }
                } else {
                    self.experience = 0.0;
                }
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.experience,
                });
            }
            AttributeKind::AttackPower => {
                self.attack_power = self.attack_power.clamp(0.0, 1000.0);
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.attack_power,
                });
            }
            AttributeKind::SpellPower => {
                self.spell_power = self.spell_power.clamp(0.0, 2000.0);
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.spell_power,
                });
            }
            AttributeKind::AttackSpeed => {
                self.attack_speed = self.attack_speed.clamp(0.0, 2.5);
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.attack_speed,
                });
            }
            AttributeKind::CriticalChance => {
                self.critical_chance = self.critical_chance.clamp(0.0, 1.0);
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.critical_chance,
                });
            }
            AttributeKind::AttackRange => {
                self.attack_range = self.attack_range.clamp(0.0, 800.0);
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.attack_range,
                });
            }
            AttributeKind::Armor => {
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.armor,
                });
                self.physical_damage_reduction = damage_reduction(self.armor);
                events.push(AttributeEvent::Changed {
                    kind: AttributeKind::PhysicalDamageReduction,
                    value: self.physical_damage_reduction,
                });
            }
            AttributeKind::EnvironmentalResistance => {
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.environmental_resistance,
                });
                self.environmental_damage_reduction =
                    damage_reduction(self.environmental_resistance);
                events.push(AttributeEvent::Changed {
                    kind: AttributeKind::EnvironmentalDamageReduction,
                    value: self.environmental_damage_reduction,
                });
            }
            // Unclamped attributes.
            _ => {
                events.push(AttributeEvent::Changed {
                    kind,
                    value: self.value(kind),
                });
            }
        }
        events
    }
}
