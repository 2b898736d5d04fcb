//! effects::execution
//!
//! Damage and healing execution calculations.
//!
//! # Damage Pipeline
//!
//! 1. **Raw value**: base value, plus each [`AbilityData`] ratio times the
//!    corresponding source/target stat, plus one roll per contributing
//!    weapon (`min + roll % max`).
//! 2. **Critical**: one roll against the source's critical chance; on
//!    success the raw value scales by critical damage. Source stats are
//!    whatever snapshot the caller passes in; for projectiles that is
//!    the moment of impact.
//! 3. **Mitigation**: physical damage is reduced by the target's physical
//!    damage reduction, environmental by its environmental reduction, true
//!    damage by neither.
//! 4. **Flat reduction**: subtracted last; the result never goes negative.
//!
//! Healing skips rolls and mitigation entirely: it is base plus ratios,
//! applied as a positive health modifier (the attribute layer clamps at
//! max health).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::abilities::{AbilityData, DamageType};
use crate::attributes::AttributeSet;

/// A weapon's damage roll range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponRoll {
    /// Minimum damage.
    pub min: f32,
    /// Maximum damage.
    pub max: f32,
}

impl WeaponRoll {
    fn roll(&self, rng: &mut impl Rng) -> f32 {
        let span = self.max as i64;
        if span <= 0 {
            return self.min.max(0.0);
        }
        self.min + (rng.random_range(0..span) as f32)
    }
}

/// How one damage execution resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    /// Damage type of the execution.
    pub damage_type: DamageType,
    /// Pre-mitigation value, crit included.
    pub raw: f32,
    /// Whether the critical roll succeeded.
    pub critical: bool,
    /// Value after percentage mitigation.
    pub mitigated: f32,
    /// Final health removed after flat reduction, never negative.
    pub dealt: f32,
}

impl DamageBreakdown {
    fn none() -> Self {
        Self {
            damage_type: DamageType::None,
            raw: 0.0,
            critical: false,
            mitigated: 0.0,
            dealt: 0.0,
        }
    }
}

/// Execute a damage calculation.
///
/// `weapons` carries one roll range per contributing weapon, already
/// selected by the caller according to the ability's weapon damage kind.
/// The caller applies `dealt` as a negative health modifier on the target.
pub fn calculate_damage(
    source: &AttributeSet,
    target: &AttributeSet,
    data: &AbilityData,
    weapons: &[WeaponRoll],
    rng: &mut impl Rng,
) -> DamageBreakdown {
    let damage_type = data.damage_type;
    if matches!(damage_type, DamageType::None | DamageType::Heal) {
        return DamageBreakdown::none();
    }

    let mut raw = data.base_value
        + data.attack_power_ratio * source.attack_power
        + data.spell_power_ratio * source.spell_power
        + data.max_health_ratio * target.max_health
        + data.missing_health_ratio * (target.max_health - target.health);
    for weapon in weapons {
        raw += weapon.roll(rng);
    }

    let critical = rng.random::<f32>() < source.critical_chance;
    if critical {
        raw *= source.critical_damage;
    }

    let reduction = match damage_type {
        DamageType::Physical => target.physical_damage_reduction,
        DamageType::Environmental => target.environmental_damage_reduction,
        _ => 0.0,
    };
    let mitigated = raw * (1.0 - reduction);
    let dealt = (mitigated - target.flat_damage_reduction).max(0.0);

    DamageBreakdown {
        damage_type,
        raw,
        critical,
        mitigated,
        dealt,
    }
}

/// Execute a healing calculation: base value plus ratios, no rolls, no
/// mitigation. The caller applies the result as a positive health modifier
/// and lets the attribute layer clamp at max health.
pub fn calculate_healing(source: &AttributeSet, target: &AttributeSet, data: &AbilityData) -> f32 {
    let healing = data.base_value
        + data.attack_power_ratio * source.attack_power
        + data.spell_power_ratio * source.spell_power
        + data.max_health_ratio * target.max_health
        + data.missing_health_ratio * (target.max_health - target.health);
    healing.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn physical(base: f32) -> AbilityData {
        AbilityData {
            damage_type: DamageType::Physical,
            base_value: base,
            ..AbilityData::default()
        }
    }

    mod damage {
        use super::*;

        #[test]
        fn no_damage_type_deals_nothing() {
            let attrs = AttributeSet::default();
            let out = calculate_damage(
                &attrs,
                &attrs,
                &AbilityData::default(),
                &[],
                &mut rng(),
            );
            assert_eq!(out.dealt, 0.0);
        }

        #[test]
        fn base_value_flows_through_without_crit() {
            let mut source = AttributeSet::default();
            source.override_value(AttributeKind::CriticalChance, 0.0);
            let target = AttributeSet::default();
            let out = calculate_damage(&source, &target, &physical(100.0), &[], &mut rng());
            assert!(!out.critical);
            assert_eq!(out.raw, 100.0);
            assert_eq!(out.dealt, 100.0);
        }

        #[test]
        fn guaranteed_crit_scales_by_critical_damage() {
            let mut source = AttributeSet::default();
            source.override_value(AttributeKind::CriticalChance, 1.0);
            let target = AttributeSet::default();
            let out = calculate_damage(&source, &target, &physical(100.0), &[], &mut rng());
            assert!(out.critical);
            assert_eq!(out.raw, 200.0);
        }

        #[test]
        fn armor_mitigates_physical() {
            let mut source = AttributeSet::default();
            source.override_value(AttributeKind::CriticalChance, 0.0);
            let mut target = AttributeSet::default();
            target.apply(AttributeKind::Armor, 100.0);
            let out = calculate_damage(&source, &target, &physical(100.0), &[], &mut rng());
            assert!((out.dealt - 50.0).abs() < 1e-4);
        }

        #[test]
        fn armor_does_not_mitigate_environmental_or_true() {
            let mut source = AttributeSet::default();
            source.override_value(AttributeKind::CriticalChance, 0.0);
            let mut target = AttributeSet::default();
            target.apply(AttributeKind::Armor, 100.0);

            let env = AbilityData {
                damage_type: DamageType::Environmental,
                base_value: 100.0,
                ..AbilityData::default()
            };
            assert_eq!(
                calculate_damage(&source, &target, &env, &[], &mut rng()).dealt,
                100.0
            );

            let true_dmg = AbilityData {
                damage_type: DamageType::True,
                base_value: 100.0,
                ..AbilityData::default()
            };
            assert_eq!(
                calculate_damage(&source, &target, &true_dmg, &[], &mut rng()).dealt,
                100.0
            );
        }

        #[test]
        fn flat_reduction_subtracts_last_and_floors_at_zero() {
            let mut source = AttributeSet::default();
            source.override_value(AttributeKind::CriticalChance, 0.0);
            let mut target = AttributeSet::default();
            target.apply(AttributeKind::FlatDamageReduction, 30.0);
            let out = calculate_damage(&source, &target, &physical(100.0), &[], &mut rng());
            assert_eq!(out.dealt, 70.0);

            target.apply(AttributeKind::FlatDamageReduction, 1000.0);
            let out = calculate_damage(&source, &target, &physical(100.0), &[], &mut rng());
            assert_eq!(out.dealt, 0.0);
        }

        #[test]
        fn weapon_roll_stays_in_range() {
            let mut source = AttributeSet::default();
            source.override_value(AttributeKind::CriticalChance, 0.0);
            let target = AttributeSet::default();
            let weapon = WeaponRoll {
                min: 40.0,
                max: 20.0,
            };
            let mut r = rng();
            for _ in 0..100 {
                let out = calculate_damage(&source, &target, &physical(0.0), &[weapon], &mut r);
                assert!(out.raw >= 40.0 && out.raw < 60.0, "raw was {}", out.raw);
            }
        }

        #[test]
        fn ratios_scale_with_stats() {
            let mut source = AttributeSet::default();
            source.override_value(AttributeKind::CriticalChance, 0.0);
            let mut target = AttributeSet::default();
            target.apply(AttributeKind::Health, -100.0); // 400/500

            let data = AbilityData {
                damage_type: DamageType::True,
                attack_power_ratio: 1.0,
                max_health_ratio: 0.1,
                missing_health_ratio: 0.5,
                ..AbilityData::default()
            };
            let out = calculate_damage(&source, &target, &data, &[], &mut rng());
            // 55 AP + 50 (10% of 500) + 50 (50% of 100 missing)
            assert!((out.raw - 155.0).abs() < 1e-4);
        }

        #[test]
        fn deterministic_for_same_seed() {
            let source = AttributeSet::default();
            let target = AttributeSet::default();
            let weapon = WeaponRoll {
                min: 10.0,
                max: 30.0,
            };
            let a = calculate_damage(&source, &target, &physical(50.0), &[weapon], &mut rng());
            let b = calculate_damage(&source, &target, &physical(50.0), &[weapon], &mut rng());
            assert_eq!(a, b);
        }
    }

    mod healing {
        use super::*;

        #[test]
        fn base_plus_spell_power() {
            let mut source = AttributeSet::default();
            source.apply(AttributeKind::SpellPower, 100.0);
            let target = AttributeSet::default();
            let data = AbilityData {
                damage_type: DamageType::Heal,
                base_value: 50.0,
                spell_power_ratio: 0.6,
                ..AbilityData::default()
            };
            assert_eq!(calculate_healing(&source, &target, &data), 110.0);
        }

        #[test]
        fn missing_health_ratio_heals_more_when_hurt() {
            let source = AttributeSet::default();
            let mut target = AttributeSet::default();
            let data = AbilityData {
                damage_type: DamageType::Heal,
                missing_health_ratio: 0.2,
                ..AbilityData::default()
            };
            assert_eq!(calculate_healing(&source, &target, &data), 0.0);
            target.apply(AttributeKind::Health, -200.0);
            assert_eq!(calculate_healing(&source, &target, &data), 40.0);
        }

        #[test]
        fn never_negative() {
            let source = AttributeSet::default();
            let target = AttributeSet::default();
            let data = AbilityData {
                damage_type: DamageType::Heal,
                base_value: -50.0,
                ..AbilityData::default()
            };
            assert_eq!(calculate_healing(&source, &target, &data), 0.0);
        }
    }
}
