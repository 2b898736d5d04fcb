//! effects::magnitude
//!
//! Attack-speed-derived cooldown magnitudes for the basic attack.
//!
//! Attack speed is expressed in attacks per second, so the cooldown
//! between basic attacks is its reciprocal. Weapon-specific variants use
//! the weapon's own attack speed and fold in any bonus attack speed;
//! dual-wielding grants a flat bonus on top.

use crate::attributes::AttributeSet;

/// Bonus attack speed multiplier granted while dual-wielding.
pub const DUAL_WIELD_ATTACK_SPEED_BONUS: f32 = 0.15;

/// Cooldown of the basic attack from the character's own attack speed.
/// Zero attack speed yields a zero cooldown, matching a character that
/// cannot attack at all.
pub fn basic_attack_cooldown(attrs: &AttributeSet) -> f32 {
    if attrs.attack_speed <= 0.0 {
        0.0
    } else {
        1.0 / attrs.attack_speed
    }
}

/// Cooldown of an attack with a specific weapon, folding in bonus attack
/// speed (e.g. the dual-wield bonus).
pub fn weapon_attack_cooldown(weapon_attack_speed: f32, bonus_attack_speed: f32) -> f32 {
    let effective = weapon_attack_speed * (1.0 + bonus_attack_speed);
    if effective <= 0.0 {
        0.0
    } else {
        1.0 / effective
    }
}
