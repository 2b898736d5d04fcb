//! effects
//!
//! Gameplay effects: attribute modifiers with a duration policy.
//!
//! # Overview
//!
//! A [`GameplayEffect`] is a named bundle of [`Modifier`]s. Instant effects
//! apply once and are forgotten. Timed and infinite effects are tracked in
//! an [`EffectSet`] and reverted when they expire or are removed, which is
//! what lets equipment grant stats on equip and take them back on unequip.
//!
//! # Revert Semantics
//!
//! Each tracked effect records the delta it requested per attribute and
//! reverts by applying the negation. Because every mutation flows through
//! the attribute layer's clamping, apply-then-revert lands back on the
//! original value whenever the applied value stayed inside its clamp range.
//!
//! Submodules:
//! - [`execution`] - damage and healing execution calculations
//! - [`magnitude`] - attack-speed-derived cooldown magnitudes

pub mod execution;
pub mod magnitude;

pub use execution::{calculate_damage, calculate_healing, DamageBreakdown, WeaponRoll};

use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeEvent, AttributeKind, AttributeSet};

/// How a modifier combines with the attribute's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModOp {
    /// Add the magnitude.
    Add,
    /// Multiply the current value by the magnitude.
    Multiply,
    /// Replace the current value with the magnitude.
    Override,
}

/// One attribute modification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    /// The attribute to modify.
    pub attribute: AttributeKind,
    /// How to combine with the current value.
    pub op: ModOp,
    /// The magnitude of the modification.
    pub magnitude: f32,
}

/// How long an effect lasts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectDuration {
    /// Applies once, never reverted.
    Instant,
    /// Reverted after `seconds`.
    Timed { seconds: f32 },
    /// Reverted only on explicit removal.
    Infinite,
}

/// A named bundle of modifiers with a duration policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameplayEffect {
    /// Effect name; removal is by name.
    pub name: String,
    /// Duration policy.
    pub duration: EffectDuration,
    /// Modifiers applied in order.
    pub modifiers: Vec<Modifier>,
}

impl GameplayEffect {
    /// An instant effect.
    pub fn instant(name: impl Into<String>, modifiers: Vec<Modifier>) -> Self {
        Self {
            name: name.into(),
            duration: EffectDuration::Instant,
            modifiers,
        }
    }

    /// A timed effect.
    pub fn timed(name: impl Into<String>, seconds: f32, modifiers: Vec<Modifier>) -> Self {
        Self {
            name: name.into(),
            duration: EffectDuration::Timed { seconds },
            modifiers,
        }
    }

    /// An infinite effect (equipment grants use these).
    pub fn infinite(name: impl Into<String>, modifiers: Vec<Modifier>) -> Self {
        Self {
            name: name.into(),
            duration: EffectDuration::Infinite,
            modifiers,
        }
    }
}

/// A tracked, currently-active effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    /// The effect definition.
    pub effect: GameplayEffect,
    /// Seconds remaining; `None` for infinite effects.
    pub remaining: Option<f32>,
    /// Deltas recorded at apply time, reverted on expiry.
    applied: Vec<(AttributeKind, f32)>,
}

/// The set of effects active on one character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectSet {
    active: Vec<ActiveEffect>,
}

impl EffectSet {
    /// Apply an effect to an attribute set. Timed and infinite effects are
    /// tracked for later revert; instant effects are not.
    pub fn apply(
        &mut self,
        effect: GameplayEffect,
        attrs: &mut AttributeSet,
    ) -> Vec<AttributeEvent> {
        let mut events = Vec::new();
        let mut applied = Vec::new();

        for modifier in &effect.modifiers {
            let current = attrs.value(modifier.attribute);
            let delta = match modifier.op {
                ModOp::Add => modifier.magnitude,
                ModOp::Multiply => current * (modifier.magnitude - 1.0),
                ModOp::Override => modifier.magnitude - current,
            };
            events.extend(attrs.apply(modifier.attribute, delta));
            applied.push((modifier.attribute, delta));
        }

        let remaining = match effect.duration {
            EffectDuration::Instant => return events,
            EffectDuration::Timed { seconds } => Some(seconds),
            EffectDuration::Infinite => None,
        };
        self.active.push(ActiveEffect {
            effect,
            remaining,
            applied,
        });
        events
    }

    /// Remove every active effect with the given name, reverting what it
    /// applied. Returns the resulting attribute events.
    pub fn remove(&mut self, name: &str, attrs: &mut AttributeSet) -> Vec<AttributeEvent> {
        let mut events = Vec::new();
        let mut kept = Vec::with_capacity(self.active.len());
        for active in self.active.drain(..) {
            if active.effect.name == name {
                events.extend(revert(&active, attrs));
            } else {
                kept.push(active);
            }
        }
        self.active = kept;
        events
    }

    /// Advance timers by `dt` seconds, reverting expired effects. Returns
    /// attribute events plus the names of effects that expired.
    pub fn tick(&mut self, dt: f32, attrs: &mut AttributeSet) -> (Vec<AttributeEvent>, Vec<String>) {
        let mut events = Vec::new();
        let mut expired = Vec::new();
        let mut kept = Vec::with_capacity(self.active.len());
        for mut active in self.active.drain(..) {
            match active.remaining {
                Some(remaining) if remaining <= dt => {
                    events.extend(revert(&active, attrs));
                    expired.push(active.effect.name);
                }
                Some(remaining) => {
                    active.remaining = Some(remaining - dt);
                    kept.push(active);
                }
                None => kept.push(active),
            }
        }
        self.active = kept;
        (events, expired)
    }

    /// Currently tracked effects.
    pub fn active(&self) -> &[ActiveEffect] {
        &self.active
    }
}

fn revert(active: &ActiveEffect, attrs: &mut AttributeSet) -> Vec<AttributeEvent> {
    let mut events = Vec::new();
    for (kind, delta) in active.applied.iter().rev() {
        events.extend(attrs.apply(*kind, -delta));
    }
    events
}
