//! Skirmish - MOBA combat systems with project descriptor tooling
//!
//! Skirmish is a single-binary tool and library pairing two concerns of an
//! Unreal-style game project: the build descriptors that declare its targets
//! and modules, and a deterministic, engine-independent implementation of
//! its combat systems (attributes, gameplay effects, abilities, equipment,
//! projectiles).
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to library)
//! - [`project`] - Build descriptor schema, loading, validation, fingerprints
//! - [`attributes`] - Character attribute set with clamping and derived stats
//! - [`effects`] - Gameplay effects, damage/healing executions, cooldown magnitudes
//! - [`abilities`] - Ability definitions, input slots, activation gating
//! - [`equipment`] - Items, stacking inventory, equipment slot rules
//! - [`combat`] - Characters, teams, the arena tick loop, projectiles
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! Skirmish maintains the following invariants:
//!
//! 1. Descriptors are validated before anything consumes them
//! 2. Attribute mutations flow through a single clamping entry point
//! 3. Simulations with the same seed and orders produce the same event log
//! 4. Reverting an expired effect restores exactly what it applied

pub mod abilities;
pub mod attributes;
pub mod cli;
pub mod combat;
pub mod effects;
pub mod equipment;
pub mod project;
pub mod ui;
