//! combat::arena
//!
//! The arena owns every character, every projectile in flight, and the
//! single seeded random source. All simulation goes through [`Arena::tick`]
//! in fixed steps, so a given seed and input sequence always replays to
//! the same combat log.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::abilities::{AbilityData, AbilityError, AbilityInput, DamageType};
use crate::attributes::{AttributeEvent, AttributeKind, REGEN_PERIOD_SECONDS};
use crate::effects::{calculate_damage, calculate_healing, WeaponRoll};

use super::projectile::{Projectile, ProjectileFlight, ProjectileStep, PROJECTILE_HIT_RADIUS};
use super::{Character, CharacterId, CombatError, CombatEvent, Vec2};

/// Seconds after the last hit before a character leaves combat.
pub const COMBAT_DECAY_SECONDS: f32 = 5.0;

/// Experience awarded for a kill, per victim level.
pub const KILL_EXPERIENCE_PER_LEVEL: f32 = 50.0;

/// A combat log entry with the simulation time it happened at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatLogEntry {
    pub time: f32,
    #[serde(flatten)]
    pub event: CombatEvent,
}

/// The combat simulation.
#[derive(Debug)]
pub struct Arena {
    characters: BTreeMap<CharacterId, Character>,
    projectiles: Vec<Projectile>,
    rng: StdRng,
    time: f32,
    regen_timer: f32,
    events: Vec<CombatLogEntry>,
}

impl Arena {
    /// An empty arena seeded for a deterministic run.
    pub fn new(seed: u64) -> Self {
        Self {
            characters: BTreeMap::new(),
            projectiles: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            time: 0.0,
            regen_timer: 0.0,
            events: Vec::new(),
        }
    }

    /// Add a character. Its id derives from its name.
    pub fn spawn(&mut self, character: Character) -> Result<CharacterId, CombatError> {
        let id = CharacterId::new(character.name.clone());
        if self.characters.contains_key(&id) {
            return Err(CombatError::DuplicateCharacter(id));
        }
        self.characters.insert(id.clone(), character);
        Ok(id)
    }

    pub fn character(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.get(id)
    }

    pub fn character_mut(&mut self, id: &CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id)
    }

    /// Seconds simulated so far.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Everything that happened, in order.
    pub fn events(&self) -> &[CombatLogEntry] {
        &self.events
    }

    /// Ids of characters still alive, in id order.
    pub fn living(&self) -> impl Iterator<Item = &CharacterId> {
        self.characters
            .iter()
            .filter(|(_, c)| !c.attrs.is_dead())
            .map(|(id, _)| id)
    }

    fn require(&self, id: &CharacterId) -> Result<&Character, CombatError> {
        self.characters
            .get(id)
            .ok_or_else(|| CombatError::UnknownCharacter(id.clone()))
    }

    /// Point a character at a hostile target, or clear its target.
    pub fn set_target(
        &mut self,
        source_id: &CharacterId,
        target_id: Option<CharacterId>,
    ) -> Result<(), CombatError> {
        let source = self.require(source_id)?;
        if let Some(target_id) = &target_id {
            let target = self.require(target_id)?;
            if target.attrs.is_dead() {
                return Err(CombatError::Dead(target_id.clone()));
            }
            if !source.team.is_hostile(target.team) {
                return Err(CombatError::NotHostile {
                    attacker: source_id.clone(),
                    target: target_id.clone(),
                });
            }
        }
        self.characters
            .get_mut(source_id)
            .ok_or_else(|| CombatError::UnknownCharacter(source_id.clone()))?
            .set_target(target_id);
        Ok(())
    }

    /// Start or stop auto-attacking the current target. While attacking,
    /// the character closes to attack range on its own during ticks.
    pub fn set_attacking(
        &mut self,
        source_id: &CharacterId,
        attacking: bool,
    ) -> Result<(), CombatError> {
        let source = self
            .characters
            .get_mut(source_id)
            .ok_or_else(|| CombatError::UnknownCharacter(source_id.clone()))?;
        if attacking && source.target().is_none() {
            return Err(CombatError::NoTarget);
        }
        source.set_attacking(attacking);
        Ok(())
    }

    /// Activate an ability slot right now.
    ///
    /// The weapon slot performs a basic attack on the current target.
    /// Healing abilities target the caster. Damaging abilities hit the
    /// current target if it is in range.
    pub fn activate(
        &mut self,
        source_id: &CharacterId,
        slot: AbilityInput,
    ) -> Result<(), CombatError> {
        let source = self.require(source_id)?;
        if source.attrs.is_dead() {
            return Err(CombatError::Dead(source_id.clone()));
        }

        if slot == AbilityInput::WeaponAbility {
            let target_id = source.target().cloned().ok_or(CombatError::NoTarget)?;
            return self.basic_attack(source_id, &target_id);
        }

        let ability = source
            .abilities
            .get(slot)
            .ok_or(AbilityError::NotGranted(slot))?
            .clone();

        if ability.data.damage_type == DamageType::Heal {
            let Some(source) = self.characters.get_mut(source_id) else {
                return Err(CombatError::UnknownCharacter(source_id.clone()));
            };
            source.abilities.activate(slot, &mut source.attrs, None)?;
            let amount = calculate_healing(&source.attrs, &source.attrs, &ability.data);
            let events = source.attrs.apply(AttributeKind::Health, amount);
            self.log(CombatEvent::Healing {
                source: source_id.clone(),
                target: source_id.clone(),
                ability: ability.name.clone(),
                amount,
            });
            self.log_attribute_events(source_id, &events, None);
            return Ok(());
        }

        let target_id = source.target().cloned().ok_or(CombatError::NoTarget)?;
        let target = self.require(&target_id)?;
        if target.attrs.is_dead() {
            return Err(CombatError::Dead(target_id.clone()));
        }
        let distance = source.position.distance(target.position);

        let Some(source) = self.characters.get_mut(source_id) else {
            return Err(CombatError::UnknownCharacter(source_id.clone()));
        };
        source
            .abilities
            .activate(slot, &mut source.attrs, Some(distance))?;
        let rolls = source.rolls_for(ability.data.weapon_damage);
        source.enter_combat(COMBAT_DECAY_SECONDS);
        self.resolve_damage(source_id, &target_id, &ability.name, &ability.data, &rolls);
        Ok(())
    }

    fn basic_attack(
        &mut self,
        source_id: &CharacterId,
        target_id: &CharacterId,
    ) -> Result<(), CombatError> {
        let target = self.require(target_id)?;
        if target.attrs.is_dead() {
            return Err(CombatError::Dead(target_id.clone()));
        }
        let target_position = target.position;

        let source = self
            .characters
            .get_mut(source_id)
            .ok_or_else(|| CombatError::UnknownCharacter(source_id.clone()))?;
        let distance = source.position.distance(target_position);
        // The equipped weapon decides the reach of the basic attack, not
        // the weapon ability's own range.
        let range = source.attack_range();
        if distance > range {
            let name = source
                .abilities
                .get(AbilityInput::WeaponAbility)
                .map(|a| a.name.clone())
                .unwrap_or_default();
            return Err(AbilityError::OutOfRange {
                name,
                range,
                distance,
            }
            .into());
        }
        let cooldown = source.attack_cooldown();
        let ability = source.abilities.activate_with_cooldown(
            AbilityInput::WeaponAbility,
            &mut source.attrs,
            None,
            cooldown,
        )?;
        let rolls = source.next_attack_roll();
        source.enter_combat(COMBAT_DECAY_SECONDS);

        if source.attacks_with_projectile() {
            let projectile = Projectile::new(
                source_id.clone(),
                source.team,
                source.position,
                ProjectileFlight::Homing {
                    target: target_id.clone(),
                },
                ability.name.clone(),
                ability.data,
                rolls,
            );
            self.projectiles.push(projectile);
            self.log(CombatEvent::ProjectileFired {
                source: source_id.clone(),
                ability: ability.name,
            });
        } else {
            self.resolve_damage(source_id, target_id, &ability.name, &ability.data, &rolls);
        }
        Ok(())
    }

    /// Loose the basic attack along a direction instead of at a target.
    ///
    /// Requires a projectile weapon. The shot travels up to the weapon's
    /// attack range and hits the first hostile character in its path.
    pub fn attack_towards(
        &mut self,
        source_id: &CharacterId,
        direction: Vec2,
    ) -> Result<(), CombatError> {
        let source = self
            .characters
            .get_mut(source_id)
            .ok_or_else(|| CombatError::UnknownCharacter(source_id.clone()))?;
        if source.attrs.is_dead() {
            return Err(CombatError::Dead(source_id.clone()));
        }
        if !source.attacks_with_projectile() {
            return Err(CombatError::NotRanged(source_id.clone()));
        }

        let cooldown = source.attack_cooldown();
        let max_distance = source.attack_range();
        let ability = source.abilities.activate_with_cooldown(
            AbilityInput::WeaponAbility,
            &mut source.attrs,
            None,
            cooldown,
        )?;
        let rolls = source.next_attack_roll();
        source.enter_combat(COMBAT_DECAY_SECONDS);

        let projectile = Projectile::new(
            source_id.clone(),
            source.team,
            source.position,
            ProjectileFlight::Directional {
                direction: direction.normalized(),
                max_distance,
            },
            ability.name.clone(),
            ability.data,
            rolls,
        );
        self.projectiles.push(projectile);
        self.log(CombatEvent::ProjectileFired {
            source: source_id.clone(),
            ability: ability.name,
        });
        Ok(())
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.time += dt;
        let ids: Vec<CharacterId> = self.characters.keys().cloned().collect();

        // Effects, ability cooldowns, combat decay.
        for id in &ids {
            let Some(character) = self.characters.get_mut(id) else {
                continue;
            };
            let (events, expired) = character.effects.tick(dt, &mut character.attrs);
            character.abilities.tick(dt);
            character.tick_combat_timer(dt);
            for name in expired {
                self.log(CombatEvent::EffectExpired {
                    target: id.clone(),
                    effect: name,
                });
            }
            self.log_attribute_events(id, &events, None);
        }

        // Periodic regeneration. Health regeneration pauses in combat.
        self.regen_timer += dt;
        while self.regen_timer >= REGEN_PERIOD_SECONDS {
            self.regen_timer -= REGEN_PERIOD_SECONDS;
            for id in &ids {
                let Some(character) = self.characters.get_mut(id) else {
                    continue;
                };
                if character.attrs.is_dead() {
                    continue;
                }
                let mana = character.attrs.mana_regen;
                character.attrs.apply(AttributeKind::Mana, mana);
                if !character.is_in_combat() {
                    let health = character.attrs.health_regen;
                    character.attrs.apply(AttributeKind::Health, health);
                }
            }
        }

        self.tick_projectiles(dt);
        self.tick_attackers(&ids, dt);
    }

    /// Run the simulation in fixed steps for a duration.
    pub fn simulate(&mut self, seconds: f32, dt: f32) {
        let steps = (seconds / dt).ceil() as u64;
        for _ in 0..steps {
            self.tick(dt);
        }
    }

    fn tick_projectiles(&mut self, dt: f32) {
        let mut in_flight = std::mem::take(&mut self.projectiles);
        in_flight.retain_mut(|projectile| {
            match projectile.flight.clone() {
                ProjectileFlight::Homing { target } => {
                    let target_position = self
                        .characters
                        .get(&target)
                        .filter(|c| !c.attrs.is_dead())
                        .map(|c| c.position);
                    match projectile.advance(dt, target_position) {
                        ProjectileStep::Flying => true,
                        ProjectileStep::Expired => false,
                        ProjectileStep::Reached => {
                            self.resolve_damage(
                                &projectile.source,
                                &target,
                                &projectile.ability,
                                &projectile.data,
                                &projectile.rolls,
                            );
                            false
                        }
                    }
                }
                ProjectileFlight::Directional { .. } => {
                    let start = projectile.position;
                    let step = projectile.advance(dt, None);
                    // Sweep the whole step so fast shots cannot tunnel
                    // through a target between ticks; the nearest hostile
                    // along the path is the one hit.
                    let hit = self
                        .characters
                        .iter()
                        .filter(|(_, c)| {
                            !c.attrs.is_dead() && projectile.team.is_hostile(c.team)
                        })
                        .filter(|(_, c)| {
                            start.segment_distance(projectile.position, c.position)
                                <= PROJECTILE_HIT_RADIUS
                        })
                        .min_by(|(_, c1), (_, c2)| {
                            start
                                .distance(c1.position)
                                .total_cmp(&start.distance(c2.position))
                        })
                        .map(|(id, _)| id.clone());
                    if let Some(target) = hit {
                        self.resolve_damage(
                            &projectile.source,
                            &target,
                            &projectile.ability,
                            &projectile.data,
                            &projectile.rolls,
                        );
                        return false;
                    }
                    step == ProjectileStep::Flying
                }
            }
        });
        in_flight.extend(self.projectiles.drain(..));
        self.projectiles = in_flight;
    }

    fn tick_attackers(&mut self, ids: &[CharacterId], dt: f32) {
        for id in ids {
            let Some(character) = self.characters.get(id) else {
                continue;
            };
            if character.attrs.is_dead() || !character.is_attacking() {
                continue;
            }
            let Some(target_id) = character.target().cloned() else {
                continue;
            };

            let target_alive = self
                .characters
                .get(&target_id)
                .is_some_and(|t| !t.attrs.is_dead());
            if !target_alive {
                if let Some(character) = self.characters.get_mut(id) {
                    character.set_target(None);
                }
                continue;
            }

            let target_position = self.characters[&target_id].position;
            let character = &self.characters[id];
            let distance = character.position.distance(target_position);

            if distance > character.attack_range() {
                let step = character.attrs.movement_speed * dt;
                if let Some(character) = self.characters.get_mut(id) {
                    character.position = character.position.step_towards(target_position, step);
                }
            } else {
                // Cooldown and similar failures just mean "not this tick".
                let _ = self.basic_attack(id, &target_id);
            }
        }
    }

    fn resolve_damage(
        &mut self,
        source_id: &CharacterId,
        target_id: &CharacterId,
        ability: &str,
        data: &AbilityData,
        rolls: &[WeaponRoll],
    ) {
        let Some(source_attrs) = self.characters.get(source_id).map(|c| c.attrs.clone()) else {
            return;
        };
        let Some(target) = self.characters.get_mut(target_id) else {
            return;
        };
        if target.attrs.is_dead() {
            return;
        }

        let breakdown = calculate_damage(&source_attrs, &target.attrs, data, rolls, &mut self.rng);
        let events = target.attrs.apply(AttributeKind::Health, -breakdown.dealt);
        target.enter_combat(COMBAT_DECAY_SECONDS);

        self.log(CombatEvent::Damage {
            source: source_id.clone(),
            target: target_id.clone(),
            ability: ability.to_string(),
            breakdown,
        });
        self.log_attribute_events(target_id, &events, Some(source_id));
    }

    /// Record deaths and level-ups out of a batch of attribute events,
    /// awarding kill experience when a killer is known.
    fn log_attribute_events(
        &mut self,
        subject: &CharacterId,
        events: &[AttributeEvent],
        killer: Option<&CharacterId>,
    ) {
        for event in events {
            match event {
                AttributeEvent::Died => {
                    self.log(CombatEvent::Death {
                        target: subject.clone(),
                        killer: killer.cloned(),
                    });
                    self.handle_death(subject, killer);
                }
                AttributeEvent::LeveledUp { level } => {
                    self.log(CombatEvent::LevelUp {
                        target: subject.clone(),
                        level: *level,
                    });
                }
                AttributeEvent::Changed { .. } => {}
            }
        }
    }

    fn handle_death(&mut self, victim_id: &CharacterId, killer: Option<&CharacterId>) {
        let victim_level = self
            .characters
            .get(victim_id)
            .map(|c| c.attrs.level())
            .unwrap_or(1);

        // Nobody keeps targeting the dead.
        let retargeting: Vec<CharacterId> = self
            .characters
            .iter()
            .filter(|(_, c)| c.target() == Some(victim_id))
            .map(|(id, _)| id.clone())
            .collect();
        for id in retargeting {
            if let Some(character) = self.characters.get_mut(&id) {
                character.set_target(None);
            }
        }

        if let Some(killer_id) = killer {
            let experience = victim_level as f32 * KILL_EXPERIENCE_PER_LEVEL;
            let events = match self.characters.get_mut(killer_id) {
                Some(killer) if !killer.attrs.is_dead() => {
                    killer.attrs.apply(AttributeKind::Experience, experience)
                }
                _ => Vec::new(),
            };
            self.log_attribute_events(killer_id, &events, None);
        }
    }

    fn log(&mut self, event: CombatEvent) {
        self.events.push(CombatLogEntry {
            time: self.time,
            event,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::{Ability, WeaponDamageKind};
    use crate::combat::{Team, Vec2};
    use crate::equipment::{ItemSpec, ItemType, SlotType, WeaponStats};

    fn sword() -> ItemSpec {
        ItemSpec {
            name: "Sword".to_string(),
            item_type: ItemType::OneHand,
            max_stacks: 1,
            unique_owned: false,
            module_slots: 0,
            granted_effects: Vec::new(),
            granted_abilities: Vec::new(),
            weapon: Some(WeaponStats {
                min_damage: 40.0,
                max_damage: 60.0,
                attack_speed: 1.0,
                attack_range: 150.0,
                projectile: false,
            }),
        }
    }

    fn bow() -> ItemSpec {
        ItemSpec {
            weapon: Some(WeaponStats {
                min_damage: 40.0,
                max_damage: 60.0,
                attack_speed: 1.0,
                attack_range: 900.0,
                projectile: true,
            }),
            name: "Bow".to_string(),
            ..sword()
        }
    }

    fn duelists(arena: &mut Arena, gap: f32) -> (CharacterId, CharacterId) {
        let alpha = Character::new("alpha", Team::BottomSide, Vec2::default());
        let bravo = Character::new("bravo", Team::TopSide, Vec2::new(gap, 0.0));
        let a = arena.spawn(alpha).unwrap();
        let b = arena.spawn(bravo).unwrap();
        (a, b)
    }

    #[test]
    fn duplicate_spawn_rejected() {
        let mut arena = Arena::new(1);
        arena
            .spawn(Character::new("alpha", Team::BottomSide, Vec2::default()))
            .unwrap();
        assert!(matches!(
            arena.spawn(Character::new("alpha", Team::TopSide, Vec2::default())),
            Err(CombatError::DuplicateCharacter(_))
        ));
    }

    #[test]
    fn targeting_requires_hostility() {
        let mut arena = Arena::new(1);
        let a = arena
            .spawn(Character::new("alpha", Team::BottomSide, Vec2::default()))
            .unwrap();
        let b = arena
            .spawn(Character::new("beta", Team::BottomSide, Vec2::default()))
            .unwrap();
        let err = arena.set_target(&a, Some(b)).unwrap_err();
        assert!(matches!(err, CombatError::NotHostile { .. }));
        assert_eq!(err.to_string(), "'beta' is not hostile to 'alpha'");
    }

    #[test]
    fn melee_attack_deals_damage_and_flags_combat() {
        let mut arena = Arena::new(7);
        let (a, b) = duelists(&mut arena, 100.0);
        arena.set_target(&a, Some(b.clone())).unwrap();
        arena.activate(&a, AbilityInput::WeaponAbility).unwrap();

        let target = arena.character(&b).unwrap();
        assert!(target.attrs.health < target.attrs.max_health);
        assert!(target.is_in_combat());
        assert!(arena.character(&a).unwrap().is_in_combat());
        assert!(arena
            .events()
            .iter()
            .any(|e| matches!(e.event, CombatEvent::Damage { .. })));
    }

    #[test]
    fn attack_out_of_range_rejected() {
        let mut arena = Arena::new(7);
        let (a, b) = duelists(&mut arena, 500.0);
        arena.set_target(&a, Some(b)).unwrap();
        assert!(matches!(
            arena.activate(&a, AbilityInput::WeaponAbility),
            Err(CombatError::Ability(AbilityError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn attacker_closes_distance_then_hits() {
        let mut arena = Arena::new(7);
        let (a, b) = duelists(&mut arena, 1000.0);
        arena.set_target(&a, Some(b.clone())).unwrap();
        arena.set_attacking(&a, true).unwrap();

        // 850 units to cover at 600/s.
        arena.simulate(2.0, 0.1);
        let target = arena.character(&b).unwrap();
        assert!(target.attrs.health < target.attrs.max_health);
    }

    #[test]
    fn projectile_attack_hits_after_flight() {
        let mut arena = Arena::new(7);
        let (a, b) = duelists(&mut arena, 800.0);
        {
            let archer = arena.character_mut(&a).unwrap();
            let ids = archer.inventory.add_item(&bow(), 1).unwrap();
            archer.equip(SlotType::MainHand, ids[0]).unwrap();
        }
        arena.set_target(&a, Some(b.clone())).unwrap();
        arena.activate(&a, AbilityInput::WeaponAbility).unwrap();

        assert!(arena
            .events()
            .iter()
            .any(|e| matches!(e.event, CombatEvent::ProjectileFired { .. })));
        let before = arena.character(&b).unwrap().attrs.health;
        assert_eq!(before, arena.character(&b).unwrap().attrs.max_health);

        // 800 units at 1500/s lands within a second.
        arena.simulate(1.0, 0.1);
        assert!(arena.character(&b).unwrap().attrs.health < before);
    }

    #[test]
    fn basic_attack_range_comes_from_weapon() {
        let mut arena = Arena::new(3);
        let (a, b) = duelists(&mut arena, 800.0);
        {
            let archer = arena.character_mut(&a).unwrap();
            let ids = archer.inventory.add_item(&bow(), 1).unwrap();
            archer.equip(SlotType::MainHand, ids[0]).unwrap();
        }
        arena.set_target(&a, Some(b.clone())).unwrap();
        // 800 units is far past the stock 150 range but inside the bow's.
        arena.activate(&a, AbilityInput::WeaponAbility).unwrap();

        // Past the bow's reach the rejection reports the weapon's range.
        arena.character_mut(&b).unwrap().position = Vec2::new(1000.0, 0.0);
        arena.simulate(1.5, 0.1);
        match arena.activate(&a, AbilityInput::WeaponAbility) {
            Err(CombatError::Ability(AbilityError::OutOfRange { range, .. })) => {
                assert_eq!(range, 900.0);
            }
            other => panic!("expected out of range, got {:?}", other),
        }
    }

    #[test]
    fn directional_shot_hits_first_hostile_in_path() {
        let mut arena = Arena::new(5);
        let (a, b) = duelists(&mut arena, 400.0);
        {
            let archer = arena.character_mut(&a).unwrap();
            let ids = archer.inventory.add_item(&bow(), 1).unwrap();
            archer.equip(SlotType::MainHand, ids[0]).unwrap();
        }
        arena.attack_towards(&a, Vec2::new(1.0, 0.0)).unwrap();

        arena.simulate(0.5, 0.1);
        let target = arena.character(&b).unwrap();
        assert!(target.attrs.health < target.attrs.max_health);
    }

    #[test]
    fn directional_shot_stops_at_weapon_range() {
        let mut arena = Arena::new(5);
        let (a, b) = duelists(&mut arena, 1000.0);
        {
            let archer = arena.character_mut(&a).unwrap();
            let ids = archer.inventory.add_item(&bow(), 1).unwrap();
            archer.equip(SlotType::MainHand, ids[0]).unwrap();
        }
        arena.attack_towards(&a, Vec2::new(1.0, 0.0)).unwrap();

        // The bow reaches 900 units; the target stands at 1000.
        arena.simulate(2.0, 0.1);
        let target = arena.character(&b).unwrap();
        assert_eq!(target.attrs.health, target.attrs.max_health);
        assert!(!arena
            .events()
            .iter()
            .any(|e| matches!(e.event, CombatEvent::Damage { .. })));
    }

    #[test]
    fn directional_shot_needs_projectile_weapon() {
        let mut arena = Arena::new(5);
        let (a, _) = duelists(&mut arena, 400.0);
        assert!(matches!(
            arena.attack_towards(&a, Vec2::new(1.0, 0.0)),
            Err(CombatError::NotRanged(_))
        ));
    }

    #[test]
    fn kill_awards_experience_and_clears_targets() {
        let mut arena = Arena::new(7);
        let (a, b) = duelists(&mut arena, 100.0);
        {
            let victim = arena.character_mut(&b).unwrap();
            victim.attrs.override_value(AttributeKind::Health, 1.0);
        }
        arena.set_target(&a, Some(b.clone())).unwrap();
        arena.activate(&a, AbilityInput::WeaponAbility).unwrap();

        assert!(arena.character(&b).unwrap().attrs.is_dead());
        assert!(arena
            .events()
            .iter()
            .any(|e| matches!(&e.event, CombatEvent::Death { killer: Some(k), .. } if *k == a)));
        assert_eq!(
            arena.character(&a).unwrap().attrs.experience,
            KILL_EXPERIENCE_PER_LEVEL
        );
        assert_eq!(arena.character(&a).unwrap().target(), None);
        assert_eq!(arena.living().count(), 1);
    }

    #[test]
    fn healing_ability_heals_caster() {
        let mut arena = Arena::new(7);
        let (a, _) = duelists(&mut arena, 100.0);
        {
            let caster = arena.character_mut(&a).unwrap();
            caster.attrs.override_value(AttributeKind::Health, 100.0);
            caster.abilities.grant(
                AbilityInput::Ability1,
                Ability {
                    name: "Mend".to_string(),
                    data: AbilityData {
                        damage_type: DamageType::Heal,
                        weapon_damage: WeaponDamageKind::None,
                        base_value: 120.0,
                        ..AbilityData::default()
                    },
                    passive: false,
                    range: 0.0,
                    mana_cost: 50.0,
                    cooldown: 10.0,
                },
            );
        }
        arena.activate(&a, AbilityInput::Ability1).unwrap();
        let caster = arena.character(&a).unwrap();
        assert_eq!(caster.attrs.health, 220.0);
        assert_eq!(caster.attrs.mana, 250.0);
    }

    #[test]
    fn regeneration_ticks_every_period() {
        let mut arena = Arena::new(7);
        let (a, _) = duelists(&mut arena, 100.0);
        {
            let c = arena.character_mut(&a).unwrap();
            c.attrs.override_value(AttributeKind::Health, 100.0);
            c.attrs.override_value(AttributeKind::Mana, 100.0);
        }
        arena.simulate(REGEN_PERIOD_SECONDS, 0.5);
        let c = arena.character(&a).unwrap();
        assert_eq!(c.attrs.health, 100.0 + c.attrs.health_regen);
        assert_eq!(c.attrs.mana, 100.0 + c.attrs.mana_regen);
    }

    #[test]
    fn health_regen_pauses_in_combat() {
        let mut arena = Arena::new(7);
        let (a, b) = duelists(&mut arena, 100.0);
        arena.set_target(&a, Some(b.clone())).unwrap();
        arena.activate(&a, AbilityInput::WeaponAbility).unwrap();
        arena.simulate(REGEN_PERIOD_SECONDS / 2.0, 0.5);
        // Refresh the target's combat window so it spans the regen tick.
        arena.activate(&a, AbilityInput::WeaponAbility).unwrap();
        let hurt = arena.character(&b).unwrap().attrs.health;

        arena.simulate(REGEN_PERIOD_SECONDS / 2.0, 0.5);
        let target = arena.character(&b).unwrap();
        assert!(target.is_in_combat());
        assert_eq!(target.attrs.health, hurt);
    }

    #[test]
    fn same_seed_same_outcome() {
        let run = |seed: u64| -> f32 {
            let mut arena = Arena::new(seed);
            let (a, b) = duelists(&mut arena, 100.0);
            {
                let c = arena.character_mut(&a).unwrap();
                let ids = c.inventory.add_item(&sword(), 1).unwrap();
                c.equip(SlotType::MainHand, ids[0]).unwrap();
            }
            {
                // Enough health that no run ends early.
                let c = arena.character_mut(&b).unwrap();
                c.attrs.override_value(AttributeKind::MaxHealth, 100_000.0);
                c.attrs.override_value(AttributeKind::Health, 100_000.0);
            }
            arena.set_target(&a, Some(b.clone())).unwrap();
            arena.set_attacking(&a, true).unwrap();
            arena.simulate(10.0, 0.1);
            arena.character(&b).unwrap().attrs.health
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }
}
