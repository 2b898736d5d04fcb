//! duel command - Run a seeded duel in the combat arena

use anyhow::Result;

use crate::cli::Context;
use crate::combat::{Arena, Character, CombatEvent, Team, Vec2};
use crate::equipment::{ItemSpec, ItemType, SlotType, WeaponStats};
use crate::ui::output;

const TICK_SECONDS: f32 = 0.1;

/// Fight two stock characters until one dies or the limit passes.
pub fn duel(ctx: &Context, seed: u64, limit: f32, json: bool) -> Result<()> {
    let mut arena = Arena::new(seed);

    let mut fighter = Character::new("fighter", Team::BottomSide, Vec2::default());
    give_weapon(&mut fighter, SlotType::MainHand, sword());
    give_weapon(&mut fighter, SlotType::OffHand, sword());

    let mut archer = Character::new("archer", Team::TopSide, Vec2::new(700.0, 0.0));
    give_weapon(&mut archer, SlotType::MainHand, bow());

    let fighter = arena.spawn(fighter)?;
    let archer = arena.spawn(archer)?;
    arena.set_target(&fighter, Some(archer.clone()))?;
    arena.set_target(&archer, Some(fighter.clone()))?;
    arena.set_attacking(&fighter, true)?;
    arena.set_attacking(&archer, true)?;

    while arena.time() < limit && arena.living().count() > 1 {
        arena.tick(TICK_SECONDS);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(arena.events())?);
        return Ok(());
    }

    for entry in arena.events() {
        output::print(format!("[{:6.1}s] {}", entry.time, describe(&entry.event)), ctx.verbosity);
    }
    let mut living = arena.living();
    match (living.next(), living.next()) {
        (Some(winner), None) => {
            output::print(format!("{} wins after {:.1}s", winner, arena.time()), ctx.verbosity);
        }
        _ => {
            output::print(
                format!("draw after {:.1}s (time limit)", arena.time()),
                ctx.verbosity,
            );
        }
    }
    Ok(())
}

fn describe(event: &CombatEvent) -> String {
    match event {
        CombatEvent::Damage {
            source,
            target,
            ability,
            breakdown,
        } => {
            let crit = if breakdown.critical { " (crit)" } else { "" };
            format!(
                "{} hits {} with {} for {:.0}{}",
                source, target, ability, breakdown.dealt, crit
            )
        }
        CombatEvent::Healing {
            source,
            target,
            ability,
            amount,
        } => format!("{} heals {} with {} for {:.0}", source, target, ability, amount),
        CombatEvent::EffectExpired { target, effect } => {
            format!("{} on {} expired", effect, target)
        }
        CombatEvent::ProjectileFired { source, ability } => {
            format!("{} fires {}", source, ability)
        }
        CombatEvent::Death { target, killer } => match killer {
            Some(killer) => format!("{} is slain by {}", target, killer),
            None => format!("{} dies", target),
        },
        CombatEvent::LevelUp { target, level } => {
            format!("{} reaches level {}", target, level)
        }
    }
}

fn give_weapon(character: &mut Character, slot: SlotType, spec: ItemSpec) {
    // Stock characters have empty inventories, so this cannot fail.
    if let Ok(ids) = character.inventory.add_item(&spec, 1) {
        let _ = character.equip(slot, ids[0]);
    }
}

fn sword() -> ItemSpec {
    ItemSpec {
        name: "Shortsword".to_string(),
        item_type: ItemType::OneHand,
        max_stacks: 1,
        unique_owned: false,
        module_slots: 0,
        granted_effects: Vec::new(),
        granted_abilities: Vec::new(),
        weapon: Some(WeaponStats {
            min_damage: 30.0,
            max_damage: 50.0,
            attack_speed: 1.2,
            attack_range: 150.0,
            projectile: false,
        }),
    }
}

fn bow() -> ItemSpec {
    ItemSpec {
        name: "Longbow".to_string(),
        item_type: ItemType::OneHand,
        max_stacks: 1,
        unique_owned: false,
        module_slots: 0,
        granted_effects: Vec::new(),
        granted_abilities: Vec::new(),
        weapon: Some(WeaponStats {
            min_damage: 45.0,
            max_damage: 70.0,
            attack_speed: 0.8,
            attack_range: 650.0,
            projectile: true,
        }),
    }
}
