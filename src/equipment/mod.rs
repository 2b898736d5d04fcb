//! equipment
//!
//! Items, the stacking inventory, and equipment slot rules.
//!
//! # Overview
//!
//! An [`ItemSpec`] describes a class of item: its type, stacking behavior,
//! weapon stats if it is a weapon, and the gameplay effects it grants
//! while equipped. An [`ItemInstance`] is one owned copy with a stack
//! count and, for equipment, attached modules.
//!
//! The [`Inventory`] enforces the slot rules:
//!
//! - Each item type fits a fixed set of slots (two-hand weapons occupy
//!   the main hand and force the off hand empty; sources are off-hand
//!   only; modules attach to an already-equipped item).
//! - Stacking fills existing partial stacks before taking new slots, and
//!   a transaction that would not fit is rejected before anything moves.
//! - Unique items refuse a second copy anywhere in the inventory.
//!
//! Equipping returns an [`EquipOutcome`] listing the effects to apply and
//! remove; the combat layer owns the attribute set and performs the
//! application. The inventory itself never touches attributes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::abilities::Ability;
use crate::effects::{GameplayEffect, WeaponRoll};

/// Default number of inventory slots.
pub const DEFAULT_INVENTORY_CAPACITY: usize = 6;

/// Kinds of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Consumable,
    Armor,
    BrainImplant,
    BodyImplant,
    /// One-hand weapon, either hand.
    OneHand,
    /// Two-hand weapon, occupies both hands.
    TwoHand,
    /// Off-hand focus item.
    Source,
    /// Module attached to equipped armor.
    ArmorModule,
    /// Module attached to an equipped weapon.
    WeaponModule,
}

/// Equipment slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    Consumable,
    Armor,
    BrainImplant,
    BodyImplant,
    MainHand,
    OffHand,
}

impl ItemType {
    /// Whether this item type can sit in `slot`.
    pub fn fits(self, slot: SlotType) -> bool {
        match self {
            ItemType::Consumable => slot == SlotType::Consumable,
            ItemType::Armor | ItemType::ArmorModule => slot == SlotType::Armor,
            ItemType::BrainImplant => slot == SlotType::BrainImplant,
            ItemType::BodyImplant => slot == SlotType::BodyImplant,
            ItemType::OneHand | ItemType::WeaponModule => {
                slot == SlotType::MainHand || slot == SlotType::OffHand
            }
            ItemType::TwoHand => slot == SlotType::MainHand,
            ItemType::Source => slot == SlotType::OffHand,
        }
    }

    /// Whether this is a module type (attaches to equipped items instead
    /// of occupying a slot itself).
    pub fn is_module(self) -> bool {
        matches!(self, ItemType::ArmorModule | ItemType::WeaponModule)
    }

    /// Whether this is a weapon held in a hand.
    pub fn is_weapon(self) -> bool {
        matches!(self, ItemType::OneHand | ItemType::TwoHand)
    }
}

/// Weapon-specific stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub min_damage: f32,
    pub max_damage: f32,
    /// Attacks per second with this weapon.
    pub attack_speed: f32,
    /// Attack range with this weapon, world units.
    pub attack_range: f32,
    /// Whether attacks fire a projectile instead of hitting instantly.
    #[serde(default)]
    pub projectile: bool,
}

impl WeaponStats {
    /// This weapon's damage roll range.
    pub fn roll(&self) -> WeaponRoll {
        WeaponRoll {
            min: self.min_damage,
            max: self.max_damage,
        }
    }
}

/// A class of item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    /// Item class name; uniqueness checks are by name.
    pub name: String,
    pub item_type: ItemType,
    /// Stacks one inventory slot holds. At least 1.
    #[serde(default = "default_max_stacks")]
    pub max_stacks: u32,
    /// Whether only one copy may be owned at a time.
    #[serde(default)]
    pub unique_owned: bool,
    /// Module attachment slots this item offers while equipped.
    #[serde(default)]
    pub module_slots: u32,
    /// Effects applied while equipped.
    #[serde(default)]
    pub granted_effects: Vec<GameplayEffect>,
    /// Abilities granted while equipped.
    #[serde(default)]
    pub granted_abilities: Vec<Ability>,
    /// Weapon stats, for weapons.
    #[serde(default)]
    pub weapon: Option<WeaponStats>,
}

fn default_max_stacks() -> u32 {
    1
}

/// One owned copy of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    /// Instance identity.
    pub id: Uuid,
    /// The item class.
    pub spec: ItemSpec,
    /// Current stack count, 1 ..= `spec.max_stacks`.
    pub stacks: u32,
    /// Modules attached while equipped.
    #[serde(default)]
    pub modules: Vec<ItemInstance>,
}

impl ItemInstance {
    fn new(spec: ItemSpec, stacks: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            spec,
            stacks,
            modules: Vec::new(),
        }
    }

    /// Room left in this stack.
    fn stack_room(&self) -> u32 {
        self.spec.max_stacks.saturating_sub(self.stacks)
    }
}

/// Inventory operation outcomes that are errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("item not found")]
    DoesNotExist,

    #[error("item '{0}' is unique and already owned")]
    Unique(String),

    #[error("inventory is full")]
    InventoryFull,

    #[error("item '{item}' cannot be equipped in that slot")]
    WrongSlot { item: String },

    #[error("no free module slots on the equipped item")]
    ModuleSlotsFull,

    #[error("item '{item}' is not valid equipment for that operation")]
    InvalidEquipment { item: String },
}

/// What equipping changed, for the caller to apply to its attribute set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipOutcome {
    /// Effects to apply (from the newly equipped item and its spec).
    pub apply_effects: Vec<GameplayEffect>,
    /// Effect names to remove (from anything displaced back to inventory).
    pub remove_effects: Vec<String>,
    /// Abilities granted by the newly equipped item.
    pub grant_abilities: Vec<Ability>,
    /// Ability names revoked from displaced items.
    pub revoke_abilities: Vec<String>,
}

/// A character's carried and equipped items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    capacity: usize,
    items: Vec<ItemInstance>,
    equipped: BTreeMap<SlotType, ItemInstance>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_INVENTORY_CAPACITY)
    }
}

impl Inventory {
    /// An empty inventory with the given slot count.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
            equipped: BTreeMap::new(),
        }
    }

    /// Carried (unequipped) items.
    pub fn items(&self) -> &[ItemInstance] {
        &self.items
    }

    /// The item equipped in a slot, if any.
    pub fn equipped(&self, slot: SlotType) -> Option<&ItemInstance> {
        self.equipped.get(&slot)
    }

    /// Free carried slots.
    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    /// Whether a copy of the item class is carried or equipped.
    pub fn owns_class(&self, name: &str) -> bool {
        self.items.iter().any(|i| i.spec.name == name)
            || self.equipped.values().any(|i| i.spec.name == name)
    }

    fn find(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    /// Add `quantity` of an item class.
    ///
    /// Existing partial stacks fill first; remaining quantity takes fresh
    /// slots. If the whole transaction does not fit, nothing changes and
    /// `InventoryFull` is returned. Returns the ids of instances touched
    /// or created.
    pub fn add_item(&mut self, spec: &ItemSpec, quantity: u32) -> Result<Vec<Uuid>, InventoryError> {
        if quantity == 0 {
            return Ok(Vec::new());
        }
        // A unique item admits one copy total, so a multi-copy add is
        // rejected outright.
        if spec.unique_owned && (quantity > 1 || self.owns_class(&spec.name)) {
            return Err(InventoryError::Unique(spec.name.clone()));
        }

        let max_stacks = spec.max_stacks.max(1);

        // Pre-check: how much fits into existing partial stacks, and how
        // many fresh slots the rest needs.
        let stackable: u32 = if max_stacks > 1 {
            self.items
                .iter()
                .filter(|i| i.spec.name == spec.name)
                .map(ItemInstance::stack_room)
                .sum()
        } else {
            0
        };
        let remainder = quantity.saturating_sub(stackable);
        let new_slots = remainder.div_ceil(max_stacks) as usize;
        if new_slots > self.free_slots() {
            return Err(InventoryError::InventoryFull);
        }

        // Commit.
        let mut touched = Vec::new();
        let mut remaining = quantity;
        if max_stacks > 1 {
            for item in self
                .items
                .iter_mut()
                .filter(|i| i.spec.name == spec.name && i.stack_room() > 0)
            {
                let used = remaining.min(item.stack_room());
                item.stacks += used;
                remaining -= used;
                touched.push(item.id);
                if remaining == 0 {
                    break;
                }
            }
        }
        while remaining > 0 {
            let used = remaining.min(max_stacks);
            let instance = ItemInstance::new(spec.clone(), used);
            touched.push(instance.id);
            self.items.push(instance);
            remaining -= used;
        }
        Ok(touched)
    }

    /// Remove an entire carried instance.
    pub fn remove_item(&mut self, id: Uuid) -> Result<ItemInstance, InventoryError> {
        let index = self.find(id).ok_or(InventoryError::DoesNotExist)?;
        Ok(self.items.remove(index))
    }

    /// Consume stacks from a carried instance. The instance is removed
    /// when its stack count reaches zero.
    pub fn consume(&mut self, id: Uuid, quantity: u32) -> Result<(), InventoryError> {
        let index = self.find(id).ok_or(InventoryError::DoesNotExist)?;
        let item = &mut self.items[index];
        item.stacks = item.stacks.saturating_sub(quantity);
        if item.stacks == 0 {
            self.items.remove(index);
        }
        Ok(())
    }

    /// Whether both hands hold one-hand weapons.
    pub fn is_dual_wielding(&self) -> bool {
        let holds_weapon = |slot| {
            self.equipped
                .get(&slot)
                .is_some_and(|i| i.spec.item_type == ItemType::OneHand)
        };
        holds_weapon(SlotType::MainHand) && holds_weapon(SlotType::OffHand)
    }

    /// Stats of the weapon in a hand slot, if any.
    pub fn weapon_in(&self, slot: SlotType) -> Option<&WeaponStats> {
        self.equipped.get(&slot).and_then(|i| i.spec.weapon.as_ref())
    }

    /// Equip a carried item into a slot.
    ///
    /// Displaced items go back to the inventory; a swap always fits
    /// because the equipped item frees the slot it came from, but a
    /// two-hand weapon displacing two items can fail with `InventoryFull`,
    /// in which case nothing changes. Modules attach to the item already
    /// equipped in the slot rather than occupying it.
    pub fn equip(&mut self, slot: SlotType, id: Uuid) -> Result<EquipOutcome, InventoryError> {
        let index = self.find(id).ok_or(InventoryError::DoesNotExist)?;
        let item_type = self.items[index].spec.item_type;

        if !item_type.fits(slot) {
            return Err(InventoryError::WrongSlot {
                item: self.items[index].spec.name.clone(),
            });
        }
        if item_type.is_module() {
            return self.attach_module(slot, index);
        }

        let mut outcome = EquipOutcome::default();
        if item_type == ItemType::TwoHand {
            // Both hands must come free, and whatever they hold must fit
            // back into the inventory alongside everything else.
            let displaced = [SlotType::MainHand, SlotType::OffHand]
                .iter()
                .filter(|s| self.equipped.contains_key(s))
                .count();
            // Equipping frees the slot the two-hander occupies.
            if displaced > self.free_slots() + 1 {
                return Err(InventoryError::InventoryFull);
            }
            let item = self.items.remove(index);
            for hand in [SlotType::MainHand, SlotType::OffHand] {
                if let Some(previous) = self.equipped.remove(&hand) {
                    collect_removal(&previous, &mut outcome);
                    self.items.push(previous);
                }
            }
            collect_grant(&item, &mut outcome);
            self.equipped.insert(slot, item);
            return Ok(outcome);
        }

        let item = self.items.remove(index);
        if let Some(previous) = self.equipped.remove(&slot) {
            collect_removal(&previous, &mut outcome);
            self.items.push(previous);
        }
        collect_grant(&item, &mut outcome);
        self.equipped.insert(slot, item);
        Ok(outcome)
    }

    fn attach_module(&mut self, slot: SlotType, index: usize) -> Result<EquipOutcome, InventoryError> {
        let module_type = self.items[index].spec.item_type;
        let Some(host) = self.equipped.get_mut(&slot) else {
            return Err(InventoryError::InvalidEquipment {
                item: self.items[index].spec.name.clone(),
            });
        };
        if module_type == ItemType::WeaponModule && host.spec.weapon.is_none() {
            return Err(InventoryError::WrongSlot {
                item: self.items[index].spec.name.clone(),
            });
        }
        if host.modules.len() as u32 >= host.spec.module_slots {
            return Err(InventoryError::ModuleSlotsFull);
        }

        let module = self.items.remove(index);
        let mut outcome = EquipOutcome::default();
        collect_grant(&module, &mut outcome);
        host.modules.push(module);
        Ok(outcome)
    }

    /// Unequip a slot back into the inventory. Attached modules come with
    /// the item and their effects are removed too.
    pub fn unequip(&mut self, slot: SlotType) -> Result<EquipOutcome, InventoryError> {
        if !self.equipped.contains_key(&slot) {
            return Err(InventoryError::DoesNotExist);
        }
        if self.free_slots() == 0 {
            return Err(InventoryError::InventoryFull);
        }
        let Some(item) = self.equipped.remove(&slot) else {
            return Err(InventoryError::DoesNotExist);
        };
        let mut outcome = EquipOutcome::default();
        collect_removal(&item, &mut outcome);
        self.items.push(item);
        Ok(outcome)
    }
}

fn collect_grant(item: &ItemInstance, outcome: &mut EquipOutcome) {
    outcome.apply_effects.extend(item.spec.granted_effects.iter().cloned());
    outcome
        .grant_abilities
        .extend(item.spec.granted_abilities.iter().cloned());
    for module in &item.modules {
        collect_grant(module, outcome);
    }
}

fn collect_removal(item: &ItemInstance, outcome: &mut EquipOutcome) {
    outcome
        .remove_effects
        .extend(item.spec.granted_effects.iter().map(|e| e.name.clone()));
    outcome
        .revoke_abilities
        .extend(item.spec.granted_abilities.iter().map(|a| a.name.clone()));
    for module in &item.modules {
        collect_removal(module, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeKind;
    use crate::effects::{ModOp, Modifier};

    fn potion() -> ItemSpec {
        ItemSpec {
            name: "Potion".to_string(),
            item_type: ItemType::Consumable,
            max_stacks: 5,
            unique_owned: false,
            module_slots: 0,
            granted_effects: Vec::new(),
            granted_abilities: Vec::new(),
            weapon: None,
        }
    }

    fn sword() -> ItemSpec {
        ItemSpec {
            name: "Sword".to_string(),
            item_type: ItemType::OneHand,
            max_stacks: 1,
            unique_owned: false,
            module_slots: 1,
            granted_effects: vec![GameplayEffect::infinite(
                "SwordPower",
                vec![Modifier {
                    attribute: AttributeKind::AttackPower,
                    op: ModOp::Add,
                    magnitude: 15.0,
                }],
            )],
            granted_abilities: Vec::new(),
            weapon: Some(WeaponStats {
                min_damage: 10.0,
                max_damage: 20.0,
                attack_speed: 1.0,
                attack_range: 150.0,
                projectile: false,
            }),
        }
    }

    fn greatsword() -> ItemSpec {
        ItemSpec {
            name: "Greatsword".to_string(),
            item_type: ItemType::TwoHand,
            max_stacks: 1,
            unique_owned: false,
            module_slots: 2,
            granted_effects: Vec::new(),
            granted_abilities: Vec::new(),
            weapon: Some(WeaponStats {
                min_damage: 25.0,
                max_damage: 45.0,
                attack_speed: 0.8,
                attack_range: 175.0,
                projectile: false,
            }),
        }
    }

    fn orb() -> ItemSpec {
        ItemSpec {
            name: "Orb".to_string(),
            item_type: ItemType::Source,
            max_stacks: 1,
            unique_owned: true,
            module_slots: 0,
            granted_effects: Vec::new(),
            granted_abilities: Vec::new(),
            weapon: None,
        }
    }

    fn whetstone() -> ItemSpec {
        ItemSpec {
            name: "Whetstone".to_string(),
            item_type: ItemType::WeaponModule,
            max_stacks: 1,
            unique_owned: false,
            module_slots: 0,
            granted_effects: vec![GameplayEffect::infinite(
                "Sharpened",
                vec![Modifier {
                    attribute: AttributeKind::AttackPower,
                    op: ModOp::Add,
                    magnitude: 5.0,
                }],
            )],
            granted_abilities: Vec::new(),
            weapon: None,
        }
    }

    mod stacking {
        use super::*;

        #[test]
        fn fills_partial_stacks_first() {
            let mut inv = Inventory::default();
            inv.add_item(&potion(), 3).unwrap();
            assert_eq!(inv.items().len(), 1);

            inv.add_item(&potion(), 4).unwrap();
            // 3+4 = 7 -> one full stack of 5 plus one of 2
            assert_eq!(inv.items().len(), 2);
            assert_eq!(inv.items()[0].stacks, 5);
            assert_eq!(inv.items()[1].stacks, 2);
        }

        #[test]
        fn rejects_overflow_without_mutating() {
            let mut inv = Inventory::with_capacity(1);
            inv.add_item(&potion(), 5).unwrap();
            let err = inv.add_item(&potion(), 1).unwrap_err();
            assert_eq!(err, InventoryError::InventoryFull);
            assert_eq!(inv.items().len(), 1);
            assert_eq!(inv.items()[0].stacks, 5);
        }

        #[test]
        fn non_stackable_items_take_one_slot_each() {
            let mut inv = Inventory::with_capacity(2);
            inv.add_item(&sword(), 2).unwrap();
            assert_eq!(inv.items().len(), 2);
            assert_eq!(inv.add_item(&sword(), 1), Err(InventoryError::InventoryFull));
        }

        #[test]
        fn consume_destroys_at_zero() {
            let mut inv = Inventory::default();
            let ids = inv.add_item(&potion(), 2).unwrap();
            inv.consume(ids[0], 2).unwrap();
            assert!(inv.items().is_empty());
        }

        #[test]
        fn unique_rejects_second_copy() {
            let mut inv = Inventory::default();
            inv.add_item(&orb(), 1).unwrap();
            assert_eq!(
                inv.add_item(&orb(), 1),
                Err(InventoryError::Unique("Orb".to_string()))
            );
        }

        #[test]
        fn unique_rejects_multiple_copies_in_one_add() {
            let mut inv = Inventory::default();
            assert_eq!(
                inv.add_item(&orb(), 2),
                Err(InventoryError::Unique("Orb".to_string()))
            );
            assert!(inv.items().is_empty());
        }
    }

    mod equipping {
        use super::*;

        #[test]
        fn one_hand_fits_either_hand() {
            let mut inv = Inventory::default();
            let ids = inv.add_item(&sword(), 2).unwrap();
            inv.equip(SlotType::MainHand, ids[0]).unwrap();
            inv.equip(SlotType::OffHand, ids[1]).unwrap();
            assert!(inv.is_dual_wielding());
        }

        #[test]
        fn wrong_slot_rejected() {
            let mut inv = Inventory::default();
            let ids = inv.add_item(&sword(), 1).unwrap();
            assert!(matches!(
                inv.equip(SlotType::Armor, ids[0]),
                Err(InventoryError::WrongSlot { .. })
            ));
        }

        #[test]
        fn source_is_off_hand_only() {
            let mut inv = Inventory::default();
            let ids = inv.add_item(&orb(), 1).unwrap();
            assert!(matches!(
                inv.equip(SlotType::MainHand, ids[0]),
                Err(InventoryError::WrongSlot { .. })
            ));
            inv.equip(SlotType::OffHand, ids[0]).unwrap();
        }

        #[test]
        fn equip_reports_granted_effects() {
            let mut inv = Inventory::default();
            let ids = inv.add_item(&sword(), 1).unwrap();
            let outcome = inv.equip(SlotType::MainHand, ids[0]).unwrap();
            assert_eq!(outcome.apply_effects.len(), 1);
            assert_eq!(outcome.apply_effects[0].name, "SwordPower");
        }

        #[test]
        fn swap_returns_previous_and_lists_its_removal() {
            let mut inv = Inventory::default();
            let ids = inv.add_item(&sword(), 2).unwrap();
            inv.equip(SlotType::MainHand, ids[0]).unwrap();
            let outcome = inv.equip(SlotType::MainHand, ids[1]).unwrap();
            assert_eq!(outcome.remove_effects, vec!["SwordPower".to_string()]);
            assert_eq!(inv.items().len(), 1);
        }

        #[test]
        fn two_hand_displaces_both_hands() {
            let mut inv = Inventory::default();
            let swords = inv.add_item(&sword(), 2).unwrap();
            inv.equip(SlotType::MainHand, swords[0]).unwrap();
            inv.equip(SlotType::OffHand, swords[1]).unwrap();

            let great = inv.add_item(&greatsword(), 1).unwrap();
            let outcome = inv.equip(SlotType::MainHand, great[0]).unwrap();
            assert_eq!(outcome.remove_effects.len(), 2);
            assert!(inv.equipped(SlotType::OffHand).is_none());
            assert_eq!(inv.equipped(SlotType::MainHand).unwrap().spec.name, "Greatsword");
            // Both swords are back in the inventory.
            assert_eq!(inv.items().len(), 2);
        }

        #[test]
        fn two_hand_needs_room_for_displaced_items() {
            let mut inv = Inventory::with_capacity(3);
            let swords = inv.add_item(&sword(), 2).unwrap();
            inv.equip(SlotType::MainHand, swords[0]).unwrap();
            inv.equip(SlotType::OffHand, swords[1]).unwrap();
            let great = inv.add_item(&greatsword(), 1).unwrap();
            // Fill the remaining slots so the displaced swords cannot fit.
            inv.add_item(&potion(), 10).unwrap();
            assert_eq!(inv.free_slots(), 0);

            assert_eq!(
                inv.equip(SlotType::MainHand, great[0]),
                Err(InventoryError::InventoryFull)
            );
            // Nothing moved.
            assert!(inv.is_dual_wielding());
        }

        #[test]
        fn unequip_requires_inventory_room() {
            let mut inv = Inventory::with_capacity(1);
            let ids = inv.add_item(&sword(), 1).unwrap();
            inv.equip(SlotType::MainHand, ids[0]).unwrap();
            inv.add_item(&potion(), 1).unwrap();

            assert_eq!(
                inv.unequip(SlotType::MainHand),
                Err(InventoryError::InventoryFull)
            );
        }

        #[test]
        fn unequip_empty_slot_rejected() {
            let mut inv = Inventory::default();
            assert_eq!(
                inv.unequip(SlotType::MainHand),
                Err(InventoryError::DoesNotExist)
            );
        }
    }

    mod modules {
        use super::*;

        #[test]
        fn module_attaches_to_equipped_weapon() {
            let mut inv = Inventory::default();
            let swords = inv.add_item(&sword(), 1).unwrap();
            inv.equip(SlotType::MainHand, swords[0]).unwrap();
            let stones = inv.add_item(&whetstone(), 1).unwrap();

            let outcome = inv.equip(SlotType::MainHand, stones[0]).unwrap();
            assert_eq!(outcome.apply_effects[0].name, "Sharpened");
            assert_eq!(inv.equipped(SlotType::MainHand).unwrap().modules.len(), 1);
        }

        #[test]
        fn module_rejected_on_empty_slot() {
            let mut inv = Inventory::default();
            let stones = inv.add_item(&whetstone(), 1).unwrap();
            assert!(matches!(
                inv.equip(SlotType::MainHand, stones[0]),
                Err(InventoryError::InvalidEquipment { .. })
            ));
        }

        #[test]
        fn module_slots_can_fill() {
            let mut inv = Inventory::default();
            let swords = inv.add_item(&sword(), 1).unwrap();
            inv.equip(SlotType::MainHand, swords[0]).unwrap();
            let stones = inv.add_item(&whetstone(), 2).unwrap();
            inv.equip(SlotType::MainHand, stones[0]).unwrap();
            assert_eq!(
                inv.equip(SlotType::MainHand, stones[1]),
                Err(InventoryError::ModuleSlotsFull)
            );
        }

        #[test]
        fn weapon_module_needs_weapon_host() {
            let mut inv = Inventory::default();
            let orbs = inv.add_item(&orb(), 1).unwrap();
            inv.equip(SlotType::OffHand, orbs[0]).unwrap();
            let stones = inv.add_item(&whetstone(), 1).unwrap();
            assert!(matches!(
                inv.equip(SlotType::OffHand, stones[0]),
                Err(InventoryError::WrongSlot { .. })
            ));
        }

        #[test]
        fn unequip_removes_module_effects_too() {
            let mut inv = Inventory::default();
            let swords = inv.add_item(&sword(), 1).unwrap();
            inv.equip(SlotType::MainHand, swords[0]).unwrap();
            let stones = inv.add_item(&whetstone(), 1).unwrap();
            inv.equip(SlotType::MainHand, stones[0]).unwrap();

            let outcome = inv.unequip(SlotType::MainHand).unwrap();
            assert!(outcome.remove_effects.contains(&"SwordPower".to_string()));
            assert!(outcome.remove_effects.contains(&"Sharpened".to_string()));
        }
    }

    #[test]
    fn serde_roundtrip() {
        let mut inv = Inventory::default();
        let swords = inv.add_item(&sword(), 1).unwrap();
        inv.equip(SlotType::MainHand, swords[0]).unwrap();
        inv.add_item(&potion(), 3).unwrap();
        let json = serde_json::to_string(&inv).unwrap();
        let parsed: Inventory = serde_json::from_str(&json).unwrap();
        assert_eq!(inv, parsed);
    }
}
