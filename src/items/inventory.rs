//! Inventory, equipment and market actions on a character snapshot.
//!
//! Every function returns a new snapshot and leaves the input untouched.

use super::types::{EquipmentSlot, Item, ItemKind};
use crate::character::progression::sync_resource_caps;
use crate::character::types::Character;
use crate::combat::math::apply_effects;
use crate::core::constants::SELL_PRICE_DIVISOR;
use crate::core::error::{GameError, GameResult};
use crate::core::ids::IdSource;

/// Moves an inventory item into its slot. Anything already worn there goes
/// back to the inventory.
pub fn equip_item(character: &Character, item_id: &str) -> GameResult<Character> {
    let position = character.inventory_position(item_id)?;
    let item = &character.inventory[position];

    let slot = item.kind.slot().ok_or_else(|| {
        GameError::invalid_input(format!("{} cannot be equipped", item.name))
    })?;

    if !item.restrictions.allows(character.level, character.class) {
        return Err(GameError::invalid_input(format!(
            "{} cannot use {}",
            character.name, item.name
        )));
    }

    let mut next = character.clone();
    let item = next.inventory.remove(position);
    if let Some(previous) = next.equipment.replace(slot, item) {
        next.inventory.push(previous);
    }
    sync_resource_caps(&mut next);
    Ok(next)
}

pub fn unequip_item(character: &Character, slot: EquipmentSlot) -> GameResult<Character> {
    let mut next = character.clone();
    let item = next
        .equipment
        .take(slot)
        .ok_or_else(|| GameError::not_found("equipped item", slot.name()))?;
    next.inventory.push(item);
    sync_resource_caps(&mut next);
    Ok(next)
}

/// Consumes a consumable, applying its heal/damage effects.
pub fn use_item(character: &Character, item_id: &str) -> GameResult<Character> {
    let position = character.inventory_position(item_id)?;
    let item = &character.inventory[position];
    if item.kind != ItemKind::Consumable {
        return Err(GameError::invalid_input(format!(
            "{} is not a consumable",
            item.name
        )));
    }

    let mut next = apply_effects(character, &item.effects)?;
    next.inventory.remove(position);
    Ok(next)
}

pub fn drop_item(character: &Character, item_id: &str) -> GameResult<Character> {
    let position = character.inventory_position(item_id)?;
    let mut next = character.clone();
    next.inventory.remove(position);
    Ok(next)
}

/// Buys a fresh instance of a market item.
pub fn buy_item(
    character: &Character,
    item: &Item,
    ids: &mut impl IdSource,
) -> GameResult<Character> {
    if character.gold < item.value {
        return Err(GameError::invalid_input(format!(
            "{} costs {} gold, {} has {}",
            item.name, item.value, character.name, character.gold
        )));
    }

    let mut next = character.clone();
    next.gold -= item.value;
    next.inventory.push(item.instantiate(ids.next_id("item")));
    Ok(next)
}

/// Sells an inventory item for half its value. Returns the new snapshot and the gold received.
pub fn sell_item(character: &Character, item_id: &str) -> GameResult<(Character, u64)> {
    let position = character.inventory_position(item_id)?;
    let mut next = character.clone();
    let item = next.inventory.remove(position);
    let price = item.value / SELL_PRICE_DIVISOR;
    next.gold = next.gold.saturating_add(price);
    Ok((next, price))
}
