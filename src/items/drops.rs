use rand::Rng;

use super::types::{Item, ItemKind, Rarity};
use crate::combat::types::Enemy;
use crate::core::constants::{
    LOOT_MAX_ITEMS, LOOT_MIN_ITEMS, LOOT_RARITY_WEIGHTS, LOOT_VALUE_PER_LEVEL,
};
use crate::core::error::{GameError, GameResult};
use crate::core::ids::IdSource;

/// Rarities that can drop, aligned with `LOOT_RARITY_WEIGHTS`.
const DROPPABLE: [Rarity; 5] = [
    Rarity::Common,
    Rarity::Uncommon,
    Rarity::Rare,
    Rarity::Epic,
    Rarity::Legendary,
];

/// Roll a rarity from the cumulative drop table.
/// 60% Common, 25% Uncommon, 10% Rare, 4% Epic, 1% Legendary.
pub fn roll_rarity(rng: &mut impl Rng) -> Rarity {
    let roll = rng.gen::<f64>();
    let mut cumulative = 0.0;
    for (rarity, weight) in DROPPABLE.iter().zip(LOOT_RARITY_WEIGHTS) {
        cumulative += weight;
        if roll < cumulative {
            return *rarity;
        }
    }
    Rarity::Common
}

/// Gold value of a drop: level × 10 × (1 + rarity rank). Always positive for level ≥ 1.
pub fn loot_value(enemy_level: u32, rarity: Rarity) -> u64 {
    u64::from(enemy_level)
        .saturating_mul(LOOT_VALUE_PER_LEVEL)
        .saturating_mul(1 + rarity.rank())
}

/// Generates the drops for a defeated enemy.
///
/// Rolls 1 to 3 items, each with its own rarity. When the enemy carries a loot
/// table, every drop is modelled on a random entry of it (name, kind, stats and
/// effects); otherwise a plain weapon is produced.
pub fn generate_loot(
    enemy: &Enemy,
    rng: &mut impl Rng,
    ids: &mut impl IdSource,
) -> GameResult<Vec<Item>> {
    if enemy.level < 1 {
        return Err(GameError::invalid_input("enemy level must be at least 1"));
    }

    let count = rng.gen_range(LOOT_MIN_ITEMS..=LOOT_MAX_ITEMS);
    let mut loot = Vec::with_capacity(count);

    for _ in 0..count {
        let rarity = roll_rarity(rng);
        let value = loot_value(enemy.level, rarity);
        let id = ids.next_id("loot");

        let item = if enemy.loot.is_empty() {
            Item::new(
                id,
                format!("Level {} {} Item", enemy.level, rarity.name()),
                ItemKind::Weapon,
                rarity,
                value,
            )
            .with_description(format!(
                "A {} item dropped by a level {} enemy",
                rarity.name().to_lowercase(),
                enemy.level
            ))
        } else {
            let template = &enemy.loot[rng.gen_range(0..enemy.loot.len())];
            Item {
                name: format!("{} {}", rarity.name(), template.name),
                rarity,
                value,
                ..template.instantiate(id)
            }
        };
        loot.push(item);
    }

    Ok(loot)
}
