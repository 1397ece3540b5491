//! Loot bookkeeping and the simulated player's gear choices.

use serde::Serialize;

use crate::character::types::Character;
use crate::core::error::GameResult;
use crate::items::inventory::equip_item;
use crate::items::types::{Item, Rarity};

/// Statistics about loot drops.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LootStats {
    pub total_drops: u32,
    pub upgrades_equipped: u32,
    pub common_drops: u32,
    pub uncommon_drops: u32,
    pub rare_drops: u32,
    pub epic_drops: u32,
    pub legendary_drops: u32,
    pub artifact_drops: u32,
    pub gold_value: u64,
}

impl LootStats {
    pub fn record_drop(&mut self, item: &Item) {
        self.total_drops += 1;
        self.gold_value += item.value;

        match item.rarity {
            Rarity::Common => self.common_drops += 1,
            Rarity::Uncommon => self.uncommon_drops += 1,
            Rarity::Rare => self.rare_drops += 1,
            Rarity::Epic => self.epic_drops += 1,
            Rarity::Legendary => self.legendary_drops += 1,
            Rarity::Artifact => self.artifact_drops += 1,
        }
    }

    pub fn count(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common_drops,
            Rarity::Uncommon => self.uncommon_drops,
            Rarity::Rare => self.rare_drops,
            Rarity::Epic => self.epic_drops,
            Rarity::Legendary => self.legendary_drops,
            Rarity::Artifact => self.artifact_drops,
        }
    }

    pub fn merge(&mut self, other: &LootStats) {
        self.total_drops += other.total_drops;
        self.upgrades_equipped += other.upgrades_equipped;
        self.common_drops += other.common_drops;
        self.uncommon_drops += other.uncommon_drops;
        self.rare_drops += other.rare_drops;
        self.epic_drops += other.epic_drops;
        self.legendary_drops += other.legendary_drops;
        self.artifact_drops += other.artifact_drops;
        self.gold_value += other.gold_value;
    }
}

/// Sum of an item's stat bonuses, the simulated player's only measure of gear.
fn score(item: &Item) -> u32 {
    item.stats.total()
}

/// Equips `item` if it is in the inventory, wearable, and scores higher than
/// the item currently in its slot. Returns whether it was equipped.
pub fn equip_if_upgrade(character: &mut Character, item: &Item) -> GameResult<bool> {
    let Some(slot) = item.kind.slot() else {
        return Ok(false);
    };
    if !item.restrictions.allows(character.level, character.class) {
        return Ok(false);
    }
    let current = character.equipment.get(slot).map(score).unwrap_or(0);
    if score(item) <= current {
        return Ok(false);
    }

    *character = equip_item(character, &item.id)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::stats::Stats;
    use crate::character::types::{create_character, CharacterClass};
    use crate::items::types::ItemKind;

    #[test]
    fn test_record_drop_by_rarity() {
        let mut stats = LootStats::default();
        stats.record_drop(&Item::new("a", "A", ItemKind::Weapon, Rarity::Rare, 30));
        stats.record_drop(&Item::new("b", "B", ItemKind::Weapon, Rarity::Common, 10));
        assert_eq!(stats.total_drops, 2);
        assert_eq!(stats.count(Rarity::Rare), 1);
        assert_eq!(stats.count(Rarity::Common), 1);
        assert_eq!(stats.gold_value, 40);
    }

    #[test]
    fn test_equip_if_upgrade() {
        let mut hero = create_character("c", "Mira", CharacterClass::Warrior).unwrap();
        let weak = Item::new("w1", "Stick", ItemKind::Weapon, Rarity::Common, 1)
            .with_stats(Stats::new(1, 0, 0, 0));
        let strong = Item::new("w2", "Blade", ItemKind::Weapon, Rarity::Rare, 1)
            .with_stats(Stats::new(4, 1, 0, 0));
        hero.inventory.push(strong.clone());
        hero.inventory.push(weak.clone());

        assert!(equip_if_upgrade(&mut hero, &strong).unwrap());
        assert!(!equip_if_upgrade(&mut hero, &weak).unwrap());
        assert_eq!(hero.equipment.weapon.as_ref().map(|i| i.id.as_str()), Some("w2"));
    }
}
