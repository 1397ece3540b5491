//! Read-only reference data looked up by id.
//!
//! The core never reaches for the catalog itself; callers resolve ids here
//! and pass the definitions in.

mod data;

pub use data::*;

use crate::combat::types::Enemy;
use crate::core::error::{GameError, GameResult};
use crate::items::types::Item;
use crate::quests::types::Quest;

pub trait Catalog {
    fn items(&self) -> &[Item];
    fn market(&self) -> &[Item];
    fn enemies(&self) -> &[Enemy];
    fn quests(&self) -> &[Quest];

    fn item(&self, item_id: &str) -> GameResult<&Item> {
        self.items()
            .iter()
            .chain(self.market())
            .find(|i| i.id == item_id)
            .ok_or_else(|| GameError::not_found("item", item_id))
    }

    fn market_item(&self, item_id: &str) -> GameResult<&Item> {
        self.market()
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| GameError::not_found("market item", item_id))
    }

    fn enemy(&self, enemy_id: &str) -> GameResult<&Enemy> {
        self.enemies()
            .iter()
            .find(|e| e.id == enemy_id)
            .ok_or_else(|| GameError::not_found("enemy", enemy_id))
    }

    fn quest(&self, quest_id: &str) -> GameResult<&Quest> {
        self.quests()
            .iter()
            .find(|q| q.id == quest_id)
            .ok_or_else(|| GameError::not_found("quest", quest_id))
    }
}

/// Catalog held in memory, built from the game's seed data by default.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    pub items: Vec<Item>,
    pub market: Vec<Item>,
    pub enemies: Vec<Enemy>,
    pub quests: Vec<Quest>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self {
            items: starter_items(),
            market: market_items(),
            enemies: enemy_templates(),
            quests: quests(),
        }
    }
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Catalog for StaticCatalog {
    fn items(&self) -> &[Item] {
        &self.items
    }

    fn market(&self) -> &[Item] {
        &self.market
    }

    fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    fn quests(&self) -> &[Quest] {
        &self.quests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quests::types::ObjectiveKind;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_by_id() {
        let catalog = StaticCatalog::new();
        assert_eq!(catalog.quest("quest-2").unwrap().title, "Blood Cult Rising");
        assert_eq!(catalog.enemy("enemy-feral-ghoul").unwrap().level, 1);
        assert_eq!(catalog.market_item("market-shadow-cloak").unwrap().value, 120);
        assert_eq!(catalog.item("item-rusty-dagger").unwrap().stats.strength, 3);
        assert!(matches!(
            catalog.quest("quest-99"),
            Err(GameError::NotFound { entity: "quest", .. })
        ));
    }

    #[test]
    fn test_ids_are_unique() {
        let catalog = StaticCatalog::new();
        let mut seen = HashSet::new();
        for id in catalog
            .items()
            .iter()
            .chain(catalog.market())
            .map(|i| i.id.as_str())
            .chain(catalog.enemies().iter().map(|e| e.id.as_str()))
            .chain(catalog.quests().iter().map(|q| q.id.as_str()))
        {
            assert!(seen.insert(id), "duplicate catalog id {id}");
        }
    }

    #[test]
    fn test_seed_data_is_valid() {
        let catalog = StaticCatalog::new();
        for item in catalog.items().iter().chain(catalog.market()) {
            for effect in &item.effects {
                assert!(effect.validate().is_ok(), "{}", item.name);
            }
        }
        for enemy in catalog.enemies() {
            assert!(enemy.level >= 1);
            assert_eq!(enemy.health, enemy.max_health);
            assert!(!enemy.loot.is_empty());
        }
        for quest in catalog.quests() {
            assert!(!quest.objectives.is_empty());
            assert!(quest.objectives.iter().all(|o| o.required > 0));
        }
    }

    #[test]
    fn test_every_kill_target_is_a_catalog_enemy() {
        let catalog = StaticCatalog::new();
        for quest in catalog.quests() {
            for objective in quest.objectives.iter().filter(|o| o.kind == ObjectiveKind::Kill) {
                assert!(
                    catalog
                        .enemies()
                        .iter()
                        .any(|e| e.name.eq_ignore_ascii_case(&objective.target)),
                    "{} targets unknown enemy {}",
                    quest.id,
                    objective.target
                );
            }
        }
    }
}
