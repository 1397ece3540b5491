//! Character snapshot, class data and character creation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::progression::{max_energy, max_health};
use super::stats::Stats;
use crate::combat::types::CombatSkill;
use crate::core::constants::{MAX_NAME_LENGTH, STARTING_GOLD};
use crate::core::error::{GameError, GameResult};
use crate::items::equipment::Equipment;
use crate::items::types::{EffectKind, Item, ItemEffect};
use crate::quests::types::{QuestProgress, QuestStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Warrior,
    Rogue,
    Mage,
    /// Balanced fallback for class names the game does not know.
    Wanderer,
}

/// Per-level stat growth for one class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthRates {
    pub strength: f64,
    pub agility: f64,
    pub intelligence: f64,
    pub vitality: f64,
}

impl CharacterClass {
    /// Case-insensitive, with the thematic class names mapped onto the three archetypes.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "warrior" | "vampire" | "werewolf" => CharacterClass::Warrior,
            "rogue" | "witch hunter" | "hunter" | "cultist" => CharacterClass::Rogue,
            "mage" | "necromancer" | "witch" => CharacterClass::Mage,
            _ => CharacterClass::Wanderer,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Mage => "Mage",
            CharacterClass::Wanderer => "Wanderer",
        }
    }

    pub fn base_stats(&self) -> Stats {
        match self {
            CharacterClass::Warrior => Stats::new(10, 6, 4, 10),
            CharacterClass::Rogue => Stats::new(6, 12, 6, 6),
            CharacterClass::Mage => Stats::new(3, 5, 12, 5),
            CharacterClass::Wanderer => Stats::new(6, 6, 6, 6),
        }
    }

    pub fn growth_rates(&self) -> GrowthRates {
        match self {
            CharacterClass::Warrior => GrowthRates {
                strength: 2.5,
                agility: 1.2,
                intelligence: 0.8,
                vitality: 2.0,
            },
            CharacterClass::Rogue => GrowthRates {
                strength: 1.5,
                agility: 2.5,
                intelligence: 1.2,
                vitality: 1.0,
            },
            CharacterClass::Mage => GrowthRates {
                strength: 0.8,
                agility: 1.0,
                intelligence: 2.5,
                vitality: 1.0,
            },
            CharacterClass::Wanderer => GrowthRates {
                strength: 1.5,
                agility: 1.5,
                intelligence: 1.5,
                vitality: 1.5,
            },
        }
    }

    pub fn starting_skills(&self) -> Vec<CombatSkill> {
        match self {
            CharacterClass::Warrior => vec![
                CombatSkill::new("skill-slash", "Slash", 10).with_description("A basic attack"),
                CombatSkill::new("skill-cleave", "Cleave", 16)
                    .with_description("A heavy swing that drains stamina")
                    .with_energy_cost(15),
            ],
            CharacterClass::Rogue => vec![
                CombatSkill::new("skill-backstab", "Backstab", 10)
                    .with_description("A basic attack"),
                CombatSkill::new("skill-venom", "Venom Strike", 8)
                    .with_description("A poisoned blade that weakens the next blow")
                    .with_energy_cost(10)
                    .with_effect(ItemEffect::new(EffectKind::Buff, 0.5)),
            ],
            CharacterClass::Mage => vec![
                CombatSkill::new("skill-fireball", "Fireball", 10)
                    .with_description("A basic attack"),
                CombatSkill::new("skill-blood-pact", "Blood Pact", 6)
                    .with_description("Siphons life from the target")
                    .with_energy_cost(20)
                    .with_healing(15),
            ],
            CharacterClass::Wanderer => {
                vec![CombatSkill::new("skill-strike", "Strike", 10).with_description("A basic attack")]
            }
        }
    }
}

/// A capped pool such as health or energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub current: u32,
    pub max: u32,
}

impl Resource {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub fn drain(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn restore(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Changes the cap, pulling `current` down if it no longer fits.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.current = self.current.min(max);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestLog {
    /// Accepted quests, including completed ones whose rewards are unclaimed.
    #[serde(default)]
    pub active: Vec<QuestProgress>,
    /// Quests whose rewards have been claimed.
    #[serde(default)]
    pub completed: BTreeSet<String>,
}

impl QuestLog {
    pub fn progress(&self, quest_id: &str) -> Option<&QuestProgress> {
        self.active.iter().find(|p| p.quest_id == quest_id)
    }

    /// Replaces the stored progress for the same quest, or appends it.
    pub fn upsert(&mut self, progress: QuestProgress) {
        match self
            .active
            .iter_mut()
            .find(|p| p.quest_id == progress.quest_id)
        {
            Some(existing) => *existing = progress,
            None => self.active.push(progress),
        }
    }

    /// True once the quest has been accepted. A not-started record does not count.
    pub fn holds(&self, quest_id: &str) -> bool {
        self.progress(quest_id)
            .is_some_and(|p| p.status != QuestStatus::NotStarted)
            || self.completed.contains(quest_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub experience: u64,
    pub health: Resource,
    #[serde(default, alias = "mana", skip_serializing_if = "Option::is_none")]
    pub energy: Option<Resource>,
    pub stats: Stats,
    #[serde(default)]
    pub inventory: Vec<Item>,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub skills: Vec<CombatSkill>,
    #[serde(default)]
    pub quests: QuestLog,
}

impl Character {
    /// Base stats plus everything equipped.
    pub fn effective_stats(&self) -> Stats {
        let mut total = self.stats;
        total.add(&self.equipment.bonus_stats());
        total
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_empty()
    }

    pub fn skill(&self, skill_id: &str) -> GameResult<&CombatSkill> {
        self.skills
            .iter()
            .find(|s| s.id == skill_id)
            .ok_or_else(|| GameError::not_found("skill", skill_id))
    }

    pub fn inventory_position(&self, item_id: &str) -> GameResult<usize> {
        self.inventory
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| GameError::not_found("item", item_id))
    }

    /// Checks the snapshot invariants before a core operation consumes it.
    pub fn validate(&self) -> GameResult<()> {
        if self.level < 1 {
            return Err(GameError::invalid_input("character level must be at least 1"));
        }
        if self.health.current > self.health.max {
            return Err(GameError::invalid_input(format!(
                "health {} exceeds max {}",
                self.health.current, self.health.max
            )));
        }
        if let Some(energy) = &self.energy {
            if energy.current > energy.max {
                return Err(GameError::invalid_input(format!(
                    "energy {} exceeds max {}",
                    energy.current, energy.max
                )));
            }
        }
        if let Some(item) = self
            .inventory
            .iter()
            .find(|i| self.equipment.contains_id(&i.id))
        {
            return Err(GameError::invalid_input(format!(
                "item {} is both carried and equipped",
                item.id
            )));
        }
        Ok(())
    }
}

/// Creates a level 1 character with class base stats, skills and full resources.
pub fn create_character(
    id: impl Into<String>,
    name: &str,
    class: CharacterClass,
) -> GameResult<Character> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GameError::invalid_input("character name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(GameError::invalid_input(format!(
            "character name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }

    let stats = class.base_stats();
    Ok(Character {
        id: id.into(),
        name: name.to_string(),
        class,
        level: 1,
        experience: 0,
        health: Resource::full(max_health(&stats)),
        energy: Some(Resource::full(max_energy(&stats))),
        stats,
        inventory: Vec::new(),
        equipment: Equipment::new(),
        gold: STARTING_GOLD,
        skills: class.starting_skills(),
        quests: QuestLog::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::{ItemKind, Rarity};

    #[test]
    fn test_create_character_defaults() {
        let hero = create_character("char-1", "Mira", CharacterClass::Warrior).unwrap();
        assert_eq!(hero.level, 1);
        assert_eq!(hero.experience, 0);
        assert_eq!(hero.stats, Stats::new(10, 6, 4, 10));
        // 100 + 10 × 10
        assert_eq!(hero.health, Resource::full(200));
        // 50 + 4 × 5 + 10 × 2
        assert_eq!(hero.energy, Some(Resource::full(90)));
        assert_eq!(hero.gold, STARTING_GOLD);
        assert_eq!(hero.skills.len(), 2);
        assert!(hero.validate().is_ok());
    }

    #[test]
    fn test_create_character_rejects_bad_names() {
        assert!(create_character("c", "   ", CharacterClass::Mage).is_err());
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            create_character("c", &long, CharacterClass::Mage),
            Err(GameError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_class_from_name_aliases() {
        assert_eq!(CharacterClass::from_name("Warrior"), CharacterClass::Warrior);
        assert_eq!(CharacterClass::from_name("vampire"), CharacterClass::Warrior);
        assert_eq!(CharacterClass::from_name("Necromancer"), CharacterClass::Mage);
        assert_eq!(CharacterClass::from_name("cultist"), CharacterClass::Rogue);
        assert_eq!(CharacterClass::from_name("bard"), CharacterClass::Wanderer);
    }

    #[test]
    fn test_every_class_has_a_free_skill() {
        for class in [
            CharacterClass::Warrior,
            CharacterClass::Rogue,
            CharacterClass::Mage,
            CharacterClass::Wanderer,
        ] {
            assert!(class.starting_skills().iter().any(|s| s.energy_cost == 0));
        }
    }

    #[test]
    fn test_resource_bounds() {
        let mut pool = Resource::full(50);
        pool.drain(80);
        assert!(pool.is_empty());
        pool.restore(70);
        assert_eq!(pool.current, 50);
        pool.set_max(30);
        assert_eq!(pool, Resource::full(30));
    }

    #[test]
    fn test_validate_catches_broken_snapshots() {
        let mut hero = create_character("c", "Ash", CharacterClass::Rogue).unwrap();
        hero.health.current = hero.health.max + 1;
        assert!(hero.validate().is_err());

        let mut hero = create_character("c", "Ash", CharacterClass::Rogue).unwrap();
        hero.level = 0;
        assert!(hero.validate().is_err());

        let mut hero = create_character("c", "Ash", CharacterClass::Rogue).unwrap();
        let dagger = Item::new("item-1", "Dagger", ItemKind::Weapon, Rarity::Common, 10);
        hero.inventory.push(dagger.clone());
        hero.equipment.weapon = Some(dagger);
        assert!(hero.validate().is_err());
    }

    #[test]
    fn test_unknown_skill_is_not_found() {
        let hero = create_character("c", "Ash", CharacterClass::Rogue).unwrap();
        assert!(hero.skill("skill-backstab").is_ok());
        assert!(matches!(
            hero.skill("skill-nope"),
            Err(GameError::NotFound { entity: "skill", .. })
        ));
    }

    #[test]
    fn test_quest_log_upsert() {
        let mut log = QuestLog::default();
        log.upsert(QuestProgress::not_started("q1"));
        let mut updated = QuestProgress::not_started("q1");
        updated.updated_at = 9;
        log.upsert(updated);
        assert_eq!(log.active.len(), 1);
        assert_eq!(log.progress("q1").map(|p| p.updated_at), Some(9));
        assert!(!log.holds("q1"));
        assert!(!log.holds("q2"));

        let mut accepted = QuestProgress::not_started("q1");
        accepted.status = QuestStatus::InProgress;
        log.upsert(accepted);
        assert_eq!(log.active.len(), 1);
        assert!(log.holds("q1"));
    }

    #[test]
    fn test_character_round_trips_through_json() {
        let hero = create_character("char-9", "Vex", CharacterClass::Mage).unwrap();
        let json = serde_json::to_string(&hero).unwrap();
        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hero);
    }
}
