use serde::{Deserialize, Serialize};

use crate::character::types::Character;
use crate::core::constants::DEFAULT_SKILL_DAMAGE;
use crate::items::types::{Item, ItemEffect};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub damage: u32,
    #[serde(default)]
    pub defense: u32,
    /// Experience granted to the character that defeats it.
    pub experience: u64,
    /// Templates the loot generator models drops on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loot: Vec<Item>,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatSkill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healing: Option<u32>,
    #[serde(default)]
    pub energy_cost: u32,
    #[serde(default)]
    pub cooldown: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<ItemEffect>,
}

impl CombatSkill {
    pub fn new(id: impl Into<String>, name: impl Into<String>, damage: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            damage: Some(damage),
            healing: None,
            energy_cost: 0,
            cooldown: 0,
            effects: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_energy_cost(mut self, cost: u32) -> Self {
        self.energy_cost = cost;
        self
    }

    pub fn with_healing(mut self, healing: u32) -> Self {
        self.healing = Some(healing);
        self
    }

    pub fn with_effect(mut self, effect: ItemEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn base_damage(&self) -> u32 {
        self.damage.unwrap_or(DEFAULT_SKILL_DAMAGE)
    }
}

/// Either side of an encounter, as seen by the damage and hit formulas.
#[derive(Debug, Clone, Copy)]
pub enum Combatant<'a> {
    Character(&'a Character),
    Enemy(&'a Enemy),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterStatus {
    NotStarted,
    InProgress,
    Victory,
    Defeat,
    Fled,
}

impl EncounterStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EncounterStatus::Victory | EncounterStatus::Defeat | EncounterStatus::Fled
        )
    }
}

/// Outcome of one synchronous two-phase round (character then enemy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatResult {
    pub updated_character: Character,
    pub updated_enemy: Enemy,
    pub log: Vec<String>,
    pub is_over: bool,
    pub victory: bool,
    /// Items dropped on victory, already added to the character's inventory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loot: Vec<Item>,
    #[serde(default)]
    pub experience_gained: u64,
}

impl CombatResult {
    pub fn status(&self) -> EncounterStatus {
        match (self.is_over, self.victory) {
            (false, _) => EncounterStatus::InProgress,
            (true, true) => EncounterStatus::Victory,
            (true, false) => EncounterStatus::Defeat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleeOutcome {
    pub success: bool,
    pub updated_character: Character,
    pub log: Vec<String>,
    /// The enemy's free attack after a failed attempt finished the character.
    pub defeated: bool,
}
