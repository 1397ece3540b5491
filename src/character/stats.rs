use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    Strength,
    Agility,
    Intelligence,
    Vitality,
}

impl StatType {
    pub fn all() -> [StatType; 4] {
        [
            StatType::Strength,
            StatType::Agility,
            StatType::Intelligence,
            StatType::Vitality,
        ]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            StatType::Strength => "STR",
            StatType::Agility => "AGI",
            StatType::Intelligence => "INT",
            StatType::Vitality => "VIT",
        }
    }
}

/// Core attributes. Unsigned, so a stat can never go negative.
///
/// Documents using the older names (`dexterity`, `constitution`) still load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Stats {
    #[serde(default)]
    pub strength: u32,
    #[serde(default, alias = "dexterity")]
    pub agility: u32,
    #[serde(default)]
    pub intelligence: u32,
    #[serde(default, alias = "constitution")]
    pub vitality: u32,
}

impl Stats {
    pub fn new(strength: u32, agility: u32, intelligence: u32, vitality: u32) -> Self {
        Self {
            strength,
            agility,
            intelligence,
            vitality,
        }
    }

    pub fn get(&self, stat: StatType) -> u32 {
        match stat {
            StatType::Strength => self.strength,
            StatType::Agility => self.agility,
            StatType::Intelligence => self.intelligence,
            StatType::Vitality => self.vitality,
        }
    }

    pub fn set(&mut self, stat: StatType, value: u32) {
        match stat {
            StatType::Strength => self.strength = value,
            StatType::Agility => self.agility = value,
            StatType::Intelligence => self.intelligence = value,
            StatType::Vitality => self.vitality = value,
        }
    }

    /// Adds another Stats' values to this one (for equipment bonuses).
    pub fn add(&mut self, other: &Stats) {
        for stat in StatType::all() {
            self.set(stat, self.get(stat).saturating_add(other.get(stat)));
        }
    }

    pub fn total(&self) -> u32 {
        StatType::all().iter().map(|s| self.get(*s)).sum()
    }
}
