use serde::{Deserialize, Serialize};

use crate::character::stats::Stats;
use crate::character::types::CharacterClass;
use crate::core::error::{GameError, GameResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Amulet,
    Ring,
    Trinket,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 5] {
        [
            EquipmentSlot::Weapon,
            EquipmentSlot::Armor,
            EquipmentSlot::Amulet,
            EquipmentSlot::Ring,
            EquipmentSlot::Trinket,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Armor => "armor",
            EquipmentSlot::Amulet => "amulet",
            EquipmentSlot::Ring => "ring",
            EquipmentSlot::Trinket => "trinket",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|slot| slot.name().eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Amulet,
    Ring,
    Trinket,
    Consumable,
    Material,
    Quest,
}

impl ItemKind {
    /// The slot this kind is worn in; `None` for items that cannot be equipped.
    pub fn slot(&self) -> Option<EquipmentSlot> {
        match self {
            ItemKind::Weapon => Some(EquipmentSlot::Weapon),
            ItemKind::Armor => Some(EquipmentSlot::Armor),
            ItemKind::Amulet => Some(EquipmentSlot::Amulet),
            ItemKind::Ring => Some(EquipmentSlot::Ring),
            ItemKind::Trinket => Some(EquipmentSlot::Trinket),
            ItemKind::Consumable | ItemKind::Material | ItemKind::Quest => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
    Artifact = 5,
}

impl Rarity {
    pub fn all() -> [Rarity; 6] {
        [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
            Rarity::Artifact,
        ]
    }

    /// Position in the rarity order, starting at 0 for Common.
    pub fn rank(&self) -> u64 {
        *self as u64
    }

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Artifact => "Artifact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    Heal,
    Damage,
    Buff,
    Debuff,
    OnHit,
    OnKill,
    Passive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEffect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    /// Flat amount for heal/damage, fraction (0.25 = 25%) for buff/debuff.
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chance: Option<f64>,
}

impl ItemEffect {
    pub fn new(kind: EffectKind, value: f64) -> Self {
        Self {
            kind,
            value,
            duration: None,
            chance: None,
        }
    }

    /// Rejects negative or non-finite values and debuffs that would invert damage.
    pub fn validate(&self) -> GameResult<()> {
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(GameError::invalid_input(format!(
                "effect value cannot be negative: {:?} {}",
                self.kind, self.value
            )));
        }
        if self.kind == EffectKind::Debuff && self.value > 1.0 {
            return Err(GameError::invalid_input(format!(
                "debuff value must be at most 1.0, got {}",
                self.value
            )));
        }
        if let Some(chance) = self.chance {
            if !chance.is_finite() || !(0.0..=1.0).contains(&chance) {
                return Err(GameError::invalid_input(format!(
                    "effect chance must be within [0, 1], got {chance}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Restrictions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<CharacterClass>,
}

impl Restrictions {
    pub fn allows(&self, level: u32, class: CharacterClass) -> bool {
        let level_ok = self.level.map_or(true, |required| level >= required);
        let class_ok = self.classes.is_empty() || self.classes.contains(&class);
        level_ok && class_ok
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub rarity: Rarity,
    /// Gold cost in the market.
    pub value: u64,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<ItemEffect>,
    #[serde(default)]
    pub restrictions: Restrictions,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ItemKind,
        rarity: Rarity,
        value: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            rarity,
            value,
            stats: Stats::default(),
            effects: Vec::new(),
            restrictions: Restrictions::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_effect(mut self, effect: ItemEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_restrictions(mut self, restrictions: Restrictions) -> Self {
        self.restrictions = restrictions;
        self
    }

    /// Same template under a fresh instance id.
    pub fn instantiate(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }
}
