use super::types::{EquipmentSlot, Item};
use crate::character::stats::Stats;
use serde::{Deserialize, Serialize};

/// Worn items, at most one per slot.
///
/// Serializes as a slot-name → item map. New slots must be `#[serde(default)]`
/// so older character documents keep loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<Item>,
    #[serde(default)]
    pub armor: Option<Item>,
    #[serde(default)]
    pub amulet: Option<Item>,
    #[serde(default)]
    pub ring: Option<Item>,
    #[serde(default)]
    pub trinket: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
            EquipmentSlot::Amulet => self.amulet.as_ref(),
            EquipmentSlot::Ring => self.ring.as_ref(),
            EquipmentSlot::Trinket => self.trinket.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Amulet => &mut self.amulet,
            EquipmentSlot::Ring => &mut self.ring,
            EquipmentSlot::Trinket => &mut self.trinket,
        }
    }

    /// Puts `item` in `slot`, returning whatever was there before.
    pub fn replace(&mut self, slot: EquipmentSlot, item: Item) -> Option<Item> {
        self.slot_mut(slot).replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.weapon,
            &self.armor,
            &self.amulet,
            &self.ring,
            &self.trinket,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.iter_equipped().any(|item| item.id == id)
    }

    /// Sum of the stat bonuses of everything worn.
    pub fn bonus_stats(&self) -> Stats {
        let mut total = Stats::default();
        for item in self.iter_equipped() {
            total.add(&item.stats);
        }
        total
    }
}
