use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::items::types::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveKind {
    Kill,
    Collect,
    Explore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestObjective {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ObjectiveKind,
    /// Enemy name, item name or location the objective counts.
    pub target: String,
    pub required: u32,
}

impl QuestObjective {
    pub fn new(
        id: impl Into<String>,
        kind: ObjectiveKind,
        target: impl Into<String>,
        required: u32,
    ) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            kind,
            target: target.into(),
            required,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestRewards {
    pub experience: u64,
    #[serde(default)]
    pub gold: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub objectives: Vec<QuestObjective>,
    pub rewards: QuestRewards,
    #[serde(default = "default_level_requirement")]
    pub level_requirement: u32,
}

fn default_level_requirement() -> u32 {
    1
}

impl Quest {
    pub fn objective(&self, objective_id: &str) -> Option<&QuestObjective> {
        self.objectives.iter().find(|o| o.id == objective_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Per-character progress on one quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestProgress {
    pub quest_id: String,
    pub status: QuestStatus,
    /// objective id → current count, never above the objective's `required`.
    #[serde(default)]
    pub objectives: BTreeMap<String, u32>,
    /// Set once rewards have been paid out.
    #[serde(default)]
    pub rewards_claimed: bool,
    /// Unix timestamp of the last transition.
    #[serde(default)]
    pub updated_at: i64,
}

impl QuestProgress {
    pub fn not_started(quest_id: impl Into<String>) -> Self {
        Self {
            quest_id: quest_id.into(),
            status: QuestStatus::NotStarted,
            objectives: BTreeMap::new(),
            rewards_claimed: false,
            updated_at: 0,
        }
    }

    pub fn count(&self, objective_id: &str) -> u32 {
        self.objectives.get(objective_id).copied().unwrap_or(0)
    }

    /// True when every objective of `quest` has reached its required count.
    pub fn all_objectives_met(&self, quest: &Quest) -> bool {
        quest
            .objectives
            .iter()
            .all(|o| self.count(&o.id) >= o.required)
    }
}

/// Summary of what `claim_rewards` paid out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardsSummary {
    pub experience: u64,
    pub gold: u64,
    pub items: Vec<String>,
    pub levels_gained: u32,
}
