//! Application service: load a snapshot, run a core operation, write it back.
//!
//! Every mutating call takes `&mut self`, so one service instance never has
//! two actions in flight for the same character. Open encounters are kept in
//! memory, one per character.

use std::collections::HashMap;

use chrono::Utc;
use rand::Rng;

use crate::catalog::Catalog;
use crate::character::progression::recover_from_defeat;
use crate::character::types::{self, Character, CharacterClass};
use crate::combat::enemy::{generate_enemy, spawn_from_templates};
use crate::combat::logic::Encounter;
use crate::combat::types::{CombatResult, EncounterStatus, FleeOutcome};
use crate::core::error::{GameError, GameResult};
use crate::core::ids::IdSource;
use crate::items::inventory;
use crate::items::types::EquipmentSlot;
use crate::quests::tracker;
use crate::quests::types::{QuestProgress, RewardsSummary};
use crate::repository::CharacterRepository;

fn system_clock() -> i64 {
    Utc::now().timestamp()
}

pub struct GameService<R, C, G, I> {
    repo: R,
    catalog: C,
    rng: G,
    ids: I,
    clock: fn() -> i64,
    encounters: HashMap<String, Encounter>,
}

impl<R, C, G, I> GameService<R, C, G, I>
where
    R: CharacterRepository,
    C: Catalog,
    G: Rng,
    I: IdSource,
{
    pub fn new(repo: R, catalog: C, rng: G, ids: I) -> Self {
        Self {
            repo,
            catalog,
            rng,
            ids,
            clock: system_clock,
            encounters: HashMap::new(),
        }
    }

    /// Replaces the wall clock used for quest timestamps.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn character(&self, character_id: &str) -> GameResult<Character> {
        self.repo
            .get(character_id)?
            .ok_or_else(|| GameError::not_found("character", character_id))
    }

    fn save(&mut self, character: &Character) -> GameResult<()> {
        self.repo.put(character)?;
        Ok(())
    }

    /// Creates and stores a level 1 character carrying the starter kit.
    pub fn create_character(&mut self, name: &str, class_name: &str) -> GameResult<Character> {
        let class = CharacterClass::from_name(class_name);
        let mut character = types::create_character(self.ids.next_id("char"), name, class)?;
        for item in self.catalog.items() {
            character.inventory.push(item.instantiate(self.ids.next_id("item")));
        }
        self.save(&character)?;
        tracing::info!(
            character = %character.id,
            class = class.name(),
            "Created character {}",
            character.name
        );
        Ok(character)
    }

    pub fn encounter(&self, character_id: &str) -> Option<&Encounter> {
        self.encounters.get(character_id)
    }

    /// Opens an encounter against a catalog enemy near the character's level,
    /// or a generated one when the catalog has none.
    pub fn start_encounter(&mut self, character_id: &str) -> GameResult<Encounter> {
        let character = self.character(character_id)?;
        if character.is_defeated() {
            return Err(GameError::invalid_transition(format!(
                "{} cannot fight at 0 health",
                character.name
            )));
        }
        if self
            .encounters
            .get(character_id)
            .is_some_and(|e| !e.is_over())
        {
            return Err(GameError::invalid_transition(format!(
                "{} is already in combat",
                character.name
            )));
        }

        let enemy = if self.catalog.enemies().is_empty() {
            generate_enemy(character.level, &mut self.rng, &mut self.ids)?
        } else {
            spawn_from_templates(
                self.catalog.enemies(),
                character.level,
                &mut self.rng,
                &mut self.ids,
            )?
        };

        let mut encounter = Encounter::new(self.ids.next_id("encounter"), enemy);
        encounter.begin()?;
        tracing::info!(
            character = %character_id,
            encounter = %encounter.id,
            "Encounter started against {} (level {})",
            encounter.enemy.name,
            encounter.enemy.level
        );
        self.encounters
            .insert(character_id.to_string(), encounter.clone());
        Ok(encounter)
    }

    /// Counts a kill against every active quest the character holds.
    fn record_kill(&self, character: &mut Character, enemy_name: &str, now: i64) -> GameResult<()> {
        let active = character.quests.active.clone();
        for progress in active {
            let Ok(quest) = self.catalog.quest(&progress.quest_id) else {
                tracing::warn!(quest = %progress.quest_id, "Active quest missing from catalog");
                continue;
            };
            let next = tracker::record_kill(&progress, quest, enemy_name, now)?;
            if next != progress {
                tracing::debug!(quest = %quest.id, "Kill of {} recorded", enemy_name);
                character.quests.upsert(next);
            }
        }
        Ok(())
    }

    /// Keeps an encounter that is still open, drops one that has ended.
    /// Called only after the character snapshot has been saved.
    fn store_encounter(&mut self, character_id: &str, encounter: Encounter) {
        if encounter.is_over() {
            self.encounters.remove(character_id);
        } else {
            self.encounters.insert(character_id.to_string(), encounter);
        }
    }

    /// Plays one round of the character's open encounter.
    ///
    /// The returned `updated_character` is the stored snapshot: after a victory it
    /// includes kill credit on active quests, after a defeat the character has
    /// already been revived. If the save fails the encounter is left as it was.
    pub fn attack(&mut self, character_id: &str, skill_id: &str) -> GameResult<CombatResult> {
        let character = self.character(character_id)?;
        let now = (self.clock)();

        let mut encounter = self
            .encounters
            .get(character_id)
            .cloned()
            .ok_or_else(|| GameError::not_found("encounter", character_id))?;
        let mut result = encounter.attack(&character, skill_id, &mut self.rng, &mut self.ids)?;
        let status = encounter.status;
        let rounds = encounter.rounds;

        match status {
            EncounterStatus::Victory => {
                self.record_kill(&mut result.updated_character, &result.updated_enemy.name, now)?;
                tracing::info!(
                    character = %character_id,
                    rounds,
                    loot = result.loot.len(),
                    "Defeated {} for {} experience",
                    result.updated_enemy.name,
                    result.experience_gained
                );
            }
            EncounterStatus::Defeat => {
                result.updated_character = recover_from_defeat(&result.updated_character);
                result
                    .log
                    .push(format!("{} recovers, shaken", result.updated_character.name));
                tracing::info!(
                    character = %character_id,
                    rounds,
                    "Defeated by {}",
                    result.updated_enemy.name
                );
            }
            _ => {
                tracing::debug!(character = %character_id, rounds, "Round resolved");
            }
        }

        self.save(&result.updated_character)?;
        self.store_encounter(character_id, encounter);
        Ok(result)
    }

    pub fn flee(&mut self, character_id: &str) -> GameResult<FleeOutcome> {
        let character = self.character(character_id)?;
        let mut encounter = self
            .encounters
            .get(character_id)
            .cloned()
            .ok_or_else(|| GameError::not_found("encounter", character_id))?;
        let mut outcome = encounter.flee(&character, &mut self.rng)?;

        if outcome.defeated {
            outcome.updated_character = recover_from_defeat(&outcome.updated_character);
        }
        tracing::info!(
            character = %character_id,
            success = outcome.success,
            defeated = outcome.defeated,
            "Flee attempt"
        );
        self.save(&outcome.updated_character)?;
        self.store_encounter(character_id, encounter);
        Ok(outcome)
    }

    pub fn accept_quest(&mut self, character_id: &str, quest_id: &str) -> GameResult<QuestProgress> {
        let mut character = self.character(character_id)?;
        let quest = self.catalog.quest(quest_id)?;
        let progress = tracker::accept_quest(&character, quest, (self.clock)())?;
        character.quests.upsert(progress.clone());
        self.save(&character)?;
        tracing::info!(character = %character_id, quest = %quest_id, "Quest accepted");
        Ok(progress)
    }

    pub fn progress_objective(
        &mut self,
        character_id: &str,
        quest_id: &str,
        objective_id: &str,
        amount: u32,
    ) -> GameResult<QuestProgress> {
        let mut character = self.character(character_id)?;
        let quest = self.catalog.quest(quest_id)?;
        let progress = character.quests.progress(quest_id).ok_or_else(|| {
            GameError::invalid_transition(format!("quest {quest_id} has not been accepted"))
        })?;
        let next = tracker::update_objective(progress, quest, objective_id, amount, (self.clock)())?;
        character.quests.upsert(next.clone());
        self.save(&character)?;
        tracing::debug!(
            character = %character_id,
            quest = %quest_id,
            objective = %objective_id,
            status = ?next.status,
            "Objective progressed"
        );
        Ok(next)
    }

    pub fn claim_quest(&mut self, character_id: &str, quest_id: &str) -> GameResult<RewardsSummary> {
        let character = self.character(character_id)?;
        let quest = self.catalog.quest(quest_id)?;
        if character.quests.completed.contains(quest_id) {
            return Err(GameError::invalid_transition(format!(
                "rewards for {quest_id} were already claimed"
            )));
        }
        let progress = character.quests.progress(quest_id).ok_or_else(|| {
            GameError::invalid_transition(format!("quest {quest_id} has not been accepted"))
        })?;
        let (paid, _, summary) = tracker::claim_rewards(&character, quest, progress, (self.clock)())?;
        self.save(&paid)?;
        tracing::info!(
            character = %character_id,
            quest = %quest_id,
            experience = summary.experience,
            gold = summary.gold,
            "Quest rewards claimed"
        );
        Ok(summary)
    }

    pub fn available_quests(&self, character_id: &str) -> GameResult<Vec<String>> {
        let character = self.character(character_id)?;
        Ok(tracker::available_quests(&character, self.catalog.quests())
            .into_iter()
            .map(|q| q.id.clone())
            .collect())
    }

    fn update(
        &mut self,
        character_id: &str,
        action: impl FnOnce(&Character) -> GameResult<Character>,
    ) -> GameResult<Character> {
        let character = self.character(character_id)?;
        let next = action(&character)?;
        self.save(&next)?;
        Ok(next)
    }

    pub fn equip(&mut self, character_id: &str, item_id: &str) -> GameResult<Character> {
        let next = self.update(character_id, |c| inventory::equip_item(c, item_id))?;
        tracing::debug!(character = %character_id, item = %item_id, "Item equipped");
        Ok(next)
    }

    pub fn unequip(&mut self, character_id: &str, slot: EquipmentSlot) -> GameResult<Character> {
        let next = self.update(character_id, |c| inventory::unequip_item(c, slot))?;
        tracing::debug!(character = %character_id, slot = slot.name(), "Item unequipped");
        Ok(next)
    }

    pub fn use_item(&mut self, character_id: &str, item_id: &str) -> GameResult<Character> {
        let next = self.update(character_id, |c| inventory::use_item(c, item_id))?;
        tracing::debug!(character = %character_id, item = %item_id, "Item used");
        Ok(next)
    }

    pub fn drop_item(&mut self, character_id: &str, item_id: &str) -> GameResult<Character> {
        self.update(character_id, |c| inventory::drop_item(c, item_id))
    }

    pub fn buy(&mut self, character_id: &str, market_item_id: &str) -> GameResult<Character> {
        let character = self.character(character_id)?;
        let item = self.catalog.market_item(market_item_id)?;
        let next = inventory::buy_item(&character, item, &mut self.ids)?;
        tracing::info!(
            character = %character_id,
            item = %market_item_id,
            price = item.value,
            "Item bought"
        );
        self.save(&next)?;
        Ok(next)
    }

    /// Sells an inventory item. Returns the gold received.
    pub fn sell(&mut self, character_id: &str, item_id: &str) -> GameResult<u64> {
        let character = self.character(character_id)?;
        let (next, price) = inventory::sell_item(&character, item_id)?;
        self.save(&next)?;
        tracing::info!(character = %character_id, item = %item_id, price, "Item sold");
        Ok(price)
    }

    /// Removes the character and any open encounter.
    pub fn delete_character(&mut self, character_id: &str) -> GameResult<()> {
        self.encounters.remove(character_id);
        if !self.repo.delete(character_id)? {
            return Err(GameError::not_found("character", character_id));
        }
        tracing::info!(character = %character_id, "Character deleted");
        Ok(())
    }
}
