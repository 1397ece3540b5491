//! Quest state machine: NotStarted → InProgress → Completed, then a separate
//! exactly-once reward claim.

use super::types::{ObjectiveKind, Quest, QuestProgress, QuestRewards, QuestStatus, RewardsSummary};
use crate::character::progression::add_experience;
use crate::character::types::Character;
use crate::core::error::{GameError, GameResult};

fn ensure_same_quest(progress: &QuestProgress, quest: &Quest) -> GameResult<()> {
    if progress.quest_id != quest.id {
        return Err(GameError::invalid_input(format!(
            "progress for {} does not belong to quest {}",
            progress.quest_id, quest.id
        )));
    }
    Ok(())
}

/// Starts `quest` for the character with every objective at 0.
///
/// Fails when the character is under-levelled or already holds the quest
/// (in progress, completed, or claimed). A stored not-started record is
/// accepted and should be replaced by the returned progress.
pub fn accept_quest(character: &Character, quest: &Quest, now: i64) -> GameResult<QuestProgress> {
    if quest.objectives.is_empty() {
        return Err(GameError::invalid_input(format!(
            "quest {} has no objectives",
            quest.id
        )));
    }
    if let Some(objective) = quest.objectives.iter().find(|o| o.required == 0) {
        return Err(GameError::invalid_input(format!(
            "objective {} requires nothing",
            objective.id
        )));
    }
    if character.quests.holds(&quest.id) {
        return Err(GameError::invalid_transition(format!(
            "{} already holds quest {}",
            character.name, quest.id
        )));
    }
    if character.level < quest.level_requirement {
        return Err(GameError::invalid_input(format!(
            "{} requires level {}, {} is level {}",
            quest.title, quest.level_requirement, character.name, character.level
        )));
    }

    Ok(QuestProgress {
        status: QuestStatus::InProgress,
        objectives: quest.objectives.iter().map(|o| (o.id.clone(), 0)).collect(),
        updated_at: now,
        ..QuestProgress::not_started(quest.id.clone())
    })
}

/// Adds `amount` to an objective, capped at its required count. Completes the
/// quest once every objective is met; rewards still need an explicit claim.
pub fn update_objective(
    progress: &QuestProgress,
    quest: &Quest,
    objective_id: &str,
    amount: u32,
    now: i64,
) -> GameResult<QuestProgress> {
    ensure_same_quest(progress, quest)?;
    if progress.status != QuestStatus::InProgress {
        return Err(GameError::invalid_transition(format!(
            "quest {} is not in progress ({:?})",
            quest.id, progress.status
        )));
    }
    let objective = quest
        .objective(objective_id)
        .ok_or_else(|| GameError::not_found("objective", objective_id))?;
    if amount == 0 {
        return Err(GameError::invalid_input("objective progress must be positive"));
    }

    let mut next = progress.clone();
    let count = next
        .count(objective_id)
        .saturating_add(amount)
        .min(objective.required);
    next.objectives.insert(objective.id.clone(), count);
    if next.all_objectives_met(quest) {
        next.status = QuestStatus::Completed;
    }
    next.updated_at = now;
    Ok(next)
}

/// Counts a kill towards every kill objective naming this enemy.
/// Progress that is not in progress, or has no matching objective, is returned as is.
pub fn record_kill(
    progress: &QuestProgress,
    quest: &Quest,
    enemy_name: &str,
    now: i64,
) -> GameResult<QuestProgress> {
    ensure_same_quest(progress, quest)?;
    if progress.status != QuestStatus::InProgress {
        return Ok(progress.clone());
    }

    let mut next = progress.clone();
    for objective in quest.objectives.iter().filter(|o| {
        o.kind == ObjectiveKind::Kill && o.target.eq_ignore_ascii_case(enemy_name.trim())
    }) {
        if next.status != QuestStatus::InProgress {
            break;
        }
        if next.count(&objective.id) < objective.required {
            next = update_objective(&next, quest, &objective.id, 1, now)?;
        }
    }
    Ok(next)
}

fn grant(character: &Character, rewards: &QuestRewards) -> (Character, RewardsSummary) {
    let mut next = add_experience(character, rewards.experience);
    next.gold = next.gold.saturating_add(rewards.gold);
    next.inventory.extend(rewards.items.iter().cloned());

    let summary = RewardsSummary {
        experience: rewards.experience,
        gold: rewards.gold,
        items: rewards.items.iter().map(|i| i.name.clone()).collect(),
        levels_gained: next.level - character.level,
    };
    (next, summary)
}

/// Pays out a completed quest exactly once.
///
/// The returned character has the quest moved from its active list to its
/// completed set, so a second claim against either the character or the
/// returned progress is rejected.
pub fn claim_rewards(
    character: &Character,
    quest: &Quest,
    progress: &QuestProgress,
    now: i64,
) -> GameResult<(Character, QuestProgress, RewardsSummary)> {
    ensure_same_quest(progress, quest)?;
    if progress.rewards_claimed || character.quests.completed.contains(&quest.id) {
        return Err(GameError::invalid_transition(format!(
            "rewards for {} were already claimed",
            quest.id
        )));
    }
    if progress.status != QuestStatus::Completed {
        return Err(GameError::invalid_transition(format!(
            "quest {} is not completed ({:?})",
            quest.id, progress.status
        )));
    }

    let (mut next, summary) = grant(character, &quest.rewards);

    let mut claimed = progress.clone();
    claimed.rewards_claimed = true;
    claimed.updated_at = now;

    next.quests.active.retain(|p| p.quest_id != quest.id);
    next.quests.completed.insert(quest.id.clone());

    Ok((next, claimed, summary))
}

/// Quests the character could accept now.
pub fn available_quests<'a>(character: &Character, quests: &'a [Quest]) -> Vec<&'a Quest> {
    quests
        .iter()
        .filter(|q| q.level_requirement <= character.level && !character.quests.holds(&q.id))
        .collect()
}
