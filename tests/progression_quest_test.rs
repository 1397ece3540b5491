//! Integration test: progression and the quest state machine
//!
//! Level-up growth and refills, experience carry-over, defeat recovery, and a
//! quest taken from acceptance through a single reward claim.

mod common;

use common::{warrior, FIXED_NOW};
use ravenhollow::character::{
    add_experience, create_character, experience_required, max_energy, max_health,
    recover_from_defeat, CharacterClass, Resource, Stats,
};
use ravenhollow::core::GameError;
use ravenhollow::items::{Item, ItemKind, Rarity};
use ravenhollow::quests::{
    accept_quest, available_quests, claim_rewards, record_kill, update_objective, ObjectiveKind,
    Quest, QuestObjective, QuestRewards, QuestStatus,
};

fn crypt_quest() -> Quest {
    Quest {
        id: "quest-crypt".to_string(),
        title: "Silence the Crypt".to_string(),
        description: String::new(),
        objectives: vec![
            QuestObjective::new("obj-ghouls", ObjectiveKind::Kill, "Feral Ghoul", 3),
            QuestObjective::new("obj-candles", ObjectiveKind::Collect, "Grave Candle", 3),
        ],
        rewards: QuestRewards {
            experience: 40,
            gold: 25,
            items: vec![Item::new("reward-censer", "Silver Censer", ItemKind::Trinket, Rarity::Rare, 50)],
        },
        level_requirement: 1,
    }
}

// =========================================================================
// Progression
// =========================================================================

#[test]
fn test_experience_curve_values() {
    assert_eq!(experience_required(0), 100);
    assert_eq!(experience_required(1), 100);
    assert_eq!(experience_required(2), 400);
    assert_eq!(experience_required(10), 10_000);
    for level in 1..50 {
        assert!(experience_required(level + 1) > experience_required(level));
    }
}

#[test]
fn test_health_formula_matches_vitality() {
    for vitality in [0, 1, 7, 10, 55] {
        let stats = Stats::new(1, 1, 1, vitality);
        assert_eq!(max_health(&stats), 100 + vitality * 10);
    }
}

#[test]
fn test_exact_threshold_levels_up_with_growth_and_refill() {
    let mut hero = warrior();
    hero.health.current = 37;
    if let Some(energy) = hero.energy.as_mut() {
        energy.current = 3;
    }

    let next = add_experience(&hero, experience_required(1));

    assert_eq!(next.level, 2);
    assert_eq!(next.experience, 0);
    // Warrior growth 2.5 / 1.2 / 0.8 / 2.0 pays floor(rate) at level 2.
    assert_eq!(next.stats, Stats::new(12, 7, 4, 12));
    assert_eq!(next.health, Resource::full(max_health(&next.stats)));
    assert_eq!(next.health.max, 220);
    assert_eq!(next.energy, Some(Resource::full(max_energy(&next.stats))));
}

#[test]
fn test_large_grant_chains_levels_and_carries_remainder() {
    // 100 (level 1) + 400 (level 2) + 30 left over
    let next = add_experience(&warrior(), 530);
    assert_eq!(next.level, 3);
    assert_eq!(next.experience, 30);
}

#[test]
fn test_fractional_growth_pays_out_over_levels() {
    let mage = create_character("char-2", "Vesna", CharacterClass::Mage).unwrap();
    let base = mage.stats.strength;
    let grown = add_experience(&mage, (1..=5).map(experience_required).sum());
    assert_eq!(grown.level, 6);
    // floor(0.8 × 5) = 4 points of strength over five levels
    assert_eq!(grown.stats.strength, base + 4);
}

#[test]
fn test_defeat_recovery_restores_health_and_costs_experience() {
    let mut fallen = warrior();
    fallen.health.current = 0;
    fallen.experience = 80;

    let revived = recover_from_defeat(&fallen);
    assert_eq!(revived.health.current, revived.health.max);
    assert_eq!(revived.experience, 30);

    fallen.experience = 10;
    assert_eq!(recover_from_defeat(&fallen).experience, 0);
}

// =========================================================================
// Quest lifecycle
// =========================================================================

#[test]
fn test_two_objective_quest_claims_exactly_once() {
    let quest = crypt_quest();
    let hero = warrior();

    let mut progress = accept_quest(&hero, &quest, FIXED_NOW).unwrap();
    assert_eq!(progress.status, QuestStatus::InProgress);
    assert_eq!(progress.count("obj-ghouls"), 0);

    for _ in 0..3 {
        progress = record_kill(&progress, &quest, "feral ghoul", FIXED_NOW).unwrap();
    }
    assert_eq!(progress.count("obj-ghouls"), 3);
    assert_eq!(progress.status, QuestStatus::InProgress);

    progress = update_objective(&progress, &quest, "obj-candles", 2, FIXED_NOW).unwrap();
    assert_eq!(progress.status, QuestStatus::InProgress);
    progress = update_objective(&progress, &quest, "obj-candles", 1, FIXED_NOW).unwrap();
    assert_eq!(progress.status, QuestStatus::Completed);
    assert_eq!(progress.updated_at, FIXED_NOW);

    let mut holder = hero.clone();
    holder.quests.upsert(progress.clone());
    let (paid, claimed, summary) = claim_rewards(&holder, &quest, &progress, FIXED_NOW).unwrap();

    assert_eq!(paid.experience, hero.experience + 40);
    assert_eq!(paid.gold, hero.gold + 25);
    assert_eq!(summary.items.len(), 1);
    assert!(paid.inventory.iter().any(|i| i.name == "Silver Censer"));
    assert!(claimed.rewards_claimed);
    assert!(paid.quests.completed.contains("quest-crypt"));

    let by_progress = claim_rewards(&holder, &quest, &claimed, FIXED_NOW);
    assert!(matches!(by_progress, Err(GameError::InvalidStateTransition(_))));
    let by_character = claim_rewards(&paid, &quest, &progress, FIXED_NOW);
    assert!(matches!(by_character, Err(GameError::InvalidStateTransition(_))));
    assert_eq!(paid.gold, hero.gold + 25);
}

#[test]
fn test_objective_counts_never_exceed_required() {
    let quest = crypt_quest();
    let progress = accept_quest(&warrior(), &quest, FIXED_NOW).unwrap();

    let progress = update_objective(&progress, &quest, "obj-ghouls", 10, FIXED_NOW).unwrap();
    assert_eq!(progress.count("obj-ghouls"), 3);
    let progress = update_objective(&progress, &quest, "obj-ghouls", 1, FIXED_NOW).unwrap();
    assert_eq!(progress.count("obj-ghouls"), 3);
    assert_eq!(progress.status, QuestStatus::InProgress);
}

#[test]
fn test_claim_before_completion_is_rejected() {
    let quest = crypt_quest();
    let hero = warrior();
    let progress = accept_quest(&hero, &quest, FIXED_NOW).unwrap();
    let result = claim_rewards(&hero, &quest, &progress, FIXED_NOW);
    assert!(matches!(result, Err(GameError::InvalidStateTransition(_))));
}

#[test]
fn test_invalid_quest_definitions_are_rejected() {
    let hero = warrior();

    let mut empty = crypt_quest();
    empty.objectives.clear();
    assert!(matches!(
        accept_quest(&hero, &empty, FIXED_NOW),
        Err(GameError::InvalidInput(_))
    ));

    let mut zero = crypt_quest();
    zero.objectives[1].required = 0;
    assert!(matches!(
        accept_quest(&hero, &zero, FIXED_NOW),
        Err(GameError::InvalidInput(_))
    ));
}

#[test]
fn test_held_quests_leave_the_available_list() {
    let quest = crypt_quest();
    let mut hero = warrior();
    let quests = vec![quest.clone()];
    assert_eq!(available_quests(&hero, &quests).len(), 1);

    hero.quests.upsert(accept_quest(&hero, &quest, FIXED_NOW).unwrap());
    assert!(available_quests(&hero, &quests).is_empty());
    assert!(matches!(
        accept_quest(&hero, &quest, FIXED_NOW),
        Err(GameError::InvalidStateTransition(_))
    ));
}
