//! Turn resolution: one synchronous round (character, then enemy), fleeing,
//! and the per-encounter state machine.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::generate_enemy;
use super::math::{calculate_damage, flee_chance, hit_chance};
use super::types::{CombatResult, Combatant, EncounterStatus, Enemy, FleeOutcome};
use crate::character::progression::add_experience;
use crate::character::types::Character;
use crate::core::error::{GameError, GameResult};
use crate::core::ids::IdSource;
use crate::items::drops::generate_loot;

/// Uniform roll in [0, 100).
fn roll_percent(rng: &mut impl Rng) -> f64 {
    rng.gen::<f64>() * 100.0
}

fn validate_enemy(enemy: &Enemy) -> GameResult<()> {
    if enemy.level < 1 {
        return Err(GameError::invalid_input("enemy level must be at least 1"));
    }
    if enemy.health > enemy.max_health {
        return Err(GameError::invalid_input(format!(
            "enemy health {} exceeds max {}",
            enemy.health, enemy.max_health
        )));
    }
    Ok(())
}

fn ensure_fight_can_continue(character: &Character, enemy: &Enemy) -> GameResult<()> {
    character.validate()?;
    validate_enemy(enemy)?;
    if character.is_defeated() {
        return Err(GameError::invalid_transition(format!(
            "{} has been defeated and cannot act",
            character.name
        )));
    }
    if !enemy.is_alive() {
        return Err(GameError::invalid_transition(format!(
            "{} is already dead",
            enemy.name
        )));
    }
    Ok(())
}

/// The enemy's attack on the character. Returns the damage dealt (0 on a miss).
fn enemy_strike(
    enemy: &Enemy,
    character: &mut Character,
    rng: &mut impl Rng,
    log: &mut Vec<String>,
) -> GameResult<u32> {
    let chance = hit_chance(Combatant::Enemy(enemy), Combatant::Character(character));
    if roll_percent(rng) >= f64::from(chance) {
        log.push(format!("{} attacks but misses!", enemy.name));
        return Ok(0);
    }

    let damage = calculate_damage(
        Combatant::Enemy(enemy),
        Combatant::Character(character),
        f64::from(enemy.damage),
        &[],
    )?;
    character.health.drain(damage);
    log.push(format!(
        "{} hits {} for {} damage",
        enemy.name, character.name, damage
    ));
    Ok(damage)
}

/// Resolves one round of combat with the character using `skill_id`.
///
/// The character acts first: energy is paid, healing applied, then the attack
/// rolls to hit. If the enemy survives it strikes back in the same round.
/// A kill ends the encounter in victory: loot is rolled and added to the
/// inventory and the enemy's experience is granted once. A character brought
/// to 0 health ends it in defeat with no rewards.
pub fn resolve_combat_round(
    character: &Character,
    enemy: &Enemy,
    skill_id: &str,
    rng: &mut impl Rng,
    ids: &mut impl IdSource,
) -> GameResult<CombatResult> {
    ensure_fight_can_continue(character, enemy)?;

    let skill = character.skill(skill_id)?.clone();
    for effect in &skill.effects {
        effect.validate()?;
    }

    let mut hero = character.clone();
    let mut foe = enemy.clone();
    let mut log = Vec::new();

    if skill.energy_cost > 0 {
        match hero.energy.as_mut() {
            Some(energy) if energy.current >= skill.energy_cost => energy.drain(skill.energy_cost),
            Some(energy) => {
                return Err(GameError::invalid_input(format!(
                    "{} needs {} energy, {} available",
                    skill.name, skill.energy_cost, energy.current
                )))
            }
            None => {
                return Err(GameError::invalid_input(format!(
                    "{} needs {} energy, {} has none",
                    skill.name, skill.energy_cost, hero.name
                )))
            }
        }
    }

    if let Some(healing) = skill.healing.filter(|h| *h > 0) {
        let before = hero.health.current;
        hero.health.restore(healing);
        log.push(format!(
            "{} recovers {} health",
            hero.name,
            hero.health.current - before
        ));
    }

    let chance = hit_chance(Combatant::Character(&hero), Combatant::Enemy(&foe));
    if roll_percent(rng) < f64::from(chance) {
        let damage = calculate_damage(
            Combatant::Character(&hero),
            Combatant::Enemy(&foe),
            f64::from(skill.base_damage()),
            &skill.effects,
        )?;
        foe.take_damage(damage);
        log.push(format!(
            "{} uses {} on {} for {} damage",
            hero.name, skill.name, foe.name, damage
        ));
    } else {
        log.push(format!("{}'s {} misses {}", hero.name, skill.name, foe.name));
    }

    if !foe.is_alive() {
        log.push(format!("{} has been defeated!", foe.name));

        let loot = generate_loot(&foe, rng, ids)?;
        for item in &loot {
            log.push(format!("Found {} ({})", item.name, item.rarity.name()));
        }
        hero.inventory.extend(loot.iter().cloned());

        let level_before = hero.level;
        hero = add_experience(&hero, foe.experience);
        log.push(format!("Gained {} experience", foe.experience));
        if hero.level > level_before {
            log.push(format!("{} reached level {}!", hero.name, hero.level));
        }

        return Ok(CombatResult {
            updated_character: hero,
            updated_enemy: foe,
            log,
            is_over: true,
            victory: true,
            loot,
            experience_gained: enemy.experience,
        });
    }

    enemy_strike(&foe, &mut hero, rng, &mut log)?;

    let defeated = hero.is_defeated();
    if defeated {
        log.push(format!("{} has fallen...", hero.name));
    }

    Ok(CombatResult {
        updated_character: hero,
        updated_enemy: foe,
        log,
        is_over: defeated,
        victory: false,
        loot: Vec::new(),
        experience_gained: 0,
    })
}

/// Attempts to escape. On failure the enemy gets a free attack.
pub fn flee(character: &Character, enemy: &Enemy, rng: &mut impl Rng) -> GameResult<FleeOutcome> {
    ensure_fight_can_continue(character, enemy)?;

    let mut hero = character.clone();
    let mut log = Vec::new();

    if roll_percent(rng) < f64::from(flee_chance(&hero)) {
        log.push(format!("{} escapes from {}", hero.name, enemy.name));
        return Ok(FleeOutcome {
            success: true,
            updated_character: hero,
            log,
            defeated: false,
        });
    }

    log.push(format!("{} fails to escape!", hero.name));
    enemy_strike(enemy, &mut hero, rng, &mut log)?;
    let defeated = hero.is_defeated();
    if defeated {
        log.push(format!("{} has fallen...", hero.name));
    }

    Ok(FleeOutcome {
        success: false,
        updated_character: hero,
        log,
        defeated,
    })
}

/// One combat session between a character and a single enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    pub id: String,
    pub enemy: Enemy,
    pub status: EncounterStatus,
    pub rounds: u32,
}

impl Encounter {
    pub fn new(id: impl Into<String>, enemy: Enemy) -> Self {
        Self {
            id: id.into(),
            enemy,
            status: EncounterStatus::NotStarted,
            rounds: 0,
        }
    }

    /// Generates a level-scaled enemy and starts the fight.
    pub fn initiate(level: u32, rng: &mut impl Rng, ids: &mut impl IdSource) -> GameResult<Self> {
        let enemy = generate_enemy(level, rng, ids)?;
        let mut encounter = Self::new(ids.next_id("encounter"), enemy);
        encounter.begin()?;
        Ok(encounter)
    }

    pub fn begin(&mut self) -> GameResult<()> {
        if self.status != EncounterStatus::NotStarted {
            return Err(GameError::invalid_transition(format!(
                "encounter {} has already started",
                self.id
            )));
        }
        validate_enemy(&self.enemy)?;
        self.status = EncounterStatus::InProgress;
        Ok(())
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    fn ensure_in_progress(&self) -> GameResult<()> {
        match self.status {
            EncounterStatus::InProgress => Ok(()),
            EncounterStatus::NotStarted => Err(GameError::invalid_transition(format!(
                "encounter {} has not started",
                self.id
            ))),
            status => Err(GameError::invalid_transition(format!(
                "encounter {} is already over ({status:?})",
                self.id
            ))),
        }
    }

    /// Plays one round and advances the state machine from its result.
    pub fn attack(
        &mut self,
        character: &Character,
        skill_id: &str,
        rng: &mut impl Rng,
        ids: &mut impl IdSource,
    ) -> GameResult<CombatResult> {
        self.ensure_in_progress()?;
        let result = resolve_combat_round(character, &self.enemy, skill_id, rng, ids)?;
        self.enemy = result.updated_enemy.clone();
        self.rounds += 1;
        self.status = result.status();
        Ok(result)
    }

    pub fn flee(&mut self, character: &Character, rng: &mut impl Rng) -> GameResult<FleeOutcome> {
        self.ensure_in_progress()?;
        let outcome = flee(character, &self.enemy, rng)?;
        self.rounds += 1;
        if outcome.success {
            self.status = EncounterStatus::Fled;
        } else if outcome.defeated {
            self.status = EncounterStatus::Defeat;
        }
        Ok(outcome)
    }
}
