//! Experience curve, stat growth and derived resource caps.

use super::stats::Stats;
use super::types::{Character, CharacterClass, Resource};
use crate::core::constants::*;

/// Experience needed to advance from `level` to `level + 1`.
/// Levels below 1 are treated as level 1.
pub fn experience_required(level: u32) -> u64 {
    let level = u64::from(level.max(1));
    XP_CURVE_BASE.saturating_mul(level.saturating_pow(XP_CURVE_EXPONENT))
}

/// Max health = 100 + vitality × 10
pub fn max_health(stats: &Stats) -> u32 {
    BASE_HEALTH.saturating_add(stats.vitality.saturating_mul(HEALTH_PER_VITALITY))
}

/// Max energy = 50 + intelligence × 5 + vitality × 2
pub fn max_energy(stats: &Stats) -> u32 {
    BASE_ENERGY
        .saturating_add(stats.intelligence.saturating_mul(ENERGY_PER_INTELLIGENCE))
        .saturating_add(stats.vitality.saturating_mul(ENERGY_PER_VITALITY))
}

/// Whole points a stat with growth `rate` gains on reaching `new_level`.
///
/// Cumulative gain from level 1 to L is exactly floor(rate × (L − 1)), so
/// fractional rates pay out over several levels instead of being lost.
fn growth_step(rate: f64, new_level: u32) -> u32 {
    if new_level < 2 {
        return 0;
    }
    let reached = (rate * f64::from(new_level - 1)).floor();
    let previous = (rate * f64::from(new_level - 2)).floor();
    (reached - previous).max(0.0) as u32
}

/// Applies one level of class growth to `stats` for a character reaching `new_level`.
pub fn stat_growth(stats: &Stats, new_level: u32, class: CharacterClass) -> Stats {
    let rates = class.growth_rates();
    Stats {
        strength: stats
            .strength
            .saturating_add(growth_step(rates.strength, new_level)),
        agility: stats
            .agility
            .saturating_add(growth_step(rates.agility, new_level)),
        intelligence: stats
            .intelligence
            .saturating_add(growth_step(rates.intelligence, new_level)),
        vitality: stats
            .vitality
            .saturating_add(growth_step(rates.vitality, new_level)),
    }
}

/// Recomputes health/energy caps from effective stats, keeping current values in range.
pub fn sync_resource_caps(character: &mut Character) {
    let effective = character.effective_stats();
    character.health.set_max(max_health(&effective));
    if let Some(energy) = character.energy.as_mut() {
        energy.set_max(max_energy(&effective));
    }
}

/// Raises the character one level: class growth, new caps, resources refilled.
/// Experience is left untouched.
pub fn level_up(character: &Character) -> Character {
    let mut next = character.clone();
    next.level = character.level.saturating_add(1);
    next.stats = stat_growth(&character.stats, next.level, character.class);

    let effective = next.effective_stats();
    next.health = Resource::full(max_health(&effective));
    if next.energy.is_some() {
        next.energy = Some(Resource::full(max_energy(&effective)));
    }
    next
}

/// Adds experience, applying every level-up the total pays for.
/// Surplus past each threshold carries into the next level.
pub fn add_experience(character: &Character, amount: u64) -> Character {
    let mut next = character.clone();
    next.experience = next.experience.saturating_add(amount);

    loop {
        let required = experience_required(next.level);
        if next.experience < required {
            break;
        }
        let carried = next.experience - required;
        next = level_up(&next);
        next.experience = carried;
    }

    next
}

/// Revives a defeated character at full health for the cost of some experience.
pub fn recover_from_defeat(character: &Character) -> Character {
    let mut next = character.clone();
    next.health.refill();
    next.experience = next.experience.saturating_sub(DEFEAT_EXPERIENCE_PENALTY);
    next
}
