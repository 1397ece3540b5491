//! Pure combat formulas: hit chance, damage, effects and flee odds.
//!
//! Nothing here rolls dice; callers feed the results to an injected `Rng`.

use super::types::Combatant;
use crate::character::types::Character;
use crate::core::constants::*;
use crate::core::error::{GameError, GameResult};
use crate::items::types::{EffectKind, ItemEffect};

impl Combatant<'_> {
    /// Agility used for hit chance. Enemies have none.
    fn agility(&self) -> u32 {
        match self {
            Combatant::Character(c) => c.effective_stats().agility,
            Combatant::Enemy(_) => 0,
        }
    }
}

/// Hit chance in percent: 80 ± 2 per point of agility difference, clamped to [10, 95].
pub fn hit_chance(attacker: Combatant<'_>, defender: Combatant<'_>) -> u32 {
    let diff = i64::from(attacker.agility()) - i64::from(defender.agility());
    let chance = BASE_HIT_CHANCE.saturating_add(diff.saturating_mul(HIT_CHANCE_PER_AGILITY));
    chance.clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE) as u32
}

/// Computes damage for one hit.
///
/// `base × (1 + 0.1×strength) × (1 − 0.05×defense)`, then buff/debuff effects,
/// floored with a minimum of 1. Strength only applies to a character attacker;
/// defense is the enemy's flat stat or the defending character's vitality.
pub fn calculate_damage(
    attacker: Combatant<'_>,
    defender: Combatant<'_>,
    base_damage: f64,
    effects: &[ItemEffect],
) -> GameResult<u32> {
    if !base_damage.is_finite() || base_damage < 0.0 {
        return Err(GameError::invalid_input(format!(
            "base damage cannot be negative: {base_damage}"
        )));
    }

    let mut damage = base_damage;

    if let Combatant::Character(c) = attacker {
        let strength = f64::from(c.effective_stats().strength);
        damage *= 1.0 + strength * DAMAGE_PER_STRENGTH;
    }

    let defense = match defender {
        Combatant::Character(c) => c.effective_stats().vitality,
        Combatant::Enemy(e) => e.defense,
    };
    damage *= 1.0 - f64::from(defense) * MITIGATION_PER_DEFENSE;

    for effect in effects {
        effect.validate()?;
        match effect.kind {
            EffectKind::Buff => damage *= 1.0 + effect.value,
            EffectKind::Debuff => damage *= 1.0 - effect.value,
            _ => {}
        }
    }

    // inf × 0 from a full debuff after overflowing buffs
    let floored = damage.floor();
    if floored.is_nan() || floored < f64::from(MIN_DAMAGE) {
        Ok(MIN_DAMAGE)
    } else {
        Ok(floored.min(f64::from(u32::MAX)) as u32)
    }
}

/// Applies heal and damage effects to a character. Combat-time effects
/// (buff, debuff, on-hit, on-kill, passive) leave the snapshot untouched.
pub fn apply_effects(target: &Character, effects: &[ItemEffect]) -> GameResult<Character> {
    for effect in effects {
        effect.validate()?;
    }

    let mut next = target.clone();
    for effect in effects {
        let amount = effect.value.floor().min(f64::from(u32::MAX)) as u32;
        match effect.kind {
            EffectKind::Heal => next.health.restore(amount),
            EffectKind::Damage => next.health.drain(amount),
            EffectKind::Buff
            | EffectKind::Debuff
            | EffectKind::OnHit
            | EffectKind::OnKill
            | EffectKind::Passive => {}
        }
    }
    Ok(next)
}

/// Flee chance in percent: 50 + 2 per point of agility, capped at 100.
pub fn flee_chance(character: &Character) -> u32 {
    let agility = character.effective_stats().agility;
    BASE_FLEE_CHANCE
        .saturating_add(agility.saturating_mul(FLEE_CHANCE_PER_AGILITY))
        .min(100)
}
