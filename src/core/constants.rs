//! Shared balance constants used by the combat, progression, loot and quest core.
//!
//! All core balance numbers should be defined here.
//! Change once, test everywhere.

// =============================================================================
// PROGRESSION - Experience curve and derived resources
// =============================================================================

/// Experience to clear level L is `XP_CURVE_BASE × L^XP_CURVE_EXPONENT`.
pub const XP_CURVE_BASE: u64 = 100;
pub const XP_CURVE_EXPONENT: u32 = 2;

/// Max health = BASE_HEALTH + vitality × HEALTH_PER_VITALITY.
pub const BASE_HEALTH: u32 = 100;
pub const HEALTH_PER_VITALITY: u32 = 10;

/// Max energy = BASE_ENERGY + intelligence × ENERGY_PER_INTELLIGENCE + vitality × ENERGY_PER_VITALITY.
pub const BASE_ENERGY: u32 = 50;
pub const ENERGY_PER_INTELLIGENCE: u32 = 5;
pub const ENERGY_PER_VITALITY: u32 = 2;

/// Experience lost when a defeated character is revived.
pub const DEFEAT_EXPERIENCE_PENALTY: u64 = 50;

// Character creation
pub const STARTING_GOLD: u64 = 100;
pub const MAX_NAME_LENGTH: usize = 24;

// =============================================================================
// COMBAT - Hit chance, damage, fleeing
// =============================================================================

pub const BASE_HIT_CHANCE: i64 = 80;
pub const HIT_CHANCE_PER_AGILITY: i64 = 2;
pub const MIN_HIT_CHANCE: i64 = 10;
pub const MAX_HIT_CHANCE: i64 = 95;

/// Damage multiplier gained per point of attacker strength.
pub const DAMAGE_PER_STRENGTH: f64 = 0.1;
/// Damage mitigated per point of defender defense (enemy) or vitality (character).
pub const MITIGATION_PER_DEFENSE: f64 = 0.05;
pub const MIN_DAMAGE: u32 = 1;

/// Damage used by skills that do not declare their own.
pub const DEFAULT_SKILL_DAMAGE: u32 = 10;

pub const BASE_FLEE_CHANCE: u32 = 50;
pub const FLEE_CHANCE_PER_AGILITY: u32 = 2;

// Enemy scaling: stat = floor(base × (1 + level × ENEMY_LEVEL_SCALING))
pub const ENEMY_LEVEL_SCALING: f64 = 0.2;
pub const ENEMY_BASE_HEALTH: u32 = 50;
pub const ENEMY_BASE_DAMAGE: u32 = 5;
pub const ENEMY_BASE_DEFENSE: u32 = 2;
pub const ENEMY_BASE_EXPERIENCE: u32 = 20;

pub const ENEMY_NAME_PREFIXES: [&str; 5] = ["Fierce", "Dark", "Cursed", "Ancient", "Corrupted"];
pub const ENEMY_NAME_TYPES: [&str; 5] = ["Warrior", "Beast", "Demon", "Specter", "Dragon"];

// =============================================================================
// LOOT
// =============================================================================

pub const LOOT_MIN_ITEMS: usize = 1;
pub const LOOT_MAX_ITEMS: usize = 3;
pub const LOOT_VALUE_PER_LEVEL: u64 = 10;

/// Cumulative drop table, in rarity order. Artifacts never drop.
pub const LOOT_RARITY_WEIGHTS: [f64; 5] = [0.60, 0.25, 0.10, 0.04, 0.01];

/// Market buys items back at value / SELL_PRICE_DIVISOR.
pub const SELL_PRICE_DIVISOR: u64 = 2;
