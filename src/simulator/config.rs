//! Simulation configuration.

use crate::character::types::CharacterClass;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated characters
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Level a run is trying to reach
    pub target_level: u32,

    /// Class every simulated character starts as
    pub class: CharacterClass,

    /// Encounters per run before giving up
    pub max_encounters_per_run: u32,

    /// Defeats per run before giving up
    pub max_defeats: u32,

    /// Rounds after which the character tries to flee
    pub max_rounds_per_encounter: u32,

    /// Fight the named catalog enemies instead of generated ones
    pub use_catalog_enemies: bool,

    /// Equip dropped gear when it beats what is worn
    pub equip_upgrades: bool,

    /// Refill health between encounters
    pub rest_between_encounters: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            target_level: 10,
            class: CharacterClass::Warrior,
            max_encounters_per_run: 5_000,
            max_defeats: 50,
            max_rounds_per_encounter: 50,
            use_catalog_enemies: false,
            equip_upgrades: true,
            rest_between_encounters: true,
        }
    }
}

impl SimConfig {
    /// Quick config for checking one class
    pub fn class_balance_test(class: CharacterClass) -> Self {
        Self {
            num_runs: 100,
            target_level: 5,
            class,
            ..Default::default()
        }
    }

    /// Gauntlet against the named enemies with no resting
    pub fn catalog_gauntlet() -> Self {
        Self {
            num_runs: 200,
            target_level: 6,
            use_catalog_enemies: true,
            rest_between_encounters: false,
            ..Default::default()
        }
    }
}
