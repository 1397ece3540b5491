//! Offline balance simulator.
//!
//! Runs batches of seeded characters through encounters using the same
//! combat, loot and progression code as the live service, and reports:
//! - Win rate and fight length
//! - Level reached
//! - Loot by rarity and gear upgrades

mod config;
mod loot_sim;
mod report;
mod runner;

pub use config::SimConfig;
pub use loot_sim::LootStats;
pub use report::SimReport;
pub use runner::{run_simulation, RunStats};
