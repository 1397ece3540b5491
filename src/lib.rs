//! Ravenhollow - combat, progression, loot and quest core for a gothic RPG.
//!
//! Every core operation takes an immutable snapshot and returns a new one.
//! Randomness and ids are injected so results replay exactly under a seed.
//! [`service::GameService`] wraps the core with a character repository and a
//! catalog; [`simulator`] drives it offline for balance checks.

pub mod catalog;
pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod quests;
pub mod repository;
pub mod service;
pub mod simulator;
