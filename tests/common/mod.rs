//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ravenhollow::catalog::StaticCatalog;
use ravenhollow::character::{create_character, Character, CharacterClass};
use ravenhollow::combat::Enemy;
use ravenhollow::core::SequentialIds;
use ravenhollow::repository::InMemoryRepository;
use ravenhollow::service::GameService;

pub const FIXED_NOW: i64 = 1_700_000_000;

pub fn fixed_clock() -> i64 {
    FIXED_NOW
}

pub fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

/// Returns the same word forever. `FixedRng(0)` makes every percentage roll
/// succeed; `FixedRng(u64::MAX)` makes every one fail.
pub struct FixedRng(pub u64);

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(self.0 as u8);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

pub fn warrior() -> Character {
    create_character("char-1", "Mira", CharacterClass::Warrior).unwrap()
}

pub fn ghoul(health: u32) -> Enemy {
    Enemy {
        id: "enemy-1".to_string(),
        name: "Feral Ghoul".to_string(),
        level: 1,
        health,
        max_health: 50,
        damage: 5,
        defense: 2,
        experience: 20,
        loot: vec![],
    }
}

pub type TestService = GameService<InMemoryRepository, StaticCatalog, ChaCha8Rng, SequentialIds>;

pub fn test_service() -> TestService {
    GameService::new(
        InMemoryRepository::new(),
        StaticCatalog::new(),
        create_test_rng(),
        SequentialIds::new(),
    )
    .with_clock(fixed_clock)
}
