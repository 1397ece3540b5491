//! Enemy generation: level-scaled stats and random names.

use rand::Rng;

use super::types::Enemy;
use crate::core::constants::*;
use crate::core::error::{GameError, GameResult};
use crate::core::ids::IdSource;

/// Catalog enemies within this many levels of the character are eligible.
const TEMPLATE_LEVEL_RANGE: u32 = 2;

pub fn generate_enemy_name(rng: &mut impl Rng) -> String {
    let prefix = ENEMY_NAME_PREFIXES[rng.gen_range(0..ENEMY_NAME_PREFIXES.len())];
    let kind = ENEMY_NAME_TYPES[rng.gen_range(0..ENEMY_NAME_TYPES.len())];
    format!("{} {}", prefix, kind)
}

/// Scaling applied to every base stat at `level`.
pub fn level_multiplier(level: u32) -> f64 {
    1.0 + f64::from(level) * ENEMY_LEVEL_SCALING
}

fn scale(base: u32, multiplier: f64) -> u32 {
    (f64::from(base) * multiplier).floor() as u32
}

/// Generates an enemy at `level` with stats `floor(base × (1 + 0.2×level))`.
pub fn generate_enemy(
    level: u32,
    rng: &mut impl Rng,
    ids: &mut impl IdSource,
) -> GameResult<Enemy> {
    if level < 1 {
        return Err(GameError::invalid_input("enemy level must be at least 1"));
    }

    let multiplier = level_multiplier(level);
    let health = scale(ENEMY_BASE_HEALTH, multiplier);

    Ok(Enemy {
        id: ids.next_id("enemy"),
        name: generate_enemy_name(rng),
        level,
        health,
        max_health: health,
        damage: scale(ENEMY_BASE_DAMAGE, multiplier),
        defense: scale(ENEMY_BASE_DEFENSE, multiplier),
        experience: u64::from(scale(ENEMY_BASE_EXPERIENCE, multiplier)),
        loot: Vec::new(),
    })
}

/// Picks one of the catalog enemies near `level` and gives it a fresh instance id
/// at full health. Falls back to the lowest-level template when none is close.
pub fn spawn_from_templates(
    templates: &[Enemy],
    level: u32,
    rng: &mut impl Rng,
    ids: &mut impl IdSource,
) -> GameResult<Enemy> {
    if level < 1 {
        return Err(GameError::invalid_input("enemy level must be at least 1"));
    }

    let eligible: Vec<&Enemy> = templates
        .iter()
        .filter(|e| e.level.abs_diff(level) <= TEMPLATE_LEVEL_RANGE)
        .collect();

    let picked = if eligible.is_empty() {
        templates.iter().min_by_key(|e| e.level)
    } else {
        Some(eligible[rng.gen_range(0..eligible.len())])
    };
    let template =
        picked.ok_or_else(|| GameError::not_found("enemy template", format!("level {level}")))?;

    Ok(Enemy {
        id: ids.next_id("enemy"),
        health: template.max_health,
        ..template.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::SequentialIds;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn template(name: &str, level: u32) -> Enemy {
        Enemy {
            id: format!("tpl-{name}"),
            name: name.to_string(),
            level,
            health: 1,
            max_health: 40 + level * 20,
            damage: 5,
            defense: 2,
            experience: 20,
            loot: vec![],
        }
    }

    #[test]
    fn test_generate_enemy_level_one() {
        let enemy = generate_enemy(1, &mut create_test_rng(), &mut SequentialIds::new()).unwrap();
        // multiplier 1.2
        assert_eq!(enemy.health, 60);
        assert_eq!(enemy.max_health, 60);
        assert_eq!(enemy.damage, 6);
        assert_eq!(enemy.defense, 2);
        assert_eq!(enemy.experience, 24);
        assert_eq!(enemy.id, "enemy-1");
    }

    #[test]
    fn test_generate_enemy_level_five() {
        let enemy = generate_enemy(5, &mut create_test_rng(), &mut SequentialIds::new()).unwrap();
        // multiplier 2.0
        assert_eq!(enemy.health, 100);
        assert_eq!(enemy.damage, 10);
        assert_eq!(enemy.defense, 4);
        assert_eq!(enemy.experience, 40);
    }

    #[test]
    fn test_generate_enemy_rejects_level_zero() {
        let result = generate_enemy(0, &mut create_test_rng(), &mut SequentialIds::new());
        assert!(matches!(result, Err(GameError::InvalidInput(_))));
    }

    #[test]
    fn test_stats_grow_with_level() {
        let mut rng = create_test_rng();
        let mut ids = SequentialIds::new();
        let mut previous = generate_enemy(1, &mut rng, &mut ids).unwrap();
        for level in 2..30 {
            let next = generate_enemy(level, &mut rng, &mut ids).unwrap();
            assert!(next.max_health > previous.max_health);
            assert!(next.experience >= previous.experience);
            previous = next;
        }
    }

    #[test]
    fn test_enemy_name_is_reproducible() {
        let a = generate_enemy_name(&mut ChaCha8Rng::seed_from_u64(7));
        let b = generate_enemy_name(&mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
        let (prefix, kind) = a.split_once(' ').unwrap();
        assert!(ENEMY_NAME_PREFIXES.contains(&prefix));
        assert!(ENEMY_NAME_TYPES.contains(&kind));
    }

    #[test]
    fn test_spawn_from_templates_respects_range() {
        let templates = vec![template("Ghoul", 1), template("Vampire", 5)];
        let mut rng = create_test_rng();
        let mut ids = SequentialIds::new();
        for _ in 0..20 {
            let enemy = spawn_from_templates(&templates, 6, &mut rng, &mut ids).unwrap();
            assert_eq!(enemy.name, "Vampire");
            assert_eq!(enemy.health, enemy.max_health);
            assert!(enemy.id.starts_with("enemy-"));
        }
    }

    #[test]
    fn test_spawn_from_templates_falls_back_to_weakest() {
        let templates = vec![template("Vampire", 5), template("Ghoul", 1)];
        let enemy = spawn_from_templates(
            &templates,
            20,
            &mut create_test_rng(),
            &mut SequentialIds::new(),
        )
        .unwrap();
        assert_eq!(enemy.name, "Ghoul");
    }

    #[test]
    fn test_spawn_from_empty_templates_is_not_found() {
        let result = spawn_from_templates(&[], 1, &mut create_test_rng(), &mut SequentialIds::new());
        assert!(matches!(result, Err(GameError::NotFound { .. })));
    }
}
