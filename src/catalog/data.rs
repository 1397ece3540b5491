//! Built-in reference data: starter kit, market stock, named enemies and quests.

use crate::character::stats::Stats;
use crate::combat::types::Enemy;
use crate::items::types::{EffectKind, Item, ItemEffect, ItemKind, Rarity, Restrictions};
use crate::quests::types::{ObjectiveKind, Quest, QuestObjective, QuestRewards};

/// Items every new character may be handed at creation.
pub fn starter_items() -> Vec<Item> {
    vec![
        Item::new("item-rusty-dagger", "Rusty Dagger", ItemKind::Weapon, Rarity::Common, 10)
            .with_description("A simple but effective weapon for a novice adventurer")
            .with_stats(Stats::new(3, 0, 0, 0)),
        Item::new("item-leather-vest", "Leather Vest", ItemKind::Armor, Rarity::Common, 15)
            .with_description("Basic protection against weak enemies")
            .with_stats(Stats::new(0, 0, 0, 2)),
        Item::new("item-health-potion", "Health Potion", ItemKind::Consumable, Rarity::Common, 5)
            .with_description("Restores 50 health when consumed")
            .with_effect(ItemEffect::new(EffectKind::Heal, 50.0)),
    ]
}

pub fn market_items() -> Vec<Item> {
    vec![
        Item::new("market-small-potion", "Small Health Potion", ItemKind::Consumable, Rarity::Common, 15)
            .with_description("Restores 25 health points when consumed")
            .with_effect(ItemEffect::new(EffectKind::Heal, 25.0)),
        Item::new("market-medium-potion", "Medium Health Potion", ItemKind::Consumable, Rarity::Uncommon, 30)
            .with_description("Restores 50 health points when consumed")
            .with_effect(ItemEffect::new(EffectKind::Heal, 50.0)),
        Item::new("market-large-potion", "Large Health Potion", ItemKind::Consumable, Rarity::Rare, 60)
            .with_description("Restores 100 health points when consumed")
            .with_effect(ItemEffect::new(EffectKind::Heal, 100.0)),
        Item::new("market-strength-elixir", "Strength Elixir", ItemKind::Consumable, Rarity::Rare, 75)
            .with_description("Temporarily increases strength by 5")
            .with_effect(ItemEffect {
                duration: Some(3),
                ..ItemEffect::new(EffectKind::Buff, 5.0)
            }),
        Item::new("market-shadow-cloak", "Shadow Cloak", ItemKind::Armor, Rarity::Epic, 120)
            .with_description("A mysterious cloak that grants stealth in darkness")
            .with_stats(Stats::new(0, 3, 2, 0)),
    ]
}

fn enemy(id: &str, name: &str, level: u32, stats: [u32; 3], experience: u64, loot: Item) -> Enemy {
    let [health, damage, defense] = stats;
    Enemy {
        id: id.to_string(),
        name: name.to_string(),
        level,
        health,
        max_health: health,
        damage,
        defense,
        experience,
        loot: vec![loot],
    }
}

/// Named enemies with their loot tables, ordered by level.
pub fn enemy_templates() -> Vec<Enemy> {
    vec![
        enemy(
            "enemy-feral-ghoul",
            "Feral Ghoul",
            1,
            [50, 5, 2],
            20,
            Item::new("loot-ghoul-teeth", "Ghoul Teeth", ItemKind::Material, Rarity::Common, 3)
                .with_description("Sharp teeth from a ghoul, used in crafting dark artifacts"),
        ),
        enemy(
            "enemy-blood-cultist",
            "Blood Cultist",
            2,
            [70, 8, 3],
            35,
            Item::new("loot-cultist-robe", "Cultist Robe", ItemKind::Armor, Rarity::Uncommon, 12)
                .with_description("Dark robes worn by blood cultists")
                .with_stats(Stats::new(0, 0, 2, 0)),
        ),
        enemy(
            "enemy-rabid-werewolf",
            "Rabid Werewolf",
            3,
            [120, 12, 5],
            60,
            Item::new("loot-werewolf-claw", "Werewolf Claw", ItemKind::Weapon, Rarity::Rare, 45)
                .with_description("A razor-sharp claw from a werewolf")
                .with_stats(Stats::new(5, 2, 0, 0)),
        ),
        enemy(
            "enemy-blood-cultist-leader",
            "Blood Cultist Leader",
            3,
            [100, 10, 4],
            50,
            Item::new("loot-ritual-sigil", "Ritual Sigil", ItemKind::Trinket, Rarity::Rare, 40)
                .with_description("A blood-etched sigil carried by the cult's high priest")
                .with_stats(Stats::new(1, 0, 3, 0)),
        ),
        enemy(
            "enemy-ancient-vampire",
            "Ancient Vampire",
            5,
            [200, 18, 8],
            120,
            Item::new("loot-vampiric-amulet", "Vampiric Amulet", ItemKind::Amulet, Rarity::Epic, 120)
                .with_description("An amulet that grants life-stealing abilities")
                .with_stats(Stats::new(3, 0, 5, 0))
                .with_effect(ItemEffect::new(EffectKind::OnHit, 0.1)),
        ),
        enemy(
            "enemy-alpha-werewolf",
            "Alpha Werewolf",
            6,
            [260, 22, 10],
            180,
            Item::new("loot-alpha-pelt", "Alpha Pelt", ItemKind::Armor, Rarity::Epic, 150)
                .with_description("The silver-streaked hide of a pack leader")
                .with_stats(Stats::new(2, 2, 0, 4)),
        ),
    ]
}

pub fn quests() -> Vec<Quest> {
    vec![
        Quest {
            id: "quest-1".to_string(),
            title: "The Awakening".to_string(),
            description: "Investigate the recent surge of undead activity in the cemetery."
                .to_string(),
            objectives: vec![
                QuestObjective::new("obj-1-1", ObjectiveKind::Kill, "Feral Ghoul", 3)
                    .with_description("Defeat 3 ghouls"),
                QuestObjective::new("obj-1-2", ObjectiveKind::Collect, "Necromancer's Tome", 1)
                    .with_description("Find the necromancer's tome"),
            ],
            rewards: QuestRewards {
                experience: 150,
                gold: 50,
                items: vec![Item::new(
                    "reward-amulet-of-protection",
                    "Amulet of Protection",
                    ItemKind::Amulet,
                    Rarity::Uncommon,
                    40,
                )
                .with_stats(Stats::new(0, 0, 0, 2))],
            },
            level_requirement: 1,
        },
        Quest {
            id: "quest-2".to_string(),
            title: "Blood Cult Rising".to_string(),
            description:
                "A cult dedicated to blood rituals has been forming in the dark alleys of the city."
                    .to_string(),
            objectives: vec![
                QuestObjective::new("obj-2-1", ObjectiveKind::Kill, "Blood Cultist Leader", 1)
                    .with_description("Defeat the cult leader"),
                QuestObjective::new("obj-2-2", ObjectiveKind::Explore, "Ritual Altar", 3)
                    .with_description("Destroy ritual altars"),
            ],
            rewards: QuestRewards {
                experience: 300,
                gold: 120,
                items: vec![Item::new(
                    "reward-blood-ritual-dagger",
                    "Blood Ritual Dagger",
                    ItemKind::Weapon,
                    Rarity::Rare,
                    90,
                )
                .with_stats(Stats::new(4, 1, 0, 0))
                .with_restrictions(Restrictions {
                    level: Some(2),
                    classes: vec![],
                })],
            },
            level_requirement: 2,
        },
        Quest {
            id: "quest-3".to_string(),
            title: "Howl of the Wolf".to_string(),
            description:
                "A pack of werewolves is terrorizing the countryside during the full moon."
                    .to_string(),
            objectives: vec![
                QuestObjective::new("obj-3-1", ObjectiveKind::Explore, "Werewolf Den", 1)
                    .with_description("Track the werewolf pack"),
                QuestObjective::new("obj-3-2", ObjectiveKind::Kill, "Rabid Werewolf", 5)
                    .with_description("Defeat werewolves"),
                QuestObjective::new("obj-3-3", ObjectiveKind::Kill, "Alpha Werewolf", 1)
                    .with_description("Defeat the alpha werewolf"),
            ],
            rewards: QuestRewards {
                experience: 500,
                gold: 250,
                items: vec![
                    Item::new(
                        "reward-wolfsbane-potion",
                        "Wolfsbane Potion",
                        ItemKind::Consumable,
                        Rarity::Rare,
                        60,
                    )
                    .with_effect(ItemEffect::new(EffectKind::Heal, 100.0)),
                    Item::new(
                        "reward-silver-edged-blade",
                        "Silver-Edged Blade",
                        ItemKind::Weapon,
                        Rarity::Epic,
                        200,
                    )
                    .with_stats(Stats::new(7, 2, 0, 0))
                    .with_restrictions(Restrictions {
                        level: Some(3),
                        classes: vec![],
                    }),
                ],
            },
            level_requirement: 3,
        },
    ]
}
