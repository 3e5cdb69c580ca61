use crate::core::rng::{random_index, roll};
use crate::items::generation::generate_item;
use crate::items::{Item, ItemType, Rarity};
use rand::Rng;

/// Rolls a loot rarity. Higher levels shift weight toward rarer tiers.
pub fn roll_rarity(player_level: u32, rng: &mut impl Rng) -> Rarity {
    let value = roll(rng);

    // (common, uncommon, rare) cumulative thresholds; the rest is legendary
    let (common, uncommon, rare) = match player_level {
        0..=3 => (0.70, 0.95, 1.00),
        4..=6 => (0.45, 0.80, 0.97),
        7..=9 => (0.25, 0.60, 0.90),
        _ => (0.10, 0.40, 0.80),
    };

    if value < common {
        Rarity::Common
    } else if value < uncommon {
        Rarity::Uncommon
    } else if value < rare {
        Rarity::Rare
    } else {
        Rarity::Legendary
    }
}

pub fn roll_item_type(rng: &mut impl Rng) -> ItemType {
    let types = ItemType::all();
    types[random_index(rng, types.len())]
}

/// A level-appropriate random item for treasure rooms and shop stock.
pub fn generate_treasure(player_level: u32, rng: &mut impl Rng) -> Item {
    let rarity = roll_rarity(player_level, rng);
    let item_type = roll_item_type(rng);
    generate_item(rarity, item_type, rng)
}
