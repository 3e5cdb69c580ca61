use crate::core::rng::random_index;
use crate::items::{Item, ItemType, Rarity};
use rand::Rng;

/// Catalog entry: (id, name, description, type, rarity, value, cost).
/// Ids are `(type + 1) * 100 + rarity * 10 + variant`.
type CatalogEntry = (u16, &'static str, &'static str, ItemType, Rarity, u32, u32);

const CATALOG: [CatalogEntry; 24] = [
    (101, "Rusty Dagger", "Pitted, but still pointy.", ItemType::Weapon, Rarity::Common, 2, 15),
    (102, "Iron Sword", "A plain soldier's blade.", ItemType::Weapon, Rarity::Common, 3, 25),
    (111, "Steel Longsword", "Well balanced and keen.", ItemType::Weapon, Rarity::Uncommon, 5, 60),
    (112, "Hunting Bow", "Strung with sinew, true of aim.", ItemType::Weapon, Rarity::Uncommon, 4, 50),
    (121, "Runed Axe", "Glyphs flicker along the edge.", ItemType::Weapon, Rarity::Rare, 8, 140),
    (122, "Elven Blade", "Light as a feather, sharp as grief.", ItemType::Weapon, Rarity::Rare, 9, 160),
    (131, "Dragonfang", "Carved from a wyrm's tooth.", ItemType::Weapon, Rarity::Legendary, 15, 400),
    (132, "Sword of Dawn", "It glows faintly in the dark.", ItemType::Weapon, Rarity::Legendary, 14, 380),
    (201, "Leather Vest", "Stiff boiled leather.", ItemType::Armor, Rarity::Common, 2, 20),
    (202, "Wooden Shield", "Splintered at the rim.", ItemType::Armor, Rarity::Common, 1, 12),
    (211, "Chainmail", "Rings of riveted iron.", ItemType::Armor, Rarity::Uncommon, 4, 55),
    (212, "Iron Helm", "Dented from many blows.", ItemType::Armor, Rarity::Uncommon, 3, 45),
    (221, "Plate Cuirass", "Polished steel plate.", ItemType::Armor, Rarity::Rare, 7, 150),
    (222, "Tower Shield", "A wall you can carry.", ItemType::Armor, Rarity::Rare, 6, 130),
    (231, "Aegis of Kings", "Blessed by a forgotten throne.", ItemType::Armor, Rarity::Legendary, 12, 420),
    (232, "Dragonscale Mail", "Warm to the touch.", ItemType::Armor, Rarity::Legendary, 13, 450),
    (301, "Minor Healing Potion", "A faintly red tonic.", ItemType::Potion, Rarity::Common, 20, 10),
    (302, "Herbal Tonic", "Bitter, but it helps.", ItemType::Potion, Rarity::Common, 15, 8),
    (311, "Healing Potion", "The adventurer's friend.", ItemType::Potion, Rarity::Uncommon, 40, 25),
    (312, "Troll Blood Draught", "Do not ask where it came from.", ItemType::Potion, Rarity::Uncommon, 35, 22),
    (321, "Greater Healing Potion", "Thick and crimson.", ItemType::Potion, Rarity::Rare, 70, 60),
    (322, "Elixir of Vigor", "Fizzes with restless energy.", ItemType::Potion, Rarity::Rare, 80, 70),
    (331, "Phoenix Elixir", "Liquid fire that mends all wounds.", ItemType::Potion, Rarity::Legendary, 150, 200),
    (332, "Ambrosia", "Food of the gods.", ItemType::Potion, Rarity::Legendary, 120, 180),
];

fn to_item(entry: &CatalogEntry) -> Item {
    let (id, name, description, item_type, rarity, value, cost) = *entry;
    Item::new(id, name, item_type, rarity, value, cost).with_description(description)
}

/// Looks up a catalog item by id.
pub fn item_by_id(id: u16) -> Option<Item> {
    CATALOG.iter().find(|entry| entry.0 == id).map(to_item)
}

/// Every catalog item of the given rarity and type.
pub fn catalog_items(rarity: Rarity, item_type: ItemType) -> Vec<Item> {
    CATALOG
        .iter()
        .filter(|entry| entry.3 == item_type && entry.4 == rarity)
        .map(to_item)
        .collect()
}

/// Picks a random catalog item of the given rarity and type.
pub fn generate_item(rarity: Rarity, item_type: ItemType, rng: &mut impl Rng) -> Item {
    let mut candidates = catalog_items(rarity, item_type);
    candidates.swap_remove(random_index(rng, candidates.len()))
}
