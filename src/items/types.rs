#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Weapon = 0,
    Armor = 1,
    Potion = 2,
}

impl ItemType {
    pub fn all() -> [ItemType; 3] {
        [ItemType::Weapon, ItemType::Armor, ItemType::Potion]
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::all().get(index as usize).copied()
    }

    pub fn index(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Weapon => "Weapon",
            ItemType::Armor => "Armor",
            ItemType::Potion => "Potion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Legendary = 3,
}

impl Rarity {
    pub fn all() -> [Rarity; 4] {
        [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Legendary,
        ]
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::all().get(index as usize).copied()
    }

    pub fn index(&self) -> u32 {
        *self as u32
    }

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// An item value. Items with the same id are interchangeable and stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: u16,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub item_type: ItemType,
    /// Attack bonus, defense bonus or heal amount depending on type
    pub value: u32,
    pub cost: u32,
    pub quantity: u32,
}

impl Item {
    pub fn new(
        id: u16,
        name: &str,
        item_type: ItemType,
        rarity: Rarity,
        value: u32,
        cost: u32,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: String::new(),
            rarity,
            item_type,
            value,
            cost,
            quantity: 1,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Short summary of what using the item does.
    pub fn effect_text(&self) -> String {
        match self.item_type {
            ItemType::Weapon => format!("+{} attack", self.value),
            ItemType::Armor => format!("+{} defense", self.value),
            ItemType::Potion => format!("heals {}", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Uncommon < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Legendary);
    }

    #[test]
    fn test_index_conversions() {
        for rarity in Rarity::all() {
            assert_eq!(Rarity::from_index(rarity.index()), Some(rarity));
        }
        for item_type in ItemType::all() {
            assert_eq!(ItemType::from_index(item_type.index()), Some(item_type));
        }
        assert_eq!(Rarity::from_index(4), None);
        assert_eq!(ItemType::from_index(3), None);
    }

    #[test]
    fn test_item_creation() {
        let item = Item::new(101, "Rusty Dagger", ItemType::Weapon, Rarity::Common, 2, 15)
            .with_description("Better than nothing.");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.effect_text(), "+2 attack");
        assert_eq!(item.description, "Better than nothing.");
    }
}
