//! The shop: rotating stock bought and sold against player gold.

use crate::character::Player;
use crate::core::constants::{SHOP_MAX_ITEMS, SHOP_MIN_ITEMS};
use crate::core::error::ActionError;
use crate::core::rng::random_range;
use crate::items::{generate_treasure, Inventory, Item};
use rand::Rng;

/// Shop stock is a plain list; duplicates are separate entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shop {
    stock: Vec<Item>,
}

impl Shop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stock with 5-8 level-appropriate items.
    pub fn restock(&mut self, player_level: u32, rng: &mut impl Rng) {
        let count = random_range(rng, SHOP_MIN_ITEMS as u32, SHOP_MAX_ITEMS as u32) as usize;
        self.stock = (0..count)
            .map(|_| generate_treasure(player_level, rng))
            .collect();
        log::debug!("shop restocked with {} items", self.stock.len());
    }

    pub fn stock(&self) -> &[Item] {
        &self.stock
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Buys the item at `index`. Nothing changes unless the player can pay
    /// and the inventory can take it.
    pub fn buy(
        &mut self,
        index: usize,
        player: &mut Player,
        inventory: &mut Inventory,
    ) -> Result<Item, ActionError> {
        let item = self
            .stock
            .get(index)
            .ok_or(ActionError::ItemNotFound(0))?;
        if player.gold < item.cost {
            return Err(ActionError::InsufficientGold {
                cost: item.cost,
                available: player.gold,
            });
        }
        if !inventory.can_accept(item) {
            return Err(ActionError::InventoryFull);
        }

        let item = self.stock.remove(index);
        player.spend_gold(item.cost)?;
        inventory.add_item(item.clone())?;
        Ok(item)
    }

    /// Sells one unit of an inventory item for half its cost.
    /// Returns the sold unit and the gold received.
    pub fn sell(
        &self,
        id: u16,
        player: &mut Player,
        inventory: &mut Inventory,
    ) -> Result<(Item, u32), ActionError> {
        let item = inventory.remove_item(id)?;
        let price = sell_price(&item);
        player.gold += price;
        Ok((item, price))
    }
}

pub fn sell_price(item: &Item) -> u32 {
    item.cost / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::PlayerTrait;
    use crate::core::constants::MAX_INVENTORY;
    use crate::items::{ItemType, Rarity};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn shop_with(items: Vec<Item>) -> Shop {
        Shop { stock: items }
    }

    fn sword() -> Item {
        Item::new(102, "Iron Sword", ItemType::Weapon, Rarity::Common, 3, 25)
    }

    #[test]
    fn test_restock_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut shop = Shop::new();
        for _ in 0..50 {
            shop.restock(1, &mut rng);
            assert!((SHOP_MIN_ITEMS..=SHOP_MAX_ITEMS).contains(&shop.stock().len()));
        }
    }

    #[test]
    fn test_buy_moves_item_and_gold() {
        let mut shop = shop_with(vec![sword()]);
        let mut player = Player::new("Kit", PlayerTrait::Fortunate);
        let mut inventory = Inventory::new();

        let bought = shop.buy(0, &mut player, &mut inventory).unwrap();
        assert_eq!(bought.id, 102);
        assert_eq!(player.gold, 25);
        assert!(shop.is_empty());
        assert_eq!(inventory.find(102).unwrap().quantity, 1);
    }

    #[test]
    fn test_buy_rejected_without_gold() {
        let mut shop = shop_with(vec![sword()]);
        let mut player = Player::new("Kit", PlayerTrait::Fortunate);
        player.gold = 10;
        let mut inventory = Inventory::new();

        assert_eq!(
            shop.buy(0, &mut player, &mut inventory),
            Err(ActionError::InsufficientGold {
                cost: 25,
                available: 10
            })
        );
        assert_eq!(player.gold, 10);
        assert_eq!(shop.stock().len(), 1);
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_buy_rejected_when_inventory_full() {
        let mut shop = shop_with(vec![sword()]);
        let mut player = Player::new("Kit", PlayerTrait::Fortunate);
        let mut inventory = Inventory::new();
        for id in 0..MAX_INVENTORY as u16 {
            inventory
                .add_item(Item::new(1000 + id, "Pebble", ItemType::Armor, Rarity::Common, 1, 1))
                .unwrap();
        }

        assert_eq!(
            shop.buy(0, &mut player, &mut inventory),
            Err(ActionError::InventoryFull)
        );
        assert_eq!(player.gold, 50);
        assert_eq!(shop.stock().len(), 1);
    }

    #[test]
    fn test_sell_pays_half() {
        let shop = Shop::new();
        let mut player = Player::new("Kit", PlayerTrait::Fortunate);
        let mut inventory = Inventory::new();
        inventory.add_item(sword()).unwrap();
        inventory.add_item(sword()).unwrap();

        let (item, price) = shop.sell(102, &mut player, &mut inventory).unwrap();
        assert_eq!(item.name, "Iron Sword");
        assert_eq!(price, 12);
        assert_eq!(player.gold, 62);
        assert_eq!(inventory.find(102).unwrap().quantity, 1);
    }

    #[test]
    fn test_sell_missing_item() {
        let shop = Shop::new();
        let mut player = Player::new("Kit", PlayerTrait::Fortunate);
        let mut inventory = Inventory::new();
        assert_eq!(
            shop.sell(7, &mut player, &mut inventory),
            Err(ActionError::ItemNotFound(7))
        );
        assert_eq!(player.gold, 50);
    }
}
