//! Capacity-bounded item storage keyed by item id.

use crate::character::Player;
use crate::core::constants::MAX_INVENTORY;
use crate::core::error::ActionError;
use crate::items::{Item, ItemType};
use std::collections::BTreeMap;

/// What using an item did to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    AttackRaised(u32),
    DefenseRaised(u32),
    Healed(u32),
}

/// Applies an item's type-specific effect to the player.
pub fn apply_item_effect(item: &Item, player: &mut Player) -> ItemEffect {
    match item.item_type {
        ItemType::Weapon => {
            player.attack += item.value;
            ItemEffect::AttackRaised(item.value)
        }
        ItemType::Armor => {
            player.defense += item.value;
            ItemEffect::DefenseRaised(item.value)
        }
        ItemType::Potion => ItemEffect::Healed(player.heal(item.value)),
    }
}

/// One stack per item id; `Item::quantity` is the stack size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    stacks: BTreeMap<u16, Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct stacks.
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.stacks.len() >= MAX_INVENTORY
    }

    /// True if adding `item` would succeed (existing stack or free slot).
    pub fn can_accept(&self, item: &Item) -> bool {
        self.stacks.contains_key(&item.id) || !self.is_full()
    }

    /// Adds to an existing stack, or opens a new one if there is room.
    pub fn add_item(&mut self, item: Item) -> Result<(), ActionError> {
        if let Some(stack) = self.stacks.get_mut(&item.id) {
            stack.quantity += item.quantity.max(1);
            return Ok(());
        }
        if self.is_full() {
            return Err(ActionError::InventoryFull);
        }
        let mut item = item;
        item.quantity = item.quantity.max(1);
        self.stacks.insert(item.id, item);
        Ok(())
    }

    /// Takes one unit out of a stack, deleting the stack when it empties.
    pub fn remove_item(&mut self, id: u16) -> Result<Item, ActionError> {
        let stack = self
            .stacks
            .get_mut(&id)
            .ok_or(ActionError::ItemNotFound(id))?;
        stack.quantity -= 1;
        let mut unit = stack.clone();
        unit.quantity = 1;
        if stack.quantity == 0 {
            self.stacks.remove(&id);
        }
        Ok(unit)
    }

    /// Removes a whole stack.
    pub fn remove_stack(&mut self, id: u16) -> Result<Item, ActionError> {
        self.stacks.remove(&id).ok_or(ActionError::ItemNotFound(id))
    }

    pub fn find(&self, id: u16) -> Option<&Item> {
        self.stacks.get(&id)
    }

    /// Stacks ordered by item id.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.stacks.values()
    }

    /// Sum of cost x quantity over all stacks.
    pub fn total_value(&self) -> u32 {
        self.stacks.values().map(|i| i.cost * i.quantity).sum()
    }

    /// Consumes one unit of an item and applies it to the player.
    pub fn use_item(
        &mut self,
        id: u16,
        player: &mut Player,
    ) -> Result<(Item, ItemEffect), ActionError> {
        let item = self.remove_item(id)?;
        let effect = apply_item_effect(&item, player);
        Ok((item, effect))
    }
}
