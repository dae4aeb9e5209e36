//! Player hotbar + backpack with hotbar-first routing.
//!
//! Pickups go to the hotbar first. Whatever the hotbar cannot take (it is
//! full and has no partial stack of the item) is forwarded unchanged to the
//! backpack. The backpack never forwards further; its leftovers are handed
//! back to the caller.

use std::rc::Rc;

use skyjellies_core::ItemId;
use tracing::warn;

use crate::inventory::{Container, InventoryError, ItemStack, HOTBAR_SIZE, INVENTORY_SIZE};
use crate::observer::{ContainerObserver, ObserverId};

/// Result of offering a stack to the player.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    /// Whether any unit landed in the hotbar or backpack
    pub accepted: bool,
    /// Units neither container could hold
    pub remainder: Option<ItemStack>,
}

impl AddOutcome {
    /// Whether every unit was delivered.
    pub fn is_complete(&self) -> bool {
        self.remainder.is_none()
    }
}

/// Player inventory with a selectable hotbar and an overflow backpack.
#[derive(Debug)]
pub struct PlayerInventory {
    hotbar: Container,
    inventory: Container,
    /// Currently selected hotbar slot.
    selected_hotbar_slot: usize,
}

impl PlayerInventory {
    /// Create empty containers with the given capacities.
    pub fn new(hotbar_size: usize, inventory_size: usize) -> Self {
        Self {
            hotbar: Container::hotbar(hotbar_size),
            inventory: Container::inventory(inventory_size),
            selected_hotbar_slot: 0,
        }
    }

    /// The hotbar container.
    pub fn hotbar(&self) -> &Container {
        &self.hotbar
    }

    /// The backpack container.
    pub fn inventory(&self) -> &Container {
        &self.inventory
    }

    /// Observe hotbar changes.
    pub fn subscribe_hotbar(&mut self, observer: Rc<dyn ContainerObserver>) -> ObserverId {
        self.hotbar.subscribe(observer)
    }

    /// Observe backpack changes.
    pub fn subscribe_inventory(&mut self, observer: Rc<dyn ContainerObserver>) -> ObserverId {
        self.inventory.subscribe(observer)
    }

    /// Offer a picked-up stack, hotbar first.
    pub fn try_add(&mut self, stack: ItemStack) -> AddOutcome {
        let offered = stack.to_string();
        let hotbar = self.hotbar.try_add(stack);
        let mut accepted = hotbar.accepted();

        let Some(rest) = hotbar.rest else {
            return AddOutcome {
                accepted,
                remainder: None,
            };
        };

        let backpack = self.inventory.try_add(rest);
        accepted |= backpack.accepted();

        if let Some(remainder) = &backpack.rest {
            warn!(
                offered = %offered,
                undelivered = remainder.quantity(),
                "Can't add item because inventory is full"
            );
        }

        AddOutcome {
            accepted,
            remainder: backpack.rest,
        }
    }

    /// Consume `amount` units of `item` from the hotbar (all or nothing).
    pub fn remove_quantity(&mut self, item: ItemId, amount: u32) -> Result<(), InventoryError> {
        self.hotbar.remove_quantity(item, amount)
    }

    /// Total units of `item` across hotbar and backpack.
    pub fn count_item(&self, item: ItemId) -> u64 {
        self.hotbar.count_item(item) + self.inventory.count_item(item)
    }

    /// Get the currently selected hotbar slot index.
    pub fn selected_slot(&self) -> usize {
        self.selected_hotbar_slot
    }

    /// Set the selected hotbar slot.
    pub fn select(&mut self, slot: usize) -> Result<(), InventoryError> {
        if slot >= self.hotbar.capacity() {
            return Err(InventoryError::SlotOutOfRange {
                slot,
                capacity: self.hotbar.capacity(),
            });
        }
        self.selected_hotbar_slot = slot;
        Ok(())
    }

    /// Get the stack in the currently selected hotbar slot.
    pub fn selected_stack(&self) -> Option<&ItemStack> {
        self.hotbar.get(self.selected_hotbar_slot)
    }
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new(HOTBAR_SIZE, INVENTORY_SIZE)
    }
}
