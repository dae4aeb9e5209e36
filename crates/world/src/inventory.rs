//! Inventory system for the player's hotbar and backpack.
//!
//! A [`Container`] is a fixed-capacity, ordered list of [`ItemStack`]s with
//! stack merging, overflow splitting and validated removal. Slots are dense:
//! removing a stack shifts the following slots down by one.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use skyjellies_core::{ItemDefinition, ItemId};
use thiserror::Error;
use tracing::debug;

use crate::observer::{ContainerEvent, ContainerObserver, ObserverId, ObserverSet};

/// Default number of hotbar slots.
pub const HOTBAR_SIZE: usize = 9;

/// Default number of backpack slots.
pub const INVENTORY_SIZE: usize = 27;

/// Errors reported by stack and container operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Amounts must be positive.
    #[error("amount must be at least 1")]
    ZeroAmount,
    /// No single stack holds enough of the item.
    #[error("not enough {item}: requested {requested}, largest stack holds {available}")]
    InsufficientQuantity {
        /// Item that was requested
        item: ItemId,
        /// Units requested
        requested: u32,
        /// Units in the best candidate stack
        available: u32,
    },
    /// The container holds no stack of the item.
    #[error("no stack of {0} in container")]
    ItemNotFound(ItemId),
    /// Slot index beyond the container capacity.
    #[error("slot {slot} out of range (capacity {capacity})")]
    SlotOutOfRange {
        /// Requested slot
        slot: usize,
        /// Container capacity
        capacity: usize,
    },
}

/// Represents a pile of identical items.
///
/// The quantity is at least one for any stack held by a container. A stack
/// emptied by [`ItemStack::decrease`] must be removed by its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    definition: Arc<ItemDefinition>,
    quantity: u32,
}

impl ItemStack {
    /// Create a new item stack. Zero quantities are rejected.
    pub fn new(definition: Arc<ItemDefinition>, quantity: u32) -> Result<Self, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::ZeroAmount);
        }
        Ok(Self {
            definition,
            quantity,
        })
    }

    /// The definition this stack refers to.
    pub fn definition(&self) -> &Arc<ItemDefinition> {
        &self.definition
    }

    /// Identifier of the item kind.
    pub fn item_id(&self) -> ItemId {
        self.definition.id
    }

    /// Number of units in this stack.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Get the maximum stack size for this item.
    pub fn max_stack_size(&self) -> u32 {
        self.definition.slot_limit()
    }

    /// Check if this stack is at max capacity.
    pub fn is_full(&self) -> bool {
        self.quantity >= self.max_stack_size()
    }

    /// Check if every unit has been taken out.
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    /// Get remaining space in this stack.
    pub fn remaining_space(&self) -> u32 {
        self.max_stack_size().saturating_sub(self.quantity)
    }

    /// Check if units of `definition` may be merged into this stack.
    pub fn can_merge(&self, definition: &ItemDefinition) -> bool {
        definition.stackable && self.definition.id == definition.id && !self.is_full()
    }

    /// Add `amount` units, clamping at the max stack size.
    ///
    /// Returns the overflow that did not fit (0 when everything fit).
    pub fn increase(&mut self, amount: u32) -> Result<u32, InventoryError> {
        if amount == 0 {
            return Err(InventoryError::ZeroAmount);
        }
        let room = self.remaining_space();
        if amount > room {
            self.quantity = self.quantity.max(self.max_stack_size());
            Ok(amount - room)
        } else {
            self.quantity += amount;
            Ok(0)
        }
    }

    /// Remove `amount` units. Fails without mutating if the stack holds fewer.
    pub fn decrease(&mut self, amount: u32) -> Result<(), InventoryError> {
        if amount == 0 {
            return Err(InventoryError::ZeroAmount);
        }
        if amount > self.quantity {
            return Err(InventoryError::InsufficientQuantity {
                item: self.item_id(),
                requested: amount,
                available: self.quantity,
            });
        }
        self.quantity -= amount;
        Ok(())
    }

    /// Split this stack, taking the specified amount into a new stack.
    ///
    /// Returns `None` unless `0 < amount < quantity`.
    pub fn split(&mut self, amount: u32) -> Option<ItemStack> {
        if amount == 0 || amount >= self.quantity {
            return None;
        }

        self.quantity -= amount;
        Some(ItemStack {
            definition: Arc::clone(&self.definition),
            quantity: amount,
        })
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.definition.name, self.quantity)
    }
}

/// Which container a notification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Small, player-selectable primary container
    Hotbar,
    /// Larger backpack receiving hotbar overflow
    Inventory,
}

impl ContainerKind {
    /// Canonical lowercase label for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            ContainerKind::Hotbar => "hotbar",
            ContainerKind::Inventory => "inventory",
        }
    }
}

/// Result of offering a stack to a single container.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Units that ended up in this container
    pub placed: u32,
    /// Units this container could not take
    pub rest: Option<ItemStack>,
}

impl Placement {
    /// Whether any part of the stack was accommodated.
    pub fn accepted(&self) -> bool {
        self.placed > 0
    }

    /// Whether the whole stack was accommodated.
    pub fn is_complete(&self) -> bool {
        self.rest.is_none()
    }
}

/// Fixed-capacity ordered collection of stacks.
#[derive(Debug)]
pub struct Container {
    kind: ContainerKind,
    capacity: usize,
    slots: Vec<ItemStack>,
    observers: ObserverSet,
}

impl Container {
    /// Create an empty container.
    pub fn new(kind: ContainerKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            slots: Vec::with_capacity(capacity),
            observers: ObserverSet::default(),
        }
    }

    /// Create an empty hotbar.
    pub fn hotbar(capacity: usize) -> Self {
        Self::new(ContainerKind::Hotbar, capacity)
    }

    /// Create an empty backpack.
    pub fn inventory(capacity: usize) -> Self {
        Self::new(ContainerKind::Inventory, capacity)
    }

    /// Which container this is.
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Maximum number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Occupied slots in insertion order.
    pub fn slots(&self) -> &[ItemStack] {
        &self.slots
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the container is completely empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check if no new slot can be opened.
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Get an item stack from a slot.
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)
    }

    /// Index of the first stack that can take more of `definition`.
    ///
    /// Full stacks of the same item are skipped.
    pub fn locate(&self, definition: &ItemDefinition) -> Option<usize> {
        self.slots
            .iter()
            .position(|stack| stack.item_id() == definition.id && !stack.is_full())
    }

    /// Count the total number of a specific item in the container.
    pub fn count_item(&self, item: ItemId) -> u64 {
        self.slots
            .iter()
            .filter(|stack| stack.item_id() == item)
            .map(|stack| u64::from(stack.quantity()))
            .sum()
    }

    /// Register a presentation observer.
    pub fn subscribe(&mut self, observer: std::rc::Rc<dyn ContainerObserver>) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Remove a previously registered observer.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Offer a stack to this container.
    ///
    /// Stackable items merge into the first stack with room; the overflow is
    /// re-offered as a fresh stack, which may merge again or open a slot.
    /// Whatever cannot be placed because the container is full comes back in
    /// [`Placement::rest`].
    pub fn try_add(&mut self, stack: ItemStack) -> Placement {
        let mut pending = stack;
        let mut placed = 0;
        let mut merged = false;
        let mut appended = false;

        // Each step either fills a partial stack or opens a slot.
        let max_steps = self.capacity.saturating_mul(2).saturating_add(1);
        let mut steps = 0;
        let mut rest = None;
        loop {
            if steps == max_steps {
                rest = Some(pending);
                break;
            }
            steps += 1;

            let definition = Arc::clone(pending.definition());

            if definition.stackable {
                if let Some(index) = self.locate(&definition) {
                    let offered = pending.quantity();
                    let overflow = match self.slots[index].increase(offered) {
                        Ok(overflow) => overflow,
                        Err(_) => offered,
                    };
                    placed += offered - overflow;
                    merged = true;
                    match ItemStack::new(definition, overflow) {
                        Ok(next) => {
                            pending = next;
                            continue;
                        }
                        Err(_) => break,
                    }
                }
            }

            if self.is_full() {
                rest = Some(pending);
                break;
            }

            let limit = definition.slot_limit();
            let tail = pending.split(pending.quantity().saturating_sub(limit));
            placed += pending.quantity();
            self.slots.push(pending);
            appended = true;

            match tail {
                Some(next) => pending = next,
                None => break,
            }
        }

        if merged {
            self.observers
                .notify(ContainerEvent::Updated, self.kind, &self.slots);
        }
        if appended {
            self.observers
                .notify(ContainerEvent::Added, self.kind, &self.slots);
        }
        self.log_contents();

        Placement { placed, rest }
    }

    /// Remove `amount` units of `item` from a single stack.
    ///
    /// Either the full amount is taken from the first stack holding at least
    /// that many, or nothing changes. A stack that reaches zero is removed.
    pub fn remove_quantity(&mut self, item: ItemId, amount: u32) -> Result<(), InventoryError> {
        if amount == 0 {
            return Err(InventoryError::ZeroAmount);
        }

        let Some(index) = self
            .slots
            .iter()
            .position(|stack| stack.item_id() == item && stack.quantity() >= amount)
        else {
            let available = self
                .slots
                .iter()
                .filter(|stack| stack.item_id() == item)
                .map(ItemStack::quantity)
                .max();
            return Err(match available {
                Some(available) => InventoryError::InsufficientQuantity {
                    item,
                    requested: amount,
                    available,
                },
                None => InventoryError::ItemNotFound(item),
            });
        };

        self.slots[index].decrease(amount)?;
        if self.slots[index].is_empty() {
            self.slots.remove(index);
        }

        self.observers
            .notify(ContainerEvent::Updated, self.kind, &self.slots);
        self.log_contents();
        Ok(())
    }

    fn log_contents(&self) {
        for (slot, stack) in self.slots.iter().enumerate() {
            debug!(
                container = self.kind.as_str(),
                slot,
                id = stack.item_id().0,
                name = %stack.definition().display_name,
                quantity = stack.quantity(),
                "slot contents"
            );
        }
    }
}
