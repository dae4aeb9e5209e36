#![warn(missing_docs)]
//! Player inventory, world pickups and jellies.

pub mod inventory;
pub mod jelly;
pub mod observer;
pub mod pickup;
pub mod player_inventory;

use serde::{Deserialize, Serialize};

pub use inventory::{
    Container, ContainerKind, InventoryError, ItemStack, Placement, HOTBAR_SIZE, INVENTORY_SIZE,
};
pub use jelly::{
    feed_jelly, BehaviorEvent, FeedError, FeedOutcome, FlatNavAgent, Jelly, JellyConfig,
    JellyState, JellyType, NavAgent, SenseEvent, Stimulus,
};
pub use observer::{ContainerEvent, ContainerObserver, ObserverId, SlotGrid, SlotWidget};
pub use pickup::{CollectReport, ItemPickup, PickupField, PICKUP_RADIUS};
pub use player_inventory::{AddOutcome, PlayerInventory};

/// Stable identifier of a world entity (player, jelly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);
