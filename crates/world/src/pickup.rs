//! Item pickups lying in the world.
//!
//! Pickups are collected when the player comes within the pickup radius.
//! Units the player cannot carry are put back into the world at the player's
//! position rather than discarded.

use glam::Vec3;
use tracing::debug;

use crate::inventory::ItemStack;
use crate::player_inventory::PlayerInventory;

/// Default distance within which pickups are collected.
pub const PICKUP_RADIUS: f32 = 1.5;

/// A stack waiting to be collected.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPickup {
    /// Stable pickup identifier
    pub id: u64,
    /// World position
    pub position: Vec3,
    /// What the pickup holds
    pub stack: ItemStack,
}

impl ItemPickup {
    /// Whether a collector at `position` reaches this pickup.
    pub fn in_reach(&self, position: Vec3, radius: f32) -> bool {
        self.position.distance_squared(position) <= radius * radius
    }
}

/// Summary of one collection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
    /// Pickups taken out of the world
    pub collected: usize,
    /// Units that reached the player's containers
    pub delivered: u64,
    /// Pickups put back because nothing could hold them
    pub respawned: usize,
}

/// All pickups in the world.
#[derive(Debug, Default)]
pub struct PickupField {
    pickups: Vec<ItemPickup>,
    next_id: u64,
}

impl PickupField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a stack in the world and return its id.
    pub fn spawn(&mut self, position: Vec3, stack: ItemStack) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        debug!(id, %stack, ?position, "pickup spawned");
        self.pickups.push(ItemPickup {
            id,
            position,
            stack,
        });
        id
    }

    /// Number of pickups in the world.
    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    /// Whether the world holds no pickups.
    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }

    /// Iterate over pickups in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemPickup> {
        self.pickups.iter()
    }

    /// Remove and return every pickup within `radius` of `position`.
    pub fn take_within(&mut self, position: Vec3, radius: f32) -> Vec<ItemPickup> {
        let (taken, kept): (Vec<ItemPickup>, Vec<ItemPickup>) = self
            .pickups
            .drain(..)
            .partition(|pickup| pickup.in_reach(position, radius));
        self.pickups = kept;
        taken
    }

    /// Collect reachable pickups into `player`, respawning leftovers at `position`.
    pub fn collect_into(
        &mut self,
        player: &mut PlayerInventory,
        position: Vec3,
        radius: f32,
    ) -> CollectReport {
        let mut report = CollectReport::default();
        let mut leftovers = Vec::new();

        for pickup in self.take_within(position, radius) {
            report.collected += 1;
            let offered = pickup.stack.quantity();
            let outcome = player.try_add(pickup.stack);
            let undelivered = outcome.remainder.as_ref().map_or(0, ItemStack::quantity);
            report.delivered += u64::from(offered - undelivered);
            if let Some(remainder) = outcome.remainder {
                leftovers.push(remainder);
            }
        }

        for stack in leftovers {
            self.spawn(position, stack);
            report.respawned += 1;
        }
        report
    }
}
