//! Property-based tests for stacking containers
//!
//! Validates container invariants:
//! - Slot count never exceeds capacity
//! - No stack ever exceeds its item's stack limit
//! - Units are conserved between container and leftover
//! - Non-stackable items never share a slot
//! - Failed removals leave the container untouched

use proptest::prelude::*;
use skyjellies_core::{ItemDefinition, ItemId};
use skyjellies_world::{Container, ItemStack, PlayerInventory};
use std::sync::Arc;

fn definitions() -> Vec<Arc<ItemDefinition>> {
    vec![
        Arc::new(ItemDefinition::new(ItemId(1), "red_berry").with_max_stack(10)),
        Arc::new(ItemDefinition::new(ItemId(2), "stone").with_max_stack(64)),
        Arc::new(ItemDefinition::new(ItemId(3), "pickaxe").non_stackable()),
    ]
}

fn offers() -> impl Strategy<Value = Vec<(usize, u32)>> {
    prop::collection::vec((0usize..3, 1u32..150), 1..20)
}

proptest! {
    /// Property: Slot count and stack sizes stay within limits
    #[test]
    fn capacity_and_stack_limits_hold(capacity in 0usize..12, offers in offers()) {
        let defs = definitions();
        let mut container = Container::inventory(capacity);

        for (def, quantity) in offers {
            let stack = ItemStack::new(Arc::clone(&defs[def]), quantity).unwrap();
            container.try_add(stack);

            prop_assert!(container.len() <= capacity);
            for slot in container.slots() {
                prop_assert!(slot.quantity() >= 1);
                prop_assert!(
                    slot.quantity() <= slot.max_stack_size(),
                    "{} exceeds limit {}",
                    slot,
                    slot.max_stack_size()
                );
            }
        }
    }

    /// Property: Units are either stored or handed back
    #[test]
    fn adding_conserves_units(capacity in 0usize..12, offers in offers()) {
        let defs = definitions();
        let mut container = Container::hotbar(capacity);

        for (def, quantity) in offers {
            let id = defs[def].id;
            let before = container.count_item(id);
            let placement = container.try_add(ItemStack::new(Arc::clone(&defs[def]), quantity).unwrap());
            let rest = placement.rest.as_ref().map_or(0, ItemStack::quantity);

            prop_assert_eq!(container.count_item(id) - before + u64::from(rest), u64::from(quantity));
            prop_assert_eq!(placement.accepted(), rest < quantity);
        }
    }

    /// Property: The player chain never loses units
    #[test]
    fn player_chain_conserves_units(
        hotbar in 0usize..4,
        backpack in 0usize..6,
        offers in offers(),
    ) {
        let defs = definitions();
        let mut player = PlayerInventory::new(hotbar, backpack);
        let mut undelivered = [0u64; 3];
        let mut offered = [0u64; 3];

        for (def, quantity) in offers {
            offered[def] += u64::from(quantity);
            let outcome = player.try_add(ItemStack::new(Arc::clone(&defs[def]), quantity).unwrap());
            undelivered[def] += u64::from(outcome.remainder.as_ref().map_or(0, ItemStack::quantity));
        }

        for (index, def) in defs.iter().enumerate() {
            prop_assert_eq!(player.count_item(def.id) + undelivered[index], offered[index]);
        }
    }

    /// Property: Non-stackable items occupy one slot per unit
    #[test]
    fn non_stackable_never_merge(units in 1u32..20, capacity in 1usize..12) {
        let pickaxe = Arc::clone(&definitions()[2]);
        let mut container = Container::inventory(capacity);
        container.try_add(ItemStack::new(pickaxe, units).unwrap());

        prop_assert_eq!(container.len(), (units as usize).min(capacity));
        prop_assert!(container.slots().iter().all(|slot| slot.quantity() == 1));
    }

    /// Property: A removal either succeeds fully or changes nothing
    #[test]
    fn removal_is_all_or_nothing(
        quantities in prop::collection::vec(1u32..10, 1..6),
        amount in 0u32..15,
    ) {
        let berry = Arc::clone(&definitions()[0]);
        let mut container = Container::inventory(quantities.len());
        for quantity in &quantities {
            container.try_add(ItemStack::new(Arc::clone(&berry), *quantity).unwrap());
        }

        let before: Vec<u32> = container.slots().iter().map(ItemStack::quantity).collect();
        let total_before = container.count_item(berry.id);

        match container.remove_quantity(berry.id, amount) {
            Ok(()) => {
                prop_assert!(amount > 0);
                prop_assert_eq!(container.count_item(berry.id), total_before - u64::from(amount));
            }
            Err(_) => {
                let after: Vec<u32> = container.slots().iter().map(ItemStack::quantity).collect();
                prop_assert_eq!(after, before);
            }
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn berries_fill_then_overflow() {
        let defs = definitions();
        let mut container = Container::hotbar(1);

        let placement = container.try_add(ItemStack::new(Arc::clone(&defs[0]), 12).unwrap());
        assert!(placement.accepted());
        assert_eq!(placement.rest.map(|s| s.quantity()), Some(2));
        assert_eq!(container.count_item(ItemId(1)), 10);
    }

    #[test]
    fn different_items_do_not_merge() {
        let defs = definitions();
        let mut container = Container::hotbar(2);
        container.try_add(ItemStack::new(Arc::clone(&defs[0]), 3).unwrap());
        container.try_add(ItemStack::new(Arc::clone(&defs[1]), 3).unwrap());

        assert_eq!(container.len(), 2);
    }
}
