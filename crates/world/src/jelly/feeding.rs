//! Feeding a jelly from the player's hotbar.

use skyjellies_core::ItemDefinition;
use thiserror::Error;
use tracing::{debug, warn};

use super::Jelly;
use crate::inventory::InventoryError;
use crate::player_inventory::PlayerInventory;

/// Why a feeding attempt was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    /// The offered item is not edible
    #[error("{name} is not food")]
    NotFood {
        /// Item name
        name: String,
    },
    /// Saturation is already at its maximum
    #[error("jelly is already full")]
    JellyFull,
    /// The hotbar could not supply the food
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// What a successful feeding changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedOutcome {
    /// Units taken from the hotbar
    pub consumed: u32,
    /// Saturation after feeding
    pub saturation: f32,
    /// Experience granted
    pub experience: f32,
    /// Levels gained from that experience
    pub levels_gained: u32,
}

/// Feed `jelly` with `amount` units of `food` from the player's hotbar.
///
/// Nothing is consumed unless the jelly accepts the food and the hotbar holds
/// `amount` units in a single stack. The food's saturation is applied once
/// per feeding and granted again as experience.
pub fn feed_jelly(
    player: &mut PlayerInventory,
    food: &ItemDefinition,
    amount: u32,
    jelly: &mut Jelly,
) -> Result<FeedOutcome, FeedError> {
    let Some(saturation) = food.saturation() else {
        return Err(FeedError::NotFood {
            name: food.name.clone(),
        });
    };
    if !jelly.can_feed() {
        return Err(FeedError::JellyFull);
    }

    if let Err(err) = player.remove_quantity(food.id, amount) {
        warn!(item = %food.name, amount, error = %err, "feeding refused");
        return Err(err.into());
    }

    jelly.hunger_mut().increase(saturation);
    let levels_gained = jelly.experience_mut().add(saturation);
    debug!(
        jelly = jelly.id().0,
        item = %food.name,
        saturation = jelly.hunger().saturation(),
        "jelly ate"
    );

    Ok(FeedOutcome {
        consumed: amount,
        saturation: jelly.hunger().saturation(),
        experience: saturation,
        levels_gained,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::ItemStack;
    use crate::jelly::{ExperienceConfig, JellyConfig, JellyType};
    use crate::EntityId;
    use rand::{rngs::StdRng, SeedableRng};
    use skyjellies_core::{ItemId, ItemKind};
    use std::sync::Arc;

    fn berry() -> Arc<ItemDefinition> {
        Arc::new(
            ItemDefinition::new(ItemId(1), "red_berry")
                .with_max_stack(10)
                .with_kind(ItemKind::Food { saturation: 10.0 }),
        )
    }

    fn hungry_jelly() -> Jelly {
        let mut jelly = Jelly::new(
            EntityId(3),
            JellyType::Base,
            &JellyConfig::default(),
            ExperienceConfig::default(),
            StdRng::seed_from_u64(1),
        );
        jelly.hunger_mut().set(50.0);
        jelly
    }

    fn player_with(def: &Arc<ItemDefinition>, quantity: u32) -> PlayerInventory {
        let mut player = PlayerInventory::new(2, 2);
        player.try_add(ItemStack::new(Arc::clone(def), quantity).unwrap());
        player
    }

    #[test]
    fn feeding_consumes_and_satiates() {
        let berry = berry();
        let mut player = player_with(&berry, 3);
        let mut jelly = hungry_jelly();

        let outcome = feed_jelly(&mut player, &berry, 1, &mut jelly).unwrap();
        assert_eq!(outcome.consumed, 1);
        assert_eq!(outcome.saturation, 60.0);
        assert_eq!(outcome.experience, 10.0);
        assert_eq!(player.count_item(berry.id), 2);
        assert_eq!(jelly.experience().current(), 10.0);
    }

    #[test]
    fn saturation_applies_once_regardless_of_amount() {
        let berry = berry();
        let mut player = player_with(&berry, 5);
        let mut jelly = hungry_jelly();

        let outcome = feed_jelly(&mut player, &berry, 3, &mut jelly).unwrap();
        assert_eq!(outcome.saturation, 60.0);
        assert_eq!(player.count_item(berry.id), 2);
    }

    #[test]
    fn non_food_is_refused_without_consuming() {
        let stone = Arc::new(ItemDefinition::new(ItemId(2), "stone").with_max_stack(64));
        let mut player = player_with(&stone, 3);
        let mut jelly = hungry_jelly();

        let err = feed_jelly(&mut player, &stone, 1, &mut jelly).unwrap_err();
        assert_eq!(
            err,
            FeedError::NotFood {
                name: "stone".into()
            }
        );
        assert_eq!(player.count_item(stone.id), 3);
    }

    #[test]
    fn full_jelly_is_refused() {
        let berry = berry();
        let mut player = player_with(&berry, 3);
        let mut jelly = hungry_jelly();
        jelly.hunger_mut().set(100.0);

        assert_eq!(
            feed_jelly(&mut player, &berry, 1, &mut jelly),
            Err(FeedError::JellyFull)
        );
        assert_eq!(player.count_item(berry.id), 3);
    }

    #[test]
    fn missing_food_leaves_jelly_unchanged() {
        let berry = berry();
        let mut player = player_with(&berry, 1);
        let mut jelly = hungry_jelly();

        let err = feed_jelly(&mut player, &berry, 2, &mut jelly).unwrap_err();
        assert!(matches!(
            err,
            FeedError::Inventory(InventoryError::InsufficientQuantity { .. })
        ));
        assert_eq!(jelly.hunger().saturation(), 50.0);
        assert_eq!(player.count_item(berry.id), 1);

        let err = feed_jelly(&mut player, &berry, 0, &mut jelly).unwrap_err();
        assert_eq!(err, FeedError::Inventory(InventoryError::ZeroAmount));
    }
}
