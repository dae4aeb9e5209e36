#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod catalog;
pub mod item;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use catalog::ItemCatalog;
pub use item::{DefinitionError, ItemDefinition, ItemId, ItemKind, ToolType};

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Ticks per simulated second.
    pub const PER_SECOND: u64 = 20;

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Helper to derive a reproducible RNG seeded by world + entity domains.
pub fn scoped_rng(world_seed: u64, entity: u64, tick: SimTick) -> StdRng {
    let seed = world_seed ^ entity.rotate_left(32) ^ tick.0;
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn tick_advances() {
        assert_eq!(SimTick::ZERO.advance(3), SimTick(3));
    }

    #[test]
    fn scoped_rng_is_reproducible() {
        let mut a = scoped_rng(7, 1, SimTick(40));
        let mut b = scoped_rng(7, 1, SimTick(40));
        let xs: Vec<u32> = (0..4).map(|_| a.gen()).collect();
        let ys: Vec<u32> = (0..4).map(|_| b.gen()).collect();
        assert_eq!(xs, ys);
    }
}
