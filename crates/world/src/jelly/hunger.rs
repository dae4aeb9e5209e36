//! Jelly food saturation.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Saturation limits and the periodic decay schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HungerConfig {
    /// Saturation of a completely fed jelly
    pub max_saturation: f32,
    /// At or below this the jelly is hungry
    pub hunger_threshold: f32,
    /// Ticks between two decay steps
    pub decrease_interval_ticks: u64,
    /// Saturation lost per decay step
    pub decrease_value: f32,
}

impl Default for HungerConfig {
    fn default() -> Self {
        Self {
            max_saturation: 100.0,
            hunger_threshold: 20.0,
            // 10 seconds at 20 TPS
            decrease_interval_ticks: 200,
            decrease_value: 3.0,
        }
    }
}

/// Coarse hunger level for presentation and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HungerStatus {
    /// Above the hunger threshold
    Satisfied,
    /// At or below the threshold
    Hungry,
    /// Nothing left
    Starving,
}

/// Food saturation of one jelly, clamped to `[0, max_saturation]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Hunger {
    config: HungerConfig,
    saturation: f32,
    ticks_since_decrease: u64,
}

impl Hunger {
    /// A freshly spawned jelly starts fully fed.
    pub fn new(config: HungerConfig) -> Self {
        Self {
            saturation: config.max_saturation.max(0.0),
            config,
            ticks_since_decrease: 0,
        }
    }

    /// Current saturation.
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Upper saturation bound.
    pub fn max_saturation(&self) -> f32 {
        self.config.max_saturation
    }

    /// Active configuration.
    pub fn config(&self) -> &HungerConfig {
        &self.config
    }

    /// Overwrite the saturation (clamped).
    pub fn set(&mut self, saturation: f32) {
        self.saturation = self.clamp(saturation);
    }

    /// Add saturation (clamped at max).
    pub fn increase(&mut self, amount: f32) {
        self.saturation = self.clamp(self.saturation + amount);
        debug!(amount, saturation = self.saturation, "jelly fed");
    }

    /// Remove saturation (clamped at zero).
    pub fn decrease(&mut self, amount: f32) {
        self.saturation = self.clamp(self.saturation - amount);
    }

    fn clamp(&self, value: f32) -> f32 {
        value.clamp(0.0, self.config.max_saturation.max(0.0))
    }

    /// Advance one tick. Returns true when a decay step was applied.
    pub fn tick(&mut self) -> bool {
        if self.config.decrease_interval_ticks == 0 {
            return false;
        }
        self.ticks_since_decrease += 1;
        if self.ticks_since_decrease < self.config.decrease_interval_ticks {
            return false;
        }
        self.ticks_since_decrease = 0;
        self.decrease(self.config.decrease_value);
        true
    }

    /// Whether the jelly wants food.
    pub fn is_hungry(&self) -> bool {
        self.saturation <= self.config.hunger_threshold
    }

    /// Whether feeding would have no effect.
    pub fn is_full(&self) -> bool {
        self.saturation >= self.config.max_saturation
    }

    /// Current hunger level.
    pub fn status(&self) -> HungerStatus {
        if self.saturation <= 0.0 {
            HungerStatus::Starving
        } else if self.is_hungry() {
            HungerStatus::Hungry
        } else {
            HungerStatus::Satisfied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_full() {
        let hunger = Hunger::new(HungerConfig::default());
        assert_eq!(hunger.saturation(), 100.0);
        assert!(hunger.is_full());
        assert_eq!(hunger.status(), HungerStatus::Satisfied);
    }

    #[test]
    fn changes_are_clamped() {
        let mut hunger = Hunger::new(HungerConfig::default());
        hunger.increase(50.0);
        assert_eq!(hunger.saturation(), 100.0);

        hunger.decrease(250.0);
        assert_eq!(hunger.saturation(), 0.0);
        assert_eq!(hunger.status(), HungerStatus::Starving);

        hunger.set(-3.0);
        assert_eq!(hunger.saturation(), 0.0);
    }

    #[test]
    fn decays_every_interval() {
        let mut hunger = Hunger::new(HungerConfig {
            decrease_interval_ticks: 4,
            ..HungerConfig::default()
        });

        let applied: Vec<bool> = (0..8).map(|_| hunger.tick()).collect();
        assert_eq!(
            applied,
            vec![false, false, false, true, false, false, false, true]
        );
        assert_eq!(hunger.saturation(), 94.0);
    }

    #[test]
    fn zero_interval_never_decays() {
        let mut hunger = Hunger::new(HungerConfig {
            decrease_interval_ticks: 0,
            ..HungerConfig::default()
        });
        for _ in 0..1_000 {
            assert!(!hunger.tick());
        }
        assert!(hunger.is_full());
    }

    #[test]
    fn hunger_threshold_is_inclusive() {
        let mut hunger = Hunger::new(HungerConfig::default());
        hunger.set(20.5);
        assert!(!hunger.is_hungry());
        hunger.set(20.0);
        assert!(hunger.is_hungry());
        assert_eq!(hunger.status(), HungerStatus::Hungry);
    }
}
