//! Jelly experience and levels.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Most level-ups applied by a single [`Experience::add`].
const MAX_LEVEL_UPS_PER_GAIN: u32 = 256;

/// Level curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceConfig {
    /// Highest reachable level
    pub max_level: u32,
    /// Experience needed for the first level-up
    pub initial_threshold: f32,
    /// Factor applied to the threshold after each level-up
    pub threshold_multiplier: f32,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            max_level: 10,
            initial_threshold: 100.0,
            threshold_multiplier: 1.5,
        }
    }
}

/// Experience progress of one jelly.
///
/// Reaching the threshold levels the jelly up and keeps the excess. The
/// threshold grows after every level-up, also once the level is capped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    level: u32,
    max_level: u32,
    current: f32,
    threshold: f32,
    multiplier: f32,
}

impl Experience {
    /// Level 0 with no experience.
    pub fn new(config: ExperienceConfig) -> Self {
        Self {
            level: 0,
            max_level: config.max_level,
            current: 0.0,
            threshold: config.initial_threshold,
            multiplier: config.threshold_multiplier.max(1.0),
        }
    }

    /// Current level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Experience accumulated towards the next level.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Experience needed for the next level-up.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Experience still missing for the next level-up.
    pub fn to_next_level(&self) -> f32 {
        self.threshold - self.current
    }

    /// Add experience and return how many levels were gained.
    ///
    /// Only a bounded number of thresholds are crossed per call; any excess
    /// stays in `current` for the next gain.
    pub fn add(&mut self, exp: f32) -> u32 {
        if !exp.is_finite() || exp <= 0.0 || self.threshold.is_nan() || self.threshold <= 0.0 {
            return 0;
        }

        self.current += exp;
        let before = self.level;
        let mut steps = 0;
        while self.current >= self.threshold && steps < MAX_LEVEL_UPS_PER_GAIN {
            self.level_up();
            steps += 1;
        }

        let gained = self.level - before;
        if gained > 0 {
            info!(level = self.level, to_next = self.to_next_level(), "jelly levelled up");
        }
        gained
    }

    fn level_up(&mut self) {
        self.current -= self.threshold;
        if self.level < self.max_level {
            self.level += 1;
        }
        self.threshold *= self.multiplier;
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new(ExperienceConfig::default())
    }
}
