//! Jellies: the creatures living on the sky islands.
//!
//! A [`Jelly`] bundles its behaviour state machine, hunger and experience.
//! Navigation is delegated to the host through [`NavAgent`].

mod behavior;
mod experience;
mod feeding;
mod hunger;
mod nav;

pub use behavior::{
    BehaviorConfig, BehaviorEvent, JellyBehavior, JellyState, SenseEvent, Stimulus,
    WANDER_SAMPLE_ATTEMPTS,
};
pub use experience::{Experience, ExperienceConfig};
pub use feeding::{feed_jelly, FeedError, FeedOutcome};
pub use hunger::{Hunger, HungerConfig, HungerStatus};
pub use nav::{FlatNavAgent, NavAgent};

use glam::Vec3;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::EntityId;

/// Jelly variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JellyType {
    /// Plain jelly
    #[default]
    Base,
    /// Grass jelly
    Grass,
}

/// Jelly tunables as they appear in the `[jelly]` config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JellyConfig {
    /// Distance of the wander region centre ahead of the jelly
    pub wander_distance: f32,
    /// Radius of the wander region
    pub wander_range: f32,
    /// Distance under which the jelly counts as arrived
    pub near_distance: f32,
    /// Distance from which the jelly observes the player
    pub watch_distance: f32,
    /// Saturation of a completely fed jelly
    pub max_saturation: f32,
    /// At or below this the jelly is hungry
    pub hunger_threshold: f32,
    /// Ticks between two saturation decay steps
    pub saturation_decrease_interval_ticks: u64,
    /// Saturation lost per decay step
    pub saturation_decrease_value: f32,
}

impl Default for JellyConfig {
    fn default() -> Self {
        let behavior = BehaviorConfig::default();
        let hunger = HungerConfig::default();
        Self {
            wander_distance: behavior.wander_distance,
            wander_range: behavior.wander_range,
            near_distance: behavior.near_distance,
            watch_distance: behavior.watch_distance,
            max_saturation: hunger.max_saturation,
            hunger_threshold: hunger.hunger_threshold,
            saturation_decrease_interval_ticks: hunger.decrease_interval_ticks,
            saturation_decrease_value: hunger.decrease_value,
        }
    }
}

impl JellyConfig {
    /// Behaviour part of the config.
    pub fn behavior(&self) -> BehaviorConfig {
        BehaviorConfig {
            wander_distance: self.wander_distance,
            wander_range: self.wander_range,
            near_distance: self.near_distance,
            watch_distance: self.watch_distance,
        }
    }

    /// Hunger part of the config.
    pub fn hunger(&self) -> HungerConfig {
        HungerConfig {
            max_saturation: self.max_saturation,
            hunger_threshold: self.hunger_threshold,
            decrease_interval_ticks: self.saturation_decrease_interval_ticks,
            decrease_value: self.saturation_decrease_value,
        }
    }
}

/// One jelly.
#[derive(Debug, Clone)]
pub struct Jelly {
    id: EntityId,
    kind: JellyType,
    behavior: JellyBehavior,
    hunger: Hunger,
    experience: Experience,
    interacting: bool,
}

impl Jelly {
    /// Spawn a fully fed, wandering jelly.
    pub fn new(
        id: EntityId,
        kind: JellyType,
        config: &JellyConfig,
        experience: ExperienceConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            id,
            kind,
            behavior: JellyBehavior::new(config.behavior(), rng),
            hunger: Hunger::new(config.hunger()),
            experience: Experience::new(experience),
            interacting: false,
        }
    }

    /// Entity id.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Variety.
    pub fn kind(&self) -> JellyType {
        self.kind
    }

    /// Behaviour state machine.
    pub fn behavior(&self) -> &JellyBehavior {
        &self.behavior
    }

    /// Mutable behaviour state machine.
    pub fn behavior_mut(&mut self) -> &mut JellyBehavior {
        &mut self.behavior
    }

    /// Food saturation.
    pub fn hunger(&self) -> &Hunger {
        &self.hunger
    }

    /// Mutable food saturation.
    pub fn hunger_mut(&mut self) -> &mut Hunger {
        &mut self.hunger
    }

    /// Experience progress.
    pub fn experience(&self) -> &Experience {
        &self.experience
    }

    /// Mutable experience progress.
    pub fn experience_mut(&mut self) -> &mut Experience {
        &mut self.experience
    }

    /// Whether the player is interacting with this jelly.
    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// Begin a player interaction; the jelly stops wandering.
    pub fn start_interaction(&mut self) {
        self.interacting = true;
        self.behavior.toggle_wander(false);
        info!(jelly = self.id.0, "interaction started");
    }

    /// End the interaction; the jelly resumes wandering.
    pub fn stop_interaction(&mut self) {
        self.interacting = false;
        self.behavior.toggle_wander(true);
        info!(jelly = self.id.0, "interaction stopped");
    }

    /// Whether food would be accepted right now.
    pub fn can_feed(&self) -> bool {
        !self.hunger.is_full()
    }

    /// Forward a sense event to the behaviour.
    pub fn sense(&mut self, event: SenseEvent, agent: &mut dyn NavAgent) -> Vec<BehaviorEvent> {
        self.behavior.handle_sense(event, agent)
    }

    /// Advance hunger and behaviour by one tick.
    pub fn tick(&mut self, agent: &mut dyn NavAgent, subject: Option<Vec3>) -> Vec<BehaviorEvent> {
        self.hunger.tick();
        self.behavior.update(agent, subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn jelly() -> Jelly {
        Jelly::new(
            EntityId(1),
            JellyType::Grass,
            &JellyConfig::default(),
            ExperienceConfig::default(),
            StdRng::seed_from_u64(11),
        )
    }

    #[test]
    fn config_splits_into_parts() {
        let config = JellyConfig::default();
        assert_eq!(config.behavior(), BehaviorConfig::default());
        assert_eq!(config.hunger(), HungerConfig::default());
    }

    #[test]
    fn interaction_pauses_wandering() {
        let mut jelly = jelly();
        assert!(jelly.behavior().can_wander());

        jelly.start_interaction();
        assert!(jelly.is_interacting());
        assert!(!jelly.behavior().can_wander());

        jelly.stop_interaction();
        assert!(!jelly.is_interacting());
        assert!(jelly.behavior().can_wander());
    }

    #[test]
    fn fresh_jelly_cannot_be_fed() {
        let mut jelly = jelly();
        assert!(!jelly.can_feed());
        jelly.hunger_mut().decrease(1.0);
        assert!(jelly.can_feed());
    }

    #[test]
    fn tick_drives_hunger_and_behaviour() {
        let mut jelly = jelly();
        let mut agent = FlatNavAgent::new(Vec3::ZERO, 30.0);

        let events = jelly.tick(&mut agent, None);
        assert!(matches!(
            events.as_slice(),
            [BehaviorEvent::DestinationChanged { .. }]
        ));
        for _ in 1..200 {
            jelly.tick(&mut agent, None);
            agent.step();
        }
        assert_eq!(jelly.hunger().saturation(), 97.0);
    }
}
