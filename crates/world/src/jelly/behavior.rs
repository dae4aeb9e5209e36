//! Jelly behaviour state machine.
//!
//! Two states:
//! - Wandering: pick random nearby points on the walkable ground
//! - Watching: approach a subject (usually the player) and observe it
//!
//! Sensing the player switches to Watching; losing it switches back.
//! Every transition reports an `Exited` for the old state followed by an
//! `Entered` for the new one.

use glam::Vec3;
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::nav::NavAgent;
use crate::EntityId;

/// Navmesh samples attempted before giving up on a wander point.
pub const WANDER_SAMPLE_ATTEMPTS: usize = 30;

/// Stopping distance used while wandering.
const WANDER_STOPPING_DISTANCE: f32 = 0.1;

/// Slack allowed before a halted jelly is pulled back to its position.
const HALT_TOLERANCE: f32 = 0.1;

/// Tunables for both behaviour states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Distance of the wander region centre ahead of the jelly.
    pub wander_distance: f32,
    /// Radius of the wander region.
    pub wander_range: f32,
    /// Distance under which the jelly counts as arrived.
    pub near_distance: f32,
    /// Distance from which the jelly observes its subject.
    pub watch_distance: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            wander_distance: 0.5,
            wander_range: 2.0,
            near_distance: 0.1,
            watch_distance: 4.0,
        }
    }
}

/// What kind of stimulus a jelly sensed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stimulus {
    /// Heat source
    Warmth,
    /// Something edible
    Food,
    /// Another creature, e.g. the player
    Other,
}

/// A change in what a jelly senses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseEvent {
    /// Kind of stimulus
    pub stimulus: Stimulus,
    /// Entity that caused it
    pub source: EntityId,
    /// `true` when the stimulus appears, `false` when it goes away
    pub present: bool,
}

/// Current behaviour state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JellyState {
    /// Roaming between random points
    Wandering,
    /// Observing a subject
    Watching {
        /// Who is being watched
        subject: EntityId,
    },
}

impl JellyState {
    /// Lowercase label for logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            JellyState::Wandering => "wandering",
            JellyState::Watching { .. } => "watching",
        }
    }
}

/// Something listeners may care about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BehaviorEvent {
    /// The jelly started a state
    Entered(JellyState),
    /// The jelly stopped a state
    Exited(JellyState),
    /// A new wander destination was chosen
    DestinationChanged {
        /// Chosen point
        destination: Vec3,
        /// Whether the point lies in the nearer half of the wander region
        near: bool,
    },
}

/// Behaviour controller for one jelly.
#[derive(Debug, Clone)]
pub struct JellyBehavior {
    config: BehaviorConfig,
    state: JellyState,
    can_wander: bool,
    rng: StdRng,
}

impl JellyBehavior {
    /// Start wandering.
    pub fn new(config: BehaviorConfig, rng: StdRng) -> Self {
        Self {
            config,
            state: JellyState::Wandering,
            can_wander: true,
            rng,
        }
    }

    /// Current state.
    pub fn state(&self) -> JellyState {
        self.state
    }

    /// Active tunables.
    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    /// Whether wandering is currently allowed.
    pub fn can_wander(&self) -> bool {
        self.can_wander
    }

    /// Pause or resume wandering (paused during player interaction).
    pub fn toggle_wander(&mut self, enabled: bool) {
        self.can_wander = enabled;
    }

    /// React to a sense event.
    pub fn handle_sense(
        &mut self,
        event: SenseEvent,
        agent: &mut dyn NavAgent,
    ) -> Vec<BehaviorEvent> {
        if event.stimulus != Stimulus::Other {
            return Vec::new();
        }

        match (self.state, event.present) {
            (JellyState::Wandering, true) => self.transition(
                JellyState::Watching {
                    subject: event.source,
                },
                agent,
            ),
            (JellyState::Watching { subject }, false) if subject == event.source => {
                self.transition(JellyState::Wandering, agent)
            }
            _ => Vec::new(),
        }
    }

    fn transition(&mut self, next: JellyState, agent: &mut dyn NavAgent) -> Vec<BehaviorEvent> {
        let previous = self.state;
        if let JellyState::Watching { .. } = previous {
            agent.reset_path();
        }
        self.state = next;
        info!(from = previous.as_str(), to = next.as_str(), "jelly state changed");
        vec![BehaviorEvent::Exited(previous), BehaviorEvent::Entered(next)]
    }

    /// Run one tick of the active state.
    ///
    /// `subject_position` is the watched subject's position, if known.
    pub fn update(
        &mut self,
        agent: &mut dyn NavAgent,
        subject_position: Option<Vec3>,
    ) -> Vec<BehaviorEvent> {
        match self.state {
            JellyState::Wandering => self.wander(agent),
            JellyState::Watching { .. } => {
                if let Some(target) = subject_position {
                    self.watch(agent, target);
                }
                Vec::new()
            }
        }
    }

    fn wander(&mut self, agent: &mut dyn NavAgent) -> Vec<BehaviorEvent> {
        if self.can_wander {
            return self.choose_destination(agent).into_iter().collect();
        }

        if agent.remaining_distance() > HALT_TOLERANCE + agent.stopping_distance() {
            let here = agent.position();
            agent.set_destination(here);
        }
        Vec::new()
    }

    fn is_near_destination(&self, agent: &dyn NavAgent) -> bool {
        !agent.path_pending()
            && agent.remaining_distance()
                <= agent.stopping_distance().min(self.config.near_distance)
            && (!agent.has_path() || agent.velocity().length_squared() == 0.0)
    }

    fn choose_destination(&mut self, agent: &mut dyn NavAgent) -> Option<BehaviorEvent> {
        if !self.is_near_destination(agent) {
            return None;
        }

        let position = agent.position();
        let center = position + agent.forward() * self.config.wander_distance;
        let point = self.random_point(agent, center, self.config.wander_range)?;

        agent.set_stopping_distance(WANDER_STOPPING_DISTANCE);
        agent.set_destination(point);
        let near = 2.0 * point.distance(position)
            < self.config.wander_distance + self.config.wander_range;
        Some(BehaviorEvent::DestinationChanged {
            destination: point,
            near,
        })
    }

    fn random_point(&mut self, agent: &dyn NavAgent, center: Vec3, range: f32) -> Option<Vec3> {
        let max_distance = agent.height() * 2.0;
        (0..WANDER_SAMPLE_ATTEMPTS).find_map(|_| {
            let candidate = center + random_in_unit_sphere(&mut self.rng) * range;
            agent.sample_position(candidate, max_distance)
        })
    }

    fn watch(&mut self, agent: &mut dyn NavAgent, target: Vec3) -> bool {
        if agent.destination() == target {
            return true;
        }
        agent.set_stopping_distance(self.config.watch_distance);
        agent.set_destination(target)
    }
}

fn random_in_unit_sphere(rng: &mut StdRng) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jelly::nav::FlatNavAgent;
    use rand::SeedableRng;

    const PLAYER: EntityId = EntityId(1);

    fn behavior() -> JellyBehavior {
        JellyBehavior::new(BehaviorConfig::default(), StdRng::seed_from_u64(7))
    }

    fn sensed(present: bool) -> SenseEvent {
        SenseEvent {
            stimulus: Stimulus::Other,
            source: PLAYER,
            present,
        }
    }

    #[test]
    fn idle_jelly_picks_a_wander_point() {
        let mut jelly = behavior();
        let mut agent = FlatNavAgent::new(Vec3::ZERO, 20.0);

        let events = jelly.update(&mut agent, None);
        assert_eq!(events.len(), 1);
        let BehaviorEvent::DestinationChanged { destination, .. } = events[0] else {
            panic!("expected a destination change, got {events:?}");
        };
        assert!(agent.has_path());
        assert_eq!(agent.destination(), destination);
        assert_eq!(agent.stopping_distance(), WANDER_STOPPING_DISTANCE);
        // Region is centred 0.5 ahead with radius 2.
        assert!(destination.distance(Vec3::new(0.0, 0.0, 0.5)) <= 2.0 + 1e-4);
    }

    #[test]
    fn moving_jelly_keeps_its_destination() {
        let mut jelly = behavior();
        let mut agent = FlatNavAgent::new(Vec3::ZERO, 20.0);
        agent.set_stopping_distance(0.1);
        agent.set_destination(Vec3::new(5.0, 0.0, 0.0));
        agent.step();

        assert!(jelly.update(&mut agent, None).is_empty());
        assert_eq!(agent.destination(), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn no_walkable_ground_means_no_destination() {
        let mut jelly = behavior();
        let mut agent = FlatNavAgent::new(Vec3::ZERO, 20.0);
        agent.island_center = Vec3::new(0.0, 100.0, 0.0);

        assert!(jelly.update(&mut agent, None).is_empty());
        assert!(!agent.has_path());
    }

    #[test]
    fn paused_wandering_halts_the_agent() {
        let mut jelly = behavior();
        let mut agent = FlatNavAgent::new(Vec3::ZERO, 20.0);
        agent.set_destination(Vec3::new(5.0, 0.0, 0.0));
        jelly.toggle_wander(false);

        assert!(jelly.update(&mut agent, None).is_empty());
        assert_eq!(agent.destination(), agent.position());
    }

    #[test]
    fn sensing_the_player_switches_to_watching() {
        let mut jelly = behavior();
        let mut agent = FlatNavAgent::new(Vec3::ZERO, 20.0);

        let events = jelly.handle_sense(sensed(true), &mut agent);
        let watching = JellyState::Watching { subject: PLAYER };
        assert_eq!(
            events,
            vec![
                BehaviorEvent::Exited(JellyState::Wandering),
                BehaviorEvent::Entered(watching)
            ]
        );

        let target = Vec3::new(6.0, 0.0, 0.0);
        jelly.update(&mut agent, Some(target));
        assert_eq!(agent.destination(), target);
        assert_eq!(agent.stopping_distance(), 4.0);
    }

    #[test]
    fn losing_the_subject_resumes_wandering() {
        let mut jelly = behavior();
        let mut agent = FlatNavAgent::new(Vec3::ZERO, 20.0);
        jelly.handle_sense(sensed(true), &mut agent);
        jelly.update(&mut agent, Some(Vec3::new(6.0, 0.0, 0.0)));

        let other = SenseEvent {
            source: EntityId(99),
            ..sensed(false)
        };
        assert!(jelly.handle_sense(other, &mut agent).is_empty());

        let events = jelly.handle_sense(sensed(false), &mut agent);
        assert_eq!(events.last(), Some(&BehaviorEvent::Entered(JellyState::Wandering)));
        assert!(!agent.has_path());
    }

    #[test]
    fn non_creature_stimuli_are_ignored() {
        let mut jelly = behavior();
        let mut agent = FlatNavAgent::new(Vec3::ZERO, 20.0);
        let warmth = SenseEvent {
            stimulus: Stimulus::Warmth,
            ..sensed(true)
        };
        assert!(jelly.handle_sense(warmth, &mut agent).is_empty());
        assert_eq!(jelly.state(), JellyState::Wandering);
    }
}
