//! Navigation agent seam.
//!
//! Jelly behaviours steer through [`NavAgent`], which the host implements on
//! top of its own path-finding. [`FlatNavAgent`] is a straight-line agent on a
//! flat, round island used by the headless host and tests.

use glam::Vec3;

/// Distance under which the flat agent snaps to its destination.
const ARRIVAL_EPSILON: f32 = 1e-3;

/// Host-provided navigation agent for one jelly.
pub trait NavAgent {
    /// Current world position.
    fn position(&self) -> Vec3;
    /// Unit facing direction.
    fn forward(&self) -> Vec3;
    /// Agent height, used to bound navmesh sampling.
    fn height(&self) -> f32;
    /// Current destination.
    fn destination(&self) -> Vec3;
    /// Distance left along the current path.
    fn remaining_distance(&self) -> f32;
    /// Distance from the destination at which the agent stops.
    fn stopping_distance(&self) -> f32;
    /// Change the stopping distance.
    fn set_stopping_distance(&mut self, distance: f32);
    /// Whether a path is still being computed.
    fn path_pending(&self) -> bool;
    /// Whether the agent currently follows a path.
    fn has_path(&self) -> bool;
    /// Current velocity.
    fn velocity(&self) -> Vec3;
    /// Request a path to `target`. Returns false if no path can be planned.
    fn set_destination(&mut self, target: Vec3) -> bool;
    /// Drop the current path and stand still.
    fn reset_path(&mut self);
    /// Project `point` onto walkable ground within `max_distance`.
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;
}

/// Straight-line agent walking on a flat disc.
#[derive(Debug, Clone)]
pub struct FlatNavAgent {
    position: Vec3,
    forward: Vec3,
    destination: Vec3,
    velocity: Vec3,
    stopping_distance: f32,
    has_path: bool,
    /// Distance covered per tick.
    pub speed: f32,
    /// Agent height.
    pub height: f32,
    /// Centre of the walkable island (its y is the ground height).
    pub island_center: Vec3,
    /// Radius of the walkable island.
    pub island_radius: f32,
}

impl FlatNavAgent {
    /// Place an agent on an island centred at the origin.
    pub fn new(position: Vec3, island_radius: f32) -> Self {
        let ground = Vec3::new(position.x, 0.0, position.z);
        Self {
            position: ground,
            forward: Vec3::Z,
            destination: ground,
            velocity: Vec3::ZERO,
            stopping_distance: 0.0,
            has_path: false,
            speed: 0.1,
            height: 0.5,
            island_center: Vec3::ZERO,
            island_radius,
        }
    }

    fn is_walkable(&self, point: Vec3) -> bool {
        let offset = point - self.island_center;
        offset.x * offset.x + offset.z * offset.z <= self.island_radius * self.island_radius
    }

    /// Advance one tick along the current path.
    pub fn step(&mut self) {
        if !self.has_path {
            self.velocity = Vec3::ZERO;
            return;
        }

        let to_target = self.destination - self.position;
        let distance = to_target.length();
        if distance <= self.stopping_distance.max(ARRIVAL_EPSILON) {
            self.velocity = Vec3::ZERO;
            self.has_path = false;
            return;
        }

        let direction = to_target / distance;
        let travel = self.speed.min(distance);
        self.forward = direction;
        self.velocity = direction * travel;
        self.position += self.velocity;
    }
}

impl NavAgent for FlatNavAgent {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn destination(&self) -> Vec3 {
        self.destination
    }

    fn remaining_distance(&self) -> f32 {
        self.position.distance(self.destination)
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    fn set_stopping_distance(&mut self, distance: f32) {
        self.stopping_distance = distance;
    }

    fn path_pending(&self) -> bool {
        false
    }

    fn has_path(&self) -> bool {
        self.has_path
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_destination(&mut self, target: Vec3) -> bool {
        let Some(ground) = self.sample_position(target, f32::INFINITY) else {
            return false;
        };
        self.destination = ground;
        self.has_path = true;
        true
    }

    fn reset_path(&mut self) {
        self.destination = self.position;
        self.velocity = Vec3::ZERO;
        self.has_path = false;
    }

    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        let ground = Vec3::new(point.x, self.island_center.y, point.z);
        if (point.y - ground.y).abs() > max_distance || !self.is_walkable(ground) {
            return None;
        }
        Some(ground)
    }
}
