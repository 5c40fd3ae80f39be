//! Scripted stand-ins for a trained policy.

use physics::Vec3;

use crate::heuristic::{heuristic_action, AxisInput};
use crate::observation::{Observation, ACTION_SIZE};

pub trait Policy {
    fn act(&mut self, obs: &Observation) -> [f32; ACTION_SIZE];
}

/// Steers straight at the target, driving the axes the way a player holding
/// the stick towards the target would.
#[derive(Copy, Clone, Debug, Default)]
pub struct SeekPolicy;

impl Policy for SeekPolicy {
    fn act(&mut self, obs: &Observation) -> [f32; ACTION_SIZE] {
        let to_target = obs.target - obs.agent;
        let dir = Vec3::new(to_target.x, 0.0, to_target.z).normalize();
        heuristic_action(AxisInput::new(dir.x, dir.z))
    }
}

/// Each axis uniform in `[-1, 1]`.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: fastrand::Rng::with_seed(seed) }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _obs: &Observation) -> [f32; ACTION_SIZE] {
        [self.rng.f32() * 2.0 - 1.0, self.rng.f32() * 2.0 - 1.0]
    }
}

/// Never pushes.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdlePolicy;

impl Policy for IdlePolicy {
    fn act(&mut self, _obs: &Observation) -> [f32; ACTION_SIZE] {
        [0.0, 0.0]
    }
}
