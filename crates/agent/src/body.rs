use physics::{ColliderTag, Vec3};

use crate::error::EnvError;

/// The host-side rigid body the controller drives.
///
/// The host owns motion: the controller only teleports the body at episode
/// start, pushes forces into it, and asks it to advance one fixed tick.
pub trait AgentBody {
    /// Move to `position` with `orientation`, clearing linear and angular
    /// velocity.
    ///
    /// # Errors
    ///
    /// Fails when the host cannot address the body.
    fn set_pose(&mut self, position: Vec3, orientation: [f32; 4]) -> Result<(), EnvError>;

    /// Accumulate a force that acts during the next tick.
    ///
    /// # Errors
    ///
    /// Fails when the host cannot address the body.
    fn add_force(&mut self, force: Vec3) -> Result<(), EnvError>;

    /// Simulate one tick and return the tags of colliders the body started
    /// touching during it.
    fn advance(&mut self) -> Vec<ColliderTag>;

    fn position(&self) -> Vec3;

    fn velocity(&self) -> Vec3;

    fn angular_velocity(&self) -> Vec3;

    fn orientation(&self) -> [f32; 4];
}
