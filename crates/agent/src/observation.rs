//! Fixed policy-facing layouts.
//!
//! Any policy trained against this environment depends on these exact
//! layouts, so field order here is part of the external contract.

use physics::Vec3;

use crate::error::EnvError;

/// Number of floats in an [`Observation`].
pub const OBS_SIZE: usize = 8;
/// Number of floats in an action vector.
pub const ACTION_SIZE: usize = 2;

/// `[target.x, target.y, target.z, agent.x, agent.y, agent.z, vel.x, vel.z]`,
/// unnormalised.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Observation {
    pub target: Vec3,
    pub agent: Vec3,
    pub velocity_x: f32,
    pub velocity_z: f32,
}

impl Observation {
    #[must_use]
    pub fn new(target: Vec3, agent: Vec3, velocity: Vec3) -> Self {
        Self { target, agent, velocity_x: velocity.x, velocity_z: velocity.z }
    }

    #[must_use]
    pub fn to_array(self) -> [f32; OBS_SIZE] {
        bytemuck::cast(self)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }

    /// Rebuild an observation from a flat vector.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::InvalidArgument`] unless `values` has exactly
    /// [`OBS_SIZE`] elements.
    pub fn from_slice(values: &[f32]) -> Result<Self, EnvError> {
        let array: [f32; OBS_SIZE] = values.try_into().map_err(|_| EnvError::InvalidArgument {
            expected: OBS_SIZE,
            actual: values.len(),
        })?;
        Ok(bytemuck::cast(array))
    }
}

/// Planar force direction produced by a policy, each axis nominally in `[-1, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Action {
    pub x: f32,
    pub z: f32,
}

impl Action {
    #[must_use]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Force applied to the agent for this action.
    #[must_use]
    pub fn force(self, multiplier: f32) -> Vec3 {
        Vec3::new(self.x * multiplier, 0.0, self.z * multiplier)
    }
}

impl TryFrom<&[f32]> for Action {
    type Error = EnvError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        match values {
            &[x, z] => Ok(Self { x, z }),
            _ => Err(EnvError::InvalidArgument { expected: ACTION_SIZE, actual: values.len() }),
        }
    }
}

impl From<Action> for [f32; ACTION_SIZE] {
    fn from(action: Action) -> Self {
        [action.x, action.z]
    }
}
