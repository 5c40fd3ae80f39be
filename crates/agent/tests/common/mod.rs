#![allow(dead_code)]

use agent::{AgentBody, EnvError};
use physics::{ColliderTag, Vec3, IDENTITY_ORIENTATION};

/// Host stand-in whose "physics" is whatever the test scripts for the next tick.
pub struct ScriptedBody {
    pub pos: Vec3,
    pub vel: Vec3,
    pub angular_vel: Vec3,
    pub orientation: [f32; 4],
    /// Every force pushed in, in order.
    pub forces: Vec<Vec3>,
    /// Reported by the next `advance`, then cleared.
    pub next_contacts: Vec<ColliderTag>,
    /// Where the body ends up after the next `advance`, if scripted.
    pub next_position: Option<Vec3>,
    pub ticks: usize,
}

impl ScriptedBody {
    pub fn new() -> Self {
        Self {
            pos: Vec3::new(3.0, 7.0, -2.0),
            vel: Vec3::new(1.0, 2.0, 3.0),
            angular_vel: Vec3::new(0.0, 4.0, 0.0),
            orientation: [0.0, 0.7071, 0.0, 0.7071],
            forces: Vec::new(),
            next_contacts: Vec::new(),
            next_position: None,
            ticks: 0,
        }
    }
}

impl AgentBody for ScriptedBody {
    fn set_pose(&mut self, position: Vec3, orientation: [f32; 4]) -> Result<(), EnvError> {
        self.pos = position;
        self.orientation = orientation;
        self.vel = Vec3::ZERO;
        self.angular_vel = Vec3::ZERO;
        Ok(())
    }

    fn add_force(&mut self, force: Vec3) -> Result<(), EnvError> {
        self.forces.push(force);
        Ok(())
    }

    fn advance(&mut self) -> Vec<ColliderTag> {
        self.ticks += 1;
        if let Some(pos) = self.next_position.take() {
            self.pos = pos;
        }
        std::mem::take(&mut self.next_contacts)
    }

    fn position(&self) -> Vec3 {
        self.pos
    }

    fn velocity(&self) -> Vec3 {
        self.vel
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angular_vel
    }

    fn orientation(&self) -> [f32; 4] {
        self.orientation
    }
}

pub fn identity() -> [f32; 4] {
    IDENTITY_ORIENTATION
}

/// Uniform draw that lands a target coordinate on `value`.
pub fn draw_for(value: f32) -> f32 {
    (value + 14.0) / 28.0
}
