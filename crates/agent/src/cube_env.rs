use physics::{cube_body, ColliderTag, PhysicsSim, Vec3};

use crate::body::AgentBody;
use crate::config::ArenaConfig;
use crate::controller::{EpisodeController, StepOutcome};
use crate::env::Env;
use crate::error::{ConfigError, EnvError};
use crate::feedback::BoundaryFlash;
use crate::observation::{Observation, ACTION_SIZE, OBS_SIZE};
use crate::stats::EpisodeStats;

/// The agent cube living in a [`PhysicsSim`] walled in on four sides.
pub struct ArenaBody {
    sim: PhysicsSim,
    agent: usize,
}

impl ArenaBody {
    #[must_use]
    pub fn new(config: &ArenaConfig) -> Self {
        let mut sim = PhysicsSim::with_params(config.phys_params());
        let agent = sim.add_body(cube_body(
            config.start_position(),
            config.agent_half_extent,
            config.agent_mass,
        ));
        sim.add_arena_walls(config.wall_offset, config.wall_thickness, config.wall_height);
        Self { sim, agent }
    }

    #[must_use]
    pub fn sim(&self) -> &PhysicsSim {
        &self.sim
    }

    /// Force queued for the next tick.
    #[must_use]
    pub fn pending_force(&self) -> Vec3 {
        self.sim.pending_force(self.agent).unwrap_or(Vec3::ZERO)
    }
}

impl AgentBody for ArenaBody {
    fn set_pose(&mut self, position: Vec3, orientation: [f32; 4]) -> Result<(), EnvError> {
        Ok(self.sim.set_pose(self.agent, position, orientation)?)
    }

    fn add_force(&mut self, force: Vec3) -> Result<(), EnvError> {
        Ok(self.sim.add_force(self.agent, force)?)
    }

    fn advance(&mut self) -> Vec<ColliderTag> {
        let agent = self.agent;
        self.sim
            .step_cpu()
            .into_iter()
            .filter(|event| event.body == agent)
            .map(|event| event.tag)
            .collect()
    }

    fn position(&self) -> Vec3 {
        self.sim.bodies[self.agent].pos
    }

    fn velocity(&self) -> Vec3 {
        self.sim.bodies[self.agent].vel
    }

    fn angular_velocity(&self) -> Vec3 {
        self.sim.bodies[self.agent].angular_vel
    }

    fn orientation(&self) -> [f32; 4] {
        self.sim.bodies[self.agent].orientation
    }
}

/// Reach-the-target environment backed by the built-in physics host.
///
/// Boundary materials are the names from the config.
pub struct CubeArenaEnv {
    body: ArenaBody,
    controller: EpisodeController<String>,
    rng: fastrand::Rng,
}

impl CubeArenaEnv {
    /// Build an environment whose target placement is driven by `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `config` fails validation.
    pub fn new(config: ArenaConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let body = ArenaBody::new(&config);
        let materials = config.materials.clone();
        Ok(Self {
            body,
            controller: EpisodeController::new(config, materials),
            rng: fastrand::Rng::with_seed(seed),
        })
    }

    /// Step and return the full outcome rather than the Gym tuple.
    ///
    /// # Errors
    ///
    /// As [`EpisodeController::step`].
    pub fn step_outcome(&mut self, action: &[f32]) -> Result<StepOutcome, EnvError> {
        self.controller.step(action, &mut self.body)
    }

    /// # Errors
    ///
    /// Returns [`EnvError::InvalidState`] before the first reset.
    pub fn observe(&self) -> Result<Observation, EnvError> {
        self.controller.observe(&self.body)
    }

    /// Rebuild the arena from a new config. Call [`Env::reset`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] and leaves the environment untouched
    /// when `config` fails validation.
    pub fn reconfigure(&mut self, config: ArenaConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.body = ArenaBody::new(&config);
        let materials = config.materials.clone();
        self.controller.reconfigure(config, materials);
        tracing::info!("arena reconfigured");
        Ok(())
    }

    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.controller.target()
    }

    #[must_use]
    pub fn body(&self) -> &ArenaBody {
        &self.body
    }

    #[must_use]
    pub fn controller(&self) -> &EpisodeController<String> {
        &self.controller
    }

    #[must_use]
    pub fn flash(&self) -> &BoundaryFlash<String> {
        self.controller.flash()
    }

    #[must_use]
    pub fn stats(&self) -> &EpisodeStats {
        self.controller.stats()
    }
}

impl Env for CubeArenaEnv {
    fn step(&mut self, action: &[f32]) -> Result<(Vec<f32>, f32, bool), EnvError> {
        let outcome = self.step_outcome(action)?;
        let obs = self.observe()?;
        Ok((obs.as_slice().to_vec(), outcome.reward, outcome.done))
    }

    fn reset(&mut self) -> Result<Vec<f32>, EnvError> {
        self.controller.reset(&mut self.body, &mut self.rng)?;
        Ok(self.observe()?.as_slice().to_vec())
    }

    fn obs_size(&self) -> usize {
        OBS_SIZE
    }

    fn action_size(&self) -> usize {
        ACTION_SIZE
    }
}
