//! Episode controller for the cube arena.
//!
//! The controller owns the episode: where the target is, which phase the
//! episode is in, the reward rule and the boundary flash. It never integrates
//! motion itself; every physical effect goes through an [`AgentBody`].

use physics::{ColliderTag, Vec3, IDENTITY_ORIENTATION};

use crate::body::AgentBody;
use crate::clock::SimClock;
use crate::config::ArenaConfig;
use crate::error::EnvError;
use crate::feedback::{BoundaryFlash, MaterialKind, MaterialTable};
use crate::heuristic::{self, AxisInput};
use crate::observation::{Action, Observation, ACTION_SIZE};
use crate::random::RandomSource;
use crate::stats::EpisodeStats;

/// Number of boundary surfaces around the arena.
pub const BOUNDARY_SURFACES: usize = 4;

/// Why an episode finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EpisodeEnd {
    /// The agent reached the target.
    Success,
    /// The agent touched a boundary.
    Failure,
    /// The step limit ran out. Not a terminal state: no terminal reward.
    Interrupted,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No episode has started yet.
    Uninitialised,
    Active,
    /// The last step ended the episode; only `reset` moves on.
    Finished(EpisodeEnd),
}

/// Result of one [`EpisodeController::step`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub reward: f32,
    pub done: bool,
    pub end: Option<EpisodeEnd>,
    /// Force pushed into the body for this step.
    pub applied_force: Vec3,
    /// Planar agent-target distance after the tick.
    pub distance: f32,
}

pub struct EpisodeController<M> {
    config: ArenaConfig,
    target: Vec3,
    phase: Phase,
    clock: SimClock,
    flash: BoundaryFlash<M>,
    stats: EpisodeStats,
}

impl<M: Clone> EpisodeController<M> {
    #[must_use]
    pub fn new(config: ArenaConfig, materials: MaterialTable<M>) -> Self {
        let clock = SimClock::new(config.tick());
        let flash = BoundaryFlash::new(materials, BOUNDARY_SURFACES, config.flash_hold());
        Self {
            target: Vec3::new(0.0, config.spawn_height, 0.0),
            config,
            phase: Phase::Uninitialised,
            clock,
            flash,
            stats: EpisodeStats::default(),
        }
    }

    /// Start a new episode: put the agent back at the start pose and sample a
    /// fresh target.
    ///
    /// The target is drawn as `U * size - size / 2` per planar axis, x first.
    ///
    /// # Errors
    ///
    /// Propagates host failures from [`AgentBody::set_pose`].
    pub fn reset(
        &mut self,
        body: &mut impl AgentBody,
        rng: &mut impl RandomSource,
    ) -> Result<(), EnvError> {
        body.set_pose(self.config.start_position(), IDENTITY_ORIENTATION)?;

        let size = self.config.arena_size;
        let half = self.config.half_size();
        let x = rng.next_unit() * size - half;
        let z = rng.next_unit() * size - half;
        self.target = Vec3::new(x, self.config.spawn_height, z);

        self.phase = Phase::Active;
        self.stats.begin_episode();
        tracing::debug!(
            episode = self.stats.episodes_started,
            target_x = x,
            target_z = z,
            "episode reset"
        );
        Ok(())
    }

    /// Build the policy observation for the current state.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::InvalidState`] before the first reset.
    pub fn observe(&self, body: &impl AgentBody) -> Result<Observation, EnvError> {
        if self.phase == Phase::Uninitialised {
            return Err(EnvError::InvalidState("observe called before the first reset"));
        }
        Ok(Observation::new(self.target, body.position(), body.velocity()))
    }

    /// Apply `action` as a force, let the host advance one tick, and score
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::InvalidArgument`] for an action that is not
    /// exactly two floats, and [`EnvError::InvalidState`] before the first
    /// reset or once the episode has finished.
    pub fn step(
        &mut self,
        action: &[f32],
        body: &mut impl AgentBody,
    ) -> Result<StepOutcome, EnvError> {
        match self.phase {
            Phase::Uninitialised => {
                return Err(EnvError::InvalidState("step called before the first reset"));
            }
            Phase::Finished(_) => {
                return Err(EnvError::InvalidState("episode finished; reset before stepping"));
            }
            Phase::Active => {}
        }
        let action = Action::try_from(action)?;

        let force = action.force(self.config.move_multiplier);
        body.add_force(force)?;
        let contacts = body.advance();

        let now = self.clock.advance();
        self.flash.tick(now);

        Ok(self.conclude(force, &contacts, body))
    }

    /// Score a tick that the host has already simulated.
    fn conclude(
        &mut self,
        applied_force: Vec3,
        contacts: &[ColliderTag],
        body: &impl AgentBody,
    ) -> StepOutcome {
        let distance = body.position().planar_distance(self.target);
        let step_number = self.stats.episode_steps + 1;
        let limit = u64::from(self.config.max_steps);

        // Reaching the target wins over a wall touched on the same tick.
        let end = if distance <= self.config.success_distance {
            Some(EpisodeEnd::Success)
        } else if contacts.iter().any(|tag| tag.is_boundary()) {
            Some(EpisodeEnd::Failure)
        } else if limit > 0 && step_number >= limit {
            Some(EpisodeEnd::Interrupted)
        } else {
            None
        };

        let reward = match end {
            Some(EpisodeEnd::Success) => self.config.success_reward,
            Some(EpisodeEnd::Failure) => self.config.failure_reward,
            Some(EpisodeEnd::Interrupted) | None => 0.0,
        };

        match end {
            Some(EpisodeEnd::Success) => self.on_terminal_visual(MaterialKind::Success),
            Some(EpisodeEnd::Failure) => self.on_terminal_visual(MaterialKind::Fail),
            Some(EpisodeEnd::Interrupted) | None => {}
        }

        self.stats.record_step(reward, end);
        if let Some(end) = end {
            self.phase = Phase::Finished(end);
            tracing::info!(
                episode = self.stats.episodes_started,
                ?end,
                reward = self.stats.episode_reward,
                steps = self.stats.episode_steps,
                "episode finished"
            );
        } else {
            tracing::trace!(distance, reward, "step");
        }

        StepOutcome { reward, done: end.is_some(), end, applied_force, distance }
    }

    /// Manual control in place of a trained policy.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn heuristic_action(&self, input: AxisInput) -> [f32; ACTION_SIZE] {
        heuristic::heuristic_action(input)
    }

    /// Flash every boundary surface with `kind` for the configured hold time.
    pub fn on_terminal_visual(&mut self, kind: MaterialKind) {
        self.flash.trigger(kind, self.clock.now());
    }

    /// Advance the visual clock one tick without stepping an episode, firing
    /// any reverts that fall due.
    pub fn idle_tick(&mut self) {
        let now = self.clock.advance();
        self.flash.tick(now);
    }

    /// Swap in a new configuration. The current episode is abandoned and the
    /// next call must be [`reset`](Self::reset).
    pub fn reconfigure(&mut self, config: ArenaConfig, materials: MaterialTable<M>) {
        self.clock.set_tick(config.tick());
        self.flash.set_hold(config.flash_hold());
        self.flash.set_table(materials);
        self.config = config;
        self.phase = Phase::Uninitialised;
    }

    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    #[must_use]
    pub fn flash(&self) -> &BoundaryFlash<M> {
        &self.flash
    }

    #[must_use]
    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }
}
