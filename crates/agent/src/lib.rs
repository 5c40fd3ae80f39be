#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Cube Arena Agent
//!
//! A cube must reach a target dropped at a random spot in a walled square
//! arena. This crate holds the decision logic around that task:
//!
//! -   **[`EpisodeController`]:** resets the episode, builds the 8-float
//!     [`Observation`], turns the 2-float action into a force, and scores each
//!     step (+1 on reaching the target, -0.5 on touching a wall).
//! -   **[`AgentBody`]:** the seam to whatever simulates the cube. The
//!     controller never integrates motion on its own.
//! -   **[`BoundaryFlash`]:** the success/fail colour flash on the arena walls,
//!     timed on an explicit [`SimClock`].
//! -   **[`CubeArenaEnv`]:** a ready-made [`Env`] that plugs the controller
//!     into the `physics` crate.
//!
//! ```rust
//! use agent::{ArenaConfig, CubeArenaEnv, Env};
//!
//! let mut env = CubeArenaEnv::new(ArenaConfig::default(), 7).unwrap();
//! let obs = env.reset().unwrap();
//! assert_eq!(obs.len(), 8);
//! let (_obs, reward, done) = env.step(&[0.0, 0.0]).unwrap();
//! assert!(reward == 0.0 || done);
//! ```

pub mod body;
pub mod clock;
pub mod config;
pub mod controller;
pub mod cube_env;
pub mod env;
pub mod error;
pub mod feedback;
pub mod heuristic;
pub mod observation;
pub mod policy;
pub mod random;
pub mod stats;

pub use body::AgentBody;
pub use clock::SimClock;
pub use config::ArenaConfig;
pub use controller::{EpisodeController, EpisodeEnd, Phase, StepOutcome, BOUNDARY_SURFACES};
pub use cube_env::{ArenaBody, CubeArenaEnv};
pub use env::Env;
pub use error::{ConfigError, EnvError};
pub use feedback::{BoundaryFlash, MaterialKind, MaterialTable};
pub use heuristic::{heuristic_action, AxisInput};
pub use observation::{Action, Observation, ACTION_SIZE, OBS_SIZE};
pub use policy::{IdlePolicy, Policy, RandomPolicy, SeekPolicy};
pub use random::{RandomSource, SequenceSource};
pub use stats::EpisodeStats;
