//! # Runner Logic
//!
//! Builds a [`CubeArenaEnv`], plays the requested number of episodes with a
//! scripted policy, and folds the controller's statistics into a
//! [`RunSummary`].

use std::path::PathBuf;

use agent::{
    ArenaConfig, CubeArenaEnv, Env, IdlePolicy, Observation, Policy, RandomPolicy, SeekPolicy,
};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::watcher;

/// Step limit used when neither the CLI nor the config sets one, so idle or
/// wandering policies still finish.
pub const DEFAULT_STEP_LIMIT: u32 = 5_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// Head straight for the target
    Seek,
    /// Uniform random axes
    Random,
    /// Never move
    Idle,
}

#[derive(Clone, Debug)]
pub struct RunOptions {
    pub episodes: u32,
    pub seed: u64,
    pub policy: PolicyKind,
    pub config_path: Option<PathBuf>,
    pub watch: bool,
    pub max_steps: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub episodes: u64,
    pub successes: u64,
    pub failures: u64,
    pub interruptions: u64,
    pub success_rate: f64,
    pub mean_steps: f64,
    pub total_steps: u64,
    pub total_reward: f64,
}

fn load_config(options: &RunOptions) -> Result<ArenaConfig> {
    let mut config = match &options.config_path {
        Some(path) => ArenaConfig::from_path(path)
            .with_context(|| format!("loading arena config from {}", path.display()))?,
        None => ArenaConfig::default(),
    };
    config.max_steps = match (options.max_steps, config.max_steps) {
        (Some(limit), _) => limit,
        (None, 0) => DEFAULT_STEP_LIMIT,
        (None, limit) => limit,
    };
    Ok(config)
}

fn make_policy(kind: PolicyKind, seed: u64) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Seek => Box::new(SeekPolicy),
        PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        PolicyKind::Idle => Box::new(IdlePolicy),
    }
}

/// What [`Runner::reload_if_changed`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reload {
    /// No change to the config file was seen.
    Unchanged,
    /// The file changed and the new config is in use.
    Applied,
    /// The file changed but could not be loaded; the old config stays.
    Kept,
}

/// An arena plus the policy playing it.
pub struct Runner {
    options: RunOptions,
    env: CubeArenaEnv,
    policy: Box<dyn Policy>,
    watcher: Option<watcher::ConfigWatcher>,
}

impl Runner {
    /// Load the config and start the watcher if `options.watch` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or the watcher cannot
    /// start.
    pub fn new(options: RunOptions) -> Result<Self> {
        let config = load_config(&options)?;
        tracing::info!(
            episodes = options.episodes,
            seed = options.seed,
            policy = ?options.policy,
            max_steps = config.max_steps,
            "Starting run"
        );

        let env = CubeArenaEnv::new(config, options.seed).context("invalid arena config")?;
        let policy = make_policy(options.policy, options.seed);
        let watcher = match (&options.config_path, options.watch) {
            (Some(path), true) => Some(watcher::start(path)?),
            _ => None,
        };
        Ok(Self { options, env, policy, watcher })
    }

    /// Pick up config edits seen by the watcher. A file that no longer loads
    /// is logged and the current config is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment rejects a config that loaded.
    pub fn reload_if_changed(&mut self) -> Result<Reload> {
        if !self.watcher.as_ref().is_some_and(watcher::ConfigWatcher::changed) {
            return Ok(Reload::Unchanged);
        }
        match load_config(&self.options) {
            Ok(config) => {
                self.env.reconfigure(config)?;
                Ok(Reload::Applied)
            }
            Err(e) => {
                tracing::warn!("Keeping previous config: {e:#}");
                Ok(Reload::Kept)
            }
        }
    }

    /// Play one episode to its end.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment rejects a call.
    pub fn play_episode(&mut self) -> Result<()> {
        let mut obs = self.env.reset()?;
        loop {
            let action = self.policy.act(&Observation::from_slice(&obs)?);
            let (next, _reward, done) = self.env.step(&action)?;
            obs = next;
            if done {
                return Ok(());
            }
        }
    }

    #[must_use]
    pub fn env(&self) -> &CubeArenaEnv {
        &self.env
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        summarise(&self.env)
    }
}

/// Play `options.episodes` episodes and summarise them.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the watcher cannot start,
/// or the environment rejects a call.
pub fn run(options: &RunOptions) -> Result<RunSummary> {
    let mut runner = Runner::new(options.clone())?;

    for episode in 0..options.episodes {
        runner.reload_if_changed()?;
        runner
            .play_episode()
            .with_context(|| format!("episode {episode} failed"))?;

        if (episode + 1) % 50 == 0 {
            tracing::info!(
                "Episode {} complete. Success rate so far: {:.3}",
                episode + 1,
                runner.env().stats().success_rate()
            );
        }
    }

    let summary = runner.summary();
    tracing::info!(?summary, "Run finished");
    Ok(summary)
}

#[allow(clippy::cast_precision_loss)]
fn summarise(env: &CubeArenaEnv) -> RunSummary {
    let stats = env.stats();
    let episodes = stats.completed();
    let mean_steps = if episodes == 0 {
        0.0
    } else {
        stats.total_steps as f64 / episodes as f64
    };
    RunSummary {
        episodes,
        successes: stats.successes,
        failures: stats.failures,
        interruptions: stats.interruptions,
        success_rate: stats.success_rate(),
        mean_steps,
        total_steps: stats.total_steps,
        total_reward: stats.total_reward,
    }
}
