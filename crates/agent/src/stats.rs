use serde::Serialize;

use crate::controller::EpisodeEnd;

/// Running counters over every episode a controller has played.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EpisodeStats {
    pub episodes_started: u64,
    pub successes: u64,
    pub failures: u64,
    pub interruptions: u64,
    /// Steps taken in the current episode.
    pub episode_steps: u64,
    pub total_steps: u64,
    /// Reward collected in the current episode.
    pub episode_reward: f32,
    pub total_reward: f64,
}

impl EpisodeStats {
    pub fn begin_episode(&mut self) {
        self.episodes_started += 1;
        self.episode_steps = 0;
        self.episode_reward = 0.0;
    }

    pub fn record_step(&mut self, reward: f32, end: Option<EpisodeEnd>) {
        self.episode_steps += 1;
        self.total_steps += 1;
        self.episode_reward += reward;
        self.total_reward += f64::from(reward);
        match end {
            Some(EpisodeEnd::Success) => self.successes += 1,
            Some(EpisodeEnd::Failure) => self.failures += 1,
            Some(EpisodeEnd::Interrupted) => self.interruptions += 1,
            None => {}
        }
    }

    #[must_use]
    pub fn completed(&self) -> u64 {
        self.successes + self.failures + self.interruptions
    }

    /// Fraction of finished episodes that reached the target.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        match self.completed() {
            0 => 0.0,
            n => self.successes as f64 / n as f64,
        }
    }
}
