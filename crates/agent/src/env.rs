use crate::error::EnvError;

/// Reinforcement learning environment trait.
///
/// Inspired by classic frameworks like OpenAI Gym, this trait defines the core
/// interface an environment must provide. Each call to [`step`] advances the
/// simulation by one action and returns the new observation vector, a reward
/// signal, and whether the episode has terminated.
///
/// [`step`]: Env::step
pub trait Env {
    /// Advance the environment by one action.
    ///
    /// Returns `(obs, reward, done)` where `obs` is the new observation vector,
    /// `reward` is the scalar reward, and `done` indicates episode termination.
    ///
    /// # Errors
    ///
    /// Fails when the action has the wrong length or the environment is not
    /// in a state that accepts actions.
    fn step(&mut self, action: &[f32]) -> Result<(Vec<f32>, f32, bool), EnvError>;

    /// Reset the environment to its starting state and return the initial
    /// observation vector.
    ///
    /// # Errors
    ///
    /// Fails when the host rejects the reset pose.
    fn reset(&mut self) -> Result<Vec<f32>, EnvError>;

    /// Size of the observation vector.
    fn obs_size(&self) -> usize;

    /// Size of the action space.
    fn action_size(&self) -> usize;
}
