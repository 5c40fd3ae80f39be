use physics::PhysicsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    #[error("action has {actual} components, expected {expected}")]
    InvalidArgument { expected: usize, actual: usize },
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    #[error("physics host: {0}")]
    Physics(#[from] PhysicsError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
