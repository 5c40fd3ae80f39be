use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("body index {index} out of range ({len} bodies)")]
    BodyOutOfRange { index: usize, len: usize },
    #[error("simulation has no bodies")]
    NoBodies,
}
