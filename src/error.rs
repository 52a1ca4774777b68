use crate::envs::frozen_lake::{Cell, State};
use rand::distributions::WeightedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LakeError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("cell {0} lies outside the grid")]
    OutOfBounds(State),

    #[error("cell {state} is classified as both {first} and {second}")]
    OverlappingCells {
        state: State,
        first: Cell,
        second: Cell,
    },

    #[error("start cell {0} must be a free cell")]
    InvalidStart(State),

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("{0} is not a free cell")]
    NotFree(State),

    #[error("policy has no action for {0}")]
    MissingAction(State),

    #[error("value iteration did not converge after {iterations} iterations (last delta {delta})")]
    DidNotConverge { iterations: usize, delta: f64 },

    #[error("rollout exceeded step budget of {0}")]
    StepBudgetExceeded(usize),

    #[error("cannot sample successor: {0}")]
    Sampling(#[from] WeightedError),

    #[error("failed to read lake configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed lake configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LakeError>;

pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> LakeError {
    LakeError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}
