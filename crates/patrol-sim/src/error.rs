use patrol_core::{PatrolError, Position};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("map error: {0}")]
    Map(#[from] PatrolError),

    #[error("start position {0} lies outside the grid")]
    StartOutOfBounds(Position),

    #[error("start position {0} is an obstacle")]
    StartOnObstacle(Position),

    #[error("obstacle candidate {0} is the guard's start cell")]
    CandidateIsStart(Position),

    #[error("obstacle candidate {0} lies outside the grid")]
    CandidateOutOfBounds(Position),

    #[error("baseline walk never leaves the grid (no exit within {limit} steps)")]
    BaselineLoops { limit: u64 },

    #[error("walk exceeded {limit} steps without exiting or repeating a state")]
    StepLimitExceeded { limit: u64 },

    #[cfg(feature = "parallel")]
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

pub type SimResult<T> = Result<T, SimError>;
