//! Map error type.
//!
//! Every variant is fatal: the map is rejected before any simulation runs and
//! the error is handed straight back to the caller.

use thiserror::Error;

use crate::Position;

/// Why a map line could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("unexpected symbol {0:?}")]
    UnexpectedSymbol(char),

    #[error("second guard symbol (first guard at {first})")]
    ExtraAgent { first: Position },

    #[error("row has {got} cells, expected {expected}")]
    RaggedRow { expected: usize, got: usize },

    #[error("map has no rows")]
    Empty,
}

/// The top-level error type for `patrol-core`.
#[derive(Debug, Error)]
pub enum PatrolError {
    #[error("malformed input at row {row}, column {col}: {kind}")]
    MalformedInput {
        row:  usize,
        col:  usize,
        kind: Malformed,
    },

    #[error("no guard symbol (one of ^ > v <) found in the map")]
    NoStartingAgent,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PatrolError {
    /// `true` for every variant that describes bad map text (as opposed to I/O).
    pub fn is_malformed(&self) -> bool {
        matches!(self, PatrolError::MalformedInput { .. } | PatrolError::NoStartingAgent)
    }
}

/// Shorthand result type for `patrol-core`.
pub type PatrolResult<T> = Result<T, PatrolError>;
