//! Error taxonomy for the simulation core.
//!
//! Everything here is a synchronous return value; the core never swallows a
//! failure. A reverted swap is *not* an error (see
//! [`SwapOutcome::Reverted`](crate::types::SwapOutcome)).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate outside `[0, rows) x [0, cols)`. A caller contract
    /// violation: never clamped, always surfaced.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Swap request rejected without touching the grid.
    #[error("invalid swap: {0}")]
    InvalidSwap(&'static str),
    /// Bad initial board specification; the game cannot start.
    #[error("malformed board: {0}")]
    MalformedBoard(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
