//! Core types shared across the application
//! This module contains pure data types with no external dependencies
//! beyond serde derives for board-file round-tripping.

use serde::{Deserialize, Serialize};

/// Default board dimensions
pub const DEFAULT_ROWS: usize = 8;
pub const DEFAULT_COLS: usize = 8;

/// Default number of distinct piece types on the board
pub const DEFAULT_PALETTE: u8 = 5;

/// Points awarded per piece removed in a merge
pub const DEFAULT_MERGE_SCORE: u32 = 10;

/// Simulation tick interval (milliseconds)
pub const TICK_MS: u32 = 16;

/// How long the frontend lingers in an animated phase before acknowledging
/// it as settled (milliseconds). Purely presentational pacing.
pub const SETTLE_PAUSE_MS: u32 = 120;

/// Board-file sentinel: "assign a random type at spawn time"
pub const RANDOM_PIECE: i16 = -1;

/// A piece type in `[0, palette)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceType(pub u8);

/// Stable piece identity, valid across relocation until removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

/// A grid coordinate (row-major addressing, row 0 at the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when the other cell is directly above, below, left or right.
    pub fn is_adjacent_to(&self, other: &CellCoord) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr + dc == 1
    }
}

/// Simulation phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Idle,
    Swapping,
    Merging,
    Spawning,
    Dropping,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::Idle => "idle",
            Phase::Swapping => "swapping",
            Phase::Merging => "merging",
            Phase::Spawning => "spawning",
            Phase::Dropping => "dropping",
            Phase::GameOver => "game over",
        }
    }
}

/// State-change notifications for the presentation collaborator.
///
/// The simulation appends these to a buffer the caller drains every tick;
/// nothing in the core depends on a listener existing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    ScoreChanged(u32),
    PieceRemoved(PieceId),
    PieceMoved {
        id: PieceId,
        from: CellCoord,
        to: CellCoord,
    },
    PieceSpawned {
        id: PieceId,
        cell: CellCoord,
        piece_type: PieceType,
        /// Row the presentation should drop the piece in from. Negative for
        /// cascade refills (above the visible grid), equal to `cell.row` for
        /// the initial population.
        spawn_row: i32,
    },
    GameOver,
}

/// Result of an accepted swap request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap produced at least one match and was kept. `matched` holds
    /// the cells of every run the swap completed, for animation.
    Committed { matched: Vec<CellCoord> },
    /// Neither piece matched; the grid was restored to its prior state.
    Reverted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_is_4_connected() {
        let c = CellCoord::new(2, 2);
        assert!(c.is_adjacent_to(&CellCoord::new(1, 2)));
        assert!(c.is_adjacent_to(&CellCoord::new(3, 2)));
        assert!(c.is_adjacent_to(&CellCoord::new(2, 1)));
        assert!(c.is_adjacent_to(&CellCoord::new(2, 3)));

        assert!(!c.is_adjacent_to(&CellCoord::new(2, 2)));
        assert!(!c.is_adjacent_to(&CellCoord::new(1, 1)));
        assert!(!c.is_adjacent_to(&CellCoord::new(2, 4)));
        assert!(!c.is_adjacent_to(&CellCoord::new(0, 2)));
    }

    #[test]
    fn phase_names() {
        assert_eq!(Phase::Init.as_str(), "init");
        assert_eq!(Phase::GameOver.as_str(), "game over");
    }
}
