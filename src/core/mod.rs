//! Pure simulation logic: no terminal, no timing, no I/O.
//!
//! Everything in here is deterministic given a layout, a config and a seed,
//! which is what the integration tests and benchmarks lean on.

pub mod cascade;
pub mod error;
pub mod game;
pub mod grid;
pub mod layout;
pub mod matcher;
pub mod merge;
pub mod piece;
pub mod playability;
pub mod rng;

pub use error::{GameError, Result};
pub use game::{Game, GameConfig};
pub use grid::Grid;
pub use layout::BoardLayout;
pub use piece::{Piece, PieceFactory};
