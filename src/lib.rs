//! A deterministic match-3 board simulation with a terminal frontend.
//!
//! The crate splits cleanly in two:
//!
//! - [`core`] - the simulation: grid, match detection, merge scoring, the
//!   gravity/refill cascade, the playability oracle and the phase machine.
//!   Pure and deterministic; drive it with [`core::Game::tick`].
//! - [`term`] - a crossterm frontend that renders the board, animates the
//!   phases and translates key presses into swap requests.
//!
//! ```no_run
//! use tui_match3::core::{BoardLayout, Game, GameConfig};
//!
//! let layout = BoardLayout::random(8, 8)?;
//! let mut game = Game::new(layout, GameConfig::default())?;
//! game.settle();
//! println!("score after initial cascades: {}", game.score());
//! # Ok::<(), tui_match3::core::GameError>(())
//! ```

pub mod core;
pub mod term;
pub mod types;
