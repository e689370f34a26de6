//! Simulation state machine.
//!
//! [`Game`] owns the grid, the piece factory and the score, and advances
//! through phases on explicit ticks:
//!
//! ```text
//! Init -> Dropping -> { Merging | Idle } -> ...
//!                          |         |
//!                          v         v
//!                      Spawning   Swapping / GameOver
//! ```
//!
//! The caller drives time: `tick(animations_settled)` is called once per
//! frame, and phases that represent an animation window (dropping, the
//! swap, the merge flash) only advance once the caller reports the
//! animation finished. A headless caller passes `true` every tick and the
//! board settles in a handful of ticks.
//!
//! The machine emits [`GameEvent`]s into a buffer the caller drains; the
//! core never blocks on a listener.

use crate::core::error::{GameError, Result};
use crate::core::grid::Grid;
use crate::core::layout::BoardLayout;
use crate::core::piece::{Piece, PieceFactory};
use crate::core::{cascade, matcher, merge, playability};
use crate::types::{
    CellCoord, GameEvent, Phase, SwapOutcome, DEFAULT_MERGE_SCORE, DEFAULT_PALETTE,
};

/// Tunables fixed for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of distinct piece types.
    pub palette: u8,
    /// Points per removed piece.
    pub merge_score: u32,
    /// Seed for the piece-type stream.
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE,
            merge_score: DEFAULT_MERGE_SCORE,
            seed: 1,
        }
    }
}

/// One running match-3 simulation.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    layout: BoardLayout,
    config: GameConfig,
    factory: PieceFactory,
    phase: Phase,
    score: u32,
    events: Vec<GameEvent>,
}

impl Game {
    /// Build a game from a layout. Fails when the layout names a type
    /// outside the configured palette.
    pub fn new(layout: BoardLayout, config: GameConfig) -> Result<Self> {
        layout.check_palette(config.palette)?;

        let mut game = Self {
            grid: Grid::new(layout.rows, layout.cols),
            layout,
            config,
            factory: PieceFactory::new(config.seed, config.palette),
            phase: Phase::Init,
            score: 0,
            events: Vec::new(),
        };
        game.populate();
        Ok(game)
    }

    /// Reset to the initial layout. The piece-type stream continues from
    /// where it left off, so consecutive games differ.
    pub fn restart(&mut self) {
        self.grid = Grid::new(self.layout.rows, self.layout.cols);
        self.phase = Phase::Init;
        self.score = 0;
        self.events.clear();
        self.populate();
    }

    fn populate(&mut self) {
        self.events.push(GameEvent::GameStarted);
        for row in 0..self.layout.rows {
            for col in 0..self.layout.cols {
                let requested = self.layout.cells[row * self.layout.cols + col];
                let piece = self.factory.create(requested);
                self.events.push(GameEvent::PieceSpawned {
                    id: piece.id,
                    cell: CellCoord::new(row, col),
                    piece_type: piece.piece_type,
                    // Initial pieces appear in place, not from above.
                    spawn_row: row as i32,
                });
                self.grid.place(row, col, piece);
            }
        }
        self.events.push(GameEvent::ScoreChanged(0));
    }

    /// Advance one frame. `animations_settled` reports whether the
    /// presentation has finished animating the current phase; animated
    /// phases hold until it is true. Returns the phase after the tick.
    pub fn tick(&mut self, animations_settled: bool) -> Phase {
        match self.phase {
            Phase::Init => {
                if animations_settled {
                    // Route through the settle path so pre-seeded matches
                    // on the initial board resolve like any cascade.
                    self.phase = Phase::Dropping;
                }
            }
            Phase::Dropping => {
                if animations_settled {
                    if self.run_merge_pass() {
                        self.phase = Phase::Merging;
                    } else {
                        self.phase = Phase::Idle;
                        self.check_playable();
                    }
                }
            }
            Phase::Idle => {
                if self.run_merge_pass() {
                    self.phase = Phase::Merging;
                }
            }
            Phase::Swapping => {
                if animations_settled {
                    self.phase = Phase::Idle;
                }
            }
            Phase::Merging => {
                if animations_settled {
                    self.grid.purge_removed();
                    self.phase = Phase::Spawning;
                }
            }
            Phase::Spawning => {
                let moves = cascade::compact(&mut self.grid);
                for m in &moves {
                    self.events.push(GameEvent::PieceMoved {
                        id: m.id,
                        from: m.from,
                        to: m.to,
                    });
                }
                let spawned = cascade::spawn_fill(&mut self.grid, &mut self.factory);
                for s in &spawned {
                    self.events.push(GameEvent::PieceSpawned {
                        id: s.id,
                        cell: s.cell,
                        piece_type: s.piece_type,
                        spawn_row: s.spawn_row,
                    });
                }
                if moves.is_empty() && spawned.is_empty() {
                    self.phase = Phase::Idle;
                    self.check_playable();
                } else {
                    self.phase = Phase::Dropping;
                }
            }
            Phase::GameOver => {}
        }

        self.phase
    }

    /// Mark every matched piece on the board, emitting removal and score
    /// events. Returns true when anything matched.
    fn run_merge_pass(&mut self) -> bool {
        let outcome = merge::resolve(&mut self.grid, self.config.merge_score);
        if !outcome.found_match() {
            return false;
        }

        for &id in &outcome.removed {
            self.events.push(GameEvent::PieceRemoved(id));
        }
        self.score += outcome.score_delta;
        self.events.push(GameEvent::ScoreChanged(self.score));
        true
    }

    fn check_playable(&mut self) {
        if !playability::has_available_play(&self.grid) {
            self.phase = Phase::GameOver;
            self.events.push(GameEvent::GameOver);
        }
    }

    /// Attempt to swap the pieces at two cells.
    ///
    /// Accepted only while idle, between two adjacent occupied cells. A
    /// swap that completes no run is undone and reported as `Reverted`;
    /// a matching swap is kept and the machine enters `Swapping`.
    pub fn request_swap(&mut self, a: CellCoord, b: CellCoord) -> Result<SwapOutcome> {
        if self.phase != Phase::Idle {
            return Err(GameError::InvalidSwap("board is not idle"));
        }

        let pa = self
            .grid
            .get(a.row, a.col)?
            .copied()
            .ok_or(GameError::InvalidSwap("first cell is empty"))?;
        let pb = self
            .grid
            .get(b.row, b.col)?
            .copied()
            .ok_or(GameError::InvalidSwap("second cell is empty"))?;
        if pa.removed || pb.removed {
            return Err(GameError::InvalidSwap("piece is being removed"));
        }
        if !a.is_adjacent_to(&b) {
            return Err(GameError::InvalidSwap("cells are not adjacent"));
        }

        // Tentative swap; undone below unless it completes a run.
        self.grid.swap(a, b)?;

        let mut matched = Vec::new();
        for cell in [a, b] {
            if let Some(piece) = self.grid.piece_at(cell.row, cell.col) {
                if let Some(set) = matcher::runs_through(&self.grid, piece) {
                    for c in set.cells {
                        if !matched.contains(&c) {
                            matched.push(c);
                        }
                    }
                }
            }
        }

        if matched.is_empty() {
            self.grid.swap(a, b)?;
            return Ok(SwapOutcome::Reverted);
        }

        self.events.push(GameEvent::PieceMoved {
            id: pa.id,
            from: a,
            to: b,
        });
        self.events.push(GameEvent::PieceMoved {
            id: pb.id,
            from: b,
            to: a,
        });
        self.phase = Phase::Swapping;
        Ok(SwapOutcome::Committed { matched })
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The piece at a cell, if any.
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Option<&Piece>> {
        self.grid.get(row, col)
    }

    /// Run ticks with settled animations until the board reaches a resting
    /// phase (`Idle` or `GameOver`). Intended for headless callers.
    pub fn settle(&mut self) -> Phase {
        // One pass per phase transition; bounded because every merge pass
        // removes at least three pieces or the machine goes idle.
        loop {
            let before = (self.phase, self.grid.piece_count(), self.score);
            let phase = self.tick(true);
            if phase == Phase::GameOver {
                return phase;
            }
            if phase == Phase::Idle && (self.phase, self.grid.piece_count(), self.score) == before {
                return phase;
            }
        }
    }
}
