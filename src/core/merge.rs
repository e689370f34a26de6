//! Merge resolution: one whole-grid pass that removes every match visible
//! right now.
//!
//! The scan is row-major. Each occupied, non-removed piece is probed with
//! the match detector; every member of a qualifying run is marked
//! `removed` + `merging` and scored once. Because the detector skips
//! removed pieces, removals made earlier in the pass are excluded from
//! later probes - a single pass resolves all simultaneous matches without
//! double-counting.

use crate::core::grid::Grid;
use crate::core::matcher;
use crate::types::PieceId;

/// What one resolution pass did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Ids marked for removal, in scan order.
    pub removed: Vec<PieceId>,
    /// `merge_score` per removed piece.
    pub score_delta: u32,
}

impl MergeOutcome {
    pub fn found_match(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Scan the whole grid and mark every matched piece.
pub fn resolve(grid: &mut Grid, merge_score: u32) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let Some(&anchor) = grid.piece_at(row, col) else {
                continue;
            };
            if anchor.removed {
                continue;
            }

            let Some(set) = matcher::runs_through(grid, &anchor) else {
                continue;
            };

            for cell in set.cells {
                if let Some(piece) = grid.piece_at_mut(cell.row, cell.col) {
                    if piece.removed {
                        continue;
                    }
                    piece.removed = true;
                    piece.merging = true;
                    outcome.removed.push(piece.id);
                    outcome.score_delta += merge_score;
                }
            }
        }
    }

    outcome
}
