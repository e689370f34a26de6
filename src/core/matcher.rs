//! Match detection: maximal same-type runs through a cell.
//!
//! Runs are found by expanding outward from the probe piece along each axis
//! while the neighbor exists, is not marked removed, and has the same type.
//! A run of length >= 3 is a match. A piece can sit in a row match and a
//! column match at once (cross/T/L shapes); both runs are reported as one
//! set with the intersection deduplicated.

use crate::core::grid::Grid;
use crate::core::piece::Piece;
use crate::types::CellCoord;

/// The cells of every qualifying run through one piece, deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchSet {
    pub cells: Vec<CellCoord>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Expands from `piece` along its row and column; returns the merged set
/// of all qualifying runs, or `None` when neither axis reaches length 3.
///
/// Removed pieces terminate expansion, so matches resolved earlier in the
/// same pass never re-qualify.
pub fn runs_through(grid: &Grid, piece: &Piece) -> Option<MatchSet> {
    if piece.removed {
        return None;
    }

    let row = piece.row;
    let col = piece.col;

    let same = |r: usize, c: usize| -> bool {
        grid.piece_at(r, c)
            .map(|other| !other.removed && other.piece_type == piece.piece_type)
            .unwrap_or(false)
    };

    let mut min_row = row;
    while min_row > 0 && same(min_row - 1, col) {
        min_row -= 1;
    }
    let mut max_row = row;
    while max_row + 1 < grid.rows() && same(max_row + 1, col) {
        max_row += 1;
    }

    let mut min_col = col;
    while min_col > 0 && same(row, min_col - 1) {
        min_col -= 1;
    }
    let mut max_col = col;
    while max_col + 1 < grid.cols() && same(row, max_col + 1) {
        max_col += 1;
    }

    let mut set = MatchSet::default();

    if max_row - min_row + 1 >= 3 {
        for r in min_row..=max_row {
            set.cells.push(CellCoord::new(r, col));
        }
    }

    if max_col - min_col + 1 >= 3 {
        for c in min_col..=max_col {
            let cell = CellCoord::new(row, c);
            // The probe cell is the only possible overlap between the runs.
            if !set.cells.contains(&cell) {
                set.cells.push(cell);
            }
        }
    }

    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}
