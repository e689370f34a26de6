//! Playability oracle: "is any move available?"
//!
//! Determines, without performing real swaps, whether at least one adjacent
//! swap would complete a run of three. Six local patterns are probed around
//! every occupied, non-removed piece; the first hit ends the scan. The
//! pattern diagrams below mark cells of the probe piece's type with `1`
//! (the probe itself is the top-left / leftmost cell of each diagram).
//!
//! Runs only between settle cycles - a board mid-cascade has holes that
//! would make the answer meaningless.

use crate::core::grid::Grid;
use crate::core::piece::Piece;

/// True when at least one adjacent swap would produce a match.
pub fn has_available_play(grid: &Grid) -> bool {
    grid.pieces()
        .any(|piece| !piece.removed && piece_has_play(grid, piece))
}

fn piece_has_play(grid: &Grid, piece: &Piece) -> bool {
    let rows = grid.rows();
    let cols = grid.cols();
    let row = piece.row;
    let col = piece.col;

    // Same type, in bounds, not removed.
    let m = |r: usize, c: usize| -> bool {
        r < rows
            && c < cols
            && grid
                .piece_at(r, c)
                .map(|other| !other.removed && other.piece_type == piece.piece_type)
                .unwrap_or(false)
    };

    // 10    10
    // 01 or 10
    // 10    01
    if row + 2 < rows
        && (m(row + 1, col) || m(row + 1, col + 1))
        && (m(row + 2, col) || m(row + 2, col + 1))
    {
        return true;
    }

    // 01    01
    // 10 or 01
    // 01    10
    if row > 1
        && (m(row - 1, col) || m(row - 1, col + 1))
        && (m(row - 2, col) || m(row - 2, col + 1))
    {
        return true;
    }

    // 1    1
    // 1 or 0
    // 0    1
    // 1    1
    if row + 3 < rows {
        let c = [m(row + 1, col), m(row + 2, col), m(row + 3, col)]
            .iter()
            .filter(|&&hit| hit)
            .count();
        if c >= 2 {
            return true;
        }
    }

    // 101 or 110
    // 010    001
    if col + 2 < cols
        && (m(row, col + 1) || m(row + 1, col + 1))
        && (m(row, col + 2) || m(row + 1, col + 2))
    {
        return true;
    }

    // 010 or 001
    // 101    110
    if col > 1
        && (m(row, col - 1) || m(row + 1, col - 1))
        && (m(row, col - 2) || m(row + 1, col - 2))
    {
        return true;
    }

    // 1011 or 1101
    if col + 3 < cols {
        let c = [m(row, col + 1), m(row, col + 2), m(row, col + 3)]
            .iter()
            .filter(|&&hit| hit)
            .count();
        if c >= 2 {
            return true;
        }
    }

    false
}
