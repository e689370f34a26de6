//! Cascade resolution: gravity compaction and spawn-fill.
//!
//! Both passes work column by column and are idempotent once no
//! empty-under-occupied or empty-at-top condition remains; the state
//! machine loops them against the merge check until a full pass changes
//! nothing.

use crate::core::grid::Grid;
use crate::core::piece::PieceFactory;
use crate::types::{CellCoord, PieceId, PieceType, RANDOM_PIECE};

/// A piece settled downward by compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceMove {
    pub id: PieceId,
    pub from: CellCoord,
    pub to: CellCoord,
}

/// A piece created by spawn-fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedPiece {
    pub id: PieceId,
    pub cell: CellCoord,
    pub piece_type: PieceType,
    /// Negative row the presentation drops the piece in from; `-1` for the
    /// deepest cell filled in the column, `-2` for the one above, and so on.
    pub spawn_row: i32,
}

/// Settle every piece to the lowest empty row reachable in its column.
///
/// Scans each column bottom-up, so a stack of floating pieces lands in
/// order without re-visiting. Columns are independent; their order does
/// not affect the result.
pub fn compact(grid: &mut Grid) -> Vec<PieceMove> {
    let mut moves = Vec::new();

    for col in 0..grid.cols() {
        for row in (0..grid.rows()).rev() {
            let Some(piece) = grid.piece_at(row, col) else {
                continue;
            };
            let id = piece.id;

            let mut target = row;
            while target + 1 < grid.rows() && grid.piece_at(target + 1, col).is_none() {
                target += 1;
            }

            if target != row {
                let from = CellCoord::new(row, col);
                let to = CellCoord::new(target, col);
                grid.relocate(from, to);
                moves.push(PieceMove { id, from, to });
            }
        }
    }

    moves
}

/// Fill the run of empty cells at the top of each column with fresh
/// random-typed pieces.
///
/// Only reaches cells gravity cannot: after [`compact`], every hole in a
/// column sits at its top. Fill order is bottom-up so the deepest new piece
/// gets spawn row -1.
pub fn spawn_fill(grid: &mut Grid, factory: &mut PieceFactory) -> Vec<SpawnedPiece> {
    let mut spawned = Vec::new();

    for col in 0..grid.cols() {
        // Deepest empty row reachable from above the grid.
        let mut bottom: Option<usize> = None;
        for row in 0..grid.rows() {
            if grid.piece_at(row, col).is_some() {
                break;
            }
            bottom = Some(row);
        }
        let Some(bottom) = bottom else {
            continue;
        };

        let mut offset: i32 = -1;
        for row in (0..=bottom).rev() {
            let piece = factory.create(RANDOM_PIECE);
            let cell = CellCoord::new(row, col);
            spawned.push(SpawnedPiece {
                id: piece.id,
                cell,
                piece_type: piece.piece_type,
                spawn_row: offset,
            });
            grid.place(row, col, piece);
            offset -= 1;
        }
    }

    spawned
}
