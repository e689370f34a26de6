//! Piece values and the factory that creates them.
//!
//! A piece is plain data: a stable id, a type, its current coordinates and
//! two lifecycle flags. Pieces never own behavior - they are written into
//! grid cells and relocated by the cascade.
//!
//! The factory resolves the `-1` "random type" request exactly once, at
//! spawn time; the sentinel is never stored on a piece.

use crate::core::rng::SimpleRng;
use crate::types::{PieceId, PieceType, RANDOM_PIECE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub piece_type: PieceType,
    /// Current row; kept in sync by `Grid::set` so a piece can locate
    /// itself in O(1).
    pub row: usize,
    /// Current column (see `row`).
    pub col: usize,
    /// Marked for removal; still occupies its cell until the cascade
    /// clears it.
    pub removed: bool,
    /// In the removal-animation window. Observed by the presentation
    /// layer, never read by the simulation.
    pub merging: bool,
}

impl Piece {
    fn new(id: PieceId, piece_type: PieceType) -> Self {
        Self {
            id,
            piece_type,
            row: 0,
            col: 0,
            removed: false,
            merging: false,
        }
    }

    pub fn coord(&self) -> crate::types::CellCoord {
        crate::types::CellCoord::new(self.row, self.col)
    }
}

/// Creates pieces with fresh ids, resolving random-type requests against
/// the configured palette.
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: SimpleRng,
    palette: u8,
    next_id: u32,
}

impl PieceFactory {
    pub fn new(seed: u32, palette: u8) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            palette: palette.max(1),
            next_id: 1,
        }
    }

    pub fn palette(&self) -> u8 {
        self.palette
    }

    /// Create a piece of the requested type; `RANDOM_PIECE` (-1) draws
    /// uniformly from `[0, palette)`.
    pub fn create(&mut self, requested: i16) -> Piece {
        let piece_type = if requested == RANDOM_PIECE {
            PieceType(self.rng.next_range(self.palette as u32) as u8)
        } else {
            PieceType(requested as u8)
        };

        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        Piece::new(id, piece_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_type_is_kept() {
        let mut factory = PieceFactory::new(1, 5);
        let piece = factory.create(3);
        assert_eq!(piece.piece_type, PieceType(3));
        assert!(!piece.removed);
        assert!(!piece.merging);
    }

    #[test]
    fn random_request_draws_from_palette() {
        let mut factory = PieceFactory::new(42, 3);
        for _ in 0..200 {
            let piece = factory.create(RANDOM_PIECE);
            assert!(piece.piece_type.0 < 3);
        }
    }

    #[test]
    fn ids_are_unique_and_monotonic() {
        let mut factory = PieceFactory::new(1, 5);
        let a = factory.create(0);
        let b = factory.create(0);
        let c = factory.create(RANDOM_PIECE);
        assert!(a.id < b.id);
        assert!(b.id < c.id);
    }

    #[test]
    fn same_seed_same_types() {
        let mut f1 = PieceFactory::new(99, 5);
        let mut f2 = PieceFactory::new(99, 5);
        for _ in 0..50 {
            assert_eq!(
                f1.create(RANDOM_PIECE).piece_type,
                f2.create(RANDOM_PIECE).piece_type
            );
        }
    }
}
