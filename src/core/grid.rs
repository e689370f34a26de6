//! Grid module - the single owner of all piece slots.
//!
//! Flat row-major storage (`index(r, c) = r * cols + c`) for cache locality,
//! plus an id -> slot lookup so collaborators can address pieces by stable
//! id instead of holding references into the board. Writing a piece into a
//! cell updates the piece's stored coordinates; pieces are coordinate-aware
//! and locate themselves in O(1).
//!
//! Bounds are enforced loudly at this layer; nothing else is. Type
//! consistency is the caller's responsibility.

use std::collections::HashMap;

use crate::core::error::{GameError, Result};
use crate::core::piece::Piece;
use crate::types::{CellCoord, PieceId};

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major cells; `None` = empty slot.
    cells: Vec<Option<Piece>>,
    /// Stable id -> flat index. "Destroying" a piece is removing its entry.
    lookup: HashMap<PieceId, usize>,
}

impl Grid {
    /// Create an empty grid. Dimensions must be positive; layouts are
    /// validated before this is reached.
    pub fn new(rows: usize, cols: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            lookup: HashMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Flat index for (row, col), or `OutOfBounds`.
    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(GameError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    /// Cell contents at (row, col); fails loudly outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<&Piece>> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx].as_ref())
    }

    /// Overwrite a cell unconditionally. A piece written here has its
    /// stored coordinates updated to (row, col); a piece overwritten here
    /// is dropped from the id lookup.
    pub fn set(&mut self, row: usize, col: usize, piece: Option<Piece>) -> Result<()> {
        let idx = self.index(row, col)?;

        if let Some(old) = self.cells[idx].take() {
            self.lookup.remove(&old.id);
        }

        self.cells[idx] = piece.map(|mut p| {
            p.row = row;
            p.col = col;
            self.lookup.insert(p.id, idx);
            p
        });

        Ok(())
    }

    /// Remove and return the piece at (row, col), leaving the cell empty.
    pub fn take(&mut self, row: usize, col: usize) -> Result<Option<Piece>> {
        let idx = self.index(row, col)?;
        let piece = self.cells[idx].take();
        if let Some(ref p) = piece {
            self.lookup.remove(&p.id);
        }
        Ok(piece)
    }

    /// Exchange the contents of two cells, fixing up coordinates and the
    /// id lookup for whichever slots are occupied.
    pub fn swap(&mut self, a: CellCoord, b: CellCoord) -> Result<()> {
        let ia = self.index(a.row, a.col)?;
        let ib = self.index(b.row, b.col)?;
        if ia == ib {
            return Ok(());
        }

        self.cells.swap(ia, ib);

        if let Some(p) = self.cells[ia].as_mut() {
            p.row = a.row;
            p.col = a.col;
            self.lookup.insert(p.id, ia);
        }
        if let Some(p) = self.cells[ib].as_mut() {
            p.row = b.row;
            p.col = b.col;
            self.lookup.insert(p.id, ib);
        }

        Ok(())
    }

    /// Where a piece currently sits, by id. `None` once removed.
    pub fn locate(&self, id: PieceId) -> Option<CellCoord> {
        self.lookup
            .get(&id)
            .map(|&idx| CellCoord::new(idx / self.cols, idx % self.cols))
    }

    /// The piece with the given id, if it is still on the board.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.lookup.get(&id).and_then(|&idx| self.cells[idx].as_ref())
    }

    /// Drop every piece marked `removed`, leaving their cells empty.
    pub fn purge_removed(&mut self) {
        for cell in &mut self.cells {
            if cell.map(|p| p.removed).unwrap_or(false) {
                if let Some(p) = cell.take() {
                    self.lookup.remove(&p.id);
                }
            }
        }
    }

    /// Count of occupied cells.
    pub fn piece_count(&self) -> usize {
        self.lookup.len()
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().filter_map(|c| c.as_ref())
    }

    /// Internal write for callers whose coordinates are valid by
    /// construction (initial population, spawn-fill).
    pub(crate) fn place(&mut self, row: usize, col: usize, piece: Piece) {
        debug_assert!(row < self.rows && col < self.cols);
        let idx = row * self.cols + col;
        if let Some(old) = self.cells[idx].take() {
            self.lookup.remove(&old.id);
        }
        let mut p = piece;
        p.row = row;
        p.col = col;
        self.lookup.insert(p.id, idx);
        self.cells[idx] = Some(p);
    }

    /// Internal move into an empty cell (gravity settling).
    pub(crate) fn relocate(&mut self, from: CellCoord, to: CellCoord) {
        debug_assert!(from.row < self.rows && from.col < self.cols);
        debug_assert!(to.row < self.rows && to.col < self.cols);
        let ifrom = from.row * self.cols + from.col;
        let ito = to.row * self.cols + to.col;
        debug_assert!(self.cells[ito].is_none());
        if let Some(mut p) = self.cells[ifrom].take() {
            p.row = to.row;
            p.col = to.col;
            self.lookup.insert(p.id, ito);
            self.cells[ito] = Some(p);
        }
    }

    /// Internal accessor for scanners that have already established bounds.
    pub(crate) fn piece_at(&self, row: usize, col: usize) -> Option<&Piece> {
        debug_assert!(row < self.rows && col < self.cols);
        self.cells[row * self.cols + col].as_ref()
    }

    pub(crate) fn piece_at_mut(&mut self, row: usize, col: usize) -> Option<&mut Piece> {
        debug_assert!(row < self.rows && col < self.cols);
        self.cells[row * self.cols + col].as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::PieceFactory;
    use crate::types::PieceType;

    fn grid_with(rows: usize, cols: usize, placed: &[(usize, usize, i16)]) -> (Grid, PieceFactory) {
        let mut grid = Grid::new(rows, cols);
        let mut factory = PieceFactory::new(1, 8);
        for &(r, c, t) in placed {
            let piece = factory.create(t);
            grid.set(r, c, Some(piece)).unwrap();
        }
        (grid, factory)
    }

    #[test]
    fn test_out_of_bounds_is_loud() {
        let grid = Grid::new(3, 4);
        assert!(grid.get(2, 3).is_ok());
        assert_eq!(
            grid.get(3, 0),
            Err(GameError::OutOfBounds {
                row: 3,
                col: 0,
                rows: 3,
                cols: 4
            })
        );
        assert!(grid.get(0, 4).is_err());
    }

    #[test]
    fn test_set_updates_piece_coordinates() {
        let (mut grid, mut factory) = grid_with(4, 4, &[]);
        let piece = factory.create(2);
        let id = piece.id;

        grid.set(2, 3, Some(piece)).unwrap();

        let stored = grid.get(2, 3).unwrap().unwrap();
        assert_eq!(stored.row, 2);
        assert_eq!(stored.col, 3);
        assert_eq!(grid.locate(id), Some(CellCoord::new(2, 3)));
    }

    #[test]
    fn test_overwrite_drops_old_id() {
        let (mut grid, mut factory) = grid_with(2, 2, &[(0, 0, 1)]);
        let old_id = grid.get(0, 0).unwrap().unwrap().id;

        let replacement = factory.create(2);
        let new_id = replacement.id;
        grid.set(0, 0, Some(replacement)).unwrap();

        assert_eq!(grid.locate(old_id), None);
        assert_eq!(grid.locate(new_id), Some(CellCoord::new(0, 0)));
        assert_eq!(grid.piece_count(), 1);
    }

    #[test]
    fn test_take_clears_cell_and_lookup() {
        let (mut grid, _) = grid_with(2, 2, &[(1, 1, 0)]);
        let id = grid.get(1, 1).unwrap().unwrap().id;

        let taken = grid.take(1, 1).unwrap().unwrap();
        assert_eq!(taken.id, id);
        assert!(grid.get(1, 1).unwrap().is_none());
        assert_eq!(grid.locate(id), None);
    }

    #[test]
    fn test_swap_fixes_coords_and_lookup() {
        let (mut grid, _) = grid_with(3, 3, &[(0, 0, 1), (0, 1, 2)]);
        let a_id = grid.get(0, 0).unwrap().unwrap().id;
        let b_id = grid.get(0, 1).unwrap().unwrap().id;

        grid.swap(CellCoord::new(0, 0), CellCoord::new(0, 1)).unwrap();

        assert_eq!(grid.locate(a_id), Some(CellCoord::new(0, 1)));
        assert_eq!(grid.locate(b_id), Some(CellCoord::new(0, 0)));
        assert_eq!(grid.get(0, 0).unwrap().unwrap().piece_type, PieceType(2));
        assert_eq!(grid.get(0, 1).unwrap().unwrap().piece_type, PieceType(1));
    }

    #[test]
    fn test_swap_with_empty_cell() {
        let (mut grid, _) = grid_with(3, 3, &[(2, 0, 4)]);
        let id = grid.get(2, 0).unwrap().unwrap().id;

        grid.swap(CellCoord::new(2, 0), CellCoord::new(1, 0)).unwrap();

        assert!(grid.get(2, 0).unwrap().is_none());
        assert_eq!(grid.locate(id), Some(CellCoord::new(1, 0)));
    }

    #[test]
    fn test_purge_removed() {
        let (mut grid, _) = grid_with(2, 2, &[(0, 0, 1), (0, 1, 1), (1, 0, 2)]);
        let removed_id = grid.get(0, 0).unwrap().unwrap().id;
        grid.piece_at_mut(0, 0).unwrap().removed = true;

        grid.purge_removed();

        assert!(grid.get(0, 0).unwrap().is_none());
        assert_eq!(grid.locate(removed_id), None);
        assert_eq!(grid.piece_count(), 2);
    }

    #[test]
    fn test_pieces_iterates_row_major() {
        let (grid, _) = grid_with(2, 2, &[(1, 0, 3), (0, 1, 2)]);
        let coords: Vec<_> = grid.pieces().map(|p| (p.row, p.col)).collect();
        assert_eq!(coords, vec![(0, 1), (1, 0)]);
    }
}
