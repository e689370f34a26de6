//! Board specification input.
//!
//! A layout is the initial state of a match: dimensions plus a row-major
//! sequence of piece types, where `-1` means "random at spawn time". Two
//! external forms are accepted:
//!
//! - plain text, one row per line with comma-separated types:
//!   ```text
//!   0, 1, -1
//!   2, 2, 0
//!   ```
//! - JSON (`{"rows": 2, "cols": 3, "cells": [0, 1, -1, 2, 2, 0]}`).
//!
//! Ragged rows, bad numbers, or cell/dimension mismatches fail with
//! `MalformedBoard` before the game can start.

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::types::RANDOM_PIECE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub rows: usize,
    pub cols: usize,
    /// Row-major piece types; `-1` = random.
    pub cells: Vec<i16>,
}

impl BoardLayout {
    /// An explicit layout; `cells` must be row-major with `rows * cols`
    /// entries.
    pub fn new(rows: usize, cols: usize, cells: Vec<i16>) -> Result<Self> {
        let layout = Self { rows, cols, cells };
        layout.check_shape()?;
        Ok(layout)
    }

    /// A fully random `rows x cols` board.
    pub fn random(rows: usize, cols: usize) -> Result<Self> {
        let len = cell_count(rows, cols)?;
        Self::new(rows, cols, vec![RANDOM_PIECE; len])
    }

    /// Parse the comma/newline text form. Blank lines are ignored; every
    /// remaining line must hold the same number of entries.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut cells = Vec::new();
        let mut rows = 0usize;
        let mut cols: Option<usize> = None;

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let mut count = 0usize;
            for entry in line.split(',') {
                let value: i16 = entry.trim().parse().map_err(|_| {
                    GameError::MalformedBoard(format!("not a piece type: {:?}", entry.trim()))
                })?;
                cells.push(value);
                count += 1;
            }

            match cols {
                None => cols = Some(count),
                Some(expected) if expected != count => {
                    return Err(GameError::MalformedBoard(format!(
                        "row {} has {} columns, expected {}",
                        rows, count, expected
                    )));
                }
                Some(_) => {}
            }

            rows += 1;
        }

        Self::new(rows, cols.unwrap_or(0), cells)
    }

    /// Parse the JSON form.
    pub fn from_json(text: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(text)
            .map_err(|e| GameError::MalformedBoard(e.to_string()))?;
        layout.check_shape()?;
        Ok(layout)
    }

    /// Every explicit type must fit the configured palette.
    pub fn check_palette(&self, palette: u8) -> Result<()> {
        for (i, &t) in self.cells.iter().enumerate() {
            if t != RANDOM_PIECE && !(0..palette as i16).contains(&t) {
                return Err(GameError::MalformedBoard(format!(
                    "cell {} has type {} outside palette [0, {})",
                    i, t, palette
                )));
            }
        }
        Ok(())
    }

    fn check_shape(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::MalformedBoard(format!(
                "board must be non-empty, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.cells.len() != cell_count(self.rows, self.cols)? {
            return Err(GameError::MalformedBoard(format!(
                "{} cells for a {}x{} board",
                self.cells.len(),
                self.rows,
                self.cols
            )));
        }
        Ok(())
    }
}

/// `rows * cols`, rejecting dimensions whose product does not fit. Keeps
/// absurd board files a load error rather than an arithmetic panic.
fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        GameError::MalformedBoard(format!("board dimensions {}x{} overflow", rows, cols))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_roundtrip() {
        let layout = BoardLayout::from_text("0, 1, 2\n-1, 2, 0\n").unwrap();
        assert_eq!(layout.rows, 2);
        assert_eq!(layout.cols, 3);
        assert_eq!(layout.cells, vec![0, 1, 2, -1, 2, 0]);
    }

    #[test]
    fn test_text_skips_blank_lines() {
        let layout = BoardLayout::from_text("\n1,2\n\n3,4\n\n").unwrap();
        assert_eq!(layout.rows, 2);
        assert_eq!(layout.cols, 2);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = BoardLayout::from_text("0,1,2\n0,1\n").unwrap_err();
        assert!(matches!(err, GameError::MalformedBoard(_)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(BoardLayout::from_text("0,x,2\n").is_err());
        assert!(BoardLayout::from_text("").is_err());
    }

    #[test]
    fn test_json_form() {
        let layout =
            BoardLayout::from_json(r#"{"rows": 2, "cols": 2, "cells": [0, 1, -1, 2]}"#).unwrap();
        assert_eq!(layout.cells.len(), 4);

        // Shape mismatch is caught even when the JSON itself is valid.
        assert!(BoardLayout::from_json(r#"{"rows": 2, "cols": 2, "cells": [0]}"#).is_err());
    }

    #[test]
    fn test_huge_dimensions_rejected() {
        // Dimension products past usize must fail the load, not overflow.
        let err = BoardLayout::new(usize::MAX, 2, vec![]).unwrap_err();
        assert!(matches!(err, GameError::MalformedBoard(_)));
        assert!(BoardLayout::random(usize::MAX, 2).is_err());

        let json = format!(r#"{{"rows": {}, "cols": 2, "cells": []}}"#, u64::MAX / 2 + 1);
        let err = BoardLayout::from_json(&json).unwrap_err();
        assert!(matches!(err, GameError::MalformedBoard(_)));
    }

    #[test]
    fn test_explicit_shape_checked() {
        assert!(BoardLayout::new(2, 2, vec![0, 1, 2]).is_err());
        assert!(BoardLayout::new(0, 3, vec![]).is_err());
        assert!(BoardLayout::new(2, 2, vec![0, 1, 2, 3]).is_ok());
    }

    #[test]
    fn test_palette_check() {
        let layout = BoardLayout::new(1, 3, vec![0, -1, 4]).unwrap();
        assert!(layout.check_palette(5).is_ok());
        assert!(layout.check_palette(4).is_err());
    }

    #[test]
    fn test_random_layout() {
        let layout = BoardLayout::random(3, 4).unwrap();
        assert_eq!(layout.cells.len(), 12);
        assert!(layout.cells.iter().all(|&t| t == RANDOM_PIECE));
    }
}
