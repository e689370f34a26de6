//! Maps a [`Game`] into a terminal framebuffer.
//!
//! Pure (no I/O), so the layout logic is unit-testable. The view draws the
//! board centered with a box border, a cursor/selection highlight, and a
//! side panel with the score and phase. Pieces mid-merge render dimmed so
//! the removal reads as a flash before the cascade.

use crate::core::Game;
use crate::term::fb::{FrameBuffer, Rgb, Style};
use crate::types::{CellCoord, Phase};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Cursor, pending selection and the last outcome worth telling the
/// player about, owned by the input loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub cursor: CellCoord,
    pub selected: Option<CellCoord>,
    /// One-line status shown in the side panel until the next action.
    pub notice: Option<&'static str>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            cursor: CellCoord::new(0, 0),
            selected: None,
            notice: None,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

const BOARD_BG: Rgb = Rgb::new(26, 26, 34);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 95);
const SELECTED_BG: Rgb = Rgb::new(110, 80, 30);

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    pub fn render(&self, game: &Game, ui: &ViewState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_px_w = (game.cols() as u16) * self.cell_w;
        let board_px_h = (game.rows() as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = Style {
            fg: Rgb::new(200, 200, 200),
            ..Style::default()
        };

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            board_px_w,
            board_px_h,
            ' ',
            Style {
                bg: BOARD_BG,
                ..Style::default()
            },
        );
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..game.rows() {
            for col in 0..game.cols() {
                let cell = CellCoord::new(row, col);
                let bg = if ui.selected == Some(cell) {
                    SELECTED_BG
                } else if ui.cursor == cell {
                    CURSOR_BG
                } else {
                    BOARD_BG
                };

                // cell_at is total over the board dimensions here.
                let piece = game.cell_at(row, col).ok().flatten();
                let (ch, style) = match piece {
                    Some(p) if p.merging => (
                        '▒',
                        Style {
                            fg: piece_color(p.piece_type.0),
                            bg,
                            bold: false,
                            dim: true,
                        },
                    ),
                    Some(p) => (
                        '█',
                        Style {
                            fg: piece_color(p.piece_type.0),
                            bg,
                            bold: true,
                            dim: false,
                        },
                    ),
                    None => (
                        '·',
                        Style {
                            fg: Rgb::new(90, 90, 100),
                            bg,
                            bold: false,
                            dim: true,
                        },
                    ),
                };

                let px = start_x + 1 + (col as u16) * self.cell_w;
                let py = start_y + 1 + (row as u16) * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        self.draw_side_panel(&mut fb, game, ui, viewport, start_x, start_y, frame_w);

        if game.phase() == Phase::GameOver {
            self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put(x, y, '┌', style);
        fb.put(x + w - 1, y, '┐', style);
        fb.put(x, y + h - 1, '└', style);
        fb.put(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put(x + dx, y, '─', style);
            fb.put(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, '│', style);
            fb.put(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        game: &Game,
        ui: &ViewState,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = Style {
            bold: true,
            ..Style::default()
        };
        let value = Style {
            fg: Rgb::new(200, 200, 200),
            ..Style::default()
        };
        let help = Style {
            dim: true,
            ..value
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &game.score().to_string(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PHASE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, game.phase().as_str(), value);
        y = y.saturating_add(2);

        if let Some(notice) = ui.notice {
            fb.put_str(
                panel_x,
                y,
                notice,
                Style {
                    fg: Rgb::new(240, 200, 100),
                    ..Style::default()
                },
            );
            y = y.saturating_add(2);
        }

        for line in [
            "arrows  move",
            "space   select/swap",
            "n       new game",
            "q       quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = Style {
            fg: Rgb::new(255, 255, 255),
            bold: true,
            ..Style::default()
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Fixed 8-color cycle; palettes larger than 8 reuse colors.
fn piece_color(piece_type: u8) -> Rgb {
    match piece_type % 8 {
        0 => Rgb::new(220, 80, 80),
        1 => Rgb::new(100, 220, 120),
        2 => Rgb::new(80, 120, 220),
        3 => Rgb::new(240, 220, 80),
        4 => Rgb::new(200, 120, 220),
        5 => Rgb::new(80, 220, 220),
        6 => Rgb::new(255, 165, 0),
        _ => Rgb::new(230, 230, 230),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardLayout, Game, GameConfig};

    fn game() -> Game {
        let layout = BoardLayout::new(3, 3, vec![0, 1, 2, 1, 0, 2, 0, 1, 0]).unwrap();
        Game::new(layout, GameConfig::default()).unwrap()
    }

    fn contains_text(fb: &FrameBuffer, needle: &str) -> bool {
        let w = fb.width();
        let first = match needle.chars().next() {
            Some(c) => c,
            None => return true,
        };
        for y in 0..fb.height() {
            for x in 0..w {
                if fb.get(x, y).map(|g| g.ch) != Some(first) {
                    continue;
                }
                let run: String = (x..w.min(x + needle.chars().count() as u16))
                    .filter_map(|cx| fb.get(cx, y).map(|g| g.ch))
                    .collect();
                if run == needle {
                    return true;
                }
            }
        }
        false
    }

    #[test]
    fn test_render_fills_viewport() {
        let fb = BoardView::default().render(&game(), &ViewState::new(), Viewport::new(60, 20));
        assert_eq!(fb.width(), 60);
        assert_eq!(fb.height(), 20);
        assert!(contains_text(&fb, "SCORE"));
        assert!(contains_text(&fb, "PHASE"));
    }

    #[test]
    fn test_cursor_is_highlighted() {
        let view = BoardView::default();
        let mut ui = ViewState::new();
        ui.cursor = CellCoord::new(0, 0);
        let fb = view.render(&game(), &ui, Viewport::new(60, 20));

        let mut cursor_cells = 0;
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.get(x, y).map(|g| g.style.bg) == Some(CURSOR_BG) {
                    cursor_cells += 1;
                }
            }
        }
        // One board cell, two terminal columns wide.
        assert_eq!(cursor_cells, 2);
    }

    #[test]
    fn test_notice_line_is_shown() {
        let mut ui = ViewState::new();
        ui.notice = Some("swap reverted");
        let fb = BoardView::default().render(&game(), &ui, Viewport::new(60, 20));
        assert!(contains_text(&fb, "swap reverted"));

        ui.notice = None;
        let fb = BoardView::default().render(&game(), &ui, Viewport::new(60, 20));
        assert!(!contains_text(&fb, "swap reverted"));
    }

    #[test]
    fn test_game_over_overlay() {
        let layout = BoardLayout::new(3, 3, vec![0, 1, 2, 1, 2, 0, 2, 0, 1]).unwrap();
        let mut g = Game::new(
            layout,
            GameConfig {
                palette: 3,
                ..GameConfig::default()
            },
        )
        .unwrap();
        g.settle();
        assert_eq!(g.phase(), Phase::GameOver);

        let fb = BoardView::default().render(&g, &ViewState::new(), Viewport::new(60, 20));
        assert!(contains_text(&fb, "GAME OVER"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let fb = BoardView::default().render(&game(), &ViewState::new(), Viewport::new(4, 2));
        assert_eq!(fb.width(), 4);
    }
}
