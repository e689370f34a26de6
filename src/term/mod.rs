//! Terminal rendering layer.
//!
//! Renders into a plain framebuffer and flushes it with crossterm; no
//! widget/layout machinery. The view code is pure so it can be tested
//! without a terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{BoardView, ViewState, Viewport};
pub use renderer::TerminalRenderer;
