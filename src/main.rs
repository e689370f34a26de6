//! Terminal match-3 runner.
//!
//! Drives the simulation on a fixed tick, renders through the framebuffer
//! pipeline and translates key presses into cursor moves and swap requests.

use std::fs;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use tui_match3::core::{BoardLayout, Game, GameConfig};
use tui_match3::term::{BoardView, TerminalRenderer, ViewState, Viewport};
use tui_match3::types::{
    CellCoord, Phase, SwapOutcome, DEFAULT_COLS, DEFAULT_MERGE_SCORE, DEFAULT_PALETTE,
    DEFAULT_ROWS, SETTLE_PAUSE_MS, TICK_MS,
};

struct Options {
    board: Option<String>,
    rows: usize,
    cols: usize,
    palette: u8,
    merge_score: u32,
    seed: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            board: None,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            palette: DEFAULT_PALETTE,
            merge_score: DEFAULT_MERGE_SCORE,
            seed: seed_from_clock(),
        }
    }
}

fn seed_from_clock() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn parse_args() -> Result<Options> {
    let mut opts = Options::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let mut value = |name: &str| -> Result<String> {
            args.next().with_context(|| format!("{name} needs a value"))
        };
        match arg.as_str() {
            "--board" => opts.board = Some(value("--board")?),
            "--rows" => opts.rows = value("--rows")?.parse().context("--rows")?,
            "--cols" => opts.cols = value("--cols")?.parse().context("--cols")?,
            "--palette" => opts.palette = value("--palette")?.parse().context("--palette")?,
            "--merge-score" => {
                opts.merge_score = value("--merge-score")?.parse().context("--merge-score")?
            }
            "--seed" => opts.seed = value("--seed")?.parse().context("--seed")?,
            "--help" | "-h" => {
                println!(
                    "usage: tui-match3 [--board FILE] [--rows N] [--cols N] \
                     [--palette N] [--merge-score N] [--seed N]"
                );
                std::process::exit(0);
            }
            other => bail!("unknown flag: {other}"),
        }
    }

    Ok(opts)
}

fn load_layout(opts: &Options) -> Result<BoardLayout> {
    match &opts.board {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            let layout = if path.ends_with(".json") {
                BoardLayout::from_json(&text)?
            } else {
                BoardLayout::from_text(&text)?
            };
            Ok(layout)
        }
        None => Ok(BoardLayout::random(opts.rows, opts.cols)?),
    }
}

fn main() -> Result<()> {
    let opts = parse_args()?;
    let layout = load_layout(&opts)?;
    let game = Game::new(
        layout,
        GameConfig {
            palette: opts.palette,
            merge_score: opts.merge_score,
            seed: opts.seed,
        },
    )?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, game);
    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut game: Game) -> Result<()> {
    let view = BoardView::default();
    let mut ui = ViewState::new();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let settle_pause = Duration::from_millis(SETTLE_PAUSE_MS as u64);
    let mut last_tick = Instant::now();
    let mut phase_entered = Instant::now();
    let mut last_phase = game.phase();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game, &ui, Viewport::new(w, h));
        term.draw(&fb)?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_default();

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('n') => {
                            game.restart();
                            ui = ViewState::new();
                        }
                        KeyCode::Up => move_cursor(&mut ui, &game, -1, 0),
                        KeyCode::Down => move_cursor(&mut ui, &game, 1, 0),
                        KeyCode::Left => move_cursor(&mut ui, &game, 0, -1),
                        KeyCode::Right => move_cursor(&mut ui, &game, 0, 1),
                        KeyCode::Char(' ') | KeyCode::Enter => {
                            handle_select(&mut ui, &mut game);
                        }
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            // The animated phases hold until the pause elapses; the pause
            // restarts whenever the phase changes.
            let settled = phase_entered.elapsed() >= settle_pause;
            let phase = game.tick(settled);
            if phase != last_phase {
                last_phase = phase;
                phase_entered = Instant::now();
            }

            // Events are not animated individually yet; keep the buffer
            // from growing across ticks.
            game.drain_events();
        }
    }
}

fn move_cursor(ui: &mut ViewState, game: &Game, dr: i32, dc: i32) {
    let row = ui.cursor.row as i32 + dr;
    let col = ui.cursor.col as i32 + dc;
    if row >= 0 && (row as usize) < game.rows() && col >= 0 && (col as usize) < game.cols() {
        ui.cursor = CellCoord::new(row as usize, col as usize);
    }
}

/// Two-click selection: first press marks a piece, second on an adjacent
/// cell requests the swap. Pressing elsewhere moves the mark; any swap
/// attempt, kept or reverted, clears it.
fn handle_select(ui: &mut ViewState, game: &mut Game) {
    if game.phase() != Phase::Idle {
        return;
    }
    ui.notice = None;

    match ui.selected {
        None => ui.selected = Some(ui.cursor),
        Some(sel) if sel == ui.cursor => ui.selected = None,
        Some(sel) if sel.is_adjacent_to(&ui.cursor) => {
            match game.request_swap(sel, ui.cursor) {
                Ok(SwapOutcome::Committed { .. }) => {}
                Ok(SwapOutcome::Reverted) => ui.notice = Some("swap reverted"),
                // Rejected request (empty cell, mid-removal piece).
                Err(_) => ui.notice = Some("can't swap there"),
            }
            ui.selected = None;
        }
        Some(_) => ui.selected = Some(ui.cursor),
    }
}
