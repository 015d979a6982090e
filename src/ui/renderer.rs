/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Paused and game-over frames are drawn with a dimmed palette and an
/// overlay box on top.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::heading::{Heading, Horizontal, Vertical};
use crate::domain::paddle::{Feedback, Paddle, Side};
use crate::sim::state::{GameState, Phase};
use crate::sim::surface::Surface;
use super::layout::{TerminalSurface, HUD_ROWS};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BASE_BG: Color = Color::Rgb { r: 18, g: 18, b: 28 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel cell used to invalidate the back buffer.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    fn put_centered(&mut self, y: usize, s: &str, fg: Color, bg: Color) {
        let len = s.chars().count();
        let x = self.width.saturating_sub(len) / 2;
        self.put_str(x, y, s, fg, bg);
    }
}

// ── Palette ──

struct Palette {
    text: Color,
    muted: Color,
    dot: Color,
    paddle: Color,
    hit: Color,
    miss: Color,
    wall: Color,
}

const BRIGHT: Palette = Palette {
    text: Color::White,
    muted: Color::Rgb { r: 120, g: 120, b: 140 },
    dot: Color::Rgb { r: 255, g: 220, b: 60 },
    paddle: Color::Rgb { r: 220, g: 220, b: 230 },
    hit: Color::Rgb { r: 80, g: 255, b: 80 },
    miss: Color::Rgb { r: 255, g: 70, b: 70 },
    wall: Color::Rgb { r: 60, g: 60, b: 80 },
};

/// Half-brightness palette for Paused / Over.
const DIM: Palette = Palette {
    text: Color::Rgb { r: 128, g: 128, b: 128 },
    muted: Color::Rgb { r: 60, g: 60, b: 70 },
    dot: Color::Rgb { r: 128, g: 110, b: 30 },
    paddle: Color::Rgb { r: 110, g: 110, b: 115 },
    hit: Color::Rgb { r: 40, g: 128, b: 40 },
    miss: Color::Rgb { r: 128, g: 35, b: 35 },
    wall: Color::Rgb { r: 35, g: 35, b: 45 },
};

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;
        // Force full repaint on first frame.
        self.back.cells.fill(Cell::INVALID);
        Ok(())
    }

    /// Restore the terminal. Safe to call after a partial `init`; raw
    /// mode is released even if the screen commands fail.
    pub fn cleanup(&mut self) -> io::Result<()> {
        let screen = execute!(
            self.writer,
            ResetColor,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        and_always(screen, terminal::disable_raw_mode)
    }

    pub fn render(&mut self, state: &GameState, best: i64, surface: &TerminalSurface) -> io::Result<()> {
        let (tw, th) = (surface.cols() as usize, surface.rows() as usize);
        if tw != self.front.width || th != self.front.height {
            self.front.resize(tw, th);
            self.back.resize(tw, th);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        if self.last_phase != Some(state.phase) {
            self.back.cells.fill(Cell::INVALID);
            self.last_phase = Some(state.phase);
        }

        self.front.clear();
        compose(&mut self.front, state, best, surface);

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut next_pos: Option<(usize, usize)> = None;

        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    continue;
                }
                if next_pos != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                next_pos = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }
}

/// Run `then` whatever `first` returned; the first error wins.
fn and_always(first: io::Result<()>, then: impl FnOnce() -> io::Result<()>) -> io::Result<()> {
    let second = then();
    first.and(second)
}

// ── Compose: build front buffer content ──

fn compose(buf: &mut FrameBuffer, state: &GameState, best: i64, surface: &TerminalSurface) {
    let pal = if state.phase == Phase::Running { &BRIGHT } else { &DIM };
    let bg = Cell::BASE_BG;

    // HUD
    let heading = state.dot.heading.unwrap_or_default();
    let hud = format!(
        " Score: {:<6} Best: {:<6} Speed: {:<4.1} Heading: {}",
        state.score.score, best, state.dot.distance, heading.tag()
    );
    buf.put_str(0, 0, &hud, pal.text, bg);

    if surface.dot_size().is_none() {
        buf.put_str(0, HUD_ROWS as usize, "Terminal too small", BRIGHT.miss, bg);
        return;
    }

    // Side gaps: the scoring edges
    for row in surface.row_of(0.0)..=surface.row_of(f64::MAX) {
        buf.set(0, row as usize, Cell::new('│', pal.wall, bg));
        buf.set(buf.width.saturating_sub(1), row as usize, Cell::new('│', pal.wall, bg));
    }

    for side in [Side::Left, Side::Right] {
        compose_paddle(buf, state.paddles.get(side), surface, pal);
    }

    let dx = surface.col_of(state.dot.pos.x) as usize;
    let dy = surface.row_of(state.dot.pos.y) as usize;
    buf.set(dx, dy, Cell::new(dot_glyph(heading), pal.dot, bg));

    // Footer
    let footer_row = buf.height.saturating_sub(1);
    let footer = match state.phase {
        Phase::Running => " Move mouse: paddles   P: pause   Q: quit",
        Phase::Paused => " P: resume   Q: quit",
        Phase::Over => " Click: new game   Q: quit",
    };
    buf.put_str(0, footer_row, footer, pal.muted, bg);

    match state.phase {
        Phase::Running => {}
        Phase::Paused => compose_overlay(buf, &["PAUSED", "", "press P to resume"]),
        Phase::Over => {
            let best_line = format!("best: {}", best.max(state.score.highest));
            compose_overlay(buf, &["GAME OVER", "", &best_line, "click anywhere to play again"]);
        }
    }
}

fn dot_glyph(heading: Heading) -> char {
    match (heading.vertical, heading.horizontal) {
        (Vertical::Up, Horizontal::Left) => '◤',
        (Vertical::Up, Horizontal::Right) => '◥',
        (Vertical::Down, Horizontal::Left) => '◣',
        (Vertical::Down, Horizontal::Right) => '◢',
    }
}

fn compose_paddle(buf: &mut FrameBuffer, paddle: &Paddle, surface: &TerminalSurface, pal: &Palette) {
    let lane = match surface.lane(paddle.side) {
        Some(l) => l,
        None => return,
    };
    let col = surface.col_of(lane.x) as usize;
    let color = match paddle.feedback {
        Feedback::Neutral => pal.paddle,
        Feedback::Hit => pal.hit,
        Feedback::Miss => pal.miss,
    };
    for row in surface.rows_of(paddle.y, paddle.height) {
        buf.set(col, row as usize, Cell::new('█', color, Cell::BASE_BG));
    }
}

fn compose_overlay(buf: &mut FrameBuffer, lines: &[&str]) {
    let hdr = Color::Rgb { r: 255, g: 220, b: 50 };
    let box_bg = Color::Rgb { r: 40, g: 40, b: 40 };
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    let box_h = lines.len() + 2;
    let x0 = buf.width.saturating_sub(inner) / 2;
    let y0 = buf.height.saturating_sub(box_h) / 2;

    for y in y0..y0 + box_h {
        for x in x0..x0 + inner {
            buf.set(x, y, Cell::new(' ', Color::White, box_bg));
        }
    }
    for (i, line) in lines.iter().enumerate() {
        let fg = if i == 0 { hdr } else { Color::White };
        buf.put_centered(y0 + 1 + i, line, fg, box_bg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::domain::difficulty::Tuning;
    use crate::domain::geometry::Point;

    fn surface() -> TerminalSurface {
        TerminalSurface::new(80, 24, LayoutConfig { cell_width: 8.0, cell_height: 16.0, paddle_width: 2.0 })
    }

    fn frame(state: &GameState, best: i64) -> FrameBuffer {
        let s = surface();
        let mut buf = FrameBuffer::new(80, 24);
        compose(&mut buf, state, best, &s);
        buf
    }

    fn row_text(buf: &FrameBuffer, y: usize) -> String {
        (0..buf.width).map(|x| buf.get(x, y).ch).collect()
    }

    #[test]
    fn draws_dot_paddles_and_hud() {
        let s = surface();
        let mut state = GameState::new(s.arena(), &Tuning::default());
        state.dot.pos = Point::new(320.0, 160.0);
        state.score.score = 14;
        let buf = frame(&state, 30);

        assert_eq!(buf.get(40, 11).ch, '◢');
        // paddles: 100 units tall from the top → arena rows 0..=6
        for row in 1..=7 {
            assert_eq!(buf.get(1, row).ch, '█');
            assert_eq!(buf.get(78, row).ch, '█');
        }
        assert_eq!(buf.get(1, 8).ch, ' ');
        let hud = row_text(&buf, 0);
        assert!(hud.contains("Score: 14"));
        assert!(hud.contains("Best: 30"));
        assert!(hud.contains("Heading: bottom right"));
    }

    #[test]
    fn dot_glyph_and_hud_follow_heading() {
        let s = surface();
        let mut state = GameState::new(s.arena(), &Tuning::default());
        state.dot.pos = Point::new(320.0, 160.0);
        state.dot.heading = Some(Heading::new(Vertical::Up, Horizontal::Left));
        let buf = frame(&state, 0);
        assert_eq!(buf.get(40, 11).ch, '◤');
        assert!(row_text(&buf, 0).contains("Heading: top left"));
    }

    #[test]
    fn restore_step_runs_after_failed_screen_reset() {
        let mut ran = false;
        let res = and_always(Err(io::Error::other("screen")), || {
            ran = true;
            Ok(())
        });
        assert!(ran);
        assert_eq!(res.unwrap_err().to_string(), "screen");

        let res = and_always(Ok(()), || Err(io::Error::other("raw")));
        assert_eq!(res.unwrap_err().to_string(), "raw");
    }

    #[test]
    fn feedback_colours_paddle() {
        let s = surface();
        let mut state = GameState::new(s.arena(), &Tuning::default());
        state.paddles.left.feedback = Feedback::Hit;
        state.paddles.right.feedback = Feedback::Miss;
        let buf = frame(&state, 0);
        assert_eq!(buf.get(1, 1).fg, BRIGHT.hit);
        assert_eq!(buf.get(78, 1).fg, BRIGHT.miss);
    }

    #[test]
    fn paused_frame_is_dimmed_with_overlay() {
        let s = surface();
        let mut state = GameState::new(s.arena(), &Tuning::default());
        state.phase = Phase::Paused;
        let buf = frame(&state, 0);
        assert_eq!(buf.get(1, 1).fg, DIM.paddle);
        assert!((0..buf.height).any(|y| row_text(&buf, y).contains("PAUSED")));
    }

    #[test]
    fn game_over_overlay() {
        let s = surface();
        let mut state = GameState::new(s.arena(), &Tuning::default());
        state.phase = Phase::Over;
        state.score.highest = 18;
        let buf = frame(&state, 12);
        assert!((0..buf.height).any(|y| row_text(&buf, y).contains("GAME OVER")));
        assert!((0..buf.height).any(|y| row_text(&buf, y).contains("best: 18")));
    }

    #[test]
    fn tiny_terminal_shows_notice() {
        let s = TerminalSurface::new(6, 24, LayoutConfig { cell_width: 8.0, cell_height: 16.0, paddle_width: 2.0 });
        let state = GameState::new(s.arena(), &Tuning::default());
        let mut buf = FrameBuffer::new(6, 24);
        compose(&mut buf, &state, 0, &s);
        assert_eq!(row_text(&buf, 1), "Termin");
    }
}
