/// Terminal layout: maps between terminal cells and arena units.
///
///   row 0            HUD (score / best / keys)
///   rows 1..=h-2     arena
///   row h-1          status line
///
/// Each cell is `cell_width × cell_height` arena units. Paddle lanes sit
/// in the second and second-to-last columns so the outer columns stay a
/// scoring gap.

use crate::config::LayoutConfig;
use crate::domain::geometry::{Lane, Point, Size};
use crate::domain::paddle::Side;
use crate::sim::surface::Surface;

pub const HUD_ROWS: u16 = 1;
pub const FOOTER_ROWS: u16 = 1;

/// Anything smaller cannot hold two lanes and a gap.
const MIN_COLS: u16 = 8;
const MIN_ARENA_ROWS: u16 = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    layout: LayoutConfig,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16, layout: LayoutConfig) -> Self {
        TerminalSurface { cols, rows, layout }
    }

    /// Current terminal size, or 80×24 if it cannot be queried.
    pub fn detect(layout: &LayoutConfig) -> Self {
        let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
        Self::new(cols, rows, layout.clone())
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn arena_rows(&self) -> u16 {
        self.rows.saturating_sub(HUD_ROWS + FOOTER_ROWS)
    }

    fn fits(&self) -> bool {
        self.cols >= MIN_COLS && self.arena_rows() >= MIN_ARENA_ROWS
    }

    /// Terminal cell under the pointer → arena point (cell centre
    /// horizontally, cell top vertically). Rows above the arena clamp to 0.
    pub fn to_arena(&self, col: u16, row: u16) -> Point {
        let x = (col as f64 + 0.5) * self.layout.cell_width;
        let y = row.saturating_sub(HUD_ROWS) as f64 * self.layout.cell_height;
        Point::new(x, y)
    }

    /// Arena x → terminal column, clamped to the screen.
    pub fn col_of(&self, x: f64) -> u16 {
        let c = (x / self.layout.cell_width).floor().max(0.0) as u16;
        c.min(self.cols.saturating_sub(1))
    }

    /// Arena y → terminal row (HUD offset applied), clamped to the arena.
    pub fn row_of(&self, y: f64) -> u16 {
        let r = (y / self.layout.cell_height).floor().max(0.0) as u16;
        HUD_ROWS + r.min(self.arena_rows().saturating_sub(1))
    }

    /// Terminal rows covered by the vertical band `[y, y + height]`.
    pub fn rows_of(&self, y: f64, height: f64) -> std::ops::RangeInclusive<u16> {
        let top = self.row_of(y);
        // A band ending exactly on a cell boundary does not spill into it.
        let end = (y + height - 1e-9).max(y);
        top..=self.row_of(end)
    }
}

impl Surface for TerminalSurface {
    fn arena(&self) -> Size {
        Size::new(
            self.cols as f64 * self.layout.cell_width,
            self.arena_rows() as f64 * self.layout.cell_height,
        )
    }

    fn dot_size(&self) -> Option<Size> {
        if !self.fits() {
            return None;
        }
        Some(Size::new(self.layout.cell_width, self.layout.cell_height))
    }

    fn lane(&self, side: Side) -> Option<Lane> {
        if !self.fits() {
            return None;
        }
        let cw = self.layout.cell_width;
        let width = self.layout.paddle_width;
        let x = match side {
            Side::Left => cw,
            Side::Right => (self.cols - 1) as f64 * cw - width,
        };
        Some(Lane { x, width })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> LayoutConfig {
        LayoutConfig { cell_width: 8.0, cell_height: 16.0, paddle_width: 2.0 }
    }

    #[test]
    fn arena_excludes_hud_and_footer() {
        let s = TerminalSurface::new(80, 24, layout());
        assert_eq!(s.arena_rows(), 22);
        assert_eq!(s.arena(), Size::new(640.0, 352.0));
    }

    #[test]
    fn lanes_sit_one_column_in() {
        let s = TerminalSurface::new(80, 24, layout());
        assert_eq!(s.lane(Side::Left), Some(Lane { x: 8.0, width: 2.0 }));
        assert_eq!(s.lane(Side::Right), Some(Lane { x: 630.0, width: 2.0 }));
        assert_eq!(s.col_of(8.0), 1);
        assert_eq!(s.col_of(630.0), 78);

        // Wider than a cell is kept as configured.
        let wide = LayoutConfig { paddle_width: 10.0, ..layout() };
        let s = TerminalSurface::new(80, 24, wide);
        assert_eq!(s.lane(Side::Left), Some(Lane { x: 8.0, width: 10.0 }));
        assert_eq!(s.lane(Side::Right), Some(Lane { x: 622.0, width: 10.0 }));
    }

    #[test]
    fn tiny_terminal_has_no_targets() {
        let s = TerminalSurface::new(6, 24, layout());
        assert_eq!(s.dot_size(), None);
        assert_eq!(s.lane(Side::Left), None);
        let s = TerminalSurface::new(80, 4, layout());
        assert_eq!(s.lane(Side::Right), None);
    }

    #[test]
    fn pointer_maps_to_arena() {
        let s = TerminalSurface::new(80, 24, layout());
        assert_eq!(s.to_arena(0, 0), Point::new(4.0, 0.0));
        assert_eq!(s.to_arena(10, 3), Point::new(84.0, 32.0));
    }

    #[test]
    fn rows_cover_paddle_band() {
        let s = TerminalSurface::new(80, 24, layout());
        // 100 units tall starting at 0: cells 0..=6 of the arena
        assert_eq!(s.rows_of(0.0, 100.0), 1..=7);
        // exactly two cells
        assert_eq!(s.rows_of(16.0, 32.0), 2..=3);
        // clamped to the last arena row
        assert_eq!(s.row_of(10_000.0), 22);
    }
}
