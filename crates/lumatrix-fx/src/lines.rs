#![forbid(unsafe_code)]

//! Sweeping lines.
//!
//! One full-width horizontal line and one full-height vertical line sweep
//! back and forth across the matrix, each bouncing off its pair of edges.
//! A line picks up a new palette color on every bounce.

use lumatrix_render::PixelGrid;
use web_time::Instant;

use crate::engine::{EffectCore, MatrixEffect};

use std::time::Duration;

/// Default interval between sweep steps.
pub const DEFAULT_LINES_DELAY: Duration = Duration::from_millis(150);
/// Palette positions advanced per bounce.
const BOUNCE_COLOR_STEP: u8 = 16;

/// Position plus direction of travel for one sweeping line.
#[derive(Clone, Copy, Debug)]
struct Sweep {
    pos: u8,
    dir: i8,
    color_pos: u8,
}

impl Sweep {
    const fn new() -> Self {
        Self {
            pos: 0,
            dir: 1,
            color_pos: 0,
        }
    }

    /// Advance one step across `0..extent`, reversing at either edge and
    /// rotating the color when reversing.
    fn step(&mut self, extent: u8) {
        if extent <= 1 {
            return;
        }
        let next = self.pos as i16 + self.dir as i16;
        if next < 0 || next >= extent as i16 {
            self.dir = -self.dir;
            self.color_pos = self.color_pos.wrapping_add(BOUNCE_COLOR_STEP);
        }
        self.pos = (self.pos as i16 + self.dir as i16).clamp(0, extent as i16 - 1) as u8;
    }
}

pub struct LinesEffect {
    core: EffectCore,
    row: Sweep,
    col: Sweep,
}

impl Default for LinesEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl LinesEffect {
    pub fn new() -> Self {
        Self {
            core: EffectCore::new(DEFAULT_LINES_DELAY),
            row: Sweep::new(),
            col: Sweep::new(),
        }
    }

    fn draw(&self, grid: &mut PixelGrid) {
        grid.clear();
        let palette = self.core.palettes().current();
        let blend = self.core.blend();
        let row_color = palette.color_at(self.row.color_pos, 255, blend);
        let col_color = palette.color_at(self.col.color_pos.wrapping_add(128), 255, blend);
        for x in 0..grid.width() {
            grid.set(x, self.row.pos, row_color);
        }
        for y in 0..grid.height() {
            grid.set(self.col.pos, y, col_color);
        }
    }
}

impl MatrixEffect for LinesEffect {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn setup(&mut self, grid: &mut PixelGrid) {
        self.row = Sweep::new();
        self.col = Sweep::new();
        self.draw(grid);
    }

    fn advance(&mut self, grid: &mut PixelGrid, now: Instant) -> bool {
        if !self.core.ready(now) {
            return false;
        }
        self.row.step(grid.height());
        self.col.step(grid.width());
        self.draw(grid);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_bounces_between_edges() {
        let mut sweep = Sweep::new();
        let mut seen = Vec::new();
        for _ in 0..8 {
            sweep.step(4);
            seen.push(sweep.pos);
        }
        assert_eq!(seen, [1, 2, 3, 2, 1, 0, 1, 2]);
    }

    #[test]
    fn bounce_rotates_the_color() {
        let mut sweep = Sweep::new();
        for _ in 0..3 {
            sweep.step(4);
        }
        assert_eq!(sweep.color_pos, 0, "no bounce yet");
        sweep.step(4);
        assert_eq!(sweep.color_pos, BOUNCE_COLOR_STEP);
    }

    #[test]
    fn single_cell_extent_never_moves() {
        let mut sweep = Sweep::new();
        for _ in 0..10 {
            sweep.step(1);
        }
        assert_eq!(sweep.pos, 0);
    }

    #[test]
    fn both_lines_are_fully_drawn() {
        let mut fx = LinesEffect::new();
        fx.core_mut().timer_mut().set_delay(Duration::ZERO);
        let mut grid = PixelGrid::new(6, 5);
        fx.setup(&mut grid);
        fx.advance(&mut grid, Instant::now());
        let row = fx.row.pos;
        let col = fx.col.pos;
        for x in 0..grid.width() {
            assert!(!grid.get(x, row).unwrap().is_black(), "row gap at x={x}");
        }
        for y in 0..grid.height() {
            assert!(!grid.get(col, y).unwrap().is_black(), "column gap at y={y}");
        }
        let lit = grid.pixels().iter().filter(|p| !p.is_black()).count();
        assert_eq!(lit, 6 + 5 - 1, "exactly one row and one column lit");
    }
}
