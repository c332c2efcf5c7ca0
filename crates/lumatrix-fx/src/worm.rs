#![forbid(unsafe_code)]

//! A crawling worm.
//!
//! The worm occupies a contiguous run of cells along the matrix
//! interpreted as one long line (row-major order). Its front end walks
//! forward until the run hits either end of the line; the worm then
//! reverses, the old tail becoming the new front. The body is shaded
//! along the active gradient from front to tail.

use lumatrix_render::PixelGrid;
use web_time::Instant;

use crate::engine::{EffectCore, MatrixEffect};

use std::time::Duration;

/// Default interval between crawl steps.
pub const DEFAULT_WORM_DELAY: Duration = Duration::from_millis(50);
/// Default worm length in cells.
pub const DEFAULT_WORM_LENGTH: usize = 7;
/// Palette positions between adjacent body segments.
const SEGMENT_COLOR_STEP: u8 = 16;

pub struct WormEffect {
    core: EffectCore,
    /// Lowest cell index of the body; the body is `low..low + length`.
    low: usize,
    length: usize,
    forward: bool,
    color_pos: u8,
}

impl Default for WormEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl WormEffect {
    pub fn new() -> Self {
        Self {
            core: EffectCore::new(DEFAULT_WORM_DELAY),
            low: 0,
            length: DEFAULT_WORM_LENGTH,
            forward: true,
            color_pos: 0,
        }
    }

    /// Set the worm length. Takes effect on the next `setup`. Clamped to
    /// the grid size there so the worm always fits.
    pub fn set_length(&mut self, length: usize) {
        self.length = length.max(1);
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Cell index of the worm's front end.
    #[inline]
    pub fn front(&self) -> usize {
        if self.forward {
            self.low + self.length - 1
        } else {
            self.low
        }
    }

    fn step(&mut self, cells: usize) {
        if self.forward {
            if self.low + self.length < cells {
                self.low += 1;
            } else {
                // Tail becomes the new front and starts moving down.
                self.forward = false;
                self.low = self.low.saturating_sub(1);
            }
        } else if self.low > 0 {
            self.low -= 1;
        } else {
            self.forward = true;
            if self.low + self.length < cells {
                self.low += 1;
            }
        }
        self.color_pos = self.color_pos.wrapping_add(1);
    }

    fn draw(&self, grid: &mut PixelGrid) {
        grid.clear();
        let palette = self.core.palettes().current();
        let blend = self.core.blend();
        let front = self.front();
        let pixels = grid.pixels_mut();
        for k in 0..self.length {
            let i = self.low + k;
            if i >= pixels.len() {
                break;
            }
            // Distance from the front end, so the front always carries the
            // base color regardless of travel direction.
            let dist = i.abs_diff(front) as u8;
            let pos = self
                .color_pos
                .wrapping_add(dist.wrapping_mul(SEGMENT_COLOR_STEP));
            pixels[i] = palette.color_at(pos, 255, blend);
        }
    }
}

impl MatrixEffect for WormEffect {
    fn name(&self) -> &'static str {
        "worm"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn setup(&mut self, grid: &mut PixelGrid) {
        let cells = grid.pixels().len();
        self.length = self.length.min(cells);
        self.low = 0;
        self.forward = true;
        self.color_pos = 0;
        self.draw(grid);
    }

    fn advance(&mut self, grid: &mut PixelGrid, now: Instant) -> bool {
        if !self.core.ready(now) {
            return false;
        }
        self.step(grid.pixels().len());
        self.draw(grid);
        true
    }
}
