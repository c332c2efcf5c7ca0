#![forbid(unsafe_code)]

//! Conway's Game of Life on a toroidal matrix.
//!
//! Classic B3/S23 rules; the grid wraps at all four edges. Cell color
//! tracks age: each surviving generation advances a cell's palette
//! position, so long-lived clusters cycle through the active gradient.
//!
//! # Invariants
//! - Each step reads only the primary buffer and writes only the scratch
//!   buffer, then swaps. No cell update can observe a half-stepped board.
//! - `ages` always has exactly `width * height` entries after `setup`.

use lumatrix_render::{PackedRgb, PixelGrid};
use web_time::Instant;

use crate::engine::{EffectCore, MatrixEffect};
use crate::rng::XorShift32;

use std::time::Duration;

/// Default interval between generations.
pub const DEFAULT_LIFE_DELAY: Duration = Duration::from_millis(50);
/// Default brightness applied to cell colors (0..=255).
pub const DEFAULT_LIFE_BRIGHTNESS: u8 = 40;
/// Roughly one in this many cells starts alive when seeding.
const SEED_ODDS: u32 = 3;
/// Palette positions advanced per generation survived.
const AGE_COLOR_STEP: u8 = 8;

/// Game of Life with age-colored cells.
pub struct LifeSimulator {
    core: EffectCore,
    rng: XorShift32,
    ages: Vec<u8>,
    scratch_ages: Vec<u8>,
    brightness: u8,
    generation: u64,
}

impl Default for LifeSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeSimulator {
    pub fn new() -> Self {
        Self::with_seed(XorShift32::default())
    }

    /// Build with a caller-supplied RNG so runs are reproducible.
    pub fn with_seed(rng: XorShift32) -> Self {
        Self {
            core: EffectCore::new(DEFAULT_LIFE_DELAY),
            rng,
            ages: Vec::new(),
            scratch_ages: Vec::new(),
            brightness: DEFAULT_LIFE_BRIGHTNESS,
            generation: 0,
        }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Clear the board and scatter a fresh random population.
    pub fn reseed(&mut self, grid: &mut PixelGrid) {
        let cells = grid.width() as usize * grid.height() as usize;
        self.ages.clear();
        self.ages.resize(cells, 0);
        self.scratch_ages.clear();
        self.scratch_ages.resize(cells, 0);
        self.generation = 0;
        grid.clear();

        let palette = *self.core.palettes().current();
        for i in 0..cells {
            if self.rng.next_range(SEED_ODDS) == 0 {
                self.ages[i] = 1;
                let pos = self.rng.next_u8();
                let color = palette.color_at(pos, self.brightness, self.core.blend());
                grid.pixels_mut()[i] = color;
            }
        }
    }

    /// Force a specific cell alive. Used by tests and for painting
    /// patterns before stepping.
    pub fn spawn_cell(&mut self, grid: &mut PixelGrid, x: u8, y: u8) {
        if let Some(i) = grid.index(x, y) {
            if self.ages.len() != grid.pixels().len() {
                self.ages.resize(grid.pixels().len(), 0);
                self.scratch_ages.resize(grid.pixels().len(), 0);
            }
            self.ages[i] = 1;
            let color = self
                .core
                .palette()
                .color_at(AGE_COLOR_STEP, self.brightness, self.core.blend());
            grid.pixels_mut()[i] = color;
        }
    }

    #[inline]
    pub fn is_alive(&self, grid: &PixelGrid, x: u8, y: u8) -> bool {
        grid.index(x, y).is_some_and(|i| self.ages[i] > 0)
    }

    fn live_neighbors(&self, w: usize, h: usize, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for dy in [h - 1, 0, 1] {
            for dx in [w - 1, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = (x + dx) % w;
                let ny = (y + dy) % h;
                if self.ages[ny * w + nx] > 0 {
                    count += 1;
                }
            }
        }
        count
    }

    fn step(&mut self, grid: &mut PixelGrid) {
        let w = grid.width() as usize;
        let h = grid.height() as usize;
        let palette = *self.core.palettes().current();
        let blend = self.core.blend();
        let brightness = self.brightness;

        let (_, scratch) = grid.split_buffers();
        for y in 0..h {
            for x in 0..w {
                let i = y * w + x;
                let neighbors = self.live_neighbors(w, h, x, y);
                let alive = self.ages[i] > 0;
                let next_age = match (alive, neighbors) {
                    (true, 2) | (true, 3) => self.ages[i].saturating_add(1),
                    (false, 3) => 1,
                    _ => 0,
                };
                self.scratch_ages[i] = next_age;
                scratch[i] = if next_age > 0 {
                    let pos = next_age.wrapping_mul(AGE_COLOR_STEP);
                    palette.color_at(pos, brightness, blend)
                } else {
                    PackedRgb::BLACK
                };
            }
        }
        grid.swap_buffers();
        std::mem::swap(&mut self.ages, &mut self.scratch_ages);
        self.generation += 1;
    }

    /// True when no cell is alive. A dead board never comes back on its
    /// own, so callers typically reseed when this turns true.
    pub fn is_extinct(&self) -> bool {
        self.ages.iter().all(|&a| a == 0)
    }
}

impl MatrixEffect for LifeSimulator {
    fn name(&self) -> &'static str {
        "life"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn setup(&mut self, grid: &mut PixelGrid) {
        self.reseed(grid);
    }

    fn advance(&mut self, grid: &mut PixelGrid, now: Instant) -> bool {
        if !self.core.ready(now) {
            return false;
        }
        if self.is_extinct() {
            self.reseed(grid);
        } else {
            self.step(grid);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_sim(grid: &PixelGrid) -> LifeSimulator {
        let mut sim = LifeSimulator::with_seed(XorShift32::new(42));
        sim.ages = vec![0; grid.pixels().len()];
        sim.scratch_ages = vec![0; grid.pixels().len()];
        sim
    }

    #[test]
    fn block_is_stable() {
        let mut grid = PixelGrid::new(6, 6);
        let mut sim = empty_sim(&grid);
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            sim.spawn_cell(&mut grid, x, y);
        }
        sim.step(&mut grid);
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            assert!(sim.is_alive(&grid, x, y), "block cell ({x},{y}) died");
        }
        assert!(!sim.is_alive(&grid, 1, 1));
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn blinker_oscillates() {
        let mut grid = PixelGrid::new(7, 7);
        let mut sim = empty_sim(&grid);
        for x in 2..5 {
            sim.spawn_cell(&mut grid, x, 3);
        }
        sim.step(&mut grid);
        for y in 2..5 {
            assert!(sim.is_alive(&grid, 3, y), "vertical phase missing (3,{y})");
        }
        assert!(!sim.is_alive(&grid, 2, 3));
        sim.step(&mut grid);
        for x in 2..5 {
            assert!(sim.is_alive(&grid, x, 3), "horizontal phase missing ({x},3)");
        }
    }

    #[test]
    fn lone_cell_dies() {
        let mut grid = PixelGrid::new(5, 5);
        let mut sim = empty_sim(&grid);
        sim.spawn_cell(&mut grid, 2, 2);
        sim.step(&mut grid);
        assert!(sim.is_extinct());
        assert_eq!(grid.get(2, 2), Some(PackedRgb::BLACK));
    }

    #[test]
    fn glider_translates_across_wrapped_edges() {
        let mut grid = PixelGrid::new(8, 8);
        let mut sim = empty_sim(&grid);
        // Glider near the bottom-right corner so it crosses the seam.
        let glider = [(6, 5), (7, 6), (5, 7), (6, 7), (7, 7)];
        for (x, y) in glider {
            sim.spawn_cell(&mut grid, x, y);
        }
        // A glider advances one cell down-right every 4 generations.
        for _ in 0..4 {
            sim.step(&mut grid);
        }
        for (x, y) in glider {
            let (nx, ny) = ((x + 1) % 8, (y + 1) % 8);
            assert!(sim.is_alive(&grid, nx, ny), "glider cell missing ({nx},{ny})");
        }
        let live = sim.ages.iter().filter(|&&a| a > 0).count();
        assert_eq!(live, 5);
    }

    #[test]
    fn surviving_cells_age() {
        let mut grid = PixelGrid::new(6, 6);
        let mut sim = empty_sim(&grid);
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            sim.spawn_cell(&mut grid, x, y);
        }
        sim.step(&mut grid);
        sim.step(&mut grid);
        let i = grid.index(2, 2).unwrap();
        assert_eq!(sim.ages[i], 3, "block cell should be three generations old");
    }

    #[test]
    fn extinct_board_reseeds_on_advance() {
        let mut grid = PixelGrid::new(8, 8);
        let mut sim = empty_sim(&grid);
        sim.core_mut().timer_mut().set_delay(Duration::ZERO);
        assert!(sim.is_extinct());
        assert!(sim.advance(&mut grid, Instant::now()));
        assert!(!sim.is_extinct(), "reseed should produce live cells");
    }
}
