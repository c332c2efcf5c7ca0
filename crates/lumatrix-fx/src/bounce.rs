#![forbid(unsafe_code)]

//! Bouncing pixels.
//!
//! A handful of independent points move with sub-pixel velocities and
//! reflect off the matrix edges. Positions are kept in f32 so shallow
//! bounce angles survive rounding to the pixel grid.

use lumatrix_render::PixelGrid;
use web_time::Instant;

use crate::engine::{EffectCore, MatrixEffect};
use crate::rng::XorShift32;

use std::time::Duration;

/// Default interval between movement steps.
pub const DEFAULT_BOUNCE_DELAY: Duration = Duration::from_millis(50);
/// Default number of bouncing points.
pub const DEFAULT_BOUNCE_COUNT: usize = 6;

#[derive(Clone, Copy, Debug)]
struct Bouncer {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    color_pos: u8,
}

pub struct BouncingPixels {
    core: EffectCore,
    rng: XorShift32,
    bouncers: Vec<Bouncer>,
    count: usize,
}

impl Default for BouncingPixels {
    fn default() -> Self {
        Self::new()
    }
}

impl BouncingPixels {
    pub fn new() -> Self {
        Self::with_seed(XorShift32::default())
    }

    pub fn with_seed(rng: XorShift32) -> Self {
        Self {
            core: EffectCore::new(DEFAULT_BOUNCE_DELAY),
            rng,
            bouncers: Vec::new(),
            count: DEFAULT_BOUNCE_COUNT,
        }
    }

    /// Change how many points bounce. Takes effect on the next `setup`.
    pub fn set_count(&mut self, count: usize) {
        self.count = count.max(1);
    }

    fn random_velocity(&mut self) -> f32 {
        // 0.25 to 1.0 pixels per step, either sign.
        let magnitude = 0.25 + self.rng.next_range(76) as f32 / 100.0;
        if self.rng.next_range(2) == 0 {
            magnitude
        } else {
            -magnitude
        }
    }

    fn respawn(&mut self, grid: &PixelGrid) {
        self.bouncers.clear();
        for _ in 0..self.count {
            let x = self.rng.next_range(grid.width() as u32) as f32;
            let y = self.rng.next_range(grid.height() as u32) as f32;
            let bouncer = Bouncer {
                x,
                y,
                vx: self.random_velocity(),
                vy: self.random_velocity(),
                color_pos: self.rng.next_u8(),
            };
            self.bouncers.push(bouncer);
        }
    }

    /// Reflect `pos + vel` off the walls of `0.0..=max`, flipping the
    /// velocity when a wall is hit.
    fn reflect(pos: f32, vel: &mut f32, max: f32) -> f32 {
        let mut next = pos + *vel;
        if next < 0.0 {
            next = -next;
            *vel = -*vel;
        } else if next > max {
            next = max - (next - max);
            *vel = -*vel;
        }
        next.clamp(0.0, max)
    }
}

impl MatrixEffect for BouncingPixels {
    fn name(&self) -> &'static str {
        "bounce"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn setup(&mut self, grid: &mut PixelGrid) {
        grid.clear();
        self.respawn(grid);
    }

    fn advance(&mut self, grid: &mut PixelGrid, now: Instant) -> bool {
        if !self.core.ready(now) {
            return false;
        }
        grid.clear();
        let max_x = (grid.width() - 1) as f32;
        let max_y = (grid.height() - 1) as f32;
        let palette = *self.core.palettes().current();
        let blend = self.core.blend();
        for b in &mut self.bouncers {
            b.x = Self::reflect(b.x, &mut b.vx, max_x);
            b.y = Self::reflect(b.y, &mut b.vy, max_y);
            let color = palette.color_at(b.color_pos, 255, blend);
            grid.set(b.x.round() as u8, b.y.round() as u8, color);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_count(grid: &PixelGrid) -> usize {
        grid.pixels().iter().filter(|p| !p.is_black()).count()
    }

    #[test]
    fn setup_spawns_requested_count() {
        let mut fx = BouncingPixels::with_seed(XorShift32::new(3));
        fx.set_count(4);
        let mut grid = PixelGrid::new(16, 16);
        fx.setup(&mut grid);
        assert_eq!(fx.bouncers.len(), 4);
    }

    #[test]
    fn points_stay_on_the_grid() {
        let mut fx = BouncingPixels::with_seed(XorShift32::new(11));
        fx.core_mut().timer_mut().set_delay(Duration::ZERO);
        let mut grid = PixelGrid::new(9, 5);
        fx.setup(&mut grid);
        let t0 = Instant::now();
        for _ in 0..500 {
            fx.advance(&mut grid, t0);
            for b in &fx.bouncers {
                assert!((0.0..=8.0).contains(&b.x), "x out of range: {}", b.x);
                assert!((0.0..=4.0).contains(&b.y), "y out of range: {}", b.y);
            }
        }
    }

    #[test]
    fn each_step_draws_at_most_count_pixels() {
        let mut fx = BouncingPixels::with_seed(XorShift32::new(5));
        fx.core_mut().timer_mut().set_delay(Duration::ZERO);
        let mut grid = PixelGrid::new(12, 12);
        fx.setup(&mut grid);
        let t0 = Instant::now();
        for _ in 0..20 {
            fx.advance(&mut grid, t0);
            let lit = lit_count(&grid);
            assert!(lit >= 1, "at least one point must be visible");
            assert!(lit <= DEFAULT_BOUNCE_COUNT, "too many pixels lit: {lit}");
        }
    }

    #[test]
    fn reflect_flips_velocity_at_walls() {
        let mut vel = 1.5;
        let next = BouncingPixels::reflect(7.0, &mut vel, 7.0);
        assert!(next < 7.0);
        assert!(vel < 0.0);

        let mut vel = -2.0;
        let next = BouncingPixels::reflect(0.5, &mut vel, 7.0);
        assert!(next >= 0.0);
        assert!(vel > 0.0);
    }
}
