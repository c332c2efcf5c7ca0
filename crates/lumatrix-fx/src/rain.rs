#![forbid(unsafe_code)]

//! Falling-pixel rain.
//!
//! Every tick the whole matrix shifts one row down, the vacated top row is
//! cleared, and each column rolls a die to spawn a fresh drop. The drop
//! color walks the active gradient so successive drops sweep the palette.

use lumatrix_render::{Direction, PackedRgb, PixelGrid};
use web_time::Instant;

use crate::engine::{EffectCore, MatrixEffect};
use crate::rng::XorShift32;

use std::time::Duration;

/// Default interval between rain steps.
pub const DEFAULT_RAIN_DELAY: Duration = Duration::from_millis(1);
/// Default brightness for drops.
pub const DEFAULT_RAIN_BRIGHTNESS: u8 = 64;
/// One in this many chances per column per tick of spawning a drop.
const SPAWN_ODDS: u32 = 20;
/// Palette positions advanced per spawned drop.
const COLOR_STEP: u8 = 16;

pub struct RainEffect {
    core: EffectCore,
    rng: XorShift32,
    color_pos: u8,
    brightness: u8,
}

impl Default for RainEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl RainEffect {
    pub fn new() -> Self {
        Self::with_seed(XorShift32::default())
    }

    pub fn with_seed(rng: XorShift32) -> Self {
        Self {
            core: EffectCore::new(DEFAULT_RAIN_DELAY),
            rng,
            color_pos: 0,
            brightness: DEFAULT_RAIN_BRIGHTNESS,
        }
    }

    #[inline]
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }
}

impl MatrixEffect for RainEffect {
    fn name(&self) -> &'static str {
        "rain"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn setup(&mut self, grid: &mut PixelGrid) {
        grid.clear();
    }

    fn advance(&mut self, grid: &mut PixelGrid, now: Instant) -> bool {
        if !self.core.ready(now) {
            return false;
        }
        grid.shift_one(Direction::Down);
        if let Some(top) = grid.row_mut(0) {
            top.fill(PackedRgb::BLACK);
        }
        let palette = *self.core.palettes().current();
        for x in 0..grid.width() {
            if self.rng.next_range(SPAWN_ODDS) == 0 {
                self.color_pos = self.color_pos.wrapping_add(COLOR_STEP);
                let color = palette.color_at(self.color_pos, self.brightness, self.core.blend());
                grid.set(x, 0, color);
            }
        }
        true
    }
}
