#![forbid(unsafe_code)]

//! Random twinkling pixels.
//!
//! Each tick inspects one random cell. A lit cell goes dark; a dark cell
//! lights up with low probability, in a random palette color. Run at a
//! short delay this reads as a field of stars fading in and out.

use lumatrix_render::{PackedRgb, PixelGrid};
use web_time::Instant;

use crate::engine::{EffectCore, MatrixEffect};
use crate::rng::XorShift32;

use std::time::Duration;

/// Default interval between ticks.
pub const DEFAULT_TWINKLE_DELAY: Duration = Duration::from_millis(5);
/// A dark cell lights when a roll of this many sides comes up under 256.
pub const DEFAULT_TWINKLE_ODDS: u32 = 1700;

pub struct TwinkleEffect {
    core: EffectCore,
    rng: XorShift32,
    odds: u32,
}

impl Default for TwinkleEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl TwinkleEffect {
    pub fn new() -> Self {
        Self::with_seed(XorShift32::default())
    }

    pub fn with_seed(rng: XorShift32) -> Self {
        Self {
            core: EffectCore::new(DEFAULT_TWINKLE_DELAY),
            rng,
            odds: DEFAULT_TWINKLE_ODDS,
        }
    }

    /// Lower odds twinkle more densely. Clamped to at least 256; at the
    /// floor every visit to a dark cell lights it.
    pub fn set_odds(&mut self, odds: u32) {
        self.odds = odds.max(256);
    }
}

impl MatrixEffect for TwinkleEffect {
    fn name(&self) -> &'static str {
        "twinkle"
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
        let x = self.rng.next_range(grid.width() as u32) as u8;
        let y = self.rng.next_range(grid.height() as u32) as u8;
        match grid.get(x, y) {
            Some(current) if !current.is_black() => {
                grid.set(x, y, PackedRgb::BLACK);
            }
            Some(_) => {
                if self.rng.next_range(self.odds) < 256 {
                    let pos = self.rng.next_u8();
                    let color = self.core.palette().color_at(pos, 255, self.core.blend());
                    grid.set(x, y, color);
                }
            }
            None => {}
        }
        true
    }
}
