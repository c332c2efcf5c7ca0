#![forbid(unsafe_code)]

//! Gradient palettes.
//!
//! A [`Gradient`] is 16 color stops addressed by a wrapping 0–255 position,
//! with stepped or linear lookup and a brightness scale. A [`PaletteBank`]
//! is an ordered list of gradients with an active-index cursor; the cursor
//! is always valid modulo the gradient count and advancing wraps.
//!
//! Gradient *content* is data, not semantics: effects treat the table as an
//! opaque position-to-color map. The built-in bank mirrors a classic LED
//! palette set (rainbow, cloud, party, ocean, lava).

use crate::color::PackedRgb;

/// How a gradient position between two stops resolves to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Blend {
    /// Snap to the nearest-below stop (16 hard bands).
    Step,
    /// Interpolate between adjacent stops, wrapping 15 back to 0.
    #[default]
    Linear,
}

/// A named 16-stop color gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub name: &'static str,
    pub stops: [PackedRgb; 16],
}

impl Gradient {
    /// Map a wrapping scalar position to a color.
    ///
    /// `pos` spans the whole gradient: the high nibble picks the stop, the
    /// low nibble interpolates toward the next stop under
    /// [`Blend::Linear`]. The result is scaled by `brightness`
    /// (255 = full).
    #[inline]
    pub fn color_at(&self, pos: u8, brightness: u8, blend: Blend) -> PackedRgb {
        let hi = (pos >> 4) as usize;
        let color = match blend {
            Blend::Step => self.stops[hi],
            Blend::Linear => {
                let frac = (pos & 0x0F) << 4;
                self.stops[hi].lerp(self.stops[(hi + 1) % 16], frac)
            }
        };
        color.scaled(brightness)
    }
}

/// Ordered gradients plus the active-index cursor.
///
/// One bank is owned per effect (passed or defaulted at construction);
/// there is no process-wide palette state.
#[derive(Debug, Clone)]
pub struct PaletteBank {
    gradients: Vec<Gradient>,
    index: usize,
}

impl PaletteBank {
    /// Create a bank from an explicit gradient list.
    ///
    /// # Panics
    ///
    /// Panics if `gradients` is empty.
    pub fn new(gradients: Vec<Gradient>) -> Self {
        assert!(!gradients.is_empty(), "palette bank must not be empty");
        Self {
            gradients,
            index: 0,
        }
    }

    /// The built-in five-gradient bank.
    pub fn builtin() -> Self {
        Self::new(vec![RAINBOW, CLOUD, PARTY, OCEAN, LAVA])
    }

    /// The active gradient.
    #[inline]
    pub fn current(&self) -> &Gradient {
        &self.gradients[self.index]
    }

    /// Index of the active gradient.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of gradients in the bank.
    #[inline]
    pub fn len(&self) -> usize {
        self.gradients.len()
    }

    /// Never true; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gradients.is_empty()
    }

    /// Step to the next gradient, wrapping at the end.
    #[inline]
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.gradients.len();
    }

    /// Select a gradient by index, reduced modulo the bank size.
    #[inline]
    pub fn select(&mut self, index: usize) {
        self.index = index % self.gradients.len();
    }
}

impl Default for PaletteBank {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Built-in gradients
// ---------------------------------------------------------------------------

const fn c(rgb: u32) -> PackedRgb {
    PackedRgb(rgb)
}

/// Full hue wheel, red to red.
pub const RAINBOW: Gradient = Gradient {
    name: "rainbow",
    stops: [
        c(0xFF0000),
        c(0xD52A00),
        c(0xAB5500),
        c(0xAB7F00),
        c(0xABAB00),
        c(0x56D500),
        c(0x00FF00),
        c(0x00D52A),
        c(0x00AB55),
        c(0x0056AA),
        c(0x0000FF),
        c(0x2A00D5),
        c(0x5500AB),
        c(0x7F0081),
        c(0xAB0055),
        c(0xD5002B),
    ],
};

/// Deep blues breaking into white.
pub const CLOUD: Gradient = Gradient {
    name: "cloud",
    stops: [
        c(0x0000FF),
        c(0x00008B),
        c(0x00008B),
        c(0x00008B),
        c(0x00008B),
        c(0x00008B),
        c(0x00008B),
        c(0x00008B),
        c(0x0000FF),
        c(0x00008B),
        c(0x87CEEB),
        c(0x87CEEB),
        c(0xADD8E6),
        c(0xFFFFFF),
        c(0xADD8E6),
        c(0x87CEEB),
    ],
};

/// Saturated purples, reds, and golds with no dark stops.
pub const PARTY: Gradient = Gradient {
    name: "party",
    stops: [
        c(0x5500AB),
        c(0x84007C),
        c(0xB5004B),
        c(0xE5001B),
        c(0xE81700),
        c(0xB84700),
        c(0xAB7700),
        c(0xABAB00),
        c(0xAB5500),
        c(0xDD2200),
        c(0xF2000E),
        c(0xC2003E),
        c(0x8F0071),
        c(0x5F00A1),
        c(0x2F00D0),
        c(0x0007F9),
    ],
};

/// Blues and greens of deep water.
pub const OCEAN: Gradient = Gradient {
    name: "ocean",
    stops: [
        c(0x191970),
        c(0x00008B),
        c(0x191970),
        c(0x000080),
        c(0x00008B),
        c(0x0000CD),
        c(0x2E8B57),
        c(0x008080),
        c(0x5F9EA0),
        c(0x0000FF),
        c(0x008B8B),
        c(0x6495ED),
        c(0x7FFFD4),
        c(0x2E8B57),
        c(0x00FFFF),
        c(0x87CEFA),
    ],
};

/// Black through smoldering reds to a white-hot core.
pub const LAVA: Gradient = Gradient {
    name: "lava",
    stops: [
        c(0x000000),
        c(0x800000),
        c(0x000000),
        c(0x800000),
        c(0x8B0000),
        c(0x800000),
        c(0x8B0000),
        c(0x8B0000),
        c(0x8B0000),
        c(0xFF0000),
        c(0xFFA500),
        c(0xFFFFFF),
        c(0xFFA500),
        c(0xFF0000),
        c(0x8B0000),
        c(0x000000),
    ],
};
