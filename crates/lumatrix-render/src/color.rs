#![forbid(unsafe_code)]

//! Packed pixel color.
//!
//! `PackedRgb` is the fundamental unit of the LED grid. Each pixel occupies
//! exactly **4 bytes** (`0x00RRGGBB`) so a whole grid is a flat `u32` array:
//! cheap to copy, cheap to compare, and directly mappable to strip hardware
//! byte orders by an external transmission layer.
//!
//! There is no alpha channel. LED pixels are emissive; "transparent" has no
//! physical meaning, and black (all channels off) doubles as the cleared
//! state throughout the engine.

/// A packed RGB color: `0x00RRGGBB`.
///
/// Equality is bitwise, which makes frame-change detection a `slice ==`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct PackedRgb(pub u32);

impl PackedRgb {
    /// All channels off. Also the cleared-grid state.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Full white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Full red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Full green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Full blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Create a color from channel values.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Whether every channel is off. Used as the "cell is dark/dead" test.
    #[inline]
    pub const fn is_black(self) -> bool {
        self.0 == 0
    }

    /// Scale every channel by `brightness / 255`.
    ///
    /// `scaled(255)` is the identity; `scaled(0)` is black.
    #[inline]
    pub const fn scaled(self, brightness: u8) -> Self {
        let b = brightness as u32;
        Self::rgb(
            ((self.r() as u32 * b) / 255) as u8,
            ((self.g() as u32 * b) / 255) as u8,
            ((self.b() as u32 * b) / 255) as u8,
        )
    }

    /// Linear interpolation toward `other` by `t / 255`.
    ///
    /// Exact at the endpoints: `t = 0` returns `self`, `t = 255` returns
    /// `other`.
    #[inline]
    pub const fn lerp(self, other: Self, t: u8) -> Self {
        let t = t as u32;
        let inv = 255 - t;
        Self::rgb(
            ((self.r() as u32 * inv + other.r() as u32 * t) / 255) as u8,
            ((self.g() as u32 * inv + other.g() as u32 * t) / 255) as u8,
            ((self.b() as u32 * inv + other.b() as u32 * t) / 255) as u8,
        )
    }
}

impl std::fmt::Debug for PackedRgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r(), self.g(), self.b())
    }
}
