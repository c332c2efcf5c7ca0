#![forbid(unsafe_code)]

//! Render kernel for the lumatrix engine: packed colors, the pixel grid,
//! and palette lookup.

pub mod color;
pub mod grid;
pub mod palette;

pub use color::PackedRgb;
pub use grid::{Direction, PixelGrid};
pub use palette::{Blend, Gradient, PaletteBank};
