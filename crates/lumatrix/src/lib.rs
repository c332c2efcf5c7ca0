#![forbid(unsafe_code)]

//! Lumatrix public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.

use std::fmt;

// --- Render re-exports -----------------------------------------------------

pub use lumatrix_render::color::PackedRgb;
pub use lumatrix_render::grid::{Direction, PixelGrid};
pub use lumatrix_render::palette::{Blend, Gradient, PaletteBank};

// --- Effect re-exports -----------------------------------------------------

pub use lumatrix_fx::bounce::BouncingPixels;
pub use lumatrix_fx::engine::{EffectCore, MatrixEffect, UpdateTimer};
pub use lumatrix_fx::life::LifeSimulator;
pub use lumatrix_fx::lines::LinesEffect;
pub use lumatrix_fx::rain::RainEffect;
pub use lumatrix_fx::rng::XorShift32;
pub use lumatrix_fx::text::{PendingTextQueue, QueuedText, TextScroller};
pub use lumatrix_fx::twinkle::TwinkleEffect;
pub use lumatrix_fx::worm::WormEffect;
pub use lumatrix_fx::Instant;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for lumatrix apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while driving an output device.
    Io(std::io::Error),
    /// Engine error with message.
    Engine(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Engine(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for lumatrix APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Blend, Direction, Error, Gradient, Instant, MatrixEffect, PackedRgb, PaletteBank,
        PixelGrid, Result, TextScroller, UpdateTimer, XorShift32,
    };

    pub use crate::{fx, render};
}

pub use lumatrix_fx as fx;
pub use lumatrix_render as render;
