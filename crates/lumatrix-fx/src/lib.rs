#![forbid(unsafe_code)]

//! Timer-gated animation effects for the lumatrix engine.
//!
//! Every effect implements [`MatrixEffect`]: a one-time [`setup`] followed by
//! repeated [`advance`] calls gated on an elapsed-time check against the
//! effect's configured delay. The external driver polls `advance` on each
//! main-loop iteration and pushes the grid to hardware when it returns
//! `true`.
//!
//! [`setup`]: MatrixEffect::setup
//! [`advance`]: MatrixEffect::advance

pub mod bounce;
pub mod engine;
pub mod font;
pub mod life;
pub mod lines;
pub mod rain;
pub mod rng;
pub mod text;
pub mod twinkle;
pub mod worm;

pub use bounce::BouncingPixels;
pub use engine::{EffectCore, MatrixEffect, UpdateTimer};
pub use life::LifeSimulator;
pub use lines::LinesEffect;
pub use rain::RainEffect;
pub use rng::XorShift32;
pub use text::{PendingTextQueue, QueuedText, TextScroller};
pub use twinkle::TwinkleEffect;
pub use worm::WormEffect;

/// Monotonic clock used by the timing gate (`std::time::Instant` on native
/// targets, a wasm-safe equivalent elsewhere).
pub use web_time::Instant;
