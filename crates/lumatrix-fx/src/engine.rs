#![forbid(unsafe_code)]

//! The shared effect contract: timing gate, per-effect core state, and the
//! `MatrixEffect` trait.
//!
//! The timing gate is the sole scheduling primitive in the system. The
//! driver polls [`MatrixEffect::advance`] as fast as it likes; each effect
//! compares elapsed wall-clock time against its configured delay and does
//! nothing until enough has passed. There are no blocking waits and no
//! suspension points anywhere in the engine.

use std::time::Duration;

use lumatrix_render::{Blend, Gradient, PaletteBank, PixelGrid};
use web_time::Instant;

// ---------------------------------------------------------------------------
// UpdateTimer
// ---------------------------------------------------------------------------

/// Elapsed-time gate for frame advancement.
///
/// The first [`ready`](Self::ready) call always fires (there is no previous
/// frame to be too soon after); subsequent calls fire only once `delay` has
/// elapsed since the last firing, and record the firing time.
#[derive(Debug, Clone)]
pub struct UpdateTimer {
    delay: Duration,
    last: Option<Instant>,
}

impl UpdateTimer {
    /// Create a timer with the given inter-frame delay.
    #[inline]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// The configured inter-frame delay.
    #[inline]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the inter-frame delay. Takes effect on the next check.
    #[inline]
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Whether a frame is due at `now`. Records `now` when it fires.
    #[inline]
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.delay => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last firing so the next check fires immediately.
    #[inline]
    pub fn reset(&mut self) {
        self.last = None;
    }
}

// ---------------------------------------------------------------------------
// EffectCore
// ---------------------------------------------------------------------------

/// State every effect carries: the redraw timer, its palette bank, and the
/// gradient blend mode.
///
/// Each effect owns its bank; there is no process-wide palette state. The
/// driver reaches the bank through the [`MatrixEffect`] palette methods.
#[derive(Debug, Clone)]
pub struct EffectCore {
    timer: UpdateTimer,
    palettes: PaletteBank,
    blend: Blend,
}

impl EffectCore {
    /// Create a core with the given delay, the builtin palette bank, and
    /// linear blending.
    pub fn new(delay: Duration) -> Self {
        Self::with_palettes(delay, PaletteBank::default())
    }

    /// Create a core with a caller-supplied palette bank.
    pub fn with_palettes(delay: Duration, palettes: PaletteBank) -> Self {
        Self {
            timer: UpdateTimer::new(delay),
            palettes,
            blend: Blend::Linear,
        }
    }

    /// Replace the blend mode.
    #[inline]
    pub fn set_blend(&mut self, blend: Blend) {
        self.blend = blend;
    }

    /// The gradient blend mode.
    #[inline]
    pub const fn blend(&self) -> Blend {
        self.blend
    }

    /// The active gradient.
    #[inline]
    pub fn palette(&self) -> &Gradient {
        self.palettes.current()
    }

    /// The palette bank.
    #[inline]
    pub fn palettes(&self) -> &PaletteBank {
        &self.palettes
    }

    /// Step to the next gradient, wrapping.
    #[inline]
    pub fn next_palette(&mut self) {
        self.palettes.advance();
    }

    /// Select a gradient by index, reduced modulo the bank size.
    #[inline]
    pub fn select_palette(&mut self, index: usize) {
        self.palettes.select(index);
    }

    /// Whether a frame is due at `now`. See [`UpdateTimer::ready`].
    #[inline]
    pub fn ready(&mut self, now: Instant) -> bool {
        self.timer.ready(now)
    }

    /// The redraw timer.
    #[inline]
    pub fn timer(&self) -> &UpdateTimer {
        &self.timer
    }

    /// Mutable access to the redraw timer.
    #[inline]
    pub fn timer_mut(&mut self) -> &mut UpdateTimer {
        &mut self.timer
    }
}

// ---------------------------------------------------------------------------
// MatrixEffect
// ---------------------------------------------------------------------------

/// A pattern generator driving the shared pixel grid.
///
/// Lifecycle: the driver calls [`setup`](Self::setup) exactly once, then
/// polls [`advance`](Self::advance) each main-loop iteration. Effects do not
/// own the grid; it is lent to them for the duration of each call.
///
/// Contract for `advance`:
/// - gate on the core timer first; a gated call returns `false` without
///   touching the grid
/// - otherwise perform one discrete simulation/render step and return `true`
///
/// The driver may use the returned flag to skip hardware pushes when
/// nothing changed; correctness does not depend on it.
pub trait MatrixEffect {
    /// Human-readable effect name (debugging / UI).
    fn name(&self) -> &'static str;

    /// Shared core state.
    fn core(&self) -> &EffectCore;

    /// Mutable shared core state.
    fn core_mut(&mut self) -> &mut EffectCore;

    /// One-time initialization: clear the grid, seed internal state.
    fn setup(&mut self, grid: &mut PixelGrid);

    /// Advance one frame if the delay has elapsed at `now`.
    fn advance(&mut self, grid: &mut PixelGrid, now: Instant) -> bool;

    /// Driver input: step to the next gradient.
    fn next_palette(&mut self) {
        self.core_mut().next_palette();
    }

    /// Driver input: select a gradient by index (wrapping).
    fn select_palette(&mut self, index: usize) {
        self.core_mut().select_palette(index);
    }

    /// Driver input: change the inter-frame delay.
    fn set_delay(&mut self, delay: Duration) {
        self.core_mut().timer_mut().set_delay(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instants(delay_ms: u64, steps: u64) -> Vec<Instant> {
        let t0 = Instant::now();
        (0..steps)
            .map(|i| t0 + Duration::from_millis(i * delay_ms))
            .collect()
    }

    #[test]
    fn timer_first_check_fires() {
        let mut timer = UpdateTimer::new(Duration::from_millis(200));
        assert!(timer.ready(Instant::now()));
    }

    #[test]
    fn timer_gates_until_delay_elapses() {
        let mut timer = UpdateTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert!(timer.ready(t0));
        assert!(!timer.ready(t0 + Duration::from_millis(50)));
        assert!(!timer.ready(t0 + Duration::from_millis(99)));
        assert!(timer.ready(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn timer_measures_from_last_firing() {
        let mut timer = UpdateTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert!(timer.ready(t0));
        // A gated check must not slide the window.
        assert!(!timer.ready(t0 + Duration::from_millis(60)));
        assert!(timer.ready(t0 + Duration::from_millis(110)));
        assert!(!timer.ready(t0 + Duration::from_millis(170)));
        assert!(timer.ready(t0 + Duration::from_millis(210)));
    }

    #[test]
    fn timer_reset_rearms_immediately() {
        let mut timer = UpdateTimer::new(Duration::from_secs(3600));
        let t0 = Instant::now();
        assert!(timer.ready(t0));
        assert!(!timer.ready(t0 + Duration::from_secs(1)));
        timer.reset();
        assert!(timer.ready(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn zero_delay_fires_every_check() {
        let mut timer = UpdateTimer::new(Duration::ZERO);
        for now in instants(1, 5) {
            assert!(timer.ready(now));
        }
    }

    #[test]
    fn core_palette_cursor_wraps() {
        let mut core = EffectCore::new(Duration::from_millis(50));
        let n = core.palettes().len();
        let start = core.palettes().index();
        for _ in 0..n {
            core.next_palette();
        }
        assert_eq!(core.palettes().index(), start);
    }
}
