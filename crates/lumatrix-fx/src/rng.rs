#![forbid(unsafe_code)]

//! Deterministic xorshift32 PRNG.
//!
//! Effects that need randomness (seeding, spawning, twinkling) use this
//! instead of a clock-derived source so that two effects constructed with
//! the same seed produce identical frame sequences. Not cryptographic.

/// Xorshift32 state. Never reaches zero.
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator from a seed. A zero seed is remapped to a fixed
    /// non-zero constant (xorshift has a zero fixpoint).
    #[inline]
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    /// Next 32-bit value. Never zero.
    #[inline]
    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Next value reduced to `0..n`.
    ///
    /// # Panics
    ///
    /// Debug-asserts `n > 0`.
    #[inline]
    pub fn next_range(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0);
        self.next() % n
    }

    /// Next value truncated to 8 bits.
    #[inline]
    pub fn next_u8(&mut self) -> u8 {
        (self.next() >> 8) as u8
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(0x1234_5678)
    }
}
