#![forbid(unsafe_code)]

//! Pixel grid storage.
//!
//! The `PixelGrid` is a W×H grid of [`PackedRgb`] pixels stored row-major
//! (`index = y * width + x`) with an equally sized scratch buffer for
//! double-buffered effects and fractional shifts.
//!
//! # Invariants
//!
//! 1. `pixels.len() == scratch.len() == width * height`
//! 2. Width and height never change after creation
//! 3. Shift operations are linear memory moves, never per-pixel loops
//!
//! # Failure semantics
//!
//! Nothing here panics in release builds and nothing returns an error.
//! Out-of-range coordinates yield `None` from [`PixelGrid::index`]; callers
//! treat that as "skip this read/write".

use crate::color::PackedRgb;

/// Direction of a whole-grid shift, named after the edge pixels move toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A W×H grid of pixels with a scratch buffer.
///
/// The driver allocates one grid for the lifetime of the session and lends
/// it to the active effect by `&mut` on every call; effects never own it.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: u8,
    height: u8,
    pixels: Vec<PackedRgb>,
    scratch: Vec<PackedRgb>,
}

impl PixelGrid {
    /// Create a grid with all pixels off.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is 0.
    pub fn new(width: u8, height: u8) -> Self {
        assert!(width > 0, "grid width must be > 0");
        assert!(height > 0, "grid height must be > 0");

        let size = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![PackedRgb::BLACK; size],
            scratch: vec![PackedRgb::BLACK; size],
        }
    }

    /// Grid width in pixels.
    #[inline]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Grid height in pixels.
    #[inline]
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false for a constructed grid; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Convert (x, y) to a linear index.
    ///
    /// Returns `None` when out of bounds. Use this whenever coordinates
    /// derive from animated or continuous state that can drift out of range.
    #[inline]
    pub fn index(&self, x: u8, y: u8) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Convert (x, y) to a linear index without a bounds check.
    ///
    /// Reserved for hot loops where bounds are already established.
    /// Debug builds assert; release builds will index out of the grid's
    /// logical range if the caller lies.
    #[inline]
    pub fn index_unchecked(&self, x: u8, y: u8) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at (x, y), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u8, y: u8) -> Option<PackedRgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Write the pixel at (x, y). Returns `false` (and writes nothing)
    /// when out of bounds.
    #[inline]
    pub fn set(&mut self, x: u8, y: u8, color: PackedRgb) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    /// Write the pixel at (x, y) without a bounds check.
    #[inline]
    pub fn set_unchecked(&mut self, x: u8, y: u8, color: PackedRgb) {
        let i = self.index_unchecked(x, y);
        self.pixels[i] = color;
    }

    /// The primary pixel buffer, row-major. This is what a transmission
    /// layer pushes to hardware.
    #[inline]
    pub fn pixels(&self) -> &[PackedRgb] {
        &self.pixels
    }

    /// Mutable access to the primary pixel buffer.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [PackedRgb] {
        &mut self.pixels
    }

    /// The scratch buffer.
    #[inline]
    pub fn scratch(&self) -> &[PackedRgb] {
        &self.scratch
    }

    /// Mutable access to the scratch buffer.
    #[inline]
    pub fn scratch_mut(&mut self) -> &mut [PackedRgb] {
        &mut self.scratch
    }

    /// One row of the primary buffer, or `None` when out of range.
    #[inline]
    pub fn row_mut(&mut self, y: u8) -> Option<&mut [PackedRgb]> {
        if y < self.height {
            let w = self.width as usize;
            let base = y as usize * w;
            Some(&mut self.pixels[base..base + w])
        } else {
            None
        }
    }

    /// Borrow the primary buffer for reading and the scratch buffer for
    /// writing at the same time.
    ///
    /// This is the double-buffer seam for simulations: read the current
    /// frame, write the next one, then [`swap_buffers`](Self::swap_buffers).
    #[inline]
    pub fn split_buffers(&mut self) -> (&[PackedRgb], &mut [PackedRgb]) {
        (&self.pixels, &mut self.scratch)
    }

    /// Copy the primary buffer into the scratch buffer.
    #[inline]
    pub fn copy_to_scratch(&mut self) {
        self.scratch.copy_from_slice(&self.pixels);
    }

    /// Copy the scratch buffer into the primary buffer.
    #[inline]
    pub fn copy_from_scratch(&mut self) {
        self.pixels.copy_from_slice(&self.scratch);
    }

    /// Exchange the primary and scratch buffers.
    ///
    /// Double-buffered simulations compute the next frame into scratch and
    /// swap, avoiding read-after-write hazards during neighbor lookups.
    #[inline]
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.pixels, &mut self.scratch);
    }

    /// Turn every pixel in the primary buffer off.
    #[inline]
    pub fn clear(&mut self) {
        self.pixels.fill(PackedRgb::BLACK);
    }

    /// Turn every pixel in the scratch buffer off.
    #[inline]
    pub fn clear_scratch(&mut self) {
        self.scratch.fill(PackedRgb::BLACK);
    }

    /// Shift every pixel one cell toward the named edge.
    ///
    /// The line shifted out over the edge is discarded; the vacated line on
    /// the opposite edge is left unchanged for the caller to fill.
    pub fn shift_one(&mut self, direction: Direction) {
        let w = self.width as usize;
        let h = self.height as usize;
        match direction {
            Direction::Down => {
                // Rows 0..h-1 become rows 1..h; row 0 is vacated.
                self.pixels.copy_within(0..(h - 1) * w, w);
            }
            Direction::Up => {
                // Rows 1..h become rows 0..h-1; row h-1 is vacated.
                self.pixels.copy_within(w..h * w, 0);
            }
            Direction::Left => {
                // Within each row, columns 1..w move to 0..w-1.
                for y in 0..h {
                    let base = y * w;
                    self.pixels.copy_within(base + 1..base + w, base);
                }
            }
            Direction::Right => {
                for y in 0..h {
                    let base = y * w;
                    self.pixels.copy_within(base..base + w - 1, base + 1);
                }
            }
        }
    }

    /// Fractionally shift the grid toward `direction`.
    ///
    /// Interpolates between the unshifted grid and the fully shifted grid at
    /// `percent` (0–100, clamped), with `incoming` supplying the new edge
    /// line at full weight. Exact at the endpoints: 0 leaves the grid
    /// byte-identical (the incoming line is ignored), 100 equals
    /// [`shift_one`](Self::shift_one) followed by writing `incoming` into
    /// the vacated line.
    ///
    /// `incoming` is read up to the vacated line's length (grid width for
    /// vertical shifts, grid height for horizontal). A short slice leaves
    /// the remaining edge pixels at their shifted value.
    ///
    /// Clobbers the scratch buffer (used as the blend source).
    pub fn shift_fractional(&mut self, direction: Direction, percent: u8, incoming: &[PackedRgb]) {
        let percent = percent.min(100);
        if percent == 0 {
            return;
        }

        self.copy_to_scratch();
        self.shift_one(direction);
        self.write_vacated_line(direction, incoming);

        if percent < 100 {
            for (px, &old) in self.pixels.iter_mut().zip(self.scratch.iter()) {
                *px = lerp_percent(old, *px, percent);
            }
        }
    }

    /// Overwrite the line vacated by a `shift_one(direction)`.
    fn write_vacated_line(&mut self, direction: Direction, line: &[PackedRgb]) {
        let w = self.width as usize;
        let h = self.height as usize;
        match direction {
            Direction::Down => {
                let row = &mut self.pixels[..w];
                for (dst, &src) in row.iter_mut().zip(line) {
                    *dst = src;
                }
            }
            Direction::Up => {
                let row = &mut self.pixels[(h - 1) * w..];
                for (dst, &src) in row.iter_mut().zip(line) {
                    *dst = src;
                }
            }
            Direction::Left => {
                for (y, &src) in (0..h).zip(line) {
                    self.pixels[y * w + (w - 1)] = src;
                }
            }
            Direction::Right => {
                for (y, &src) in (0..h).zip(line) {
                    self.pixels[y * w] = src;
                }
            }
        }
    }
}

/// Per-channel lerp by `percent / 100`, exact at both endpoints.
#[inline]
fn lerp_percent(a: PackedRgb, b: PackedRgb, percent: u8) -> PackedRgb {
    let p = percent as u32;
    let inv = 100 - p;
    PackedRgb::rgb(
        ((a.r() as u32 * inv + b.r() as u32 * p) / 100) as u8,
        ((a.g() as u32 * inv + b.g() as u32 * p) / 100) as u8,
        ((a.b() as u32 * inv + b.b() as u32 * p) / 100) as u8,
    )
}
