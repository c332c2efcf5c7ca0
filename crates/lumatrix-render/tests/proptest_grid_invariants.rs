//! Property-based invariant tests for the pixel grid.
//!
//! These verify the addressing and shift contracts for any valid inputs:
//!
//! 1. `index` and `index_unchecked` agree on every in-bounds coordinate.
//! 2. `index` returns `None` for every out-of-bounds coordinate.
//! 3. A fractional shift at 0% is the identity (incoming line ignored).
//! 4. A fractional shift at 100% equals a whole shift plus the incoming
//!    line written into the vacated edge.
//! 5. Shifts never disturb lines other than the ones they define.

use lumatrix_render::{Direction, PackedRgb, PixelGrid};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn dims_strategy() -> impl Strategy<Value = (u8, u8)> {
    (1u8..=32, 1u8..=32)
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

/// Deterministically color every cell from its coordinates.
fn filled(width: u8, height: u8) -> PixelGrid {
    let mut grid = PixelGrid::new(width, height);
    for y in 0..height {
        for x in 0..width {
            grid.set_unchecked(x, y, PackedRgb::rgb(x, y, x ^ y));
        }
    }
    grid
}

/// Incoming edge line long enough for either shift axis.
fn incoming_line(len: usize) -> Vec<PackedRgb> {
    (0..len).map(|i| PackedRgb::rgb(i as u8, 201, 33)).collect()
}

/// Reference model: where does the pixel at (x, y) come from after a
/// one-cell shift, `None` when (x, y) sits on the vacated line.
fn shifted_source(direction: Direction, x: u8, y: u8, w: u8, h: u8) -> Option<(u8, u8)> {
    match direction {
        Direction::Down => (y > 0).then(|| (x, y - 1)),
        Direction::Up => (y < h - 1).then(|| (x, y + 1)),
        Direction::Left => (x < w - 1).then(|| (x + 1, y)),
        Direction::Right => (x > 0).then(|| (x - 1, y)),
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Safe and unchecked indexing agree; out-of-range yields None
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn index_agreement((w, h) in dims_strategy(), x in any::<u8>(), y in any::<u8>()) {
        let grid = PixelGrid::new(w, h);
        match grid.index(x, y) {
            Some(i) => {
                prop_assert!(x < w && y < h);
                prop_assert_eq!(i, grid.index_unchecked(x, y));
                prop_assert!(i < grid.len());
            }
            None => prop_assert!(x >= w || y >= h),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Zero-percent fractional shift is the identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fractional_shift_zero_is_identity(
        (w, h) in dims_strategy(),
        direction in direction_strategy(),
    ) {
        let mut grid = filled(w, h);
        let before = grid.pixels().to_vec();
        grid.shift_fractional(direction, 0, &incoming_line(w.max(h) as usize));
        prop_assert_eq!(grid.pixels(), &before[..]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Full fractional shift equals whole shift + incoming edge line
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fractional_shift_full_matches_whole_shift(
        (w, h) in dims_strategy(),
        direction in direction_strategy(),
    ) {
        let line = incoming_line(w.max(h) as usize);

        let mut fractional = filled(w, h);
        fractional.shift_fractional(direction, 100, &line);

        let mut stepped = filled(w, h);
        stepped.shift_one(direction);
        // Write the incoming line into the vacated edge by hand.
        match direction {
            Direction::Down => {
                for x in 0..w {
                    stepped.set(x, 0, line[x as usize]);
                }
            }
            Direction::Up => {
                for x in 0..w {
                    stepped.set(x, h - 1, line[x as usize]);
                }
            }
            Direction::Left => {
                for y in 0..h {
                    stepped.set(w - 1, y, line[y as usize]);
                }
            }
            Direction::Right => {
                for y in 0..h {
                    stepped.set(0, y, line[y as usize]);
                }
            }
        }

        prop_assert_eq!(fractional.pixels(), stepped.pixels());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Whole shifts move pixels exactly one cell, vacated line untouched
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn whole_shift_matches_reference_model(
        (w, h) in dims_strategy(),
        direction in direction_strategy(),
    ) {
        let before = filled(w, h);
        let mut grid = before.clone();
        grid.shift_one(direction);

        for y in 0..h {
            for x in 0..w {
                let expected = match shifted_source(direction, x, y, w, h) {
                    Some((sx, sy)) => before.get(sx, sy),
                    // Vacated line keeps its old contents.
                    None => before.get(x, y),
                };
                prop_assert_eq!(grid.get(x, y), expected);
            }
        }
    }
}
