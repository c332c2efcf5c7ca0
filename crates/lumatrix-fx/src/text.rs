#![forbid(unsafe_code)]

//! Queued scrolling text.
//!
//! Two pieces:
//! - [`PendingTextQueue`]: a fixed-capacity FIFO of pending strings, each
//!   carrying a palette position and a repeat count. Popping an entry with
//!   a repeat count above one re-queues it (best effort) with the count
//!   decremented, so a string scrolls across the matrix that many times.
//! - [`TextScroller`]: a [`MatrixEffect`] that drains the queue, rendering
//!   one string at a time column by column, scrolling right to left.
//!
//! # Invariants
//! - The ring has [`QUEUE_CAPACITY`] slots; one stays unused to distinguish
//!   full from empty, so at most `QUEUE_CAPACITY - 1` entries are held.
//! - Entries with a repeat count of zero are tombstones: they occupy a slot
//!   until the head passes over them but are never returned.
//! - Accepted strings are at most [`MAX_TEXT_BYTES`] bytes.

use lumatrix_render::{PackedRgb, PixelGrid};
use web_time::Instant;

use crate::engine::{EffectCore, MatrixEffect};
use crate::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};

use std::mem;
use std::time::Duration;

/// Ring size. One slot is reserved, so `QUEUE_CAPACITY - 1` strings fit.
pub const QUEUE_CAPACITY: usize = 64;
/// Longest string the queue accepts, in bytes.
pub const MAX_TEXT_BYTES: usize = 255;
/// Default interval between scroll steps.
pub const DEFAULT_TEXT_DELAY: Duration = Duration::from_millis(200);

// ---------------------------------------------------------------------------
// PendingTextQueue
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct StringEntry {
    text: String,
    color_pos: u8,
    repeat: u8,
}

/// A string popped from the queue, ready to scroll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueuedText {
    pub text: String,
    /// Palette position (0..=255) used to pick the string's color.
    pub color_pos: u8,
}

/// Fixed-capacity ring buffer of pending strings.
///
/// `head` is the oldest live slot, `tail` the next free one. `head == tail`
/// means empty and `tail + 1 == head` (mod [`QUEUE_CAPACITY`]) means full.
#[derive(Clone, Debug)]
pub struct PendingTextQueue {
    entries: Vec<StringEntry>,
    head: usize,
    tail: usize,
}

impl Default for PendingTextQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingTextQueue {
    pub fn new() -> Self {
        Self {
            entries: vec![StringEntry::default(); QUEUE_CAPACITY],
            head: 0,
            tail: 0,
        }
    }

    /// Number of occupied slots, tombstones included.
    #[inline]
    pub fn len(&self) -> usize {
        let cap = self.entries.len();
        (self.tail + cap - self.head) % cap
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        (self.tail + 1) % self.entries.len() == self.head
    }

    /// Queue a string to scroll `repeat` times in the palette color at
    /// `color_pos`. Returns false when the queue is full or the string
    /// exceeds [`MAX_TEXT_BYTES`].
    pub fn push(&mut self, text: impl Into<String>, color_pos: u8, repeat: u8) -> bool {
        let text = text.into();
        if text.len() > MAX_TEXT_BYTES {
            #[cfg(feature = "tracing")]
            tracing::warn!(len = text.len(), "rejecting over-long text");
            return false;
        }
        self.push_entry(StringEntry {
            text,
            color_pos,
            repeat,
        })
    }

    fn push_entry(&mut self, entry: StringEntry) -> bool {
        if self.is_full() {
            #[cfg(feature = "tracing")]
            tracing::debug!("text queue full, dropping entry");
            return false;
        }
        self.entries[self.tail] = entry;
        self.tail = (self.tail + 1) % self.entries.len();
        true
    }

    /// Pop the oldest live entry, skipping tombstones. An entry with a
    /// repeat count above one is re-queued with the count decremented; if
    /// the queue is full at that moment the remaining repeats are dropped.
    pub fn pop_first(&mut self) -> Option<QueuedText> {
        let cap = self.entries.len();
        while self.head != self.tail {
            if self.entries[self.head].repeat == 0 {
                self.head = (self.head + 1) % cap;
                continue;
            }
            let entry = mem::take(&mut self.entries[self.head]);
            self.head = (self.head + 1) % cap;
            if entry.repeat > 1 {
                let requeued = self.push_entry(StringEntry {
                    repeat: entry.repeat - 1,
                    ..entry.clone()
                });
                #[cfg(feature = "tracing")]
                if !requeued {
                    tracing::debug!(remaining = entry.repeat - 1, "dropping repeats, queue full");
                }
                #[cfg(not(feature = "tracing"))]
                let _ = requeued;
            }
            return Some(QueuedText {
                text: entry.text,
                color_pos: entry.color_pos,
            });
        }
        None
    }

    /// Zero the repeat count of the oldest live entry, turning it into a
    /// tombstone so it never scrolls.
    pub fn cancel_first(&mut self) -> bool {
        let cap = self.entries.len();
        let mut idx = self.head;
        while idx != self.tail {
            if self.entries[idx].repeat > 0 {
                self.entries[idx].repeat = 0;
                return true;
            }
            idx = (idx + 1) % cap;
        }
        false
    }

    /// Drop everything, live and tombstone alike.
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            *entry = StringEntry::default();
        }
        self.head = 0;
        self.tail = 0;
    }
}

// ---------------------------------------------------------------------------
// TextScroller
// ---------------------------------------------------------------------------

/// Scrolls queued strings across the matrix, right to left.
///
/// Strings are rasterized lazily into a column list: [`GLYPH_WIDTH`] columns
/// per character with one blank spacer column between characters. Once the
/// last column has been drawn the scroller goes inactive; already-drawn
/// columns keep sliding out as the next string (if any) scrolls in.
pub struct TextScroller {
    core: EffectCore,
    queue: PendingTextQueue,
    columns: Vec<u8>,
    col_ptr: usize,
    color: PackedRgb,
    active: bool,
}

impl Default for TextScroller {
    fn default() -> Self {
        Self::new()
    }
}

impl TextScroller {
    pub fn new() -> Self {
        Self {
            core: EffectCore::new(DEFAULT_TEXT_DELAY),
            queue: PendingTextQueue::new(),
            columns: Vec::new(),
            col_ptr: 0,
            color: PackedRgb::WHITE,
            active: false,
        }
    }

    #[inline]
    pub fn queue(&self) -> &PendingTextQueue {
        &self.queue
    }

    #[inline]
    pub fn queue_mut(&mut self) -> &mut PendingTextQueue {
        &mut self.queue
    }

    /// Convenience forward to [`PendingTextQueue::push`].
    pub fn queue_text(&mut self, text: impl Into<String>, color_pos: u8, repeat: u8) -> bool {
        self.queue.push(text, color_pos, repeat)
    }

    /// True while a string is mid-scroll or more strings are pending.
    #[inline]
    pub fn displaying_text(&self) -> bool {
        self.active || !self.queue.is_empty()
    }

    /// Abort the string currently scrolling, if any.
    pub fn stop_current(&mut self, grid: &mut PixelGrid) {
        self.active = false;
        self.columns.clear();
        self.col_ptr = 0;
        grid.clear();
    }

    fn load_next(&mut self) -> bool {
        let Some(next) = self.queue.pop_first() else {
            return false;
        };
        self.color = self
            .core
            .palette()
            .color_at(next.color_pos, 255, self.core.blend());
        self.columns.clear();
        for (i, ch) in next.text.chars().enumerate() {
            if i > 0 {
                self.columns.push(0);
            }
            self.columns.extend_from_slice(&font::glyph(ch));
        }
        self.col_ptr = 0;
        self.active = true;
        true
    }

    /// Number of columns `text` rasterizes to: five per character plus one
    /// spacer between characters. Exposed for width planning by callers.
    pub fn raster_width(text: &str) -> usize {
        let chars = text.chars().count();
        if chars == 0 {
            0
        } else {
            chars * GLYPH_WIDTH + (chars - 1)
        }
    }

    fn draw_column(&self, grid: &mut PixelGrid, bits: u8) {
        let x = grid.width() - 1;
        let y0 = (grid.height().saturating_sub(GLYPH_HEIGHT as u8)) / 2;
        for y in 0..grid.height() {
            let row = y.checked_sub(y0).map(usize::from);
            let lit = matches!(row, Some(r) if r < GLYPH_HEIGHT && bits >> r & 1 == 1);
            let color = if lit { self.color } else { PackedRgb::BLACK };
            grid.set(x, y, color);
        }
    }
}

impl MatrixEffect for TextScroller {
    fn name(&self) -> &'static str {
        "text"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn setup(&mut self, grid: &mut PixelGrid) {
        grid.clear();
        self.active = false;
        self.columns.clear();
        self.col_ptr = 0;
    }

    fn advance(&mut self, grid: &mut PixelGrid, now: Instant) -> bool {
        if !self.core.ready(now) {
            return false;
        }
        if !self.active && !self.load_next() {
            return false;
        }
        grid.shift_one(lumatrix_render::Direction::Left);
        let bits = self.columns.get(self.col_ptr).copied().unwrap_or(0);
        self.draw_column(grid, bits);
        self.col_ptr += 1;
        if self.col_ptr >= self.columns.len() {
            self.active = false;
            self.columns.clear();
            self.col_ptr = 0;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn drain(queue: &mut PendingTextQueue) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(item) = queue.pop_first() {
            out.push(item.text);
        }
        out
    }

    #[test]
    fn fifo_order() {
        let mut q = PendingTextQueue::new();
        assert!(q.push("first", 0, 1));
        assert!(q.push("second", 0, 1));
        assert!(q.push("third", 0, 1));
        assert_eq!(drain(&mut q), ["first", "second", "third"]);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut q = PendingTextQueue::new();
        for i in 0..QUEUE_CAPACITY - 1 {
            assert!(q.push(format!("s{i}"), 0, 1), "slot {i} should fit");
        }
        assert!(q.is_full());
        assert!(!q.push("overflow", 0, 1));
        assert_eq!(q.len(), QUEUE_CAPACITY - 1);
    }

    #[test]
    fn over_long_text_is_rejected() {
        let mut q = PendingTextQueue::new();
        assert!(q.push("x".repeat(MAX_TEXT_BYTES), 0, 1));
        assert!(!q.push("x".repeat(MAX_TEXT_BYTES + 1), 0, 1));
    }

    #[test]
    fn repeat_requeues_with_decremented_count() {
        let mut q = PendingTextQueue::new();
        q.push("again", 10, 3);
        assert_eq!(drain(&mut q), ["again", "again", "again"]);
        assert!(q.is_empty());
    }

    #[test]
    fn zero_repeat_entries_are_skipped() {
        let mut q = PendingTextQueue::new();
        q.push("ghost", 0, 0);
        q.push("real", 0, 1);
        assert_eq!(drain(&mut q), ["real"]);
    }

    #[test]
    fn cancel_first_tombstones_oldest_live_entry() {
        let mut q = PendingTextQueue::new();
        q.push("doomed", 0, 5);
        q.push("keeper", 0, 1);
        assert!(q.cancel_first());
        assert_eq!(drain(&mut q), ["keeper"]);
        assert!(!q.cancel_first());
    }

    #[test]
    fn requeue_survives_a_full_queue() {
        let mut q = PendingTextQueue::new();
        q.push("looper", 0, 2);
        for i in 0..QUEUE_CAPACITY - 2 {
            q.push(format!("f{i}"), 0, 1);
        }
        assert!(q.is_full());
        // Popping frees the head slot before the re-push, so the second
        // repeat lands at the back of the line.
        let first = q.pop_first().unwrap();
        assert_eq!(first.text, "looper");
        let rest = drain(&mut q);
        assert_eq!(rest.last().map(String::as_str), Some("looper"));
    }

    #[test]
    fn raster_width_counts_glyphs_and_spacers() {
        assert_eq!(TextScroller::raster_width(""), 0);
        assert_eq!(TextScroller::raster_width("A"), 5);
        assert_eq!(TextScroller::raster_width("HI"), 11);
    }

    #[test]
    fn scroller_emits_glyph_columns_then_goes_idle() {
        let mut fx = TextScroller::new();
        fx.core_mut().timer_mut().set_delay(Duration::ZERO);
        let mut grid = PixelGrid::new(8, 7);
        fx.setup(&mut grid);
        fx.queue_text("I", 0, 1);
        assert!(fx.displaying_text());

        let t0 = Instant::now();
        // 'I' rasterizes to exactly 5 glyph columns.
        for step in 0..5 {
            assert!(fx.displaying_text());
            assert!(fx.advance(&mut grid, t0), "step {step} should draw");
        }
        assert!(!fx.displaying_text());
        assert!(!fx.advance(&mut grid, t0), "idle scroller draws nothing");
    }

    #[test]
    fn two_char_string_occupies_eleven_columns() {
        let mut fx = TextScroller::new();
        fx.core_mut().timer_mut().set_delay(Duration::ZERO);
        let mut grid = PixelGrid::new(16, 7);
        fx.setup(&mut grid);
        fx.queue_text("HI", 0, 1);
        let t0 = Instant::now();
        let mut drawn = 0;
        while fx.displaying_text() {
            assert!(fx.advance(&mut grid, t0));
            drawn += 1;
        }
        // 2 chars x 5 columns + 1 inter-char spacer.
        assert_eq!(drawn, 11);
    }

    #[test]
    fn scroller_centers_glyphs_vertically() {
        let mut fx = TextScroller::new();
        fx.core_mut().timer_mut().set_delay(Duration::ZERO);
        let mut grid = PixelGrid::new(8, 11);
        fx.setup(&mut grid);
        fx.queue_text("I", 0, 1);
        let t0 = Instant::now();
        // Advance to the middle column of 'I', which is a full vertical bar.
        for _ in 0..3 {
            fx.advance(&mut grid, t0);
        }
        let x = grid.width() - 1;
        // (11 - 7) / 2 = 2 rows of margin above and below.
        assert_eq!(grid.get(x, 1), Some(PackedRgb::BLACK));
        assert_ne!(grid.get(x, 2), Some(PackedRgb::BLACK));
        assert_ne!(grid.get(x, 8), Some(PackedRgb::BLACK));
        assert_eq!(grid.get(x, 9), Some(PackedRgb::BLACK));
    }
}
