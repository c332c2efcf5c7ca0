#![forbid(unsafe_code)]

//! Terminal presenter for the pixel grid.
//!
//! Renders two matrix rows per terminal row using the upper-half-block
//! glyph: the foreground color carries the top pixel, the background the
//! bottom one. A raw-mode guard restores the terminal on drop, panics
//! included.

use std::io::{self, Write};

use crossterm::style::{Color, Colors, Print, ResetColor, SetColors};
use crossterm::{cursor, execute, queue, terminal};
use lumatrix::{PackedRgb, PixelGrid};

const HALF_BLOCK: &str = "\u{2580}";

fn to_term(color: PackedRgb) -> Color {
    Color::Rgb {
        r: color.r(),
        g: color.g(),
        b: color.b(),
    }
}

/// Raw-mode terminal session. Restores the cooked terminal on drop.
pub struct TermCanvas {
    out: io::Stdout,
}

impl TermCanvas {
    pub fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { out })
    }

    /// Paint the whole grid plus a one-line status footer.
    pub fn present(&mut self, grid: &PixelGrid, status: &str) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0))?;
        let height = grid.height();
        for top in (0..height).step_by(2) {
            for x in 0..grid.width() {
                let upper = grid.get(x, top).unwrap_or(PackedRgb::BLACK);
                let lower = if top + 1 < height {
                    grid.get(x, top + 1).unwrap_or(PackedRgb::BLACK)
                } else {
                    PackedRgb::BLACK
                };
                queue!(
                    self.out,
                    SetColors(Colors::new(to_term(upper), to_term(lower))),
                    Print(HALF_BLOCK)
                )?;
            }
            queue!(self.out, ResetColor, Print("\r\n"))?;
        }
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::CurrentLine),
            Print(status),
            Print("\r")
        )?;
        self.out.flush()
    }
}

impl Drop for TermCanvas {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
