#![forbid(unsafe_code)]

//! Lumatrix demo binary entry point.
//!
//! Runs the effect set against an in-memory pixel grid and presents it in
//! the terminal with half-block glyphs. `RUST_LOG` controls log output.

mod cli;
mod term;

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use lumatrix::prelude::*;
use lumatrix::{
    BouncingPixels, LifeSimulator, LinesEffect, RainEffect, TwinkleEffect, WormEffect,
};
use term::TermCanvas;
use tracing_subscriber::EnvFilter;

const EFFECT_NAMES: [&str; 7] = ["text", "rain", "bounce", "life", "twinkle", "worm", "lines"];

fn build_effect(name: &str, text: Option<&str>) -> Box<dyn MatrixEffect> {
    match name {
        "text" => {
            let mut fx = TextScroller::new();
            let message = text.unwrap_or("LUMATRIX");
            if !fx.queue_text(message, 0, 255) {
                tracing::warn!(message, "could not queue demo text");
            }
            Box::new(fx)
        }
        "bounce" => Box::new(BouncingPixels::new()),
        "life" => Box::new(LifeSimulator::new()),
        "twinkle" => Box::new(TwinkleEffect::new()),
        "worm" => Box::new(WormEffect::new()),
        "lines" => Box::new(LinesEffect::new()),
        _ => Box::new(RainEffect::new()),
    }
}

fn run(opts: cli::Opts) -> Result<()> {
    let mut grid = PixelGrid::new(opts.width, opts.height);
    let mut effect_idx = EFFECT_NAMES
        .iter()
        .position(|n| *n == opts.effect)
        .unwrap_or(1);
    let mut effect = build_effect(EFFECT_NAMES[effect_idx], opts.text.as_deref());
    effect.setup(&mut grid);
    tracing::info!(effect = effect.name(), "starting");

    let mut canvas = TermCanvas::new()?;
    let started = Instant::now();
    loop {
        if opts.exit_after_ms > 0
            && started.elapsed() >= Duration::from_millis(opts.exit_after_ms)
        {
            return Ok(());
        }
        if event::poll(Duration::from_millis(1))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('n') => {
                            effect_idx = (effect_idx + 1) % EFFECT_NAMES.len();
                            effect = build_effect(EFFECT_NAMES[effect_idx], opts.text.as_deref());
                            effect.setup(&mut grid);
                            tracing::info!(effect = effect.name(), "switched effect");
                        }
                        KeyCode::Char('p') => {
                            effect.next_palette();
                        }
                        KeyCode::Char('b') => {
                            let core = effect.core_mut();
                            let next = match core.blend() {
                                Blend::Linear => Blend::Step,
                                Blend::Step => Blend::Linear,
                            };
                            core.set_blend(next);
                        }
                        _ => {}
                    }
                }
            }
        }
        if effect.advance(&mut grid, Instant::now()) {
            let status = format!(
                "[{}] palette {}  (n: effect, p: palette, b: blend, q: quit)",
                effect.name(),
                effect.core().palettes().current().name
            );
            canvas.present(&grid, &status)?;
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = cli::Opts::parse();
    if let Err(e) = run(opts) {
        eprintln!("demo error: {e}");
        std::process::exit(1);
    }
}
