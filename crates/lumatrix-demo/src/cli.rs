#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo binary.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `LUMATRIX_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Lumatrix Demo — LED-matrix effects in your terminal

USAGE:
    lumatrix-demo [OPTIONS]

OPTIONS:
    --width=N            Matrix width in pixels (default: 32)
    --height=N           Matrix height in pixels (default: 16)
    --effect=NAME        Starting effect: text, rain, bounce, life,
                         twinkle, worm, lines (default: rain)
    --text=STRING        Queue a string for the text effect
    --exit-after-ms=N    Auto-quit after N milliseconds (for testing)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    n               Next effect
    p               Next palette
    b               Toggle step/linear palette blending
    q / Ctrl+C      Quit

ENVIRONMENT VARIABLES:
    LUMATRIX_DEMO_WIDTH    Override --width
    LUMATRIX_DEMO_HEIGHT   Override --height
    LUMATRIX_DEMO_EFFECT   Override --effect";

/// Parsed command-line options.
pub struct Opts {
    pub width: u8,
    pub height: u8,
    pub effect: String,
    pub text: Option<String>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            width: 32,
            height: 16,
            effect: "rain".into(),
            text: None,
            exit_after_ms: 0,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(val) = env::var("LUMATRIX_DEMO_WIDTH")
            && let Ok(n) = val.parse()
        {
            opts.width = n;
        }
        if let Ok(val) = env::var("LUMATRIX_DEMO_HEIGHT")
            && let Ok(n) = val.parse()
        {
            opts.height = n;
        }
        if let Ok(val) = env::var("LUMATRIX_DEMO_EFFECT") {
            opts.effect = val;
        }

        let args: Vec<String> = env::args().skip(1).collect();
        for arg in &args {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("lumatrix-demo {VERSION}");
                    process::exit(0);
                }
                other => {
                    if let Some(val) = other.strip_prefix("--width=") {
                        match val.parse() {
                            Ok(n @ 1..) => opts.width = n,
                            _ => fail(other, "expected 1-255"),
                        }
                    } else if let Some(val) = other.strip_prefix("--height=") {
                        match val.parse() {
                            Ok(n @ 1..) => opts.height = n,
                            _ => fail(other, "expected 1-255"),
                        }
                    } else if let Some(val) = other.strip_prefix("--effect=") {
                        opts.effect = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--text=") {
                        opts.text = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        match val.parse() {
                            Ok(n) => opts.exit_after_ms = n,
                            Err(_) => fail(other, "expected a number"),
                        }
                    } else {
                        fail(other, "unknown option");
                    }
                }
            }
        }
        opts
    }
}

fn fail(arg: &str, why: &str) -> ! {
    eprintln!("invalid argument '{arg}': {why}");
    eprintln!("run with --help for usage");
    process::exit(2);
}
