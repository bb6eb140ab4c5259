//! Blockfall: falling-block puzzle game in the terminal.

mod app;
mod arena;
mod game;
mod input;
mod piece;
mod player;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use piece::PieceSet;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::Level;

/// Options derived from CLI that shape the board and the gravity clock.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub drop_interval: Duration,
    pub pieces: PieceSet,
    pub seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.log_level)?;

    let theme = match theme::Theme::load(args.theme.as_deref(), args.palette) {
        Ok(theme) => theme,
        Err(e) => {
            tracing::warn!("theme not loaded ({e}), using defaults");
            let mut theme = theme::Theme::default();
            theme.apply_palette(args.palette);
            theme
        }
    };
    let config = GameConfig {
        width: usize::from(args.width),
        height: usize::from(args.height),
        drop_interval: Duration::from_millis(args.drop_interval_ms),
        pieces: args.pieces,
        seed: args.seed,
    };
    tracing::info!(
        width = config.width,
        height = config.height,
        pieces = %config.pieces,
        "starting"
    );
    let mut app = App::new(&config, theme);
    app.run()?;
    Ok(())
}

/// The TUI owns stdout, so log lines only go to a file when one is given.
fn init_logging(path: Option<&std::path::Path>, level: Level) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Falling-block puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockfall",
    version,
    about = "Falling-block puzzle in the terminal. Complete rows to clear them; topping out wipes the board.",
    long_about = "Blockfall is a small falling-block puzzle game.\n\n\
        Pieces fall on a fixed timer. Fill a row edge to edge to clear it. If a new piece \
        cannot spawn, the whole board is cleared and play continues.\n\n\
        CONTROLS:\n  Left/Right  Move    Down      Drop one row\n  q           Rotate CCW   w / Up  Rotate CW\n  Esc / Ctrl-C  Quit"
)]
pub struct Args {
    /// Board width in columns.
    #[arg(long, default_value = "12", value_name = "COLS", value_parser = clap::value_parser!(u16).range(4..=64))]
    pub width: u16,

    /// Board height in rows.
    #[arg(long, default_value = "20", value_name = "ROWS", value_parser = clap::value_parser!(u16).range(4..=64))]
    pub height: u16,

    /// Milliseconds between automatic drops.
    #[arg(long, default_value = "500", value_name = "MS")]
    pub drop_interval_ms: u64,

    /// Piece kinds to spawn from, picked uniformly (e.g. "IO" for practice).
    #[arg(long, default_value = "TJLOSZI", value_name = "SYMBOLS")]
    pub pieces: PieceSet,

    /// Seed for the spawn order; random when not set.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]="value"). Classic colours if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Write logs to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level when --log-file is set (error, warn, info, debug, trace).
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}
