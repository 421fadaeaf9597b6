//! Command-line argument parsing for the headless shell.

use clap::Parser;
use std::path::PathBuf;

/// Lay out and render a docked expression without a window
#[derive(Parser, Debug, Default)]
#[command(name = "symdock", version, about = "Headless docking-tree expression editor")]
pub struct CliArgs {
    /// WidgetSpec document: one record or an array of root records
    #[arg(value_name = "SPEC")]
    pub spec: Option<PathBuf>,

    /// Editor configuration (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pointer events to replay (JSON array)
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Stack the roots in the middle of the canvas before output
    #[arg(long)]
    pub centre: bool,

    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    #[arg(long, default_value_t = 800.0)]
    pub height: f64,

    /// Text typed by the user, passed through to the output
    #[arg(long, value_name = "TEXT")]
    pub input: Option<String>,

    /// Include the display list in the output
    #[arg(long)]
    pub paint: bool,
}
