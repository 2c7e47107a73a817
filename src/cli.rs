//! Headless batch front-end: load, edit through the controller, save.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::EditorConfig;
use crate::editor::{EditorCommand, ImageEditor};
use crate::error::AppResult;
use crate::geometry::ToolBounds;
use crate::raster::RasterOp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliOp {
    Grayscale,
    Invert,
    #[value(name = "rotate-cw")]
    RotateCw,
    #[value(name = "rotate-ccw")]
    RotateCcw,
    #[value(name = "flip-h")]
    FlipH,
    #[value(name = "flip-v")]
    FlipV,
}

impl From<CliOp> for RasterOp {
    fn from(op: CliOp) -> Self {
        match op {
            CliOp::Grayscale => Self::Grayscale,
            CliOp::Invert => Self::Invert,
            CliOp::RotateCw => Self::RotateClockwise,
            CliOp::RotateCcw => Self::RotateCounterClockwise,
            CliOp::FlipH => Self::FlipHorizontal,
            CliOp::FlipV => Self::FlipVertical,
        }
    }
}

/// Apply editor operations to an image without opening a window.
#[derive(Parser, Debug)]
#[command(name = "deskedit", version, about = "Headless image editor")]
pub struct CliArgs {
    /// Image to load.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Operation to apply; repeat to chain, applied in order.
    #[arg(long = "op", value_enum, value_name = "OP")]
    pub ops: Vec<CliOp>,

    /// Crop rectangle applied after all operations.
    #[arg(long, value_name = "X,Y,W,H", value_parser = parse_crop)]
    pub crop: Option<ToolBounds>,

    /// Destination; the format follows the extension.
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Enable debug logging (RUST_LOG is honored).
    #[arg(long)]
    pub debug: bool,
}

fn parse_component(part: &str, name: &str) -> Result<i64, String> {
    part.parse::<i64>()
        .map_err(|_| format!("{name} must be an integer, got {part:?}"))
}

pub fn parse_crop(value: &str) -> Result<ToolBounds, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y, width, height] = parts.as_slice() else {
        return Err(format!("expected X,Y,W,H, got {value:?}"));
    };
    let x = i32::try_from(parse_component(x, "X")?).map_err(|_| "X is out of range")?;
    let y = i32::try_from(parse_component(y, "Y")?).map_err(|_| "Y is out of range")?;
    let width = u32::try_from(parse_component(width, "W")?).map_err(|_| "W must be positive")?;
    let height = u32::try_from(parse_component(height, "H")?).map_err(|_| "H must be positive")?;
    Ok(ToolBounds::new(x, y, width, height))
}

/// Runs one batch job. A crop that collapses after clamping is skipped with a warning.
pub fn run(args: &CliArgs, config: &EditorConfig) -> AppResult<()> {
    let mut editor = ImageEditor::new(config);
    editor.load_file(&args.input)?;

    for &op in &args.ops {
        editor.execute(EditorCommand::Raster(op.into()));
        tracing::info!(op = RasterOp::from(op).label(), "applied");
    }
    if let Some(bounds) = args.crop {
        if !editor.execute(EditorCommand::Crop(bounds)) {
            tracing::warn!(?bounds, "crop skipped: region is empty after clamping");
        }
    }

    editor.save_file(&args.output)?;
    tracing::info!(output = %args.output.display(), "{}", editor.status());
    Ok(())
}
