//! Command-line interface implementation
//!
//! All flag validation lives here: the core transforms receive parameters
//! this layer has already checked (and re-check them defensively). Each
//! input file runs its pipeline independently; one failure is reported and
//! the batch moves on.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::ops::{FrameOp, RecolorOp, ResizeOp};
use crate::pipeline::run_pipeline;

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// gifwork - Resize and recolor animated GIFs without breaking their palettes
#[derive(Parser)]
#[command(name = "gifwork")]
#[command(about = "Resize and recolor animated GIFs without breaking their palettes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resize GIFs with the given paths
    Resize {
        /// Folder to put edited GIFs in
        output: PathBuf,

        /// Paths to GIFs
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output width in pixels
        #[arg(short = 'W', long, value_parser = clap::value_parser!(u16).range(1..))]
        width: Option<u16>,

        /// Output height in pixels
        #[arg(short = 'H', long, value_parser = clap::value_parser!(u16).range(1..))]
        height: Option<u16>,

        /// Output width scale as a float (requires --scale-height)
        #[arg(long, allow_negative_numbers = true)]
        scale_width: Option<f64>,

        /// Output height scale as a float (requires --scale-width)
        #[arg(long, allow_negative_numbers = true)]
        scale_height: Option<f64>,

        /// Output scale as a float, both axes
        #[arg(short = 'S', long, allow_negative_numbers = true)]
        scale: Option<f64>,
    },

    /// Recolor GIFs with the given paths
    Recolor {
        /// Folder to put edited GIFs in
        output: PathBuf,

        /// Paths to GIFs
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Hue shift in degrees (-180 to 180)
        #[arg(short = 'H', long, allow_negative_numbers = true)]
        hue: Option<f64>,

        /// Set hue value in degrees (0 to 360)
        #[arg(long)]
        set_hue: Option<f64>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let (output, paths, op) = match cli.command {
        Commands::Resize { output, paths, width, height, scale_width, scale_height, scale } => {
            match resolve_resize_op(width, height, scale_width, scale_height, scale) {
                Ok(op) => (output, paths, op),
                Err(msg) => {
                    eprintln!("Error: {}", msg);
                    return ExitCode::from(EXIT_INVALID_ARGS);
                }
            }
        }
        Commands::Recolor { output, paths, hue, set_hue } => {
            match resolve_recolor_op(hue, set_hue) {
                Ok(op) => (output, paths, op),
                Err(msg) => {
                    eprintln!("Error: {}", msg);
                    return ExitCode::from(EXIT_INVALID_ARGS);
                }
            }
        }
    };

    run_batch(&output, &paths, &op)
}

/// Pick the resize variant from the mutually exclusive flag shapes.
pub fn resolve_resize_op(
    width: Option<u16>,
    height: Option<u16>,
    scale_width: Option<f64>,
    scale_height: Option<f64>,
    scale: Option<f64>,
) -> Result<FrameOp, String> {
    let has_pixel_size = width.is_some() || height.is_some();
    let has_scale_pair = scale_width.is_some() || scale_height.is_some();
    let has_aspect_scale = scale.is_some();

    if (has_pixel_size && has_scale_pair)
        || (has_pixel_size && has_aspect_scale)
        || (has_scale_pair && has_aspect_scale)
    {
        return Err("cannot combine absolute size and scaled size".to_string());
    }
    if scale_width.is_some() != scale_height.is_some() {
        return Err(
            "must have both --scale-width and --scale-height parameters present".to_string()
        );
    }

    let op = match (width, height, scale_width, scale_height, scale) {
        (Some(w), Some(h), ..) => ResizeOp::exact(w, h),
        (Some(w), None, ..) => ResizeOp::aspect_width(w),
        (None, Some(h), ..) => ResizeOp::aspect_height(h),
        (_, _, Some(sw), Some(sh), _) => ResizeOp::scale_exact(sw, sh),
        (.., Some(s)) => ResizeOp::scale_aspect(s),
        _ => return Err("no resize parameters given".to_string()),
    };
    op.map(FrameOp::from).map_err(|e| e.to_string())
}

/// Pick the recolor variant from the mutually exclusive hue flags.
pub fn resolve_recolor_op(hue: Option<f64>, set_hue: Option<f64>) -> Result<FrameOp, String> {
    let op = match (hue, set_hue) {
        (Some(_), Some(_)) => return Err("cannot shift hue and set hue".to_string()),
        (Some(degrees), None) => RecolorOp::hue_shift(degrees),
        (None, Some(degrees)) => RecolorOp::hue_set(degrees),
        (None, None) => return Err("no recolor parameters given".to_string()),
    };
    op.map(FrameOp::from).map_err(|e| e.to_string())
}

/// Returns true if the path has a `.gif` extension.
pub fn is_gif_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
}

/// Process every input through the pipeline, continuing past failures.
fn run_batch(output: &Path, paths: &[PathBuf], op: &FrameOp) -> ExitCode {
    if !output.is_dir() {
        eprintln!("Error: output location '{}' must be a folder", output.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    if let Some(bad) = paths.iter().find(|p| !is_gif_path(p)) {
        eprintln!("Error: all paths must be GIFs, got '{}'", bad.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut failed = false;
    for path in paths {
        println!("Performing {} on {}...", op.describe(), path.display());
        match run_pipeline(path, output, op) {
            Ok(out_path) => println!("Saved: {}", out_path.display()),
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
