//! Command-line argument parsing for the Haze renderer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Haze command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "haze", about = "Shadow-mapped volumetric spotlight renderer")]
pub struct CliArgs {
    /// Output width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of frames to render.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Directory PNG frames are written to.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// March steps per pixel.
    #[arg(long)]
    pub samples: Option<u32>,

    /// Fog scattering density.
    #[arg(long)]
    pub density: Option<f32>,

    /// Extinction coefficient.
    #[arg(long)]
    pub extinction: Option<f32>,

    /// Global ambient floor.
    #[arg(long)]
    pub ambient: Option<f32>,

    /// Enable interleaved-gradient dithering of march samples.
    #[arg(long)]
    pub dither: Option<bool>,

    /// Output visualization (normal, transmission, depth).
    #[arg(long)]
    pub visualization: Option<String>,

    /// Key presses applied before the first frame (t = dither, m = mode, ] / [ = ambient).
    #[arg(long)]
    pub keys: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.output.width = w;
        }
        if let Some(h) = args.height {
            self.output.height = h;
        }
        if let Some(frames) = args.frames {
            self.output.frames = frames;
        }
        if let Some(ref dir) = args.output {
            self.output.directory = dir.clone();
        }
        if let Some(samples) = args.samples {
            self.medium.sample_count = samples;
        }
        if let Some(density) = args.density {
            self.medium.density = density;
        }
        if let Some(extinction) = args.extinction {
            self.medium.extinction = extinction;
        }
        if let Some(ambient) = args.ambient {
            self.medium.ambient_floor = ambient.max(0.0);
        }
        if let Some(dither) = args.dither {
            self.medium.dithering = dither;
        }
        if let Some(ref mode) = args.visualization {
            self.debug.visualization = mode.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
