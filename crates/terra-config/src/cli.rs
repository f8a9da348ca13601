//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Terra viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "terra", about = "Fly around a textured planet")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Translation speed in units per second.
    #[arg(long)]
    pub movement_speed: Option<f32>,

    /// Rotation speed in radians per second.
    #[arg(long)]
    pub roll_speed: Option<f32>,

    /// Move forward without holding a key.
    #[arg(long)]
    pub auto_forward: Option<bool>,

    /// Integrate rotation only while dragging.
    #[arg(long)]
    pub drag_to_look: Option<bool>,

    /// Starfield seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run this many frames without a window, then exit.
    #[arg(long, value_name = "FRAMES")]
    pub headless: Option<u32>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(speed) = args.movement_speed {
            self.controls.movement_speed = speed;
        }
        if let Some(speed) = args.roll_speed {
            self.controls.roll_speed = speed;
        }
        if let Some(auto) = args.auto_forward {
            self.controls.auto_forward = auto;
        }
        if let Some(drag) = args.drag_to_look {
            self.controls.drag_to_look = drag;
        }
        if let Some(seed) = args.seed {
            self.stars.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
