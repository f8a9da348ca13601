//! The binary entry point for the Terra viewer.

use clap::Parser;
use terra_app::platform::PlatformDirs;
use terra_app::{AppError, StartupConfig, headless, window};
use terra_config::CliArgs;
use tracing::{error, info};

fn main() {
    if let Err(e) = run() {
        error!("{e}");
        eprintln!("terra: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = CliArgs::parse();

    let mut dirs = PlatformDirs::resolve()?;
    if let Some(config_dir) = args.config.clone() {
        dirs = dirs.with_config_dir(config_dir);
    }
    dirs.create_dirs()?;

    let startup = StartupConfig::load(&dirs.config_dir, &args)?;
    terra_log::init_logging(
        Some(&dirs.log_dir),
        cfg!(debug_assertions),
        Some(&startup.config),
    );
    startup.log_origin();

    let config = startup.config;
    info!("Terra viewer: {}x{}", config.window.width, config.window.height);

    if let Some(frames) = args.headless {
        headless::fly(&config, frames);
        return Ok(());
    }

    window::run(config, &dirs)
}
