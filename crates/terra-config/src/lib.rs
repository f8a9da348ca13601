//! Configuration for the Terra viewer.
//!
//! Settings persist to disk as `config.ron`, unknown or missing fields fall
//! back to defaults, and command-line flags override loaded values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, ControlsConfig, DebugConfig, PlanetConfig, StarsConfig, WindowConfig,
};
pub use error::ConfigError;
