//! Errors surfaced by the viewer binary.

use crate::platform::PlatformError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] terra_config::ConfigError),

    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
