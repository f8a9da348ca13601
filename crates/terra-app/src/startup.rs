//! Loading the config before logging exists.
//!
//! The log level lives in the config, so the subscriber is installed after
//! the file is read. [`StartupConfig`] remembers where the config came from
//! so that it can be reported once logging is up.

use std::path::{Path, PathBuf};

use terra_config::{CliArgs, Config};
use tracing::info;

use crate::AppError;

/// The config as resolved at start-up, with its origin.
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub config: Config,
    pub path: PathBuf,
    /// True when the defaults were written because no file existed.
    pub created: bool,
}

impl StartupConfig {
    /// Loads or creates `config.ron` in `config_dir` and applies `args`.
    pub fn load(config_dir: &Path, args: &CliArgs) -> Result<Self, AppError> {
        let path = Config::path_in(config_dir);
        let created = !path.exists();
        let mut config = Config::load_or_create(config_dir)?;
        config.apply_cli_overrides(args);
        Ok(Self {
            config,
            path,
            created,
        })
    }

    #[must_use]
    pub fn origin_message(&self) -> String {
        if self.created {
            format!("Wrote default config to {}", self.path.display())
        } else {
            format!("Loaded config from {}", self.path.display())
        }
    }

    /// Call after `terra_log::init_logging`.
    pub fn log_origin(&self) {
        info!("{}", self.origin_message());
    }
}
