//! Tracing setup for the Terra viewer.
//!
//! Console output is always on. Debug builds additionally write JSON lines to
//! `terra.log` in the platform log directory so a flight can be inspected
//! after the window closes.

use std::path::{Path, PathBuf};

use terra_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directives used when neither `RUST_LOG` nor the config names a level.
/// Windowing backends are chatty at `info`.
pub const DEFAULT_DIRECTIVES: &str = "info,winit=warn,calloop=warn";

/// File name of the JSON log written in debug builds.
pub const LOG_FILE: &str = "terra.log";

/// Installs the global subscriber.
///
/// Filter precedence is `RUST_LOG`, then `config.debug.log_level`, then
/// [`DEFAULT_DIRECTIVES`]. With `debug_build` set and a usable `log_dir`, a
/// JSON file layer is added; if the file cannot be created only the console
/// layer is installed.
///
/// Call at most once per process.
///
/// ```no_run
/// use terra_log::init_logging;
///
/// init_logging(None, false, None);
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let directives = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    let console = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let registry = tracing_subscriber::registry().with(env_filter).with(console);

    let log_file = if debug_build {
        log_dir.and_then(open_log_file)
    } else {
        None
    };

    match log_file {
        Some((path, file)) => {
            let json = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_timer(fmt::time::uptime())
                .json();
            registry.with(json).init();
            tracing::debug!(path = %path.display(), "JSON log enabled");
        }
        None => registry.init(),
    }
}

/// The filter string implied by `config`, ignoring `RUST_LOG`.
#[must_use]
pub fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.trim().to_string()
        }
        _ => DEFAULT_DIRECTIVES.to_string(),
    }
}

/// [`EnvFilter`] built from [`DEFAULT_DIRECTIVES`].
#[must_use]
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_DIRECTIVES)
}

fn open_log_file(log_dir: &Path) -> Option<(PathBuf, std::fs::File)> {
    std::fs::create_dir_all(log_dir).ok()?;
    let path = log_dir.join(LOG_FILE);
    let file = std::fs::File::create(&path).ok()?;
    Some((path, file))
}
