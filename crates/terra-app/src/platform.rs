//! OS-specific directories for config, assets and logs.

use std::path::{Path, PathBuf};

/// Errors that can occur while resolving or creating directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    #[error("cannot create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const APP_NAME: &str = "terra-viewer";

/// Where the viewer keeps its files. Follows XDG on Linux, Known Folders on
/// Windows and `~/Library` on macOS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// `config.ron`.
    pub config_dir: PathBuf,
    /// Planet textures and other assets.
    pub data_dir: PathBuf,
    /// `terra.log` in debug builds.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolves the OS directories without touching the disk.
    pub fn resolve() -> Result<Self, PlatformError> {
        let app_config = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);
        let data_dir = dirs::data_dir()
            .map(|d| d.join(APP_NAME))
            .unwrap_or_else(|| app_config.join("data"));

        Ok(Self {
            config_dir: app_config.clone(),
            data_dir,
            log_dir: app_config.join("logs"),
        })
    }

    /// Everything under `root`, for tests and portable installs.
    #[must_use]
    pub fn with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            data_dir: app_dir.join("data"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Points the config directory elsewhere, e.g. from `--config`.
    #[must_use]
    pub fn with_config_dir(mut self, config_dir: PathBuf) -> Self {
        self.config_dir = config_dir;
        self
    }

    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        for dir in [&self.config_dir, &self.data_dir, &self.log_dir] {
            std::fs::create_dir_all(dir).map_err(|source| PlatformError::Create {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_root_layout() {
        let root = Path::new("portable");
        let dirs = PlatformDirs::with_root(root);
        assert_eq!(dirs.config_dir, root.join(APP_NAME).join("config"));
        assert_eq!(dirs.log_dir, root.join(APP_NAME).join("logs"));
        assert!(dirs.data_dir.starts_with(root));
    }

    #[test]
    fn test_create_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::with_root(tmp.path());
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.data_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_config_override() {
        let tmp = tempfile::tempdir().unwrap();
        let custom = tmp.path().join("elsewhere");
        let dirs = PlatformDirs::with_root(tmp.path()).with_config_dir(custom.clone());
        assert_eq!(dirs.config_dir, custom);
        dirs.create_dirs().unwrap();
        assert!(custom.is_dir());
    }

    #[test]
    fn test_create_fails_under_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let dirs = PlatformDirs::with_root(&blocker);
        let err = dirs.create_dirs().unwrap_err();
        assert!(matches!(err, PlatformError::Create { .. }));
    }

    #[test]
    fn test_resolved_paths_are_absolute() {
        if let Ok(dirs) = PlatformDirs::resolve() {
            assert!(dirs.config_dir.is_absolute());
            assert!(dirs.log_dir.starts_with(&dirs.config_dir));
        }
    }
}
