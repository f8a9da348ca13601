//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Fly controls tuning.
    pub controls: ControlsConfig,
    /// Planet geometry and material.
    pub planet: PlanetConfig,
    /// Background starfield.
    pub stars: StarsConfig,
    /// Perspective camera.
    pub camera: CameraConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Window title.
    pub title: String,
}

/// Fly controls configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    /// Translation scale per second.
    pub movement_speed: f32,
    /// Rotation scale per second.
    pub roll_speed: f32,
    /// Integrate rotation only while dragging.
    pub drag_to_look: bool,
    /// Move forward without a key held.
    pub auto_forward: bool,
}

/// Planet configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Sphere radius in scene units.
    pub radius: f32,
    /// Horizontal sphere segments.
    pub width_segments: u32,
    /// Vertical sphere segments.
    pub height_segments: u32,
    /// Axial tilt (rotation about Z) in radians.
    pub tilt: f32,
    /// Diffuse colour texture.
    pub color_map: String,
    /// Specular intensity texture.
    pub specular_map: String,
    /// Tangent-space normal map.
    pub normal_map: String,
    /// Specular colour as 0xRRGGBB.
    pub specular: u32,
    /// Phong shininess exponent.
    pub shininess: f32,
    /// Normal map scale; Y is negated for handedness.
    pub normal_scale: [f32; 2],
}

/// Starfield configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarsConfig {
    /// Seed for deterministic star placement.
    pub seed: u64,
    /// Points in the sparse vertex set.
    pub sparse_count: u32,
    /// Points in the dense vertex set.
    pub dense_count: u32,
    /// First layer index (inclusive). Layer `i` is scaled by `i * 10`.
    pub first_layer: u32,
    /// Last layer index (exclusive).
    pub end_layer: u32,
}

/// Perspective camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Initial distance from the planet centre, in planet radii.
    pub start_distance_radii: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Show the camera pose in the window title.
    pub show_pose: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            title: "Terra".to_string(),
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            movement_speed: 1000.0,
            roll_speed: std::f32::consts::PI / 24.0,
            drag_to_look: false,
            auto_forward: false,
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 6371.0,
            width_segments: 100,
            height_segments: 50,
            tilt: 0.0,
            color_map: "assets/earth_atmos_2048.jpg".to_string(),
            specular_map: "assets/earth_specular_2048.jpg".to_string(),
            normal_map: "assets/earth_normal_2048.jpg".to_string(),
            specular: 0x33_33_33,
            shininess: 15.0,
            normal_scale: [0.85, -0.85],
        }
    }
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sparse_count: 250,
            dense_count: 1500,
            first_layer: 10,
            end_layer: 30,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 25.0,
            near: 50.0,
            far: 1e7,
            start_distance_radii: 5.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_pose: true,
        }
    }
}

// --- Persistence ---

impl Config {
    /// Location of the config file inside `config_dir`.
    #[must_use]
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE)
    }

    /// Reads `config.ron` from `config_dir`, writing the defaults there first
    /// when the file does not exist yet. Does not log; start-up code reports
    /// the outcome once logging is initialised.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_in(config_dir);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            return Ok(config);
        }
        read_config(&path)
    }

    /// Writes the config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = Self::path_in(config_dir);
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&path, text).map_err(|source| ConfigError::Write { path, source })
    }

    /// Re-reads the file. `Some` only when its contents differ from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&Self::path_in(config_dir))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Config changed on disk");
        Ok(Some(fresh))
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
