//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "haze";

/// Top-level renderer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output image settings.
    pub output: OutputConfig,
    /// Participating medium (fog) settings.
    pub medium: MediumConfig,
    /// Spotlight settings.
    pub light: LightConfig,
    /// Light-space depth map settings.
    pub shadow: ShadowConfig,
    /// Viewer settings.
    pub camera: CameraConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Output image configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Number of frames to render.
    pub frames: u32,
    /// Simulated seconds between frames (drives the light target orbit).
    pub frame_interval_s: f32,
    /// Directory PNG frames are written to.
    pub directory: PathBuf,
    /// Worker threads for the per-pixel pass (0 = one per logical CPU).
    pub worker_threads: u32,
}

/// Fog parameters. These are the values the runtime controls mutate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MediumConfig {
    /// Scattering density used by the ray march.
    pub density: f32,
    /// Extinction coefficient applied to surface color.
    pub extinction: f32,
    /// Global ambient floor shared by the fog and the surface shading.
    pub ambient_floor: f32,
    /// March steps per pixel.
    pub sample_count: u32,
    /// Jitter march samples per pixel with interleaved gradient noise.
    pub dithering: bool,
}

/// Spotlight configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightConfig {
    /// World-space light position.
    pub position: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Direct light power multiplier.
    pub power: f32,
    /// Cosine of the full-intensity cone half-angle.
    pub cone_inner_cos: f32,
    /// Cosine of the cutoff cone half-angle.
    pub cone_outer_cos: f32,
    /// Radius of the cone target's orbit around the room centre.
    pub orbit_radius: f32,
    /// Angular speed of the cone target orbit in radians per second.
    pub orbit_speed: f32,
}

/// Light-space depth map configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShadowConfig {
    /// Depth map resolution (width = height).
    pub resolution: u32,
    /// Constant depth bias used by the visibility test.
    pub bias: f32,
    /// Light frustum vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Light frustum near plane.
    pub near: f32,
    /// Light frustum far plane.
    pub far: f32,
    /// Skip triangles facing away from the light.
    pub cull_back_faces: bool,
}

/// Viewer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// World-space eye position.
    pub position: [f32; 3],
    /// Yaw in degrees (-90 looks down -Z).
    pub yaw_degrees: f32,
    /// Pitch in degrees.
    pub pitch_degrees: f32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Skip triangles facing away from the camera.
    pub cull_back_faces: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Output visualization: "normal", "transmission" or "depth".
    pub visualization: String,
    /// Distance mapped to the hot end of the depth heatmap.
    pub heatmap_range: f32,
}

// --- Default implementations ---

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            frames: 1,
            frame_interval_s: 1.0 / 30.0,
            directory: PathBuf::from("frames"),
            worker_threads: 0,
        }
    }
}

impl Default for MediumConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            extinction: 0.1,
            ambient_floor: 0.02,
            sample_count: 64,
            dithering: false,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 1.99, 0.0],
            color: [1.0, 0.9, 0.7],
            power: 4.5,
            cone_inner_cos: 0.970,
            cone_outer_cos: 0.95,
            orbit_radius: 0.5,
            orbit_speed: 0.7,
        }
    }
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            resolution: 1024,
            bias: 0.005,
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 50.0,
            cull_back_faces: true,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 1.3, 7.0],
            yaw_degrees: -90.0,
            pitch_degrees: 0.0,
            fov_y_degrees: 70.0,
            near: 0.1,
            far: 50.0,
            cull_back_faces: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            visualization: "normal".to_string(),
            heatmap_range: 15.0,
        }
    }
}

/// Platform config directory for Haze, e.g. `~/.config/haze` on Linux.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::ReadError {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config =
                ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
                    path: config_path.clone(),
                    source,
                })?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join("config.ron");
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path,
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("sample_count: 64"));
        assert!(ron_str.contains("resolution: 1024"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.medium.dithering = true;
        config.light.position = [1.0, 2.0, 3.0];
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_reference_scene_defaults() {
        let config = Config::default();
        assert_eq!(config.light.position, [0.0, 1.99, 0.0]);
        assert!((config.shadow.bias - 0.005).abs() < 1e-9);
        assert!((config.debug.heatmap_range - 15.0).abs() < 1e-6);
        assert!(config.light.cone_inner_cos > config.light.cone_outer_cos);
        assert!(config.shadow.near < config.shadow.far);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(output: (), light: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.medium, MediumConfig::default());
        assert_eq!(config.shadow, ShadowConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_fields() {
        let ron_str = "(medium: (density: 0.5))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert!((config.medium.density - 0.5).abs() < 1e-6);
        assert_eq!(config.medium.sample_count, 64);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.width = 1280;
        config.medium.ambient_floor = 0.05;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        let message = err.to_string();
        assert!(message.contains("config.ron"), "{message}");
        assert!(message.contains(&dir.path().display().to_string()), "{message}");
    }

    #[test]
    fn test_unwritable_dir_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        // A plain file where the config directory should be.
        let blocker = dir.path().join("haze");
        std::fs::write(&blocker, "").unwrap();

        let err = Config::default().save(&blocker).unwrap_err();
        match &err {
            ConfigError::WriteError { path, .. } => assert_eq!(path, &blocker.join("config.ron")),
            other => panic!("expected write error, got {other:?}"),
        }
        assert!(err.to_string().contains("config.ron"));
    }
}
