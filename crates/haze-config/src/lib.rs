//! Renderer settings: `config.ron` sections for output, medium, light, shadow
//! map, camera and logging, plus command-line overrides.
//!
//! Every section is `#[serde(default)]`, so a partial or older file still loads.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, LightConfig, MediumConfig, OutputConfig, ShadowConfig,
    default_config_dir,
};
pub use error::ConfigError;
