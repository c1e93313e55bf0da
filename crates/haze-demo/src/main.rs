//! Headless demo: renders the fog-filled room with an orbiting spotlight and
//! writes one PNG per frame.

mod scene;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use haze_config::{CliArgs, Config, default_config_dir};
use haze_lighting::orbit_target;
use haze_render::{Controls, FrameRenderer, RenderError, VisualizationMode};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    haze_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config, args.keys.as_deref()) {
        Ok(frames) => {
            info!(frames, directory = %config.output.directory.display(), "rendering complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Set up the renderer and write every frame. Returns the number of frames written.
fn run(config: &Config, keys: Option<&str>) -> Result<u32, RenderError> {
    let mode: VisualizationMode = config.debug.visualization.parse()?;
    let mut controls = Controls::new(settings::medium_params(config), mode);
    if let Some(keys) = keys {
        controls.apply_keys(keys);
    }

    let light = settings::spot_light(config);
    let frustum = settings::light_frustum(config);
    let camera = settings::camera(config);
    let scene = scene::build_room(light.color);
    info!(
        instances = scene.len(),
        triangles = scene.triangle_count(),
        "scene built"
    );

    let mut renderer = FrameRenderer::new(settings::renderer_settings(config))?;
    std::fs::create_dir_all(&config.output.directory)?;

    for frame in 0..config.output.frames {
        let time_s = frame as f32 * config.output.frame_interval_s;
        let target = orbit_target(time_s, config.light.orbit_speed, config.light.orbit_radius);
        let snapshot = controls.snapshot(
            light.clone(),
            target,
            frustum,
            camera.position,
            config.debug.heatmap_range,
        );

        let color = renderer.render(&scene, &camera, &snapshot)?;
        let path = config.output.directory.join(format!("frame_{frame:04}.png"));
        color.write_png(&path)?;
        info!(frame, time_s, path = %path.display(), "frame written");
    }
    Ok(config.output.frames)
}
