//! Translate the loaded config into renderer and lighting types.

use glam::Vec3;
use haze_config::Config;
use haze_lighting::{LightFrustum, MediumParams, SpotLight};
use haze_render::{Camera, CullMode, RendererSettings};

pub fn medium_params(config: &Config) -> MediumParams {
    MediumParams {
        density: config.medium.density,
        extinction: config.medium.extinction,
        ambient_floor: config.medium.ambient_floor.max(0.0),
        sample_count: config.medium.sample_count,
        dithering: config.medium.dithering,
        shadow_bias: config.shadow.bias,
    }
}

pub fn spot_light(config: &Config) -> SpotLight {
    SpotLight {
        position: Vec3::from_array(config.light.position),
        color: Vec3::from_array(config.light.color),
        power: config.light.power,
        cone_inner_cos: config.light.cone_inner_cos,
        cone_outer_cos: config.light.cone_outer_cos,
    }
}

pub fn light_frustum(config: &Config) -> LightFrustum {
    LightFrustum {
        fov_y: config.shadow.fov_y_degrees.to_radians(),
        near: config.shadow.near,
        far: config.shadow.far,
    }
}

pub fn camera(config: &Config) -> Camera {
    let camera_config = &config.camera;
    let aspect_ratio = config.output.width.max(1) as f32 / config.output.height.max(1) as f32;
    let mut camera = Camera::from_yaw_pitch(
        Vec3::from_array(camera_config.position),
        camera_config.yaw_degrees,
        camera_config.pitch_degrees,
        camera_config.fov_y_degrees.to_radians(),
        aspect_ratio,
    );
    camera.near = camera_config.near;
    camera.far = camera_config.far;
    camera
}

pub fn renderer_settings(config: &Config) -> RendererSettings {
    RendererSettings {
        width: config.output.width,
        height: config.output.height,
        shadow_resolution: config.shadow.resolution,
        shadow_cull: CullMode::from_enabled(config.shadow.cull_back_faces),
        camera_cull: CullMode::from_enabled(config.camera.cull_back_faces),
        workers: config.output.worker_threads as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_scene() {
        let config = Config::default();
        assert_eq!(medium_params(&config), MediumParams::default());
        assert_eq!(spot_light(&config), SpotLight::default());

        let frustum = light_frustum(&config);
        assert!((frustum.fov_y - LightFrustum::default().fov_y).abs() < 1e-6);
        assert_eq!(frustum.near, 0.1);
        assert_eq!(frustum.far, 50.0);

        let settings = renderer_settings(&config);
        assert_eq!(settings.shadow_cull, CullMode::Back);
        assert_eq!(settings.camera_cull, CullMode::Back);
        assert_eq!(settings.shadow_resolution, 1024);
    }

    #[test]
    fn test_default_camera_looks_into_room() {
        let camera = camera(&Config::default());
        assert_eq!(camera.position, Vec3::new(0.0, 1.3, 7.0));
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_negative_ambient_is_clamped() {
        let mut config = Config::default();
        config.medium.ambient_floor = -0.5;
        assert_eq!(medium_params(&config).ambient_floor, 0.0);
    }

    #[test]
    fn test_cull_toggle() {
        let mut config = Config::default();
        config.shadow.cull_back_faces = false;
        assert_eq!(renderer_settings(&config).shadow_cull, CullMode::None);
    }
}
