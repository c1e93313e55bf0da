//! Frame orchestration: light depth capture, camera visibility, then the
//! parallel composite over a read-only view of both.

use std::time::Instant;

use glam::{Vec2, Vec3};
use haze_lighting::{
    LightFrustum, LightSpaceTransform, MediumParams, ScatteringContext, ShadowMap, ShadowSampler,
    SpotLight,
};

use crate::camera::Camera;
use crate::color::ColorBuffer;
use crate::composite::{VisualizationMode, shade_pixel};
use crate::dispatch::{dispatch_rows, worker_count};
use crate::error::RenderError;
use crate::gbuffer::GBuffer;
use crate::mesh::Scene;
use crate::raster::CullMode;
use crate::shadow_pass::ShadowPass;

/// Everything a frame reads, frozen before the first pass starts.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub medium: MediumParams,
    pub mode: VisualizationMode,
    pub light: SpotLight,
    pub cone_target: Vec3,
    /// Built from `light.position`, `cone_target` and the light frustum.
    pub light_space: LightSpaceTransform,
    /// Camera eye position; view rays start here.
    pub view_position: Vec3,
    /// View distance at the hot end of the depth heatmap.
    pub heatmap_range: f32,
}

impl FrameSnapshot {
    pub fn new(
        medium: MediumParams,
        mode: VisualizationMode,
        light: SpotLight,
        cone_target: Vec3,
        frustum: LightFrustum,
        view_position: Vec3,
        heatmap_range: f32,
    ) -> Self {
        let light_space = LightSpaceTransform::look_at(light.position, cone_target, frustum);
        Self {
            medium,
            mode,
            light,
            cone_target,
            light_space,
            view_position,
            heatmap_range,
        }
    }
}

/// Fixed per-renderer dimensions and pass options.
#[derive(Clone, Debug, PartialEq)]
pub struct RendererSettings {
    pub width: u32,
    pub height: u32,
    pub shadow_resolution: u32,
    pub shadow_cull: CullMode,
    pub camera_cull: CullMode,
    /// Shading threads; `0` uses one per logical CPU.
    pub workers: usize,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            shadow_resolution: 1024,
            shadow_cull: CullMode::Back,
            camera_cull: CullMode::Back,
            workers: 0,
        }
    }
}

/// Owns every per-frame target. Allocated once; rendering never reallocates.
pub struct FrameRenderer {
    settings: RendererSettings,
    workers: usize,
    shadow: ShadowPass,
    gbuffer: GBuffer,
    color: ColorBuffer,
}

impl FrameRenderer {
    /// Allocate the depth map and screen targets. All setup faults surface here.
    pub fn new(settings: RendererSettings) -> Result<Self, RenderError> {
        let shadow = ShadowPass::new(settings.shadow_resolution, settings.shadow_cull)?;
        let gbuffer = GBuffer::new(settings.width, settings.height)?;
        let color = ColorBuffer::new(settings.width, settings.height)?;
        let workers = worker_count(settings.workers);
        log::info!(
            "renderer ready: {}x{}, shadow map {}, {} shading workers",
            settings.width,
            settings.height,
            settings.shadow_resolution,
            workers
        );
        Ok(Self {
            settings,
            workers,
            shadow,
            gbuffer,
            color,
        })
    }

    /// Render one frame. The depth capture finishes before any pixel is shaded.
    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        snapshot: &FrameSnapshot,
    ) -> Result<&ColorBuffer, RenderError> {
        let started = Instant::now();
        let map: &ShadowMap = self.shadow.capture(&snapshot.light_space, scene);
        let shadow_done = Instant::now();

        self.gbuffer.capture(scene, camera, self.settings.camera_cull);
        let gbuffer_done = Instant::now();

        let sampler = ShadowSampler::new(map, &snapshot.light_space, snapshot.medium.shadow_bias);
        let ctx = ScatteringContext::new(
            &snapshot.medium,
            &snapshot.light,
            snapshot.cone_target,
            &sampler,
        );
        let gbuffer = &self.gbuffer;
        dispatch_rows(
            self.settings.width,
            self.settings.height,
            self.workers,
            self.color.pixels_mut(),
            |x, y| match gbuffer.sample(x, y) {
                Some(sample) => shade_pixel(
                    snapshot,
                    &ctx,
                    sample,
                    Vec2::new(x as f32 + 0.5, y as f32 + 0.5),
                ),
                None => Vec3::ZERO,
            },
        )?;

        log::debug!(
            "frame: shadow {:?}, gbuffer {:?}, composite {:?} ({} mode)",
            shadow_done - started,
            gbuffer_done - shadow_done,
            gbuffer_done.elapsed(),
            snapshot.mode
        );
        Ok(&self.color)
    }

    /// The light depth map from the last rendered frame.
    pub fn shadow_map(&self) -> &ShadowMap {
        self.shadow.map()
    }

    pub fn gbuffer(&self) -> &GBuffer {
        &self.gbuffer
    }
}
