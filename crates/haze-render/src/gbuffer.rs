//! Camera-side visibility: nearest surface per pixel.

use glam::{Mat3, Vec3};

use crate::camera::Camera;
use crate::error::RenderError;
use crate::mesh::{Material, Scene};
use crate::raster::{ClipVertex, CullMode, Rasterizer};

/// The nearest visible surface at one pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSample {
    /// World-space position.
    pub position: Vec3,
    /// Unit world-space normal.
    pub normal: Vec3,
    pub material: Material,
}

/// Per-pixel surface attributes, rows bottom-up.
pub struct GBuffer {
    width: u32,
    height: u32,
    depth: Vec<f32>,
    samples: Vec<Option<SurfaceSample>>,
}

impl GBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidViewport { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            depth: vec![1.0; len],
            samples: vec![None; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rasterize `scene` through `camera`, keeping the nearest surface per pixel.
    pub fn capture(&mut self, scene: &Scene, camera: &Camera, cull: CullMode) {
        self.depth.fill(1.0);
        self.samples.fill(None);

        let raster = Rasterizer::new(self.width, self.height, cull);
        let view_proj = camera.view_projection_matrix();
        let samples = &mut self.samples;

        for instance in scene.instances() {
            let mvp = view_proj * instance.model;
            let normal_matrix = Mat3::from_mat4(instance.model).inverse().transpose();
            let material = instance.material;
            for tri in instance.mesh.triangles() {
                let clip = tri.map(|v| ClipVertex {
                    clip: mvp * v.position.extend(1.0),
                    world: instance.model.transform_point3(v.position),
                    normal: normal_matrix * v.normal,
                });
                raster.draw_triangle(&clip, &mut self.depth, |frag| {
                    samples[frag.index] = Some(SurfaceSample {
                        position: frag.world,
                        normal: frag.normal.normalize_or_zero(),
                        material,
                    });
                });
            }
        }
    }

    /// The surface at pixel `(x, y)`, or `None` where only background is visible.
    pub fn sample(&self, x: u32, y: u32) -> Option<&SurfaceSample> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples[(y * self.width + x) as usize].as_ref()
    }

    /// Window-space depth at pixel `(x, y)`; `1.0` where nothing was drawn.
    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.depth[(y * self.width + x) as usize]
    }
}
