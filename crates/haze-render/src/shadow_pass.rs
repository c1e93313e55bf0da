//! Depth-only capture of the scene from the spotlight.

use haze_lighting::{LightSpaceTransform, ShadowMap};

use crate::error::RenderError;
use crate::mesh::Scene;
use crate::raster::{ClipVertex, CullMode, Rasterizer};

/// Owns the light depth map and refills it once per frame.
pub struct ShadowPass {
    map: ShadowMap,
    cull: CullMode,
}

impl ShadowPass {
    /// Allocate a `resolution²` depth map. Fails before any frame is drawn.
    pub fn new(resolution: u32, cull: CullMode) -> Result<Self, RenderError> {
        let map = ShadowMap::new(resolution)?;
        log::debug!("shadow map allocated: {resolution}x{resolution}, cull {cull:?}");
        Ok(Self { map, cull })
    }

    /// Clear the map and rasterize every instance through `light`.
    ///
    /// Only depth is written; materials are ignored, so every instance casts.
    pub fn capture(&mut self, light: &LightSpaceTransform, scene: &Scene) -> &ShadowMap {
        self.map.clear();
        let resolution = self.map.resolution();
        let raster = Rasterizer::new(resolution, resolution, self.cull);
        let view_proj = light.matrix();

        let mut written = 0;
        for instance in scene.instances() {
            let mvp = view_proj * instance.model;
            for tri in instance.mesh.triangles() {
                let clip = tri.map(|v| ClipVertex {
                    clip: mvp * v.position.extend(1.0),
                    ..ClipVertex::default()
                });
                written += raster.draw_triangle(&clip, self.map.texels_mut(), |_| {});
            }
        }
        log::trace!("shadow capture wrote {written} texels");
        &self.map
    }

    pub fn map(&self) -> &ShadowMap {
        &self.map
    }
}
