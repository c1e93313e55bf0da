//! Light-space depth map and the binary visibility test built on it.
//!
//! The map is a square grid of window-space depths in `[0, 1]` captured from
//! the spotlight. It is allocated once, cleared to the far plane every frame,
//! written by the depth capture pass and only read afterwards.

use glam::{Vec2, Vec3};

use crate::scattering::Occlusion;
use crate::spot::LightSpaceTransform;

/// Errors raised while allocating a depth map. These are setup faults: a map
/// that cannot be created aborts initialization rather than a single frame.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShadowMapError {
    /// Resolution is zero or above [`ShadowMap::MAX_RESOLUTION`].
    #[error("invalid shadow map resolution {resolution} (must be 1..={max})")]
    InvalidResolution {
        /// Requested resolution.
        resolution: u32,
        /// Largest accepted resolution.
        max: u32,
    },

    /// The texel storage could not be reserved.
    #[error("failed to allocate {texels} shadow map texels")]
    Allocation {
        /// Number of texels requested.
        texels: usize,
    },
}

/// Single-channel square depth buffer as seen from the light.
#[derive(Clone, Debug)]
pub struct ShadowMap {
    resolution: u32,
    depth: Vec<f32>,
}

impl ShadowMap {
    /// Largest supported resolution (width = height).
    pub const MAX_RESOLUTION: u32 = 16384;

    /// Depth written by [`ShadowMap::clear`]: the far plane.
    pub const CLEAR_DEPTH: f32 = 1.0;

    /// Allocate a depth map cleared to the far plane.
    pub fn new(resolution: u32) -> Result<Self, ShadowMapError> {
        if resolution == 0 || resolution > Self::MAX_RESOLUTION {
            return Err(ShadowMapError::InvalidResolution {
                resolution,
                max: Self::MAX_RESOLUTION,
            });
        }
        let texels = resolution as usize * resolution as usize;
        let mut depth = Vec::new();
        depth
            .try_reserve_exact(texels)
            .map_err(|_| ShadowMapError::Allocation { texels })?;
        depth.resize(texels, Self::CLEAR_DEPTH);
        Ok(Self { resolution, depth })
    }

    /// Width and height in texels.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Reset every texel to [`ShadowMap::CLEAR_DEPTH`].
    pub fn clear(&mut self) {
        self.depth.fill(Self::CLEAR_DEPTH);
    }

    /// Row-major texels, row 0 at `v = 0`.
    pub fn texels(&self) -> &[f32] {
        &self.depth
    }

    /// Mutable row-major texels for the depth capture pass.
    pub fn texels_mut(&mut self) -> &mut [f32] {
        &mut self.depth
    }

    /// Depth stored at texel `(x, y)`.
    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.depth[(y * self.resolution + x) as usize]
    }

    /// Nearest-texel lookup at texture coordinate `uv`, clamped to the edge.
    pub fn sample(&self, uv: Vec2) -> f32 {
        let max = (self.resolution - 1) as f32;
        let size = self.resolution as f32;
        let x = (uv.x * size).floor().clamp(0.0, max) as u32;
        let y = (uv.y * size).floor().clamp(0.0, max) as u32;
        self.depth_at(x, y)
    }

    /// Binary visibility of `world` from the light: `1.0` lit, `0.0` occluded.
    ///
    /// Points that project outside the light's `[0, 1]²` texture window (or
    /// lie behind the light) are lit. Inside, the point is occluded only when
    /// `depth - bias` is farther than the stored depth.
    pub fn visibility(&self, light: &LightSpaceTransform, world: Vec3, bias: f32) -> f32 {
        let Some(ndc) = light.project(world) else {
            return 1.0;
        };
        let uv = Vec2::new(ndc.x, ndc.y) * 0.5 + 0.5;
        if uv.x < 0.0 || uv.x > 1.0 || uv.y < 0.0 || uv.y > 1.0 {
            return 1.0;
        }
        let sample_depth = ndc.z * 0.5 + 0.5;
        if sample_depth - bias > self.sample(uv) {
            0.0
        } else {
            1.0
        }
    }
}

/// Read-only view pairing a captured map with the transform and bias it was
/// captured for. This is what the ray march queries per step.
#[derive(Clone, Copy, Debug)]
pub struct ShadowSampler<'a> {
    map: &'a ShadowMap,
    light: &'a LightSpaceTransform,
    bias: f32,
}

impl<'a> ShadowSampler<'a> {
    /// Build a sampler over a captured map.
    pub fn new(map: &'a ShadowMap, light: &'a LightSpaceTransform, bias: f32) -> Self {
        Self { map, light, bias }
    }
}

impl Occlusion for ShadowSampler<'_> {
    fn visibility(&self, world: Vec3) -> f32 {
        self.map.visibility(self.light, world, self.bias)
    }
}
