//! Participating medium parameters.

/// Fog parameters for one frame. Read-only during evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct MediumParams {
    /// Scattering density per world unit.
    pub density: f32,
    /// Extinction coefficient applied to surface radiance.
    pub extinction: f32,
    /// Ambient floor: uniform in-scattering independent of the beam.
    pub ambient_floor: f32,
    /// Requested march steps. Values below one are treated as one.
    pub sample_count: u32,
    /// Jitter sample positions per pixel.
    pub dithering: bool,
    /// Depth bias for the visibility test.
    pub shadow_bias: f32,
}

impl Default for MediumParams {
    fn default() -> Self {
        Self {
            density: 1.0,
            extinction: 0.1,
            ambient_floor: 0.02,
            sample_count: 64,
            dithering: false,
            shadow_bias: 0.005,
        }
    }
}

impl MediumParams {
    /// Number of march steps actually taken (at least one).
    pub fn effective_samples(&self) -> u32 {
        self.sample_count.max(1)
    }

    /// Scalar transmittance `exp(-distance * extinction)` along a view ray.
    pub fn transmittance(&self, distance: f32) -> f32 {
        (-distance * self.extinction).exp()
    }
}
