//! Spotlight, light-space depth map, participating medium and the in-scattering ray march.

pub mod math;
mod medium;
pub mod scattering;
mod shadow;
mod spot;

pub use medium::MediumParams;
pub use scattering::{
    MarchState, Occlusion, ScatteringContext, Unoccluded, interleaved_gradient_noise,
    sample_offset,
};
pub use shadow::{ShadowMap, ShadowMapError, ShadowSampler};
pub use spot::{LightFrustum, LightSpaceTransform, SpotLight, attenuation, orbit_target};
