//! Software rendering of the volumetric spotlight: light depth capture, camera
//! visibility, per-pixel fog compositing and frame orchestration.

pub mod camera;
pub mod color;
pub mod composite;
pub mod controls;
pub mod dispatch;
mod error;
pub mod frame;
pub mod gbuffer;
pub mod mesh;
pub mod raster;
pub mod shadow_pass;

pub use camera::Camera;
pub use color::ColorBuffer;
pub use composite::{
    BASE_AMBIENT, Composite, DEFAULT_HEATMAP_RANGE, VisualizationMode, composite_surface,
    heatmap, shade_pixel, surface_response, transmission_view,
};
pub use controls::{Control, Controls};
pub use dispatch::{dispatch_rows, worker_count};
pub use error::RenderError;
pub use frame::{FrameRenderer, FrameSnapshot, RendererSettings};
pub use gbuffer::{GBuffer, SurfaceSample};
pub use mesh::{Material, Mesh, MeshInstance, Scene, Vertex};
pub use raster::{ClipVertex, CullMode, Fragment, Rasterizer};
pub use shadow_pass::ShadowPass;
