//! Render error types.

use haze_lighting::ShadowMapError;

/// Errors raised while setting up or presenting frames.
///
/// Setup faults come out of constructors and stop the renderer before the
/// first frame. Per-pixel evaluation itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The light depth map could not be created.
    #[error("shadow map setup failed: {0}")]
    Shadow(#[from] ShadowMapError),

    /// An output target has a zero dimension.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A visualization mode name did not match any mode.
    #[error("unknown visualization mode '{0}' (expected normal, transmission or depth)")]
    UnknownVisualization(String),

    /// A shading worker thread could not be started.
    #[error("failed to spawn shading worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// Writing an output file failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failed.
    #[error("failed to encode png: {0}")]
    PngEncode(#[from] png::EncodingError),
}
