//! Runtime toggles that change the medium or the visualization between frames.

use glam::Vec3;
use haze_lighting::{LightFrustum, MediumParams, SpotLight};

use crate::composite::VisualizationMode;
use crate::frame::FrameSnapshot;

/// Amount `]` and `[` change the ambient floor by.
pub const AMBIENT_STEP: f32 = 0.01;

/// A single user action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    ToggleDither,
    CycleMode,
    AmbientUp,
    AmbientDown,
}

impl Control {
    /// Key binding: `t` dither, `m` mode, `]` / `[` ambient floor.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            't' | 'T' => Some(Self::ToggleDither),
            'm' | 'M' => Some(Self::CycleMode),
            ']' => Some(Self::AmbientUp),
            '[' => Some(Self::AmbientDown),
            _ => None,
        }
    }
}

/// Mutable toggle state, read once per frame into a [`FrameSnapshot`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Controls {
    pub medium: MediumParams,
    pub mode: VisualizationMode,
}

impl Controls {
    pub fn new(medium: MediumParams, mode: VisualizationMode) -> Self {
        Self { medium, mode }
    }

    /// Apply one action and log the resulting state.
    pub fn apply(&mut self, control: Control) {
        match control {
            Control::ToggleDither => {
                self.medium.dithering = !self.medium.dithering;
                log::info!(
                    "dithering {}",
                    if self.medium.dithering { "on" } else { "off" }
                );
            }
            Control::CycleMode => {
                self.mode = self.mode.next();
                log::info!("visualization mode: {}", self.mode);
            }
            Control::AmbientUp => {
                self.medium.ambient_floor += AMBIENT_STEP;
                log::info!("ambient floor: {:.2}", self.medium.ambient_floor);
            }
            Control::AmbientDown => {
                self.medium.ambient_floor = (self.medium.ambient_floor - AMBIENT_STEP).max(0.0);
                log::info!("ambient floor: {:.2}", self.medium.ambient_floor);
            }
        }
    }

    /// Apply every bound key in `keys`, ignoring the rest. Returns how many applied.
    pub fn apply_keys(&mut self, keys: &str) -> usize {
        let mut applied = 0;
        for key in keys.chars() {
            match Control::from_key(key) {
                Some(control) => {
                    self.apply(control);
                    applied += 1;
                }
                None if key.is_whitespace() => {}
                None => log::warn!("no control bound to key {key:?}"),
            }
        }
        applied
    }

    /// Freeze the current toggles together with this frame's light placement.
    pub fn snapshot(
        &self,
        light: SpotLight,
        cone_target: Vec3,
        frustum: LightFrustum,
        view_position: Vec3,
        heatmap_range: f32,
    ) -> FrameSnapshot {
        FrameSnapshot::new(
            self.medium.clone(),
            self.mode,
            light,
            cone_target,
            frustum,
            view_position,
            heatmap_range,
        )
    }
}
