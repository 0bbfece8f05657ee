use serde::{Deserialize, Serialize};

/// Camera movement, look, and projection tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Movement rate in world units per second.
    pub movement_speed: f32,
    /// Degrees of rotation per screen pixel of mouse travel.
    pub mouse_sensitivity: f32,
    /// Initial vertical field of view in degrees (scroll adjusts it at
    /// runtime within [1, 45]).
    pub fov: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Clamp pitch to ±89° so the view never flips over the poles.
    pub constrain_pitch: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            fov: 45.0,
            znear: 0.1,
            zfar: 100.0,
            constrain_pitch: true,
        }
    }
}
