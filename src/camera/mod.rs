//! First-person camera: orientation model, movement integration, and the
//! GPU rig that carries the view-projection uniform.

/// Camera plus its wgpu uniform buffer and bind group.
pub mod controller;
/// Pure camera math: basis derivation, view matrix, movement, zoom.
pub mod core;
/// Absolute-cursor-to-look-delta conversion with first-sample priming.
pub mod input;

pub use controller::CameraRig;
pub use core::{Camera, CameraUniform, MoveDirection};
pub use input::MouseLook;
