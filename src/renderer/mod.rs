//! Scene rendering: the instanced textured-cube pipeline.

/// Cube mesh, instance data, pipeline, and draw recording.
pub mod cube;

pub use cube::{CubeRenderer, CubeInstance, CubePlacement, Vertex};
