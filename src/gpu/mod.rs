//! GPU plumbing: wgpu bring-up, WGSL shader loading, and texture upload.

/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL loading with naga parse/validation diagnostics.
pub mod shader;
/// Image decode, CPU mip chain, and sampler configuration.
pub mod texture;

pub use render_context::{RenderContext, RenderContextError};
pub use shader::ShaderError;
pub use texture::{Filter, SceneTexture, TextureError, TextureOptions, WrapMode};
