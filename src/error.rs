//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::gpu::shader::ShaderError;
use crate::gpu::texture::TextureError;

/// Errors produced by the cubewalk crate.
///
/// Setup failures are values, not process aborts; the binary decides
/// whether to terminate.
#[derive(Debug)]
pub enum CubewalkError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Shader file load/parse/validation failure.
    Shader(ShaderError),
    /// Texture file load/decode failure.
    Texture(TextureError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for CubewalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader(e) => write!(f, "shader error: {e}"),
            Self::Texture(e) => write!(f, "texture error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for CubewalkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Shader(e) => Some(e),
            Self::Texture(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<RenderContextError> for CubewalkError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<ShaderError> for CubewalkError {
    fn from(e: ShaderError) -> Self {
        Self::Shader(e)
    }
}

impl From<TextureError> for CubewalkError {
    fn from(e: TextureError) -> Self {
        Self::Texture(e)
    }
}

impl From<std::io::Error> for CubewalkError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
