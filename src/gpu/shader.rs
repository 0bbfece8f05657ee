use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use naga::valid::{Capabilities, ValidationFlags, Validator};

/// A shader file failed to load, parse, or validate.
///
/// Parse and validation variants carry the full naga diagnostic (the
/// moral equivalent of a GL compiler info log), so the caller can print
/// something a human can act on.
#[derive(Debug)]
pub enum ShaderError {
    /// The source file could not be read.
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The WGSL front end rejected the source.
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Rendered diagnostic with source spans.
        detail: String,
    },
    /// The IR failed naga validation.
    Validate {
        /// Path of the offending file.
        path: PathBuf,
        /// Rendered diagnostic.
        detail: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read shader {}: {source}", path.display())
            }
            Self::Parse { path, detail } => {
                write!(f, "WGSL parse error in {}:\n{detail}", path.display())
            }
            Self::Validate { path, detail } => {
                write!(
                    f,
                    "shader validation failed for {}:\n{detail}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { .. } | Self::Validate { .. } => None,
        }
    }
}

/// Parse and validate WGSL source into naga IR without touching a GPU
/// device. Exposed separately so shader files can be checked in tests.
///
/// # Errors
///
/// Returns [`ShaderError::Parse`] or [`ShaderError::Validate`] with the
/// rendered diagnostic.
pub fn parse_wgsl(
    source: &str,
    path: &Path,
) -> Result<naga::Module, ShaderError> {
    let module =
        naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Parse {
            path: path.to_path_buf(),
            detail: e.emit_to_string(source),
        })?;

    let _info = Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|e| ShaderError::Validate {
            path: path.to_path_buf(),
            detail: e.emit_to_string(source),
        })?;

    Ok(module)
}

/// Read a WGSL file from disk, run it through the naga front end, and
/// hand the validated IR to wgpu as a shader module.
///
/// # Errors
///
/// Returns [`ShaderError`] if the file is unreadable or the source does
/// not parse/validate.
pub fn load_wgsl(
    device: &wgpu::Device,
    label: &str,
    path: &Path,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let source =
        std::fs::read_to_string(path).map_err(|e| ShaderError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

    let module = parse_wgsl(&source, path)?;
    log::info!("loaded shader {}", path.display());

    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE_WGSL: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/shaders/cube.wgsl"
    );

    #[test]
    fn shipped_shader_parses_and_validates() {
        let source = std::fs::read_to_string(CUBE_WGSL).unwrap();
        let module = parse_wgsl(&source, Path::new(CUBE_WGSL)).unwrap();
        let entry_points: Vec<_> = module
            .entry_points
            .iter()
            .map(|ep| ep.name.as_str())
            .collect();
        assert!(entry_points.contains(&"vs_main"));
        assert!(entry_points.contains(&"fs_main"));
    }

    #[test]
    fn parse_failure_carries_diagnostic() {
        let err = parse_wgsl("fn broken(", Path::new("broken.wgsl"))
            .unwrap_err();
        match err {
            ShaderError::Parse { path, detail } => {
                assert_eq!(path, Path::new("broken.wgsl"));
                assert!(!detail.is_empty());
            }
            other => panic!("expected parse error, got {other}"),
        }
    }
}
