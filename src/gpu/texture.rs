use std::fmt;
use std::path::{Path, PathBuf};

use crate::gpu::render_context::RenderContext;

/// Texture coordinate wrapping outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Tile the texture.
    Repeat,
    /// Tile with every other repetition mirrored.
    MirrorRepeat,
    /// Stretch the edge texels.
    ClampToEdge,
}

impl From<WrapMode> for wgpu::AddressMode {
    fn from(mode: WrapMode) -> Self {
        match mode {
            WrapMode::Repeat => Self::Repeat,
            WrapMode::MirrorRepeat => Self::MirrorRepeat,
            WrapMode::ClampToEdge => Self::ClampToEdge,
        }
    }
}

/// Texel filtering for magnification, minification, and mip selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Nearest texel / mip level.
    Nearest,
    /// Linear blend of texels / mip levels.
    Linear,
}

impl From<Filter> for wgpu::FilterMode {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => Self::Nearest,
            Filter::Linear => Self::Linear,
        }
    }
}

/// Sampling configuration, fixed at texture creation.
///
/// The GL-style combined min/mipmap filters (`LINEAR_MIPMAP_LINEAR` and
/// friends) decompose here into `min_filter` + `mipmap_filter`.
#[derive(Debug, Clone, Copy)]
pub struct TextureOptions {
    /// Wrap along U.
    pub wrap_u: WrapMode,
    /// Wrap along V.
    pub wrap_v: WrapMode,
    /// Filter when the texture is minified.
    pub min_filter: Filter,
    /// Filter when the texture is magnified.
    pub mag_filter: Filter,
    /// Filter between mip levels.
    pub mipmap_filter: Filter,
}

impl Default for TextureOptions {
    /// Tiling, trilinear. What the demo scene uses.
    fn default() -> Self {
        Self {
            wrap_u: WrapMode::Repeat,
            wrap_v: WrapMode::Repeat,
            min_filter: Filter::Linear,
            mag_filter: Filter::Linear,
            mipmap_filter: Filter::Linear,
        }
    }
}

/// A texture file failed to load.
#[derive(Debug)]
pub enum TextureError {
    /// The file could not be read.
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The file was read but could not be decoded as an image.
    Decode {
        /// Path of the offending file.
        path: PathBuf,
        /// Decoder diagnostic.
        detail: String,
    },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read texture {}: {source}", path.display())
            }
            Self::Decode { path, detail } => {
                write!(f, "cannot decode texture {}: {detail}", path.display())
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode { .. } => None,
        }
    }
}

/// An image file uploaded as a mipmapped 2D texture, with the sampler and
/// bind group the cube pipeline reads it through.
pub struct SceneTexture {
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl SceneTexture {
    /// Decode `path` (PNG or JPEG) to tightly-packed RGBA8, build a CPU
    /// mip chain down to 1×1, upload every level, and wrap it all in a
    /// bind group configured per `opts`.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError`] on a missing file or a decode failure.
    pub fn load(
        context: &RenderContext,
        path: &Path,
        opts: &TextureOptions,
    ) -> Result<Self, TextureError> {
        let decoded = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(source) => TextureError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => TextureError::Decode {
                path: path.to_path_buf(),
                detail: other.to_string(),
            },
        })?;

        // RGBA8, 4 bytes per pixel, rows tightly packed.
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mip_count = mip_level_count(width, height);
        log::info!(
            "loaded texture {} ({width}x{height}, {mip_count} mip levels)",
            path.display()
        );

        let texture =
            context.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Scene Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: mip_count,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });

        let mut level_pixels = rgba.into_raw();
        let (mut level_w, mut level_h) = (width, height);
        for level in 0..mip_count {
            if level > 0 {
                let (next, w, h) = downsample(&level_pixels, level_w, level_h);
                level_pixels = next;
                level_w = w;
                level_h = h;
            }
            context.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &level_pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * level_w),
                    rows_per_image: Some(level_h),
                },
                wgpu::Extent3d {
                    width: level_w,
                    height: level_h,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler =
            context.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("Scene Sampler"),
                address_mode_u: opts.wrap_u.into(),
                address_mode_v: opts.wrap_v.into(),
                address_mode_w: wgpu::AddressMode::Repeat,
                mag_filter: opts.mag_filter.into(),
                min_filter: opts.min_filter.into(),
                mipmap_filter: opts.mipmap_filter.into(),
                ..Default::default()
            });

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float {
                                filterable: true,
                            },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(
                            wgpu::SamplerBindingType::Filtering,
                        ),
                        count: None,
                    },
                ],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(
                                &view,
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&sampler),
                        },
                    ],
                    label: Some("Texture Bind Group"),
                });

        Ok(Self { layout, bind_group })
    }

    /// Bind group layout for pipeline creation (group 1).
    #[must_use]
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group to set at draw time.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Number of mip levels down to 1×1 for the given base dimensions.
#[must_use]
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Halve an RGBA8 image with a 2×2 box filter. Odd dimensions drop the
/// trailing row/column, matching the usual GL mip convention; dimensions
/// floor at 1.
fn downsample(pixels: &[u8], width: u32, height: u32) -> (Vec<u8>, u32, u32) {
    let out_w = (width / 2).max(1);
    let out_h = (height / 2).max(1);
    let mut out = Vec::with_capacity((out_w * out_h * 4) as usize);

    for y in 0..out_h {
        for x in 0..out_w {
            // Source texel block, degenerating to a single texel along
            // axes that are already 1 wide.
            let sx = (x * 2).min(width - 1);
            let sy = (y * 2).min(height - 1);
            let sx1 = (sx + 1).min(width - 1);
            let sy1 = (sy + 1).min(height - 1);

            for channel in 0..4 {
                let sample = |px: u32, py: u32| {
                    u32::from(pixels[((py * width + px) * 4 + channel) as usize])
                };
                let sum = sample(sx, sy)
                    + sample(sx1, sy)
                    + sample(sx, sy1)
                    + sample(sx1, sy1);
                out.push((sum / 4) as u8);
            }
        }
    }

    (out, out_w, out_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_count_covers_down_to_one_texel() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(512, 128), 10);
        assert_eq!(mip_level_count(100, 60), 7);
    }

    #[test]
    fn downsample_averages_2x2_blocks() {
        // 2x2 image, one channel pattern per texel.
        let pixels = [
            10, 0, 0, 255, //
            30, 0, 0, 255, //
            50, 0, 0, 255, //
            70, 0, 0, 255,
        ];
        let (out, w, h) = downsample(&pixels, 2, 2);
        assert_eq!((w, h), (1, 1));
        assert_eq!(out, vec![40, 0, 0, 255]);
    }

    #[test]
    fn downsample_floors_at_one() {
        let pixels = [0u8, 0, 0, 255, 100, 100, 100, 255];
        // 2x1 -> 1x1, averaging the two texels.
        let (out, w, h) = downsample(&pixels, 2, 1);
        assert_eq!((w, h), (1, 1));
        assert_eq!(out, vec![50, 50, 50, 255]);
    }

    #[test]
    fn downsample_chain_reaches_base_case() {
        let mut pixels = vec![128u8; 8 * 4 * 4];
        let (mut w, mut h) = (8u32, 4u32);
        for _ in 1..mip_level_count(8, 4) {
            let (next, nw, nh) = downsample(&pixels, w, h);
            pixels = next;
            w = nw;
            h = nh;
        }
        assert_eq!((w, h), (1, 1));
        assert_eq!(pixels, vec![128, 128, 128, 128]);
    }
}
