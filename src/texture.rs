//! Image-decode-and-upload texture helper
//!
//! Decodes image files on the CPU, then uploads them as `wgpu` textures.
//! 3-channel sources keep an `Rgb8` identity on the CPU side and are padded
//! to RGBA at upload, since wgpu has no 3-channel texel format.

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};

/// How to decode and configure a 2D texture
#[derive(Debug, Clone, Default)]
pub struct TextureCreateInfo {
    pub path: PathBuf,
    pub flip_vertically: bool,
    /// Store texels as sRGB so sampling converts them to linear
    pub srgb_to_linear: bool,
    pub generate_mipmaps: bool,
}

impl TextureCreateInfo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// How to decode and configure a cubemap
///
/// Face order follows the usual +X, -X, +Y, -Y, +Z, -Z convention.
#[derive(Debug, Clone, Default)]
pub struct CubemapCreateInfo {
    pub paths: [PathBuf; 6],
    /// Apply the left-handed to right-handed correction: ±Y faces flip
    /// vertically, the other four horizontally, and the ±Z faces swap
    pub right_handed_system: bool,
    pub generate_mipmaps: bool,
}

/// CPU-side pixel layout of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Decoded image data before GPU upload
#[derive(Debug, Clone)]
pub struct TextureData {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Whether sampling should convert stored texels from sRGB to linear
    pub srgb: bool,
}

impl TextureData {
    /// The wgpu format this data uploads as (always four channels)
    pub fn upload_format(&self) -> wgpu::TextureFormat {
        if self.srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        }
    }

    /// Pixels padded out to RGBA with opaque alpha
    pub fn to_rgba(&self) -> Vec<u8> {
        match self.format {
            PixelFormat::Rgba8 => self.pixels.clone(),
            PixelFormat::Rgb8 => {
                let mut out = Vec::with_capacity((self.width * self.height * 4) as usize);
                for rgb in self.pixels.chunks_exact(3) {
                    out.extend_from_slice(rgb);
                    out.push(255);
                }
                out
            }
        }
    }
}

/// Decode an image file per the create info.
///
/// 3-channel sources decode as `Rgb8`, everything else as `Rgba8`
/// (grayscale and paletted images expand). Fails with an error naming the
/// path when the file cannot be decoded.
pub fn load_texture_data(info: &TextureCreateInfo) -> Result<TextureData> {
    let img = image::open(&info.path)
        .with_context(|| format!("failed to load texture file {}", info.path.display()))?;
    let img = if info.flip_vertically { img.flipv() } else { img };

    let is_rgb = matches!(
        img.color(),
        image::ColorType::Rgb8 | image::ColorType::Rgb16 | image::ColorType::Rgb32F
    );
    let (pixels, width, height, format) = if is_rgb {
        let rgb = img.to_rgb8();
        let (w, h) = rgb.dimensions();
        (rgb.into_raw(), w, h, PixelFormat::Rgb8)
    } else {
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        (rgba.into_raw(), w, h, PixelFormat::Rgba8)
    };

    log::info!(
        "loaded texture {} ({}x{}, {:?})",
        info.path.display(),
        width,
        height,
        format
    );

    Ok(TextureData {
        pixels,
        width,
        height,
        format,
        srgb: info.srgb_to_linear,
    })
}

/// Number of mip levels down to 1x1 for the given dimensions
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Halve an RGBA image with a 2x2 box filter (edges clamp)
pub fn downsample_rgba(pixels: &[u8], width: u32, height: u32) -> (Vec<u8>, u32, u32) {
    let new_w = (width / 2).max(1);
    let new_h = (height / 2).max(1);
    let mut out = Vec::with_capacity((new_w * new_h * 4) as usize);

    for y in 0..new_h {
        for x in 0..new_w {
            let mut acc = [0u32; 4];
            for dy in 0..2 {
                for dx in 0..2 {
                    let sx = (x * 2 + dx).min(width - 1);
                    let sy = (y * 2 + dy).min(height - 1);
                    let idx = ((sy * width + sx) * 4) as usize;
                    for c in 0..4 {
                        acc[c] += pixels[idx + c] as u32;
                    }
                }
            }
            for c in &acc {
                out.push((c / 4) as u8);
            }
        }
    }

    (out, new_w, new_h)
}

fn write_mip_chain(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    base: Vec<u8>,
    width: u32,
    height: u32,
    levels: u32,
    layer: u32,
) {
    let mut pixels = base;
    let (mut w, mut h) = (width, height);

    for level in 0..levels {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: level,
                origin: wgpu::Origin3d { x: 0, y: 0, z: layer },
                aspect: wgpu::TextureAspect::All,
            },
            &pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );

        if level + 1 < levels {
            let (next, nw, nh) = downsample_rgba(&pixels, w, h);
            pixels = next;
            w = nw;
            h = nh;
        }
    }
}

/// Decode an image file and upload it as a 2D texture.
pub fn create_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    info: &TextureCreateInfo,
) -> Result<wgpu::Texture> {
    let data = load_texture_data(info)?;
    let levels = if info.generate_mipmaps {
        mip_level_count(data.width, data.height)
    } else {
        1
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("texture"),
        size: wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: levels,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: data.upload_format(),
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    let (width, height) = (data.width, data.height);
    write_mip_chain(queue, &texture, data.to_rgba(), width, height, levels, 0);

    Ok(texture)
}

/// Decode six face images and upload them as a cubemap.
///
/// Faces are stored as a 6-layer array texture; create the view with
/// `wgpu::TextureViewDimension::Cube`. All faces must share dimensions,
/// and any face that fails to decode aborts with an error naming its path.
pub fn create_cubemap(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    info: &CubemapCreateInfo,
) -> Result<wgpu::Texture> {
    let mut faces = Vec::with_capacity(6);
    for (index, path) in info.paths.iter().enumerate() {
        let img = image::open(path)
            .with_context(|| format!("failed to load texture file {}", path.display()))?;

        let img = if info.right_handed_system {
            // ±Y faces flip upside down, the rest mirror horizontally
            if index == 2 || index == 3 { img.flipv() } else { img.fliph() }
        } else {
            img
        };

        let rgb = img.to_rgb8();
        let (w, h) = rgb.dimensions();
        faces.push((index, rgb.into_raw(), w, h));
    }

    let (_, _, width, height) = faces[0];
    for (index, _, w, h) in &faces {
        ensure!(
            *w == width && *h == height,
            "cubemap face {} has mismatched dimensions {}x{} (expected {}x{})",
            info.paths[*index].display(),
            w,
            h,
            width,
            height
        );
    }

    if info.right_handed_system {
        // Swap -z and +z
        faces.swap(4, 5);
    }

    let levels = if info.generate_mipmaps {
        mip_level_count(width, height)
    } else {
        1
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("cubemap"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 6,
        },
        mip_level_count: levels,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    for (layer, (_, rgb, w, h)) in faces.into_iter().enumerate() {
        let data = TextureData {
            pixels: rgb,
            width: w,
            height: h,
            format: PixelFormat::Rgb8,
            srgb: false,
        };
        write_mip_chain(
            queue,
            &texture,
            data.to_rgba(),
            width,
            height,
            levels,
            layer as u32,
        );
    }

    log::info!("loaded cubemap ({}x{} per face)", width, height);

    Ok(texture)
}
