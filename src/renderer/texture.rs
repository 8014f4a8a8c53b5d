//! Texture images and their GPU counterparts

use std::path::Path;

use image::imageops::FilterType;

use crate::error::DemoError;

/// Side length of the fallback checkerboard in pixels
const CHECKER_SIZE: u32 = 64;
/// Checker cell size in pixels
const CHECKER_CELL: u32 = 8;

/// Decoded RGBA8 image, row-major from the top row
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Decode an image file into RGBA8
    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let decoded = image::ImageReader::open(path)
            .map_err(|e| DemoError::Texture {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
            .decode()
            .map_err(|e| DemoError::Texture {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
            .to_rgba8();

        let (width, height) = decoded.dimensions();
        log::info!("Loaded texture {} ({}x{})", path.display(), width, height);
        Ok(Self {
            width,
            height,
            rgba: decoded.into_raw(),
        })
    }

    /// Magenta and black checkerboard used when a texture cannot be read
    pub fn checkerboard() -> Self {
        let mut rgba = Vec::with_capacity((CHECKER_SIZE * CHECKER_SIZE * 4) as usize);
        for y in 0..CHECKER_SIZE {
            for x in 0..CHECKER_SIZE {
                let on = ((x / CHECKER_CELL) + (y / CHECKER_CELL)) % 2 == 0;
                let texel = if on {
                    [255, 0, 255, 255]
                } else {
                    [0, 0, 0, 255]
                };
                rgba.extend_from_slice(&texel);
            }
        }
        Self {
            width: CHECKER_SIZE,
            height: CHECKER_SIZE,
            rgba,
        }
    }

    /// Load `path`, falling back to the checkerboard with a warning
    pub fn load_or_checkerboard(path: &Path) -> Self {
        match Self::load(path) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("{e}; using checkerboard");
                Self::checkerboard()
            }
        }
    }

    /// Downscale so neither side exceeds `max_dimension`, keeping aspect
    pub fn fit_within(self, max_dimension: u32) -> Self {
        if self.width <= max_dimension && self.height <= max_dimension {
            return self;
        }
        let scale = max_dimension as f32 / self.width.max(self.height) as f32;
        let width = ((self.width as f32 * scale) as u32).clamp(1, max_dimension);
        let height = ((self.height as f32 * scale) as u32).clamp(1, max_dimension);

        let Some(buffer) = image::RgbaImage::from_raw(self.width, self.height, self.rgba) else {
            return Self::checkerboard();
        };
        let resized = image::imageops::resize(&buffer, width, height, FilterType::Triangle);
        log::info!(
            "Downscaled texture from {}x{} to {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        Self {
            width,
            height,
            rgba: resized.into_raw(),
        }
    }
}

/// A sampled 2D texture on the GPU
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &TextureImage,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Load from disk (or the checkerboard) and upload, respecting device limits
    pub fn from_path(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Self {
        let max = device.limits().max_texture_dimension_2d;
        let image = TextureImage::load_or_checkerboard(path).fit_within(max);
        Self::upload(device, queue, &path.display().to_string(), &image)
    }
}

/// Repeating, linearly filtered sampler
pub fn repeat_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("repeat_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_layout() {
        let img = TextureImage::checkerboard();
        assert_eq!(img.rgba.len(), (img.width * img.height * 4) as usize);
        assert_eq!(&img.rgba[0..4], &[255, 0, 255, 255]);
        // First texel of the second cell is dark
        let second_cell = (CHECKER_CELL * 4) as usize;
        assert_eq!(&img.rgba[second_cell..second_cell + 4], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("definitely/not/here.jpg");
        assert!(matches!(
            TextureImage::load(path),
            Err(DemoError::Texture { .. })
        ));
        let img = TextureImage::load_or_checkerboard(path);
        assert_eq!(img, TextureImage::checkerboard());
    }

    #[test]
    fn test_fit_within_keeps_aspect() {
        let img = TextureImage {
            width: 400,
            height: 100,
            rgba: vec![128; 400 * 100 * 4],
        };
        let fitted = img.fit_within(200);
        assert_eq!((fitted.width, fitted.height), (200, 50));
        assert_eq!(fitted.rgba.len(), 200 * 50 * 4);
    }

    #[test]
    fn test_fit_within_leaves_small_images() {
        let img = TextureImage::checkerboard();
        let fitted = img.clone().fit_within(2048);
        assert_eq!(fitted, img);
    }
}
