//! 2D textures and their GPU counterparts.
//!
//! [`Texture`] is the CPU-side handle produced by the loaders: decoded RGBA
//! pixels plus the sampler settings a material wants for them. Pixels are
//! shared, so handing the same texture to several materials is cheap.
//! [`GpuTexture`] is the uploaded WGPU texture with its view and sampler.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use image::{DynamicImage, ImageFormat, RgbaImage, imageops::FilterType, load_from_memory_with_format};

use crate::error::AssetError;

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies a texture (or cube texture) for the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    pub(crate) fn next() -> Self {
        Self(NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Nearest,
    #[default]
    Linear,
}

impl From<FilterMode> for wgpu::FilterMode {
    fn from(mode: FilterMode) -> Self {
        match mode {
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
            FilterMode::Linear => wgpu::FilterMode::Linear,
        }
    }
}

impl From<FilterMode> for wgpu::MipmapFilterMode {
    fn from(mode: FilterMode) -> Self {
        match mode {
            FilterMode::Nearest => wgpu::MipmapFilterMode::Nearest,
            FilterMode::Linear => wgpu::MipmapFilterMode::Linear,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Wrapping {
    #[default]
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

impl From<Wrapping> for wgpu::AddressMode {
    fn from(wrapping: Wrapping) -> Self {
        match wrapping {
            Wrapping::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            Wrapping::Repeat => wgpu::AddressMode::Repeat,
            Wrapping::MirroredRepeat => wgpu::AddressMode::MirrorRepeat,
        }
    }
}

/// How texel values are interpreted on the GPU.
///
/// Colour data (albedo, matcaps, environment maps) is authored in sRGB while
/// data textures (normals, heights, metalness, ...) must be sampled as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    Srgb,
    Linear,
}

impl ColorSpace {
    pub fn format(self) -> wgpu::TextureFormat {
        match self {
            ColorSpace::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            ColorSpace::Linear => wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

/// Filtering and addressing used when a texture is sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SamplerSettings {
    pub mag_filter: FilterMode,
    pub min_filter: FilterMode,
    pub mipmap_filter: FilterMode,
    pub wrap_s: Wrapping,
    pub wrap_t: Wrapping,
    pub generate_mipmaps: bool,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: FilterMode::Linear,
            wrap_s: Wrapping::ClampToEdge,
            wrap_t: Wrapping::ClampToEdge,
            generate_mipmaps: true,
        }
    }
}

impl SamplerSettings {
    /// Nearest sampling without mip-maps. Every texel stays a hard-edged step,
    /// which is what toon gradient maps rely on.
    pub fn nearest() -> Self {
        Self {
            mag_filter: FilterMode::Nearest,
            min_filter: FilterMode::Nearest,
            mipmap_filter: FilterMode::Nearest,
            generate_mipmaps: false,
            ..Default::default()
        }
    }

    /// True when sampling can blend neighbouring texels or mip levels.
    pub fn is_smooth(&self) -> bool {
        self.mag_filter == FilterMode::Linear
            || self.min_filter == FilterMode::Linear
            || self.generate_mipmaps
    }

    pub fn descriptor<'a>(&self, label: Option<&'a str>) -> wgpu::SamplerDescriptor<'a> {
        wgpu::SamplerDescriptor {
            label,
            address_mode_u: self.wrap_s.into(),
            address_mode_v: self.wrap_t.into(),
            address_mode_w: self.wrap_t.into(),
            mag_filter: self.mag_filter.into(),
            min_filter: self.min_filter.into(),
            mipmap_filter: self.mipmap_filter.into(),
            lod_min_clamp: 0.0,
            lod_max_clamp: if self.generate_mipmaps { 32.0 } else { 0.0 },
            ..Default::default()
        }
    }
}

/// A decoded 2D texture ready to be attached to a material slot.
///
/// Clones share the pixel data and the [`TextureId`]. Every change to the
/// sampler settings bumps [`version`](Self::version) so GPU resources built
/// from an older state can be detected and rebuilt.
#[derive(Clone)]
pub struct Texture {
    id: TextureId,
    pub name: String,
    image: Arc<RgbaImage>,
    sampler: SamplerSettings,
    version: u32,
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("dimensions", &self.dimensions())
            .field("sampler", &self.sampler)
            .field("version", &self.version)
            .finish()
    }
}

impl Texture {
    pub fn from_rgba(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            id: TextureId::next(),
            name: name.into(),
            image: Arc::new(image),
            sampler: SamplerSettings::default(),
            version: 0,
        }
    }

    pub fn from_image(name: impl Into<String>, image: &DynamicImage) -> Self {
        Self::from_rgba(name, image.to_rgba8())
    }

    /// Decode raw image file contents (PNG, JPEG, ...).
    ///
    /// * `format` is an optional file extension hint (e.g. "png"). Unknown hints
    ///   fall back to guessing from the data.
    pub fn from_bytes(
        name: impl Into<String>,
        bytes: &[u8],
        format: Option<&str>,
    ) -> Result<Self, AssetError> {
        let name = name.into();
        let image = decode_image(&name, bytes, format)?;
        Ok(Self::from_rgba(name, image))
    }

    /// A texture filled with a single colour.
    pub fn solid(name: impl Into<String>, width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_rgba(name, RgbaImage::from_pixel(width, height, image::Rgba(rgba)))
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn sampler(&self) -> &SamplerSettings {
        &self.sampler
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Mark the texture as changed so GPU copies get rebuilt.
    pub fn set_needs_update(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    pub fn set_sampler(&mut self, sampler: SamplerSettings) {
        if self.sampler != sampler {
            self.sampler = sampler;
            self.set_needs_update();
        }
    }

    pub fn set_mag_filter(&mut self, filter: FilterMode) {
        self.set_sampler(SamplerSettings {
            mag_filter: filter,
            ..self.sampler
        });
    }

    pub fn set_min_filter(&mut self, filter: FilterMode) {
        self.set_sampler(SamplerSettings {
            min_filter: filter,
            ..self.sampler
        });
    }

    pub fn set_generate_mipmaps(&mut self, generate: bool) {
        self.set_sampler(SamplerSettings {
            generate_mipmaps: generate,
            ..self.sampler
        });
    }

    pub fn set_wrap(&mut self, wrap_s: Wrapping, wrap_t: Wrapping) {
        self.set_sampler(SamplerSettings {
            wrap_s,
            wrap_t,
            ..self.sampler
        });
    }

    /// Switch to the stepped look used by gradient maps (see [`SamplerSettings::nearest`]).
    pub fn nearest_filtering(mut self) -> Self {
        self.set_sampler(SamplerSettings::nearest());
        self
    }

    pub fn mip_level_count(&self) -> u32 {
        if self.sampler.generate_mipmaps {
            mip_level_count(self.width(), self.height())
        } else {
            1
        }
    }

    /// All mip levels, starting with the full-size image.
    pub fn mip_chain(&self) -> Vec<RgbaImage> {
        mip_chain(&self.image, self.mip_level_count())
    }
}

/// Decode image file contents to RGBA8, using `format` (a file extension) as a
/// hint when it names a known format.
pub fn decode_image(url: &str, bytes: &[u8], format: Option<&str>) -> Result<RgbaImage, AssetError> {
    let decoded = match format.and_then(ImageFormat::from_extension) {
        Some(format) => load_from_memory_with_format(bytes, format),
        None => image::load_from_memory(bytes),
    };
    decoded.map(|img| img.to_rgba8()).map_err(|source| AssetError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Number of levels in a full mip chain for a `width` x `height` image.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// The first `level_count` levels of the mip chain of `image`, starting with
/// `image` itself. Each level is half the size of the previous one and never
/// smaller than one texel.
pub(crate) fn mip_chain(image: &RgbaImage, level_count: u32) -> Vec<RgbaImage> {
    let mut levels = vec![image.clone()];
    for _ in 1..level_count {
        let previous = &levels[levels.len() - 1];
        let width = (previous.width() / 2).max(1);
        let height = (previous.height() / 2).max(1);
        let next = image::imageops::resize(previous, width, height, FilterType::Triangle);
        levels.push(next);
    }
    levels
}

/// A GPU texture with a view and sampler.
///
/// Created from a [`Texture`] via [`from_texture`](Self::from_texture), from a
/// cube texture via `from_cube`, or as a 1x1 fallback via [`solid`](Self::solid).
#[derive(Clone, Debug)]
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Upload `texture` and every level of its mip chain.
    ///
    /// * `color_space` selects between an sRGB and a linear texture format and
    ///   should follow the material slot the texture is bound to
    pub fn from_texture(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture: &Texture,
        color_space: ColorSpace,
    ) -> anyhow::Result<Self> {
        let (width, height) = texture.dimensions();
        if width == 0 || height == 0 {
            anyhow::bail!("texture {} has no pixels", texture.name);
        }
        let mip_level_count = texture.mip_level_count();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let gpu_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&texture.name),
            size,
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: color_space.format(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        write_mip_chain(queue, &gpu_texture, 0, &texture.mip_chain());

        let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&texture.sampler().descriptor(Some(&texture.name)));
        Ok(Self {
            texture: gpu_texture,
            view,
            sampler,
        })
    }

    /// A 1x1 texture holding `rgba`, bound wherever a material slot is empty.
    pub fn solid(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        rgba: [u8; 4],
        color_space: ColorSpace,
    ) -> anyhow::Result<Self> {
        let mut texture = Texture::solid(label, 1, 1, rgba);
        texture.set_generate_mipmaps(false);
        Self::from_texture(device, queue, &texture, color_space)
    }

    /// Depth attachment for the material and skybox pipelines.
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            lod_max_clamp: 100.0,
            ..Default::default()
        });
        Self { texture, view, sampler }
    }
}

/// Write `levels`, a mip chain as built by [`mip_chain`], into array layer
/// `layer` of `texture`.
pub(crate) fn write_mip_chain(queue: &wgpu::Queue, texture: &wgpu::Texture, layer: u32, levels: &[RgbaImage]) {
    for (level, level_image) in levels.iter().enumerate() {
        write_level(queue, texture, layer, level as u32, level_image);
    }
}

fn write_level(queue: &wgpu::Queue, texture: &wgpu::Texture, layer: u32, mip_level: u32, image: &RgbaImage) {
    let (width, height) = image.dimensions();
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture,
            mip_level,
            origin: wgpu::Origin3d { x: 0, y: 0, z: layer },
        },
        image.as_raw(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_mip_chain_halves_down_to_one_texel() {
        let texture = Texture::solid("checker", 8, 2, [255, 0, 0, 255]);
        assert_eq!(texture.mip_level_count(), 4);

        let sizes: Vec<_> = texture.mip_chain().iter().map(|l| l.dimensions()).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
    }

    #[test]
    fn upload_chain_matches_declared_level_count() {
        let image = RgbaImage::from_pixel(100, 30, image::Rgba([10, 20, 30, 255]));
        let levels = mip_chain(&image, mip_level_count(100, 30));
        assert_eq!(levels.len(), 7);
        assert_eq!(levels[0], image);
        assert_eq!(levels[1].dimensions(), (50, 15));
        assert_eq!(levels[6].dimensions(), (1, 1));
        assert_eq!(levels[6].get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn disabling_mipmaps_keeps_a_single_level() {
        let mut texture = Texture::solid("gradient", 5, 1, [0, 0, 0, 255]);
        texture.set_generate_mipmaps(false);
        assert_eq!(texture.mip_level_count(), 1);
        assert_eq!(texture.mip_chain().len(), 1);
    }

    #[test]
    fn mip_level_count_of_non_power_of_two() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(100, 30), 7);
        assert_eq!(mip_level_count(0, 0), 1);
    }

    #[test]
    fn sampler_changes_bump_version_only_when_different() {
        let mut texture = Texture::solid("t", 2, 2, [1, 2, 3, 4]);
        texture.set_mag_filter(FilterMode::Linear);
        assert_eq!(texture.version(), 0);
        texture.set_mag_filter(FilterMode::Nearest);
        assert_eq!(texture.version(), 1);
    }

    #[test]
    fn clones_share_identity() {
        let texture = Texture::solid("t", 1, 1, [0; 4]);
        let other = Texture::solid("t", 1, 1, [0; 4]);
        assert_eq!(texture.clone().id(), texture.id());
        assert_ne!(texture.id(), other.id());
    }

    #[test]
    fn nearest_descriptor_clamps_lod() {
        let desc = SamplerSettings::nearest().descriptor(None);
        assert_eq!(desc.mag_filter, wgpu::FilterMode::Nearest);
        assert_eq!(desc.mipmap_filter, wgpu::MipmapFilterMode::Nearest);
        assert_eq!(desc.lod_max_clamp, 0.0);

        let desc = SamplerSettings::default().descriptor(None);
        assert_eq!(desc.mipmap_filter, wgpu::MipmapFilterMode::Linear);
    }
}
