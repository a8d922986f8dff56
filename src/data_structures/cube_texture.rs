//! Six-face cube textures used as environment maps and scene backgrounds.

use std::{fmt, sync::Arc};

use image::RgbaImage;

use crate::{
    data_structures::texture::{
        ColorSpace, GpuTexture, SamplerSettings, TextureId, mip_chain, mip_level_count, write_mip_chain,
    },
    error::AssetError,
};

/// A face of a cube texture. The declaration order is the layer order on the GPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Conventional file stem of the face image: `px`, `nx`, `py`, `ny`, `pz`, `nz`.
    pub fn stem(self) -> &'static str {
        match self {
            CubeFace::PositiveX => "px",
            CubeFace::NegativeX => "nx",
            CubeFace::PositiveY => "py",
            CubeFace::NegativeY => "ny",
            CubeFace::PositiveZ => "pz",
            CubeFace::NegativeZ => "nz",
        }
    }

    /// The six face paths in loading order, e.g. `environmentMaps/0/px.png`.
    pub fn paths(dir: &str, extension: &str) -> [String; 6] {
        let dir = dir.trim_end_matches('/');
        CubeFace::ALL.map(|face| {
            if dir.is_empty() {
                format!("{}.{extension}", face.stem())
            } else {
                format!("{dir}/{}.{extension}", face.stem())
            }
        })
    }
}

/// Six square images of equal size forming a seamless 360° map.
#[derive(Clone)]
pub struct CubeTexture {
    id: TextureId,
    pub name: String,
    faces: [Arc<RgbaImage>; 6],
    sampler: SamplerSettings,
    version: u32,
}

impl fmt::Debug for CubeTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CubeTexture")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("size", &self.size())
            .field("sampler", &self.sampler)
            .field("version", &self.version)
            .finish()
    }
}

impl CubeTexture {
    /// Build a cube texture from faces ordered +X, -X, +Y, -Y, +Z, -Z.
    pub fn from_faces(name: impl Into<String>, faces: Vec<RgbaImage>) -> Result<Self, AssetError> {
        if faces.len() != 6 {
            return Err(AssetError::CubeFaceCount(faces.len()));
        }
        let expected = faces[0].dimensions();
        if expected.0 != expected.1 {
            return Err(AssetError::CubeFaceNotSquare(expected));
        }
        for (face, image) in CubeFace::ALL.iter().zip(&faces) {
            let actual = image.dimensions();
            if actual != expected {
                return Err(AssetError::CubeFaceSize {
                    face: *face,
                    expected,
                    actual,
                });
            }
        }

        let faces: [Arc<RgbaImage>; 6] = faces
            .into_iter()
            .map(Arc::new)
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|faces: Vec<_>| AssetError::CubeFaceCount(faces.len()))?;
        Ok(Self {
            id: TextureId::next(),
            name: name.into(),
            faces,
            sampler: SamplerSettings::default(),
            version: 0,
        })
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn face(&self, face: CubeFace) -> &RgbaImage {
        &self.faces[face.index()]
    }

    /// Edge length of every face in pixels.
    pub fn size(&self) -> u32 {
        self.faces[0].width()
    }

    pub fn sampler(&self) -> &SamplerSettings {
        &self.sampler
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn set_sampler(&mut self, sampler: SamplerSettings) {
        if self.sampler != sampler {
            self.sampler = sampler;
            self.version = self.version.wrapping_add(1);
        }
    }

    pub fn mip_level_count(&self) -> u32 {
        if self.sampler.generate_mipmaps {
            mip_level_count(self.size(), self.size())
        } else {
            1
        }
    }

    /// Mip levels of one face, starting with the full-size image.
    pub fn face_mip_chain(&self, face: CubeFace) -> Vec<RgbaImage> {
        mip_chain(self.face(face), self.mip_level_count())
    }
}

impl GpuTexture {
    /// Upload a cube texture as a six-layer texture with a cube view.
    pub fn from_cube(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        cube: &CubeTexture,
    ) -> anyhow::Result<Self> {
        let size = cube.size();
        if size == 0 {
            anyhow::bail!("cube texture {} has no pixels", cube.name);
        }
        let mip_level_count = cube.mip_level_count();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&cube.name),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 6,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: ColorSpace::Srgb.format(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for face in CubeFace::ALL {
            write_mip_chain(queue, &texture, face.index() as u32, &cube.face_mip_chain(face));
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(&cube.name),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = device.create_sampler(&cube.sampler().descriptor(Some(&cube.name)));
        Ok(Self {
            texture,
            view,
            sampler,
        })
    }

    /// A 1x1 cube with every face set to `rgba`.
    pub fn solid_cube(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        rgba: [u8; 4],
    ) -> anyhow::Result<Self> {
        let faces = vec![RgbaImage::from_pixel(1, 1, image::Rgba(rgba)); 6];
        let mut cube = CubeTexture::from_faces(label, faces)?;
        cube.set_sampler(SamplerSettings {
            generate_mipmaps: false,
            ..SamplerSettings::default()
        });
        Self::from_cube(device, queue, &cube)
    }
}
