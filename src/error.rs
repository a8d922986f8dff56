//! Errors raised while reading, decoding and validating textures and geometry.

use thiserror::Error;

use crate::data_structures::cube_texture::CubeFace;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("a cube texture needs exactly 6 faces, got {0}")]
    CubeFaceCount(usize),

    #[error("cube face {face:?} is {actual:?} but {expected:?} was expected")]
    CubeFaceSize {
        face: CubeFace,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("cube faces must be square, got {0:?}")]
    CubeFaceNotSquare((u32, u32)),

    #[error("geometry has no `{0}` attribute")]
    MissingAttribute(String),

    #[error("attribute `{name}` has {actual} items but the geometry has {expected} vertices")]
    AttributeLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("attribute `{name}` length {len} is not a multiple of its item size {item_size}")]
    AttributeItemSize {
        name: String,
        len: usize,
        item_size: usize,
    },
}

impl AssetError {
    /// The url of the asset that failed, for errors that originate from a load.
    pub fn url(&self) -> Option<&str> {
        match self {
            AssetError::Io { url, .. } | AssetError::Decode { url, .. } => Some(url),
            _ => None,
        }
    }
}
