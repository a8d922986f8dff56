use std::{future::Future, sync::Arc};

use futures::future::join_all;

use crate::{
    data_structures::cube_texture::{CubeFace, CubeTexture},
    error::AssetError,
    resources::{PendingItem, join_path, loading_manager::LoadingManager, reader::AssetReader},
};

/// Loads six face images into a [`CubeTexture`].
///
/// Each face is one item for the [`LoadingManager`], so a cube map advances
/// the aggregate progress six times.
#[derive(Clone)]
pub struct CubeTextureLoader {
    manager: Arc<LoadingManager>,
    reader: Arc<dyn AssetReader>,
    path: String,
}

impl CubeTextureLoader {
    pub fn new(manager: Arc<LoadingManager>, reader: Arc<dyn AssetReader>) -> Self {
        Self {
            manager,
            reader,
            path: String::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Load a cube texture from faces ordered +X, -X, +Y, -Y, +Z, -Z.
    ///
    /// Anything but six urls fails before a single file is registered. The
    /// faces load concurrently and must all be square and of equal size.
    pub fn load(&self, urls: &[&str]) -> impl Future<Output = Result<CubeTexture, AssetError>> + use<> {
        let items = if urls.len() == CubeFace::ALL.len() {
            Ok(urls
                .iter()
                .map(|url| {
                    let url = self.manager.resolve_url(&join_path(&self.path, url));
                    PendingItem::start(&self.manager, url)
                })
                .collect::<Vec<_>>())
        } else {
            log::error!("cube texture needs 6 face urls, got {}", urls.len());
            Err(AssetError::CubeFaceCount(urls.len()))
        };
        let reader = Arc::clone(&self.reader);
        async move {
            let items = items?;
            let name = items[0].url().to_string();
            let faces = join_all(items.into_iter().map(|item| item.fetch(Arc::clone(&reader))))
                .await
                .into_iter()
                .collect::<Result<Vec<_>, _>>()?;
            CubeTexture::from_faces(name, faces).inspect_err(|e| log::error!("{e}"))
        }
    }

    /// Load `px`, `nx`, `py`, `ny`, `pz` and `nz` with the given extension from `dir`.
    pub fn load_dir(
        &self,
        dir: &str,
        extension: &str,
    ) -> impl Future<Output = Result<CubeTexture, AssetError>> + use<> {
        let paths = CubeFace::paths(dir, extension);
        let urls: Vec<&str> = paths.iter().map(String::as_str).collect();
        self.load(&urls)
    }
}
