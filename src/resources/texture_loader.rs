use std::{future::Future, sync::Arc};

use futures::future::join_all;

use crate::{
    data_structures::texture::Texture,
    error::AssetError,
    resources::{PendingItem, join_path, loading_manager::LoadingManager, reader::AssetReader},
};

/// Loads 2D textures and reports every file to its [`LoadingManager`].
///
/// ```no_run
/// # use std::sync::Arc;
/// # use flow_texturing::{LoadingManager, resources::{reader::FsReader, texture_loader::TextureLoader}};
/// # async fn demo() -> Result<(), flow_texturing::AssetError> {
/// let manager = Arc::new(LoadingManager::logging());
/// let loader = TextureLoader::new(manager, Arc::new(FsReader::new("assets")));
/// let color = loader.load("textures/door/color.jpg").await?;
/// # Ok(()) }
/// ```
#[derive(Clone)]
pub struct TextureLoader {
    manager: Arc<LoadingManager>,
    reader: Arc<dyn AssetReader>,
    path: String,
}

impl TextureLoader {
    pub fn new(manager: Arc<LoadingManager>, reader: Arc<dyn AssetReader>) -> Self {
        Self {
            manager,
            reader,
            path: String::new(),
        }
    }

    /// Prefix prepended to every url passed to [`load`](Self::load).
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn manager(&self) -> &Arc<LoadingManager> {
        &self.manager
    }

    /// Load one texture.
    ///
    /// The file is registered with the manager as soon as this is called, so
    /// several loads started before awaiting any of them form one batch. On
    /// failure the manager sees an error for the url, then the item ends.
    pub fn load(&self, url: &str) -> impl Future<Output = Result<Texture, AssetError>> + use<> {
        let url = self.manager.resolve_url(&join_path(&self.path, url));
        let item = PendingItem::start(&self.manager, url.clone());
        let reader = Arc::clone(&self.reader);
        async move {
            let image = item.fetch(reader).await?;
            Ok(Texture::from_rgba(url, image))
        }
    }

    /// Load several textures concurrently. Results keep the order of `urls`.
    pub async fn load_all(&self, urls: &[&str]) -> Vec<Result<Texture, AssetError>> {
        join_all(urls.iter().map(|url| self.load(url))).await
    }
}
