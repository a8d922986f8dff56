//! Loading assets and turning them into GPU resources.
//!
//! - `loading_manager` aggregates the progress of every load
//! - `reader` provides the bytes (disk, memory, HTTP)
//! - `texture_loader` / `cube_texture_loader` decode 2D and cube textures
//! - `material` builds bind groups for materials
//! - `mesh` uploads geometry

use std::{path::Path, sync::Arc};

use image::RgbaImage;

use crate::{
    data_structures::{
        cube_texture::CubeTexture,
        geometry::Geometry,
        material::{Material, MeshMaterial},
        texture::decode_image,
    },
    error::AssetError,
    resources::{loading_manager::LoadingManager, material::GpuMaterial, mesh::GpuGeometry, reader::AssetReader},
};

pub mod cube_texture_loader;
pub mod loading_manager;
pub mod material;
pub mod mesh;
pub mod reader;
pub mod texture_loader;

/// Join a loader's path prefix and a url the way loaders resolve them.
pub(crate) fn join_path(prefix: &str, url: &str) -> String {
    if prefix.is_empty() {
        url.to_string()
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), url.trim_start_matches('/'))
    }
}

/// One file registered with a [`LoadingManager`].
///
/// The item is started on creation and always ended exactly once: by
/// [`fetch`](Self::fetch), or as a failure when it is dropped unfinished.
pub(crate) struct PendingItem {
    manager: Arc<LoadingManager>,
    url: String,
    finished: bool,
}

impl PendingItem {
    pub(crate) fn start(manager: &Arc<LoadingManager>, url: String) -> Self {
        manager.item_start(&url);
        Self {
            manager: Arc::clone(manager),
            url,
            finished: false,
        }
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// Read and decode the item's image.
    pub(crate) async fn fetch(mut self, reader: Arc<dyn AssetReader>) -> Result<RgbaImage, AssetError> {
        let extension = Path::new(&self.url)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_owned);
        let result = match reader.read(&self.url).await {
            Ok(bytes) => decode_image(&self.url, &bytes, extension.as_deref()),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            log::error!("{e}");
            self.manager.item_error(&self.url);
        }
        self.finish();
        result
    }

    fn finish(&mut self) {
        self.finished = true;
        self.manager.item_end(&self.url);
    }
}

impl Drop for PendingItem {
    fn drop(&mut self) {
        if !self.finished {
            log::warn!("load of {} was dropped before it finished", self.url);
            self.manager.item_error(&self.url);
            self.finish();
        }
    }
}

/// Upload `geometry` and `material` for drawing together.
///
/// Fails when the geometry lacks an attribute one of the bound textures needs
/// (`uv2` for ambient occlusion maps); configuration that merely renders
/// differently than it reads is logged as a warning. `env_map` is the scene
/// environment; a standard material's own map takes precedence over it.
pub fn upload_mesh(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    name: &str,
    geometry: &Geometry,
    material: &Material,
    env_map: Option<&CubeTexture>,
) -> anyhow::Result<(GpuGeometry, GpuMaterial)> {
    material.validate_geometry(geometry)?;
    for warning in material.lint(Some(geometry)) {
        log::warn!("{name}: {warning}");
    }
    let gpu_geometry = GpuGeometry::new(device, name, geometry);
    let gpu_material = GpuMaterial::new(device, queue, material, env_map)?;
    Ok((gpu_geometry, gpu_material))
}
