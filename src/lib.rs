//! flow-texturing
//!
//! Texture and material configuration on top of wgpu. Assets are loaded
//! asynchronously and every loader reports to a shared [`LoadingManager`], so a
//! host application can drive one aggregate progress indicator for any number
//! of concurrent loads. Loaded textures are attached to the texture slots of
//! mesh materials and uploaded to the GPU together with their render state.
//!
//! High-level modules
//! - `config`: where assets are read from
//! - `data_structures`: textures, cube textures, materials, geometry, scene background
//! - `error`: the [`AssetError`] type returned by loaders and validators
//! - `pipelines`: render pipelines and shaders for materials and the background
//! - `resources`: loading manager, asset readers, texture loaders and GPU materials
//!

pub mod config;
pub mod data_structures;
pub mod error;
pub mod pipelines;
pub mod resources;

pub use config::AssetConfig;
pub use error::AssetError;
pub use resources::loading_manager::{LoadProgress, LoadingManager};

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Vector2, Vector3};
pub use image::RgbaImage;

/// Install the platform logger. Safe to call more than once.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            log::debug!("logger already initialised: {e}");
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::debug!("logger already initialised");
        }
    }
}
