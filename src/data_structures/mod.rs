//! Data structures for texturing: textures, cube textures, materials, geometry and scenes.
//!
//! - `texture` contains the decoded 2D texture, its sampler settings and GPU upload
//! - `cube_texture` holds six-face environment maps
//! - `material` defines the mesh materials, their render state and texture slots
//! - `geometry` is indexed triangle data with named attributes and primitives
//! - `scene` holds the scene background and environment

pub mod cube_texture;
pub mod geometry;
pub mod material;
pub mod scene;
pub mod texture;
