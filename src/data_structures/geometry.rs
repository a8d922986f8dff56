//! Indexed triangle geometry with named per-vertex attributes.
//!
//! Materials read `position`, `normal` and `uv`. Ambient occlusion maps sample
//! a second UV channel, `uv2`, which primitives do not generate; call
//! [`Geometry::duplicate_uv_to_uv2`] before binding an AO map.

use std::collections::BTreeMap;

use cgmath::{InnerSpace, Vector2, Vector3, Zero};

use crate::error::AssetError;

pub const POSITION: &str = "position";
pub const NORMAL: &str = "normal";
pub const UV: &str = "uv";
pub const UV2: &str = "uv2";

/// Flat `f32` data where every `item_size` values form one vertex item.
#[derive(Clone, Debug, PartialEq)]
pub struct BufferAttribute {
    pub array: Vec<f32>,
    pub item_size: usize,
}

impl BufferAttribute {
    pub fn new(array: Vec<f32>, item_size: usize) -> Self {
        Self { array, item_size }
    }

    pub fn count(&self) -> usize {
        if self.item_size == 0 {
            0
        } else {
            self.array.len() / self.item_size
        }
    }

    fn item<const N: usize>(&self, index: usize) -> [f32; N] {
        let mut out = [0.0; N];
        let start = index * self.item_size;
        for (i, value) in out.iter_mut().enumerate().take(self.item_size) {
            *value = self.array.get(start + i).copied().unwrap_or(0.0);
        }
        out
    }
}

/// Interleaved vertex layout uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub uv2: [f32; 2],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl ModelVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x3,
        5 => Float32x3,
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    attributes: BTreeMap<String, BufferAttribute>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn new(position: BufferAttribute, indices: Vec<u32>) -> Result<Self, AssetError> {
        let mut geometry = Self {
            attributes: BTreeMap::new(),
            indices,
        };
        geometry.set_attribute(POSITION, position)?;
        Ok(geometry)
    }

    /// Add or replace an attribute. Every attribute must describe the same
    /// number of vertices as `position`.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        attribute: BufferAttribute,
    ) -> Result<(), AssetError> {
        let name = name.into();
        if attribute.item_size == 0 || attribute.array.len() % attribute.item_size != 0 {
            return Err(AssetError::AttributeItemSize {
                name,
                len: attribute.array.len(),
                item_size: attribute.item_size,
            });
        }
        if name == POSITION {
            if let Some((other, existing)) = self
                .attributes
                .iter()
                .find(|(other, existing)| other.as_str() != POSITION && existing.count() != attribute.count())
            {
                return Err(AssetError::AttributeLength {
                    name: other.clone(),
                    expected: attribute.count(),
                    actual: existing.count(),
                });
            }
        } else if let Some(position) = self.attributes.get(POSITION) {
            if position.count() != attribute.count() {
                return Err(AssetError::AttributeLength {
                    name,
                    expected: position.count(),
                    actual: attribute.count(),
                });
            }
        }
        self.attributes.insert(name, attribute);
        Ok(())
    }

    pub fn attribute(&self, name: &str) -> Option<&BufferAttribute> {
        self.attributes.get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn vertex_count(&self) -> usize {
        self.attributes.get(POSITION).map_or(0, BufferAttribute::count)
    }

    /// Copy the primary UV channel into `uv2`, which ambient occlusion maps read.
    pub fn duplicate_uv_to_uv2(&mut self) -> Result<(), AssetError> {
        let uv = self
            .attributes
            .get(UV)
            .cloned()
            .ok_or_else(|| AssetError::MissingAttribute(UV.to_string()))?;
        self.set_attribute(UV2, uv)
    }

    /// Interleave the known attributes. Missing attributes read as zero.
    ///
    /// Tangents and bitangents, which normal maps need, are derived from
    /// `position` and `uv` per triangle and averaged over shared vertices.
    pub fn vertices(&self) -> Vec<ModelVertex> {
        let position = self.attributes.get(POSITION);
        let normal = self.attributes.get(NORMAL);
        let uv = self.attributes.get(UV);
        let uv2 = self.attributes.get(UV2);
        let mut vertices: Vec<ModelVertex> = (0..self.vertex_count())
            .map(|i| ModelVertex {
                position: position.map_or([0.0; 3], |a| a.item(i)),
                normal: normal.map_or([0.0; 3], |a| a.item(i)),
                uv: uv.map_or([0.0; 2], |a| a.item(i)),
                uv2: uv2.map_or([0.0; 2], |a| a.item(i)),
                tangent: [0.0; 3],
                bitangent: [0.0; 3],
            })
            .collect();
        if uv.is_some() {
            compute_tangents(&mut vertices, &self.indices);
        }
        vertices
    }
}

/// Solve `delta_pos = delta_uv.x * T + delta_uv.y * B` for every triangle and
/// average the results per vertex. Triangles with degenerate UVs are skipped.
fn compute_tangents(vertices: &mut [ModelVertex], indices: &[u32]) {
    let mut tangents = vec![Vector3::zero(); vertices.len()];
    let mut bitangents = vec![Vector3::zero(); vertices.len()];

    for c in indices.chunks_exact(3) {
        let [i0, i1, i2] = [c[0] as usize, c[1] as usize, c[2] as usize];
        if i0.max(i1).max(i2) >= vertices.len() {
            continue;
        }
        let (v0, v1, v2) = (vertices[i0], vertices[i1], vertices[i2]);

        let delta_pos1 = Vector3::from(v1.position) - Vector3::from(v0.position);
        let delta_pos2 = Vector3::from(v2.position) - Vector3::from(v0.position);
        let delta_uv1 = Vector2::from(v1.uv) - Vector2::from(v0.uv);
        let delta_uv2 = Vector2::from(v2.uv) - Vector2::from(v0.uv);

        let det = delta_uv1.x * delta_uv2.y - delta_uv1.y * delta_uv2.x;
        if det.abs() <= f32::EPSILON {
            continue;
        }
        let r = 1.0 / det;
        let tangent = (delta_pos1 * delta_uv2.y - delta_pos2 * delta_uv1.y) * r;
        // v grows downwards in wgpu, so flip to keep normal maps right-handed
        let bitangent = (delta_pos2 * delta_uv1.x - delta_pos1 * delta_uv2.x) * -r;

        for i in [i0, i1, i2] {
            tangents[i] += tangent;
            bitangents[i] += bitangent;
        }
    }

    for ((vertex, tangent), bitangent) in vertices.iter_mut().zip(tangents).zip(bitangents) {
        if tangent.magnitude2() > 0.0 {
            vertex.tangent = tangent.normalize().into();
        }
        if bitangent.magnitude2() > 0.0 {
            vertex.bitangent = bitangent.normalize().into();
        }
    }
}

#[derive(Default)]
struct Builder {
    positions: Vec<f32>,
    normals: Vec<f32>,
    uvs: Vec<f32>,
    indices: Vec<u32>,
}

impl Builder {
    fn vertex_count(&self) -> u32 {
        (self.positions.len() / 3) as u32
    }

    /// Emit the quad grid of one box side. `u`, `v` and `w` are the axis indices
    /// the grid spans and faces; `depth` carries the side's direction.
    #[allow(clippy::too_many_arguments)]
    fn plane(
        &mut self,
        (u, v, w): (usize, usize, usize),
        u_dir: f32,
        v_dir: f32,
        width: f32,
        height: f32,
        depth: f32,
        grid_x: u32,
        grid_y: u32,
    ) {
        let offset = self.vertex_count();
        let segment_width = width / grid_x as f32;
        let segment_height = height / grid_y as f32;

        for iy in 0..=grid_y {
            let y = iy as f32 * segment_height - height / 2.0;
            for ix in 0..=grid_x {
                let x = ix as f32 * segment_width - width / 2.0;

                let mut position = [0.0; 3];
                position[u] = x * u_dir;
                position[v] = y * v_dir;
                position[w] = depth / 2.0;
                self.positions.extend_from_slice(&position);

                let mut normal = [0.0; 3];
                normal[w] = if depth > 0.0 { 1.0 } else { -1.0 };
                self.normals.extend_from_slice(&normal);

                // wgpu samples row 0 at v = 0, so v grows downwards
                self.uvs.push(ix as f32 / grid_x as f32);
                self.uvs.push(iy as f32 / grid_y as f32);
            }
        }
        self.grid_indices(offset, grid_x, grid_y);
    }

    fn grid_indices(&mut self, offset: u32, grid_x: u32, grid_y: u32) {
        let row = grid_x + 1;
        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = offset + ix + row * iy;
                let b = offset + ix + row * (iy + 1);
                let c = offset + (ix + 1) + row * (iy + 1);
                let d = offset + (ix + 1) + row * iy;
                self.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
    }

    fn build(self) -> Result<Geometry, AssetError> {
        let mut geometry = Geometry::new(BufferAttribute::new(self.positions, 3), self.indices)?;
        geometry.set_attribute(NORMAL, BufferAttribute::new(self.normals, 3))?;
        geometry.set_attribute(UV, BufferAttribute::new(self.uvs, 2))?;
        Ok(geometry)
    }
}

/// An axis-aligned box centred on the origin. Each side is a grid of
/// `*_segments` quads; displacement maps need many of them to show detail.
pub fn box_geometry(
    width: f32,
    height: f32,
    depth: f32,
    width_segments: u32,
    height_segments: u32,
    depth_segments: u32,
) -> Result<Geometry, AssetError> {
    let (ws, hs, ds) = (
        width_segments.max(1),
        height_segments.max(1),
        depth_segments.max(1),
    );
    let (x, y, z) = (0, 1, 2);
    let mut builder = Builder::default();
    builder.plane((z, y, x), -1.0, -1.0, depth, height, width, ds, hs);
    builder.plane((z, y, x), 1.0, -1.0, depth, height, -width, ds, hs);
    builder.plane((x, z, y), 1.0, 1.0, width, depth, height, ws, ds);
    builder.plane((x, z, y), 1.0, -1.0, width, depth, -height, ws, ds);
    builder.plane((x, y, z), 1.0, -1.0, width, height, depth, ws, hs);
    builder.plane((x, y, z), -1.0, -1.0, width, height, -depth, ws, hs);
    builder.build()
}

/// A plane in the XY plane facing +Z, centred on the origin.
pub fn plane_geometry(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> Result<Geometry, AssetError> {
    let (grid_x, grid_y) = (width_segments.max(1), height_segments.max(1));
    let mut builder = Builder::default();
    for iy in 0..=grid_y {
        let y = iy as f32 * height / grid_y as f32 - height / 2.0;
        for ix in 0..=grid_x {
            let x = ix as f32 * width / grid_x as f32 - width / 2.0;
            builder.positions.extend_from_slice(&[x, -y, 0.0]);
            builder.normals.extend_from_slice(&[0.0, 0.0, 1.0]);
            builder.uvs.push(ix as f32 / grid_x as f32);
            builder.uvs.push(iy as f32 / grid_y as f32);
        }
    }
    builder.grid_indices(0, grid_x, grid_y);
    builder.build()
}
