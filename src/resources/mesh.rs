use wgpu::util::DeviceExt;

use crate::data_structures::geometry::Geometry;

/// Vertex and index buffers of an uploaded [`Geometry`].
#[derive(Debug)]
pub struct GpuGeometry {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl GpuGeometry {
    /**
     * Interleaves position, normal, uv, uv2 and the derived tangent frame into
     * one vertex buffer; see `ModelVertex::desc` for the layout the pipeline
     * has to declare.
     */
    pub fn new(device: &wgpu::Device, name: &str, geometry: &Geometry) -> Self {
        let vertices = geometry.vertices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: geometry.indices.len() as u32,
        }
    }
}
