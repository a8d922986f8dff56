//! One pipeline per distinct material state, shared by every material in it.
//!
//! Face culling, blending and flat shading are baked into a pipeline, so a
//! change to any of them (which bumps `MaterialSettings::version`) selects
//! another one. Scalars and textures live in the material's bind group and
//! never need a new pipeline.

use std::{borrow::Cow, collections::HashMap};

use crate::{
    data_structures::{
        geometry::ModelVertex,
        material::{Material, MeshMaterial},
    },
    pipelines::{camera::camera_bind_group_layout, mk_render_pipeline},
    resources::{
        material::{GpuMaterial, bind_group_layout, color_target, primitive_state},
        mesh::GpuGeometry,
    },
};

const COMMON_SHADER: &str = include_str!("common.wgsl");

fn kind_shader(material: &Material) -> &'static str {
    match material {
        Material::Standard(_) => include_str!("standard.wgsl"),
        Material::Matcap(_) => include_str!("matcap.wgsl"),
        Material::Toon(_) => include_str!("toon.wgsl"),
    }
}

/// Full WGSL source of the shader drawing `material`.
pub fn shader_source(material: &Material) -> String {
    format!("{COMMON_SHADER}\n{}", kind_shader(material))
}

/// Everything that distinguishes one material pipeline from another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub kind: &'static str,
    pub env_map: bool,
    pub cull_mode: Option<wgpu::Face>,
    pub blend: wgpu::BlendState,
    pub flat_shading: bool,
}

impl PipelineKey {
    pub fn of(material: &Material) -> Self {
        let settings = material.settings();
        Self {
            kind: material.kind(),
            env_map: matches!(material, Material::Standard(_)),
            cull_mode: settings.cull_mode(),
            blend: settings.blend_state(),
            flat_shading: settings.flat_shading(),
        }
    }
}

/// Pipelines for every material state drawn so far.
#[derive(Debug)]
pub struct MaterialPipelines {
    color_format: wgpu::TextureFormat,
    depth_format: Option<wgpu::TextureFormat>,
    camera_layout: wgpu::BindGroupLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl MaterialPipelines {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Self {
        Self {
            color_format,
            depth_format,
            camera_layout: camera_bind_group_layout(device),
            pipelines: HashMap::new(),
        }
    }

    /// Layout a [`CameraBinding`](super::camera::CameraBinding) must be created with.
    pub fn camera_layout(&self) -> &wgpu::BindGroupLayout {
        &self.camera_layout
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// The pipeline for `material`'s current state, built on first use.
    ///
    /// Call again whenever `settings().version()` changed since the last draw.
    pub fn get(&mut self, device: &wgpu::Device, material: &Material) -> &wgpu::RenderPipeline {
        let Self {
            color_format,
            depth_format,
            camera_layout,
            pipelines,
        } = self;
        let key = PipelineKey::of(material);
        pipelines.entry(key).or_insert_with(|| {
            log::debug!("building {} material pipeline for {key:?}", key.kind);
            mk_material_pipeline(device, material, *color_format, *depth_format, camera_layout)
        })
    }
}

fn mk_material_pipeline(
    device: &wgpu::Device,
    material: &Material,
    color_format: wgpu::TextureFormat,
    depth_format: Option<wgpu::TextureFormat>,
    camera_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let label = format!("{} material", material.kind());
    let material_layout = bind_group_layout(device, material);
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} pipeline layout")),
        bind_group_layouts: &[Some(&material_layout), Some(camera_layout)],
        immediate_size: 0,
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(Cow::Owned(shader_source(material))),
    };
    let flat_shading = if material.settings().flat_shading() { 1.0 } else { 0.0 };

    mk_render_pipeline(
        device,
        &format!("{label} pipeline"),
        &layout,
        color_target(material, color_format),
        primitive_state(material),
        depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: Some(true),
            depth_compare: Some(wgpu::CompareFunction::Less),
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        &[ModelVertex::desc()],
        shader,
        &[("FLAT_SHADING", flat_shading)],
    )
}

/// Record one indexed draw of `geometry` with `material`.
pub fn draw_mesh(
    pass: &mut wgpu::RenderPass<'_>,
    pipeline: &wgpu::RenderPipeline,
    camera: &wgpu::BindGroup,
    material: &GpuMaterial,
    geometry: &GpuGeometry,
) {
    pass.set_pipeline(pipeline);
    pass.set_bind_group(0, &material.bind_group, &[]);
    pass.set_bind_group(1, camera, &[]);
    pass.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));
    pass.set_index_buffer(geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    pass.draw_indexed(0..geometry.num_elements, 0, 0..1);
}
