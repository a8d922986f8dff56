//! Draws `Background::Cube` behind everything else.

use crate::{
    data_structures::{scene::Scene, texture::GpuTexture},
    pipelines::mk_render_pipeline,
};

fn sky_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::Cube,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("skybox_bind_group_layout"),
    })
}

#[derive(Debug)]
pub struct SkyboxPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub layout: wgpu::BindGroupLayout,
}

impl SkyboxPipeline {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let layout = sky_layout(device);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("skybox pipeline layout"),
            bind_group_layouts: &[Some(&layout), Some(camera_layout)],
            immediate_size: 0,
        });
        let shader = wgpu::ShaderModuleDescriptor {
            label: Some("skybox"),
            source: wgpu::ShaderSource::Wgsl(include_str!("skybox.wgsl").into()),
        };
        let pipeline = mk_render_pipeline(
            device,
            "skybox pipeline",
            &pipeline_layout,
            wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            },
            wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            // drawn at the far plane after opaque meshes, never written
            depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: Some(false),
                depth_compare: Some(wgpu::CompareFunction::LessEqual),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            &[],
            shader,
            &[],
        );
        Self { pipeline, layout }
    }

    /// Bind group for an uploaded cube texture (see `GpuTexture::from_cube`).
    pub fn bind(&self, device: &wgpu::Device, cube: &GpuTexture) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&cube.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&cube.sampler),
                },
            ],
            label: Some("skybox_bind_group"),
        })
    }

    /// Upload the scene's background cube, if it has one, and bind it.
    pub fn bind_scene(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &Scene,
    ) -> anyhow::Result<Option<wgpu::BindGroup>> {
        let Some(cube) = scene.background_cube() else {
            return Ok(None);
        };
        let gpu_cube = GpuTexture::from_cube(device, queue, cube)?;
        Ok(Some(self.bind(device, &gpu_cube)))
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, sky: &wgpu::BindGroup, camera: &wgpu::BindGroup) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, sky, &[]);
        pass.set_bind_group(1, camera, &[]);
        pass.draw(0..3, 0..1);
    }
}
