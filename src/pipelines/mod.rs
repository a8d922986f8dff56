//! Render pipelines for materials and the scene background.
//!
//! Bind group 0 holds the material (or the background cube), bind group 1
//! the camera. Meshes are drawn with [`material::MaterialPipelines`], then
//! [`skybox::SkyboxPipeline`] fills every pixel no mesh covered.

pub mod camera;
pub mod material;
pub mod skybox;

#[allow(clippy::too_many_arguments)]
pub fn mk_render_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    color_target: wgpu::ColorTargetState,
    primitive: wgpu::PrimitiveState,
    depth_stencil: Option<wgpu::DepthStencilState>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    shader: wgpu::ShaderModuleDescriptor,
    constants: &[(&str, f64)],
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(shader);
    let compilation_options = wgpu::PipelineCompilationOptions {
        constants,
        ..Default::default()
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: vertex_layouts,
            compilation_options: compilation_options.clone(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(color_target)],
            compilation_options,
        }),
        primitive,
        depth_stencil,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}
