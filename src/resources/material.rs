//! Bind groups for materials.
//!
//! Layout of every material bind group:
//!
//! - binding 0 is the [`MaterialUniform`] buffer
//! - bindings `1 + 2i` / `2 + 2i` are texture and sampler of the i-th slot
//!   returned by [`MeshMaterial::slots`]
//! - standard materials add a cube texture and sampler for the environment map
//!
//! Empty slots bind 1x1 fallbacks so one shader serves every combination.

use wgpu::util::DeviceExt;

use crate::data_structures::{
    cube_texture::CubeTexture,
    material::{Material, MaterialSignature, MaterialUniform, MeshMaterial, TextureSlot},
    texture::{GpuTexture, TextureId},
};

fn texture_entry(binding: u32, view_dimension: wgpu::TextureViewDimension) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

/// Layout entries for a material with `slot_count` 2D slots and, if
/// `env_map` is set, a trailing cube map.
pub fn layout_entries(slot_count: usize, env_map: bool) -> Vec<wgpu::BindGroupLayoutEntry> {
    let mut entries = vec![wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }];
    let mut binding = 1;
    for _ in 0..slot_count {
        entries.push(texture_entry(binding, wgpu::TextureViewDimension::D2));
        entries.push(sampler_entry(binding + 1));
        binding += 2;
    }
    if env_map {
        entries.push(texture_entry(binding, wgpu::TextureViewDimension::Cube));
        entries.push(sampler_entry(binding + 1));
    }
    entries
}

/// Bind group layout matching the slots of `material`.
pub fn bind_group_layout(device: &wgpu::Device, material: &Material) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &layout_entries(material.slots().len(), matches!(material, Material::Standard(_))),
        label: Some(&format!("{} material bind_group_layout", material.kind())),
    })
}

/// A material's uniform buffer, textures and bind group on the GPU.
#[derive(Debug)]
pub struct GpuMaterial {
    pub uniform_buffer: wgpu::Buffer,
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    pub textures: Vec<(TextureSlot, GpuTexture)>,
    signature: MaterialSignature,
    env_map: Option<(TextureId, u32)>,
}

impl GpuMaterial {
    /// Upload every slot of `material`.
    ///
    /// * `env_map` is the scene environment. Standard materials sample their
    ///   own map when they have one and fall back to it otherwise; other kinds
    ///   ignore it
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        material: &Material,
        env_map: Option<&CubeTexture>,
    ) -> anyhow::Result<Self> {
        let label = format!("{} material", material.kind());

        let mut textures = Vec::new();
        for (slot, texture) in material.slots() {
            let gpu_texture = match texture {
                Some(texture) => GpuTexture::from_texture(device, queue, texture, slot.color_space())?,
                None => GpuTexture::solid(device, queue, slot.name(), slot.fallback_pixel(), slot.color_space())?,
            };
            textures.push((slot, gpu_texture));
        }

        let env_map = match material {
            Material::Standard(_) => Some(resolve_env_map(material, env_map)),
            _ => None,
        };
        if let Some(env_map) = env_map {
            let gpu_cube = match env_map {
                Some(cube) => GpuTexture::from_cube(device, queue, cube)?,
                None => GpuTexture::solid_cube(
                    device,
                    queue,
                    TextureSlot::EnvMap.name(),
                    TextureSlot::EnvMap.fallback_pixel(),
                )?,
            };
            textures.push((TextureSlot::EnvMap, gpu_cube));
        }

        let layout = bind_group_layout(device, material);

        let uniform = with_env_bit(material.uniform(), env_map.flatten().is_some());
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} uniform buffer")),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let mut entries = vec![wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }];
        for (i, (_, texture)) in textures.iter().enumerate() {
            let binding = 1 + 2 * i as u32;
            entries.push(wgpu::BindGroupEntry {
                binding,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            });
            entries.push(wgpu::BindGroupEntry {
                binding: binding + 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            });
        }
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &entries,
            label: Some(&format!("{label} bind_group")),
        });
        log::debug!("{label}: bound {} textures", textures.len());

        Ok(Self {
            uniform_buffer,
            layout,
            bind_group,
            textures,
            signature: material.signature(),
            env_map: env_map.flatten().map(|cube| (cube.id(), cube.version())),
        })
    }

    /// Push scalar changes (colour, opacity, metalness, ...) without rebuilding.
    pub fn write_uniform(&self, queue: &wgpu::Queue, material: &Material) {
        let uniform = with_env_bit(material.uniform(), self.env_map.is_some());
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// True when textures, sampler settings or pipeline state changed since
    /// this was built; the material then needs a new `GpuMaterial`.
    pub fn is_stale(&self, material: &Material, env_map: Option<&CubeTexture>) -> bool {
        let env_map = resolve_env_map(material, env_map).map(|cube| (cube.id(), cube.version()));
        self.signature != material.signature() || self.env_map != env_map
    }
}

/// Pipeline state a material needs from its render pipeline.
pub fn primitive_state(material: &Material) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: material.settings().cull_mode(),
        ..Default::default()
    }
}

/// Colour target for a material drawing into `format`.
pub fn color_target(material: &Material, format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
    wgpu::ColorTargetState {
        format,
        blend: Some(material.settings().blend_state()),
        write_mask: wgpu::ColorWrites::ALL,
    }
}

/// Uniform contents as uploaded. The environment bit is set when the material
/// samples a cube, its own or the scene's `env_map`.
pub fn uniform_with_env(material: &Material, env_map: Option<&CubeTexture>) -> MaterialUniform {
    with_env_bit(material.uniform(), resolve_env_map(material, env_map).is_some())
}

/// The cube a material samples: a standard material's own map wins over the
/// scene environment, the same precedence as `Scene::env_map_for`.
pub fn resolve_env_map<'a>(material: &'a Material, env_map: Option<&'a CubeTexture>) -> Option<&'a CubeTexture> {
    match material {
        Material::Standard(_) => material.env_map().or(env_map),
        _ => None,
    }
}

fn with_env_bit(mut uniform: MaterialUniform, bound: bool) -> MaterialUniform {
    if bound {
        uniform.slots |= TextureSlot::EnvMap.bit();
    } else {
        uniform.slots &= !TextureSlot::EnvMap.bit();
    }
    uniform
}
