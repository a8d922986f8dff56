#[cfg(feature = "integration-tests")]
use crate::common::test_utils::headless_device;

#[cfg(feature = "integration-tests")]
mod common;

#[tokio::test]
#[cfg(feature = "integration-tests")]
async fn should_share_pipelines_between_materials_in_the_same_state() {
    use flow_texturing::{
        data_structures::{
            material::{Material, MeshMaterial, MeshStandardMaterial, MeshToonMaterial},
            texture::GpuTexture,
        },
        pipelines::material::MaterialPipelines,
    };

    let (device, _queue) = headless_device().await;
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let mut pipelines = MaterialPipelines::new(
        &device,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        Some(GpuTexture::DEPTH_FORMAT),
    );

    let mut standard = Material::from(MeshStandardMaterial::new());
    let other = Material::from(MeshStandardMaterial::new().with_roughness(0.1));
    pipelines.get(&device, &standard);
    pipelines.get(&device, &other);
    assert_eq!(pipelines.len(), 1);

    standard.settings_mut().set_flat_shading(true);
    pipelines.get(&device, &standard);
    assert_eq!(pipelines.len(), 2);

    pipelines.get(&device, &Material::from(MeshToonMaterial::default()));
    assert_eq!(pipelines.len(), 3);

    let error = scope.pop().await;
    assert!(error.is_none(), "{error:?}");
}

#[tokio::test]
#[cfg(feature = "integration-tests")]
async fn should_render_every_material_kind_over_the_background() {
    use flow_texturing::{
        data_structures::{
            cube_texture::CubeTexture,
            geometry::{box_geometry, plane_geometry},
            material::{Material, MeshMatcapMaterial, MeshMaterial, MeshStandardMaterial, MeshToonMaterial, Side},
            scene::{Background, Scene},
            texture::{GpuTexture, Texture},
        },
        pipelines::{
            camera::{Camera, CameraBinding},
            material::{MaterialPipelines, draw_mesh},
            skybox::SkyboxPipeline,
        },
        resources::upload_mesh,
    };
    use image::RgbaImage;

    let (device, queue) = headless_device().await;
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let format = wgpu::TextureFormat::Rgba8UnormSrgb;
    let size = 32;

    let env = CubeTexture::from_faces("env", vec![RgbaImage::from_pixel(8, 8, image::Rgba([20, 40, 80, 255])); 6]).unwrap();
    let scene = Scene::new()
        .with_background(Background::Cube(env.clone()))
        .with_environment(env);
    let texture = |name: &str| Texture::solid(name, 8, 8, [200, 200, 200, 255]);

    let mut door = MeshStandardMaterial::new()
        .with_map(texture("color.jpg"))
        .with_alpha_map(texture("alpha.jpg"))
        .with_transparent(true)
        .with_ao_map(texture("ambientOcclusion.jpg"))
        .with_displacement_map(texture("height.jpg"), 0.1)
        .with_normal_map(texture("normal.jpg"))
        .with_metalness_map(texture("metalness.jpg"))
        .with_roughness_map(texture("roughness.jpg"));
    door.settings.set_side(Side::Double);
    let mut chrome = Material::from(MeshStandardMaterial::new().with_metalness(0.7).with_roughness(0.2));
    chrome.settings_mut().set_flat_shading(true);
    let materials = [
        Material::from(door),
        chrome,
        Material::from(MeshMatcapMaterial::new(texture("matcaps/1.png"))),
        Material::from(MeshToonMaterial::new(texture("gradients/3.jpg").nearest_filtering())),
    ];

    let mut plane = plane_geometry(1.0, 1.0, 16, 16).unwrap();
    plane.duplicate_uv_to_uv2().unwrap();
    let mut cube = box_geometry(0.5, 0.5, 0.5, 1, 1, 1).unwrap();
    cube.duplicate_uv_to_uv2().unwrap();

    let mut pipelines = MaterialPipelines::new(&device, format, Some(GpuTexture::DEPTH_FORMAT));
    let skybox = SkyboxPipeline::new(&device, format, Some(GpuTexture::DEPTH_FORMAT), pipelines.camera_layout());
    let camera = CameraBinding::new(&device, pipelines.camera_layout(), &Camera::new((0.0, 0.0, 2.0), (0.0, 0.0, 0.0), 1.0));
    let sky = skybox.bind_scene(&device, &queue, &scene).unwrap().unwrap();

    let mut meshes = Vec::new();
    for (i, material) in materials.iter().enumerate() {
        let geometry = if i == 0 { &plane } else { &cube };
        let uploaded = upload_mesh(&device, &queue, material.kind(), geometry, material, scene.env_map_for(material)).unwrap();
        pipelines.get(&device, material);
        meshes.push(uploaded);
    }
    assert_eq!(pipelines.len(), 4);

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("target"),
        size: wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());
    let depth = GpuTexture::create_depth_texture(&device, [size, size], "depth");

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &target_view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(scene.clear_colour()),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });
        for (material, (geometry, gpu_material)) in materials.iter().zip(&meshes) {
            let pipeline = pipelines.get(&device, material);
            draw_mesh(&mut pass, pipeline, &camera.bind_group, gpu_material, geometry);
        }
        skybox.draw(&mut pass, &sky, &camera.bind_group);
    }
    queue.submit([encoder.finish()]);

    let error = scope.pop().await;
    assert!(error.is_none(), "{error:?}");
}
