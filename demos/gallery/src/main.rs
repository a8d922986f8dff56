//! Loads the door, matcap, gradient and environment textures from the asset
//! directory, builds one mesh per material setup and prints what each would
//! render with. Set `FLOW_ASSET_ROOT` to point at another asset directory.

use std::sync::Arc;

use flow_texturing::{
    AssetConfig, LoadingManager,
    data_structures::{
        geometry::{Geometry, box_geometry, plane_geometry},
        material::{Material, MeshMatcapMaterial, MeshMaterial, MeshStandardMaterial, MeshToonMaterial, Side},
        scene::{Background, Scene},
        texture::Texture,
    },
    resources::{cube_texture_loader::CubeTextureLoader, reader::FsReader, texture_loader::TextureLoader},
};

fn or_placeholder(name: &str, result: Result<Texture, flow_texturing::AssetError>) -> Texture {
    result.unwrap_or_else(|e| {
        log::warn!("using a placeholder for {name}: {e}");
        Texture::solid(name, 1, 1, [255, 0, 255, 255])
    })
}

fn describe(name: &str, geometry: &Geometry, material: &Material, scene: &Scene) {
    let bound: Vec<_> = material
        .slots()
        .into_iter()
        .filter_map(|(slot, texture)| texture.map(|t| format!("{}={}", slot.name(), t.name)))
        .collect();
    let env = scene.env_map_for(material).map(|cube| cube.name.as_str());
    println!(
        "{name}: {} material, {} vertices, slots [{}], env {:?}",
        material.kind(),
        geometry.vertex_count(),
        bound.join(", "),
        env
    );
    if let Err(e) = material.validate_geometry(geometry) {
        println!("  invalid: {e}");
    }
    for warning in material.lint(Some(geometry)) {
        println!("  warning: {warning}");
    }
}

#[tokio::main]
async fn main() {
    flow_texturing::init_logging();

    let config = AssetConfig::from_env();
    let reader = Arc::new(FsReader::from_config(&config));
    let manager = Arc::new(
        LoadingManager::logging()
            .on_progress(|url, loaded, total| println!("[{loaded}/{total}] {url}"))
            .on_error(|url| println!("failed: {url}")),
    );
    let textures = TextureLoader::new(Arc::clone(&manager), reader.clone()).with_path("textures");
    let cubes = CubeTextureLoader::new(Arc::clone(&manager), reader);

    let environment = cubes.load_dir("textures/environmentMaps/0", "jpg");
    let door = textures
        .load_all(&[
            "door/color.jpg",
            "door/alpha.jpg",
            "door/ambientOcclusion.jpg",
            "door/height.jpg",
            "door/normal.jpg",
            "door/metalness.jpg",
            "door/roughness.jpg",
            "matcaps/1.png",
            "gradients/3.jpg",
        ])
        .await;
    let environment = environment.await;

    let names = [
        "color", "alpha", "ao", "height", "normal", "metalness", "roughness", "matcap", "gradient",
    ];
    let [color, alpha, ao, height, normal, metalness, roughness, matcap, gradient] = {
        let mut loaded = names.iter().zip(door).map(|(name, result)| or_placeholder(name, result));
        std::array::from_fn(|_| loaded.next().unwrap_or_else(|| Texture::solid("missing", 1, 1, [0; 4])))
    };
    let progress = manager.progress();
    println!(
        "loaded {} of {} files, {} failed",
        progress.loaded, progress.total, progress.failed
    );

    let mut scene = Scene::new().with_background(Background::Color([0.1, 0.1, 0.1]));
    match environment {
        Ok(cube) => {
            scene = scene
                .with_background(Background::Cube(cube.clone()))
                .with_environment(cube);
        }
        Err(e) => log::warn!("no environment map: {e}"),
    }

    let mut plane = match plane_geometry(1.0, 1.0, 100, 100) {
        Ok(plane) => plane,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    if let Err(e) = plane.duplicate_uv_to_uv2() {
        log::error!("{e}");
        return;
    }

    let mut door_material = MeshStandardMaterial::new()
        .with_map(color)
        .with_alpha_map(alpha)
        .with_transparent(true)
        .with_ao_map(ao)
        .with_displacement_map(height, 0.05)
        .with_normal_map(normal)
        .with_metalness_map(metalness)
        .with_roughness_map(roughness);
    door_material.ao_map_intensity = 1.5;
    door_material.set_normal_scale(0.5, 0.5);
    door_material.settings.set_side(Side::Double);
    describe("door", &plane, &door_material.into(), &scene);

    let mut chrome = MeshStandardMaterial::new().with_metalness(0.7).with_roughness(0.2);
    chrome.settings.set_flat_shading(true);
    chrome.settings.set_opacity(0.5);
    let cube = match box_geometry(1.0, 1.0, 1.0, 1, 1, 1) {
        Ok(cube) => cube,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    describe("chrome", &cube, &chrome.into(), &scene);

    describe("matcap", &cube, &MeshMatcapMaterial::new(matcap).into(), &scene);

    describe("toon (smooth)", &cube, &MeshToonMaterial::new(gradient.clone()).into(), &scene);
    describe(
        "toon",
        &cube,
        &MeshToonMaterial::new(gradient.nearest_filtering()).into(),
        &scene,
    );
}
