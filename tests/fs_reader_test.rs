use std::{path::PathBuf, sync::Arc};

use flow_texturing::{
    AssetConfig, AssetError,
    resources::{
        reader::{AssetReader, FsReader},
        texture_loader::TextureLoader,
    },
};
use image::Rgba;

use crate::common::test_utils::{Event, png, recording_manager, take};

mod common;

/// A fresh asset directory holding `textures/door/color.png`.
async fn asset_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flow-texturing-{name}-{}", std::process::id()));
    let door = dir.join("textures").join("door");
    tokio::fs::create_dir_all(&door).await.unwrap();
    tokio::fs::write(door.join("color.png"), png(2, 2, [40, 80, 120, 255]))
        .await
        .unwrap();
    dir
}

#[tokio::test]
async fn should_read_files_below_the_asset_root() {
    let dir = asset_dir("read").await;
    let reader = FsReader::from_config(&AssetConfig::new(&dir));

    let bytes = reader.read("/textures/door/color.png").await.unwrap();
    assert_eq!(bytes, png(2, 2, [40, 80, 120, 255]));
    assert_eq!(reader.read("textures/door/color.png").await.unwrap(), bytes);

    let err = reader.read("textures/door/missing.png").await.unwrap_err();
    assert!(matches!(err, AssetError::Io { ref url, .. } if url == "textures/door/missing.png"), "{err}");
    assert_eq!(err.url(), Some("textures/door/missing.png"));

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn should_load_textures_from_disk() {
    let dir = asset_dir("load").await;
    let (manager, events) = recording_manager();
    let loader = TextureLoader::new(Arc::new(manager), Arc::new(FsReader::new(&dir))).with_path("textures");

    let texture = loader.load("door/color.png").await.unwrap();
    assert_eq!(texture.dimensions(), (2, 2));
    assert_eq!(texture.image().get_pixel(1, 1), &Rgba([40, 80, 120, 255]));

    let err = loader.load("door/alpha.png").await.unwrap_err();
    assert!(matches!(err, AssetError::Io { .. }), "{err}");
    let events = take(&events);
    assert!(events.contains(&Event::Error("textures/door/alpha.png".into())), "{events:?}");

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}
