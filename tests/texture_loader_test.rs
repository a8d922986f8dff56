use std::{io::Cursor, sync::Arc};

use flow_texturing::{
    AssetError,
    resources::{reader::MemoryReader, texture_loader::TextureLoader},
};
use image::{ImageFormat, Rgb, RgbImage, Rgba};

use crate::common::test_utils::{Event, count, png, recording_manager, take};

mod common;

#[tokio::test]
async fn should_load_texture_and_report_progress() {
    let (manager, events) = recording_manager();
    let reader = MemoryReader::new().with("door/color.png", png(4, 2, [10, 20, 30, 255]));
    let loader = TextureLoader::new(Arc::new(manager), Arc::new(reader));

    let texture = loader.load("door/color.png").await.unwrap();

    assert_eq!(texture.name, "door/color.png");
    assert_eq!(texture.dimensions(), (4, 2));
    assert_eq!(texture.image().get_pixel(3, 1), &Rgba([10, 20, 30, 255]));
    assert_eq!(
        take(&events),
        vec![
            Event::Start("door/color.png".into(), 0, 1),
            Event::Progress("door/color.png".into(), 1, 1),
            Event::Load,
        ]
    );
}

#[tokio::test]
async fn should_decode_jpeg_by_extension() {
    let image = RgbImage::from_pixel(8, 8, Rgb([200, 200, 200]));
    let mut jpeg = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .unwrap();
    let reader = MemoryReader::new().with("texture.jpg", jpeg);
    let (manager, _) = recording_manager();
    let loader = TextureLoader::new(Arc::new(manager), Arc::new(reader));

    let texture = loader.load("texture.jpg").await.unwrap();

    assert_eq!(texture.dimensions(), (8, 8));
    assert_eq!(texture.image().get_pixel(0, 0)[3], 255);
}

#[tokio::test]
async fn should_report_missing_file_as_error_and_finish_batch() {
    let (manager, events) = recording_manager();
    let loader = TextureLoader::new(Arc::new(manager), Arc::new(MemoryReader::new()));

    let err = loader.load("alpha.jpg").await.unwrap_err();

    assert!(matches!(err, AssetError::Io { .. }), "{err}");
    assert_eq!(err.url(), Some("alpha.jpg"));
    assert_eq!(
        take(&events),
        vec![
            Event::Start("alpha.jpg".into(), 0, 1),
            Event::Error("alpha.jpg".into()),
            Event::Progress("alpha.jpg".into(), 1, 1),
            Event::Load,
        ]
    );
}

#[tokio::test]
async fn should_report_undecodable_file() {
    let (manager, events) = recording_manager();
    let reader = MemoryReader::new().with("normal.png", b"definitely not a png".to_vec());
    let loader = TextureLoader::new(Arc::new(manager), Arc::new(reader));

    let err = loader.load("normal.png").await.unwrap_err();

    assert!(matches!(err, AssetError::Decode { .. }), "{err}");
    assert_eq!(count(&events, |e| matches!(e, Event::Error(_))), 1);
    assert_eq!(count(&events, |e| *e == Event::Load), 1);
}

#[tokio::test]
async fn should_fan_in_concurrent_loads_into_one_batch() {
    let (manager, events) = recording_manager();
    let reader = MemoryReader::new()
        .with("color.png", png(2, 2, [255, 0, 0, 255]))
        .with("height.png", png(2, 2, [0, 0, 0, 255]))
        .with("ao.png", png(2, 2, [255, 255, 255, 255]));
    let manager = Arc::new(manager);
    let loader = TextureLoader::new(Arc::clone(&manager), Arc::new(reader));

    let results = loader
        .load_all(&["color.png", "height.png", "missing.png", "ao.png"])
        .await;

    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(results[2].is_err());
    assert!(results[3].is_ok());
    assert_eq!(results[3].as_ref().unwrap().name, "ao.png");

    let events = take(&events);
    assert_eq!(events.first(), Some(&Event::Start("color.png".into(), 0, 1)));
    assert_eq!(events.iter().filter(|e| matches!(e, Event::Start(..))).count(), 1);
    assert_eq!(events.iter().filter(|e| **e == Event::Load).count(), 1);
    assert_eq!(events.last(), Some(&Event::Load));

    let progress = manager.progress();
    assert_eq!((progress.loaded, progress.total, progress.failed), (4, 4, 1));
}

#[tokio::test]
async fn should_register_load_before_it_is_awaited() {
    let (manager, _) = recording_manager();
    let manager = Arc::new(manager);
    let reader = MemoryReader::new().with("color.png", png(1, 1, [0; 4]));
    let loader = TextureLoader::new(Arc::clone(&manager), Arc::new(reader));

    let first = loader.load("color.png");
    let second = loader.load("color.png");
    assert_eq!(manager.progress().total, 2);
    assert!(manager.is_loading());

    first.await.unwrap();
    assert!(manager.is_loading());
    second.await.unwrap();
    assert!(!manager.is_loading());
}

#[tokio::test]
async fn should_count_dropped_load_as_failed() {
    let (manager, events) = recording_manager();
    let manager = Arc::new(manager);
    let loader = TextureLoader::new(Arc::clone(&manager), Arc::new(MemoryReader::new()));

    drop(loader.load("never-awaited.png"));

    assert!(!manager.is_loading());
    assert_eq!(manager.progress().failed, 1);
    assert_eq!(count(&events, |e| *e == Event::Load), 1);
}

#[tokio::test]
async fn should_prefix_path_and_apply_url_modifier() {
    let (manager, events) = recording_manager();
    let manager = manager.with_url_modifier(|url| url.replace("low", "high"));
    let reader = MemoryReader::new().with("textures/high/matcap.png", png(1, 1, [9, 9, 9, 255]));
    let loader = TextureLoader::new(Arc::new(manager), Arc::new(reader)).with_path("textures/");

    let texture = loader.load("low/matcap.png").await.unwrap();

    assert_eq!(texture.name, "textures/high/matcap.png");
    assert_eq!(
        take(&events)[0],
        Event::Start("textures/high/matcap.png".into(), 0, 1)
    );
}
