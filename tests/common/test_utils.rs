use std::{
    io::Cursor,
    sync::{Arc, Mutex},
};

use flow_texturing::{LoadingManager, resources::reader::MemoryReader};
use image::{ImageFormat, Rgba, RgbaImage};

/// Everything a [`LoadingManager`] reported, in call order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Start(String, usize, usize),
    Progress(String, usize, usize),
    Load,
    Error(String),
}

pub(crate) type Events = Arc<Mutex<Vec<Event>>>;

/// A manager whose callbacks append to the returned event list.
pub(crate) fn recording_manager() -> (LoadingManager, Events) {
    let events: Events = Arc::default();
    let (start, progress, load, error) = (
        Arc::clone(&events),
        Arc::clone(&events),
        Arc::clone(&events),
        Arc::clone(&events),
    );
    let manager = LoadingManager::new()
        .on_start(move |url, loaded, total| {
            start.lock().unwrap().push(Event::Start(url.to_string(), loaded, total))
        })
        .on_progress(move |url, loaded, total| {
            progress
                .lock()
                .unwrap()
                .push(Event::Progress(url.to_string(), loaded, total))
        })
        .on_load(move || load.lock().unwrap().push(Event::Load))
        .on_error(move |url| error.lock().unwrap().push(Event::Error(url.to_string())));
    (manager, events)
}

pub(crate) fn take(events: &Events) -> Vec<Event> {
    std::mem::take(&mut *events.lock().unwrap())
}

pub(crate) fn count(events: &Events, predicate: impl Fn(&Event) -> bool) -> usize {
    events.lock().unwrap().iter().filter(|e| predicate(e)).count()
}

pub(crate) fn encode(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("failed to encode test image");
    bytes
}

pub(crate) fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    encode(&RgbaImage::from_pixel(width, height, Rgba(rgba)), ImageFormat::Png)
}

/// Six distinct single-colour faces named `px.png` ... `nz.png` under `dir`.
pub(crate) fn cube_reader(dir: &str, size: u32) -> MemoryReader {
    let colours = [
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [255, 255, 0, 255],
        [0, 255, 255, 255],
        [255, 0, 255, 255],
    ];
    ["px", "nx", "py", "ny", "pz", "nz"]
        .iter()
        .zip(colours)
        .fold(MemoryReader::new(), |reader, (stem, colour)| {
            reader.with(format!("{dir}/{stem}.png"), png(size, size, colour))
        })
}

#[cfg(feature = "integration-tests")]
pub(crate) async fn headless_device() -> (wgpu::Device, wgpu::Queue) {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..wgpu::InstanceDescriptor::new_without_display_handle()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .expect("no graphics adapter available");
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
            ..Default::default()
        })
        .await
        .expect("failed to create device")
}
