use std::sync::{Arc, Mutex, OnceLock, Weak};

use flow_texturing::{LoadProgress, LoadingManager};

use crate::common::test_utils::{Event, recording_manager, take};

mod common;

#[test]
fn should_report_one_batch_across_items() {
    let (manager, events) = recording_manager();

    manager.item_start("a.png");
    manager.item_start("b.png");
    manager.item_end("a.png");
    manager.item_end("b.png");

    assert_eq!(
        take(&events),
        vec![
            Event::Start("a.png".into(), 0, 1),
            Event::Progress("a.png".into(), 1, 2),
            Event::Progress("b.png".into(), 2, 2),
            Event::Load,
        ]
    );
    assert!(!manager.is_loading());
}

#[test]
fn should_still_complete_after_a_failed_item() {
    let (manager, events) = recording_manager();

    manager.item_start("missing.png");
    manager.item_error("missing.png");
    manager.item_end("missing.png");

    assert_eq!(
        take(&events),
        vec![
            Event::Start("missing.png".into(), 0, 1),
            Event::Error("missing.png".into()),
            Event::Progress("missing.png".into(), 1, 1),
            Event::Load,
        ]
    );
    assert_eq!(manager.progress().failed, 1);
}

#[test]
fn should_keep_counting_into_a_second_batch() {
    let (manager, events) = recording_manager();

    manager.item_start("first.png");
    manager.item_end("first.png");
    take(&events);

    manager.item_start("second.png");
    manager.item_end("second.png");

    assert_eq!(
        take(&events),
        vec![
            Event::Start("second.png".into(), 1, 2),
            Event::Progress("second.png".into(), 2, 2),
            Event::Load,
        ]
    );
}

#[test]
fn should_expose_progress_snapshot() {
    let manager = LoadingManager::new();
    assert_eq!(manager.progress(), LoadProgress::default());
    assert_eq!(manager.progress().fraction(), 1.0);

    for url in ["a", "b", "c", "d"] {
        manager.item_start(url);
    }
    manager.item_end("a");

    let progress = manager.progress();
    assert!(progress.is_loading);
    assert_eq!((progress.loaded, progress.total), (1, 4));
    assert_eq!(progress.fraction(), 0.25);
}

#[test]
fn should_apply_url_modifier() {
    let manager = LoadingManager::new().with_url_modifier(|url| format!("https://cdn.example/{url}"));
    assert_eq!(manager.resolve_url("door/color.jpg"), "https://cdn.example/door/color.jpg");
    assert_eq!(LoadingManager::new().resolve_url("door/color.jpg"), "door/color.jpg");
}

#[test]
fn should_aggregate_items_from_many_threads() {
    let (manager, events) = recording_manager();
    let manager = Arc::new(manager);
    for i in 0..16 {
        manager.item_start(&format!("{i}.png"));
    }

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let manager = Arc::clone(&manager);
            std::thread::spawn(move || manager.item_end(&format!("{i}.png")))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let events = take(&events);
    assert_eq!(events.iter().filter(|e| **e == Event::Load).count(), 1);
    assert_eq!(events.last(), Some(&Event::Load));
    let loaded: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            Event::Progress(_, loaded, total) => {
                assert_eq!(*total, 16);
                Some(*loaded)
            }
            _ => None,
        })
        .collect();
    assert_eq!(loaded, (1..=16).collect::<Vec<_>>());
    assert_eq!(manager.progress().loaded, 16);
}

#[test]
fn should_deliver_callbacks_in_counter_order_under_contention() {
    for _ in 0..20 {
        let (manager, events) = recording_manager();
        let manager = Arc::new(manager);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let manager = Arc::clone(&manager);
                std::thread::spawn(move || {
                    let url = format!("{i}.png");
                    manager.item_start(&url);
                    manager.item_end(&url);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let events = take(&events);
        assert_eq!(events.last(), Some(&Event::Load));
        let mut previous = 0;
        for event in &events {
            if let Event::Progress(_, loaded, _) = event {
                assert!(*loaded > previous, "{events:?}");
                previous = *loaded;
            }
        }
        assert_eq!(previous, 8);
    }
}

#[test]
fn should_allow_callbacks_to_register_more_items() {
    let log: Arc<Mutex<Vec<String>>> = Arc::default();
    let this: Arc<OnceLock<Weak<LoadingManager>>> = Arc::default();
    let (on_progress_log, on_load_log, this_in_callback) = (Arc::clone(&log), Arc::clone(&log), Arc::clone(&this));

    let manager = Arc::new(
        LoadingManager::new()
            .on_progress(move |url, loaded, total| {
                on_progress_log.lock().unwrap().push(format!("{url} {loaded}/{total}"));
                if url == "first.png" {
                    let manager = this_in_callback.get().and_then(Weak::upgrade).unwrap();
                    manager.item_start("second.png");
                    manager.item_end("second.png");
                }
            })
            .on_load(move || on_load_log.lock().unwrap().push("load".to_string())),
    );
    this.set(Arc::downgrade(&manager)).unwrap();

    manager.item_start("first.png");
    manager.item_end("first.png");

    assert_eq!(
        *log.lock().unwrap(),
        vec!["first.png 1/1", "load", "second.png 2/2", "load"]
    );
    assert!(!manager.is_loading());
}
