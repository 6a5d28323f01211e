use std::{fs, thread::sleep, time::Duration};

use ink_overlay::draw::{BoxHost, InkOverlay, OverlaySettings};
use serial_test::serial;
use tempfile::tempdir;

#[test]
#[serial]
fn overlay_events_reach_the_log_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.txt");

    ink_overlay::logging::init(true, Some(path.clone())).unwrap();
    tracing::info!("test");

    let mut host = BoxHost::new(32, 24);
    let mut overlay = InkOverlay::mount(&mut host, &OverlaySettings::default());
    overlay.toggle_active();
    host.resize_container(48, 24);
    assert!(overlay.synchronize_dimensions(&host));
    overlay.unmount(&mut host);

    sleep(Duration::from_millis(100));

    assert!(path.exists(), "log file was not created");
    let contents = fs::read_to_string(path).unwrap();
    assert!(contents.contains("test"));
    assert!(contents.contains("ink overlay mounted"));
    assert!(contents.contains("ink overlay toggled"));
    assert!(contents.contains("source=Manual"));
    assert!(!contents.contains("source=Container"));
}

#[test]
#[serial]
fn log_path_without_file_name_is_rejected() {
    assert!(ink_overlay::logging::init(false, Some("/".into())).is_err());
}
