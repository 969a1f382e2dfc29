use std::fs;
use std::path::PathBuf;

use iconforge::codec::png;
use iconforge::pipeline;
use iconforge::resize::{BoxFilterResizer, ResizeProvider};
use iconforge::{Error, IconConfig, Result};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("iconforge-test-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn generate_writes_all_three_artifacts() {
    let out_dir = scratch_dir("full");
    let config = IconConfig {
        size: 32,
        ..Default::default()
    };

    let artifacts = pipeline::generate(&config, &BoxFilterResizer, &out_dir).unwrap();

    let master = fs::read(&artifacts.master_png).unwrap();
    let image = png::decode(&master).unwrap();
    assert_eq!((image.width, image.height), (32, 32));

    let icns = fs::read(&artifacts.icns).unwrap();
    assert_eq!(&icns[0..4], b"icns");
    assert_eq!(
        u32::from_be_bytes(icns[4..8].try_into().unwrap()) as usize,
        icns.len()
    );

    let ico = fs::read(&artifacts.ico).unwrap();
    assert_eq!(&ico[0..4], &[0, 0, 1, 0]);

    let _ = fs::remove_dir_all(&out_dir);
}

/// Provider that always fails; the pipeline must stop at the first
/// container and leave no partial container file behind.
struct BrokenResizer;

impl ResizeProvider for BrokenResizer {
    fn resize(&self, _master_png: &[u8], size: u32) -> Result<Vec<u8>> {
        Err(Error::ResizeFailed(size, "broken".into()))
    }
}

#[test]
fn resize_failure_leaves_no_partial_container() {
    let out_dir = scratch_dir("broken");
    let config = IconConfig {
        size: 16,
        ..Default::default()
    };

    let err = pipeline::generate(&config, &BrokenResizer, &out_dir).unwrap_err();
    assert!(matches!(err, Error::ResizeFailed(_, _)));

    // the master render completed before the resize step
    assert!(out_dir.join("icon.png").exists());
    assert!(!out_dir.join("icon.icns").exists());
    assert!(!out_dir.join("icon.ico").exists());

    let _ = fs::remove_dir_all(&out_dir);
}
