//! End-to-end upload size gate tests against real files.
//!
//! Run with: `cargo test -p sizegate-processing --test upload_gate_test`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{ImageFormat, RgbImage};
use serde_json::json;
use sizegate_core::{
    MemorySettingsStore, ProbeFailurePolicy, SizeGateConfig, Thresholds, UploadDescriptor,
    MIN_HEIGHT_KEY, MIN_WIDTH_KEY,
};
use sizegate_processing::SizeGate;
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write an image under a PHP-style temp name with no extension.
    fn image(&self, name: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
        let path = self.dir.path().join(name);
        RgbImage::new(width, height)
            .save_with_format(&path, format)
            .unwrap();
        path
    }

    fn file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }
}

fn upload(path: &Path, name: &str) -> UploadDescriptor {
    UploadDescriptor::new(path.to_string_lossy())
        .with_field("name", name)
        .with_field("type", "image/png")
        .with_field("size", 1234)
}

fn gate_800x500(config: SizeGateConfig) -> SizeGate {
    let store = Arc::new(MemorySettingsStore::new());
    let gate = SizeGate::install(&config, store).unwrap();
    gate.update_setting(MIN_WIDTH_KEY, "800").unwrap();
    gate.update_setting(MIN_HEIGHT_KEY, "500").unwrap();
    gate
}

#[test]
fn test_below_width_is_rejected() {
    let fixture = Fixture::new();
    let gate = gate_800x500(SizeGateConfig::default());
    let path = fixture.image("phpA", 700, 600, ImageFormat::Png);

    let result = gate.check(upload(&path, "narrow.png"));
    let error = result.error.as_deref().expect("upload should be rejected");
    assert!(error.contains("800"));
    assert!(error.contains("500"));
}

#[test]
fn test_large_image_is_accepted_unchanged() {
    let fixture = Fixture::new();
    let gate = gate_800x500(SizeGateConfig::default());
    let path = fixture.image("phpB", 900, 700, ImageFormat::Jpeg);

    let descriptor = upload(&path, "wide.jpg");
    assert_eq!(gate.check(descriptor.clone()), descriptor);
}

#[test]
fn test_exact_minimum_is_accepted() {
    let fixture = Fixture::new();
    let gate = gate_800x500(SizeGateConfig::default());
    let path = fixture.image("phpC", 800, 500, ImageFormat::Png);

    assert!(!gate.check(upload(&path, "exact.png")).is_rejected());
}

#[test]
fn test_pdf_passes_through() {
    let fixture = Fixture::new();
    let gate = gate_800x500(SizeGateConfig::default());
    // Declared as an image, but the bytes say otherwise
    let path = fixture.file("phpD", b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj\n<<>>\nendobj\n");

    let descriptor = upload(&path, "scan.png");
    assert_eq!(gate.check(descriptor.clone()), descriptor);
}

#[test]
fn test_no_file_passes_through() {
    let gate = gate_800x500(SizeGateConfig::default());

    let descriptor = UploadDescriptor::default().with_field("name", "ghost.png");
    assert_eq!(gate.check(descriptor.clone()), descriptor);
}

#[test]
fn test_defaults_apply_when_nothing_saved() {
    let fixture = Fixture::new();
    let gate = SizeGate::install(
        &SizeGateConfig::default(),
        Arc::new(MemorySettingsStore::new()),
    )
    .unwrap();
    assert_eq!(gate.thresholds(), Thresholds::new(1000, 650));

    let small = fixture.image("phpE", 999, 650, ImageFormat::Png);
    let error = gate.check(upload(&small, "a.png")).error.unwrap();
    assert!(error.contains("1000 x 650"));

    let ok = fixture.image("phpF", 1000, 650, ImageFormat::Png);
    assert!(!gate.check(upload(&ok, "b.png")).is_rejected());
}

#[test]
fn test_corrupt_image_fails_open() {
    let fixture = Fixture::new();
    let gate = gate_800x500(SizeGateConfig::default());
    let path = fixture.file("phpG", b"\x89PNG\r\n\x1a\ngarbage after the signature");

    let descriptor = upload(&path, "broken.png");
    assert_eq!(gate.check(descriptor.clone()), descriptor);
}

#[test]
fn test_corrupt_image_fail_closed() {
    let fixture = Fixture::new();
    let gate = gate_800x500(SizeGateConfig {
        probe_failure: ProbeFailurePolicy::FailClosed,
        ..SizeGateConfig::default()
    });
    let path = fixture.file("phpH", b"\x89PNG\r\n\x1a\ngarbage after the signature");

    assert!(gate.check(upload(&path, "broken.png")).is_rejected());
}

#[test]
fn test_missing_temp_file_fails_open() {
    let gate = gate_800x500(SizeGateConfig::default());
    let descriptor = UploadDescriptor::new("/nonexistent/sizegate/phpZ");

    assert_eq!(gate.check(descriptor.clone()), descriptor);
}

#[test]
fn test_check_is_idempotent() {
    let fixture = Fixture::new();
    let gate = gate_800x500(SizeGateConfig::default());
    let path = fixture.image("phpI", 100, 100, ImageFormat::Png);

    let first = gate.check(upload(&path, "tiny.png"));
    let second = gate.check(upload(&path, "tiny.png"));
    assert_eq!(first, second);
}

#[test]
fn test_host_json_round_trip() {
    let fixture = Fixture::new();
    let gate = gate_800x500(SizeGateConfig {
        settings_url: Some("https://example.com/wp-admin/options-media.php".to_string()),
        ..SizeGateConfig::default()
    });
    let path = fixture.image("phpJ", 640, 480, ImageFormat::Png);

    let raw = json!({
        "name": "small.png",
        "type": "image/png",
        "tmp_name": path.to_string_lossy(),
        "error": 0,
        "size": 321,
        "full_path": "small.png"
    });
    let descriptor: UploadDescriptor = serde_json::from_value(raw.clone()).unwrap();
    let out = serde_json::to_value(gate.check(descriptor)).unwrap();

    let mut expected = raw;
    expected["error"] = json!(
        "Image dimensions are too small. Minimum size is 800 x 500 pixels. Please adjust the criteria in <a href=\"https://example.com/wp-admin/options-media.php\">Media Settings</a>."
    );
    assert_eq!(out, expected);
}

#[test]
fn test_tall_strip_is_rejected_with_defaults() {
    let fixture = Fixture::new();
    let gate = SizeGate::install(
        &SizeGateConfig::default(),
        Arc::new(MemorySettingsStore::new()),
    )
    .unwrap();
    // Height far beyond any sane image, width far below the minimum
    let path = fixture.image("phpK", 1, 70_000, ImageFormat::Png);

    let result = gate.check(UploadDescriptor::new(path.to_string_lossy()));
    let error = result.error.as_deref().expect("narrow strip should be rejected");
    assert!(error.contains("1000 x 650"));
}

#[test]
fn test_host_upload_status_code_is_preserved_when_accepted() {
    let fixture = Fixture::new();
    let gate = gate_800x500(SizeGateConfig::default());
    let path = fixture.image("phpL", 900, 600, ImageFormat::Png);

    let raw = json!({
        "name": "fine.png",
        "type": "image/png",
        "tmp_name": path.to_string_lossy(),
        "error": 0,
        "size": 4096
    });
    let descriptor: UploadDescriptor = serde_json::from_value(raw.clone()).unwrap();
    let out = serde_json::to_value(gate.check(descriptor)).unwrap();
    assert_eq!(out, raw);
}
