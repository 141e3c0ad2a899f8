use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use sizegate_core::{MemorySettingsStore, SizeGateConfig, UploadDescriptor, MIN_HEIGHT_KEY, MIN_WIDTH_KEY};
use sizegate_processing::SizeGate;

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Install the gate over an in-memory store, applying any threshold
/// overrides through the same sanitizers the settings page uses.
pub fn build_gate(
    config: &SizeGateConfig,
    min_width: Option<&str>,
    min_height: Option<&str>,
) -> anyhow::Result<SizeGate> {
    let gate = SizeGate::install(config, Arc::new(MemorySettingsStore::new()))?;
    if let Some(raw) = min_width {
        gate.update_setting(MIN_WIDTH_KEY, raw)?;
    }
    if let Some(raw) = min_height {
        gate.update_setting(MIN_HEIGHT_KEY, raw)?;
    }
    Ok(gate)
}

/// Descriptor for a local file, shaped like a host upload record.
pub fn descriptor_for(path: &Path) -> UploadDescriptor {
    let mut descriptor = UploadDescriptor::new(path.to_string_lossy());
    if let Some(name) = path.file_name() {
        descriptor = descriptor.with_field("name", name.to_string_lossy().into_owned());
    }
    if let Ok(metadata) = std::fs::metadata(path) {
        descriptor = descriptor.with_field("size", metadata.len());
    }
    descriptor
}
