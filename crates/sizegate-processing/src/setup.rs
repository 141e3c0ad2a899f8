//! Wiring of settings, settings page and upload pipeline

use std::sync::Arc;

use anyhow::Context;
use sizegate_core::settings::{register_media_settings, register_threshold_settings};
use sizegate_core::{
    MessageCatalog, SettingsPage, SettingsRegistry, SettingsStore, SizeGateConfig, Thresholds,
    UploadDescriptor,
};

use crate::pipeline::{UploadPipeline, DEFAULT_PRIORITY};
use crate::probe::ImageProber;
use crate::size_gate::MinimumSizeFilter;
use crate::validator::UploadSizeValidator;

/// Everything a host needs: the settings it must expose, the admin page
/// rendering them and the upload pipeline with the size gate installed.
pub struct SizeGate {
    pub registry: Arc<SettingsRegistry>,
    pub store: Arc<dyn SettingsStore>,
    pub page: SettingsPage,
    pub pipeline: UploadPipeline,
}

impl SizeGate {
    pub fn install(config: &SizeGateConfig, store: Arc<dyn SettingsStore>) -> anyhow::Result<Self> {
        config.validate().context("Invalid size gate configuration")?;

        let mut registry = SettingsRegistry::new();
        register_threshold_settings(&mut registry, config.default_thresholds);
        let registry = Arc::new(registry);

        let catalog = MessageCatalog::new(config.locale);
        let page = register_media_settings(&catalog).context("Failed to build settings page")?;

        let validator =
            UploadSizeValidator::from_config(ImageProber::new(config.probe_limits), config);
        let mut pipeline = UploadPipeline::new();
        pipeline.register(
            Arc::new(MinimumSizeFilter::new(
                validator,
                registry.clone(),
                store.clone(),
            )),
            DEFAULT_PRIORITY,
        );

        tracing::info!(
            default_min_width = config.default_thresholds.min_width,
            default_min_height = config.default_thresholds.min_height,
            probe_failure = ?config.probe_failure,
            "Upload size gate installed"
        );

        Ok(Self {
            registry,
            store,
            page,
            pipeline,
        })
    }

    /// Run an upload through the pipeline.
    pub fn check(&self, descriptor: UploadDescriptor) -> UploadDescriptor {
        self.pipeline.run(descriptor)
    }

    /// Sanitize and save a submitted settings value.
    pub fn update_setting(&self, key: &str, raw: &str) -> anyhow::Result<u32> {
        self.registry
            .update(self.store.as_ref(), key, raw)
            .with_context(|| format!("Failed to update setting {}", key))
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::from_settings(&self.registry, self.store.as_ref())
    }

    pub fn render_settings_page(&self) -> String {
        self.page.render(&self.registry, self.store.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizegate_core::{MemorySettingsStore, MIN_WIDTH_KEY};

    #[test]
    fn test_install_registers_everything() {
        let gate =
            SizeGate::install(&SizeGateConfig::default(), Arc::new(MemorySettingsStore::new()))
                .unwrap();

        assert_eq!(gate.pipeline.filter_names(), vec!["minimum_image_size"]);
        assert_eq!(gate.thresholds(), Thresholds::new(1000, 650));
        assert!(gate.render_settings_page().contains("value=\"1000\""));
    }

    #[test]
    fn test_install_uses_configured_defaults() {
        let config = SizeGateConfig {
            default_thresholds: Thresholds::new(800, 500),
            ..SizeGateConfig::default()
        };
        let gate = SizeGate::install(&config, Arc::new(MemorySettingsStore::new())).unwrap();
        assert_eq!(gate.thresholds(), Thresholds::new(800, 500));
    }

    #[test]
    fn test_install_rejects_invalid_config() {
        let mut config = SizeGateConfig::default();
        config.probe_limits.sniff_bytes = 0;
        assert!(SizeGate::install(&config, Arc::new(MemorySettingsStore::new())).is_err());
    }

    #[test]
    fn test_update_setting() {
        let gate =
            SizeGate::install(&SizeGateConfig::default(), Arc::new(MemorySettingsStore::new()))
                .unwrap();

        assert_eq!(gate.update_setting(MIN_WIDTH_KEY, "-1200").unwrap(), 1200);
        assert_eq!(gate.thresholds().min_width, 1200);
        assert!(gate.update_setting("max_width", "5").is_err());
    }
}
