//! Typed setting definitions with defaults and sanitizers

use std::collections::HashMap;

use super::sanitize::absint;
use super::store::SettingsStore;
use super::{MEDIA_PAGE, MIN_HEIGHT_KEY, MIN_WIDTH_KEY};
use crate::error::SettingsError;
use crate::models::Thresholds;

/// Turns raw input into a stored value.
pub type Sanitizer = fn(&str) -> u32;

/// A numeric setting registered against a settings page.
#[derive(Debug, Clone)]
pub struct NumberSetting {
    pub key: String,
    pub page: String,
    pub default: u32,
    pub sanitizer: Option<Sanitizer>,
}

impl NumberSetting {
    pub fn new(key: impl Into<String>, page: impl Into<String>, default: u32) -> Self {
        Self {
            key: key.into(),
            page: page.into(),
            default,
            sanitizer: None,
        }
    }

    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = Some(sanitizer);
        self
    }

    /// Interpret a raw value. Without a sanitizer only plain unsigned
    /// integers are accepted.
    fn coerce(&self, raw: &str) -> Option<u32> {
        match self.sanitizer {
            Some(sanitize) => Some(sanitize(raw)),
            None => raw.trim().parse().ok(),
        }
    }
}

/// Registry of the settings this crate exposes.
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    settings: HashMap<String, NumberSetting>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a setting. Registering the same key again replaces it.
    pub fn register(&mut self, setting: NumberSetting) {
        tracing::debug!(key = %setting.key, page = %setting.page, default = setting.default, "Registered setting");
        self.settings.insert(setting.key.clone(), setting);
    }

    pub fn definition(&self, key: &str) -> Option<&NumberSetting> {
        self.settings.get(key)
    }

    /// Current value of a registered setting, or its default when unset.
    pub fn get(&self, store: &dyn SettingsStore, key: &str) -> Result<u32, SettingsError> {
        let setting = self
            .definition(key)
            .ok_or_else(|| SettingsError::UnknownSetting(key.to_string()))?;
        Ok(Self::read(setting, store))
    }

    /// Current value, falling back to `fallback` when the key is not
    /// registered and nothing usable is stored.
    pub fn value_or(&self, store: &dyn SettingsStore, key: &str, fallback: u32) -> u32 {
        match self.definition(key) {
            Some(setting) => Self::read(setting, store),
            None => store
                .get(key)
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(fallback),
        }
    }

    /// Sanitize and persist a submitted value, returning what was stored.
    pub fn update(
        &self,
        store: &dyn SettingsStore,
        key: &str,
        raw: &str,
    ) -> Result<u32, SettingsError> {
        let setting = self
            .definition(key)
            .ok_or_else(|| SettingsError::UnknownSetting(key.to_string()))?;
        let value = setting
            .coerce(raw)
            .ok_or_else(|| SettingsError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
            })?;

        store.set(key, value.to_string());
        tracing::info!(key = %key, value, "Setting updated");
        Ok(value)
    }

    fn read(setting: &NumberSetting, store: &dyn SettingsStore) -> u32 {
        let Some(raw) = store.get(&setting.key) else {
            return setting.default;
        };

        setting.coerce(&raw).unwrap_or_else(|| {
            tracing::debug!(
                key = %setting.key,
                raw = %raw,
                "Stored value is not a number, using default"
            );
            setting.default
        })
    }
}

/// Register the minimum width and height settings on the media page.
pub fn register_threshold_settings(registry: &mut SettingsRegistry, defaults: Thresholds) {
    registry.register(
        NumberSetting::new(MIN_WIDTH_KEY, MEDIA_PAGE, defaults.min_width).with_sanitizer(absint),
    );
    registry.register(
        NumberSetting::new(MIN_HEIGHT_KEY, MEDIA_PAGE, defaults.min_height).with_sanitizer(absint),
    );
}
