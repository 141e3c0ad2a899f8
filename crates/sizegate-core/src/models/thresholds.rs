//! Minimum image dimensions

use serde::{Deserialize, Serialize};

use crate::settings::{SettingsRegistry, SettingsStore, MIN_HEIGHT_KEY, MIN_WIDTH_KEY};

pub const DEFAULT_MIN_WIDTH: u32 = 1000;
pub const DEFAULT_MIN_HEIGHT: u32 = 650;

/// Minimum acceptable pixel dimensions for an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_width: u32,
    pub min_height: u32,
}

impl Thresholds {
    pub fn new(min_width: u32, min_height: u32) -> Self {
        Self {
            min_width,
            min_height,
        }
    }

    /// Read the current thresholds from the settings store.
    ///
    /// Each value falls back to its registered default when unset, and to the
    /// crate default when the setting was never registered.
    pub fn from_settings(registry: &SettingsRegistry, store: &dyn SettingsStore) -> Self {
        Self {
            min_width: registry.value_or(store, MIN_WIDTH_KEY, DEFAULT_MIN_WIDTH),
            min_height: registry.value_or(store, MIN_HEIGHT_KEY, DEFAULT_MIN_HEIGHT),
        }
    }

    /// Both dimensions meet their minimum. Bounds are inclusive.
    pub fn admits(&self, width: u32, height: u32) -> bool {
        width >= self.min_width && height >= self.min_height
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_WIDTH, DEFAULT_MIN_HEIGHT)
    }
}
