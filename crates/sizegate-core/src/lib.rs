//! Sizegate Core Library
//!
//! This crate provides the domain models, settings registry, message catalog,
//! error types and configuration shared by the upload size gate and its
//! command-line front end.

pub mod config;
pub mod error;
pub mod messages;
pub mod models;
pub mod settings;

// Re-export commonly used types
pub use config::{ProbeFailurePolicy, ProbeLimits, SizeGateConfig};
pub use error::{LocaleError, SettingsError};
pub use messages::{Locale, MessageCatalog};
pub use models::{Thresholds, UploadDescriptor, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
pub use settings::{
    MemorySettingsStore, NumberSetting, SettingsPage, SettingsRegistry, SettingsStore,
    MIN_HEIGHT_KEY, MIN_WIDTH_KEY,
};
