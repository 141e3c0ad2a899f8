//! Error types module
//!
//! Settings and catalog failures are the only errors this crate produces.
//! Validation outcomes never surface as errors: a rejected upload is reported
//! through the descriptor's `error` field instead.

/// Errors raised by the settings registry and the settings page.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Invalid value for setting {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Unknown settings section: {0}")]
    UnknownSection(String),
}

/// Returned when a locale tag has no message catalog.
#[derive(Debug, thiserror::Error)]
#[error("Unsupported locale: {0} (supported: en, fr)")]
pub struct LocaleError(pub String);
