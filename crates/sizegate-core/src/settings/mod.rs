//! Settings surface for the minimum-dimension thresholds
//!
//! The host owns storage ([`SettingsStore`]); this module owns the typed
//! definitions (defaults and sanitizers), the admin page layout and the
//! field renderers.

pub mod page;
pub mod registry;
pub mod sanitize;
pub mod store;

pub use page::{escape_attr, register_media_settings, render_number_input, SettingsPage};
pub use registry::{register_threshold_settings, NumberSetting, Sanitizer, SettingsRegistry};
pub use sanitize::absint;
pub use store::{MemorySettingsStore, SettingsStore};

pub const MIN_WIDTH_KEY: &str = "min_width";
pub const MIN_HEIGHT_KEY: &str = "min_height";

/// Settings page the threshold fields are attached to.
pub const MEDIA_PAGE: &str = "media";
