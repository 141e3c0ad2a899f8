//! Domain models

pub mod thresholds;
pub mod upload;

pub use thresholds::{Thresholds, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
pub use upload::UploadDescriptor;
