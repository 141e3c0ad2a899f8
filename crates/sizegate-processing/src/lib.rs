//! Upload size gate
//!
//! This crate inspects uploaded files before the host persists them:
//! - Content sniffing from file bytes (sniff)
//! - Header-only dimension probing with decoder limits (probe)
//! - Minimum-dimension validation of upload descriptors (validator)
//! - Ordered upload filters and the size-gate filter (pipeline, size_gate)
//! - One-call wiring of settings, settings page and pipeline (setup)

pub mod pipeline;
pub mod probe;
pub mod setup;
pub mod size_gate;
pub mod sniff;
pub mod validator;

pub use pipeline::{UploadFilter, UploadPipeline, DEFAULT_PRIORITY};
pub use probe::{ContentProber, ImageProber, ProbeError, ProbeResult};
pub use setup::SizeGate;
pub use size_gate::MinimumSizeFilter;
pub use sniff::{is_image_mime, sniff_mime_type};
pub use validator::{UploadSizeValidator, ValidationOutcome};
