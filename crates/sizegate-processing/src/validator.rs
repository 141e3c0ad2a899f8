//! Minimum-dimension validation of upload descriptors

use sizegate_core::{
    MessageCatalog, ProbeFailurePolicy, SizeGateConfig, Thresholds, UploadDescriptor,
};

use crate::probe::{ContentProber, ImageProber, ProbeResult};
use crate::sniff::is_image_mime;

/// Why a descriptor was passed through or rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// No temporary file to inspect.
    NoFile,
    /// Sniffed content is not an image.
    NotImage { mime_type: String },
    Accepted(ProbeResult),
    /// Below at least one threshold.
    Rejected(ProbeResult),
    /// The file could not be sniffed or its dimensions could not be read.
    ProbeFailed { reason: String },
}

/// Rejects images smaller than the configured thresholds.
///
/// Stateless between calls: thresholds are passed in on every call and the
/// only outputs are the returned descriptor and log events.
#[derive(Debug, Clone)]
pub struct UploadSizeValidator<P = ImageProber> {
    prober: P,
    catalog: MessageCatalog,
    settings_url: Option<String>,
    on_probe_failure: ProbeFailurePolicy,
}

impl<P: ContentProber> UploadSizeValidator<P> {
    pub fn new(prober: P) -> Self {
        Self {
            prober,
            catalog: MessageCatalog::default(),
            settings_url: None,
            on_probe_failure: ProbeFailurePolicy::default(),
        }
    }

    pub fn from_config(prober: P, config: &SizeGateConfig) -> Self {
        Self {
            prober,
            catalog: MessageCatalog::new(config.locale),
            settings_url: config.settings_url.clone(),
            on_probe_failure: config.probe_failure,
        }
    }

    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_settings_url(mut self, url: impl Into<String>) -> Self {
        self.settings_url = Some(url.into());
        self
    }

    pub fn with_probe_failure_policy(mut self, policy: ProbeFailurePolicy) -> Self {
        self.on_probe_failure = policy;
        self
    }

    /// Classify a descriptor without touching it.
    pub fn inspect(&self, descriptor: &UploadDescriptor, thresholds: &Thresholds) -> ValidationOutcome {
        let Some(path) = descriptor.temp_path() else {
            return ValidationOutcome::NoFile;
        };

        let mime_type = match self.prober.sniff_mime_type(path) {
            Ok(mime_type) => mime_type,
            Err(e) => {
                return ValidationOutcome::ProbeFailed {
                    reason: e.to_string(),
                }
            }
        };

        if !is_image_mime(&mime_type) {
            return ValidationOutcome::NotImage { mime_type };
        }

        let (width, height) = match self.prober.image_dimensions(path) {
            Ok(dimensions) => dimensions,
            Err(e) => {
                return ValidationOutcome::ProbeFailed {
                    reason: e.to_string(),
                }
            }
        };

        let probe = ProbeResult {
            mime_type,
            width,
            height,
        };
        if thresholds.admits(width, height) {
            ValidationOutcome::Accepted(probe)
        } else {
            ValidationOutcome::Rejected(probe)
        }
    }

    /// Return the descriptor unchanged, or with `error` set when the upload
    /// must be refused.
    pub fn validate(&self, mut descriptor: UploadDescriptor, thresholds: &Thresholds) -> UploadDescriptor {
        let tmp_name = descriptor.tmp_name.clone().unwrap_or_default();

        match self.inspect(&descriptor, thresholds) {
            ValidationOutcome::NoFile => {
                tracing::debug!("No temporary file on upload, skipping size check");
            }
            ValidationOutcome::NotImage { mime_type } => {
                tracing::debug!(tmp_name = %tmp_name, mime_type = %mime_type, "Not an image, skipping size check");
            }
            ValidationOutcome::Accepted(probe) => {
                tracing::debug!(
                    tmp_name = %tmp_name,
                    mime_type = %probe.mime_type,
                    width = probe.width,
                    height = probe.height,
                    "Image meets minimum dimensions"
                );
            }
            ValidationOutcome::Rejected(probe) => {
                tracing::info!(
                    tmp_name = %tmp_name,
                    mime_type = %probe.mime_type,
                    width = probe.width,
                    height = probe.height,
                    min_width = thresholds.min_width,
                    min_height = thresholds.min_height,
                    "Image below minimum dimensions, rejecting upload"
                );
                descriptor.error = Some(
                    self.catalog
                        .dimensions_too_small(thresholds, self.settings_url.as_deref()),
                );
            }
            ValidationOutcome::ProbeFailed { reason } => {
                tracing::warn!(
                    tmp_name = %tmp_name,
                    reason = %reason,
                    policy = ?self.on_probe_failure,
                    "Could not probe upload"
                );
                if self.on_probe_failure == ProbeFailurePolicy::FailClosed {
                    descriptor.error = Some(self.catalog.probe_failed().to_string());
                }
            }
        }

        descriptor
    }
}
