//! Upload filter enforcing the minimum image dimensions

use std::fmt;
use std::sync::Arc;

use sizegate_core::{SettingsRegistry, SettingsStore, Thresholds, UploadDescriptor};

use crate::pipeline::UploadFilter;
use crate::probe::{ContentProber, ImageProber};
use crate::validator::UploadSizeValidator;

pub const FILTER_NAME: &str = "minimum_image_size";

/// Reads the thresholds from the settings store on every upload, so admin
/// changes apply to the next upload without a restart.
pub struct MinimumSizeFilter<P = ImageProber> {
    validator: UploadSizeValidator<P>,
    registry: Arc<SettingsRegistry>,
    store: Arc<dyn SettingsStore>,
}

impl<P: ContentProber> MinimumSizeFilter<P> {
    pub fn new(
        validator: UploadSizeValidator<P>,
        registry: Arc<SettingsRegistry>,
        store: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            validator,
            registry,
            store,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::from_settings(&self.registry, self.store.as_ref())
    }
}

impl<P> fmt::Debug for MinimumSizeFilter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinimumSizeFilter")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl<P: ContentProber> UploadFilter for MinimumSizeFilter<P> {
    fn name(&self) -> &str {
        FILTER_NAME
    }

    fn filter(&self, descriptor: UploadDescriptor) -> UploadDescriptor {
        let thresholds = self.thresholds();
        self.validator.validate(descriptor, &thresholds)
    }
}
