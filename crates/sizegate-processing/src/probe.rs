//! Content prober - sniffing and header-only dimension extraction

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use image::{ImageReader, Limits};
use sizegate_core::ProbeLimits;

use crate::sniff::sniff_mime_type;

/// What probing a file revealed. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read image dimensions: {0}")]
    Image(#[from] image::ImageError),
}

impl ProbeError {
    fn io(path: &Path, source: io::Error) -> Self {
        ProbeError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Inspects uploaded files on disk.
pub trait ContentProber: Send + Sync {
    /// MIME type derived from the file's leading bytes.
    fn sniff_mime_type(&self, path: &Path) -> Result<String, ProbeError>;

    /// Pixel `(width, height)` of an image file.
    fn image_dimensions(&self, path: &Path) -> Result<(u32, u32), ProbeError>;
}

/// Prober backed by the `image` crate.
///
/// Reads at most `sniff_bytes` for sniffing and only the image header for
/// dimensions; pixel data is never decoded. Header dimensions are reported
/// as-is, however large, so they can still be compared against thresholds.
#[derive(Debug, Clone, Default)]
pub struct ImageProber {
    limits: ProbeLimits,
}

impl ImageProber {
    pub fn new(limits: ProbeLimits) -> Self {
        Self { limits }
    }

    // Only the allocation ceiling applies: a width or height limit would turn
    // a huge header into a probe failure instead of a measurable image.
    fn decoder_limits(&self) -> Limits {
        let mut limits = Limits::default();
        limits.max_alloc = Some(self.limits.max_alloc_bytes);
        limits
    }
}

impl ContentProber for ImageProber {
    fn sniff_mime_type(&self, path: &Path) -> Result<String, ProbeError> {
        let file = File::open(path).map_err(|e| ProbeError::io(path, e))?;
        let mut header = Vec::with_capacity(self.limits.sniff_bytes);
        file.take(self.limits.sniff_bytes as u64)
            .read_to_end(&mut header)
            .map_err(|e| ProbeError::io(path, e))?;

        Ok(sniff_mime_type(&header).to_string())
    }

    fn image_dimensions(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        let mut reader = ImageReader::open(path)
            .map_err(|e| ProbeError::io(path, e))?
            .with_guessed_format()
            .map_err(|e| ProbeError::io(path, e))?;
        reader.limits(self.decoder_limits());

        Ok(reader.into_dimensions()?)
    }
}
