//! Upload descriptor handed over by the host's upload pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

const ERROR_KEY: &str = "error";

/// One upload attempt, as seen before the file is moved to final storage.
///
/// Only `error` is ever written by the size gate. Every other field the host
/// attaches (original name, declared type, size, ...) lives in `extra` and is
/// serialized back out untouched.
///
/// Hosts send `"error"` either as a message or as a numeric upload status
/// (`0` for a clean upload). A non-string value is kept in `extra` under the
/// same key and written back as it came in, unless a rejection message
/// replaces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireDescriptor", into = "WireDescriptor")]
pub struct UploadDescriptor {
    /// Temporary location of the uploaded bytes.
    pub tmp_name: Option<String>,
    /// User-facing rejection message. The host aborts the upload when set.
    pub error: Option<String>,
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize)]
struct WireDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tmp_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<WireDescriptor> for UploadDescriptor {
    fn from(wire: WireDescriptor) -> Self {
        let mut extra = wire.extra;
        let error = match wire.error {
            Some(Value::String(message)) => Some(message),
            Some(status) => {
                extra.insert(ERROR_KEY.to_string(), status);
                None
            }
            None => None,
        };

        Self {
            tmp_name: wire.tmp_name,
            error,
            extra,
        }
    }
}

impl From<UploadDescriptor> for WireDescriptor {
    fn from(descriptor: UploadDescriptor) -> Self {
        let mut extra = descriptor.extra;
        let host_status = extra.remove(ERROR_KEY);
        let error = descriptor.error.map(Value::String).or(host_status);

        Self {
            tmp_name: descriptor.tmp_name,
            error,
            extra,
        }
    }
}

impl UploadDescriptor {
    pub fn new(tmp_name: impl Into<String>) -> Self {
        Self {
            tmp_name: Some(tmp_name.into()),
            ..Self::default()
        }
    }

    /// Attach a host-owned field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Temporary file path, or `None` when absent or empty.
    pub fn temp_path(&self) -> Option<&Path> {
        self.tmp_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map(Path::new)
    }

    pub fn is_rejected(&self) -> bool {
        self.error.is_some()
    }
}
