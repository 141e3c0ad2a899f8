//! Configuration module
//!
//! Process-level configuration for the size gate: threshold defaults used
//! when the settings store has nothing saved, the settings link shown in
//! rejection messages, the probe-failure policy and the probe resource limits.

use std::env;
use std::str::FromStr;

use crate::messages::Locale;
use crate::models::{Thresholds, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};

const MAX_PROBE_ALLOC_MB: u64 = 512;
const SNIFF_BYTES: usize = 512;

/// What to do with an image whose dimensions cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeFailurePolicy {
    /// Let the upload through; the host decides what to do with it.
    #[default]
    FailOpen,
    /// Reject the upload with a generic message.
    FailClosed,
}

impl FromStr for ProbeFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" | "fail_open" => Ok(ProbeFailurePolicy::FailOpen),
            "closed" | "fail_closed" => Ok(ProbeFailurePolicy::FailClosed),
            other => Err(anyhow::anyhow!(
                "SIZEGATE_PROBE_FAILURE must be 'open' or 'closed', got '{}'",
                other
            )),
        }
    }
}

/// Bounds on the work done while probing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeLimits {
    /// Decoder allocation ceiling in bytes.
    pub max_alloc_bytes: u64,
    /// Header bytes read for content sniffing.
    pub sniff_bytes: usize,
}

impl Default for ProbeLimits {
    fn default() -> Self {
        Self {
            max_alloc_bytes: MAX_PROBE_ALLOC_MB * 1024 * 1024,
            sniff_bytes: SNIFF_BYTES,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SizeGateConfig {
    pub default_thresholds: Thresholds,
    pub settings_url: Option<String>,
    pub probe_failure: ProbeFailurePolicy,
    pub probe_limits: ProbeLimits,
    pub locale: Locale,
}

impl SizeGateConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let default_thresholds = Thresholds::new(
            env_number("SIZEGATE_DEFAULT_MIN_WIDTH", DEFAULT_MIN_WIDTH)?,
            env_number("SIZEGATE_DEFAULT_MIN_HEIGHT", DEFAULT_MIN_HEIGHT)?,
        );

        let probe_limits = ProbeLimits {
            max_alloc_bytes: env_number::<u64>("SIZEGATE_MAX_PROBE_ALLOC_MB", MAX_PROBE_ALLOC_MB)?
                .saturating_mul(1024 * 1024),
            sniff_bytes: env_number("SIZEGATE_SNIFF_BYTES", SNIFF_BYTES)?,
        };

        let locale = env::var("SIZEGATE_LOCALE")
            .unwrap_or_else(|_| "en".to_string())
            .parse::<Locale>()?;

        let config = SizeGateConfig {
            default_thresholds,
            settings_url: env::var("SIZEGATE_SETTINGS_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            probe_failure: env::var("SIZEGATE_PROBE_FAILURE")
                .unwrap_or_else(|_| "open".to_string())
                .parse()?,
            probe_limits,
            locale,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.probe_limits.max_alloc_bytes == 0 {
            return Err(anyhow::anyhow!(
                "SIZEGATE_MAX_PROBE_ALLOC_MB must be greater than 0"
            ));
        }

        // Magic numbers of every supported format fit in 16 bytes
        if self.probe_limits.sniff_bytes < 16 {
            return Err(anyhow::anyhow!(
                "SIZEGATE_SNIFF_BYTES must be at least 16"
            ));
        }

        if self.default_thresholds.min_width == 0 && self.default_thresholds.min_height == 0 {
            tracing::warn!("Both default thresholds are 0; images are only checked once settings are saved");
        }

        Ok(())
    }
}

fn env_number<T: FromStr>(key: &str, default: T) -> Result<T, anyhow::Error> {
    parse_number(key, env::var(key).ok(), default)
}

/// Unset means the default; anything set must parse.
fn parse_number<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, anyhow::Error> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", key, raw)),
    }
}
