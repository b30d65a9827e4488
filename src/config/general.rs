//! The general configuration settings for dirview.
//!
//! [General] is deserialized from the `[general]` table of dirview.toml and
//! converted into [InternalGeneral], which holds validated values.

use serde::Deserialize;

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default wait for the bytes following an ESC, in milliseconds.
pub const DEFAULT_ESCAPE_TIMEOUT_MS: i64 = 50;
/// Longest accepted wait for the bytes following an ESC, in milliseconds.
pub const MAX_ESCAPE_TIMEOUT_MS: i64 = 1000;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    escape_timeout_ms: i64,
    log_level: String,
    log_file: Option<PathBuf>,
}

impl Default for General {
    fn default() -> Self {
        General {
            escape_timeout_ms: DEFAULT_ESCAPE_TIMEOUT_MS,
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

#[derive(Debug)]
pub struct InternalGeneral {
    escape_timeout: Duration,
    log_level: String,
    log_file: Option<PathBuf>,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        Self {
            escape_timeout: Duration::from_millis(clamp_escape_timeout(g.escape_timeout_ms)),
            log_level: g.log_level,
            log_file: g.log_file,
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn escape_timeout(&self) -> Duration {
        self.escape_timeout
    }

    #[inline]
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    #[inline]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// Clamps the configured escape timeout into `0..=1000` ms, warning when it had to.
pub fn clamp_escape_timeout(value: i64) -> u64 {
    let clamped = value.clamp(0, MAX_ESCAPE_TIMEOUT_MS);
    if clamped != value {
        eprintln!(
            "[dirview] escape_timeout_ms = {} is out of range (0..={}), using {}",
            value, MAX_ESCAPE_TIMEOUT_MS, clamped
        );
    }
    clamped as u64
}
