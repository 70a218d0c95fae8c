//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services. Request
//! handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_SIMULATED_DELAY};
use crate::simplifier::CANNED_REPORT;
use crate::text::NonEmptyText;
use crate::{ReportError, ReportResult};
use std::path::PathBuf;
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    simulated_delay: Duration,
    max_upload_bytes: u64,
    canned_output: NonEmptyText,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidInput` if `max_upload_bytes` is zero.
    pub fn new(
        simulated_delay: Duration,
        max_upload_bytes: u64,
        canned_output: NonEmptyText,
    ) -> ReportResult<Self> {
        if max_upload_bytes == 0 {
            return Err(ReportError::InvalidInput(
                "max_upload_bytes must be greater than zero".into(),
            ));
        }

        Ok(Self {
            simulated_delay,
            max_upload_bytes,
            canned_output,
        })
    }

    pub fn simulated_delay(&self) -> Duration {
        self.simulated_delay
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    pub fn canned_output(&self) -> &NonEmptyText {
        &self.canned_output
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            simulated_delay: DEFAULT_SIMULATED_DELAY,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            canned_output: NonEmptyText::new(CANNED_REPORT)
                .expect("built-in canned report is non-empty"),
        }
    }
}

/// Trims an optional environment value, treating blank as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the simulated delay (milliseconds) from an optional string value.
///
/// If `value` is `None` or blank, returns the default delay.
pub fn simulated_delay_from_env_value(value: Option<String>) -> ReportResult<Duration> {
    match non_blank(value) {
        None => Ok(DEFAULT_SIMULATED_DELAY),
        Some(v) => v.parse::<u64>().map(Duration::from_millis).map_err(|e| {
            ReportError::InvalidInput(format!("invalid simulated delay '{}': {}", v, e))
        }),
    }
}

/// Parse the advisory upload limit (bytes) from an optional string value.
///
/// If `value` is `None` or blank, returns the default limit of 10 MiB.
pub fn max_upload_bytes_from_env_value(value: Option<String>) -> ReportResult<u64> {
    match non_blank(value) {
        None => Ok(DEFAULT_MAX_UPLOAD_BYTES),
        Some(v) => match v.parse::<u64>() {
            Ok(0) => Err(ReportError::InvalidInput(
                "max upload bytes must be greater than zero".into(),
            )),
            Ok(n) => Ok(n),
            Err(e) => Err(ReportError::InvalidInput(format!(
                "invalid max upload bytes '{}': {}",
                v, e
            ))),
        },
    }
}

/// Resolve the text the mock simplifier returns.
///
/// With an override path the file must exist and contain non-blank text. Without one, the
/// built-in canned report is used.
pub fn resolve_canned_output(override_path: Option<PathBuf>) -> ReportResult<NonEmptyText> {
    let Some(path) = override_path else {
        return Ok(CoreConfig::default().canned_output);
    };

    if !path.is_file() {
        return Err(ReportError::InvalidInput(format!(
            "canned output override is not a file: {}",
            path.display()
        )));
    }

    let contents = std::fs::read_to_string(&path).map_err(ReportError::FileRead)?;
    NonEmptyText::new(contents).map_err(|_| {
        ReportError::InvalidInput(format!(
            "canned output override is empty: {}",
            path.display()
        ))
    })
}
