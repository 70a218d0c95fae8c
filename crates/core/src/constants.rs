//! Constants used throughout the simplifier core crate.
//!
//! Markers, user-facing messages and configuration defaults live here so the parser,
//! session and front ends agree on them.

use std::time::Duration;

/// Prefix that opens a section heading in simplifier output.
pub const HEADING_MARKER: &str = "###";

/// Validation message shown when a submission carries neither a file nor text.
pub const MISSING_INPUT_MESSAGE: &str = "Please upload a file or paste report text";

/// Generic message shown whenever processing a report fails.
pub const PROCESSING_FAILED_MESSAGE: &str = "Failed to process report. Please try again.";

/// Standing notice shown beneath every simplified report.
pub const DISCLAIMER: &str =
    "This is not a medical diagnosis. Please consult a qualified doctor.";

/// File extensions accepted by the upload control.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];

/// Advisory upload size limit (10 MiB). Exceeding it is logged, not rejected.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Delay applied by the mock simplifier before returning its canned report.
pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(2_000);

/// Default REST bind address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";
