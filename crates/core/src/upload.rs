//! Uploaded report files.
//!
//! The upload control accepts PDF and image reports by extension. The advisory size limit is
//! logged when exceeded but never enforced. Files are identified in logs by name, size and
//! SHA-256 digest only; their content is never logged.

use crate::constants::ACCEPTED_EXTENSIONS;
use crate::{ReportError, ReportResult};
use sha2::{Digest, Sha256};
use std::path::Path;

/// A report file selected for simplification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    name: String,
    bytes: Vec<u8>,
    sha256: String,
    /// Sniffed media type, if recognisable. Best-effort only.
    media_type: Option<&'static str>,
}

impl ReportFile {
    /// Wraps uploaded bytes, checking the filename against the accept filter.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidInput` for a blank filename and
    /// `ReportError::UnsupportedFileType` for any extension outside the accept filter.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> ReportResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ReportError::InvalidInput("filename cannot be empty".into()));
        }
        if !has_accepted_extension(&name) {
            return Err(ReportError::UnsupportedFileType { filename: name });
        }

        let sha256 = hex::encode(Sha256::digest(&bytes));
        let media_type = infer::get(&bytes).map(|kind| kind.mime_type());

        Ok(Self {
            name,
            bytes,
            sha256,
            media_type,
        })
    }

    /// Reads a report file from disk.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::FileRead` if the file cannot be read, or any error from
    /// [`ReportFile::new`].
    pub fn from_path(path: &Path) -> ReportResult<Self> {
        let bytes = std::fs::read(path).map_err(ReportError::FileRead)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        Self::new(name, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    pub fn media_type(&self) -> Option<&'static str> {
        self.media_type
    }

    /// Logs a warning if the file is over the advisory limit. Returns whether it was.
    pub fn warn_if_oversized(&self, max_upload_bytes: u64) -> bool {
        let oversized = self.size_bytes() > max_upload_bytes;
        if oversized {
            tracing::warn!(
                filename = %self.name,
                size_bytes = self.size_bytes(),
                limit_bytes = max_upload_bytes,
                "report file exceeds advisory upload limit"
            );
        }
        oversized
    }
}

fn has_accepted_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
}
