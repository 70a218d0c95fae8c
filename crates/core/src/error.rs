use crate::constants::{MISSING_INPUT_MESSAGE, PROCESSING_FAILED_MESSAGE};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Neither a file nor any non-blank text was supplied.
    #[error("{}", MISSING_INPUT_MESSAGE)]
    MissingInput,
    #[error("unsupported file type for {filename} (accepted: .pdf, .png, .jpg, .jpeg)")]
    UnsupportedFileType { filename: String },
    #[error("a report is already being processed")]
    Busy,
    #[error("simplification failed: {0}")]
    Simplification(String),
    #[error("failed to read report file: {0}")]
    FileRead(std::io::Error),
}

impl ReportError {
    /// Message suitable for showing to the person who submitted the report.
    ///
    /// Validation failures are reported as-is; anything that went wrong while processing
    /// collapses to one generic retry message.
    pub fn user_message(&self) -> String {
        match self {
            ReportError::MissingInput
            | ReportError::UnsupportedFileType { .. }
            | ReportError::Busy
            | ReportError::InvalidInput(_) => self.to_string(),
            ReportError::Simplification(_) | ReportError::FileRead(_) => {
                PROCESSING_FAILED_MESSAGE.to_string()
            }
        }
    }
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;
