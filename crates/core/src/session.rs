//! Report submission session.
//!
//! Holds the state behind the upload form: pasted text, selected file, loading flag, last
//! output and last error. Selecting a file clears the text and editing the text clears the
//! file. Only one submission may be in flight; [`SimplifierSession::begin`] refuses to start
//! another while loading.

use crate::constants::PROCESSING_FAILED_MESSAGE;
use crate::sections::{parse_sections, Section};
use crate::simplifier::{ReportInput, ReportSimplifier, SimplifiedReport};
use crate::text::NonEmptyText;
use crate::upload::ReportFile;
use crate::{ReportError, ReportResult};

#[derive(Debug, Default)]
pub struct SimplifierSession {
    report_text: String,
    file: Option<ReportFile>,
    loading: bool,
    output: Option<SimplifiedReport>,
    error: Option<String>,
}

impl SimplifierSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pasted text and drops any selected file.
    pub fn set_report_text(&mut self, text: impl Into<String>) {
        self.report_text = text.into();
        self.file = None;
    }

    /// Selects a file and clears the pasted text.
    pub fn select_file(&mut self, file: ReportFile) {
        self.file = Some(file);
        self.report_text.clear();
    }

    pub fn report_text(&self) -> &str {
        &self.report_text
    }

    pub fn file(&self) -> Option<&ReportFile> {
        self.file.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn output(&self) -> Option<&SimplifiedReport> {
        self.output.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sections of the current output, empty when there is none.
    pub fn sections(&self) -> Vec<Section> {
        self.output
            .as_ref()
            .map(|report| parse_sections(report.text.as_str()))
            .unwrap_or_default()
    }

    /// Validates the form and enters the loading state.
    ///
    /// On success the previous output and error are cleared and the input to simplify is
    /// returned. With no input, the validation message is recorded and nothing else changes.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Busy` while a submission is in flight and
    /// `ReportError::MissingInput` when there is neither a file nor non-blank text.
    pub fn begin(&mut self) -> ReportResult<ReportInput> {
        if self.loading {
            return Err(ReportError::Busy);
        }

        let input = match ReportInput::from_parts(Some(&self.report_text), self.file.clone()) {
            Ok(input) => input,
            Err(e) => {
                self.error = Some(e.user_message());
                return Err(e);
            }
        };

        self.error = None;
        self.output = None;
        self.loading = true;
        Ok(input)
    }

    /// Leaves the loading state with the simplifier's result.
    ///
    /// Failures are logged and surfaced as the generic processing message; no partial output
    /// is kept.
    pub fn finish(&mut self, result: ReportResult<NonEmptyText>) {
        self.loading = false;
        match result {
            Ok(text) => {
                let report = SimplifiedReport::new(text);
                tracing::info!(report_id = %report.id, "report simplified");
                self.output = Some(report);
            }
            Err(e) => {
                tracing::error!("Simplify report error: {:?}", e);
                self.output = None;
                self.error = Some(PROCESSING_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Runs a whole submission: validate, simplify, record the outcome.
    ///
    /// # Errors
    ///
    /// Returns the validation error from [`SimplifierSession::begin`]. Simplifier failures are
    /// recorded on the session rather than returned.
    pub async fn submit(&mut self, simplifier: &dyn ReportSimplifier) -> ReportResult<()> {
        let input = self.begin()?;
        tracing::info!(input = %input.describe(), "simplifying report");
        let result = simplifier.simplify(&input).await;
        self.finish(result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MISSING_INPUT_MESSAGE;
    use crate::simplifier::MockSimplifier;
    use std::time::Duration;

    struct FailingSimplifier;

    #[async_trait::async_trait]
    impl ReportSimplifier for FailingSimplifier {
        async fn simplify(&self, _input: &ReportInput) -> ReportResult<NonEmptyText> {
            Err(ReportError::Simplification("backend unavailable".into()))
        }
    }

    fn instant_mock() -> MockSimplifier {
        MockSimplifier::new(
            Duration::ZERO,
            NonEmptyText::new("### Summary\nAll values normal.").unwrap(),
        )
    }

    #[test]
    fn test_text_and_file_are_exclusive() {
        let mut session = SimplifierSession::new();
        session.set_report_text("Hb 11.0");
        session.select_file(ReportFile::new("bloods.pdf", vec![1]).unwrap());
        assert_eq!(session.report_text(), "");
        assert!(session.file().is_some());

        session.set_report_text("Hb 11.0");
        assert!(session.file().is_none());
        assert_eq!(session.report_text(), "Hb 11.0");
    }

    #[test]
    fn test_begin_without_input_sets_validation_error() {
        let mut session = SimplifierSession::new();
        session.set_report_text("   ");

        assert!(matches!(session.begin(), Err(ReportError::MissingInput)));
        assert!(!session.is_loading());
        assert_eq!(session.error(), Some(MISSING_INPUT_MESSAGE));
        assert!(session.output().is_none());
    }

    #[test]
    fn test_begin_rejects_second_submission() {
        let mut session = SimplifierSession::new();
        session.set_report_text("Hb 11.0");
        session.begin().unwrap();
        assert!(session.is_loading());
        assert!(matches!(session.begin(), Err(ReportError::Busy)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_text_loads_then_outputs() {
        let simplifier = MockSimplifier::new(
            Duration::from_secs(2),
            NonEmptyText::new("### Summary\nAll values normal.").unwrap(),
        );
        let mut session = SimplifierSession::new();
        session.set_report_text("Hemoglobin 11.0 gms/dl");

        let input = session.begin().unwrap();
        assert!(session.is_loading());
        assert!(session.output().is_none());

        let result = simplifier.simplify(&input).await;
        session.finish(result);

        assert!(!session.is_loading());
        assert!(session.error().is_none());
        assert_eq!(session.sections().len(), 1);
        assert_eq!(session.sections()[0].title.as_str(), "Summary");
    }

    #[tokio::test]
    async fn test_submit_with_file() {
        let mut session = SimplifierSession::new();
        session.select_file(ReportFile::new("scan.jpg", vec![0xFF, 0xD8, 0xFF]).unwrap());

        session.submit(&instant_mock()).await.unwrap();

        assert!(session.output().is_some());
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn test_failure_clears_output_and_sets_generic_error() {
        let mut session = SimplifierSession::new();
        session.set_report_text("Hb 11.0");
        session.submit(&instant_mock()).await.unwrap();
        assert!(session.output().is_some());

        session.submit(&FailingSimplifier).await.unwrap();

        assert!(!session.is_loading());
        assert!(session.output().is_none());
        assert!(session.sections().is_empty());
        assert_eq!(session.error(), Some(PROCESSING_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_retry_after_validation_error() {
        let mut session = SimplifierSession::new();
        assert!(session.submit(&instant_mock()).await.is_err());
        assert_eq!(session.error(), Some(MISSING_INPUT_MESSAGE));

        session.set_report_text("Hb 11.0");
        session.submit(&instant_mock()).await.unwrap();
        assert!(session.error().is_none());
        assert!(session.output().is_some());
    }
}
