//! The report simplification boundary.
//!
//! Front ends hand a [`ReportInput`] to a [`ReportSimplifier`] and receive markdown-subset
//! text back, which [`crate::parse_sections`] turns into sections. The only implementation
//! shipped is [`MockSimplifier`], which waits a fixed delay and returns a canned report. A
//! real backend only needs to honour the same input and output contract.

use crate::config::CoreConfig;
use crate::text::NonEmptyText;
use crate::upload::ReportFile;
use crate::{ReportError, ReportResult};
use chrono::{DateTime, Utc};
use std::time::Duration;
use uuid::Uuid;

/// What the user submitted: an uploaded file or pasted text, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportInput {
    File(ReportFile),
    Text(NonEmptyText),
}

impl ReportInput {
    /// Picks the submission from the two input slots.
    ///
    /// A file takes precedence over text. Blank text counts as absent.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::MissingInput` when there is neither a file nor non-blank text.
    pub fn from_parts(text: Option<&str>, file: Option<ReportFile>) -> ReportResult<Self> {
        if let Some(file) = file {
            return Ok(ReportInput::File(file));
        }
        text.and_then(|t| NonEmptyText::new(t).ok())
            .map(ReportInput::Text)
            .ok_or(ReportError::MissingInput)
    }

    /// Short description for logs. Never includes report content.
    pub fn describe(&self) -> String {
        match self {
            ReportInput::File(file) => format!(
                "file {} ({}, {} bytes, sha256 {})",
                file.name(),
                file.media_type().unwrap_or("unknown type"),
                file.size_bytes(),
                file.sha256()
            ),
            ReportInput::Text(text) => format!("pasted text ({} chars)", text.as_str().len()),
        }
    }
}

/// Output of a completed simplification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SimplifiedReport {
    pub id: Uuid,
    pub simplified_at: DateTime<Utc>,
    /// Markdown-subset text ready for section parsing.
    pub text: NonEmptyText,
}

impl SimplifiedReport {
    pub fn new(text: NonEmptyText) -> Self {
        Self {
            id: Uuid::new_v4(),
            simplified_at: Utc::now(),
            text,
        }
    }
}

/// Turns a submitted report into simplified markdown-subset text.
#[async_trait::async_trait]
pub trait ReportSimplifier: Send + Sync {
    /// # Errors
    ///
    /// Returns `ReportError::Simplification` if the report could not be processed.
    async fn simplify(&self, input: &ReportInput) -> ReportResult<NonEmptyText>;
}

/// Stand-in simplifier: sleeps for a fixed delay and returns the same text for every input.
#[derive(Debug, Clone)]
pub struct MockSimplifier {
    delay: Duration,
    output: NonEmptyText,
}

impl MockSimplifier {
    pub fn new(delay: Duration, output: NonEmptyText) -> Self {
        Self { delay, output }
    }

    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(cfg.simulated_delay(), cfg.canned_output().clone())
    }
}

impl Default for MockSimplifier {
    fn default() -> Self {
        Self::from_config(&CoreConfig::default())
    }
}

#[async_trait::async_trait]
impl ReportSimplifier for MockSimplifier {
    async fn simplify(&self, input: &ReportInput) -> ReportResult<NonEmptyText> {
        tracing::debug!(
            input = %input.describe(),
            delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
            "simulating simplification"
        );
        tokio::time::sleep(self.delay).await;
        Ok(self.output.clone())
    }
}

/// Canned report returned by [`MockSimplifier`] unless configuration replaces it.
pub const CANNED_REPORT: &str = r#"### Abnormal Lab Values or Findings

1. **Hemoglobin**: 11.0 gms/dl (Normal range: M: 13.0 - 18.0 gms, F: 11.5 - 16.5 gms/dl)
   - **Explanation**: Hemoglobin is a protein in red blood cells that carries oxygen. A low level indicates anemia, which means your body may not be getting enough oxygen.
   - **Possible Conditions**: Anemia, nutritional deficiencies (like iron, vitamin B12, or folate), chronic disease.
   - **Severity**: Mild to moderate.
   - **Next Steps**: Further evaluation to determine the cause of anemia, including dietary assessment and possibly iron studies or vitamin levels.

2. **Absolute Eosinophil Count**: 460 cells/cumm (Normal range: 40-440 cells/cumm)
   - **Explanation**: Eosinophils are a type of white blood cell involved in allergic reactions and fighting parasites. An elevated count can indicate an allergic reaction or parasitic infection.
   - **Possible Conditions**: Allergies, asthma, parasitic infections, or certain autoimmune diseases.
   - **Severity**: Mild to moderate.
   - **Next Steps**: Allergy testing or stool tests for parasites may be recommended.

3. **S. Calcium**: 8.1 mg/dl (Normal range: 8.4 - 11.5 mg/dl)
   - **Explanation**: Calcium is essential for bone health and other bodily functions. A low level can affect bone density and muscle function.
   - **Possible Conditions**: Hypocalcemia, vitamin D deficiency, or parathyroid gland issues.
   - **Severity**: Mild.
   - **Next Steps**: Further tests to check vitamin D levels and parathyroid function, along with dietary assessment.

### Summary of Findings
- **Anemia** (mild to moderate)
- **Elevated Eosinophils** (mild to moderate)
- **Low Calcium** (mild)

### Disclaimer
This interpretation is for informational purposes only and should not be considered a diagnosis or a substitute for professional medical advice. Please consult a healthcare provider for a thorough evaluation and personalized recommendations."#;
