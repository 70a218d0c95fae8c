//! Section parsing for simplifier output.
//!
//! Simplifier output is a flat block of text in a small markdown subset. Sections open with a
//! level-3 heading (`### Title`) and run until the next heading or the end of input:
//!
//! ```markdown
//! ### Abnormal Lab Values or Findings
//!
//! 1. **Hemoglobin**: 11.0 gms/dl
//!    - **Severity**: Mild to moderate.
//!
//! ### Disclaimer
//! This interpretation is for informational purposes only.
//! ```
//!
//! Parsing is a single linear scan. Text before the first heading is discarded, blank lines
//! never reach a section body, and a heading with no body is dropped rather than emitted empty.

use crate::constants::HEADING_MARKER;
use crate::nodes::{content_nodes, LineNode};
use crate::text::NonEmptyText;

/// Kind of a section, derived from keywords in its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Condition,
    Findings,
    Explanation,
    Precautions,
    Consult,
}

/// Title keywords in priority order. The first rule with a matching keyword wins.
const CATEGORY_RULES: [(&[&str], Category); 5] = [
    (&["condition", "diagnosis"], Category::Condition),
    (&["finding", "abnormal"], Category::Findings),
    (&["explanation", "summary"], Category::Explanation),
    (&["precaution", "prevention"], Category::Precautions),
    (&["consult", "next"], Category::Consult),
];

impl Category {
    /// Classifies a section title by case-insensitive keyword substring match.
    ///
    /// Titles that match no rule are treated as [`Category::Explanation`].
    pub fn from_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        CATEGORY_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Explanation)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Condition => "condition",
            Category::Findings => "findings",
            Category::Explanation => "explanation",
            Category::Precautions => "precautions",
            Category::Consult => "consult",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A titled, classified block of simplifier output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Section {
    /// Heading text with the marker stripped.
    pub title: NonEmptyText,
    /// Non-blank body lines joined by newlines, trimmed at both ends.
    pub content: NonEmptyText,
    pub category: Category,
}

impl Section {
    fn new(title: NonEmptyText, content: NonEmptyText) -> Self {
        let category = Category::from_title(title.as_str());
        Self {
            title,
            content,
            category,
        }
    }

    /// Classifies each body line into a render node.
    pub fn nodes(&self) -> Vec<LineNode> {
        content_nodes(self.content.as_str())
    }
}

/// Returns the heading title if `line` is a section heading.
///
/// Only the exact `###` level counts; `####` and deeper are ordinary body text. The title may
/// be blank, in which case the heading opens nothing.
fn heading_title(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(HEADING_MARKER)?;
    if rest.starts_with('#') {
        return None;
    }
    Some(rest.trim())
}

/// Accumulates body lines for the heading currently open.
#[derive(Default)]
struct PendingSection<'a> {
    title: Option<NonEmptyText>,
    lines: Vec<&'a str>,
}

impl<'a> PendingSection<'a> {
    /// Emits the open section if it has a title and at least one body line.
    fn flush(&mut self, sections: &mut Vec<Section>) {
        let title = self.title.take();
        let lines = std::mem::take(&mut self.lines);

        let Some(title) = title else {
            return;
        };
        match NonEmptyText::new(lines.join("\n")) {
            Ok(content) => sections.push(Section::new(title, content)),
            Err(_) => tracing::debug!(title = %title, "dropping heading without content"),
        }
    }
}

/// Splits simplifier output into sections.
///
/// Input without any heading yields an empty vector.
pub fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut pending = PendingSection::default();

    for line in text.lines() {
        if let Some(title) = heading_title(line) {
            pending.flush(&mut sections);
            pending.title = NonEmptyText::new(title).ok();
        } else if !line.trim().is_empty() && pending.title.is_some() {
            pending.lines.push(line);
        }
    }
    pending.flush(&mut sections);

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_heading_is_empty() {
        assert!(parse_sections("").is_empty());
        assert!(parse_sections("Hemoglobin is low.\n- **Severity**: mild").is_empty());
        assert!(parse_sections("## Level two\ncontent\n# Level one\nmore").is_empty());
    }

    #[test]
    fn test_parse_single_section() {
        let sections = parse_sections("### Disclaimer\nFor information only.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title.as_str(), "Disclaimer");
        assert_eq!(sections[0].content.as_str(), "For information only.");
        assert_eq!(sections[0].category, Category::Explanation);
    }

    #[test]
    fn test_parse_drops_heading_without_content() {
        let sections = parse_sections("### First\n### Second\nbody");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title.as_str(), "Second");

        let sections = parse_sections("### First\n\n   \n\t\n### Second\nbody\n### Last\n\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title.as_str(), "Second");
    }

    #[test]
    fn test_parse_discards_preamble() {
        let sections = parse_sections("Report for patient\nSummary below\n### Summary\nAll fine");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content.as_str(), "All fine");
    }

    #[test]
    fn test_parse_drops_blank_lines_between_content() {
        let sections = parse_sections("### Findings\n\nline one\n\n\nline two\n\n");
        assert_eq!(sections[0].content.as_str(), "line one\nline two");
    }

    #[test]
    fn test_parse_keeps_inner_indentation() {
        let sections = parse_sections("###Results\n   first\n   - **Key**: value\n");
        assert_eq!(sections[0].title.as_str(), "Results");
        // Leading whitespace of the first line is trimmed with the joined body.
        assert_eq!(sections[0].content.as_str(), "first\n   - **Key**: value");
    }

    #[test]
    fn test_parse_deeper_headings_are_content() {
        let sections = parse_sections("### Findings\n#### Detail\n## Other\nbody");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content.as_str(), "#### Detail\n## Other\nbody");
    }

    #[test]
    fn test_parse_blank_title_opens_nothing() {
        let sections = parse_sections("###   \norphan line\n### Next Steps\nSee a GP");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title.as_str(), "Next Steps");
        assert_eq!(sections[0].category, Category::Consult);
    }

    #[test]
    fn test_parse_handles_crlf() {
        let sections = parse_sections("### Summary of Findings\r\n- **Anemia** (mild)\r\n");
        assert_eq!(sections[0].title.as_str(), "Summary of Findings");
        assert_eq!(sections[0].content.as_str(), "- **Anemia** (mild)");

        let sections = parse_sections("### Findings\r\n- **A**: x\r\nplain\r\n- **B**: y\r\n");
        assert_eq!(sections[0].content.as_str(), "- **A**: x\nplain\n- **B**: y");
        assert_eq!(
            sections[0].nodes(),
            vec![
                LineNode::KeyValuePair {
                    key: "A".into(),
                    value: "x".into()
                },
                LineNode::Plain {
                    text: "plain".into()
                },
                LineNode::KeyValuePair {
                    key: "B".into(),
                    value: "y".into()
                },
            ]
        );
    }

    #[test]
    fn test_category_priority_order() {
        assert_eq!(
            Category::from_title("Abnormal Lab Values or Findings"),
            Category::Findings
        );
        assert_eq!(Category::from_title("Summary of Findings"), Category::Findings);
        assert_eq!(Category::from_title("Disclaimer"), Category::Explanation);
        assert_eq!(Category::from_title("DIAGNOSIS"), Category::Condition);
        assert_eq!(Category::from_title("Condition summary"), Category::Condition);
        assert_eq!(Category::from_title("Prevention tips"), Category::Precautions);
        assert_eq!(Category::from_title("What happens next"), Category::Consult);
        assert_eq!(Category::from_title("Plain Explanation"), Category::Explanation);
    }

    #[test]
    fn test_section_nodes_single_plain_line() {
        let sections = parse_sections("### Disclaimer\nConsult a healthcare provider.");
        assert_eq!(
            sections[0].nodes(),
            vec![LineNode::Plain {
                text: "Consult a healthcare provider.".into()
            }]
        );
    }
}
