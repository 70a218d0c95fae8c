//! Presentation of parsed sections.
//!
//! Each [`Category`] has a fixed icon and header gradient used by the web front end, and the
//! same sections can be rendered as plain text for terminals.

use crate::constants::DISCLAIMER;
use crate::nodes::LineNode;
use crate::sections::{Category, Section};

/// Visual treatment of a section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    /// Icon identifier from the front end's icon set.
    pub icon: &'static str,
    /// Header gradient as a pair of colour stops.
    pub gradient: &'static str,
}

impl Category {
    pub fn style(&self) -> CategoryStyle {
        let (icon, gradient) = match self {
            Category::Condition => ("alert-circle", "from-red-500 to-orange-500"),
            Category::Findings => ("activity", "from-blue-500 to-cyan-500"),
            Category::Explanation => ("info", "from-gray-500 to-slate-500"),
            Category::Precautions => ("shield", "from-green-500 to-emerald-500"),
            Category::Consult => ("stethoscope", "from-teal-500 to-blue-500"),
        };
        CategoryStyle { icon, gradient }
    }
}

const BULLET_GLYPH: char = '•';
const DIVIDER: &str = "────────";

/// Renders sections as indented plain text followed by the standing disclaimer.
///
/// Numbered items get a divider beneath them, bullets a glyph, and key/value pairs an
/// upper-cased key line above the value.
pub fn render_text(sections: &[Section]) -> String {
    let mut out = String::new();

    for section in sections {
        out.push_str(&format!(
            "[{}] {}\n",
            section.category.style().icon,
            section.title
        ));
        for node in section.nodes() {
            render_node(&mut out, &node);
        }
        out.push('\n');
    }

    out.push_str(&format!("Disclaimer: {}\n", DISCLAIMER));
    out
}

fn render_node(out: &mut String, node: &LineNode) {
    match node {
        LineNode::KeyValuePair { key, value } => {
            out.push_str(&format!("  {}\n    {}\n", key.to_uppercase(), value));
        }
        LineNode::NumberedItem { title, detail } => {
            out.push_str(&format!("  {}\n    {}\n  {}\n", title, detail, DIVIDER));
        }
        LineNode::BulletItem {
            key: Some(key),
            text,
        } => {
            out.push_str(&format!("  {} {}: {}\n", BULLET_GLYPH, key, text));
        }
        LineNode::BulletItem { key: None, text } => {
            out.push_str(&format!("  {} {}\n", BULLET_GLYPH, text));
        }
        LineNode::Plain { text } => {
            out.push_str(&format!("  {}\n", text.trim()));
        }
    }
}
