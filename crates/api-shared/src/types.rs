//! Request and response types for the simplifier APIs.
//!
//! These mirror the core types in a JSON-friendly shape and carry OpenAPI schemas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use simplifier_core::{LineNode, Section, SimplifiedReport, View};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Loading,
    Login,
    Simplifier,
}

/// Which surface the front end should show.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionRes {
    pub view: ViewKind,
    pub email: Option<String>,
}

impl From<View> for SessionRes {
    fn from(view: View) -> Self {
        match view {
            View::Loading => SessionRes {
                view: ViewKind::Loading,
                email: None,
            },
            View::Login => SessionRes {
                view: ViewKind::Login,
                email: None,
            },
            View::Simplifier(user) => SessionRes {
                view: ViewKind::Simplifier,
                email: user.email,
            },
        }
    }
}

/// A file uploaded inline with a simplify request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadedFile {
    pub name: String,
    /// File content, standard base64.
    pub content_base64: String,
}

/// Either `file` or non-blank `text` must be present. A file wins if both are.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SimplifyReq {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub file: Option<UploadedFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParseReq {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeRes {
    KeyValuePair { key: String, value: String },
    NumberedItem { title: String, detail: String },
    BulletItem { key: Option<String>, text: String },
    Plain { text: String },
}

impl From<LineNode> for NodeRes {
    fn from(node: LineNode) -> Self {
        match node {
            LineNode::KeyValuePair { key, value } => NodeRes::KeyValuePair { key, value },
            LineNode::NumberedItem { title, detail } => NodeRes::NumberedItem { title, detail },
            LineNode::BulletItem { key, text } => NodeRes::BulletItem { key, text },
            LineNode::Plain { text } => NodeRes::Plain { text },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionRes {
    pub title: String,
    pub category: String,
    pub icon: String,
    pub gradient: String,
    pub content: String,
    pub nodes: Vec<NodeRes>,
}

impl From<&Section> for SectionRes {
    fn from(section: &Section) -> Self {
        let style = section.category.style();
        SectionRes {
            title: section.title.to_string(),
            category: section.category.to_string(),
            icon: style.icon.into(),
            gradient: style.gradient.into(),
            content: section.content.to_string(),
            nodes: section.nodes().into_iter().map(NodeRes::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParseRes {
    pub sections: Vec<SectionRes>,
}

impl ParseRes {
    pub fn from_sections(sections: &[Section]) -> Self {
        ParseRes {
            sections: sections.iter().map(SectionRes::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimplifyRes {
    pub report_id: Uuid,
    pub simplified_at: DateTime<Utc>,
    /// Raw simplifier output.
    pub output: String,
    pub sections: Vec<SectionRes>,
    pub disclaimer: String,
}

impl SimplifyRes {
    pub fn from_report(report: &SimplifiedReport) -> Self {
        let sections = simplifier_core::parse_sections(report.text.as_str());
        SimplifyRes {
            report_id: report.id,
            simplified_at: report.simplified_at,
            output: report.text.to_string(),
            sections: ParseRes::from_sections(&sections).sections,
            disclaimer: simplifier_core::constants::DISCLAIMER.into(),
        }
    }
}
