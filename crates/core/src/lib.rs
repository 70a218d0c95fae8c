//! # Simplifier Core
//!
//! Core logic for the medical report simplifier:
//! - Parsing simplifier output into titled, categorised sections
//! - Classifying section lines into render nodes
//! - The `ReportSimplifier` boundary and its mock implementation
//! - Submission session state and the authentication gate
//!
//! **No API concerns**: HTTP servers, API keys and request/response types belong in
//! `api-rest` or `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod gate;
pub mod nodes;
pub mod presentation;
pub mod sections;
pub mod session;
pub mod simplifier;
pub mod text;
pub mod upload;

pub use config::CoreConfig;
pub use error::{ReportError, ReportResult};
pub use gate::{gate, AuthProvider, StaticAuth, UserInfo, View};
pub use nodes::{classify_line, content_nodes, LineNode};
pub use presentation::{render_text, CategoryStyle};
pub use sections::{parse_sections, Category, Section};
pub use session::SimplifierSession;
pub use simplifier::{MockSimplifier, ReportInput, ReportSimplifier, SimplifiedReport};
pub use text::{NonEmptyText, TextError};
pub use upload::ReportFile;
