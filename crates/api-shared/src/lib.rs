//! # API Shared
//!
//! Shared utilities and definitions for the report simplifier APIs.
//!
//! Contains:
//! - Request/response types with OpenAPI schemas (`types` module)
//! - Shared services like `HealthService`
//! - API-key authentication feeding the core view gate
//!
//! Used by `api-rest` and the workspace runner.

pub mod auth;
pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
