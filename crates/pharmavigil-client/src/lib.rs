//! Client library for the report extraction backend.
//!
//! The backend exposes three endpoints (`GET /reports`,
//! `POST /process-report`, `POST /translate`) and owns all extraction,
//! translation, and persistence logic. This crate provides the typed wire
//! models, a thin [`ApiClient`], and the severity-distribution projection
//! used by the history chart. Nothing here keeps local state: every call is
//! a fresh round-trip and responses replace prior data wholesale.

pub mod api;
pub mod model;
pub mod stats;

pub use api::{ApiClient, ApiError};
pub use model::{ExtractionResult, HistoryEntry, Language, Severity, Translation};
pub use stats::SeverityDistribution;
