//! # paperharvest
//!
//! Ingests heterogeneous source material (local document files, web URLs,
//! and free-text bibliographic references) and normalizes each item into a
//! plain-text artifact plus provenance metadata under one output directory.
//!
//! ## Architecture
//!
//! Three pipelines share one shape, acquire -> classify -> extract ->
//! persist:
//!
//! - [`models`]: Core data structures (SourceItem, Extraction, Reference,
//!   RunReport)
//! - [`classify`]: Pure extraction-strategy classification
//! - [`fetch`]: HTTP acquisition (buffered HTML, streamed PDF)
//! - [`extract`]: PDF, DOCX, and HTML text extraction
//! - [`sources`]: Bibliographic search and open-access lookup clients
//! - [`artifact`]: Filename derivation and artifact persistence
//! - [`pipeline`]: The files, urls, and refs pipelines
//! - [`config`]: Configuration management

pub mod artifact;
pub mod classify;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod sources;

// Re-export commonly used types
pub use classify::classify;
pub use models::{Extraction, Reference, RunReport, SourceKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
