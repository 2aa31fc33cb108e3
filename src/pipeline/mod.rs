//! The three ingestion pipelines.
//!
//! All three share one shape, acquire -> classify -> extract -> persist,
//! differing only in how content is acquired and what signal drives
//! classification. Items are processed strictly sequentially and
//! independently; a failing item degrades to an error-bearing artifact (or,
//! for an unmatched citation, a skip) and never halts the run. Only
//! unrecoverable output-directory I/O errors propagate.

pub mod files;
pub mod refs;
pub mod urls;

use thiserror::Error;

use crate::fetch::FetchError;
use crate::sources::SourceError;

/// Errors that terminate a pipeline run.
///
/// Per-item failures never surface here; they become error-bearing
/// artifacts or skips recorded in the run report.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Output-directory or input-file I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be constructed
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// API client could not be constructed
    #[error("{0}")]
    Source(#[from] SourceError),
}
