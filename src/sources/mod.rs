//! Clients for the external bibliographic services.
//!
//! The citation pipeline talks to two HTTP APIs: a bibliographic search
//! service (Crossref) that resolves a free-text citation into structured
//! metadata, and an open-access lookup service (Unpaywall) keyed by DOI.
//! Both clients keep a configurable API base so tests can point them at a
//! local mock server.

mod crossref;
mod unpaywall;

pub use crossref::CrossrefClient;
pub use unpaywall::{OpenAccess, UnpaywallClient};

/// Errors that can occur when talking to a bibliographic service
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (JSON payload)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// API error from the service
    #[error("API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
