//! Unpaywall open-access lookup client.
//!
//! Queries the Unpaywall API for the open-access status of a resolved DOI.
//! The API requires an email address (free, no key needed).
//! API documentation: <https://unpaywall.org/api/v2>

use serde::Deserialize;
use std::time::Duration;

use crate::sources::SourceError;

const UNPAYWALL_API_BASE: &str = "https://api.unpaywall.org/v2";

/// Open-access information for one DOI
#[derive(Debug, Clone)]
pub struct OpenAccess {
    /// Status as reported by the service (e.g. "gold", "green", "closed")
    pub status: String,

    /// Direct link to the best known open-access PDF, if any
    pub pdf_url: Option<String>,
}

/// Unpaywall lookup client
#[derive(Debug, Clone)]
pub struct UnpaywallClient {
    client: reqwest::Client,
    api_base: String,
    email: String,
}

impl UnpaywallClient {
    pub fn new(timeout: Duration, email: &str) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: UNPAYWALL_API_BASE.to_string(),
            email: email.to_string(),
        })
    }

    /// Point the client at a different API base (used by tests)
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Look up the open-access status for a DOI.
    ///
    /// Callers treat this as strictly best-effort: any error degrades the
    /// record to an "unknown" status and never blocks producing it.
    pub async fn lookup(&self, doi: &str) -> Result<OpenAccess, SourceError> {
        let clean_doi = doi
            .replace("https://doi.org/", "")
            .replace("doi:", "")
            .trim()
            .to_string();

        let url = format!(
            "{}/{}?email={}",
            self.api_base,
            urlencoding::encode(&clean_doi),
            urlencoding::encode(&self.email)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to lookup DOI in Unpaywall: {}", e)))?;

        if response.status() == 404 {
            return Err(SourceError::NotFound(format!(
                "DOI not found in Unpaywall: {}",
                doi
            )));
        }

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Unpaywall API returned status: {}",
                response.status()
            )));
        }

        let data: UnpaywallResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse Unpaywall response: {}", e)))?;

        Ok(OpenAccess {
            status: data.oa_status.unwrap_or_else(|| "unknown".to_string()),
            pdf_url: data
                .best_oa_location
                .and_then(|location| location.url_for_pdf),
        })
    }
}

// ===== Unpaywall API Types =====

#[derive(Debug, Deserialize)]
struct UnpaywallResponse {
    oa_status: Option<String>,
    best_oa_location: Option<OaLocation>,
}

#[derive(Debug, Deserialize)]
struct OaLocation {
    url_for_pdf: Option<String>,
}
