//! HTTP acquisition for the URL pipeline.
//!
//! Two retrieval modes: a buffered GET for HTML pages (bounded by the
//! shorter HTML timeout) and a streamed GET for remote PDFs, written into a
//! scoped temporary file that is removed on every path. Failures never
//! propagate past the item boundary; the pipelines convert them into
//! error-bearing artifact bodies so every failure is auditable after the
//! run.

use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::config::HttpConfig;
use crate::models::SourceKind;

/// Errors that can occur while acquiring remote content
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP acquirer shared by one pipeline run
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    html_timeout: Duration,
    pdf_timeout: Duration,
}

impl Fetcher {
    pub fn new(http: &HttpConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(&http.user_agent)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            html_timeout: http.html_timeout(),
            pdf_timeout: http.pdf_timeout(),
        })
    }

    /// Buffered GET for an HTML page. Non-2xx statuses are errors.
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(self.html_timeout)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }

    /// Streamed GET for a remote PDF, written chunk by chunk into a
    /// temporary file. The file is deleted when the returned handle drops,
    /// on success and failure alike.
    pub async fn fetch_pdf_to_temp(&self, url: &str) -> Result<NamedTempFile, FetchError> {
        let mut response = self
            .client
            .get(url)
            .timeout(self.pdf_timeout)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let mut temp = NamedTempFile::new()?;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?
        {
            temp.write_all(&chunk)?;
        }
        temp.flush()?;

        Ok(temp)
    }
}

/// Fixed advisory text for content that cannot be automatically extracted.
///
/// Returns `None` for kinds that have a real extraction path.
pub fn advisory_text(kind: SourceKind, identifier: &str) -> Option<String> {
    match kind {
        SourceKind::YoutubeLike => Some(format!(
            "YOUTUBE VIDEO: {}\nPlease view the content manually or use a transcript extraction tool.",
            identifier
        )),
        SourceKind::Unsupported => Some(format!(
            "UNSUPPORTED OR RESTRICTED CONTENT: {}\nManual review may be required.",
            identifier
        )),
        SourceKind::Pdf
        | SourceKind::Docx
        | SourceKind::HtmlPage
        | SourceKind::PdfOverHttp
        | SourceKind::Citation => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_for_youtube() {
        let text = advisory_text(SourceKind::YoutubeLike, "https://youtu.be/abc123").unwrap();
        assert!(text.starts_with("YOUTUBE VIDEO: https://youtu.be/abc123"));
        assert!(text.contains("manually"));
    }

    #[test]
    fn test_advisory_for_unsupported() {
        let text = advisory_text(SourceKind::Unsupported, "ftp://host/f").unwrap();
        assert!(text.starts_with("UNSUPPORTED OR RESTRICTED CONTENT: ftp://host/f"));
    }

    #[test]
    fn test_no_advisory_for_extractable_kinds() {
        assert!(advisory_text(SourceKind::HtmlPage, "https://example.com").is_none());
        assert!(advisory_text(SourceKind::PdfOverHttp, "https://example.com/a.pdf").is_none());
    }
}
