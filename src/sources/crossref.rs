//! Crossref bibliographic search client.
//!
//! Uses the Crossref REST API's free-text bibliographic query to resolve a
//! citation line into structured metadata, requesting exactly one best
//! match. API documentation: <https://api.crossref.org>

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;

use crate::models::{Reference, ReferenceBuilder};
use crate::sources::SourceError;

const CROSSREF_API_BASE: &str = "https://api.crossref.org";

/// Crossref abstracts often come back as JATS XML; strip embedded tags.
fn markup_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

/// Crossref search client
#[derive(Debug, Clone)]
pub struct CrossrefClient {
    client: reqwest::Client,
    api_base: String,
}

impl CrossrefClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: CROSSREF_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API base (used by tests)
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Resolve a free-text citation to its best bibliographic match.
    ///
    /// Returns `Ok(None)` when the API responds successfully but has no
    /// candidate record for the citation.
    pub async fn search_bibliographic(
        &self,
        citation: &str,
    ) -> Result<Option<Reference>, SourceError> {
        let url = format!(
            "{}/works?query.bibliographic={}&rows=1",
            self.api_base,
            urlencoding::encode(citation)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Crossref: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Crossref API returned status: {}",
                response.status()
            )));
        }

        let data: WorksResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse Crossref JSON: {}", e)))?;

        Ok(data.message.items.into_iter().next().map(reference_from_work))
    }
}

/// Map one Crossref work into a [`Reference`].
///
/// Authors are joined as "Family, Given" per author and semicolon-joined
/// across authors. The publication year prefers the print date and falls
/// back to the online date.
fn reference_from_work(work: Work) -> Reference {
    let title = work.title.first().cloned().unwrap_or_default();
    let journal = work.container_title.first().cloned().unwrap_or_default();

    let authors = work
        .author
        .iter()
        .map(|a| {
            format!(
                "{}, {}",
                a.family.as_deref().unwrap_or_default(),
                a.given.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    let year = work
        .published_print
        .as_ref()
        .and_then(DateParts::year)
        .or_else(|| work.published_online.as_ref().and_then(DateParts::year));

    let abstract_text = work
        .r#abstract
        .as_deref()
        .map(|raw| markup_tag_pattern().replace_all(raw, "").trim().to_string())
        .unwrap_or_default();

    ReferenceBuilder::new(title)
        .authors(authors)
        .journal(journal)
        .year(year)
        .doi(work.doi.unwrap_or_default())
        .publisher_url(work.url.unwrap_or_default())
        .abstract_text(abstract_text)
        .build()
}

// ===== Crossref API Types =====

#[derive(Debug, Deserialize)]
struct WorksResponse {
    message: WorksMessage,
}

#[derive(Debug, Deserialize)]
struct WorksMessage {
    #[serde(default)]
    items: Vec<Work>,
}

#[derive(Debug, Deserialize)]
struct Work {
    #[serde(default)]
    title: Vec<String>,

    #[serde(rename = "DOI")]
    doi: Option<String>,

    #[serde(rename = "URL")]
    url: Option<String>,

    r#abstract: Option<String>,

    #[serde(default)]
    author: Vec<Contributor>,

    #[serde(rename = "container-title", default)]
    container_title: Vec<String>,

    #[serde(rename = "published-print")]
    published_print: Option<DateParts>,

    #[serde(rename = "published-online")]
    published_online: Option<DateParts>,
}

#[derive(Debug, Deserialize)]
struct Contributor {
    family: Option<String>,
    given: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DateParts {
    #[serde(rename = "date-parts", default)]
    date_parts: Vec<Vec<Option<i32>>>,
}

impl DateParts {
    fn year(&self) -> Option<i32> {
        self.date_parts.first().and_then(|parts| parts.first()).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_WORK: &str = r#"{
        "title": ["Sleep-dependent memory consolidation"],
        "DOI": "10.1038/nature04286",
        "URL": "https://doi.org/10.1038/nature04286",
        "abstract": "<jats:p>Sleep benefits <jats:italic>memory</jats:italic>.</jats:p>",
        "author": [
            {"family": "Stickgold", "given": "Robert"},
            {"family": "Walker", "given": "Matthew"}
        ],
        "container-title": ["Nature"],
        "published-print": {"date-parts": [[2005, 10, 27]]}
    }"#;

    #[test]
    fn test_reference_from_work() {
        let work: Work = serde_json::from_str(SAMPLE_WORK).unwrap();
        let reference = reference_from_work(work);

        assert_eq!(reference.title, "Sleep-dependent memory consolidation");
        assert_eq!(reference.authors, "Stickgold, Robert; Walker, Matthew");
        assert_eq!(reference.journal, "Nature");
        assert_eq!(reference.year, Some(2005));
        assert_eq!(reference.doi.as_deref(), Some("10.1038/nature04286"));
        assert_eq!(
            reference.abstract_text.as_deref(),
            Some("Sleep benefits memory.")
        );
    }

    #[test]
    fn test_online_date_fallback() {
        let work: Work = serde_json::from_str(
            r#"{"title": ["T"], "published-online": {"date-parts": [[2019]]}}"#,
        )
        .unwrap();
        assert_eq!(reference_from_work(work).year, Some(2019));
    }

    #[test]
    fn test_sparse_work() {
        let work: Work = serde_json::from_str(r#"{}"#).unwrap();
        let reference = reference_from_work(work);

        assert_eq!(reference.title, "");
        assert!(reference.doi.is_none());
        assert!(reference.year.is_none());
        assert!(reference.abstract_text.is_none());
    }
}
