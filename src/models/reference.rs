//! Bibliographic record model for the citation pipeline.

use serde::{Deserialize, Serialize};

/// Structured metadata for one resolved citation
///
/// Built incrementally: base fields come from the bibliographic search,
/// open-access fields are filled only when a DOI was resolved. Never
/// persisted as structured data; flattened into the artifact text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    /// Paper title
    pub title: String,

    /// Authors as "Family, Given", semicolon-separated
    pub authors: String,

    /// Container/journal title
    pub journal: String,

    /// Publication year (print date preferred, online date as fallback)
    pub year: Option<i32>,

    /// Digital Object Identifier
    pub doi: Option<String>,

    /// Canonical publisher URL
    pub publisher_url: String,

    /// Open access status as reported by the lookup service
    pub oa_status: String,

    /// Best open-access PDF link, if one is known
    pub oa_pdf_url: Option<String>,

    /// Abstract text with embedded markup tags stripped
    pub abstract_text: Option<String>,
}

impl Reference {
    /// Create a new reference with the required title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: String::new(),
            journal: String::new(),
            year: None,
            doi: None,
            publisher_url: String::new(),
            oa_status: "unknown".to_string(),
            oa_pdf_url: None,
            abstract_text: None,
        }
    }

    /// Returns the author names as a vector
    pub fn author_list(&self) -> Vec<&str> {
        self.authors
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Builder for constructing Reference objects
#[derive(Debug, Clone)]
pub struct ReferenceBuilder {
    reference: Reference,
}

impl ReferenceBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            reference: Reference::new(title),
        }
    }

    pub fn authors(mut self, authors: impl Into<String>) -> Self {
        self.reference.authors = authors.into();
        self
    }

    pub fn journal(mut self, journal: impl Into<String>) -> Self {
        self.reference.journal = journal.into();
        self
    }

    pub fn year(mut self, year: Option<i32>) -> Self {
        self.reference.year = year;
        self
    }

    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        let doi = doi.into();
        if !doi.is_empty() {
            self.reference.doi = Some(doi);
        }
        self
    }

    pub fn publisher_url(mut self, url: impl Into<String>) -> Self {
        self.reference.publisher_url = url.into();
        self
    }

    pub fn oa_status(mut self, status: impl Into<String>) -> Self {
        self.reference.oa_status = status.into();
        self
    }

    pub fn oa_pdf_url(mut self, url: impl Into<String>) -> Self {
        self.reference.oa_pdf_url = Some(url.into());
        self
    }

    pub fn abstract_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.reference.abstract_text = Some(text);
        }
        self
    }

    pub fn build(self) -> Reference {
        self.reference
    }
}
