//! Source item model representing one unit of input to the pipeline.

use serde::{Deserialize, Serialize};

/// Where a source item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// A path on the local filesystem
    LocalPath,
    /// A web URL
    Url,
    /// A free-text bibliographic citation
    CitationText,
}

/// One unit of input: a file path, a URL, or a citation line.
///
/// Immutable once read from the input list or directory; consumed exactly
/// once by its pipeline and never persisted itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceItem {
    /// Where the identifier came from
    pub origin: Origin,

    /// The path, URL, or citation string exactly as given
    pub raw: String,
}

impl SourceItem {
    pub fn new(origin: Origin, raw: impl Into<String>) -> Self {
        Self {
            origin,
            raw: raw.into(),
        }
    }
}

impl std::fmt::Display for SourceItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// The extraction strategy an identifier routes to
///
/// Derived purely from the raw identifier, never stored independently.
/// Every call site matches exhaustively, so adding a kind is a
/// compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Pdf,
    Docx,
    HtmlPage,
    PdfOverHttp,
    YoutubeLike,
    Citation,
    Unsupported,
}

impl SourceKind {
    /// Returns the display name of the kind
    pub fn name(&self) -> &str {
        match self {
            SourceKind::Pdf => "PDF",
            SourceKind::Docx => "DOCX",
            SourceKind::HtmlPage => "HTML page",
            SourceKind::PdfOverHttp => "PDF over HTTP",
            SourceKind::YoutubeLike => "YouTube video",
            SourceKind::Citation => "citation",
            SourceKind::Unsupported => "unsupported",
        }
    }

    /// Returns the kind identifier (for logging and report output)
    pub fn id(&self) -> &str {
        match self {
            SourceKind::Pdf => "pdf",
            SourceKind::Docx => "docx",
            SourceKind::HtmlPage => "html_page",
            SourceKind::PdfOverHttp => "pdf_over_http",
            SourceKind::YoutubeLike => "youtube_like",
            SourceKind::Citation => "citation",
            SourceKind::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The result of extracting text from one acquired item.
///
/// `text` is always a valid string even on failure; failure is communicated
/// via `error`, never by omission, so an artifact can always be produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    /// Extracted plain text (possibly empty)
    pub text: String,

    /// True if a size bound was hit
    pub truncated: bool,

    /// Human-readable failure description, if anything went wrong
    pub error: Option<String>,
}

impl Extraction {
    /// A clean extraction with no truncation or error
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            truncated: false,
            error: None,
        }
    }

    /// A failed extraction, keeping whatever text was accumulated before the fault
    pub fn failed(text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            truncated: false,
            error: Some(error.into()),
        }
    }

    /// Hard-truncate the text to `max_chars` characters, setting `truncated`
    /// when the bound is hit. The cutoff is character-exact, not
    /// sentence-aware.
    pub fn truncate_to(mut self, max_chars: usize) -> Self {
        if self.text.chars().count() > max_chars {
            self.text = self.text.chars().take(max_chars).collect();
            self.truncated = true;
        }
        self
    }
}
