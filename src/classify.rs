//! Extraction-strategy classification for raw identifiers.
//!
//! Classification is a pure, total function over the identifier string:
//! file-suffix and substring heuristics, no content-type negotiation and no
//! network calls. A mislabeled extension routes to the wrong extractor and
//! yields garbled or empty text rather than a hard error; that is accepted
//! behavior.
//!
//! [`SourceKind::Citation`] is assigned by origin (the references file), not
//! by this function.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::SourceKind;

/// Matches a `.pdf` path component at the end of a URL, with an optional
/// query string after it (e.g. `https://host/paper.pdf?download=1`).
fn pdf_with_query_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\.pdf(\?|$)").expect("valid regex"))
}

fn is_http_url(identifier: &str) -> bool {
    identifier.starts_with("http://") || identifier.starts_with("https://")
}

fn has_suffix(identifier: &str, suffix: &str) -> bool {
    identifier.to_ascii_lowercase().ends_with(suffix)
}

/// Decide which extraction strategy applies to an identifier.
///
/// Rules, in priority order:
///
/// 1. `.pdf` suffix (case-insensitive): [`SourceKind::PdfOverHttp`] for URLs,
///    [`SourceKind::Pdf`] for local paths.
/// 2. `.docx` suffix: [`SourceKind::Docx`].
/// 3. `youtube.com` / `youtu.be` substring: [`SourceKind::YoutubeLike`].
/// 4. Trailing `.pdf` with an optional query string: [`SourceKind::PdfOverHttp`].
/// 5. An HTTP(S) scheme prefix: [`SourceKind::HtmlPage`].
/// 6. Anything else: [`SourceKind::Unsupported`].
pub fn classify(identifier: &str) -> SourceKind {
    if has_suffix(identifier, ".pdf") {
        if is_http_url(identifier) {
            return SourceKind::PdfOverHttp;
        }
        return SourceKind::Pdf;
    }

    if has_suffix(identifier, ".docx") {
        return SourceKind::Docx;
    }

    if identifier.contains("youtube.com") || identifier.contains("youtu.be") {
        return SourceKind::YoutubeLike;
    }

    if pdf_with_query_pattern().is_match(identifier) {
        return SourceKind::PdfOverHttp;
    }

    if is_http_url(identifier) {
        return SourceKind::HtmlPage;
    }

    SourceKind::Unsupported
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_pdf() {
        assert_eq!(classify("materials/report.pdf"), SourceKind::Pdf);
        assert_eq!(classify("REPORT.PDF"), SourceKind::Pdf);
    }

    #[test]
    fn test_local_docx() {
        assert_eq!(classify("notes/summary.docx"), SourceKind::Docx);
    }

    #[test]
    fn test_pdf_url() {
        assert_eq!(
            classify("https://example.com/paper.pdf"),
            SourceKind::PdfOverHttp
        );
    }

    #[test]
    fn test_pdf_url_with_query() {
        assert_eq!(
            classify("https://example.com/paper.pdf?download=1"),
            SourceKind::PdfOverHttp
        );
    }

    #[test]
    fn test_youtube_short_link() {
        assert_eq!(classify("https://youtu.be/abc123"), SourceKind::YoutubeLike);
        assert_eq!(
            classify("https://www.youtube.com/watch?v=abc123"),
            SourceKind::YoutubeLike
        );
    }

    #[test]
    fn test_plain_page() {
        assert_eq!(classify("https://example.com/page"), SourceKind::HtmlPage);
        assert_eq!(classify("http://example.com"), SourceKind::HtmlPage);
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(classify("ftp://example.com/file"), SourceKind::Unsupported);
        assert_eq!(classify("just some text"), SourceKind::Unsupported);
    }

    #[test]
    fn test_youtube_beats_generic_url() {
        // Substring check runs before the scheme check
        assert_eq!(
            classify("https://youtube.com/watch?v=xyz"),
            SourceKind::YoutubeLike
        );
    }
}
