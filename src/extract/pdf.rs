//! PDF text extraction using lopdf page iteration.
//!
//! Pages are walked in document order and each page's text is appended with
//! a newline separator. A page that yields no text contributes nothing. A
//! decode fault mid-document stops accumulation and is reported via
//! `Extraction.error`, preserving whatever text was gathered before the
//! fault rather than discarding it.

use lopdf::Document;
use std::path::Path;

use crate::models::Extraction;

/// Extract plain text from a PDF file.
///
/// Never fails outright: a document that cannot be loaded yields an empty
/// text plus an error note, and a page-level fault yields the partial text
/// accumulated so far plus an error note.
pub fn extract_text(path: &Path) -> Extraction {
    let document = match Document::load(path) {
        Ok(document) => document,
        Err(e) => {
            return Extraction::failed(
                String::new(),
                format!("Failed to open PDF {}: {}", path.display(), e),
            )
        }
    };

    let mut text = String::new();

    for (page_number, _) in document.get_pages() {
        match document.extract_text(&[page_number]) {
            Ok(page_text) => {
                if !page_text.trim().is_empty() {
                    text.push_str(&page_text);
                    text.push('\n');
                } else {
                    // Scanned or image-only page; contributes nothing
                    tracing::debug!(
                        "Extracted empty text from page {} of {}",
                        page_number,
                        path.display()
                    );
                }
            }
            Err(e) => {
                return Extraction::failed(
                    text,
                    format!("Failed to extract page {} of {}: {}", page_number, path.display(), e),
                );
            }
        }
    }

    Extraction::ok(text)
}
