//! HTML-to-text flattening.
//!
//! Strips all markup and collapses a page to newline-separated visible
//! text. Script, style, and head content never appears in the output.
//! Callers bound the result with [`crate::models::Extraction::truncate_to`].

use scraper::{Html, Node};

/// Flatten an HTML document to its visible text, one trimmed text chunk per
/// line. Block boundaries in the source become newlines.
pub fn visible_text(markup: &str) -> String {
    let document = Html::parse_document(markup);
    let mut lines: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node.ancestors().any(|ancestor| {
                matches!(
                    ancestor.value(),
                    Node::Element(element) if matches!(
                        element.name(),
                        "script" | "style" | "head" | "noscript" | "template"
                    )
                )
            });
            if hidden {
                continue;
            }

            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed);
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Extraction;

    #[test]
    fn test_markup_stripped_block_boundaries_kept() {
        let text = visible_text("<html><body><h1>Title</h1><p>One</p><p>Two</p></body></html>");
        assert_eq!(text, "Title\nOne\nTwo");
    }

    #[test]
    fn test_script_and_style_excluded() {
        let text = visible_text(
            "<html><head><title>T</title><style>p { color: red; }</style></head>\
             <body><script>var x = 1;</script><p>Visible</p></body></html>",
        );
        assert_eq!(text, "Visible");
    }

    #[test]
    fn test_inline_markup_flattened() {
        let text = visible_text("<p>Some <b>bold</b> words</p>");
        assert_eq!(text, "Some\nbold\nwords");
    }

    #[test]
    fn test_entities_decoded() {
        let text = visible_text("<p>fish &amp; chips</p>");
        assert_eq!(text, "fish & chips");
    }

    #[test]
    fn test_truncation_bound_is_exact() {
        let big = format!("<p>{}</p>", "x".repeat(500));
        let extraction = Extraction::ok(visible_text(&big)).truncate_to(200);

        assert!(extraction.truncated);
        assert_eq!(extraction.text.chars().count(), 200);
    }
}
