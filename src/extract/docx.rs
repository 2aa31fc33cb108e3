//! DOCX paragraph extraction.
//!
//! A DOCX file is a zip container; the document body lives in
//! `word/document.xml`. Paragraph text is collected by scanning XML events
//! for `w:t` runs and joining paragraphs with newline separators.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::models::Extraction;

/// Errors that can occur while reading a DOCX container
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a DOCX container: {0}")]
    Container(String),

    #[error("Failed to parse document XML: {0}")]
    Parse(String),
}

/// Extract paragraph text from a DOCX file.
///
/// Any parse fault yields an empty text plus an error note; the run never
/// aborts on a single malformed document.
pub fn extract_text(path: &Path) -> Extraction {
    match read_paragraphs(path) {
        Ok(paragraphs) => Extraction::ok(paragraphs.join("\n")),
        Err(e) => Extraction::failed(
            String::new(),
            format!("Failed to extract {}: {}", path.display(), e),
        ),
    }
}

fn read_paragraphs(path: &Path) -> Result<Vec<String>, DocxError> {
    let file = File::open(path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| DocxError::Container(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| DocxError::Container(format!("missing word/document.xml: {}", e)))?
        .read_to_string(&mut xml)?;

    parse_document_xml(&xml)
}

/// Collect `w:t` run text into paragraphs, one per `w:p` element.
fn parse_document_xml(xml: &str) -> Result<Vec<String>, DocxError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_body = false;
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:body" => in_body = true,
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:body" => in_body = false,
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    if in_body {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                // Explicit line breaks and tabs inside a run
                b"w:br" => current.push('\n'),
                b"w:tab" => current.push('\t'),
                // Self-closing empty paragraph
                b"w:p" => {
                    if in_body {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref t)) => {
                if in_text_run {
                    let text = t
                        .unescape()
                        .map_err(|e| DocxError::Parse(e.to_string()))?;
                    current.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(DocxError::Parse(e.to_string())),
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
    <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph.</w:t></w:r></w:p>
    <w:p/>
  </w:body>
</w:document>"#;

    fn write_docx(document_xml: &str) -> tempfile::NamedTempFile {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("word/document.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&buffer.into_inner()).unwrap();
        file
    }

    #[test]
    fn test_paragraphs_joined_with_newlines() {
        let file = write_docx(DOCUMENT_XML);
        let extraction = extract_text(file.path());

        assert!(extraction.error.is_none());
        assert_eq!(
            extraction.text,
            "First paragraph.\nSecond paragraph.\n"
        );
    }

    #[test]
    fn test_split_runs_are_concatenated() {
        let file = write_docx(DOCUMENT_XML);
        let extraction = extract_text(file.path());
        assert!(extraction.text.contains("Second paragraph."));
    }

    #[test]
    fn test_not_a_zip_yields_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"plain text, not a container").unwrap();

        let extraction = extract_text(file.path());
        assert_eq!(extraction.text, "");
        assert!(extraction.error.is_some());
    }

    #[test]
    fn test_zip_without_document_xml_yields_error() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("other.txt", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"hello").unwrap();
            writer.finish().unwrap();
        }
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&buffer.into_inner()).unwrap();

        let extraction = extract_text(file.path());
        assert!(extraction.error.is_some());
        assert!(extraction
            .error
            .unwrap()
            .contains("word/document.xml"));
    }
}
