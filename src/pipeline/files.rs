//! Local-file pipeline: extract text from a directory of documents.
//!
//! The materials directory is enumerated non-recursively; only `.pdf` and
//! `.docx` files are acted on, everything else is ignored. Each artifact is
//! named after the source file's stem with the text extension, and its body
//! is the extracted text alone.

use std::fs;

use crate::artifact::ArtifactWriter;
use crate::classify::classify;
use crate::config::Config;
use crate::extract;
use crate::models::{Origin, Outcome, RunReport, SourceItem, SourceKind};
use crate::pipeline::PipelineError;

pub fn run(config: &Config) -> Result<RunReport, PipelineError> {
    let writer = ArtifactWriter::new(&config.paths.output_dir)?;
    let mut report = RunReport::new();

    let mut entries: Vec<_> = fs::read_dir(&config.paths.materials_dir)?
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let item = SourceItem::new(Origin::LocalPath, path.to_string_lossy());
        let extraction = match classify(&item.raw) {
            SourceKind::Pdf => extract::pdf::extract_text(&path),
            SourceKind::Docx => extract::docx::extract_text(&path),
            SourceKind::HtmlPage
            | SourceKind::PdfOverHttp
            | SourceKind::YoutubeLike
            | SourceKind::Citation
            | SourceKind::Unsupported => {
                tracing::debug!("Ignoring {}: not a supported document suffix", item);
                continue;
            }
        };

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let artifact = writer.write(&format!("{}.txt", stem), &extraction.text)?;

        match extraction.error {
            None => {
                tracing::info!("Extracted {} -> {}", item, artifact.display());
                report.record(item.raw, Outcome::Written { artifact });
            }
            Some(error) => {
                tracing::warn!("Failed to extract {}: {}", item, error);
                report.record(item.raw, Outcome::Degraded { artifact, error });
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathsConfig;
    use std::io::Write;

    fn config_for(materials: &std::path::Path, out: &std::path::Path) -> Config {
        Config {
            paths: PathsConfig {
                materials_dir: materials.to_path_buf(),
                output_dir: out.to_path_buf(),
                ..PathsConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_invalid_pdf_still_produces_artifact() {
        let materials = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        let mut file = fs::File::create(materials.path().join("broken.pdf")).unwrap();
        file.write_all(b"not really a pdf").unwrap();

        let report = run(&config_for(materials.path(), out.path())).unwrap();

        assert_eq!(report.degraded(), 1);
        assert!(out.path().join("broken.txt").exists());
    }

    #[test]
    fn test_other_suffixes_ignored() {
        let materials = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        fs::write(materials.path().join("notes.txt"), "plain").unwrap();
        fs::write(materials.path().join("image.png"), [0u8; 4]).unwrap();

        let report = run(&config_for(materials.path(), out.path())).unwrap();

        assert!(report.items.is_empty());
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_materials_dir_is_a_run_error() {
        let out = tempfile::tempdir().unwrap();
        let config = config_for(std::path::Path::new("/nonexistent/materials"), out.path());

        assert!(run(&config).is_err());
    }
}
