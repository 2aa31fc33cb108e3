//! URL pipeline: fetch and flatten a line-oriented list of web sources.
//!
//! Every non-blank input line yields exactly one artifact whose body begins
//! with `URL: {url}`. Acquisition and extraction failures are materialized
//! in the artifact body itself, so a failed fetch is still auditable after
//! the run. A missing URLs file is warn-logged and yields an empty run, so
//! it never blocks the other pipelines.

use std::fs;
use std::path::Path;

use crate::artifact::{safe_file_name, ArtifactWriter, URL_NAME_LIMIT};
use crate::classify::classify;
use crate::config::Config;
use crate::extract;
use crate::fetch::{advisory_text, Fetcher};
use crate::models::{Extraction, Origin, Outcome, RunReport, SourceItem, SourceKind};
use crate::pipeline::PipelineError;

pub async fn run(config: &Config) -> Result<RunReport, PipelineError> {
    if !config.paths.urls_file.exists() {
        tracing::warn!(
            "No URLs file found at {}",
            config.paths.urls_file.display()
        );
        return Ok(RunReport::new());
    }

    let fetcher = Fetcher::new(&config.http)?;
    let writer = ArtifactWriter::new(&config.paths.output_dir)?;
    let mut report = RunReport::new();

    let content = fs::read_to_string(&config.paths.urls_file)?;
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let item = SourceItem::new(Origin::Url, line.trim());

        tracing::info!("Processing: {}", item);

        let kind = classify(&item.raw);
        let extraction = acquire_and_extract(&fetcher, kind, &item.raw)
            .await
            .truncate_to(config.http.html_max_chars);

        let body = format!("URL: {}\n\n{}", item.raw, extraction.text);
        let artifact = writer.write(&safe_file_name(&item.raw, URL_NAME_LIMIT), &body)?;

        match extraction.error {
            None => {
                tracing::info!("Saved: {}", artifact.display());
                report.record(item.raw, Outcome::Written { artifact });
            }
            Some(error) => {
                tracing::warn!("Degraded fetch for {}: {}", item, error);
                report.record(item.raw, Outcome::Degraded { artifact, error });
            }
        }
    }

    Ok(report)
}

async fn acquire_and_extract(fetcher: &Fetcher, kind: SourceKind, url: &str) -> Extraction {
    match kind {
        SourceKind::PdfOverHttp => fetch_remote_pdf(fetcher, url).await,

        SourceKind::HtmlPage => match fetcher.fetch_html(url).await {
            Ok(markup) => Extraction::ok(extract::html::visible_text(&markup)),
            Err(e) => Extraction::failed(
                format!("ERROR fetching HTML from {}: {}", url, e),
                e.to_string(),
            ),
        },

        // A line that looks like a local document path is read in place
        SourceKind::Pdf => extract::pdf::extract_text(Path::new(url)),
        SourceKind::Docx => extract::docx::extract_text(Path::new(url)),

        SourceKind::YoutubeLike | SourceKind::Unsupported => Extraction::ok(
            advisory_text(kind, url).unwrap_or_default(),
        ),

        // classify() never assigns this; citations arrive via their own
        // pipeline with their own input file
        SourceKind::Citation => Extraction::ok(
            advisory_text(SourceKind::Unsupported, url).unwrap_or_default(),
        ),
    }
}

async fn fetch_remote_pdf(fetcher: &Fetcher, url: &str) -> Extraction {
    match fetcher.fetch_pdf_to_temp(url).await {
        // Temp file is dropped (and removed) as soon as extraction is done
        Ok(temp) => extract::pdf::extract_text(temp.path()),
        Err(e) => Extraction::failed(
            format!("ERROR fetching PDF from {}: {}", url, e),
            e.to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathsConfig;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_missing_urls_file_yields_empty_run() {
        let out = tempfile::tempdir().unwrap();
        let config = Config {
            paths: PathsConfig {
                urls_file: PathBuf::from("/nonexistent/urls.txt"),
                output_dir: out.path().to_path_buf(),
                ..PathsConfig::default()
            },
            ..Config::default()
        };

        let report = run(&config).await.unwrap();
        assert!(report.items.is_empty());
    }
}
