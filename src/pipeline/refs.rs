//! Citation pipeline: resolve free-text references into metadata artifacts.
//!
//! Each non-blank line of the references file is sent to the bibliographic
//! search API as a free-text query asking for one best match. A citation
//! with no match is skipped entirely, the only case in which no artifact is
//! produced; the skip is warn-logged and recorded in the run report. When a
//! match carries a DOI, the open-access lookup enriches the record; that
//! lookup is strictly best-effort and any failure degrades the status to
//! "unknown" without blocking the record. A missing references file is
//! warn-logged and yields an empty run, so it never blocks the other
//! pipelines.

use std::fs;

use crate::artifact::{safe_file_name, ArtifactWriter, REFERENCE_NAME_LIMIT};
use crate::config::Config;
use crate::models::{Origin, Outcome, Reference, RunReport, SourceItem};
use crate::pipeline::PipelineError;
use crate::sources::{CrossrefClient, UnpaywallClient};

pub async fn run(config: &Config) -> Result<RunReport, PipelineError> {
    let user_agent = format!(
        "{} (mailto:{})",
        config.http.user_agent, config.contact.email
    );
    let crossref = CrossrefClient::new(config.http.api_timeout(), &user_agent)?;
    let unpaywall = UnpaywallClient::new(config.http.api_timeout(), &config.contact.email)?;
    run_with_clients(config, &crossref, &unpaywall).await
}

/// Run the pipeline with caller-supplied clients (tests rebase them onto a
/// mock server).
pub async fn run_with_clients(
    config: &Config,
    crossref: &CrossrefClient,
    unpaywall: &UnpaywallClient,
) -> Result<RunReport, PipelineError> {
    if !config.paths.references_file.exists() {
        tracing::warn!(
            "No references file found at {}",
            config.paths.references_file.display()
        );
        return Ok(RunReport::new());
    }

    let writer = ArtifactWriter::new(&config.paths.output_dir)?;
    let mut report = RunReport::new();

    let content = fs::read_to_string(&config.paths.references_file)?;
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let item = SourceItem::new(Origin::CitationText, line.trim());
        let citation = item.raw.as_str();

        tracing::info!("Processing: {}", citation);

        let mut reference = match crossref.search_bibliographic(citation).await {
            Ok(Some(reference)) => reference,
            Ok(None) => {
                tracing::warn!("No bibliographic match for: {}", citation);
                report.record(
                    citation,
                    Outcome::Skipped {
                        reason: "no bibliographic match".to_string(),
                    },
                );
                continue;
            }
            Err(e) => {
                tracing::warn!("Bibliographic search failed for: {}: {}", citation, e);
                report.record(
                    citation,
                    Outcome::Skipped {
                        reason: format!("search failed: {}", e),
                    },
                );
                continue;
            }
        };

        if let Some(doi) = reference.doi.clone() {
            match unpaywall.lookup(&doi).await {
                Ok(oa) => {
                    reference.oa_status = oa.status;
                    reference.oa_pdf_url = oa.pdf_url;
                }
                Err(e) => {
                    // Best-effort enrichment; status stays "unknown"
                    tracing::warn!("Open-access lookup failed for DOI {}: {}", doi, e);
                }
            }
        }

        let seed = if reference.title.is_empty() {
            citation
        } else {
            reference.title.as_str()
        };
        let body = format_reference(citation, &reference);
        let artifact = writer.write(&safe_file_name(seed, REFERENCE_NAME_LIMIT), &body)?;

        tracing::info!("Saved: {}", artifact.display());
        report.record(citation, Outcome::Written { artifact });
    }

    Ok(report)
}

/// Flatten a resolved reference into the fixed-order artifact body.
fn format_reference(citation: &str, reference: &Reference) -> String {
    let mut body = format!("Reference: {}\n", citation);
    body.push_str(&format!("Title: {}\n", reference.title));
    body.push_str(&format!("Authors: {}\n", reference.authors));
    body.push_str(&format!("Journal: {}\n", reference.journal));
    body.push_str(&format!(
        "Year: {}\n",
        reference.year.map(|y| y.to_string()).unwrap_or_default()
    ));
    body.push_str(&format!(
        "DOI: {}\n",
        reference.doi.as_deref().unwrap_or_default()
    ));
    body.push_str(&format!("Publisher Link: {}\n", reference.publisher_url));
    body.push_str(&format!("Open Access: {}\n", reference.oa_status));
    if let Some(pdf_url) = &reference.oa_pdf_url {
        body.push_str(&format!("Open Access PDF: {}\n", pdf_url));
    }

    match &reference.abstract_text {
        Some(abstract_text) => {
            body.push_str(&format!("\nAbstract:\n{}\n", abstract_text));
        }
        None => body.push_str("\nAbstract: Not found\n"),
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathsConfig;
    use crate::models::ReferenceBuilder;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_missing_references_file_yields_empty_run() {
        let out = tempfile::tempdir().unwrap();
        let config = Config {
            paths: PathsConfig {
                references_file: PathBuf::from("/nonexistent/references.txt"),
                output_dir: out.path().to_path_buf(),
                ..PathsConfig::default()
            },
            ..Config::default()
        };

        let report = run(&config).await.unwrap();
        assert!(report.items.is_empty());
    }

    #[test]
    fn test_format_full_reference() {
        let reference = ReferenceBuilder::new("Sleep-dependent memory consolidation")
            .authors("Stickgold, Robert; Walker, Matthew")
            .journal("Nature")
            .year(Some(2005))
            .doi("10.1038/nature04286")
            .publisher_url("https://doi.org/10.1038/nature04286")
            .oa_status("green")
            .oa_pdf_url("https://example.com/oa.pdf")
            .abstract_text("Sleep benefits memory.")
            .build();

        let body = format_reference("Stickgold & Walker 2005", &reference);

        assert!(body.starts_with("Reference: Stickgold & Walker 2005\n"));
        assert!(body.contains("Title: Sleep-dependent memory consolidation\n"));
        assert!(body.contains("Year: 2005\n"));
        assert!(body.contains("Open Access: green\n"));
        assert!(body.contains("Open Access PDF: https://example.com/oa.pdf\n"));
        assert!(body.ends_with("\nAbstract:\nSleep benefits memory.\n"));
    }

    #[test]
    fn test_format_without_doi_or_abstract() {
        let reference = ReferenceBuilder::new("Untracked report")
            .journal("Grey Literature Quarterly")
            .build();

        let body = format_reference("Some citation", &reference);

        assert!(body.contains("DOI: \n"));
        assert!(body.contains("Open Access: unknown\n"));
        assert!(!body.contains("Open Access PDF:"));
        assert!(body.ends_with("\nAbstract: Not found\n"));
    }

    #[test]
    fn test_header_field_order_is_fixed() {
        let reference = ReferenceBuilder::new("T").build();
        let body = format_reference("c", &reference);
        let lines: Vec<&str> = body.lines().collect();

        assert!(lines[0].starts_with("Reference:"));
        assert!(lines[1].starts_with("Title:"));
        assert!(lines[2].starts_with("Authors:"));
        assert!(lines[3].starts_with("Journal:"));
        assert!(lines[4].starts_with("Year:"));
        assert!(lines[5].starts_with("DOI:"));
        assert!(lines[6].starts_with("Publisher Link:"));
        assert!(lines[7].starts_with("Open Access:"));
    }
}
