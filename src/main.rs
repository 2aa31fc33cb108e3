use anyhow::Result;
use clap::{Parser, Subcommand};
use paperharvest::config::{find_config_file, load_config, Config};
use paperharvest::models::{Outcome, RunReport};
use paperharvest::pipeline;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// paperharvest - turn documents, web pages, and references into a plain-text corpus
#[derive(Parser, Debug)]
#[command(name = "paperharvest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ingest documents, web pages, and bibliographic references into a plain-text corpus", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times: -v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress the run summary
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of local documents to extract
    #[arg(long, global = true)]
    materials_dir: Option<PathBuf>,

    /// Line-oriented file of URLs to fetch
    #[arg(long, global = true)]
    urls_file: Option<PathBuf>,

    /// Line-oriented file of free-text citations to resolve
    #[arg(long, global = true)]
    refs_file: Option<PathBuf>,

    /// Output directory for text artifacts
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Extract text from local documents in the materials directory
    #[command(alias = "f")]
    Files,

    /// Fetch and flatten each URL in the URLs file
    #[command(alias = "u")]
    Urls,

    /// Resolve each citation in the references file into a metadata artifact
    #[command(alias = "r")]
    Refs,

    /// Run all three pipelines in order (default)
    #[command(alias = "a")]
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("paperharvest={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        Config::default()
    };
    apply_overrides(&mut config, &cli);

    let command = cli.command.unwrap_or(Commands::All);
    let mut report = RunReport::new();
    match command {
        Commands::Files => report.merge(pipeline::files::run(&config)?),
        Commands::Urls => report.merge(pipeline::urls::run(&config).await?),
        Commands::Refs => report.merge(pipeline::refs::run(&config).await?),
        Commands::All => {
            report.merge(pipeline::files::run(&config)?);
            report.merge(pipeline::urls::run(&config).await?);
            report.merge(pipeline::refs::run(&config).await?);
        }
    }

    if !cli.quiet {
        print_summary(&report);
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(dir) = &cli.materials_dir {
        config.paths.materials_dir = dir.clone();
    }
    if let Some(file) = &cli.urls_file {
        config.paths.urls_file = file.clone();
    }
    if let Some(file) = &cli.refs_file {
        config.paths.references_file = file.clone();
    }
    if let Some(dir) = &cli.out_dir {
        config.paths.output_dir = dir.clone();
    }
}

fn print_summary(report: &RunReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Item", "Status", "Detail"]);

    for item_report in &report.items {
        let item = if item_report.item.chars().count() > 60 {
            format!("{}...", item_report.item.chars().take(57).collect::<String>())
        } else {
            item_report.item.clone()
        };

        let (status, detail) = match &item_report.outcome {
            Outcome::Written { artifact } => ("written", artifact.display().to_string()),
            Outcome::Degraded { artifact, error } => {
                ("degraded", format!("{} ({})", artifact.display(), error))
            }
            Outcome::Skipped { reason } => ("skipped", reason.clone()),
        };

        table.add_row(vec![Cell::new(item), Cell::new(status), Cell::new(detail)]);
    }

    println!("{table}");
    println!(
        "{} written, {} degraded, {} skipped",
        report.written(),
        report.degraded(),
        report.skipped()
    );
}
