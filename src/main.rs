use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use job_exporter::logging::init_tracing;
use job_exporter::{
    start_web_server, DispatchOutcome, Extension, ExporterConfig, JobScraper, Page,
    TriggerSignal, EXTRACT_COMMAND,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "job-exporter")]
#[command(about = "Export LinkedIn job postings as YAML files")]
struct Cli {
    /// Configuration file (default: ./config.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract one job page and save it as YAML
    Extract {
        /// Job posting URL
        #[arg(long)]
        url: String,
        /// Saved page markup; the URL is fetched when omitted
        #[arg(long)]
        html: Option<PathBuf>,
        /// Override the configured download directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Serve the trigger endpoints over HTTP
    Serve {
        #[arg(long, env = "ROCKET_PORT", default_value_t = 8700)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ExporterConfig::load(cli.config.as_deref())?;
    init_tracing(config.log_file.as_deref())?;
    config.log_summary();

    match cli.command {
        Command::Extract {
            url,
            html,
            output_dir,
        } => {
            if let Some(dir) = output_dir {
                config.download_dir = dir;
            }
            extract(&config, url, html).await
        }
        Command::Serve { port } => {
            let extension = Extension::start(&config);
            start_web_server(extension, port).await
        }
    }
}

async fn extract(config: &ExporterConfig, url: String, html: Option<PathBuf>) -> Result<()> {
    let page = match html {
        Some(path) => {
            let markup = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Page::new(url, markup)
        }
        None => JobScraper::new()?.fetch_page(&url).await?,
    };

    let extension = Extension::start(config);
    let tab_id = extension.open_page(page);
    info!("Extracting from tab {}", tab_id);

    match extension.trigger(TriggerSignal::Command(EXTRACT_COMMAND.to_string()))? {
        DispatchOutcome::Dispatched(receipt) => receipt.completed().await?,
        DispatchOutcome::Busy | DispatchOutcome::Ignored => {
            anyhow::bail!("Extraction was not started")
        }
    }

    let item = extension
        .downloads()
        .history()
        .pop()
        .context("No file was produced, see the log for details")?;

    println!("✓ Saved {}", item.path.display());
    Ok(())
}
