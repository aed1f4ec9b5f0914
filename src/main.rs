// src/main.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use cardfold::config::Config;
use cardfold::infrastructure::init_logging;
use cardfold::integrations::{
    HttpImageLoader, MetadataProvider, PdfDocumentWriter, QrCodeEncoder, SpotifyClient,
    UnconfiguredProvider,
};
use cardfold::services::DeckPipeline;

#[derive(Parser)]
#[command(name = "cardfold")]
#[command(about = "Print fold-over scan cards from a list of media links", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: ./config.toml, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Link list to read instead of the configured cards_file
    #[arg(long)]
    cards_file: Option<PathBuf>,

    /// PDF to write instead of the configured destination_file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a JSON summary of the run (cards, rows, warnings)
    #[arg(long)]
    report: Option<PathBuf>,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{:#}", e);
        std::process::exit(2);
    }

    if let Err(e) = run(cli).await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // 1. CONFIGURATION
    let config_path = Config::locate(cli.config.as_deref())?;
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    log::info!("Using config {}", config_path.display());

    if let Some(cards_file) = cli.cards_file {
        config.cards_file = cards_file;
    }
    if let Some(output) = cli.output {
        config.destination_file = output;
    }

    // 2. COLLABORATORS
    // One token for the whole run
    let provider: Box<dyn MetadataProvider> = match config.provider_credentials() {
        Some(credentials) => Box::new(
            SpotifyClient::connect(&credentials)
                .await
                .context("Spotify authentication failed")?,
        ),
        None => {
            log::debug!("No Spotify credentials configured");
            Box::new(UnconfiguredProvider)
        }
    };
    let images = HttpImageLoader::new()?;
    let mut writer = PdfDocumentWriter::new(Box::new(QrCodeEncoder));

    // 3. RUN
    let pipeline = DeckPipeline::new(&config, provider.as_ref(), &images);
    let summary = pipeline
        .run(&mut writer)
        .await
        .context("Card generation aborted")?;

    if !summary.warnings.is_empty() {
        log::warn!("Finished with {} warning(s)", summary.warnings.len());
    }
    if let Some(report) = cli.report {
        summary.write_report(&report)?;
    }
    Ok(())
}
