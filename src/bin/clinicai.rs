//! Command-line front for the clinical extraction calls.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clinicai::tasks::MediaPayload;
use clinicai::ScribeClient;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "clinicai", version, about = "Clinical AI extraction with multi-key failover")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Transcribe dictated vitals from an audio recording
    Vitals(Input),
    /// Draft a prescription from a consultation recording
    Prescription(Input),
    /// Analyse a report image or PDF
    Report(Input),
}

#[derive(Debug, clap::Args)]
struct Input {
    /// File to send
    file: PathBuf,

    /// Media type; guessed from the extension when omitted
    #[arg(long)]
    mime: Option<String>,
}

impl Input {
    fn payload(&self) -> Result<MediaPayload> {
        MediaPayload::from_path(&self.file, self.mime.as_deref())
            .with_context(|| format!("reading {}", self.file.display()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clinicai=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ScribeClient::from_env().context("starting client")?;

    let output = match &cli.command {
        Command::Vitals(input) => {
            let audio = input.payload()?;
            let audio = MediaPayload::audio(audio.data().clone(), audio.mime_type());
            serde_json::to_string_pretty(&client.transcribe_vitals(audio).await?)?
        }
        Command::Prescription(input) => {
            let audio = input.payload()?;
            let audio = MediaPayload::audio(audio.data().clone(), audio.mime_type());
            serde_json::to_string_pretty(&client.generate_prescription_draft(audio).await?)?
        }
        Command::Report(input) => {
            serde_json::to_string_pretty(&client.analyze_report(input.payload()?).await?)?
        }
    };

    println!("{}", output);
    Ok(())
}
