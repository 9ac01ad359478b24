// src/main.rs
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use web_analyzer::cli::{Cli, Commands, OutputArgs};
use web_analyzer::domain::{AnalysisResult, RawReport};
use web_analyzer::lifecycle::init_logging;
use web_analyzer::service::export::{write_report, ReportRenderer, TerminalReport};
use web_analyzer::service::{Analyzer, ExportFormat, PageSpeedClient, ReportNormalizer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze { urls, backend, output } => {
            let config = backend.to_config(output.extraction);
            let client = PageSpeedClient::new(&config)?;

            let mut failed = 0;
            for (url, outcome) in urls.iter().zip(client.analyze_urls(&urls).await) {
                match outcome {
                    Ok(result) => emit(&result, &output).await?,
                    Err(e) => {
                        tracing::error!("{}: {}", url, e);
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                anyhow::bail!("{} of {} analyses failed", failed, urls.len());
            }
            Ok(())
        }
        Commands::Normalize { file, output } => {
            let body = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let raw: RawReport = serde_json::from_str(&body)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;
            let result = ReportNormalizer::new(output.extraction).normalize(raw)?;
            emit(&result, &output).await
        }
    }
}

async fn emit(result: &AnalysisResult, output: &OutputArgs) -> Result<()> {
    let now = Utc::now();
    let renderer: Box<dyn ReportRenderer> = match (output.format, output.top) {
        (ExportFormat::Text, Some(n)) => Box::new(TerminalReport::new().with_limit(n)),
        (format, _) => format.renderer(now),
    };

    match &output.output {
        Some(dir) => {
            let path = write_report(dir, result, renderer.as_ref(), now).await?;
            println!("{}", path.display());
        }
        None => print!("{}", renderer.render(result)?),
    }
    Ok(())
}
