//! Renderers for a finished `AnalysisResult`.
//!
//! - **TerminalReport**: compact on-screen summary
//! - **JsonReport**: the result as pretty JSON
//! - **DocumentReport**: paginated document for download

mod document;
pub mod format;
mod scale;
mod terminal;

pub use document::{DocumentReport, PageGeometry, PAGE_SEPARATOR};
pub use scale::ScoreScale;
pub use terminal::TerminalReport;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::domain::AnalysisResult;
use crate::error::Result;

/// Turns an analysis into text.
pub trait ReportRenderer {
    fn render(&self, result: &AnalysisResult) -> Result<String>;

    /// File extension used when the rendering is saved.
    fn extension(&self) -> &'static str;
}

/// Pretty JSON, with the raw report included.
#[derive(Debug, Default)]
pub struct JsonReport;

impl ReportRenderer for JsonReport {
    fn render(&self, result: &AnalysisResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result).map_err(anyhow::Error::from)?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Document,
}

impl ExportFormat {
    pub fn renderer(self, generated_at: DateTime<Utc>) -> Box<dyn ReportRenderer> {
        match self {
            Self::Text => Box::new(TerminalReport::new()),
            Self::Json => Box::new(JsonReport),
            Self::Document => Box::new(DocumentReport::new(generated_at)),
        }
    }
}

/// Filesystem-safe slug of a URL: scheme dropped, non-alphanumerics dashed,
/// lowercased, at most 30 characters.
pub fn sanitize_file_name(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    stripped
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .take(30)
        .collect()
}

/// `lighthouse-report-<slug>-<millis>.<ext>`
pub fn export_file_name(url: &str, now: DateTime<Utc>, extension: &str) -> String {
    format!(
        "lighthouse-report-{}-{}.{}",
        sanitize_file_name(url),
        now.timestamp_millis(),
        extension
    )
}

/// Render and write a report into `dir`, returning the written path.
pub async fn write_report(
    dir: &Path,
    result: &AnalysisResult,
    renderer: &dyn ReportRenderer,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let body = renderer.render(result)?;
    let path = dir.join(export_file_name(&result.url, now, renderer.extension()));
    tokio::fs::write(&path, body).await?;
    tracing::info!("Report written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use chrono::TimeZone;

    #[test]
    fn sanitize_matches_download_naming() {
        assert_eq!(sanitize_file_name("https://Example.com/a?b=c"), "example-com-a-b-c");
        assert_eq!(sanitize_file_name("http://x.io"), "x-io");
        assert_eq!(sanitize_file_name(&format!("https://{}", "a".repeat(50))).len(), 30);
    }

    #[test]
    fn file_name_has_millis_and_extension() {
        let now = Utc.timestamp_millis_opt(1_714_560_000_123).unwrap();
        assert_eq!(
            export_file_name("https://example.com", now, "json"),
            "lighthouse-report-example-com-1714560000123.json"
        );
    }

    #[test]
    fn json_report_uses_camel_case_contract() {
        let text = JsonReport.render(&fixtures::sample_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["finalUrl"], "https://example.com/");
        assert_eq!(value["scores"]["bestPractices"], 50);
        assert_eq!(value["coreWebVitals"]["lcp"]["status"], "poor");
        assert!(value["coreWebVitals"].get("fcp").is_none());
        assert_eq!(value["technicalInfo"]["serverResponseTime"], 3150.0);
        assert_eq!(value["recommendations"][0]["impact"], "high");
    }

    #[tokio::test]
    async fn write_report_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.timestamp_millis_opt(1_714_560_000_000).unwrap();
        let path = write_report(dir.path(), &fixtures::sample_result(), &JsonReport, now)
            .await
            .unwrap();

        assert!(path.ends_with("lighthouse-report-example-com-1714560000000.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"finalUrl\""));
    }
}
