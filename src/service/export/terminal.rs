//! On-screen summary printed after an analysis.

use std::fmt::Write;

use super::format::{format_fetch_time, format_ms};
use super::scale::ScoreScale;
use super::ReportRenderer;
use crate::domain::{AnalysisResult, Category, VitalStatus};
use crate::error::Result;

const BAR_WIDTH: usize = 20;

pub struct TerminalReport {
    scale: ScoreScale,
    max_recommendations: Option<usize>,
}

impl TerminalReport {
    pub fn new() -> Self {
        Self { scale: ScoreScale::UI, max_recommendations: None }
    }

    /// Show only the first `n` recommendations.
    pub fn with_limit(mut self, n: usize) -> Self {
        self.max_recommendations = Some(n);
        self
    }

    fn bar(score: u8) -> String {
        let filled = (score as usize * BAR_WIDTH + 50) / 100;
        format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
    }

    fn marker(status: VitalStatus) -> &'static str {
        match status {
            VitalStatus::Good => "[+]",
            VitalStatus::NeedsImprovement => "[~]",
            VitalStatus::Poor => "[-]",
        }
    }

    fn write_to(&self, w: &mut String, result: &AnalysisResult) -> std::fmt::Result {
        writeln!(w, "Web analysis: {}", result.final_url)?;
        if result.url != result.final_url {
            writeln!(w, "Requested:    {}", result.url)?;
        }
        writeln!(w, "Fetched:      {}", format_fetch_time(&result.fetch_time))?;
        writeln!(w)?;

        writeln!(w, "Scores")?;
        for (label, category) in [
            ("Performance", Category::Performance),
            ("Accessibility", Category::Accessibility),
            ("SEO", Category::Seo),
            ("Best practices", Category::Practices),
        ] {
            let score = result.scores.get(category);
            let tier = self.scale.tier(score);
            writeln!(w, "  {:<15} {:>3} {} {}", label, score, Self::bar(score), tier.as_str())?;
        }

        if !result.core_web_vitals.is_empty() {
            writeln!(w)?;
            writeln!(w, "Core Web Vitals")?;
            for (label, vital) in result.core_web_vitals.present() {
                writeln!(
                    w,
                    "  {} {:<4} {:<26} {:>10}  {}",
                    Self::marker(vital.status),
                    label,
                    vital.name,
                    vital.display_value(),
                    vital.status.as_str()
                )?;
            }
        }

        let info = &result.technical_info;
        writeln!(w)?;
        writeln!(w, "Technical")?;
        writeln!(w, "  Server response time  {}", format_ms(info.server_response_time))?;
        writeln!(w, "  DOM content loaded    {}", format_ms(info.dom_content_loaded))?;
        writeln!(w, "  Page load time        {}", format_ms(info.page_load_time))?;

        writeln!(w)?;
        writeln!(w, "Recommendations ({})", result.recommendations.len())?;
        let shown = self
            .max_recommendations
            .unwrap_or(result.recommendations.len())
            .min(result.recommendations.len());
        for rec in &result.recommendations[..shown] {
            writeln!(
                w,
                "  {:<6} {:<13} {}",
                rec.impact.as_str(),
                rec.category.as_str(),
                rec.title
            )?;
        }
        if shown < result.recommendations.len() {
            writeln!(w, "  ... {} more", result.recommendations.len() - shown)?;
        }

        Ok(())
    }
}

impl Default for TerminalReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for TerminalReport {
    fn render(&self, result: &AnalysisResult) -> Result<String> {
        let mut out = String::new();
        self.write_to(&mut out, result).map_err(anyhow::Error::from)?;
        Ok(out)
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}
