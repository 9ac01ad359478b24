//! Report normalization for PageSpeed payloads.
//!
//! This module turns a raw Lighthouse report into an `AnalysisResult`.
//! Recommendations can be gathered with two strategies:
//! - **DirectScan**: every audit, categorized by id table and inference
//! - **CategoryDriven**: only audits referenced by a report category
//!
//! Both implement the `RecommendationSource` trait and share one filter,
//! impact assignment and ordering.

pub mod classify;
mod category_driven;
mod direct_scan;
pub mod metrics;

pub use category_driven::CategoryDriven;
pub use direct_scan::DirectScan;

use crate::domain::{AnalysisResult, Audit, Category, LighthouseView, RawReport, Recommendation};
use crate::error::{AppError, Result};

/// Strategy trait for picking candidate audits and their categories.
pub trait RecommendationSource: Send + Sync {
    /// Audits to consider, each paired with the category it reports under.
    fn candidates(&self, lh: &LighthouseView<'_>) -> Vec<(Audit, Category)>;

    /// Human-readable name for this strategy.
    fn name(&self) -> &'static str;
}

/// Strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExtractionMode {
    /// Every audit, categorized by id
    #[default]
    DirectScan,
    /// Only audits referenced by a report category
    CategoryDriven,
}

impl ExtractionMode {
    pub fn source(self) -> Box<dyn RecommendationSource> {
        match self {
            Self::DirectScan => Box::new(DirectScan),
            Self::CategoryDriven => Box::new(CategoryDriven),
        }
    }
}

/// Filter, classify and order the candidates of a source.
pub fn extract_recommendations(
    source: &dyn RecommendationSource,
    lh: &LighthouseView<'_>,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = source
        .candidates(lh)
        .iter()
        .filter(|(audit, _)| classify::is_actionable(audit))
        .map(|(audit, category)| classify::to_recommendation(audit, *category))
        .collect();

    classify::sort_recommendations(&mut recommendations);
    recommendations
}

/// Pure transform from a raw report to the normalized result.
pub struct ReportNormalizer {
    source: Box<dyn RecommendationSource>,
}

impl ReportNormalizer {
    pub fn new(mode: ExtractionMode) -> Self {
        Self { source: mode.source() }
    }

    pub fn with_source(source: Box<dyn RecommendationSource>) -> Self {
        Self { source }
    }

    pub fn strategy(&self) -> &'static str {
        self.source.name()
    }

    /// Normalize a report. Fails only when `lighthouseResult` is missing.
    pub fn normalize(&self, raw: RawReport) -> Result<AnalysisResult> {
        let lh = raw
            .lighthouse()
            .ok_or_else(|| AppError::malformed("Invalid API response: No lighthouse result"))?;

        let scores = metrics::extract_scores(&lh);
        let core_web_vitals = metrics::extract_vitals(&lh);
        let recommendations = extract_recommendations(self.source.as_ref(), &lh);
        let technical_info = metrics::extract_technical_info(&lh);
        let url = lh.requested_url().unwrap_or_default().to_string();
        let final_url = lh.final_url().unwrap_or_default().to_string();
        let fetch_time = lh.fetch_time().unwrap_or_default();

        tracing::debug!(
            strategy = self.source.name(),
            recommendations = recommendations.len(),
            "normalized report for {}",
            final_url
        );

        Ok(AnalysisResult {
            url,
            final_url,
            fetch_time,
            scores,
            core_web_vitals,
            recommendations,
            technical_info,
            full_report: raw,
        })
    }
}

impl Default for ReportNormalizer {
    fn default() -> Self {
        Self::new(ExtractionMode::default())
    }
}

impl std::fmt::Debug for ReportNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportNormalizer")
            .field("strategy", &self.source.name())
            .finish()
    }
}
