//! Normalized analysis entities handed to renderers and exporters.

use serde::{Deserialize, Serialize};

use crate::domain::raw::RawReport;

// ====== Enums ======

/// Severity tier used to prioritize recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }

    /// Sort rank, high first.
    pub fn rank(&self) -> u8 {
        match self {
            Impact::High => 0,
            Impact::Medium => 1,
            Impact::Low => 2,
        }
    }
}

/// Topic bucket a recommendation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Performance,
    Accessibility,
    Seo,
    Practices,
}

impl Category {
    /// Fixed display and sort order.
    pub const ALL: [Category; 4] = [
        Category::Performance,
        Category::Accessibility,
        Category::Seo,
        Category::Practices,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Performance => "performance",
            Category::Accessibility => "accessibility",
            Category::Seo => "seo",
            Category::Practices => "practices",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Category::Performance => 0,
            Category::Accessibility => 1,
            Category::Seo => 2,
            Category::Practices => 3,
        }
    }

    /// Key of this category inside `lighthouseResult.categories`.
    pub fn report_key(&self) -> &'static str {
        match self {
            Category::Performance => "performance",
            Category::Accessibility => "accessibility",
            Category::Seo => "seo",
            Category::Practices => "best-practices",
        }
    }
}

/// Three-way rating shared by vitals and score tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalStatus {
    Good,
    NeedsImprovement,
    Poor,
}

impl VitalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VitalStatus::Good => "good",
            VitalStatus::NeedsImprovement => "needs-improvement",
            VitalStatus::Poor => "poor",
        }
    }

    /// Rate a lower-is-better value against its threshold with a 1.5x tolerance band.
    pub fn rate(value: f64, threshold: f64) -> Self {
        if value <= threshold {
            VitalStatus::Good
        } else if value <= threshold * 1.5 {
            VitalStatus::NeedsImprovement
        } else {
            VitalStatus::Poor
        }
    }
}

// ====== Simple Entities ======

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreWebVital {
    pub name: String,
    pub value: f64,
    pub threshold: f64,
    pub unit: String,
    pub status: VitalStatus,
}

impl CoreWebVital {
    /// Value with its unit, integers printed without a fraction.
    pub fn display_value(&self) -> String {
        let value = if self.value.fract() == 0.0 {
            format!("{}", self.value as i64)
        } else {
            format!("{}", self.value)
        };
        if self.unit.is_empty() {
            value
        } else {
            format!("{} {}", value, self.unit)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreWebVitals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lcp: Option<CoreWebVital>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fcp: Option<CoreWebVital>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cls: Option<CoreWebVital>,
}

impl CoreWebVitals {
    pub fn is_empty(&self) -> bool {
        self.lcp.is_none() && self.fcp.is_none() && self.cls.is_none()
    }

    /// Present vitals in LCP, FCP, CLS order with their short labels.
    pub fn present(&self) -> Vec<(&'static str, &CoreWebVital)> {
        [("LCP", &self.lcp), ("FCP", &self.fcp), ("CLS", &self.cls)]
            .into_iter()
            .filter_map(|(label, vital)| vital.as_ref().map(|v| (label, v)))
            .collect()
    }
}

/// Category scores as integer percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub performance: u8,
    pub accessibility: u8,
    pub seo: u8,
    pub best_practices: u8,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Performance => self.performance,
            Category::Accessibility => self.accessibility,
            Category::Seo => self.seo,
            Category::Practices => self.best_practices,
        }
    }
}

/// Timing summary lifted from the `metrics` audit.
///
/// Field names follow the downstream contract, not the payload: `server_response_time`
/// carries the speed index and `page_load_time` the first meaningful paint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalInfo {
    pub server_response_time: f64,
    pub dom_content_loaded: f64,
    pub page_load_time: f64,
}

// ====== Root Entity: AnalysisResult ======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub url: String,
    pub final_url: String,
    pub fetch_time: String,
    pub scores: CategoryScores,
    pub core_web_vitals: CoreWebVitals,
    pub recommendations: Vec<Recommendation>,
    pub technical_info: TechnicalInfo,
    pub full_report: RawReport,
}

impl AnalysisResult {
    /// Recommendations of one category, keeping the global order.
    pub fn recommendations_for(&self, category: Category) -> Vec<&Recommendation> {
        self.recommendations
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }
}
