//! Category scores, core web vitals and the technical timing summary.

use serde_json::{Map, Value};

use crate::domain::{Category, CategoryScores, CoreWebVital, CoreWebVitals, LighthouseView, TechnicalInfo, VitalStatus};

/// Core web vital thresholds (lower is better).
pub const LCP_THRESHOLD_MS: f64 = 2500.0;
pub const FCP_THRESHOLD_MS: f64 = 1800.0;
pub const CLS_THRESHOLD: f64 = 0.1;

/// 0-1 score to an integer percentage, half rounding up.
pub fn to_percent(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn extract_scores(lh: &LighthouseView<'_>) -> CategoryScores {
    let score = |category: Category| to_percent(lh.category_score(category.report_key()).unwrap_or(0.0));
    CategoryScores {
        performance: score(Category::Performance),
        accessibility: score(Category::Accessibility),
        seo: score(Category::Seo),
        best_practices: score(Category::Practices),
    }
}

struct VitalSpec {
    audit_id: &'static str,
    name: &'static str,
    threshold: f64,
    unit: &'static str,
    round: fn(f64) -> f64,
}

fn round_ms(v: f64) -> f64 {
    v.round()
}

fn round_ratio(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

const LCP: VitalSpec = VitalSpec {
    audit_id: "largest-contentful-paint",
    name: "Largest Contentful Paint",
    threshold: LCP_THRESHOLD_MS,
    unit: "ms",
    round: round_ms,
};

const FCP: VitalSpec = VitalSpec {
    audit_id: "first-contentful-paint",
    name: "First Contentful Paint",
    threshold: FCP_THRESHOLD_MS,
    unit: "ms",
    round: round_ms,
};

const CLS: VitalSpec = VitalSpec {
    audit_id: "cumulative-layout-shift",
    name: "Cumulative Layout Shift",
    threshold: CLS_THRESHOLD,
    unit: "",
    round: round_ratio,
};

fn extract_vital(lh: &LighthouseView<'_>, spec: &VitalSpec) -> Option<CoreWebVital> {
    let raw = lh.audit(spec.audit_id)?.numeric_value?;
    let value = (spec.round)(raw);
    Some(CoreWebVital {
        name: spec.name.to_string(),
        value,
        threshold: spec.threshold,
        unit: spec.unit.to_string(),
        status: VitalStatus::rate(value, spec.threshold),
    })
}

pub fn extract_vitals(lh: &LighthouseView<'_>) -> CoreWebVitals {
    CoreWebVitals {
        lcp: extract_vital(lh, &LCP),
        fcp: extract_vital(lh, &FCP),
        cls: extract_vital(lh, &CLS),
    }
}

fn number(item: &Map<String, Value>, key: &str) -> f64 {
    item.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Timing summary from `audits.metrics.details.items[0]`.
///
/// The payload's `speedIndex` lands in `server_response_time` and
/// `firstMeaningfulPaint` in `page_load_time`; downstream consumers rely on
/// that mapping.
pub fn extract_technical_info(lh: &LighthouseView<'_>) -> TechnicalInfo {
    let mut info = TechnicalInfo::default();

    if let Some(item) = lh.first_detail_item("metrics") {
        info.server_response_time = number(item, "speedIndex");
        info.dom_content_loaded = number(item, "domContentLoaded");
        info.page_load_time = number(item, "firstMeaningfulPaint");
    }

    if info.page_load_time == 0.0 {
        if let Some(fetch_time) = lh.fetch_time() {
            info.page_load_time = parse_leading_int(&fetch_time).unwrap_or(0.0);
        }
    }

    info
}

/// Leading integer of a string: optional whitespace and sign, then digits.
/// `"2024-05-01T10:00:00Z"` yields `2024`. Digit runs beyond `i64` are kept
/// as a (lossy) float rather than dropped.
pub fn parse_leading_int(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().map(|v| v * sign)
}
