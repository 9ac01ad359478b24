//! Category lookup, impact tiers and the actionable-audit filter.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value;

use crate::domain::{Audit, Category, Impact, Recommendation, ScoreDisplayMode};

use Category::*;

/// Known Lighthouse audit ids and the bucket they belong to.
const CATEGORY_TABLE: &[(&str, Category)] = &[
    // Performance
    ("unused-css", Performance),
    ("unused-javascript", Performance),
    ("modern-image-formats", Performance),
    ("offscreen-images", Performance),
    ("render-blocking-resources", Performance),
    ("render-blocking-insight", Performance),
    ("cumulative-layout-shift", Performance),
    ("first-contentful-paint", Performance),
    ("largest-contentful-paint", Performance),
    ("speed-index", Performance),
    ("interactive", Performance),
    ("bootup-time", Performance),
    ("mainthread-work-breakdown", Performance),
    ("unminified-javascript", Performance),
    ("unminified-css", Performance),
    ("total-byte-weight", Performance),
    ("total-blocking-time", Performance),
    ("image-delivery-insight", Performance),
    ("cache-insight", Performance),
    ("font-display-insight", Performance),
    ("network-server-latency", Performance),
    ("legacy-javascript-insight", Performance),
    ("duplicated-javascript-insight", Performance),
    ("server-response-time", Performance),
    ("redirects", Performance),
    ("lcp-discovery-insight", Performance),
    ("lcp-breakdown-insight", Performance),
    ("network-dependency-tree-insight", Performance),
    ("resource-summary", Performance),
    ("network-rtt", Performance),
    ("third-parties-insight", Performance),
    ("forced-reflow-insight", Performance),
    ("dom-size-insight", Performance),
    ("metrics", Performance),
    ("diagnostics", Performance),
    ("main-thread-tasks", Performance),
    ("user-timings", Performance),
    // Accessibility
    ("color-contrast", Accessibility),
    ("form-field-labels", Accessibility),
    ("keyboard-navigation", Accessibility),
    ("aria-allowed-role", Accessibility),
    ("aria-hidden-focus", Accessibility),
    ("aria-required-attr", Accessibility),
    ("aria-required-children", Accessibility),
    ("aria-required-parent", Accessibility),
    ("aria-roles", Accessibility),
    ("aria-valid-attr", Accessibility),
    ("aria-valid-attr-value", Accessibility),
    ("aria-allowed-attr", Accessibility),
    ("aria-hidden-body", Accessibility),
    ("aria-deprecated-role", Accessibility),
    ("aria-conditional-attr", Accessibility),
    ("aria-prohibited-attr", Accessibility),
    ("image-alt", Accessibility),
    ("input-image-alt", Accessibility),
    ("link-name", Accessibility),
    ("button-name", Accessibility),
    ("form-field-multiple-labels", Accessibility),
    ("select-name", Accessibility),
    ("target-size", Accessibility),
    ("html-has-lang", Accessibility),
    ("html-lang-valid", Accessibility),
    ("html-xml-lang-mismatch", Accessibility),
    ("meta-viewport", Accessibility),
    ("frame-title", Accessibility),
    ("logical-tab-order", Accessibility),
    ("use-landmarks", Accessibility),
    ("heading-order", Accessibility),
    ("list", Accessibility),
    ("listitem", Accessibility),
    ("definition-list", Accessibility),
    ("dlitem", Accessibility),
    ("video-caption", Accessibility),
    ("label", Accessibility),
    ("link-text", Accessibility),
    ("empty-heading", Accessibility),
    ("bypass", Accessibility),
    ("focus-traps", Accessibility),
    ("managed-focus", Accessibility),
    ("interactive-element-affordance", Accessibility),
    ("custom-controls-roles", Accessibility),
    ("custom-controls-labels", Accessibility),
    ("visual-order-follows-dom", Accessibility),
    ("offscreen-content-hidden", Accessibility),
    ("crawlable-anchors", Accessibility),
    ("identical-links-same-purpose", Accessibility),
    ("aria-input-field-name", Accessibility),
    ("aria-meter-name", Accessibility),
    ("aria-progressbar-name", Accessibility),
    ("aria-toggle-field-name", Accessibility),
    ("aria-command-name", Accessibility),
    ("aria-dialog-name", Accessibility),
    ("aria-text", Accessibility),
    ("aria-treeitem-name", Accessibility),
    ("label-content-name-mismatch", Accessibility),
    ("object-alt", Accessibility),
    ("table-duplicate-name", Accessibility),
    ("table-fake-caption", Accessibility),
    ("td-has-header", Accessibility),
    ("td-headers-attr", Accessibility),
    ("th-has-data-cells", Accessibility),
    ("paste-preventing-inputs", Accessibility),
    ("tabindex", Accessibility),
    ("skip-link", Accessibility),
    ("viewport-insight", Accessibility),
    // SEO
    ("meta-description", Seo),
    ("font-size", Seo),
    ("robots-txt", Seo),
    ("canonical", Seo),
    ("hreflang", Seo),
    ("http-status-code", Seo),
    ("is-crawlable", Seo),
    ("redirects-http", Seo),
    ("structured-data", Seo),
    ("seo-content", Seo),
    ("seo-crawl", Seo),
    ("seo-mobile", Seo),
    // Best practices
    ("https", Practices),
    ("no-vulnerable-libraries", Practices),
    ("doctype", Practices),
    ("errors-in-console", Practices),
    ("valid-source-maps", Practices),
    ("inspector-issues", Practices),
    ("deprecations", Practices),
    ("notification-on-start", Practices),
    ("charset", Practices),
    ("image-aspect-ratio", Practices),
    ("image-size-responsive", Practices),
    ("unsized-images", Practices),
    ("clickjacking-mitigation", Practices),
    ("csp-xss", Practices),
    ("trusted-types-xss", Practices),
    ("has-hsts", Practices),
    ("origin-isolation", Practices),
    ("third-party-cookies", Practices),
];

fn category_table() -> &'static HashMap<&'static str, Category> {
    static TABLE: OnceLock<HashMap<&'static str, Category>> = OnceLock::new();
    TABLE.get_or_init(|| CATEGORY_TABLE.iter().copied().collect())
}

/// Table lookup only.
pub fn lookup_category(audit_id: &str) -> Option<Category> {
    category_table().get(audit_id).copied()
}

/// Guess a category from substrings of the audit id.
pub fn infer_category(audit_id: &str) -> Category {
    let has = |needles: &[&str]| needles.iter().any(|n| audit_id.contains(n));
    if has(&["aria", "a11y", "contrast", "alt"]) {
        Category::Accessibility
    } else if has(&["seo", "crawl", "robots"]) {
        Category::Seo
    } else if has(&["performance", "image", "font", "cache"]) {
        Category::Performance
    } else {
        Category::Practices
    }
}

/// Table first, then substring inference.
pub fn classify(audit_id: &str) -> Category {
    lookup_category(audit_id).unwrap_or_else(|| infer_category(audit_id))
}

/// Impact tier of a failing audit.
pub fn impact_for(audit: &Audit) -> Impact {
    if let Some(score) = audit.score {
        return if score < 0.5 {
            Impact::High
        } else if score < 0.9 {
            Impact::Medium
        } else {
            Impact::Low
        };
    }

    if audit.display_mode == ScoreDisplayMode::Binary && raw_score_is_zero(&audit.raw_score) {
        return Impact::High;
    }

    Impact::Medium
}

// Numeric zeros are handled by the numeric branch; this only sees encoded scores.
fn raw_score_is_zero(raw: &Value) -> bool {
    match raw {
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(|v| v == 0.0),
        _ => false,
    }
}

/// Passing, advisory and untitled audits carry nothing to recommend.
pub fn is_actionable(audit: &Audit) -> bool {
    !audit.is_perfect() && !audit.display_mode.is_advisory() && audit.has_text()
}

/// Build a recommendation from an audit already known to be actionable.
pub fn to_recommendation(audit: &Audit, category: Category) -> Recommendation {
    Recommendation {
        id: audit.id.clone(),
        title: audit.title.clone().unwrap_or_default(),
        description: audit.description.clone().unwrap_or_default(),
        impact: impact_for(audit),
        category,
    }
}

/// Impact, then category, then case-insensitive title; id breaks exact ties.
fn sort_key(rec: &Recommendation) -> (u8, u8, String, String) {
    (
        rec.impact.rank(),
        rec.category.rank(),
        rec.title.to_lowercase(),
        rec.id.clone(),
    )
}

pub fn sort_recommendations(recommendations: &mut [Recommendation]) {
    recommendations.sort_by_cached_key(sort_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn audit(json: Value) -> Audit {
        Audit::from_value("some-audit", &json)
    }

    fn rec(id: &str, title: &str, impact: Impact, category: Category) -> Recommendation {
        Recommendation {
            id: id.into(),
            title: title.into(),
            description: "d".into(),
            impact,
            category,
        }
    }

    #[test]
    fn table_has_expected_size_and_no_duplicates() {
        assert!(CATEGORY_TABLE.len() >= 130);
        assert_eq!(category_table().len(), CATEGORY_TABLE.len());
    }

    #[test]
    fn table_wins_over_inference() {
        // "image-aspect-ratio" would infer performance from "image"
        assert_eq!(classify("image-aspect-ratio"), Category::Practices);
        assert_eq!(classify("crawlable-anchors"), Category::Accessibility);
        assert_eq!(classify("unused-javascript"), Category::Performance);
    }

    #[test]
    fn inference_patterns() {
        assert_eq!(classify("aria-new-check"), Category::Accessibility);
        assert_eq!(classify("svg-img-alt"), Category::Accessibility);
        assert_eq!(classify("seo-links"), Category::Seo);
        assert_eq!(classify("robots-meta"), Category::Seo);
        assert_eq!(classify("uses-long-cache-ttl"), Category::Performance);
        assert_eq!(classify("webfont-loading"), Category::Performance);
        assert_eq!(classify("geolocation-on-start"), Category::Practices);
    }

    #[test]
    fn impact_tiers() {
        assert_eq!(impact_for(&audit(json!({"score": 0.3}))), Impact::High);
        assert_eq!(impact_for(&audit(json!({"score": 0.5}))), Impact::Medium);
        assert_eq!(impact_for(&audit(json!({"score": 0.89}))), Impact::Medium);
        assert_eq!(impact_for(&audit(json!({"score": 0.9}))), Impact::Low);
        assert_eq!(impact_for(&audit(json!({"score": null}))), Impact::Medium);
        assert_eq!(
            impact_for(&audit(json!({"score": "0", "scoreDisplayMode": "binary"}))),
            Impact::High
        );
        assert_eq!(
            impact_for(&audit(json!({"score": "0", "scoreDisplayMode": "numeric"}))),
            Impact::Medium
        );
    }

    #[test]
    fn filter_rules() {
        let ok = json!({"title": "t", "description": "d", "score": 0.2, "scoreDisplayMode": "numeric"});
        assert!(is_actionable(&audit(ok.clone())));

        let mut perfect = ok.clone();
        perfect["score"] = json!(1);
        assert!(!is_actionable(&audit(perfect)));

        for mode in ["manual", "informative", "notApplicable"] {
            let mut advisory = ok.clone();
            advisory["scoreDisplayMode"] = json!(mode);
            advisory["score"] = json!(0);
            assert!(!is_actionable(&audit(advisory)), "{mode} should be skipped");
        }

        let mut untitled = ok.clone();
        untitled["title"] = json!("");
        assert!(!is_actionable(&audit(untitled)));

        let mut no_desc = ok;
        no_desc.as_object_mut().unwrap().remove("description");
        assert!(!is_actionable(&audit(no_desc)));
    }

    #[test]
    fn ordering_is_case_insensitive() {
        let mut recs = vec![
            rec("b", "Banana fix", Impact::Medium, Category::Seo),
            rec("a", "apple fix", Impact::Medium, Category::Seo),
        ];
        sort_recommendations(&mut recs);
        assert_eq!(recs[0].title, "apple fix");
    }

    #[test]
    fn ordering_impact_then_category() {
        let mut recs = vec![
            rec("1", "A", Impact::Low, Category::Performance),
            rec("2", "B", Impact::High, Category::Practices),
            rec("3", "C", Impact::High, Category::Performance),
            rec("4", "D", Impact::Medium, Category::Accessibility),
        ];
        sort_recommendations(&mut recs);
        let ids: Vec<_> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "4", "1"]);
    }

    #[test]
    fn equal_titles_do_not_depend_on_input_order() {
        let x = rec("x", "Same", Impact::High, Category::Seo);
        let y = rec("y", "same", Impact::High, Category::Seo);
        let mut first = vec![x.clone(), y.clone()];
        let mut second = vec![y, x];
        sort_recommendations(&mut first);
        sort_recommendations(&mut second);
        assert_eq!(first, second);
    }
}
