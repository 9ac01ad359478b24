/// Shared fixtures for unit tests
pub mod fixtures {
    use crate::domain::{
        AnalysisResult, Category, CategoryScores, CoreWebVital, CoreWebVitals, Impact, RawReport,
        Recommendation, TechnicalInfo, VitalStatus,
    };

    pub const SAMPLE_REPORT_JSON: &str = include_str!("../tests/fixtures/pagespeed_report.json");

    /// Realistic PageSpeed payload where every audit is referenced by the
    /// category the id table assigns it to.
    pub fn sample_report() -> RawReport {
        serde_json::from_str(SAMPLE_REPORT_JSON).expect("fixture is valid JSON")
    }

    pub fn recommendation(id: &str, title: &str, impact: Impact, category: Category) -> Recommendation {
        Recommendation {
            id: id.into(),
            title: title.into(),
            description: format!("How to fix {}", title),
            impact,
            category,
        }
    }

    /// Hand-built result for renderer tests, independent of the normalizer.
    pub fn sample_result() -> AnalysisResult {
        AnalysisResult {
            url: "https://example.com".into(),
            final_url: "https://example.com/".into(),
            fetch_time: "2024-05-01T10:00:00.000Z".into(),
            scores: CategoryScores {
                performance: 42,
                accessibility: 87,
                seo: 92,
                best_practices: 50,
            },
            core_web_vitals: CoreWebVitals {
                lcp: Some(CoreWebVital {
                    name: "Largest Contentful Paint".into(),
                    value: 4121.0,
                    threshold: 2500.0,
                    unit: "ms".into(),
                    status: VitalStatus::Poor,
                }),
                fcp: None,
                cls: Some(CoreWebVital {
                    name: "Cumulative Layout Shift".into(),
                    value: 0.012,
                    threshold: 0.1,
                    unit: String::new(),
                    status: VitalStatus::Good,
                }),
            },
            recommendations: vec![
                recommendation("unused-javascript", "Reduce unused JavaScript", Impact::High, Category::Performance),
                recommendation("color-contrast", "Improve color contrast", Impact::High, Category::Accessibility),
                recommendation("errors-in-console", "Browser errors were logged", Impact::Medium, Category::Practices),
                recommendation("font-display-insight", "Font display", Impact::Low, Category::Performance),
            ],
            technical_info: TechnicalInfo {
                server_response_time: 3150.0,
                dom_content_loaded: 912.4,
                page_load_time: 1650.0,
            },
            full_report: RawReport::default(),
        }
    }
}
