//! Paginated plain-text document export.
//!
//! Pages have a fixed height. A header band opens the first page, a footer
//! band closes every page, and a new page starts whenever the next block
//! would run into the bottom margin. Pages are separated by form feeds.

use chrono::{DateTime, Utc};

use super::format::{center, format_ms, truncate, wrap};
use super::scale::ScoreScale;
use super::ReportRenderer;
use crate::domain::{AnalysisResult, Category, Impact, VitalStatus};
use crate::error::{AppError, Result};

pub const PAGE_SEPARATOR: char = '\u{000C}';
// Written between pages: the last line of a page, then the form feed.
const PAGE_BREAK: &str = "\n\u{000C}";

const FOOTER_LINES: usize = 2;
const BOX_GAP: usize = 1;
const LABEL_WIDTH: usize = 34;
const DESCRIPTION_LINES: usize = 2;
const INDENT: &str = "       ";

/// Narrowest page that still fits the technical panel.
pub const MIN_PAGE_WIDTH: usize = 60;
/// Body lines a page must keep between its margins.
pub const MIN_BODY_LINES: usize = 10;

/// Page size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub width: usize,
    pub height: usize,
    pub top_margin: usize,
    /// Lines kept free at the bottom; includes the footer band.
    pub bottom_margin: usize,
}

impl PageGeometry {
    /// Reject pages too small to lay out.
    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_PAGE_WIDTH {
            return Err(AppError::invalid_input(format!(
                "Page width {} is below the minimum of {}",
                self.width, MIN_PAGE_WIDTH
            )));
        }
        let reserved = self.top_margin + self.bottom_margin.max(FOOTER_LINES);
        if self.height < reserved + MIN_BODY_LINES {
            return Err(AppError::invalid_input(format!(
                "Page height {} leaves fewer than {} body lines",
                self.height, MIN_BODY_LINES
            )));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self { width: 80, height: 60, top_margin: 1, bottom_margin: 4 }
    }
}

fn category_name(category: Category) -> &'static str {
    match category {
        Category::Performance => "Rendimiento",
        Category::Accessibility => "Accesibilidad",
        Category::Seo => "SEO",
        Category::Practices => "Mejores Prácticas",
    }
}

fn impact_badge(impact: Impact) -> &'static str {
    match impact {
        Impact::High => "[ALTA]",
        Impact::Medium => "[MED] ",
        Impact::Low => "[BAJA]",
    }
}

fn tier_label(tier: VitalStatus) -> &'static str {
    match tier {
        VitalStatus::Good => "Bueno",
        VitalStatus::NeedsImprovement => "Mejorable",
        VitalStatus::Poor => "Pobre",
    }
}

/// Page-break bookkeeping.
struct Layout {
    geometry: PageGeometry,
    pages: Vec<Vec<String>>,
}

impl Layout {
    fn new(geometry: PageGeometry) -> Self {
        let mut layout = Self { geometry, pages: Vec::new() };
        layout.new_page();
        layout
    }

    fn cursor(&self) -> usize {
        self.pages.last().map_or(0, Vec::len)
    }

    fn limit(&self) -> usize {
        self.geometry
            .height
            .saturating_sub(self.geometry.bottom_margin.max(FOOTER_LINES))
    }

    fn new_page(&mut self) {
        self.pages.push(vec![String::new(); self.geometry.top_margin]);
    }

    /// Start a new page unless `required` more lines still fit.
    fn ensure(&mut self, required: usize) {
        if self.cursor() + required > self.limit() && self.cursor() > self.geometry.top_margin {
            self.new_page();
        }
    }

    fn line(&mut self, text: impl Into<String>) {
        self.ensure(1);
        if let Some(page) = self.pages.last_mut() {
            page.push(text.into());
        }
    }

    fn blank(&mut self) {
        if self.cursor() > self.geometry.top_margin {
            self.line("");
        }
    }

    fn finish(mut self, footer: &str) -> String {
        let total = self.pages.len();
        let width = self.geometry.width;
        let body = self.geometry.height.saturating_sub(FOOTER_LINES);

        for (i, page) in self.pages.iter_mut().enumerate() {
            page.resize(body, String::new());
            page.push("=".repeat(width));
            page.push(center(&format!("{} · Página {} de {}", footer, i + 1, total), width));
        }

        self.pages
            .iter()
            .map(|page| page.join("\n"))
            .collect::<Vec<_>>()
            .join(PAGE_BREAK)
    }
}

pub struct DocumentReport {
    geometry: PageGeometry,
    scale: ScoreScale,
    generated_at: DateTime<Utc>,
}

impl DocumentReport {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self { geometry: PageGeometry::default(), scale: ScoreScale::EXPORT, generated_at }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Result<Self> {
        geometry.validate()?;
        self.geometry = geometry;
        Ok(self)
    }

    fn header(&self, layout: &mut Layout) {
        let width = self.geometry.width;
        layout.line("=".repeat(width));
        layout.line(center("Reporte de Análisis Web", width));
        layout.line(center("Powered by Google PageSpeed Insights", width));
        layout.line("=".repeat(width));
        layout.blank();
    }

    fn section_title(&self, layout: &mut Layout, title: &str) {
        layout.line(title);
        layout.line("-".repeat(self.geometry.width));
    }

    fn scores(&self, layout: &mut Layout, result: &AnalysisResult) {
        layout.ensure(8);
        self.section_title(layout, "Resumen de Puntuaciones");

        let box_width = self.geometry.width.saturating_sub(BOX_GAP * 3) / 4;
        let inner = box_width.saturating_sub(2);
        let boxes: Vec<[String; 5]> = Category::ALL
            .iter()
            .map(|&category| {
                let score = result.scores.get(category);
                let tier = self.scale.tier(score);
                [
                    format!("+{}+", "-".repeat(inner)),
                    format!("|{}|", center(&truncate(category_name(category), inner), inner)),
                    format!("|{}|", center(&format!("{} /100", score), inner)),
                    format!("|{}|", center(&format!("({})", tier_label(tier)), inner)),
                    format!("+{}+", "-".repeat(inner)),
                ]
            })
            .collect();

        let gap = " ".repeat(BOX_GAP);
        for row in 0..5 {
            let line: Vec<&str> = boxes.iter().map(|b| b[row].as_str()).collect();
            layout.line(line.join(&gap));
        }
        layout.blank();
    }

    fn vitals(&self, layout: &mut Layout, result: &AnalysisResult) {
        let vitals = result.core_web_vitals.present();
        if vitals.is_empty() {
            return;
        }

        layout.ensure(vitals.len() + 3);
        self.section_title(layout, "Core Web Vitals");
        for (_, vital) in vitals {
            layout.line(format!(
                "{:<width$}{:<16}● {}",
                format!("{}:", vital.name),
                vital.display_value(),
                vital.status.as_str(),
                width = LABEL_WIDTH
            ));
        }
        layout.blank();
    }

    fn technical(&self, layout: &mut Layout, result: &AnalysisResult) {
        let info = &result.technical_info;
        let rows = [
            ("URL del Sitio:", result.final_url.clone()),
            ("Tiempo de Análisis:", result.fetch_time.clone()),
            ("Tiempo de Respuesta del Servidor:", format_ms(info.server_response_time)),
            ("DOM Cargado:", format_ms(info.dom_content_loaded)),
            ("Tiempo de Carga de Página:", format_ms(info.page_load_time)),
        ];

        layout.ensure(rows.len() + 5);
        self.section_title(layout, "Información Técnica");

        let inner = self.geometry.width.saturating_sub(4);
        let value_width = inner.saturating_sub(LABEL_WIDTH + 1);
        let rule = format!("+{}+", "-".repeat(self.geometry.width.saturating_sub(2)));
        layout.line(rule.clone());
        for (label, value) in rows {
            let text = format!("{:<lw$} {:<vw$}", label, truncate(&value, value_width), lw = LABEL_WIDTH, vw = value_width);
            layout.line(format!("| {} |", text));
        }
        layout.line(rule);
        layout.blank();
    }

    fn recommendations(&self, layout: &mut Layout, result: &AnalysisResult) {
        if result.recommendations.is_empty() {
            return;
        }

        layout.ensure(6);
        self.section_title(layout, "Recomendaciones por Categoría");

        let width = self.geometry.width;
        for category in Category::ALL {
            let recs = result.recommendations_for(category);
            if recs.is_empty() {
                continue;
            }

            layout.ensure(5);
            layout.line(format!("» {} ({})", category_name(category), recs.len()));
            layout.blank();

            for (index, rec) in recs.iter().enumerate() {
                let description: Vec<String> = wrap(&rec.description, width.saturating_sub(INDENT.len()))
                    .into_iter()
                    .take(DESCRIPTION_LINES)
                    .collect();

                layout.ensure(description.len() + 2);
                let title = format!("{} {}. {}", impact_badge(rec.impact), index + 1, rec.title);
                layout.line(truncate(&title, width));
                for line in description {
                    layout.line(format!("{}{}", INDENT, line));
                }
                layout.blank();
            }
        }
    }
}

impl ReportRenderer for DocumentReport {
    fn render(&self, result: &AnalysisResult) -> Result<String> {
        let mut layout = Layout::new(self.geometry);

        self.header(&mut layout);
        self.scores(&mut layout, result);
        self.vitals(&mut layout, result);
        self.technical(&mut layout, result);
        self.recommendations(&mut layout, result);

        let footer = format!("Generado el {}", self.generated_at.format("%d/%m/%Y %H:%M"));
        tracing::debug!(pages = layout.pages.len(), "document laid out");
        Ok(layout.finish(&footer))
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Recommendation;
    use crate::test_utils::fixtures;
    use chrono::TimeZone;

    fn report() -> DocumentReport {
        DocumentReport::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
    }

    fn pages(text: &str) -> Vec<&str> {
        text.split(PAGE_BREAK).collect()
    }

    #[test]
    fn every_page_has_fixed_height_and_footer() {
        let mut result = fixtures::sample_result();
        for i in 0..40 {
            result.recommendations.push(Recommendation {
                id: format!("extra-{i}"),
                title: format!("Extra recommendation {i}"),
                description: "A description long enough to wrap onto a second line of the document body when rendered at eighty columns.".into(),
                impact: Impact::Low,
                category: Category::Practices,
            });
        }
        let text = report().render(&result).unwrap();
        let pages = pages(&text);

        assert!(pages.len() > 1, "expected a page break");
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.lines().count(), 60, "page {} height", i + 1);
            let last = page.lines().last().unwrap();
            assert!(last.contains("Generado el 01/05/2024 12:30"));
            assert!(last.contains(&format!("Página {} de {}", i + 1, pages.len())));
        }
    }

    #[test]
    fn pages_start_with_the_top_margin() {
        let text = report().render(&fixtures::sample_result()).unwrap();
        for page in pages(&text) {
            assert_eq!(page.lines().next(), Some(""));
            assert!(!page.contains(PAGE_SEPARATOR));
        }
    }

    #[test]
    fn undersized_geometry_is_rejected() {
        let narrow = PageGeometry { width: 30, ..PageGeometry::default() };
        let short = PageGeometry { height: 3, ..PageGeometry::default() };
        let margins_only = PageGeometry { height: 20, top_margin: 8, bottom_margin: 4, ..PageGeometry::default() };

        for geometry in [narrow, short, margins_only] {
            let err = report().with_geometry(geometry).err().unwrap();
            assert!(matches!(err, AppError::InvalidInput(_)), "{geometry:?}");
        }
    }

    #[test]
    fn smallest_accepted_geometry_renders() {
        let geometry = PageGeometry {
            width: MIN_PAGE_WIDTH,
            height: 1 + 4 + MIN_BODY_LINES,
            top_margin: 1,
            bottom_margin: 4,
        };
        let text = report()
            .with_geometry(geometry)
            .unwrap()
            .render(&fixtures::sample_result())
            .unwrap();

        for page in pages(&text) {
            assert_eq!(page.lines().count(), geometry.height);
            assert!(page.lines().all(|l| l.chars().count() <= MIN_PAGE_WIDTH));
        }
    }

    #[test]
    fn score_boxes_use_export_scale() {
        let text = report().render(&fixtures::sample_result()).unwrap();
        assert!(text.contains("87 /100"));
        let row = text.lines().find(|l| l.contains("(Pobre)")).unwrap();
        let tiers: Vec<&str> = row.split('|').map(str::trim).filter(|s| !s.is_empty()).collect();
        // 87 rates good on screen but not in the document
        assert_eq!(tiers, vec!["(Pobre)", "(Mejorable)", "(Bueno)", "(Mejorable)"]);
    }

    #[test]
    fn recommendations_grouped_in_category_order() {
        let text = report().render(&fixtures::sample_result()).unwrap();
        let perf = text.find("» Rendimiento (2)").unwrap();
        let a11y = text.find("» Accesibilidad (1)").unwrap();
        let bp = text.find("» Mejores Prácticas (1)").unwrap();
        assert!(perf < a11y && a11y < bp);
        assert!(!text.contains("» SEO"));
        assert!(text.contains("[ALTA] 1. Reduce unused JavaScript"));
        assert!(text.contains("[BAJA] 2. Font display"));
    }

    #[test]
    fn description_is_capped_at_two_lines() {
        let mut result = fixtures::sample_result();
        result.recommendations = vec![Recommendation {
            id: "long".into(),
            title: "Long one".into(),
            description: "word ".repeat(100),
            impact: Impact::High,
            category: Category::Seo,
        }];
        let text = report().render(&result).unwrap();
        let described = text.lines().filter(|l| l.starts_with(INDENT) && l.contains("word")).count();
        assert_eq!(described, 2);
    }

    #[test]
    fn vitals_skipped_when_absent() {
        let mut result = fixtures::sample_result();
        result.core_web_vitals = Default::default();
        let text = report().render(&result).unwrap();
        assert!(!text.contains("Core Web Vitals"));
        assert!(text.contains("Información Técnica"));
    }

    #[test]
    fn long_values_are_truncated_in_panel() {
        let mut result = fixtures::sample_result();
        result.final_url = format!("https://example.com/{}", "a".repeat(200));
        let text = report().render(&result).unwrap();
        let row = text.lines().find(|l| l.contains("URL del Sitio:")).unwrap();
        assert_eq!(row.chars().count(), 80);
        assert!(row.contains("..."));
    }
}
