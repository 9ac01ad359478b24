//! Direct scan - classifies every audit in the payload.
//!
//! Categories come from the static id table, falling back to substring
//! inference on the audit id for ids the table does not know.

use super::classify::classify;
use super::RecommendationSource;
use crate::domain::{Audit, Category, LighthouseView};

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectScan;

impl RecommendationSource for DirectScan {
    fn candidates(&self, lh: &LighthouseView<'_>) -> Vec<(Audit, Category)> {
        lh.all_audits()
            .into_iter()
            .map(|audit| {
                let category = classify(&audit.id);
                (audit, category)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "direct-scan"
    }
}
