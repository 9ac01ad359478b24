//! Category driven - walks each category's `auditRefs`.
//!
//! The category comes from whichever report category references the audit.
//! Audits no known category references are left out.

use std::collections::HashSet;

use super::RecommendationSource;
use crate::domain::{Audit, Category, LighthouseView};

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryDriven;

impl RecommendationSource for CategoryDriven {
    fn candidates(&self, lh: &LighthouseView<'_>) -> Vec<(Audit, Category)> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for category in Category::ALL {
            for id in lh.audit_refs(category.report_key()) {
                // first category in the fixed order owns a shared audit
                if !seen.insert(id) {
                    continue;
                }
                match lh.audit(id) {
                    Some(audit) => out.push((audit, category)),
                    None => tracing::debug!("auditRef {} has no audit record", id),
                }
            }
        }

        out
    }

    fn name(&self) -> &'static str {
        "category-driven"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawReport;
    use serde_json::json;

    #[test]
    fn only_referenced_audits_are_candidates() {
        let raw = RawReport::new(json!({"lighthouseResult": {
            "categories": {
                "performance": {"auditRefs": [{"id": "image-alt"}, {"id": "missing"}]},
                "best-practices": {"auditRefs": [{"id": "doctype"}, {"id": "image-alt"}]}
            },
            "audits": {
                "image-alt": {"title": "t"},
                "doctype": {"title": "t"},
                "orphan": {"title": "t"}
            }
        }}));
        let found = CategoryDriven.candidates(&raw.lighthouse().unwrap());
        let ids: Vec<_> = found.iter().map(|(a, c)| (a.id.as_str(), *c)).collect();

        assert_eq!(
            ids,
            vec![("image-alt", Category::Performance), ("doctype", Category::Practices)]
        );
    }
}
