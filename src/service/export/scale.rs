//! Score tiers. The on-screen view and the exported document use different
//! cut-offs and must stay independent.

use crate::domain::VitalStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreScale {
    /// Minimum score rated good.
    pub good: u8,
    /// Minimum score rated needs-improvement.
    pub medium: u8,
}

impl ScoreScale {
    /// Terminal / on-screen scale.
    pub const UI: ScoreScale = ScoreScale { good: 85, medium: 50 };
    /// Exported document scale.
    pub const EXPORT: ScoreScale = ScoreScale { good: 90, medium: 50 };

    pub fn tier(&self, score: u8) -> VitalStatus {
        if score >= self.good {
            VitalStatus::Good
        } else if score >= self.medium {
            VitalStatus::NeedsImprovement
        } else {
            VitalStatus::Poor
        }
    }
}
