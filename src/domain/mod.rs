pub mod models;
pub mod raw;

pub use models::{
    AnalysisResult, Category, CategoryScores, CoreWebVital, CoreWebVitals, Impact,
    Recommendation, TechnicalInfo, VitalStatus,
};
pub use raw::{Audit, LighthouseView, RawReport, ScoreDisplayMode};
