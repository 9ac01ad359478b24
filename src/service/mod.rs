pub mod export;
pub mod http;
pub mod normalizer;
pub mod pagespeed;
pub mod url_input;

pub use export::{ExportFormat, ReportRenderer};
pub use normalizer::{ExtractionMode, ReportNormalizer};
pub use pagespeed::{Analyzer, PageSpeedClient};
