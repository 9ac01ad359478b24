//! Runtime configuration for the analysis backend.

use std::time::Duration;

use clap::ValueEnum;

use crate::error::{AppError, Result};
use crate::service::normalizer::ExtractionMode;

/// Public PageSpeed Insights v5 endpoint.
pub const PAGESPEED_API_URL: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

pub const DEFAULT_LOCALE: &str = "es";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Device profile Lighthouse emulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    #[default]
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

/// Which deployment the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Google's API, keyed, with explicit categories, strategy and locale.
    PageSpeed {
        endpoint: String,
        api_key: Option<String>,
        strategy: Strategy,
        locale: String,
    },
    /// A relay that takes the target URL only.
    Proxy { endpoint: String },
}

impl Backend {
    pub fn pagespeed(api_key: Option<String>) -> Self {
        Backend::PageSpeed {
            endpoint: PAGESPEED_API_URL.to_string(),
            api_key,
            strategy: Strategy::default(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::PageSpeed { .. } => "pagespeed",
            Backend::Proxy { .. } => "proxy",
        }
    }

    /// Credential required by this backend, if any.
    ///
    /// Checked at request time so that invalid input is reported first.
    pub fn require_credentials(&self) -> Result<()> {
        match self {
            Backend::PageSpeed { api_key, .. } if api_key.as_deref().map_or(true, str::is_empty) => {
                Err(AppError::missing_configuration(
                    "API key not configured. Please set PAGESPEED_API_KEY",
                ))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: Backend,
    pub timeout: Duration,
    pub extraction: ExtractionMode,
}

impl AppConfig {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            extraction: ExtractionMode::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_extraction(mut self, extraction: ExtractionMode) -> Self {
        self.extraction = extraction;
        self
    }
}
