use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{AppConfig, Backend, Strategy, DEFAULT_LOCALE, DEFAULT_TIMEOUT_SECS, PAGESPEED_API_URL};
use crate::service::{ExportFormat, ExtractionMode};

#[derive(Parser, Debug)]
#[command(name = "web-analyzer")]
#[command(about = "Web performance analysis through PageSpeed Insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Debug logging for this crate
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one or more URLs through the configured backend
    Analyze {
        /// URLs to analyze; `https://` is added when no scheme is given
        #[arg(required = true)]
        urls: Vec<String>,

        #[command(flatten)]
        backend: BackendArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Normalize a saved PageSpeed JSON response without network access
    Normalize {
        /// Path to the raw API response
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct BackendArgs {
    /// PageSpeed Insights API key
    #[arg(long, env = "PAGESPEED_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// URL-only relay endpoint; when set the keyed API is not used
    #[arg(long, env = "PAGESPEED_PROXY_URL")]
    pub proxy: Option<String>,

    /// Keyed API endpoint
    #[arg(long, env = "PAGESPEED_ENDPOINT", default_value = PAGESPEED_API_URL)]
    pub endpoint: String,

    /// Device strategy
    #[arg(long, env = "PAGESPEED_STRATEGY", value_enum, default_value = "mobile")]
    pub strategy: Strategy,

    /// Report locale
    #[arg(long, env = "PAGESPEED_LOCALE", default_value = DEFAULT_LOCALE)]
    pub locale: String,

    /// Request timeout in seconds
    #[arg(long, env = "PAGESPEED_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ExportFormat,

    /// Directory to save the report in (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Recommendation extraction strategy
    #[arg(long, value_enum, default_value = "direct-scan")]
    pub extraction: ExtractionMode,

    /// Show only the first N recommendations on screen
    #[arg(long)]
    pub top: Option<usize>,
}

impl BackendArgs {
    pub fn backend(&self) -> Backend {
        match &self.proxy {
            Some(endpoint) => Backend::Proxy { endpoint: endpoint.clone() },
            None => Backend::PageSpeed {
                endpoint: self.endpoint.clone(),
                api_key: self.api_key.clone(),
                strategy: self.strategy,
                locale: self.locale.clone(),
            },
        }
    }

    pub fn to_config(&self, extraction: ExtractionMode) -> AppConfig {
        AppConfig::new(self.backend())
            .with_timeout(Duration::from_secs(self.timeout))
            .with_extraction(extraction)
    }
}
