//! PageSpeed Insights client.
//!
//! Validates the input URL, calls the configured backend once and hands the
//! response body to the `ReportNormalizer`. No retries; every failure is
//! terminal for the request.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::{AppConfig, Backend};
use crate::domain::{AnalysisResult, RawReport};
use crate::error::{AppError, Result};
use crate::service::http::create_client;
use crate::service::normalizer::ReportNormalizer;
use crate::service::url_input;

/// Lighthouse categories requested from the keyed backend.
const CATEGORIES: [&str; 4] = ["performance", "accessibility", "seo", "best-practices"];

pub struct PageSpeedClient {
    client: Client,
    backend: Backend,
    normalizer: ReportNormalizer,
}

impl PageSpeedClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = create_client(config.timeout)?;
        tracing::info!(
            backend = config.backend.name(),
            "PageSpeed client ready ({:?} extraction)",
            config.extraction
        );
        Ok(Self {
            client,
            backend: config.backend.clone(),
            normalizer: ReportNormalizer::new(config.extraction),
        })
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Analyze a user-supplied URL.
    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisResult> {
        let target = url_input::prepare(url)?;
        self.backend.require_credentials()?;

        let request_url = build_request_url(&self.backend, &target)?;
        tracing::info!("Running PageSpeed analysis for: {}", target);

        let raw = self.fetch(request_url).await?;
        let mut result = self.normalizer.normalize(raw)?;
        if result.url.is_empty() {
            result.url = target;
        }

        tracing::info!(
            performance = result.scores.performance,
            recommendations = result.recommendations.len(),
            "analysis complete for {}",
            result.final_url
        );
        Ok(result)
    }

    async fn fetch(&self, request_url: Url) -> Result<RawReport> {
        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("PageSpeed request failed: {}", e);
                AppError::upstream(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::upstream(e.to_string()))?;

        if !status.is_success() {
            let detail = upstream_error_message(&body)
                .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
            tracing::error!("PageSpeed API returned {}: {}", status, detail);
            return Err(AppError::upstream(detail));
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Ok(RawReport::new(value)),
            Err(e) => {
                tracing::warn!("PageSpeed response is not JSON: {}", e);
                Err(AppError::malformed("Invalid API response: No lighthouse result"))
            }
        }
    }
}

/// Anything that can turn a user-supplied URL into an analysis.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult>;

    /// Analyze several URLs one after another.
    async fn analyze_urls(&self, urls: &[String]) -> Vec<Result<AnalysisResult>> {
        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            results.push(self.analyze(url).await);
        }
        results
    }

    fn name(&self) -> &'static str;
}

#[async_trait]
impl Analyzer for PageSpeedClient {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult> {
        self.analyze_url(url).await
    }

    fn name(&self) -> &'static str {
        self.backend.name()
    }
}

/// Full request URL for the backend.
pub fn build_request_url(backend: &Backend, target: &str) -> Result<Url> {
    match backend {
        Backend::PageSpeed { endpoint, api_key, strategy, locale } => {
            let mut url = parse_endpoint(endpoint)?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("url", target);
                if let Some(key) = api_key {
                    query.append_pair("key", key);
                }
                query.append_pair("strategy", strategy.as_str());
                query.append_pair("locale", locale);
                for category in CATEGORIES {
                    query.append_pair("category", category);
                }
            }
            Ok(url)
        }
        Backend::Proxy { endpoint } => {
            let mut url = parse_endpoint(endpoint)?;
            url.query_pairs_mut().append_pair("url", target);
            Ok(url)
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    Url::parse(endpoint).map_err(|e| {
        AppError::missing_configuration(format!("Invalid backend endpoint {}: {}", endpoint, e))
    })
}

/// `error.message` from a Google API error body, if any.
fn upstream_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
