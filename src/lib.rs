//! Crawls a site through a headless browser and audits the on-page SEO
//! signals of every page it reaches under a base URL.

pub mod audit;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod report;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::AuditConfig;
pub use error::{AuditError, FetchError};
pub use results::{AuditResults, PageResult, Summary};

use crawlers::{PageFetcher, WebFetcher};
use filter::UrlFilter;
use report::ReportMeta;
use std::path::{Path, PathBuf};

/// What a finished run produced
#[derive(Debug)]
pub struct AuditOutcome {
    pub results: AuditResults,
    pub report_path: PathBuf,
}

/// Main builder for an audit run
pub struct Auditor {
    config: AuditConfig,
}

impl Auditor {
    /// Create a new Auditor for the given base URL with default settings
    pub fn new(base_url: &str) -> Self {
        Self {
            config: AuditConfig::new(base_url),
        }
    }

    pub fn from_config(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Replace all settings with the given configuration
    pub fn with_config(mut self, config: AuditConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let config = AuditConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.to_string();
        self
    }

    /// Set the maximum number of pages checked
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.report_path = path.into();
        self
    }

    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Set the per-navigation timeout
    pub fn with_navigation_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.navigation_timeout_secs = timeout_seconds;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Crawl with a browser session, then render and write the report.
    ///
    /// The browser session is closed before the report is written, whether
    /// or not the crawl found anything.
    pub async fn run(self) -> Result<AuditOutcome, AuditError> {
        let filter = self.url_filter()?;

        ::log::info!("Starting SEO audit for: {}", filter.base_url());
        let mut fetcher = WebFetcher::connect(
            &self.config.webdriver_url,
            self.config.headless,
            self.config.navigation_timeout(),
        )
        .await?;

        let results = crawlers::traverse(&mut fetcher, &filter, self.config.max_pages).await;
        fetcher.close().await;

        self.finish(results)
    }

    /// Crawl with a caller-supplied fetcher, then render and write the report.
    pub async fn run_with<F: PageFetcher>(self, fetcher: &mut F) -> Result<AuditOutcome, AuditError> {
        let filter = self.url_filter()?;
        let results = crawlers::traverse(fetcher, &filter, self.config.max_pages).await;
        self.finish(results)
    }

    fn url_filter(&self) -> Result<UrlFilter, AuditError> {
        let base_url = self.config.normalized_base_url()?;
        UrlFilter::new(base_url, &self.config.exclude_patterns)
    }

    fn finish(self, results: AuditResults) -> Result<AuditOutcome, AuditError> {
        let meta = ReportMeta::now(&results.base_url);
        let markdown = report::render_report(&results, &meta);
        report::write_report(&self.config.report_path, &markdown)?;
        ::log::info!("Report written to {}", self.config.report_path.display());

        Ok(AuditOutcome {
            results,
            report_path: self.config.report_path,
        })
    }
}
