use crate::error::AuditError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Configuration for an SEO audit run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// URL the crawl starts from; every audited page shares this prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hard cap on the number of pages checked
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Per-navigation timeout in seconds
    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,

    /// Where the Markdown report is written
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Regex patterns for discovered URLs that are never audited
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_max_pages() -> usize {
    50
}

fn default_navigation_timeout_secs() -> u64 {
    30
}

fn default_report_path() -> PathBuf {
    PathBuf::from("reports/seo-report.md")
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_exclude_patterns() -> Vec<String> {
    vec![r"(?i)\.(jpg|jpeg|png|gif|webp|avif|css|js|ico|svg|woff|woff2|ttf|eot|pdf|xml|txt)$".to_string()]
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::new(&default_base_url())
    }
}

impl AuditConfig {
    /// Create a new configuration with default values
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            max_pages: default_max_pages(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
            report_path: default_report_path(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            exclude_patterns: default_exclude_patterns(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AuditError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| AuditError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, AuditError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    /// Parses the base URL, forcing a trailing slash so it works as a prefix.
    pub fn normalized_base_url(&self) -> Result<Url, AuditError> {
        normalize_base_url(&self.base_url)
    }
}

/// Parses `raw` as an http(s) URL and makes sure its path ends with `/`.
pub fn normalize_base_url(raw: &str) -> Result<Url, AuditError> {
    let invalid = |reason: String| AuditError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    url.set_fragment(None);
    url.set_query(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
