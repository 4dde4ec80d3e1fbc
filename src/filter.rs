use crate::error::AuditError;
use regex::Regex;
use url::Url;

/// Decides which discovered URLs belong to the audited site.
///
/// A URL is in scope when its serialized form starts with the base URL,
/// carries no `#` fragment, and matches none of the exclude patterns.
#[derive(Debug)]
pub struct UrlFilter {
    base_url: Url,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a new URL filter; the base URL should already be normalized.
    pub fn new(base_url: Url, exclude_patterns: &[String]) -> Result<Self, AuditError> {
        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            base_url,
            exclude_regexes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Determine if a URL should be audited
    pub fn should_crawl(&self, url: &Url) -> bool {
        let url_str = url.as_str();

        if !url_str.starts_with(self.base_url.as_str()) {
            return false;
        }

        if url_str.contains('#') {
            return false;
        }

        !self.exclude_regexes.iter().any(|regex| regex.is_match(url_str))
    }

    /// Resolve an `href` against the page it was found on and filter it.
    pub fn accept(&self, page_url: &Url, href: &str) -> Option<Url> {
        let resolved = page_url.join(href.trim()).ok()?;
        if self.should_crawl(&resolved) {
            Some(resolved)
        } else {
            ::log::debug!("URL filter rejected: {}", resolved);
            None
        }
    }
}
