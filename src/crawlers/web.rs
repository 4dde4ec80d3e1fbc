use crate::crawlers::PageFetcher;
use crate::error::{AuditError, FetchError};
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder};
use serde_json::{Map, Value, json};
use std::time::Duration;
use tokio::time::timeout;

/// Common local WebDriver endpoints tried when the configured one is down
const FALLBACK_WEBDRIVER_URLS: [&str; 2] = [
    "http://localhost:9515", // ChromeDriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Reads the HTTP status of the current document, 0 when the browser hides it
const RESPONSE_STATUS_SCRIPT: &str = r#"
const nav = performance.getEntriesByType('navigation')[0];
return nav && typeof nav.responseStatus === 'number' ? nav.responseStatus : 0;
"#;

/// Page fetcher backed by a single WebDriver browser session
pub struct WebFetcher {
    client: Client,
    navigation_timeout: Duration,
}

impl WebFetcher {
    /// Opens a browser session, trying the common local endpoints if
    /// `webdriver_url` does not answer.
    pub async fn connect(
        webdriver_url: &str,
        headless: bool,
        navigation_timeout: Duration,
    ) -> Result<Self, AuditError> {
        let client = connect_to_webdriver(webdriver_url, headless).await?;

        let timeouts = TimeoutConfiguration::new(
            Some(navigation_timeout),
            Some(navigation_timeout),
            None,
        );
        if let Err(e) = client.update_timeouts(timeouts).await {
            ::log::warn!("Failed to set WebDriver timeouts: {}", e);
        }

        Ok(Self {
            client,
            navigation_timeout,
        })
    }

    /// Ends the browser session
    pub async fn close(self) {
        if let Err(e) = self.client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        } else {
            ::log::debug!("WebDriver session closed");
        }
    }

    async fn load(&self, url: &str) -> Result<String, FetchError> {
        self.client.goto(url).await?;

        if let Some(status) = self.response_status().await {
            if !(200..300).contains(&status) {
                return Err(FetchError::Status(status));
            }
        }

        Ok(self.client.source().await?)
    }

    async fn response_status(&self) -> Option<u16> {
        match self.client.execute(RESPONSE_STATUS_SCRIPT, Vec::new()).await {
            Ok(value) => value
                .as_u64()
                .filter(|&status| status != 0)
                .and_then(|status| u16::try_from(status).ok()),
            Err(e) => {
                ::log::debug!("Could not read response status: {}", e);
                None
            }
        }
    }
}

impl PageFetcher for WebFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        match timeout(self.navigation_timeout, self.load(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.navigation_timeout)),
        }
    }
}

fn browser_capabilities(headless: bool) -> Map<String, Value> {
    let mut chrome_args = vec!["--disable-gpu", "--no-sandbox", "--window-size=1366,900"];
    let mut firefox_args = Vec::new();
    if headless {
        chrome_args.push("--headless=new");
        firefox_args.push("-headless");
    }

    let mut caps = Map::new();
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": chrome_args }));
    caps.insert("moz:firefoxOptions".to_string(), json!({ "args": firefox_args }));
    caps
}

async fn connect_to_webdriver(webdriver_url: &str, headless: bool) -> Result<Client, AuditError> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(browser_capabilities(headless));

    let first_error = match builder.connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => e,
    };
    ::log::warn!(
        "Failed to connect to WebDriver at {}: {}",
        webdriver_url,
        first_error
    );

    for url in FALLBACK_WEBDRIVER_URLS {
        if url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = builder.connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(AuditError::Connect {
        url: webdriver_url.to_string(),
        source: first_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_capabilities() {
        let caps = browser_capabilities(true);
        let chrome_args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(chrome_args.contains(&json!("--headless=new")));
        assert_eq!(caps["moz:firefoxOptions"]["args"], json!(["-headless"]));
    }

    #[test]
    fn test_headed_capabilities() {
        let caps = browser_capabilities(false);
        let chrome_args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(!chrome_args.iter().any(|a| a == "--headless=new"));
        assert_eq!(caps["moz:firefoxOptions"]["args"], json!([]));
    }
}
