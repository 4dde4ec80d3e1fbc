
use crate::crawlers::PageFetcher;
use crate::error::FetchError;
use std::collections::HashMap;

const BASE: &str = "http://localhost:3000/";

/// Serves a fixed set of pages; anything else is a 404
#[derive(Default)]
struct SiteFetcher {
    pages: HashMap<String, String>,
    requests: Vec<String>,
}

impl SiteFetcher {
    fn page(mut self, path: &str, html: &str) -> Self {
        self.pages
            .insert(format!("http://localhost:3000{}", path), html.to_string());
        self
    }
}

impl PageFetcher for SiteFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        self.requests.push(url.to_string());
        self.pages.get(url).cloned().ok_or(FetchError::Status(404))
    }
}

fn links(targets: &[&str]) -> String {
    targets
        .iter()
        .map(|t| format!(r#"<a href="{}">link</a>"#, t))
        .collect()
}
