pub mod headings;
pub mod html;

#[cfg(test)]
mod tests;

use crate::filter::UrlFilter;
pub use headings::{Heading, NestingViolation};
use serde::{Deserialize, Serialize};
use url::Url;

/// One `<script type="application/ld+json">` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JsonLdBlock {
    Valid(serde_json::Value),
    /// Stands in for a block whose body is not valid JSON
    Invalid { error: String },
}

impl JsonLdBlock {
    pub fn is_valid(&self) -> bool {
        matches!(self, JsonLdBlock::Valid(_))
    }

    /// Schema types declared by the block, including `@graph` members
    pub fn schema_types(&self) -> Vec<String> {
        let mut types = Vec::new();
        if let JsonLdBlock::Valid(value) = self {
            collect_types(value, &mut types);
        }
        types
    }
}

fn collect_types(value: &serde_json::Value, types: &mut Vec<String>) {
    match value {
        serde_json::Value::Array(items) => {
            for item in items {
                collect_types(item, types);
            }
        }
        serde_json::Value::Object(map) => {
            match map.get("@type") {
                Some(serde_json::Value::String(t)) => types.push(t.clone()),
                Some(serde_json::Value::Array(ts)) => {
                    types.extend(ts.iter().filter_map(|t| t.as_str()).map(str::to_string))
                }
                _ => {}
            }
            if let Some(graph) = map.get("@graph") {
                collect_types(graph, types);
            }
        }
        _ => {}
    }
}

/// An `<img>` without usable alt text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingAltImage {
    pub src: String,
    pub parent_tag: String,
}

/// Raw SEO signals read from one rendered document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSignals {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub structured_data: Vec<JsonLdBlock>,
    pub images_without_alt: Vec<MissingAltImage>,
    /// Trimmed text of every H1, in document order
    pub h1_texts: Vec<String>,
    /// Every H1-H6, in document order
    pub headings: Vec<Heading>,
}

/// Result of parsing a rendered page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    pub signals: PageSignals,
    /// In-scope links, de-duplicated, in document order
    pub links: Vec<Url>,
}

/// Parses the document once, extracting SEO signals and in-scope links.
pub fn parse(source: &str, page_url: &Url, filter: &UrlFilter) -> ParsedPage {
    let doc = scraper::Html::parse_document(source);
    let signals = html::extract_signals(&doc, page_url);
    let links = html::discover_links(&doc, page_url, filter);
    ParsedPage { signals, links }
}
