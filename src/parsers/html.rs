use crate::filter::UrlFilter;
use crate::parsers::{Heading, JsonLdBlock, MissingAltImage, PageSignals};
use crate::utils::collapse_whitespace;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static META: LazyLock<Selector> = LazyLock::new(|| selector("meta[name]"));
static LINK_REL: LazyLock<Selector> = LazyLock::new(|| selector("link[rel]"));
static SCRIPT: LazyLock<Selector> = LazyLock::new(|| selector("script[type]"));
static IMG: LazyLock<Selector> = LazyLock::new(|| selector("img"));
static HEADINGS: LazyLock<Selector> = LazyLock::new(|| selector("h1, h2, h3, h4, h5, h6"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

/// Reads every SEO signal from the document. Never mutates it.
pub fn extract_signals(doc: &Html, page_url: &Url) -> PageSignals {
    let headings = extract_headings(doc);
    let h1_texts = headings
        .iter()
        .filter(|h| h.level == 1)
        .map(|h| h.text.clone())
        .collect();

    PageSignals {
        title: extract_title(doc),
        description: extract_description(doc),
        canonical: extract_canonical(doc, page_url),
        structured_data: extract_structured_data(doc),
        images_without_alt: extract_images_without_alt(doc),
        h1_texts,
        headings,
    }
}

/// Only the document title counts; `<title>` inside inline SVG labels an icon.
fn extract_title(doc: &Html) -> String {
    doc.select(&TITLE)
        .find(|el| !inside_svg(el))
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}

fn inside_svg(el: &ElementRef) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name().eq_ignore_ascii_case("svg"))
}

fn extract_description(doc: &Html) -> String {
    doc.select(&META)
        .find(|el| {
            el.value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
        })
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

/// Resolves relative canonical hrefs the way the DOM `href` property does.
fn extract_canonical(doc: &Html, page_url: &Url) -> String {
    let href = doc
        .select(&LINK_REL)
        .find(|el| {
            el.value().attr("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("canonical"))
            })
        })
        .and_then(|el| el.value().attr("href"))
        .map(str::trim)
        .unwrap_or_default();

    if href.is_empty() {
        return String::new();
    }
    match page_url.join(href) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

fn extract_structured_data(doc: &Html) -> Vec<JsonLdBlock> {
    doc.select(&SCRIPT)
        .filter(|el| {
            el.value()
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"))
        })
        .map(|el| {
            let body = el.text().collect::<String>();
            match serde_json::from_str(body.trim()) {
                Ok(value) => JsonLdBlock::Valid(value),
                Err(e) => JsonLdBlock::Invalid {
                    error: e.to_string(),
                },
            }
        })
        .collect()
}

fn extract_images_without_alt(doc: &Html) -> Vec<MissingAltImage> {
    doc.select(&IMG)
        .filter(|el| el.value().attr("alt").is_none_or(|alt| alt.trim().is_empty()))
        .map(|el| MissingAltImage {
            src: el.value().attr("src").unwrap_or_default().to_string(),
            parent_tag: el
                .parent()
                .and_then(ElementRef::wrap)
                .map(|parent| parent.value().name().to_ascii_lowercase())
                .unwrap_or_default(),
        })
        .collect()
}

fn extract_headings(doc: &Html) -> Vec<Heading> {
    doc.select(&HEADINGS)
        .filter_map(|el| {
            let level = el.value().name().strip_prefix('h')?.parse::<u8>().ok()?;
            Some(Heading::new(
                level,
                collapse_whitespace(&el.text().collect::<String>()),
            ))
        })
        .collect()
}

/// Collects in-scope anchor targets, de-duplicated, in document order.
pub fn discover_links(doc: &Html, page_url: &Url, filter: &UrlFilter) -> Vec<Url> {
    let mut seen = HashSet::new();
    let links: Vec<Url> = doc
        .select(&ANCHOR)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| filter.accept(page_url, href))
        .filter(|url| seen.insert(url.to_string()))
        .collect();

    ::log::debug!("Found {} in-scope links in {}", links.len(), page_url);
    links
}
