use crate::filter::UrlFilter;
use crate::parsers::{self, Heading, JsonLdBlock, MissingAltImage};
use url::Url;

fn parse(html: &str) -> parsers::ParsedPage {
    let base = Url::parse("http://localhost:3000/").unwrap();
    let filter = UrlFilter::new(base, &[]).unwrap();
    let page_url = Url::parse("http://localhost:3000/services/pumping").unwrap();
    parsers::parse(html, &page_url, &filter)
}

#[test]
fn test_full_page_extraction() {
    let html = r#"<!DOCTYPE html>
<html>
<head>
  <title>  Septic Pumping in
     Springfield  </title>
  <meta name="Description" content=" Fast, affordable septic pumping. ">
  <link rel="canonical" href="/services/pumping">
  <script type="application/ld+json">{"@context": "https://schema.org", "@type": "LocalBusiness"}</script>
  <script type="application/ld+json">{ not json </script>
  <script type="text/javascript">var x = 1;</script>
</head>
<body>
  <h1> Septic Pumping </h1>
  <h2>Why pump?</h2>
  <figure><img src="/img/truck.jpg"></figure>
  <p><img src="/img/tank.png" alt="  "></p>
  <img src="/img/logo.png" alt="Company logo">
  <h4>Skipped level</h4>
</body>
</html>"#;

    let signals = parse(html).signals;

    assert_eq!(signals.title, "Septic Pumping in Springfield");
    assert_eq!(signals.description, "Fast, affordable septic pumping.");
    assert_eq!(
        signals.canonical,
        "http://localhost:3000/services/pumping"
    );

    assert_eq!(signals.structured_data.len(), 2);
    assert!(signals.structured_data[0].is_valid());
    assert!(matches!(
        signals.structured_data[1],
        JsonLdBlock::Invalid { .. }
    ));

    assert_eq!(
        signals.images_without_alt,
        vec![
            MissingAltImage {
                src: "/img/truck.jpg".to_string(),
                parent_tag: "figure".to_string(),
            },
            MissingAltImage {
                src: "/img/tank.png".to_string(),
                parent_tag: "p".to_string(),
            },
        ]
    );

    assert_eq!(signals.h1_texts, vec!["Septic Pumping".to_string()]);
    assert_eq!(
        signals.headings,
        vec![
            Heading::new(1, "Septic Pumping"),
            Heading::new(2, "Why pump?"),
            Heading::new(4, "Skipped level"),
        ]
    );
}

#[test]
fn test_empty_document_defaults() {
    let signals = parse("<html><head></head><body><p>Nothing here</p></body></html>").signals;

    assert_eq!(signals.title, "");
    assert_eq!(signals.description, "");
    assert_eq!(signals.canonical, "");
    assert!(signals.structured_data.is_empty());
    assert!(signals.images_without_alt.is_empty());
    assert!(signals.h1_texts.is_empty());
    assert!(signals.headings.is_empty());
}

#[test]
fn test_multiple_h1_in_document_order() {
    let html = "<body><h1>First</h1><div><h1>Second</h1></div><h3>x</h3><h1>Third</h1></body>";
    let signals = parse(html).signals;
    assert_eq!(signals.h1_texts, vec!["First", "Second", "Third"]);
    let levels: Vec<u8> = signals.headings.iter().map(|h| h.level).collect();
    assert_eq!(levels, vec![1, 1, 3, 1]);
}

#[test]
fn test_canonical_with_multiple_rel_tokens() {
    let html = r#"<head><link rel="stylesheet" href="/a.css"><link rel="Canonical alternate" href="https://example.com/x"></head>"#;
    assert_eq!(parse(html).signals.canonical, "https://example.com/x");
}

#[test]
fn test_schema_types() {
    let html = r#"<head><script type="application/ld+json">
{"@context": "https://schema.org", "@graph": [{"@type": "Organization"}, {"@type": ["Service", "Product"]}]}
</script><script type="application/ld+json">[{"@type": "FAQPage"}]</script></head>"#;
    let blocks = parse(html).signals.structured_data;
    assert_eq!(blocks[0].schema_types(), vec!["Organization", "Service", "Product"]);
    assert_eq!(blocks[1].schema_types(), vec!["FAQPage"]);
}

#[test]
fn test_empty_json_ld_block_is_invalid() {
    let html = r#"<head><script type="application/ld+json">   </script></head>"#;
    let blocks = parse(html).signals.structured_data;
    assert_eq!(blocks.len(), 1);
    assert!(!blocks[0].is_valid());
    assert!(blocks[0].schema_types().is_empty());
}

#[test]
fn test_svg_title_is_not_the_page_title() {
    let html = r#"<html><head><meta name="description" content="x"></head>
<body><svg viewBox="0 0 24 24"><title>Phone icon</title><path d="M0 0h24v24H0z"/></svg>
<h1>Septic</h1></body></html>"#;

    let signals = parse(html).signals;
    assert_eq!(signals.title, "");
    assert_eq!(signals.h1_texts, vec!["Septic"]);
}

#[test]
fn test_document_title_wins_over_earlier_svg_title() {
    let html = r#"<html><head></head>
<body><svg><title>Truck icon</title></svg></body></html>"#;
    assert_eq!(parse(html).signals.title, "");

    let html = r#"<html><head><title>Septic Pumping Springfield</title></head>
<body><svg><title>Truck icon</title></svg></body></html>"#;
    assert_eq!(parse(html).signals.title, "Septic Pumping Springfield");
}
