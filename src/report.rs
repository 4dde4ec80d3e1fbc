//! Markdown report generation
//!
//! Rendering is a pure function of the run state and [`ReportMeta`], so the
//! same snapshot always renders the same bytes.

use crate::error::AuditError;
use crate::results::{AuditResults, PageResult, Summary};
use crate::utils::truncate_chars;
use std::fs;
use std::path::Path;

/// Description headings in the duplicates section are cut to this length
const DESCRIPTION_HEADING_CHARS: usize = 100;

/// Values that are not part of the audit results but appear in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    pub generated_at: String,
    pub base_url: String,
}

impl ReportMeta {
    /// Metadata stamped with the current local time
    pub fn now(base_url: &str) -> Self {
        Self {
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            base_url: base_url.to_string(),
        }
    }
}

/// Renders the full report
pub fn render_report(results: &AuditResults, meta: &ReportMeta) -> String {
    let mut md = String::new();
    let summary = &results.summary;

    md.push_str("# SEO Audit Report\n\n");
    md.push_str(&format!("- **Generated**: {}\n", meta.generated_at));
    md.push_str(&format!("- **Base URL**: {}\n", meta.base_url));
    md.push_str(&format!("- **Pages Checked**: {}\n\n", summary.pages_checked));

    push_summary_table(&mut md, summary);

    md.push_str("## Duplicate Titles\n\n");
    push_duplicates(
        &mut md,
        summary.duplicated_titles(),
        |title| title.to_string(),
        "No duplicate titles found.",
    );

    md.push_str("## Duplicate Descriptions\n\n");
    push_duplicates(
        &mut md,
        summary.duplicated_descriptions(),
        |description| truncate_chars(description, DESCRIPTION_HEADING_CHARS),
        "No duplicate descriptions found.",
    );

    md.push_str("## Page Details\n\n");
    if results.pages.is_empty() {
        md.push_str("No pages were checked.\n\n");
    }
    for page in &results.pages {
        push_page_details(&mut md, page);
    }

    if !results.failed.is_empty() {
        md.push_str("## Unreachable Pages\n\n");
        for failed in &results.failed {
            md.push_str(&format!("- {}: {}\n", failed.url, failed.error));
        }
        md.push('\n');
    }

    push_recommendations(&mut md, results);

    md
}

fn push_summary_table(md: &mut String, summary: &Summary) {
    md.push_str("## Summary\n\n");
    md.push_str("| Check | Count |\n");
    md.push_str("|-------|-------|\n");
    for (label, count) in summary.counters() {
        md.push_str(&format!("| {} | {} |\n", label, count));
    }
    md.push_str(&format!(
        "| Duplicate Titles | {} |\n",
        summary.duplicated_titles().count()
    ));
    md.push_str(&format!(
        "| Duplicate Descriptions | {} |\n\n",
        summary.duplicated_descriptions().count()
    ));
}

fn push_duplicates<'a>(
    md: &mut String,
    groups: impl Iterator<Item = (&'a String, &'a Vec<String>)>,
    heading: impl Fn(&str) -> String,
    none_message: &str,
) {
    let mut any = false;
    for (value, urls) in groups {
        any = true;
        md.push_str(&format!("### \"{}\"\n\n", heading(value)));
        for url in urls {
            md.push_str(&format!("- {}\n", url));
        }
        md.push('\n');
    }
    if !any {
        md.push_str(none_message);
        md.push_str("\n\n");
    }
}

fn push_issues<T: std::fmt::Display>(md: &mut String, issues: &[T]) {
    for issue in issues {
        md.push_str(&format!("  - {}\n", issue));
    }
}

fn push_page_details(md: &mut String, page: &PageResult) {
    md.push_str(&format!("### {}\n\n", page.url));

    if page.issue_count() == 0 {
        md.push_str("No issues found.\n\n");
    }

    md.push_str(&format!("- **Title**: \"{}\"\n", page.title.value));
    push_issues(md, &page.title.issues);

    md.push_str(&format!("- **Description**: \"{}\"\n", page.description.value));
    push_issues(md, &page.description.issues);

    md.push_str(&format!("- **Canonical**: \"{}\"\n", page.canonical.value));
    push_issues(md, &page.canonical.issues);

    let data = &page.structured_data;
    if data.schema_types.is_empty() {
        md.push_str(&format!("- **Structured Data**: {} block(s)\n", data.count));
    } else {
        md.push_str(&format!(
            "- **Structured Data**: {} block(s) ({})\n",
            data.count,
            data.schema_types.join(", ")
        ));
    }
    push_issues(md, &data.issues);

    let headings = &page.headings;
    md.push_str(&format!(
        "- **H1**: {} (\"{}\")\n",
        headings.h1_count, headings.h1_text
    ));
    push_issues(md, &headings.issues);
    if let Some(detail) = &headings.nesting_detail {
        md.push_str(&format!("  - First skipped level: {}\n", detail));
    }

    md.push_str(&format!(
        "- **Images Without Alt**: {}\n",
        page.images.without_alt
    ));
    for image in &page.images.images {
        md.push_str(&format!("  - `{}` in `<{}>`\n", image.src, image.parent_tag));
    }

    md.push('\n');
}

fn push_recommendations(md: &mut String, results: &AuditResults) {
    let summary = &results.summary;
    let mut paragraphs: Vec<&str> = Vec::new();

    if summary.missing_titles + summary.short_titles + summary.long_titles > 0
        || summary.duplicated_titles().next().is_some()
    {
        paragraphs.push(
            "**Titles**: Give every page a unique title between 30 and 60 characters \
             that names the service and the area it covers.",
        );
    }
    if summary.missing_descriptions + summary.short_descriptions + summary.long_descriptions > 0
        || summary.duplicated_descriptions().next().is_some()
    {
        paragraphs.push(
            "**Meta Descriptions**: Write a unique description between 100 and 160 \
             characters for each page, summarizing its content with a call to action.",
        );
    }
    if summary.missing_canonical > 0 {
        paragraphs.push(
            "**Canonical URLs**: Add a `<link rel=\"canonical\">` tag to every page so \
             search engines know which URL to index.",
        );
    }
    if summary.missing_structured_data + summary.invalid_structured_data > 0 {
        paragraphs.push(
            "**Structured Data**: Add JSON-LD markup (LocalBusiness, Service, FAQPage, \
             BreadcrumbList) where it is missing and fix blocks that fail to parse.",
        );
    }
    if summary.images_without_alt > 0 {
        paragraphs.push(
            "**Image Alt Text**: Describe every meaningful image with an `alt` \
             attribute; use `alt=\"\"` only for purely decorative images.",
        );
    }
    if summary.empty_h1 + summary.multiple_h1 > 0 {
        paragraphs.push(
            "**H1 Headings**: Each page should have exactly one H1 describing its \
             main topic.",
        );
    }
    if summary.nested_heading_errors > 0 {
        paragraphs.push(
            "**Heading Structure**: Do not skip heading levels; an H2 should be \
             followed by an H3, not an H4.",
        );
    }
    if !results.failed.is_empty() {
        paragraphs.push(
            "**Unreachable Pages**: Fix or remove links to pages that failed to load, \
             then run the audit again.",
        );
    }

    md.push_str("## Recommendations\n\n");
    if paragraphs.is_empty() {
        md.push_str("No issues found. Keep titles, descriptions and structured data up to date as content changes.\n");
        return;
    }
    for paragraph in paragraphs {
        md.push_str(paragraph);
        md.push_str("\n\n");
    }
}

/// Writes the report, creating the parent directory and replacing any
/// existing file.
pub fn write_report(path: &Path, markdown: &str) -> Result<(), AuditError> {
    let write_error = |source| AuditError::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, markdown).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{Heading, JsonLdBlock, MissingAltImage, PageSignals};

    fn meta() -> ReportMeta {
        ReportMeta {
            generated_at: "2026-01-01 12:00:00".to_string(),
            base_url: "http://localhost:3000/".to_string(),
        }
    }

    fn good_signals(title: &str) -> PageSignals {
        PageSignals {
            title: title.to_string(),
            description: "x".repeat(120),
            canonical: "http://localhost:3000/".to_string(),
            structured_data: vec![JsonLdBlock::Valid(serde_json::json!({"@type": "WebPage"}))],
            images_without_alt: Vec::new(),
            h1_texts: vec!["Heading".to_string()],
            headings: vec![Heading::new(1, "Heading")],
        }
    }

    fn sample_results() -> AuditResults {
        let mut results = AuditResults::new("http://localhost:3000/");
        let shared = "Septic Pumping and Inspection Services Near You";
        results.record("http://localhost:3000/", &good_signals(shared));
        results.record("http://localhost:3000/pumping", &good_signals(shared));

        let mut bad = PageSignals::default();
        bad.images_without_alt.push(MissingAltImage {
            src: "/truck.jpg".to_string(),
            parent_tag: "div".to_string(),
        });
        bad.h1_texts = vec!["A".to_string(), "B".to_string()];
        bad.headings = vec![Heading::new(1, "A"), Heading::new(1, "B"), Heading::new(4, "Deep")];
        results.record("http://localhost:3000/bad", &bad);
        results.record_failure("http://localhost:3000/gone", "server responded with HTTP 404");
        results
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let results = sample_results();
        assert_eq!(render_report(&results, &meta()), render_report(&results, &meta()));
    }

    #[test]
    fn test_sections_in_order() {
        let md = render_report(&sample_results(), &meta());
        let positions: Vec<usize> = [
            "# SEO Audit Report",
            "## Summary",
            "## Duplicate Titles",
            "## Duplicate Descriptions",
            "## Page Details",
            "## Unreachable Pages",
            "## Recommendations",
        ]
        .iter()
        .map(|section| md.find(section).unwrap_or_else(|| panic!("missing {}", section)))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(md.contains("- **Generated**: 2026-01-01 12:00:00"));
        assert!(md.contains("- **Pages Checked**: 3"));
    }

    #[test]
    fn test_summary_table_counts() {
        let md = render_report(&sample_results(), &meta());
        assert!(md.contains("| Missing Titles | 1 |"));
        assert!(md.contains("| Missing Descriptions | 1 |"));
        assert!(md.contains("| Images Without Alt Text | 1 |"));
        assert!(md.contains("| Pages With Multiple H1 | 1 |"));
        assert!(md.contains("| Pages With Improper Heading Nesting | 1 |"));
        assert!(md.contains("| Duplicate Titles | 1 |"));
        assert!(md.contains("| Duplicate Descriptions | 1 |"));
    }

    #[test]
    fn test_duplicate_groups() {
        let md = render_report(&sample_results(), &meta());
        assert!(md.contains(
            "### \"Septic Pumping and Inspection Services Near You\"\n\n- http://localhost:3000/\n- http://localhost:3000/pumping\n"
        ));
        // 120-char description is cut to 100 characters in its heading
        assert!(md.contains(&format!("### \"{}...\"", "x".repeat(100))));
        assert!(!md.contains("No duplicate titles found."));
    }

    #[test]
    fn test_no_duplicates_message() {
        let mut results = AuditResults::new("http://localhost:3000/");
        results.record("http://localhost:3000/", &good_signals("Only One Page With This Title Here"));
        let md = render_report(&results, &meta());

        assert!(md.contains("No duplicate titles found."));
        assert!(md.contains("No duplicate descriptions found."));
        assert!(!md.contains("## Unreachable Pages"));
        assert!(md.contains("No issues found. Keep titles"));
    }

    #[test]
    fn test_page_details() {
        let md = render_report(&sample_results(), &meta());
        let bad = &md[md.find("### http://localhost:3000/bad").unwrap()..];

        assert!(bad.contains("  - Missing title"));
        assert!(bad.contains("  - Missing meta description"));
        assert!(bad.contains("  - Missing canonical URL"));
        assert!(bad.contains("  - No structured data found"));
        assert!(bad.contains("- **H1**: 2 (\"A | B\")"));
        assert!(bad.contains("  - First skipped level: H1 followed by H4: \"Deep\""));
        assert!(bad.contains("  - `/truck.jpg` in `<div>`"));
        assert!(md.contains("- http://localhost:3000/gone: server responded with HTTP 404"));
    }

    #[test]
    fn test_recommendations_follow_counters() {
        let md = render_report(&sample_results(), &meta());
        let recommendations = &md[md.find("## Recommendations").unwrap()..];

        assert!(recommendations.contains("**Titles**"));
        assert!(recommendations.contains("**Canonical URLs**"));
        assert!(recommendations.contains("**Image Alt Text**"));
        assert!(recommendations.contains("**H1 Headings**"));
        assert!(recommendations.contains("**Heading Structure**"));
        assert!(recommendations.contains("**Unreachable Pages**"));
    }

    #[test]
    fn test_write_report_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("seo-report.md");

        write_report(&path, "first run").unwrap();
        write_report(&path, "second run").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second run");
    }
}
