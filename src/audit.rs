//! Turns extracted page signals into typed issues and summary counters.

use crate::parsers::{PageSignals, headings};
use crate::results::{FieldCheck, HeadingCheck, ImageCheck, PageResult, StructuredDataCheck, Summary};
use crate::utils::char_len;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TITLE_MIN_LEN: usize = 30;
pub const TITLE_MAX_LEN: usize = 60;
pub const DESCRIPTION_MIN_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    MissingTitle,
    TitleTooShort { length: usize },
    TitleTooLong { length: usize },
    MissingDescription,
    DescriptionTooShort { length: usize },
    DescriptionTooLong { length: usize },
    MissingCanonical,
    MissingStructuredData,
    InvalidStructuredData { invalid: usize },
    MissingH1,
    MultipleH1 { count: usize },
    ImproperHeadingNesting { violations: usize },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingTitle => write!(f, "Missing title"),
            Issue::TitleTooShort { length } => write!(
                f,
                "Title too short ({} chars, minimum {})",
                length, TITLE_MIN_LEN
            ),
            Issue::TitleTooLong { length } => write!(
                f,
                "Title too long ({} chars, maximum {})",
                length, TITLE_MAX_LEN
            ),
            Issue::MissingDescription => write!(f, "Missing meta description"),
            Issue::DescriptionTooShort { length } => write!(
                f,
                "Description too short ({} chars, minimum {})",
                length, DESCRIPTION_MIN_LEN
            ),
            Issue::DescriptionTooLong { length } => write!(
                f,
                "Description too long ({} chars, maximum {})",
                length, DESCRIPTION_MAX_LEN
            ),
            Issue::MissingCanonical => write!(f, "Missing canonical URL"),
            Issue::MissingStructuredData => write!(f, "No structured data found"),
            Issue::InvalidStructuredData { invalid } => {
                write!(f, "Invalid JSON-LD structured data ({} block(s))", invalid)
            }
            Issue::MissingH1 => write!(f, "Missing H1 heading"),
            Issue::MultipleH1 { count } => write!(f, "Multiple H1 headings ({})", count),
            Issue::ImproperHeadingNesting { violations } => write!(
                f,
                "Improper heading nesting ({} skipped level(s))",
                violations
            ),
        }
    }
}

/// Title length rule: missing, too short and too long are mutually exclusive.
pub fn check_title(title: &str) -> Option<Issue> {
    check_length(
        title,
        TITLE_MIN_LEN,
        TITLE_MAX_LEN,
        Issue::MissingTitle,
        |length| Issue::TitleTooShort { length },
        |length| Issue::TitleTooLong { length },
    )
}

/// Description length rule, same shape as [`check_title`].
pub fn check_description(description: &str) -> Option<Issue> {
    check_length(
        description,
        DESCRIPTION_MIN_LEN,
        DESCRIPTION_MAX_LEN,
        Issue::MissingDescription,
        |length| Issue::DescriptionTooShort { length },
        |length| Issue::DescriptionTooLong { length },
    )
}

fn check_length(
    value: &str,
    min: usize,
    max: usize,
    missing: Issue,
    too_short: impl FnOnce(usize) -> Issue,
    too_long: impl FnOnce(usize) -> Issue,
) -> Option<Issue> {
    let length = char_len(value);
    if length == 0 {
        Some(missing)
    } else if length < min {
        Some(too_short(length))
    } else if length > max {
        Some(too_long(length))
    } else {
        None
    }
}

/// Classifies one page, bumping the matching summary counters and
/// registering its title and description for duplicate detection.
pub fn classify_page(url: &str, signals: &PageSignals, summary: &mut Summary) -> PageResult {
    let title = classify_title(url, &signals.title, summary);
    let description = classify_description(url, &signals.description, summary);

    let mut canonical = FieldCheck {
        value: signals.canonical.clone(),
        issues: Vec::new(),
    };
    if canonical.value.is_empty() {
        canonical.issues.push(Issue::MissingCanonical);
        summary.missing_canonical += 1;
    }

    let structured_data = classify_structured_data(signals, summary);

    summary.images_without_alt += signals.images_without_alt.len();
    let images = ImageCheck {
        without_alt: signals.images_without_alt.len(),
        images: signals.images_without_alt.clone(),
    };

    let headings = classify_headings(signals, summary);

    PageResult {
        url: url.to_string(),
        title,
        description,
        canonical,
        structured_data,
        images,
        headings,
    }
}

fn classify_title(url: &str, title: &str, summary: &mut Summary) -> FieldCheck {
    let issue = check_title(title);
    match issue {
        Some(Issue::MissingTitle) => summary.missing_titles += 1,
        Some(Issue::TitleTooShort { .. }) => summary.short_titles += 1,
        Some(Issue::TitleTooLong { .. }) => summary.long_titles += 1,
        _ => {}
    }
    if !title.is_empty() {
        summary
            .duplicate_titles
            .entry(title.to_string())
            .or_default()
            .push(url.to_string());
    }
    FieldCheck {
        value: title.to_string(),
        issues: issue.into_iter().collect(),
    }
}

fn classify_description(url: &str, description: &str, summary: &mut Summary) -> FieldCheck {
    let issue = check_description(description);
    match issue {
        Some(Issue::MissingDescription) => summary.missing_descriptions += 1,
        Some(Issue::DescriptionTooShort { .. }) => summary.short_descriptions += 1,
        Some(Issue::DescriptionTooLong { .. }) => summary.long_descriptions += 1,
        _ => {}
    }
    if !description.is_empty() {
        summary
            .duplicate_descriptions
            .entry(description.to_string())
            .or_default()
            .push(url.to_string());
    }
    FieldCheck {
        value: description.to_string(),
        issues: issue.into_iter().collect(),
    }
}

fn classify_structured_data(signals: &PageSignals, summary: &mut Summary) -> StructuredDataCheck {
    let blocks = &signals.structured_data;
    let mut issues = Vec::new();

    if blocks.is_empty() {
        issues.push(Issue::MissingStructuredData);
        summary.missing_structured_data += 1;
    }

    let invalid = blocks.iter().filter(|b| !b.is_valid()).count();
    if invalid > 0 {
        issues.push(Issue::InvalidStructuredData { invalid });
        summary.invalid_structured_data += 1;
    }

    StructuredDataCheck {
        count: blocks.len(),
        schema_types: blocks.iter().flat_map(|b| b.schema_types()).collect(),
        issues,
    }
}

fn classify_headings(signals: &PageSignals, summary: &mut Summary) -> HeadingCheck {
    let h1_count = signals.h1_texts.len();
    let mut issues = Vec::new();

    match h1_count {
        0 => {
            issues.push(Issue::MissingH1);
            summary.empty_h1 += 1;
        }
        1 => {}
        count => {
            issues.push(Issue::MultipleH1 { count });
            summary.multiple_h1 += 1;
        }
    }

    let violations = headings::find_nesting_violations(&signals.headings);
    if !violations.is_empty() {
        issues.push(Issue::ImproperHeadingNesting {
            violations: violations.len(),
        });
        summary.nested_heading_errors += 1;
    }

    HeadingCheck {
        h1_count,
        h1_text: signals.h1_texts.join(" | "),
        issues,
        nesting_detail: violations.first().map(|v| v.to_string()),
    }
}
