use crate::audit::{self, Issue};
use crate::parsers::{MissingAltImage, PageSignals};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A text signal (title, description, canonical) with its issues
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldCheck {
    pub value: String,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredDataCheck {
    /// Number of JSON-LD blocks, valid or not
    pub count: usize,
    pub schema_types: Vec<String>,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageCheck {
    pub without_alt: usize,
    pub images: Vec<MissingAltImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadingCheck {
    pub h1_count: usize,
    /// H1 texts joined with ` | `
    pub h1_text: String,
    pub issues: Vec<Issue>,
    /// First nesting violation, if any
    pub nesting_detail: Option<String>,
}

/// Audit outcome for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub url: String,
    pub title: FieldCheck,
    pub description: FieldCheck,
    pub canonical: FieldCheck,
    pub structured_data: StructuredDataCheck,
    pub images: ImageCheck,
    pub headings: HeadingCheck,
}

impl PageResult {
    /// Number of issue instances on the page, counting each image without alt
    pub fn issue_count(&self) -> usize {
        self.title.issues.len()
            + self.description.issues.len()
            + self.canonical.issues.len()
            + self.structured_data.issues.len()
            + self.headings.issues.len()
            + self.images.without_alt
    }
}

/// Run-wide counters and duplicate tracking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub pages_checked: usize,
    pub missing_titles: usize,
    pub missing_descriptions: usize,
    pub short_titles: usize,
    pub long_titles: usize,
    pub short_descriptions: usize,
    pub long_descriptions: usize,
    pub missing_canonical: usize,
    pub missing_structured_data: usize,
    pub invalid_structured_data: usize,
    pub images_without_alt: usize,
    /// Pages without any H1
    pub empty_h1: usize,
    pub multiple_h1: usize,
    /// Pages with at least one heading nesting violation
    pub nested_heading_errors: usize,
    /// Title -> URLs using it, in visit order
    pub duplicate_titles: BTreeMap<String, Vec<String>>,
    /// Description -> URLs using it, in visit order
    pub duplicate_descriptions: BTreeMap<String, Vec<String>>,
}

impl Summary {
    /// Titles shared by more than one page
    pub fn duplicated_titles(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.duplicate_titles.iter().filter(|(_, urls)| urls.len() > 1)
    }

    /// Descriptions shared by more than one page
    pub fn duplicated_descriptions(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.duplicate_descriptions
            .iter()
            .filter(|(_, urls)| urls.len() > 1)
    }

    /// Counters in report order, with their labels
    pub fn counters(&self) -> [(&'static str, usize); 14] {
        [
            ("Pages Checked", self.pages_checked),
            ("Missing Titles", self.missing_titles),
            ("Short Titles (< 30 chars)", self.short_titles),
            ("Long Titles (> 60 chars)", self.long_titles),
            ("Missing Descriptions", self.missing_descriptions),
            ("Short Descriptions (< 100 chars)", self.short_descriptions),
            ("Long Descriptions (> 160 chars)", self.long_descriptions),
            ("Missing Canonical URLs", self.missing_canonical),
            ("Missing Structured Data", self.missing_structured_data),
            ("Invalid Structured Data", self.invalid_structured_data),
            ("Images Without Alt Text", self.images_without_alt),
            ("Pages Without H1", self.empty_h1),
            ("Pages With Multiple H1", self.multiple_h1),
            ("Pages With Improper Heading Nesting", self.nested_heading_errors),
        ]
    }
}

/// A URL that could not be loaded; it is never retried
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedPage {
    pub url: String,
    pub error: String,
}

/// All state accumulated by one audit run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditResults {
    pub base_url: String,
    /// Checked pages in visit order
    pub pages: Vec<PageResult>,
    pub summary: Summary,
    pub failed: Vec<FailedPage>,
}

impl AuditResults {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Classifies a loaded page and folds it into the run state
    pub fn record(&mut self, url: &str, signals: &PageSignals) -> &PageResult {
        let page = audit::classify_page(url, signals, &mut self.summary);
        self.summary.pages_checked += 1;
        self.pages.push(page);
        &self.pages[self.pages.len() - 1]
    }

    pub fn record_failure(&mut self, url: &str, error: impl ToString) {
        self.failed.push(FailedPage {
            url: url.to_string(),
            error: error.to_string(),
        });
    }

    pub fn page(&self, url: &str) -> Option<&PageResult> {
        self.pages.iter().find(|p| p.url == url)
    }
}
