use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// 1 through 6
    pub level: u8,
    pub text: String,
}

impl Heading {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// A heading that skips one or more levels below its predecessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestingViolation {
    pub previous_level: u8,
    pub level: u8,
    pub text: String,
}

impl fmt::Display for NestingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "H{} followed by H{}: \"{}\"",
            self.previous_level, self.level, self.text
        )
    }
}

/// Finds every heading whose level is more than one deeper than the heading
/// right before it. The first heading may start at any level.
pub fn find_nesting_violations(headings: &[Heading]) -> Vec<NestingViolation> {
    headings
        .windows(2)
        .filter(|pair| pair[1].level > pair[0].level + 1)
        .map(|pair| NestingViolation {
            previous_level: pair[0].level,
            level: pair[1].level,
            text: pair[1].text.clone(),
        })
        .collect()
}
