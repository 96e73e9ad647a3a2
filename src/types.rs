use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use url::Url;

use crate::errors::CssprobeError;

/// Output format for CLI results
#[derive(Clone, Copy, Debug, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format for programmatic consumption
    Json,
    /// Human-readable simple format
    Simple,
}

/// Where the page to analyze comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// Local HTML file
    File(PathBuf),
    /// HTML piped on standard input
    Stdin,
    /// Remote or `file://` page
    Url(Url),
}

impl PageSource {
    /// Parse a CLI argument: `-` is stdin, `http(s)://` and `file://` are URLs,
    /// anything else is a local path
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(CssprobeError::InvalidArgument("Page source cannot be empty".into()).into());
        }
        if s == "-" {
            return Ok(PageSource::Stdin);
        }

        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https" | "file") => Ok(PageSource::Url(url)),
            Ok(url) if url.scheme().len() > 1 => Err(CssprobeError::InvalidArgument(format!(
                "Unsupported URL scheme '{}' in {}",
                url.scheme(),
                s
            ))
            .into()),
            // Relative paths and Windows drive letters (C:\...) end up here
            _ => Ok(PageSource::File(PathBuf::from(s))),
        }
    }
}

impl fmt::Display for PageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSource::File(path) => write!(f, "{}", path.display()),
            PageSource::Stdin => write!(f, "<stdin>"),
            PageSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Which of the elements matched by a locator to build selectors for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSelection {
    /// First match only
    First,
    /// Match at a 0-based index
    Index(usize),
    /// Every match
    All,
    /// The single match; more than one is an error
    ExpectOne,
}

impl TargetSelection {
    pub fn from_flags(all: bool, index: Option<usize>, expect_one: bool) -> Result<Self> {
        match (all, index, expect_one) {
            (false, None, false) => Ok(TargetSelection::First),
            (true, None, false) => Ok(TargetSelection::All),
            (false, Some(i), false) => Ok(TargetSelection::Index(i)),
            (false, None, true) => Ok(TargetSelection::ExpectOne),
            _ => Err(CssprobeError::InvalidArgument(
                "--all, --index and --expect-one are mutually exclusive".into(),
            )
            .into()),
        }
    }
}

/// Synthesized selector for one element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorEntry {
    /// Position of the element among the locator's matches (0-based)
    pub index: usize,
    /// Lower-cased tag name
    pub tag: String,
    /// The synthesized selector
    pub selector: String,
    /// Collapsed text content, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    /// Whether the selector resolves back to exactly this element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// Result of a `synthesize` run
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectorReport {
    /// Page the selectors were built against
    pub source: String,
    /// Locator used to find the target elements
    pub locator: String,
    /// When the DOM snapshot was taken
    pub generated_at: DateTime<Utc>,
    /// Number of elements the locator matched
    pub total_matches: usize,
    pub selectors: Vec<SelectorEntry>,
    /// Warning when only part of the matches is reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// How a selector resolves against a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub selector: String,
    /// Number of matching elements (0 for invalid selectors)
    pub matches: usize,
    /// Exactly one element matched
    pub unique: bool,
    /// Parse error, for invalid selectors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
