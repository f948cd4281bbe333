//! Partitioning options.

use crate::error::{Result, SplitError};
use std::fmt;
use std::str::FromStr;

/// Selector ceiling used when no explicit budget is given.
///
/// The engines that motivated this crate stop at 4095 selectors per file; the
/// default keeps a few selectors of headroom below that.
pub const DEFAULT_MAX_SELECTORS: usize = 4090;

/// How `@media` blocks are counted and placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MediaQueries {
    /// Media rules count like any other rule and may be split across sheets.
    #[default]
    Keep,
    /// Media rules go to sheets of their own, after all the normal sheets.
    Separate,
    /// Media rules never count toward the budget.
    Ignore,
}

impl MediaQueries {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaQueries::Keep => "keep",
            MediaQueries::Separate => "separate",
            MediaQueries::Ignore => "ignore",
        }
    }
}

impl fmt::Display for MediaQueries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaQueries {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(MediaQueries::Keep),
            "separate" => Ok(MediaQueries::Separate),
            "ignore" => Ok(MediaQueries::Ignore),
            other => Err(SplitError::invalid_input(format!(
                "unknown media query mode '{}'",
                other
            ))),
        }
    }
}

/// Options for a single [`partition`](crate::partition()) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Upper bound on the selectors in one output sheet.
    pub max_selectors: usize,
    /// Lower bound on the number of output sheets.
    pub min_sheets: usize,
    pub media_queries: MediaQueries,
    /// Name of the source, only used in log output.
    pub filename: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_selectors: DEFAULT_MAX_SELECTORS,
            min_sheets: 1,
            media_queries: MediaQueries::Keep,
            filename: None,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_selectors(mut self, max_selectors: usize) -> Self {
        self.max_selectors = max_selectors;
        self
    }

    pub fn with_min_sheets(mut self, min_sheets: usize) -> Self {
        self.min_sheets = min_sheets;
        self
    }

    pub fn with_media_queries(mut self, media_queries: MediaQueries) -> Self {
        self.media_queries = media_queries;
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Check the numeric bounds once, before any work is done.
    pub fn validate(&self) -> Result<()> {
        if self.max_selectors == 0 {
            return Err(SplitError::invalid_input(
                "maxSelectors must be a positive integer",
            ));
        }
        if self.min_sheets == 0 {
            return Err(SplitError::invalid_input(
                "minSheets must be a positive integer",
            ));
        }
        Ok(())
    }

    /// Label used when logging about this source.
    pub(crate) fn source_name(&self) -> &str {
        self.filename.as_deref().unwrap_or("<inline>")
    }
}
