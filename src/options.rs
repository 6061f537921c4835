//! Analysis options and page selection.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Minimum trimmed character count for a page to count as having text.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 30;

/// Options for document analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Pages with fewer trimmed text characters are treated as image-only
    pub min_text_chars: usize,

    /// Which pages to analyze
    pub page_selection: PageSelection,

    /// Analyze pages in parallel (rendering always stays in page order)
    pub parallel: bool,
}

impl AnalyzeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image-only text threshold.
    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.min_text_chars = chars;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set a specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }

    /// Disable parallel analysis.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            page_selection: PageSelection::All,
            parallel: true,
        }
    }
}

/// Page selection for analysis and rendering.
#[derive(Debug, Clone, Default)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        // Simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: u32 = start
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidPageRange(s.to_string()))?;
                let end: u32 = end
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidPageRange(s.to_string()))?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        // Comma-separated list with possible ranges
        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidPageRange(s.to_string()))?;
                let end: u32 = end
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidPageRange(s.to_string()))?;
                for p in start..=end {
                    if !pages.contains(&p) {
                        pages.push(p);
                    }
                }
            } else {
                let p: u32 = part
                    .parse()
                    .map_err(|_| Error::InvalidPageRange(s.to_string()))?;
                if !pages.contains(&p) {
                    pages.push(p);
                }
            }
        }

        pages.sort();
        Ok(PageSelection::Pages(pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = AnalyzeOptions::new()
            .with_min_text_chars(10)
            .with_page_range(2..=5)
            .sequential();

        assert_eq!(options.min_text_chars, 10);
        assert!(!options.parallel);
        assert!(matches!(options.page_selection, PageSelection::Range(_)));
    }

    #[test]
    fn test_page_selection_includes() {
        let all = PageSelection::All;
        assert!(all.includes(1));
        assert!(all.includes(100));

        let range = PageSelection::Range(5..=10);
        assert!(!range.includes(4));
        assert!(range.includes(5));
        assert!(range.includes(10));
        assert!(!range.includes(11));

        let pages = PageSelection::Pages(vec![1, 3, 5]);
        assert!(pages.includes(1));
        assert!(!pages.includes(2));
    }

    #[test]
    fn test_page_selection_parse() {
        assert!(matches!(
            PageSelection::parse("all").unwrap(),
            PageSelection::All
        ));
        assert!(matches!(
            PageSelection::parse("1-10").unwrap(),
            PageSelection::Range(_)
        ));

        let mixed = PageSelection::parse("1,3,5-7,10").unwrap();
        if let PageSelection::Pages(pages) = mixed {
            assert_eq!(pages, vec![1, 3, 5, 6, 7, 10]);
        } else {
            panic!("Expected Pages variant");
        }
    }

    #[test]
    fn test_page_selection_parse_invalid() {
        assert!(PageSelection::parse("x-3").is_err());
        assert!(PageSelection::parse("1,two").is_err());
    }
}
