//! Document-level driver: walks a token source page by page, analyzes each
//! page, and hands the results to a document sink in page order.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::build_page_profile;
use crate::error::{Error, Result};
use crate::model::{PageAnalysis, PageMode, PageProfile, PageTokens};
use crate::options::AnalyzeOptions;

/// Produces positioned tokens per page. The upstream boundary of the core:
/// how tokens come out of the original document format is not this crate's
/// concern.
pub trait TokenSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Tokens and page width for a 1-based page number.
    ///
    /// An unreadable source must fail here, before any analysis starts.
    fn page_tokens(&self, page: u32) -> Result<PageTokens>;
}

impl TokenSource for Vec<PageTokens> {
    fn page_count(&self) -> u32 {
        self.len() as u32
    }

    fn page_tokens(&self, page: u32) -> Result<PageTokens> {
        self.get(page as usize - 1)
            .cloned()
            .ok_or(Error::PageOutOfRange(page, self.len() as u32))
    }
}

/// Consumes analysis results per page, in page order. The downstream
/// boundary: rendering profiles into a target document format happens behind
/// this trait.
pub trait DocumentSink {
    /// A page with no usable text; render a fallback (e.g. a page image).
    fn image_page(&mut self, page: u32) -> Result<()>;

    /// A page with a structural profile.
    fn profile_page(&mut self, profile: &PageProfile) -> Result<()>;

    /// Called after each page's content.
    fn page_break(&mut self) -> Result<()>;
}

/// One audit record per analyzed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// 1-based page number
    pub page: u32,
    /// Winning classification
    pub mode: PageMode,
    /// Human-readable reason
    pub reason: String,
}

/// Output JSON formatting for the decision report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed with indentation
    #[default]
    Pretty,
    /// Compact single-line
    Compact,
}

/// The per-page mode decisions for one analyzed document.
///
/// A diagnostic artifact: rendering does not depend on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionReport {
    /// When the analysis ran
    pub generated_at: DateTime<Utc>,
    /// One record per page that produced a profile, in page order
    pub records: Vec<DecisionRecord>,
}

impl DecisionReport {
    /// Build a report stamped with the current time.
    pub fn new(records: Vec<DecisionRecord>) -> Self {
        Self {
            generated_at: Utc::now(),
            records,
        }
    }

    /// Serialize the report to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let json = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self)?,
            JsonFormat::Compact => serde_json::to_string(self)?,
        };
        Ok(json)
    }

    /// Write the report to a file as pretty JSON.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json(JsonFormat::Pretty)?)?;
        Ok(())
    }
}

/// Analyze one page's tokens into a profile or an image-only signal.
///
/// Pages with no tokens, or with total trimmed text below
/// `options.min_text_chars`, bypass structural extraction entirely.
pub fn analyze_page(
    page: u32,
    tokens: &PageTokens,
    options: &AnalyzeOptions,
) -> Result<PageAnalysis> {
    if tokens.width <= 0.0 {
        return Err(Error::InvalidPageWidth(tokens.width));
    }

    if tokens.tokens.is_empty() || tokens.text_chars() < options.min_text_chars {
        return Ok(PageAnalysis::ImageOnly { page });
    }

    let profile = build_page_profile(page, &tokens.tokens, tokens.width);
    Ok(PageAnalysis::Profile(Box::new(profile)))
}

/// Analyze a document and feed the sink, returning the decision report.
///
/// Pages outside the selection are skipped entirely. Analysis may fan out
/// across pages when `options.parallel` is set (pages are independent); the
/// sink always receives results in ascending page order, with a page break
/// after each page's content.
pub fn analyze_document<S, K>(
    source: &S,
    sink: &mut K,
    options: &AnalyzeOptions,
) -> Result<DecisionReport>
where
    S: TokenSource,
    K: DocumentSink,
{
    let selected: Vec<u32> = (1..=source.page_count())
        .filter(|p| options.page_selection.includes(*p))
        .collect();

    // Token extraction stays sequential; only the pure per-page analysis
    // fans out.
    let mut fetched: Vec<(u32, PageTokens)> = Vec::with_capacity(selected.len());
    for page in selected {
        fetched.push((page, source.page_tokens(page)?));
    }

    let analyses: Vec<PageAnalysis> = if options.parallel {
        fetched
            .par_iter()
            .map(|(page, tokens)| analyze_page(*page, tokens, options))
            .collect::<Result<_>>()?
    } else {
        fetched
            .iter()
            .map(|(page, tokens)| analyze_page(*page, tokens, options))
            .collect::<Result<_>>()?
    };

    let mut records: Vec<DecisionRecord> = Vec::new();

    for analysis in &analyses {
        match analysis {
            PageAnalysis::ImageOnly { page } => {
                log::debug!("page {}: image-only, skipping structural analysis", page);
                sink.image_page(*page)?;
            }
            PageAnalysis::Profile(profile) => {
                records.push(DecisionRecord {
                    page: profile.page_number(),
                    mode: profile.detected_mode(),
                    reason: profile.reason().to_string(),
                });
                sink.profile_page(profile)?;
            }
        }
        sink.page_break()?;
    }

    Ok(DecisionReport::new(records))
}
