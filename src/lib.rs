//! # pageprofile
//!
//! Structural page analysis for positioned-text documents.
//!
//! This library takes per-page positioned tokens (text plus bounding boxes,
//! as produced by any extraction frontend) and classifies each page's
//! dominant structure: tabular grid, label-value form, multi-column layout,
//! or plain flowing text. Alongside the classification it extracts the
//! structural content itself: paragraphs, headings, lists, table cell
//! grids, and form label-value pairs.
//!
//! ## Quick Start
//!
//! ```
//! use pageprofile::{analyze_page, AnalyzeOptions, PageAnalysis, PageTokens, Token};
//!
//! fn main() -> pageprofile::Result<()> {
//!     let tokens = PageTokens::new(
//!         vec![
//!             Token::with_size("Hello", 40.0, 20.0, 80.0, 32.0, 11.0),
//!             Token::with_size("positioned", 90.0, 20.0, 160.0, 32.0, 11.0),
//!             Token::with_size("world", 170.0, 20.0, 210.0, 32.0, 11.0),
//!         ],
//!         612.0,
//!     );
//!
//!     let options = AnalyzeOptions::new().with_min_text_chars(5);
//!     match analyze_page(1, &tokens, &options)? {
//!         PageAnalysis::Profile(profile) => {
//!             println!("page 1 is {} ({})", profile.detected_mode(), profile.reason());
//!         }
//!         PageAnalysis::ImageOnly { page } => {
//!             println!("page {} has no usable text", page);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Per-page classification**: table, form, layout, or semantic mode
//!   with a fixed priority order and an audit reason per decision
//! - **Structural extraction**: paragraphs, headings, bullet and numbered
//!   lists, table cell grids, form label-value pairs
//! - **Image-only detection**: pages below a text threshold bypass analysis
//! - **Pluggable boundaries**: `TokenSource` and `DocumentSink` traits keep
//!   extraction frontends and rendering backends out of the core
//! - **Decision report**: JSON audit trail of every page's classification
//! - **Parallel analysis**: pages fan out across threads via Rayon while
//!   sink output stays in page order

pub mod analysis;
pub mod error;
pub mod model;
pub mod options;
pub mod pipeline;

// Re-export commonly used types
pub use analysis::{build_page_profile, ModeDecision};
pub use error::{Error, Result};
pub use model::{
    FormPair, ListKind, PageAnalysis, PageMode, PageProfile, PageTokens, ProfileBuilder, TextList,
    Token,
};
pub use options::{AnalyzeOptions, PageSelection, DEFAULT_MIN_TEXT_CHARS};
pub use pipeline::{
    analyze_document, analyze_page, DecisionRecord, DecisionReport, DocumentSink, JsonFormat,
    TokenSource,
};

/// Analyze a document with default options.
///
/// # Example
///
/// ```no_run
/// use pageprofile::{analyze, DocumentSink, PageProfile, PageTokens, Result};
///
/// struct PrintSink;
///
/// impl DocumentSink for PrintSink {
///     fn image_page(&mut self, page: u32) -> Result<()> {
///         println!("page {}: image only", page);
///         Ok(())
///     }
///     fn profile_page(&mut self, profile: &PageProfile) -> Result<()> {
///         println!("page {}: {}", profile.page_number(), profile.detected_mode());
///         Ok(())
///     }
///     fn page_break(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let pages: Vec<PageTokens> = Vec::new();
/// let report = analyze(&pages, &mut PrintSink).unwrap();
/// println!("{} decisions", report.records.len());
/// ```
pub fn analyze<S, K>(source: &S, sink: &mut K) -> Result<DecisionReport>
where
    S: TokenSource,
    K: DocumentSink,
{
    analyze_document(source, sink, &AnalyzeOptions::default())
}

/// Analyze every page of a document into profiles, without a sink.
///
/// Convenience for callers that only want the structural data. Pages are
/// returned in page order; image-only pages appear as
/// [`PageAnalysis::ImageOnly`].
pub fn profile_pages<S>(source: &S, options: &AnalyzeOptions) -> Result<Vec<PageAnalysis>>
where
    S: TokenSource,
{
    let mut analyses = Vec::new();
    for page in 1..=source.page_count() {
        if !options.page_selection.includes(page) {
            continue;
        }
        let tokens = source.page_tokens(page)?;
        analyses.push(analyze_page(page, &tokens, options)?);
    }
    Ok(analyses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_page() -> PageTokens {
        PageTokens::new(
            vec![
                Token::with_size("A", 40.0, 20.0, 50.0, 32.0, 11.0),
                Token::with_size("reasonably", 55.0, 20.0, 130.0, 32.0, 11.0),
                Token::with_size("long", 135.0, 20.0, 165.0, 32.0, 11.0),
                Token::with_size("sentence", 170.0, 20.0, 230.0, 32.0, 11.0),
                Token::with_size("for", 235.0, 20.0, 255.0, 32.0, 11.0),
                Token::with_size("analysis.", 260.0, 20.0, 320.0, 32.0, 11.0),
            ],
            612.0,
        )
    }

    #[test]
    fn test_profile_pages_returns_ordered_analyses() {
        let source = vec![body_page(), PageTokens::new(vec![], 612.0)];
        let analyses = profile_pages(&source, &AnalyzeOptions::new()).unwrap();

        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[0].page_number(), 1);
        assert!(analyses[0].profile().is_some());
        assert!(matches!(analyses[1], PageAnalysis::ImageOnly { page: 2 }));
    }

    #[test]
    fn test_profile_pages_honors_selection() {
        let source = vec![body_page(), body_page(), body_page()];
        let options = AnalyzeOptions::new().with_page_range(2..=2);
        let analyses = profile_pages(&source, &options).unwrap();

        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].page_number(), 2);
    }
}
