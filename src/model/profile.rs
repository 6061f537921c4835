//! The per-page structural profile and its builder.

use serde::{Deserialize, Serialize};

use super::Token;
use crate::analysis::mode;

/// Structural classification of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageMode {
    /// Grid-aligned rows and columns
    Table,
    /// Repeated label/value alignment
    Form,
    /// Multi-column text layout
    Layout,
    /// Normal flowing text
    Semantic,
}

impl PageMode {
    /// Stable lowercase label, as used in decision reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageMode::Table => "table",
            PageMode::Form => "form",
            PageMode::Layout => "layout",
            PageMode::Semantic => "semantic",
        }
    }
}

impl std::fmt::Display for PageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker style of a detected list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// `•`, `-`, `–`, `*` markers
    Bullet,
    /// `1.`, `1)`, `(1)`, `a)` markers
    Numbered,
}

/// A run of two or more consecutive list items of one marker style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextList {
    /// Marker style shared by every item
    pub kind: ListKind,
    /// Item texts with markers stripped, in page order
    pub items: Vec<String>,
}

impl TextList {
    /// Create a new list.
    pub fn new(kind: ListKind, items: Vec<String>) -> Self {
        Self { kind, items }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One label/value pair from a form-aligned page.
///
/// `value` is empty when no right-column line matched the label's row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPair {
    /// Left-column text
    pub label: String,
    /// Right-column text, possibly empty
    pub value: String,
}

impl FormPair {
    /// Create a matched pair.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Create a pair with no matched value.
    pub fn unmatched(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
        }
    }
}

/// The computed structural profile of one page.
///
/// Built once by [`ProfileBuilder::build`] and never mutated afterwards;
/// renderers only read it through the accessor methods.
#[derive(Debug, Clone, Serialize)]
pub struct PageProfile {
    page_number: u32,
    tokens: Vec<Token>,
    columns: usize,
    column_x_ranges: Vec<(f32, f32)>,
    text_density: usize,
    avg_font_size: f32,
    has_form_alignment: bool,
    has_table_grid: bool,
    paragraphs: Vec<String>,
    headings: Vec<String>,
    lists: Vec<TextList>,
    table_cells: Option<Vec<Vec<String>>>,
    form_pairs: Option<Vec<FormPair>>,
    detected_mode: PageMode,
    reason: String,
}

impl PageProfile {
    /// 1-based page number.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// The tokens the profile was computed from (well-formed geometry only).
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Authoritative column count.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Observed column x-ranges from the coarse pre-pass.
    pub fn column_x_ranges(&self) -> &[(f32, f32)] {
        &self.column_x_ranges
    }

    /// Token count, used as a rough text density measure.
    pub fn text_density(&self) -> usize {
        self.text_density
    }

    /// Mean font size over tokens that report one (0.0 if none do).
    pub fn avg_font_size(&self) -> f32 {
        self.avg_font_size
    }

    /// Whether repeated left/right edge alignment was found.
    pub fn has_form_alignment(&self) -> bool {
        self.has_form_alignment
    }

    /// Whether a full cell grid was reconstructed.
    pub fn has_table_grid(&self) -> bool {
        self.has_table_grid
    }

    /// Residual body paragraphs (headings and list items removed).
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Paragraphs reclassified as headings, in page order.
    pub fn headings(&self) -> &[String] {
        &self.headings
    }

    /// Detected lists, in page order.
    pub fn lists(&self) -> &[TextList] {
        &self.lists
    }

    /// The reconstructed cell grid, present exactly when `has_table_grid`.
    pub fn table_cells(&self) -> Option<&Vec<Vec<String>>> {
        self.table_cells.as_ref()
    }

    /// Ordered label/value pairs, present exactly when `has_form_alignment`.
    pub fn form_pairs(&self) -> Option<&[FormPair]> {
        self.form_pairs.as_deref()
    }

    /// The winning structural classification.
    pub fn detected_mode(&self) -> PageMode {
        self.detected_mode
    }

    /// Human-readable audit reason for the classification.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Builder for [`PageProfile`].
///
/// Analysis stages fill the builder in pipeline order; [`build`](Self::build)
/// runs the mode decision and returns the read-only snapshot. Flags and data
/// travel together: setting a table grid or form pairs sets the matching flag,
/// so no partially-detected state can leak into a finished profile.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    page_number: u32,
    tokens: Vec<Token>,
    columns: usize,
    column_x_ranges: Vec<(f32, f32)>,
    text_density: usize,
    avg_font_size: f32,
    paragraphs: Vec<String>,
    headings: Vec<String>,
    lists: Vec<TextList>,
    table_cells: Option<Vec<Vec<String>>>,
    form_pairs: Option<Vec<FormPair>>,
}

impl ProfileBuilder {
    /// Start a profile for the given 1-based page number.
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            tokens: Vec::new(),
            columns: 1,
            column_x_ranges: Vec::new(),
            text_density: 0,
            avg_font_size: 0.0,
            paragraphs: Vec::new(),
            headings: Vec::new(),
            lists: Vec::new(),
            table_cells: None,
            form_pairs: None,
        }
    }

    /// Attach the page's tokens.
    pub fn tokens(mut self, tokens: Vec<Token>) -> Self {
        self.text_density = tokens.len();
        self.tokens = tokens;
        self
    }

    /// Set the column count and observed x-ranges.
    pub fn columns(mut self, count: usize, x_ranges: Vec<(f32, f32)>) -> Self {
        self.columns = count;
        self.column_x_ranges = x_ranges;
        self
    }

    /// Refine the column count without touching the coarse x-ranges.
    pub fn column_count(mut self, count: usize) -> Self {
        self.columns = count;
        self
    }

    /// Set the page's average font size.
    pub fn avg_font_size(mut self, size: f32) -> Self {
        self.avg_font_size = size;
        self
    }

    /// Set the residual paragraph sequence.
    pub fn paragraphs(mut self, paragraphs: Vec<String>) -> Self {
        self.paragraphs = paragraphs;
        self
    }

    /// Set the detected headings.
    pub fn headings(mut self, headings: Vec<String>) -> Self {
        self.headings = headings;
        self
    }

    /// Set the detected lists.
    pub fn lists(mut self, lists: Vec<TextList>) -> Self {
        self.lists = lists;
        self
    }

    /// Attach a fully reconstructed table grid.
    pub fn table_grid(mut self, cells: Vec<Vec<String>>) -> Self {
        self.table_cells = Some(cells);
        self
    }

    /// Attach fully paired form rows.
    pub fn form_pairs(mut self, pairs: Vec<FormPair>) -> Self {
        self.form_pairs = Some(pairs);
        self
    }

    /// Run the mode decision and freeze the profile.
    pub fn build(self) -> PageProfile {
        let has_table_grid = self.table_cells.is_some();
        let has_form_alignment = self.form_pairs.is_some();
        let decision = mode::decide(has_table_grid, has_form_alignment, self.columns);

        PageProfile {
            page_number: self.page_number,
            tokens: self.tokens,
            columns: self.columns,
            column_x_ranges: self.column_x_ranges,
            text_density: self.text_density,
            avg_font_size: self.avg_font_size,
            has_form_alignment,
            has_table_grid,
            paragraphs: self.paragraphs,
            headings: self.headings,
            lists: self.lists,
            table_cells: self.table_cells,
            form_pairs: self.form_pairs,
            detected_mode: decision.mode,
            reason: decision.reason.to_string(),
        }
    }
}

/// Outcome of analyzing one page: either a structural profile, or the signal
/// that the page carries no usable text and should be rendered as an image.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageAnalysis {
    /// No tokens, or below the minimum character count
    ImageOnly {
        /// 1-based page number
        page: u32,
    },
    /// A fully built structural profile
    Profile(Box<PageProfile>),
}

impl PageAnalysis {
    /// The 1-based page number this analysis belongs to.
    pub fn page_number(&self) -> u32 {
        match self {
            PageAnalysis::ImageOnly { page } => *page,
            PageAnalysis::Profile(profile) => profile.page_number(),
        }
    }

    /// The profile, if the page had usable text.
    pub fn profile(&self) -> Option<&PageProfile> {
        match self {
            PageAnalysis::ImageOnly { .. } => None,
            PageAnalysis::Profile(profile) => Some(profile),
        }
    }
}
