//! Page profile orchestration: runs the analysis stages in pipeline order
//! and assembles one immutable profile per page.

use super::{forms, geometry, headings, lists::ListDetector, tables};
use crate::model::{PageProfile, ProfileBuilder, Token};

/// Vertical threshold for grouping tokens into text lines.
const LINE_Y_THRESHOLD: f32 = 3.0;

/// Build the structural profile for one page.
///
/// Stage order is fixed: malformed-geometry filtering, coarse column
/// detection, density and font statistics, paragraph merge, list detection,
/// heading detection, table detection, form detection and pairing, column
/// refinement, mode decision. Each text stage consumes the previous stage's
/// residual paragraphs. Pure function: no I/O, no side effects beyond the
/// returned profile.
pub fn build_page_profile(page_number: u32, tokens: &[Token], page_width: f32) -> PageProfile {
    // Tokens with unusable geometry never reach threshold comparisons.
    let tokens: Vec<Token> = tokens
        .iter()
        .filter(|t| t.has_valid_geometry())
        .cloned()
        .collect();

    let mut builder = ProfileBuilder::new(page_number);

    if tokens.is_empty() {
        return builder.build();
    }

    let (column_count, column_ranges) = geometry::detect_columns(&tokens);
    builder = builder.columns(column_count, column_ranges);

    let sizes: Vec<f32> = tokens.iter().filter_map(|t| t.size).collect();
    let avg_font_size = if sizes.is_empty() {
        0.0
    } else {
        sizes.iter().sum::<f32>() / sizes.len() as f32
    };
    builder = builder.avg_font_size(avg_font_size);

    // Text pipeline: lines -> paragraphs -> lists -> headings, each stage
    // consuming the previous stage's residue.
    let lines = geometry::extract_lines(&tokens, LINE_Y_THRESHOLD);
    let merged = super::paragraph::merge_lines_into_paragraphs(&lines);
    let word_sizes = super::paragraph::paragraph_font_sizes(&merged, &lines);

    let (detected_lists, residual) = ListDetector::new().detect(&merged);
    let (headings, paragraphs) = headings::detect_headings(&residual, avg_font_size, &word_sizes);

    builder = builder
        .paragraphs(paragraphs)
        .headings(headings)
        .lists(detected_lists);

    if let Some(grid) = tables::detect_table_grid(&tokens) {
        builder = builder.table_grid(grid);
    }

    // Form pairing needs a clean two-way split; when the split disagrees
    // with the edge-frequency signal the page is not treated as a form, so
    // the flag and the pairs always travel together.
    if forms::detect_form_alignment(&tokens, page_width) {
        let columns = geometry::split_into_columns(&tokens, forms::FORM_COLUMN_GAP);
        if columns.len() == 2 {
            let left = geometry::extract_lines(&columns[0], LINE_Y_THRESHOLD);
            let right = geometry::extract_lines(&columns[1], LINE_Y_THRESHOLD);
            builder = builder.form_pairs(forms::pair_form_rows(&left, &right));
        } else {
            log::debug!(
                "page {}: form alignment without a two-column split ({} columns)",
                page_number,
                columns.len()
            );
        }
    }

    // The cluster count over normalized left edges is the authoritative
    // column count; the coarse pre-pass only supplied the x-ranges.
    if page_width > 0.0 {
        let x0_norm: Vec<f32> = tokens.iter().map(|t| t.x0 / page_width).collect();
        let clusters = geometry::count_column_clusters(&x0_norm);
        if clusters >= 2 {
            builder = builder.column_count(clusters);
        }
    }

    builder.tokens(tokens).build()
}
