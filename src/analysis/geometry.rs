//! Token geometry utilities: line grouping, column clustering, and
//! alignment-frequency analysis over raw tokens.
//!
//! Every grouping function here is an explicit "current group + flush" state
//! machine over a sorted token sequence; groups flush when a gap threshold is
//! exceeded or input ends.

use std::collections::HashMap;

use crate::model::Token;

/// x0 spread beyond which the coarse pre-pass reports two columns.
const COLUMN_SPREAD_THRESHOLD: f32 = 300.0;

/// Normalized x0 gap that separates column clusters.
const CLUSTER_GAP: f32 = 0.15;

/// Minimum members for a cluster to count as a column.
const MIN_CLUSTER_MEMBERS: usize = 2;

/// A text line: tokens sharing an approximate vertical position, joined
/// left-to-right, carrying the font sizes of its constituent tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Vertical anchor (top of the line's first token)
    pub top: f32,
    /// Joined token text, trimmed
    pub text: String,
    /// Font sizes of tokens that report one, in line order
    pub sizes: Vec<f32>,
}

fn sort_by_top_then_x0(tokens: &mut [Token]) {
    tokens.sort_by(|a, b| {
        let top_cmp = a
            .top
            .partial_cmp(&b.top)
            .unwrap_or(std::cmp::Ordering::Equal);
        if top_cmp == std::cmp::Ordering::Equal {
            a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal)
        } else {
            top_cmp
        }
    });
}

/// Group tokens into lines by vertical position.
///
/// Tokens are sorted by (top, x0); a new line starts whenever the vertical
/// distance to the current line's last token exceeds `y_threshold`. The
/// output partitions the input exactly, with lines in non-decreasing `top`
/// order and tokens within a line ordered left to right.
pub fn group_into_lines(tokens: &[Token], y_threshold: f32) -> Vec<Vec<Token>> {
    if tokens.is_empty() {
        return vec![];
    }

    let mut sorted = tokens.to_vec();
    sort_by_top_then_x0(&mut sorted);

    let mut lines: Vec<Vec<Token>> = Vec::new();
    let mut current: Vec<Token> = Vec::new();

    for token in sorted {
        match current.last() {
            Some(last) if (token.top - last.top).abs() <= y_threshold => {
                current.push(token);
            }
            Some(_) => {
                lines.push(std::mem::take(&mut current));
                current.push(token);
            }
            None => current.push(token),
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Split tokens into columns by horizontal gaps between left edges.
///
/// Tokens are sorted by x0; a new column starts whenever the x0 gap to the
/// previous token exceeds `gap_threshold`. A single token yields one column;
/// an empty slice yields no columns.
pub fn split_into_columns(tokens: &[Token], gap_threshold: f32) -> Vec<Vec<Token>> {
    if tokens.is_empty() {
        return vec![];
    }

    let mut sorted = tokens.to_vec();
    sorted.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal));

    let mut columns: Vec<Vec<Token>> = Vec::new();
    let mut current: Vec<Token> = Vec::new();

    for token in sorted {
        match current.last() {
            Some(last) if (token.x0 - last.x0).abs() > gap_threshold => {
                columns.push(std::mem::take(&mut current));
                current.push(token);
            }
            _ => current.push(token),
        }
    }

    columns.push(current);
    columns
}

/// Coarse two-way column pre-pass.
///
/// If the x0 spread exceeds 300 units, reports two columns split at the
/// median x0; otherwise one column spanning the observed range. This is a
/// cheap heuristic run before full profile construction, not the
/// authoritative column count.
pub fn detect_columns(tokens: &[Token]) -> (usize, Vec<(f32, f32)>) {
    if tokens.is_empty() {
        return (1, vec![]);
    }

    let mut xs: Vec<f32> = tokens.iter().map(|t| t.x0).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let min_x = xs[0];
    let max_x = xs[xs.len() - 1];
    let spread = max_x - min_x;

    if spread > COLUMN_SPREAD_THRESHOLD {
        let mid = xs[xs.len() / 2];
        return (2, vec![(0.0, mid), (mid, max_x)]);
    }

    (1, vec![(min_x, max_x)])
}

/// Count distinct column clusters from page-width-normalized left edges.
///
/// Sorted edges are clustered with a 0.15 gap; only clusters with at least
/// two members count as columns. This is the authoritative column count fed
/// into the mode decision.
pub fn count_column_clusters(x0_norm: &[f32]) -> usize {
    if x0_norm.is_empty() {
        return 0;
    }

    let mut xs = x0_norm.to_vec();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut clusters: Vec<usize> = Vec::new();
    let mut current_len = 1usize;
    let mut current_last = xs[0];

    for &x in &xs[1..] {
        if (x - current_last).abs() <= CLUSTER_GAP {
            current_len += 1;
        } else {
            clusters.push(current_len);
            current_len = 1;
        }
        current_last = x;
    }
    clusters.push(current_len);

    clusters
        .iter()
        .filter(|&&len| len >= MIN_CLUSTER_MEMBERS)
        .count()
}

/// Bucket normalized edge positions by rounding to two decimal places.
///
/// The bucket key is `round(x * 100)`; the value is the occurrence count.
/// Used by form detection and column frequency analysis.
pub fn edge_histogram(values: &[f32]) -> HashMap<i32, usize> {
    let mut histogram = HashMap::new();
    for &v in values {
        let bucket = (v * 100.0).round() as i32;
        *histogram.entry(bucket).or_insert(0) += 1;
    }
    histogram
}

/// Group tokens into [`Line`]s: line grouping plus text joining.
///
/// Empty lines (whitespace-only after joining) are dropped entirely.
pub fn extract_lines(tokens: &[Token], y_threshold: f32) -> Vec<Line> {
    group_into_lines(tokens, y_threshold)
        .into_iter()
        .filter_map(|line| {
            let text = line
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string();
            if text.is_empty() {
                return None;
            }
            let top = line[0].top;
            let sizes = line.iter().filter_map(|t| t.size).collect();
            Some(Line { top, text, sizes })
        })
        .collect()
}
