//! Form detection and label/value pairing for two-column form pages.

use super::geometry::{self, Line};
use crate::model::{FormPair, Token};

/// Gap threshold for splitting a form page into label and value columns.
pub const FORM_COLUMN_GAP: f32 = 50.0;

/// Vertical tolerance when matching a value line to a label line.
const PAIR_Y_TOLERANCE: f32 = 10.0;

/// Both the dominant left edge and the dominant right edge must repeat this
/// often for a page to qualify as form-aligned.
const MIN_EDGE_REPEAT: usize = 4;

/// Decide whether the page shows repeated label/value alignment.
///
/// Token left and right edges are normalized by page width and bucketed to
/// two decimal places; the page qualifies when the most frequent left-edge
/// bucket and most frequent right-edge bucket each hold at least four tokens.
pub fn detect_form_alignment(tokens: &[Token], page_width: f32) -> bool {
    if tokens.is_empty() || page_width <= 0.0 {
        return false;
    }

    let x0_norm: Vec<f32> = tokens.iter().map(|t| t.x0 / page_width).collect();
    let x1_norm: Vec<f32> = tokens.iter().map(|t| t.x1 / page_width).collect();

    let max_left = geometry::edge_histogram(&x0_norm)
        .values()
        .copied()
        .max()
        .unwrap_or(0);
    let max_right = geometry::edge_histogram(&x1_norm)
        .values()
        .copied()
        .max()
        .unwrap_or(0);

    max_left >= MIN_EDGE_REPEAT && max_right >= MIN_EDGE_REPEAT
}

/// Pair each left-column line with the first unused right-column line within
/// vertical tolerance.
///
/// Matching is greedy in left-line order and first-match-wins in right-line
/// order: an earlier label can claim a value line that a later label would
/// sit closer to, and there is no backtracking. Labels with no match pair
/// with an empty value.
pub fn pair_form_rows(left: &[Line], right: &[Line]) -> Vec<FormPair> {
    let mut pairs: Vec<FormPair> = Vec::new();
    let mut used = vec![false; right.len()];

    for label in left {
        let matched = right.iter().enumerate().position(|(i, value)| {
            !used[i] && (label.top - value.top).abs() <= PAIR_Y_TOLERANCE
        });

        match matched {
            Some(idx) => {
                used[idx] = true;
                pairs.push(FormPair::new(label.text.clone(), right[idx].text.clone()));
            }
            None => pairs.push(FormPair::unmatched(label.text.clone())),
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(top: f32, text: &str) -> Line {
        Line {
            top,
            text: text.to_string(),
            sizes: vec![],
        }
    }

    fn edge_token(x0: f32, x1: f32, top: f32) -> Token {
        Token::new("w", x0, top, x1, top + 10.0)
    }

    #[test]
    fn test_form_alignment_requires_both_edges() {
        let width = 600.0;
        // Four tokens sharing both edges: qualifies.
        let aligned: Vec<Token> = (0..4)
            .map(|i| edge_token(60.0, 180.0, 20.0 + i as f32 * 30.0))
            .collect();
        assert!(detect_form_alignment(&aligned, width));

        // Shared left edge but scattered right edges: does not qualify.
        let scattered: Vec<Token> = (0..4)
            .map(|i| edge_token(60.0, 120.0 + i as f32 * 40.0, 20.0 + i as f32 * 30.0))
            .collect();
        assert!(!detect_form_alignment(&scattered, width));
    }

    #[test]
    fn test_form_alignment_empty_or_degenerate() {
        assert!(!detect_form_alignment(&[], 600.0));
        let tokens = vec![edge_token(10.0, 20.0, 0.0)];
        assert!(!detect_form_alignment(&tokens, 0.0));
    }

    #[test]
    fn test_pairing_matches_by_vertical_proximity() {
        let left = vec![line(10.0, "Name"), line(40.0, "Date")];
        let right = vec![line(11.0, "Alice"), line(41.0, "2024-01-01")];
        let pairs = pair_form_rows(&left, &right);
        assert_eq!(
            pairs,
            vec![
                FormPair::new("Name", "Alice"),
                FormPair::new("Date", "2024-01-01"),
            ]
        );
    }

    #[test]
    fn test_pairing_is_greedy_first_match_wins() {
        // Left tops [10, 50], right tops [12, 11]: the first label claims the
        // first in-tolerance right line (top 12) even though top 11 is
        // closer; the second label finds nothing within tolerance of 50 and
        // stays unmatched. No backtracking.
        let left = vec![line(10.0, "A"), line(50.0, "B")];
        let right = vec![line(12.0, "first"), line(11.0, "second")];
        let pairs = pair_form_rows(&left, &right);
        assert_eq!(
            pairs,
            vec![FormPair::new("A", "first"), FormPair::unmatched("B")]
        );
    }

    #[test]
    fn test_unmatched_label_gets_empty_value() {
        let left = vec![line(10.0, "Signature")];
        let right: Vec<Line> = vec![];
        let pairs = pair_form_rows(&left, &right);
        assert_eq!(pairs, vec![FormPair::unmatched("Signature")]);
        assert!(pairs[0].value.is_empty());
    }

    #[test]
    fn test_value_line_used_only_once() {
        let left = vec![line(10.0, "A"), line(14.0, "B")];
        let right = vec![line(12.0, "only")];
        let pairs = pair_form_rows(&left, &right);
        assert_eq!(
            pairs,
            vec![FormPair::new("A", "only"), FormPair::unmatched("B")]
        );
    }
}
