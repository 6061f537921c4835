//! Table detection: finds grid-aligned rows and columns and reconstructs a
//! cell grid, with no graphical ruling lines to lean on.

use super::geometry;
use crate::model::Token;

/// A candidate x-position must repeat in at least this many rows.
const MIN_COL_REPEAT: usize = 4;

/// Vertical threshold for row grouping, wider than line grouping.
const ROW_Y_THRESHOLD: f32 = 8.0;

/// Horizontal tolerance when matching a token to a column candidate.
const COL_X_THRESHOLD: f32 = 15.0;

/// Minimum row count for a grid.
const MIN_ROWS: usize = 3;

/// Minimum confirmed column count; two-column layouts are not tables.
const MIN_CONFIRMED_COLUMNS: usize = 3;

/// Two confirmed columns further apart than this are a layout split.
const WIDE_PAIR_GAP: f32 = 200.0;

/// A row is "multi-cell" when at least this many tokens hit columns.
const MIN_MULTI_CELL_HITS: usize = 3;

/// Required fraction of multi-cell rows.
const MIN_MULTI_CELL_ROW_RATIO: f32 = 0.6;

/// Maximum row-width spread relative to the average row width.
const MAX_ROW_WIDTH_VARIATION: f32 = 0.6;

/// Detect a table grid in the page's tokens.
///
/// Returns the reconstructed cell grid on success, `None` when the page does
/// not form a table. Detection is all-or-nothing: no partial grid is ever
/// produced.
pub fn detect_table_grid(tokens: &[Token]) -> Option<Vec<Vec<String>>> {
    if tokens.is_empty() {
        return None;
    }

    let rows = geometry::group_into_lines(tokens, ROW_Y_THRESHOLD);
    if rows.len() < MIN_ROWS {
        log::debug!("table: only {} rows, need {}", rows.len(), MIN_ROWS);
        return None;
    }

    // Count repeated x0 positions across rows. Candidates register at the
    // first x0 seen; each row increments a candidate at most once.
    let mut candidates: Vec<(f32, usize)> = Vec::new();

    for row in &rows {
        let mut seen_in_row: Vec<usize> = Vec::new();
        for token in row {
            let matched = candidates
                .iter()
                .position(|(cx, _)| (token.x0 - cx).abs() <= COL_X_THRESHOLD);
            match matched {
                Some(idx) => {
                    if !seen_in_row.contains(&idx) {
                        candidates[idx].1 += 1;
                        seen_in_row.push(idx);
                    }
                }
                None => {
                    candidates.push((token.x0, 1));
                    seen_in_row.push(candidates.len() - 1);
                }
            }
        }
    }

    let mut columns: Vec<f32> = candidates
        .iter()
        .filter(|(_, count)| *count >= MIN_COL_REPEAT)
        .map(|(cx, _)| *cx)
        .collect();

    if columns.len() < MIN_CONFIRMED_COLUMNS {
        log::debug!(
            "table: {} confirmed columns, need {}",
            columns.len(),
            MIN_CONFIRMED_COLUMNS
        );
        return None;
    }

    columns.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Wide two-column spreads are layout, not tables. Redundant with the
    // column minimum above, kept as an explicit guard.
    if columns.len() == 2 && (columns[1] - columns[0]).abs() > WIDE_PAIR_GAP {
        log::debug!("table: wide two-column spread rejected");
        return None;
    }

    // Most rows must actually span multiple cells.
    let multi_cell_rows = rows
        .iter()
        .filter(|row| {
            let hits = row
                .iter()
                .filter(|token| {
                    columns
                        .iter()
                        .any(|cx| (token.x0 - cx).abs() <= COL_X_THRESHOLD)
                })
                .count();
            hits >= MIN_MULTI_CELL_HITS
        })
        .count();

    if (multi_cell_rows as f32 / rows.len() as f32) < MIN_MULTI_CELL_ROW_RATIO {
        log::debug!(
            "table: only {}/{} rows are multi-cell",
            multi_cell_rows,
            rows.len()
        );
        return None;
    }

    // Assign each token's text to its matching column; unmatched tokens drop.
    let mut grid: Vec<Vec<String>> = Vec::new();
    for row in &rows {
        let mut cells: Vec<String> = vec![String::new(); columns.len()];
        for token in row {
            for (i, cx) in columns.iter().enumerate() {
                if (token.x0 - cx).abs() <= COL_X_THRESHOLD {
                    cells[i].push_str(&token.text);
                    cells[i].push(' ');
                    break;
                }
            }
        }
        grid.push(cells.into_iter().map(|c| c.trim().to_string()).collect());
    }

    // Rows of a real table have similar text-span widths; wildly uneven
    // widths signal layout text masquerading as a grid.
    let row_widths: Vec<f32> = rows
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            let min_x = row
                .iter()
                .map(|t| t.x0)
                .fold(f32::INFINITY, f32::min);
            let max_x = row
                .iter()
                .map(|t| t.x1)
                .fold(f32::NEG_INFINITY, f32::max);
            max_x - min_x
        })
        .collect();

    if row_widths.is_empty() {
        return None;
    }

    let avg_width = row_widths.iter().sum::<f32>() / row_widths.len() as f32;
    let min_width = row_widths.iter().copied().fold(f32::INFINITY, f32::min);
    let max_width = row_widths.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    if max_width - min_width > avg_width * MAX_ROW_WIDTH_VARIATION {
        log::debug!(
            "table: row width variation {:.1} exceeds {:.0}% of average {:.1}",
            max_width - min_width,
            MAX_ROW_WIDTH_VARIATION * 100.0,
            avg_width
        );
        return None;
    }

    Some(grid)
}
