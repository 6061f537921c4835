//! Mode decision: combines detector outputs into one page classification
//! with an audit reason.

use crate::model::PageMode;

/// The winning classification and its human-readable reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeDecision {
    /// The page's structural classification
    pub mode: PageMode,
    /// Audit reason recorded in the profile and decision report
    pub reason: &'static str,
}

/// Decide the page mode from detector flags and the column count.
///
/// An ordered rule cascade, first match wins; the priority is absolute and
/// independent of the order the flags were computed in.
pub fn decide(has_table_grid: bool, has_form_alignment: bool, columns: usize) -> ModeDecision {
    let rules = [
        (
            has_table_grid,
            PageMode::Table,
            "grid-aligned rows and columns",
        ),
        (
            has_form_alignment,
            PageMode::Form,
            "repeated label-value alignment",
        ),
        (columns > 1, PageMode::Layout, "multi-column text layout"),
    ];

    for (matches, mode, reason) in rules {
        if matches {
            return ModeDecision { mode, reason };
        }
    }

    ModeDecision {
        mode: PageMode::Semantic,
        reason: "normal flowing text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        // All flags set: table wins outright.
        let d = decide(true, true, 2);
        assert_eq!(d.mode, PageMode::Table);
        assert_eq!(d.reason, "grid-aligned rows and columns");

        let d = decide(false, true, 2);
        assert_eq!(d.mode, PageMode::Form);

        let d = decide(false, false, 2);
        assert_eq!(d.mode, PageMode::Layout);

        let d = decide(false, false, 1);
        assert_eq!(d.mode, PageMode::Semantic);
        assert_eq!(d.reason, "normal flowing text");
    }

    #[test]
    fn test_zero_columns_is_semantic() {
        let d = decide(false, false, 0);
        assert_eq!(d.mode, PageMode::Semantic);
    }
}
