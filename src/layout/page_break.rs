//! # Page Break Decisions
//!
//! Rules for when a block moves to the next page. Fixed-size blocks are
//! either placed or moved whole. Long-text blocks are moved whole when they
//! fit on a fresh page, and only split line by line when they are taller
//! than a page.

/// Decide what to do with a block that may not fit on the current page.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakDecision {
    /// Place the entire block on the current page (it fits).
    Place,
    /// Move the entire block to the next page.
    MoveToNextPage,
    /// Place some rows here and continue on the next page.
    Split {
        /// How many rows (title, text lines) fit on the current page.
        items_on_current_page: usize,
    },
}

/// True when `required` more millimetres starting at `y` would cross `bottom`.
pub fn needs_break(y: f64, required: f64, bottom: f64) -> bool {
    y + required > bottom
}

/// Given the remaining space on a page and the heights of a block's rows,
/// decide how to break.
pub fn decide_break(
    remaining_height: f64,
    row_heights: &[f64],
    is_breakable: bool,
    min_orphan_rows: usize,
    min_widow_rows: usize,
) -> BreakDecision {
    let total: f64 = row_heights.iter().sum();

    if total <= remaining_height {
        return BreakDecision::Place;
    }

    if !is_breakable {
        return BreakDecision::MoveToNextPage;
    }

    let mut running = 0.0;
    let mut fit_count = 0;
    for &h in row_heights {
        if running + h > remaining_height {
            break;
        }
        running += h;
        fit_count += 1;
    }

    let total_rows = row_heights.len();

    // Too few rows would be left stranded at the bottom of this page.
    if fit_count < min_orphan_rows && fit_count < total_rows {
        return BreakDecision::MoveToNextPage;
    }

    // Too few rows would start the next page; pull some back.
    let remaining_rows = total_rows - fit_count;
    if remaining_rows < min_widow_rows && remaining_rows > 0 {
        let adjusted = fit_count.saturating_sub(min_widow_rows - remaining_rows);
        if adjusted == 0 {
            return BreakDecision::MoveToNextPage;
        }
        return BreakDecision::Split {
            items_on_current_page: adjusted,
        };
    }

    if fit_count == 0 {
        return BreakDecision::MoveToNextPage;
    }

    BreakDecision::Split {
        items_on_current_page: fit_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_break_is_strict() {
        assert!(!needs_break(300.0, 100.0, 400.0));
        assert!(needs_break(300.1, 100.0, 400.0));
    }

    #[test]
    fn everything_fits() {
        let decision = decide_break(100.0, &[20.0, 30.0, 40.0], true, 2, 2);
        assert_eq!(decision, BreakDecision::Place);
    }

    #[test]
    fn unbreakable_moves() {
        let decision = decide_break(50.0, &[20.0, 30.0, 40.0], false, 2, 2);
        assert_eq!(decision, BreakDecision::MoveToNextPage);
    }

    #[test]
    fn split_at_right_point() {
        let decision = decide_break(55.0, &[20.0, 30.0, 40.0], true, 1, 1);
        assert_eq!(
            decision,
            BreakDecision::Split {
                items_on_current_page: 2,
            }
        );
    }

    #[test]
    fn title_not_left_alone() {
        // Only the block title would fit.
        let decision = decide_break(10.0, &[8.0, 8.0, 8.0, 8.0], true, 2, 1);
        assert_eq!(decision, BreakDecision::MoveToNextPage);
    }

    #[test]
    fn widow_control() {
        // 3 of 4 fit, leaving 1 widow (min=2), so pull one back.
        let decision = decide_break(70.0, &[20.0, 20.0, 20.0, 20.0], true, 2, 2);
        assert_eq!(
            decision,
            BreakDecision::Split {
                items_on_current_page: 2,
            }
        );
    }
}
