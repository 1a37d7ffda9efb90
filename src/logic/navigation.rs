//! Row selection logic
//!
//! Pure functions for moving the highlighted row inside the current page.
//! Selection stops at the edges instead of wrapping; paging is a separate,
//! explicit action.

/// Move the selection down one row
///
/// # Examples
/// ```
/// use ptwtui::logic::navigation::next_row;
///
/// assert_eq!(next_row(None, 0), None);
/// assert_eq!(next_row(None, 3), Some(0));
/// assert_eq!(next_row(Some(0), 3), Some(1));
/// assert_eq!(next_row(Some(2), 3), Some(2)); // stays on last row
/// ```
pub fn next_row(current: Option<usize>, rows_len: usize) -> Option<usize> {
    if rows_len == 0 {
        return None;
    }

    Some(match current {
        Some(i) => (i + 1).min(rows_len - 1),
        None => 0,
    })
}

/// Move the selection up one row
///
/// # Examples
/// ```
/// use ptwtui::logic::navigation::prev_row;
///
/// assert_eq!(prev_row(None, 0), None);
/// assert_eq!(prev_row(None, 3), Some(0));
/// assert_eq!(prev_row(Some(2), 3), Some(1));
/// assert_eq!(prev_row(Some(0), 3), Some(0)); // stays on first row
/// ```
pub fn prev_row(current: Option<usize>, rows_len: usize) -> Option<usize> {
    if rows_len == 0 {
        return None;
    }

    Some(match current {
        Some(i) => i.saturating_sub(1).min(rows_len - 1),
        None => 0,
    })
}

/// Keep a selection valid after the page's rows were replaced
pub fn clamp_selection(current: Option<usize>, rows_len: usize) -> Option<usize> {
    if rows_len == 0 {
        return None;
    }

    Some(current.unwrap_or(0).min(rows_len - 1))
}

/// First row to draw so the selection stays inside `capacity` visible rows
///
/// # Examples
/// ```
/// use ptwtui::logic::navigation::scroll_offset;
///
/// assert_eq!(scroll_offset(None, 8), 0);
/// assert_eq!(scroll_offset(Some(5), 8), 0);
/// assert_eq!(scroll_offset(Some(12), 8), 5);
/// ```
pub fn scroll_offset(selected: Option<usize>, capacity: usize) -> usize {
    match selected {
        Some(i) if capacity > 0 && i >= capacity => i + 1 - capacity,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_row_empty_page() {
        assert_eq!(next_row(None, 0), None);
        assert_eq!(next_row(Some(4), 0), None);
    }

    #[test]
    fn test_next_row_clamps_stale_index() {
        // Selection left over from a longer page
        assert_eq!(next_row(Some(9), 5), Some(4));
    }

    #[test]
    fn test_prev_row_clamps_stale_index() {
        assert_eq!(prev_row(Some(9), 5), Some(4));
    }

    #[test]
    fn test_scroll_offset_zero_capacity() {
        assert_eq!(scroll_offset(Some(3), 0), 0);
    }

    #[test]
    fn test_clamp_selection() {
        assert_eq!(clamp_selection(None, 0), None);
        assert_eq!(clamp_selection(Some(3), 0), None);
        assert_eq!(clamp_selection(None, 5), Some(0));
        assert_eq!(clamp_selection(Some(7), 5), Some(4));
        assert_eq!(clamp_selection(Some(2), 5), Some(2));
    }
}
