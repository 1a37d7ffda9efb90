//! Pagination arithmetic
//!
//! Pure functions shared by the query controller and the table footer.
//! Pages are 1-based everywhere.

/// Number of pages for a collection, never less than 1
///
/// An empty collection still displays as "page 1 of 1".
///
/// # Examples
/// ```
/// use ptwtui::logic::pagination::total_pages;
///
/// assert_eq!(total_pages(0, 10), 1);
/// assert_eq!(total_pages(10, 10), 1);
/// assert_eq!(total_pages(25, 10), 3);
/// ```
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let pages = total.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Whether `page` is a valid page for the collection
pub fn page_in_range(page: u32, total: u64, per_page: u32) -> bool {
    page >= 1 && page <= total_pages(total, per_page)
}

/// Offset of the first row of `page` within the whole collection
pub fn page_offset(page: u32, per_page: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(per_page)
}

/// 1-based sequence number shown in the "#" column
///
/// Purely positional: it never reflects the record's own id.
pub fn row_sequence_number(page: u32, per_page: u32, index: usize) -> u64 {
    page_offset(page, per_page) + index as u64 + 1
}

/// First and last entry numbers shown in the footer
///
/// `from` is 0 for an empty page so the footer reads "0 to 0".
pub fn entry_range(page: u32, per_page: u32, rows_len: usize) -> (u64, u64) {
    let offset = page_offset(page, per_page);
    let from = if rows_len > 0 { offset + 1 } else { 0 };
    let to = offset + rows_len as u64;
    (from, to)
}

/// Footer summary text
///
/// # Examples
/// ```
/// use ptwtui::logic::pagination::footer_text;
///
/// assert_eq!(footer_text(1, 10, 25, 10), "Showing 1 to 10 of 25 entries");
/// assert_eq!(footer_text(3, 10, 25, 5), "Showing 21 to 25 of 25 entries");
/// ```
pub fn footer_text(page: u32, per_page: u32, total: u64, rows_len: usize) -> String {
    let (from, to) = entry_range(page, per_page, rows_len);
    format!("Showing {} to {} of {} entries", from, to, total)
}

pub fn prev_enabled(page: u32) -> bool {
    page > 1
}

pub fn next_enabled(page: u32, total: u64, per_page: u32) -> bool {
    page < total_pages(total, per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_exact_and_partial() {
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(100, 100), 1);
        assert_eq!(total_pages(101, 100), 2);
        assert_eq!(total_pages(49, 20), 3);
    }

    #[test]
    fn test_total_pages_empty_is_one() {
        for per_page in [10, 20, 50, 100] {
            assert_eq!(total_pages(0, per_page), 1);
        }
    }

    #[test]
    fn test_page_in_range() {
        assert!(!page_in_range(0, 25, 10));
        assert!(page_in_range(1, 25, 10));
        assert!(page_in_range(3, 25, 10));
        assert!(!page_in_range(4, 25, 10));
        assert!(page_in_range(1, 0, 10));
        assert!(!page_in_range(2, 0, 10));
    }

    #[test]
    fn test_row_sequence_number_is_positional() {
        assert_eq!(row_sequence_number(1, 10, 0), 1);
        assert_eq!(row_sequence_number(1, 10, 9), 10);
        assert_eq!(row_sequence_number(3, 10, 0), 21);
        assert_eq!(row_sequence_number(2, 50, 4), 55);
    }

    #[test]
    fn test_entry_range_empty_page() {
        assert_eq!(entry_range(1, 10, 0), (0, 0));
        assert_eq!(footer_text(1, 10, 0, 0), "Showing 0 to 0 of 0 entries");
    }

    #[test]
    fn test_prev_next_enabled() {
        assert!(!prev_enabled(1));
        assert!(prev_enabled(2));

        assert!(next_enabled(1, 25, 10));
        assert!(next_enabled(2, 25, 10));
        assert!(!next_enabled(3, 25, 10));
        assert!(!next_enabled(1, 0, 10));
    }
}
