//! Pure pagination arithmetic.
//!
//! Everything about paging is derived from three numbers; nothing here is
//! stored or mutated. The candidate list recomputes a `PageState` whenever
//! the item count or requested page changes.

/// Derived paging facts for one (total, page size, requested page) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// Requested page clamped into `0..total_pages`.
    pub current_page: usize,
    /// Always at least 1, even for an empty list.
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    /// First item index of the current page.
    pub start: usize,
    /// One past the last slot of the current page; the final page may hold
    /// fewer items, so callers truncate to the available length.
    pub end: usize,
}

/// Compute the page state for `requested_page` over `total_items`.
pub fn paginate(total_items: usize, page_size: usize, requested_page: usize) -> PageState {
    let size = page_size.max(1);
    let total_pages = total_items.div_ceil(size).max(1);
    let current_page = requested_page.min(total_pages - 1);
    let start = current_page * size;
    PageState {
        current_page,
        total_pages,
        has_next: current_page < total_pages - 1,
        has_previous: current_page > 0,
        start,
        end: start + size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_one_empty_page() {
        let page = paginate(0, 6, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 0);
        assert!(!page.has_next);
        assert!(!page.has_previous);
        assert_eq!((page.start, page.end), (0, 6));
    }

    #[test]
    fn out_of_range_request_is_clamped_to_last_page() {
        let page = paginate(13, 6, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
        assert!(!page.has_next);
        assert!(page.has_previous);
        assert_eq!((page.start, page.end), (12, 18));
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let page = paginate(12, 6, 1);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn middle_page_has_both_neighbours() {
        let page = paginate(13, 6, 1);
        assert!(page.has_next);
        assert!(page.has_previous);
        assert_eq!((page.start, page.end), (6, 12));
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let page = paginate(3, 0, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 1);
        assert_eq!((page.start, page.end), (1, 2));
    }
}
