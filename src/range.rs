//! Offset pagination helper.

/// Returns the half-open `[start, end)` interval of positions covered by a
/// 1-indexed `page` of `page_size` rows.
///
/// The interval is only meaningful while the dataset doesn't change between
/// requests. Callers are expected to pass positive values: a `page` of zero is
/// treated as the first page and a `page_size` of zero yields an empty range.
/// Bounds past `usize::MAX` saturate.
pub fn index_range(page: usize, page_size: usize) -> (usize, usize) {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size);

    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_pages() {
        assert_eq!(index_range(1, 7), (0, 7));
        assert_eq!(index_range(1, 10), (0, 10));
        assert_eq!(index_range(2, 10), (10, 20));
        assert_eq!(index_range(3, 15), (30, 45));
    }

    #[test]
    fn test_range_matches_formula() {
        for page in 1..50 {
            for page_size in 1..50 {
                let start = (page - 1) * page_size;
                assert_eq!(index_range(page, page_size), (start, start + page_size));
            }
        }
    }

    #[test]
    fn test_consecutive_pages_are_adjacent() {
        let (_, end) = index_range(4, 25);
        let (start, _) = index_range(5, 25);
        assert_eq!(end, start);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(index_range(0, 10), (0, 10));
        assert_eq!(index_range(3, 0), (0, 0));
    }

    #[test]
    fn test_huge_pages_saturate() {
        assert_eq!(index_range(usize::MAX, 2), (usize::MAX, usize::MAX));
        assert_eq!(index_range(2, usize::MAX), (usize::MAX, usize::MAX));
        assert_eq!(index_range(1, usize::MAX), (0, usize::MAX));
    }
}
