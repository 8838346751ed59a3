//! Skip/take pagination over an already ordered sequence.

use serde::Serialize;

/// One page of a larger ordered result set.
///
/// Page numbers start at 1. Values below 1 for either the page number or
/// the page size are clamped to 1, and the clamped values are what the
/// page reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    pub page_number: i32,
    pub page_size: i32,
    pub total_count: usize,
    pub total_pages: usize,
}

impl<T> PaginatedList<T> {
    pub fn create<I>(items: I, page_number: i32, page_size: i32) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);

        let all: Vec<T> = items.into_iter().collect();
        let total_count = all.len();
        let size = page_size as usize;
        let total_pages = total_count.div_ceil(size);

        let skip = (page_number as usize - 1).saturating_mul(size);
        let items = all.into_iter().skip(skip).take(size).collect();

        Self {
            items,
            page_number,
            page_size,
            total_count,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        (self.page_number as usize) < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let page = PaginatedList::create(1..=10, 2, 3);

        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total_count, 10);
        assert_eq!(page.total_pages, 4);
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn test_last_page_is_clipped() {
        let page = PaginatedList::create(1..=10, 4, 3);

        assert_eq!(page.items, vec![10]);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_beyond_end_is_empty() {
        let page = PaginatedList::create(vec!["a", "b"], 5, 2);

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_empty_input_has_no_pages() {
        let page = PaginatedList::create(Vec::<u8>::new(), 1, 5);

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_out_of_range_arguments_are_clamped() {
        let page = PaginatedList::create(1..=5, 0, 2);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.items, vec![1, 2]);
        assert!(!page.has_previous());

        let page = PaginatedList::create(1..=5, -3, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.items, vec![1]);
        assert_eq!(page.total_pages, 5);
    }

    #[test]
    fn test_same_arguments_give_same_page() {
        let input = vec![3, 1, 4, 1, 5, 9, 2, 6];
        let first = PaginatedList::create(input.clone(), 2, 3);
        let second = PaginatedList::create(input, 2, 3);

        assert_eq!(first, second);
        assert_eq!(first.items, vec![1, 5, 9]);
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let page = PaginatedList::create(1..=3, i32::MAX, i32::MAX);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}
