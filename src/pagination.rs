//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of items to display per page.
    pub page_size: u64,
    /// The maximum number of page links to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            page_size: 10,
            max_pages: 5,
        }
    }
}

/// An element of the pagination bar.
#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    /// A link to another page.
    Page(u64),
    /// The page being displayed.
    CurrPage(u64),
    /// Pages left out between the window and the first or last page.
    Ellipsis,
    /// A link to the next page, `None` on the last page.
    NextButton(Option<u64>),
    /// A link to the previous page, `None` on the first page.
    BackButton(Option<u64>),
}

/// Create the indicators for a pagination bar.
///
/// Shows a window of at most `max_pages` links around `curr_page`, shifted
/// left when it would run past the last page. The first and last pages are
/// always reachable, with an ellipsis standing in for any pages skipped in
/// between. Back and next buttons are always present, without a target
/// when there is no page to go to.
pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let max_pages = max_pages.max(1);
    let page_count = page_count.max(1);
    let curr_page = curr_page.clamp(1, page_count);

    let mut start_page = curr_page.saturating_sub(max_pages / 2).max(1);
    let end_page = (start_page + max_pages - 1).min(page_count);

    if end_page - start_page < max_pages - 1 {
        start_page = end_page.saturating_sub(max_pages - 1).max(1);
    }

    let mut indicators = Vec::new();

    indicators.push(PaginationIndicator::BackButton(
        (curr_page > 1).then(|| curr_page - 1),
    ));

    if start_page > 1 {
        indicators.push(PaginationIndicator::Page(1));

        if start_page > 2 {
            indicators.push(PaginationIndicator::Ellipsis);
        }
    }

    indicators.extend((start_page..=end_page).map(|page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    }));

    if end_page < page_count {
        if end_page < page_count - 1 {
            indicators.push(PaginationIndicator::Ellipsis);
        }

        indicators.push(PaginationIndicator::Page(page_count));
    }

    indicators.push(PaginationIndicator::NextButton(
        (curr_page < page_count).then(|| curr_page + 1),
    ));

    indicators
}

/// The number of pages needed to show `item_count` items, `page_size` at a time.
pub fn page_count(item_count: usize, page_size: u64) -> u64 {
    (item_count as u64).div_ceil(page_size.max(1))
}

/// Clamp `requested_page` to the pages that exist.
///
/// There is always at least one page, even when there are no items.
pub fn clamp_page(requested_page: u64, page_count: u64) -> u64 {
    requested_page.clamp(1, page_count.max(1))
}

/// One page of a list of items.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    /// The items on this page.
    pub items: &'a [T],
    /// The 1-based page number, after clamping.
    pub page: u64,
    /// The number of pages in the list.
    pub page_count: u64,
    /// The 1-based position of the first item on the page, zero for an empty page.
    pub first_item: usize,
    /// The 1-based position of the last item on the page.
    pub last_item: usize,
    /// The number of items in the whole list.
    pub total: usize,
}

impl<T> Page<'_, T> {
    /// The summary shown under a paged table, e.g. "Showing 1 - 10 of 12 transactions".
    pub fn info_text(&self, noun: &str) -> String {
        format!(
            "Showing {} - {} of {} {noun}",
            self.first_item, self.last_item, self.total
        )
    }
}

/// Get page `requested_page` of `items`, clamping the page number to the pages that exist.
pub fn paginate<T>(items: &[T], requested_page: u64, page_size: u64) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let page_count = page_count(items.len(), page_size);
    let page = clamp_page(requested_page, page_count);

    let start = ((page - 1) * page_size) as usize;
    let end = (start + page_size as usize).min(items.len());
    let page_items = items.get(start..end).unwrap_or_default();

    Page {
        items: page_items,
        page,
        page_count,
        first_item: if page_items.is_empty() { 0 } else { start + 1 },
        last_item: end,
        total: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use crate::pagination::{
        PaginationIndicator, clamp_page, create_pagination_indicators, page_count, paginate,
    };

    #[test]
    fn shows_all_pages() {
        let max_pages = 5;
        let page_count = 5;
        let curr_page = 1;
        let want = [
            PaginationIndicator::BackButton(None),
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::Page(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::NextButton(Some(2)),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_on_left() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 1;
        let want = [
            PaginationIndicator::BackButton(None),
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::Page(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(Some(2)),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_first_page_without_ellipsis_when_adjacent() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 4;
        let want = [
            PaginationIndicator::BackButton(Some(3)),
            PaginationIndicator::Page(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::Page(3),
            PaginationIndicator::CurrPage(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::Page(6),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(Some(5)),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_on_right() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 10;
        let want = [
            PaginationIndicator::BackButton(Some(9)),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::Page(8),
            PaginationIndicator::Page(9),
            PaginationIndicator::CurrPage(10),
            PaginationIndicator::NextButton(None),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_last_page_without_ellipsis_when_adjacent() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 7;
        let want = [
            PaginationIndicator::BackButton(Some(6)),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(5),
            PaginationIndicator::Page(6),
            PaginationIndicator::CurrPage(7),
            PaginationIndicator::Page(8),
            PaginationIndicator::Page(9),
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(Some(8)),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn pagination_indicator_shows_page_subset_in_center() {
        let max_pages = 5;
        let page_count = 12;
        let curr_page = 6;
        let want = [
            PaginationIndicator::BackButton(Some(5)),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::CurrPage(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::Page(8),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(12),
            PaginationIndicator::NextButton(Some(7)),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn single_page_has_disabled_buttons() {
        let want = [
            PaginationIndicator::BackButton(None),
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::NextButton(None),
        ];

        let got = create_pagination_indicators(1, 0, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 10), 3);
    }

    #[test]
    fn clamps_out_of_range_pages() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(7, 3), 3);
        assert_eq!(clamp_page(5, 0), 1);
    }

    #[test]
    fn pages_concatenate_to_the_whole_list() {
        let items: Vec<u32> = (0..23).collect();
        let pages = page_count(items.len(), 10);

        let joined: Vec<u32> = (1..=pages)
            .flat_map(|page| paginate(&items, page, 10).items.to_vec())
            .collect();

        assert_eq!(pages, 3);
        assert_eq!(joined, items);
    }

    #[test]
    fn paginate_reports_item_range() {
        let items: Vec<u32> = (0..12).collect();

        let first = paginate(&items, 1, 10);
        let second = paginate(&items, 2, 10);

        assert_eq!(first.info_text("transactions"), "Showing 1 - 10 of 12 transactions");
        assert_eq!(second.items, &[10, 11]);
        assert_eq!(second.info_text("transactions"), "Showing 11 - 12 of 12 transactions");
    }

    #[test]
    fn paginate_clamps_page_past_the_end() {
        let items: Vec<u32> = (0..12).collect();

        let page = paginate(&items, 9, 10);

        assert_eq!(page.page, 2);
        assert_eq!(page.items, &[10, 11]);
    }

    #[test]
    fn empty_list_shows_zero_range() {
        let items: Vec<u32> = Vec::new();

        let page = paginate(&items, 1, 10);

        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.info_text("transactions"), "Showing 0 - 0 of 0 transactions");
    }
}
