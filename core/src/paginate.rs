use serde::Serialize;

/// Records per page on the directory pages.
pub const DEFAULT_PAGE_SIZE: usize = 6;
/// Upper bound on numeric links in the pagination bar.
pub const MAX_PAGE_LINKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "page")]
pub enum PageLabel {
    Number(usize),
    Ellipsis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub label: PageLabel,
    pub is_active: bool,
}

impl PageLink {
    fn number(page: usize, current_page: usize) -> Self {
        Self { label: PageLabel::Number(page), is_active: page == current_page }
    }

    fn ellipsis() -> Self {
        Self { label: PageLabel::Ellipsis, is_active: false }
    }

    pub fn page(&self) -> Option<usize> {
        match self.label {
            PageLabel::Number(n) => Some(n),
            PageLabel::Ellipsis => None,
        }
    }
}

/// One page of a filtered result plus the layout of its pagination controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageWindow<'a, R> {
    pub items: Vec<&'a R>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_links: Vec<PageLink>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<'a, R> PageWindow<'a, R> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Controls are only drawn when there is somewhere to navigate to.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// 1-based position of the first item on this page, `None` when empty.
    pub fn first_item_number(&self, page_size: usize) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.current_page.saturating_sub(1) * page_size.max(1) + 1)
    }

    pub fn last_item_number(&self, page_size: usize) -> Option<usize> {
        self.first_item_number(page_size).map(|first| first + self.items.len() - 1)
    }
}

/// Slice `filtered` into the page `current_page` (1-based) of `page_size` items.
///
/// `current_page` is not clamped here; an out-of-range page yields no items.
/// A `page_size` of zero is treated as one.
pub fn paginate<'a, R>(filtered: &[&'a R], page_size: usize, current_page: usize) -> PageWindow<'a, R> {
    let page_size = page_size.max(1);
    let total_items = filtered.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = current_page.saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(total_items);
    let items = if start < end { filtered[start..end].to_vec() } else { Vec::new() };

    PageWindow {
        items,
        total_items,
        total_pages,
        current_page,
        page_links: page_links(total_pages, current_page),
        has_previous: current_page > 1 && total_pages > 0,
        has_next: current_page < total_pages,
    }
}

/// Layout of the numeric links for `total_pages`, with `current_page` active.
///
/// Up to [`MAX_PAGE_LINKS`] pages are listed outright. Beyond that the first and
/// last page are always shown, plus a run of three pages as centred on the
/// current page as the interior `[2, total_pages - 1]` allows. Skipped pages
/// collapse into an ellipsis.
pub fn page_links(total_pages: usize, current_page: usize) -> Vec<PageLink> {
    if total_pages <= MAX_PAGE_LINKS {
        return (1..=total_pages).map(|p| PageLink::number(p, current_page)).collect();
    }

    let span = MAX_PAGE_LINKS - 2;
    let last_interior = total_pages - 1;
    // slide the run inward instead of letting it fall off either end
    let start = current_page
        .saturating_sub(span / 2)
        .clamp(2, last_interior + 1 - span);
    let end = start + span - 1;

    let mut links = Vec::with_capacity(MAX_PAGE_LINKS + 2);
    links.push(PageLink::number(1, current_page));
    if start > 2 {
        links.push(PageLink::ellipsis());
    }
    links.extend((start..=end).map(|p| PageLink::number(p, current_page)));
    if end < last_interior {
        links.push(PageLink::ellipsis());
    }
    links.push(PageLink::number(total_pages, current_page));
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(total: usize, current: usize) -> String {
        page_links(total, current)
            .iter()
            .map(|l| match (l.label, l.is_active) {
                (PageLabel::Number(n), true) => format!("[{n}]"),
                (PageLabel::Number(n), false) => n.to_string(),
                (PageLabel::Ellipsis, _) => "…".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn small_totals_list_every_page() {
        assert_eq!(layout(0, 1), "");
        assert_eq!(layout(1, 1), "[1]");
        assert_eq!(layout(5, 3), "1 2 [3] 4 5");
    }

    #[test]
    fn window_centres_on_current_page() {
        assert_eq!(layout(10, 6), "1 … 5 [6] 7 … 10");
        assert_eq!(layout(10, 4), "1 … 3 [4] 5 … 10");
    }

    #[test]
    fn window_shifts_inward_near_edges() {
        assert_eq!(layout(10, 1), "[1] 2 3 4 … 10");
        assert_eq!(layout(10, 2), "1 [2] 3 4 … 10");
        assert_eq!(layout(10, 3), "1 2 [3] 4 … 10");
        assert_eq!(layout(10, 8), "1 … 7 [8] 9 10");
        assert_eq!(layout(10, 9), "1 … 7 8 [9] 10");
        assert_eq!(layout(10, 10), "1 … 7 8 9 [10]");
    }

    #[test]
    fn six_pages_needs_one_ellipsis() {
        assert_eq!(layout(6, 1), "[1] 2 3 4 … 6");
        assert_eq!(layout(6, 3), "1 2 [3] 4 … 6");
        assert_eq!(layout(6, 4), "1 … 3 [4] 5 6");
        assert_eq!(layout(6, 6), "1 … 3 4 5 [6]");
    }

    #[test]
    fn out_of_range_current_page_still_bounded() {
        assert_eq!(layout(10, 0), "1 2 3 4 … 10");
        assert_eq!(layout(10, 40), "1 … 7 8 9 10");
    }

    #[test]
    fn slices_requested_page() {
        let data: Vec<u32> = (0..9).collect();
        let refs: Vec<&u32> = data.iter().collect();

        let first = paginate(&refs, 6, 1);
        assert_eq!(first.items.len(), 6);
        assert_eq!(first.total_pages, 2);
        assert!(!first.has_previous);
        assert!(first.has_next);
        assert_eq!(first.first_item_number(6), Some(1));
        assert_eq!(first.last_item_number(6), Some(6));

        let second = paginate(&refs, 6, 2);
        assert_eq!(second.items, vec![&6u32, &7, &8]);
        assert!(second.has_previous);
        assert!(!second.has_next);
        assert_eq!(second.first_item_number(6), Some(7));
        assert_eq!(second.last_item_number(6), Some(9));
    }

    #[test]
    fn empty_input_has_no_pages_and_no_navigation() {
        let refs: Vec<&u32> = Vec::new();
        let window = paginate(&refs, 6, 1);
        assert_eq!(window.total_pages, 0);
        assert!(window.is_empty());
        assert!(window.page_links.is_empty());
        assert!(!window.has_previous);
        assert!(!window.has_next);
        assert!(!window.shows_controls());
        assert_eq!(window.first_item_number(6), None);
    }

    #[test]
    fn past_the_end_page_is_empty_not_clamped() {
        let data: Vec<u32> = (0..3).collect();
        let refs: Vec<&u32> = data.iter().collect();
        let window = paginate(&refs, 2, 5);
        assert!(window.items.is_empty());
        assert_eq!(window.current_page, 5);
        assert_eq!(window.total_pages, 2);
    }
}
