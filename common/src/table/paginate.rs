//! Fixed-size paging with one cursor per viewport.
//!
//! Pages are 1-based. There is always at least one page, so an empty table
//! renders "no results" instead of a zero-page state.

/// Rows per page on narrow (card) layouts.
pub const COMPACT_PAGE_SIZE: usize = 5;
/// Rows per page on the desktop table.
pub const FULL_PAGE_SIZE: usize = 10;

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice bounds of one page. `end_index` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub current_page: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub total_items: usize,
}

impl PageBounds {
    pub fn compute(len: usize, page_size: usize, current_page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(len, page_size);
        let current_page = current_page.clamp(1, total_pages);
        let start_index = ((current_page - 1) * page_size).min(len);
        let end_index = (start_index + page_size).min(len);
        Self {
            current_page,
            total_pages,
            start_index,
            end_index,
            total_items: len,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// "Showing 11 to 20 of 23 results".
    pub fn summary(&self) -> String {
        if self.total_items == 0 {
            return "No results".to_string();
        }
        format!(
            "Showing {} to {} of {} results",
            self.start_index + 1,
            self.end_index,
            self.total_items
        )
    }
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub bounds: PageBounds,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        self.bounds.total_pages
    }

    pub fn current_page(&self) -> usize {
        self.bounds.current_page
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slices `items` into page `current_page` of size `page_size`.
pub fn page<T>(items: &[T], page_size: usize, current_page: usize) -> Page<&T> {
    let bounds = PageBounds::compute(items.len(), page_size, current_page);
    Page {
        items: items[bounds.start_index..bounds.end_index].iter().collect(),
        bounds,
    }
}

/// Current page of one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page_size: usize,
    current: usize,
}

impl PageCursor {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn bounds(&self, total_items: usize) -> PageBounds {
        PageBounds::compute(total_items, self.page_size, self.current)
    }

    /// Moves forward; a no-op on the last page. Returns whether it moved.
    pub fn next(&mut self, total_items: usize) -> bool {
        if self.current < total_pages(total_items, self.page_size) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Moves back; a no-op on page 1. Returns whether it moved.
    pub fn previous(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to `page`, clamped into `[1, total_pages]`. Returns the page
    /// actually selected.
    pub fn go_to(&mut self, page: usize, total_items: usize) -> usize {
        self.current = page.clamp(1, total_pages(total_items, self.page_size));
        self.current
    }

    /// Pulls the cursor back inside the range after the row count shrank.
    pub fn clamp(&mut self, total_items: usize) {
        self.current = self.current.clamp(1, total_pages(total_items, self.page_size));
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Viewport {
    Compact,
    Full,
}

/// Two independent cursors over the same filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    compact: PageCursor,
    full: PageCursor,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(COMPACT_PAGE_SIZE, FULL_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(compact_page_size: usize, full_page_size: usize) -> Self {
        Self {
            compact: PageCursor::new(compact_page_size),
            full: PageCursor::new(full_page_size),
        }
    }

    pub fn cursor(&self, viewport: Viewport) -> &PageCursor {
        match viewport {
            Viewport::Compact => &self.compact,
            Viewport::Full => &self.full,
        }
    }

    pub fn cursor_mut(&mut self, viewport: Viewport) -> &mut PageCursor {
        match viewport {
            Viewport::Compact => &mut self.compact,
            Viewport::Full => &mut self.full,
        }
    }

    /// Both cursors back to page 1, used when the criteria change.
    pub fn reset(&mut self) {
        self.compact.reset();
        self.full.reset();
    }

    /// Both cursors re-clamped, used when the data changes.
    pub fn clamp(&mut self, total_items: usize) {
        self.compact.clamp(total_items);
        self.full.clamp(total_items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequences_still_have_one_page() {
        let empty: Vec<u8> = Vec::new();
        let page = page(&empty, 10, 1);
        assert_eq!(page.total_pages(), 1);
        assert!(page.is_empty());
        assert_eq!(page.bounds.summary(), "No results");
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let items: Vec<u32> = (1..=23).collect();
        let last = page(&items, 10, 3);
        assert_eq!(last.total_pages(), 3);
        assert_eq!(last.items, vec![&21, &22, &23]);
        assert_eq!(last.bounds.summary(), "Showing 21 to 23 of 23 results");
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let items: Vec<u32> = (1..=23).collect();
        assert_eq!(page(&items, 10, 9).current_page(), 3);
        assert_eq!(page(&items, 10, 0).current_page(), 1);
    }

    #[test]
    fn navigation_stops_at_the_bounds() {
        let mut cursor = PageCursor::new(5);
        assert!(!cursor.previous());
        assert!(cursor.next(12));
        assert!(cursor.next(12));
        assert!(!cursor.next(12));
        assert_eq!(cursor.current(), 3);
        assert_eq!(cursor.go_to(7, 12), 3);
    }

    #[test]
    fn shrinking_data_clamps_both_cursors_independently() {
        let mut paginator = Paginator::default();
        paginator.cursor_mut(Viewport::Compact).go_to(5, 30);
        paginator.cursor_mut(Viewport::Full).go_to(2, 30);
        assert_eq!(paginator.cursor(Viewport::Compact).current(), 5);
        assert_eq!(paginator.cursor(Viewport::Full).current(), 2);

        paginator.clamp(12);
        assert_eq!(paginator.cursor(Viewport::Compact).current(), 3);
        assert_eq!(paginator.cursor(Viewport::Full).current(), 2);
    }

    #[test]
    fn moving_one_cursor_leaves_the_other_alone() {
        let mut paginator = Paginator::default();
        paginator.cursor_mut(Viewport::Compact).next(30);
        assert_eq!(paginator.cursor(Viewport::Compact).current(), 2);
        assert_eq!(paginator.cursor(Viewport::Full).current(), 1);
    }
}
