//! Filter + paginate state of one rendered table.
//!
//! Criteria changes reset both cursors to page 1; row changes clamp them.
//! Both happen inside the call that changed the input, so a render never
//! sees a cursor pointing past the end.

use crate::table::filter::{FilterCriteria, FilterPipeline, StatusFilter};
use crate::table::paginate::{Page, PageBounds, Paginator, Viewport};

#[derive(Debug, Clone)]
pub struct TableView<T> {
    rows: Vec<T>,
    filtered: Vec<usize>,
    criteria: FilterCriteria,
    pipeline: FilterPipeline<T>,
    paginator: Paginator,
}

impl<T> TableView<T> {
    pub fn new(pipeline: FilterPipeline<T>) -> Self {
        Self {
            rows: Vec::new(),
            filtered: Vec::new(),
            criteria: FilterCriteria::default(),
            pipeline,
            paginator: Paginator::default(),
        }
    }

    pub fn with_paginator(mut self, paginator: Paginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// Initial criteria, e.g. from a deep link.
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self.refilter();
        self
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replaces the rows (after a load or a committed mutation).
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.refilter();
        self.paginator.clamp(self.filtered.len());
    }

    /// Stores `criteria` as typed; cursors reset only when the selected
    /// rows can change.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        let changed = !self.criteria.selects_same(&criteria);
        self.criteria = criteria;
        if changed {
            self.refilter();
            self.paginator.reset();
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let mut criteria = self.criteria.clone();
        criteria.search = search.into();
        self.set_criteria(criteria);
    }

    pub fn set_status(&mut self, status: &str) {
        let mut criteria = self.criteria.clone();
        criteria.status = StatusFilter::parse(status);
        self.set_criteria(criteria);
    }

    pub fn set_selector(&mut self, name: &str, value: &str) {
        let mut criteria = self.criteria.clone();
        criteria.set_selector(name, value);
        self.set_criteria(criteria);
    }

    pub fn filtered(&self) -> Vec<&T> {
        self.filtered.iter().map(|&idx| &self.rows[idx]).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn bounds(&self, viewport: Viewport) -> PageBounds {
        self.paginator
            .cursor(viewport)
            .bounds(self.filtered.len())
    }

    pub fn page(&self, viewport: Viewport) -> Page<&T> {
        let bounds = self.bounds(viewport);
        Page {
            items: self.filtered[bounds.start_index..bounds.end_index]
                .iter()
                .map(|&idx| &self.rows[idx])
                .collect(),
            bounds,
        }
    }

    pub fn next_page(&mut self, viewport: Viewport) -> bool {
        let len = self.filtered.len();
        self.paginator.cursor_mut(viewport).next(len)
    }

    pub fn previous_page(&mut self, viewport: Viewport) -> bool {
        self.paginator.cursor_mut(viewport).previous()
    }

    pub fn go_to_page(&mut self, viewport: Viewport, page: usize) -> usize {
        let len = self.filtered.len();
        self.paginator.cursor_mut(viewport).go_to(page, len)
    }

    fn refilter(&mut self) {
        self.filtered = self.pipeline.apply_indices(&self.rows, &self.criteria);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: u32) -> TableView<u32> {
        let mut view = TableView::new(
            FilterPipeline::new().search("value", |v: &u32| v.to_string()),
        );
        view.set_rows((1..=n).collect());
        view
    }

    #[test]
    fn search_change_resets_both_cursors() {
        let mut view = numbers(40);
        view.go_to_page(Viewport::Full, 3);
        view.go_to_page(Viewport::Compact, 6);
        view.set_search("1");
        assert_eq!(view.bounds(Viewport::Full).current_page, 1);
        assert_eq!(view.bounds(Viewport::Compact).current_page, 1);
    }

    #[test]
    fn unchanged_criteria_keep_the_cursor() {
        let mut view = numbers(40);
        view.go_to_page(Viewport::Full, 3);
        view.set_search("");
        assert_eq!(view.bounds(Viewport::Full).current_page, 3);
    }

    #[test]
    fn trailing_whitespace_keeps_the_cursor() {
        let mut view = numbers(40);
        view.set_search("1");
        view.go_to_page(Viewport::Compact, 2);
        view.set_search("1 ");
        assert_eq!(view.bounds(Viewport::Compact).current_page, 2);
        assert_eq!(view.criteria().search, "1 ");
    }

    #[test]
    fn shrinking_rows_clamp_synchronously() {
        let mut view = numbers(40);
        view.go_to_page(Viewport::Full, 4);
        view.set_rows((1..=12).collect());
        let page = view.page(Viewport::Full);
        assert_eq!(page.current_page(), 2);
        assert_eq!(page.items, vec![&11, &12]);
    }
}
