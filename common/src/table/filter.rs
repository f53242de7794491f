//! Derives the searched/filtered view of a collection.
//!
//! The pipeline is a pure function of `(rows, criteria)`: stable, order
//! preserving and cheap enough to run on every keystroke.

use std::collections::BTreeMap;
use std::fmt;

/// Sentinel used by every status and selector dropdown for "no filter".
pub const ALL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    /// Reads a dropdown value; blank or any casing of `all` disables the filter.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            StatusFilter::All
        } else {
            StatusFilter::Only(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatusFilter::All => ALL,
            StatusFilter::Only(value) => value,
        }
    }
}

/// Current search/status/selector state of one table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub search: String,
    pub status: StatusFilter,
    /// Named exact-match selectors such as `classroom` or `form`.
    pub selectors: BTreeMap<String, String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = StatusFilter::parse(status);
        self
    }

    pub fn with_selector(mut self, name: &str, value: &str) -> Self {
        self.set_selector(name, value);
        self
    }

    /// Sets or clears (`All` / blank) a named selector.
    pub fn set_selector(&mut self, name: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            self.selectors.remove(name);
        } else {
            self.selectors.insert(name.to_string(), value.to_string());
        }
    }

    pub fn selector(&self, name: &str) -> Option<&str> {
        self.selectors.get(name).map(String::as_str)
    }

    /// The lower-cased, trimmed search term; empty matches everything.
    pub fn search_term(&self) -> String {
        self.search.trim().to_lowercase()
    }

    /// Whether both criteria select the same rows. Raw search text may
    /// differ in case and surrounding whitespace.
    pub fn selects_same(&self, other: &FilterCriteria) -> bool {
        self.search_term() == other.search_term()
            && self.status == other.status
            && self.selectors == other.selectors
    }

    pub fn is_empty(&self) -> bool {
        self.search_term().is_empty()
            && self.status == StatusFilter::All
            && self.selectors.is_empty()
    }
}

type TextField<T> = fn(&T) -> String;
type ListField<T> = fn(&T) -> Vec<String>;

/// Filter configuration for one row type.
pub struct FilterPipeline<T> {
    search_fields: Vec<(&'static str, TextField<T>)>,
    status_field: Option<TextField<T>>,
    selector_fields: Vec<(&'static str, ListField<T>)>,
}

impl<T> Clone for FilterPipeline<T> {
    fn clone(&self) -> Self {
        Self {
            search_fields: self.search_fields.clone(),
            status_field: self.status_field,
            selector_fields: self.selector_fields.clone(),
        }
    }
}

impl<T> fmt::Debug for FilterPipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterPipeline")
            .field(
                "search_fields",
                &self.search_fields.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            )
            .field("status_field", &self.status_field.is_some())
            .field(
                "selector_fields",
                &self.selector_fields.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<T> Default for FilterPipeline<T> {
    fn default() -> Self {
        Self {
            search_fields: Vec::new(),
            status_field: None,
            selector_fields: Vec::new(),
        }
    }
}

impl<T> FilterPipeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field the free-text search looks into.
    pub fn search(mut self, name: &'static str, field: TextField<T>) -> Self {
        self.search_fields.push((name, field));
        self
    }

    /// Sets the field compared against [`FilterCriteria::status`].
    pub fn status(mut self, field: TextField<T>) -> Self {
        self.status_field = Some(field);
        self
    }

    /// Adds a named selector; a row matches when any of its values equals
    /// the selected one.
    pub fn selector(mut self, name: &'static str, field: ListField<T>) -> Self {
        self.selector_fields.push((name, field));
        self
    }

    pub fn search_field_names(&self) -> Vec<&'static str> {
        self.search_fields.iter().map(|(name, _)| *name).collect()
    }

    pub fn matches(&self, row: &T, criteria: &FilterCriteria) -> bool {
        self.matches_term(row, &criteria.search_term(), criteria)
    }

    fn matches_term(&self, row: &T, term: &str, criteria: &FilterCriteria) -> bool {
        let searched = term.is_empty()
            || self
                .search_fields
                .iter()
                .any(|(_, field)| field(row).to_lowercase().contains(term));
        if !searched {
            return false;
        }

        if let (StatusFilter::Only(wanted), Some(field)) = (&criteria.status, self.status_field) {
            if field(row) != *wanted {
                return false;
            }
        }

        criteria.selectors.iter().all(|(name, wanted)| {
            match self.selector_fields.iter().find(|(n, _)| *n == name.as_str()) {
                Some((_, field)) => field(row).iter().any(|value| value == wanted),
                None => {
                    log::debug!("ignoring unknown selector `{}`", name);
                    true
                }
            }
        })
    }

    /// Indices of matching rows, in input order.
    pub fn apply_indices(&self, rows: &[T], criteria: &FilterCriteria) -> Vec<usize> {
        let term = criteria.search_term();
        rows.iter()
            .enumerate()
            .filter(|(_, row)| self.matches_term(row, &term, criteria))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn apply<'a>(&self, rows: &'a [T], criteria: &FilterCriteria) -> Vec<&'a T> {
        self.apply_indices(rows, criteria)
            .into_iter()
            .map(|idx| &rows[idx])
            .collect()
    }
}
