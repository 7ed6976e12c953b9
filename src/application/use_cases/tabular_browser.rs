//! Search, pagination, and column visibility over a fetched record set.
//!
//! The building blocks are pure functions over `(records, view state)`;
//! `TabularBrowser` owns the state transitions and keeps the page-clamp
//! and reset invariants.

use crate::domain::record::{value_text, Record, RecordSet};
use serde_json::Value;
use std::collections::HashSet;

/// Keep a record iff the string form of at least one field value contains
/// the term, case-insensitively. An empty term is the identity transform.
/// Null values have no string form and never match.
pub fn filter_records<'a>(records: &'a [Record], term: &str) -> Vec<&'a Record> {
    if term.is_empty() {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record.values().any(|value| {
                value_text(value)
                    .map(|text| text.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .collect()
}

/// The contiguous slice for a 1-based page, clamped to what is available.
/// Concatenating pages `1..=total_pages` reconstructs the input exactly.
pub fn paginate<T>(items: &[T], page: usize, items_per_page: usize) -> &[T] {
    let start = (page.max(1) - 1).saturating_mul(items_per_page);
    let end = start.saturating_add(items_per_page);
    &items[start.min(items.len())..end.min(items.len())]
}

/// `ceil(filtered / items_per_page)`, and 1 for an empty set so there is
/// always a valid current page.
pub fn total_pages(filtered_count: usize, items_per_page: usize) -> usize {
    if filtered_count == 0 {
        1
    } else {
        filtered_count.div_ceil(items_per_page)
    }
}

/// All columns minus the hidden ones, in discovery order.
pub fn visible_columns(all: &[String], hidden: &HashSet<String>) -> Vec<String> {
    all.iter()
        .filter(|column| !hidden.contains(*column))
        .cloned()
        .collect()
}

/// Symmetric difference with `{key}`: toggling twice is the identity.
pub fn toggle_column(hidden: &mut HashSet<String>, key: &str) {
    if !hidden.remove(key) {
        hidden.insert(key.to_string());
    }
}

/// Mutable browsing state for one session. Never persisted.
#[derive(Debug, Clone)]
pub struct BrowserViewState {
    pub search_term: String,
    pub current_page: usize,
    pub items_per_page: usize,
    pub hidden_columns: HashSet<String>,
}

impl BrowserViewState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            search_term: String::new(),
            current_page: 1,
            items_per_page: items_per_page.max(1),
            hidden_columns: HashSet::new(),
        }
    }
}

impl Default for BrowserViewState {
    fn default() -> Self {
        Self::new(10)
    }
}

/// One rendered page: filtered, paginated, and column-projected.
#[derive(Debug, Clone)]
pub struct PageView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    /// 1-based display offsets of the page within the filtered set;
    /// both zero when nothing matched.
    pub start_index: usize,
    pub end_index: usize,
}

/// A record set under browsing. Owns the view state and its transitions.
pub struct TabularBrowser {
    data: RecordSet,
    view: BrowserViewState,
}

impl TabularBrowser {
    pub fn new(data: RecordSet) -> Self {
        Self {
            data,
            view: BrowserViewState::default(),
        }
    }

    pub fn with_view(data: RecordSet, view: BrowserViewState) -> Self {
        Self { data, view }
    }

    pub fn view(&self) -> &BrowserViewState {
        &self.view
    }

    pub fn data(&self) -> &RecordSet {
        &self.data
    }

    /// Changing the term always lands back on page 1.
    pub fn search(&mut self, term: impl Into<String>) {
        self.view.search_term = term.into();
        self.view.current_page = 1;
    }

    /// Page size stays positive; changing it lands back on page 1.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.view.items_per_page = items_per_page.max(1);
        self.view.current_page = 1;
    }

    /// Clamped to `[1, total_pages]` for the current filter.
    pub fn go_to_page(&mut self, page: usize) {
        let filtered = filter_records(&self.data.records, &self.view.search_term);
        let last = total_pages(filtered.len(), self.view.items_per_page);
        self.view.current_page = page.clamp(1, last);
    }

    /// Only dataset columns can be hidden, keeping the hidden set a subset
    /// of the schema.
    pub fn toggle_column(&mut self, key: &str) {
        if self.data.columns.iter().any(|column| column == key) {
            toggle_column(&mut self.view.hidden_columns, key);
        }
    }

    pub fn current_view(&self) -> PageView {
        let filtered = filter_records(&self.data.records, &self.view.search_term);
        let pages = total_pages(filtered.len(), self.view.items_per_page);
        let page_records = paginate(&filtered, self.view.current_page, self.view.items_per_page);
        let columns = visible_columns(&self.data.columns, &self.view.hidden_columns);

        let rows = page_records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        let start = (self.view.current_page - 1) * self.view.items_per_page;
        let (start_index, end_index) = if filtered.is_empty() {
            (0, 0)
        } else {
            (start + 1, (start + page_records.len()).min(filtered.len()))
        };

        PageView {
            columns,
            rows,
            page: self.view.current_page,
            total_pages: pages,
            filtered_count: filtered.len(),
            start_index,
            end_index,
        }
    }
}
