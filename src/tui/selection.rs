//! Target list filtering, paging and multi-select.
//!
//! Selection is keyed by master index so it survives filter and page
//! changes. Master index 0 is the synthetic "All Databases" entry, which is
//! selected exactly when every real target is selected.

use std::collections::BTreeMap;

pub(crate) const AGGREGATE_INDEX: usize = 0;
pub(crate) const AGGREGATE_LABEL: &str = "All Databases";
pub const DEFAULT_PER_PAGE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    pub(crate) master_index: usize,
    pub(crate) name: String,
}

impl Target {
    pub(crate) fn is_aggregate(&self) -> bool {
        self.master_index == AGGREGATE_INDEX
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SelectionEngine {
    master: Vec<Target>,
    name_lower: Vec<String>,
    filtered: Vec<usize>,
    filter: String,
    per_page: usize,
    page: usize,
    cursor: usize,
    selected: BTreeMap<usize, String>,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl SelectionEngine {
    pub(crate) fn new(per_page: usize) -> Self {
        Self {
            master: Vec::new(),
            name_lower: Vec::new(),
            filtered: Vec::new(),
            filter: String::new(),
            per_page: per_page.max(1),
            page: 0,
            cursor: 0,
            selected: BTreeMap::new(),
        }
    }

    /// Replace the master list, prepending the aggregate entry, and reset
    /// filter, paging, cursor and selection.
    pub(crate) fn set_targets<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.master = std::iter::once(AGGREGATE_LABEL.to_string())
            .chain(names.into_iter().map(Into::into))
            .enumerate()
            .map(|(master_index, name)| Target { master_index, name })
            .collect();
        self.name_lower = self.master.iter().map(|target| target.name.to_lowercase()).collect();
        self.filter.clear();
        self.filtered = (0..self.master.len()).collect();
        self.page = 0;
        self.cursor = 0;
        self.selected.clear();
    }

    /// Case-insensitive substring filter. The aggregate entry is filtered by
    /// its label like any other row.
    pub(crate) fn set_filter(&mut self, query: &str) {
        self.filter = query.to_string();
        let needle = query.to_lowercase();
        self.filtered = self
            .name_lower
            .iter()
            .enumerate()
            .filter(|(_, name)| needle.is_empty() || name.contains(&needle))
            .map(|(idx, _)| idx)
            .collect();
        self.page = self.page.min(self.total_pages() - 1);
        self.clamp_cursor();
    }

    pub(crate) fn filter(&self) -> &str {
        &self.filter
    }

    pub(crate) fn per_page(&self) -> usize {
        self.per_page
    }

    pub(crate) fn page_index(&self) -> usize {
        self.page
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn master_len(&self) -> usize {
        self.master.len()
    }

    pub(crate) fn real_target_count(&self) -> usize {
        self.master_len().saturating_sub(1)
    }

    pub(crate) fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Always at least 1 so an empty view still has page 0.
    pub(crate) fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.per_page).max(1)
    }

    fn page_bounds(&self) -> (usize, usize) {
        let start = (self.page * self.per_page).min(self.filtered.len());
        let end = (start + self.per_page).min(self.filtered.len());
        (start, end)
    }

    pub(crate) fn current_page_items(&self) -> Vec<&Target> {
        let (start, end) = self.page_bounds();
        self.filtered[start..end].iter().map(|&idx| &self.master[idx]).collect()
    }

    fn current_page_len(&self) -> usize {
        let (start, end) = self.page_bounds();
        end - start
    }

    /// 1-based `(first, last, total)` item numbers of the current page.
    pub(crate) fn page_window(&self) -> (usize, usize, usize) {
        let (start, end) = self.page_bounds();
        if start == end {
            return (0, 0, self.filtered.len());
        }
        (start + 1, end, self.filtered.len())
    }

    pub(crate) fn next_page(&mut self) {
        self.page = (self.page + 1).min(self.total_pages() - 1);
        self.cursor = 0;
    }

    pub(crate) fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
        self.cursor = 0;
    }

    pub(crate) fn move_cursor(&mut self, delta: isize) {
        let last = self.current_page_len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    fn clamp_cursor(&mut self) {
        let len = self.current_page_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Master index of the row under the cursor, if the page has rows.
    pub(crate) fn index_at_cursor(&self) -> Option<usize> {
        let (start, end) = self.page_bounds();
        let pos = start + self.cursor;
        if pos < end { Some(self.filtered[pos]) } else { None }
    }

    fn every_real_selected(&self) -> bool {
        (1..self.master.len()).all(|idx| self.selected.contains_key(&idx))
    }

    pub(crate) fn toggle_at_cursor(&mut self) {
        let Some(index) = self.index_at_cursor() else {
            return;
        };

        if index == AGGREGATE_INDEX {
            if self.real_target_count() == 0 {
                return;
            }
            if self.every_real_selected() {
                self.selected.clear();
            } else {
                self.selected = self.master.iter().map(|target| (target.master_index, target.name.clone())).collect();
            }
            return;
        }

        if self.selected.remove(&index).is_some() {
            self.selected.remove(&AGGREGATE_INDEX);
        } else {
            self.selected.insert(index, self.master[index].name.clone());
            if self.every_real_selected() {
                self.selected.insert(AGGREGATE_INDEX, AGGREGATE_LABEL.to_string());
            }
        }
    }

    pub(crate) fn is_selected(&self, master_index: usize) -> bool {
        self.selected.contains_key(&master_index)
    }

    pub(crate) fn all_selected(&self) -> bool {
        self.is_selected(AGGREGATE_INDEX)
    }

    pub(crate) fn selection_snapshot(&self) -> BTreeMap<usize, String> {
        self.selected.clone()
    }

    /// Selected real targets ordered by master index.
    pub(crate) fn selected_real_targets(&self) -> Vec<String> {
        self.selection_snapshot()
            .into_iter()
            .filter(|(idx, _)| *idx != AGGREGATE_INDEX)
            .map(|(_, name)| name)
            .collect()
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
#[path = "../test/tui/selection.rs"]
mod tests;
