//! Search and pagination behind the generic data table.
//!
//! Filtering runs on every render against the full record list; the state
//! only remembers the search term, the page size and the current page.

pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 20];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A row the table can render, search and act on.
pub trait TableRecord {
    /// Identifier sent to the delete endpoint.
    fn record_id(&self) -> i32;

    /// String form of a named field, `None` when the record has no such field
    /// or the value is absent.
    fn field(&self, key: &str) -> Option<String>;
}

/// Returns the records where any of `keys` contains `term`, ignoring case and
/// surrounding whitespace. An empty term keeps every record.
pub fn filter<'a, T: TableRecord>(records: &'a [T], keys: &[&str], term: &str) -> Vec<&'a T> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| {
            keys.iter().any(|key| {
                record
                    .field(key)
                    .map(|value| value.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .collect()
}

/// Number of pages for `len` rows, never less than one.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub search: String,
    pub page_size: usize,
    pub page: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            page_size: page_size.max(1),
            page: 1,
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Page actually shown for `len` filtered rows. The stored page can run
    /// past the end when the data shrinks between renders.
    pub fn current_page(&self, len: usize) -> usize {
        self.page.clamp(1, page_count(len, self.page_size))
    }

    pub fn go_to(&mut self, page: usize, len: usize) {
        self.page = page.clamp(1, page_count(len, self.page_size));
    }

    pub fn next(&mut self, len: usize) {
        let page = self.current_page(len);
        self.go_to(page + 1, len);
    }

    pub fn prev(&mut self, len: usize) {
        let page = self.current_page(len);
        self.go_to(page.saturating_sub(1), len);
    }

    pub fn can_prev(&self, len: usize) -> bool {
        self.current_page(len) > 1
    }

    pub fn can_next(&self, len: usize) -> bool {
        self.current_page(len) < page_count(len, self.page_size)
    }

    /// Rows of the current page.
    pub fn page_slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = (self.current_page(rows.len()) - 1) * self.page_size;
        let end = (start + self.page_size).min(rows.len());
        rows.get(start..end).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(i32, &'static str);

    impl TableRecord for Row {
        fn record_id(&self) -> i32 {
            self.0
        }

        fn field(&self, key: &str) -> Option<String> {
            match key {
                "nombre" => Some(self.1.to_string()),
                _ => None,
            }
        }
    }

    #[test]
    fn page_count_is_at_least_one() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(12, 5), 3);
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive() {
        let rows = [Row(1, "Transportes ACME"), Row(2, "Fletes del Norte")];
        let hits = filter(&rows, &["nombre"], "  acme ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record_id(), 1);
    }

    #[test]
    fn unknown_keys_never_match() {
        let rows = [Row(1, "ACME")];
        assert!(filter(&rows, &["placa"], "acme").is_empty());
    }

    #[test]
    fn prev_on_first_page_is_a_no_op() {
        let mut state = TableState::new(5);
        state.prev(12);
        assert_eq!(state.page, 1);
        assert!(!state.can_prev(12));
    }

    #[test]
    fn page_slice_of_last_page_is_partial() {
        let rows: Vec<i32> = (1..=12).collect();
        let mut state = TableState::new(5);
        state.go_to(3, rows.len());
        assert_eq!(state.page_slice(&rows), &[11, 12]);
    }

    #[test]
    fn shrinking_data_clamps_the_visible_page() {
        let mut state = TableState::new(5);
        state.go_to(3, 12);
        assert_eq!(state.current_page(4), 1);
        let rows = [1, 2, 3, 4];
        assert_eq!(state.page_slice(&rows), &[1, 2, 3, 4]);
    }
}
