//! History sync
//!
//! Keeps the address state in step with navigation. Two modes, fixed at
//! construction: structured mode records full member URLs, fragment mode
//! falls back to `#member` hashes. Pushing while back-navigated truncates
//! the forward tail, so the forward stack never dangles.

use tracing::debug;

/// One address-bar state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// What the address bar shows.
    pub url: String,
    /// Dotted member name carried in the state, if any. `None` is the
    /// landing page.
    pub page: Option<String>,
}

/// Session history: a cursor over recorded entries.
#[derive(Debug)]
pub struct HistorySync {
    structured: bool,
    entries: Vec<HistoryEntry>,
    /// Index of the current entry; `entries` is never empty.
    cursor: usize,
}

impl HistorySync {
    /// Start at `initial_url` with no member resolved.
    pub fn new(structured: bool, initial_url: &str) -> Self {
        Self {
            structured,
            entries: vec![HistoryEntry {
                url: initial_url.to_string(),
                page: None,
            }],
            cursor: 0,
        }
    }

    /// Whether full URLs are recorded, or only `#member` fragments.
    pub fn structured(&self) -> bool {
        self.structured
    }

    fn entry_for(&self, url: &str, page: Option<&str>) -> HistoryEntry {
        if self.structured {
            HistoryEntry {
                url: url.to_string(),
                page: page.map(str::to_string),
            }
        } else {
            HistoryEntry {
                url: format!("#{}", page.unwrap_or_default()),
                page: page.map(str::to_string),
            }
        }
    }

    /// Record a new entry, dropping any forward tail.
    pub fn push(&mut self, url: &str, page: Option<&str>) {
        let entry = self.entry_for(url, page);
        self.entries.truncate(self.cursor + 1);
        debug!(url = %entry.url, "history push");
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }

    /// Replace the current entry in place; back/forward reach is kept.
    pub fn replace(&mut self, url: &str, page: Option<&str>) {
        let entry = self.entry_for(url, page);
        debug!(url = %entry.url, "history replace");
        self.entries[self.cursor] = entry;
    }

    /// Step back, returning the entry to restore.
    pub fn back(&mut self) -> Option<HistoryEntry> {
        let next = self.cursor.checked_sub(1)?;
        self.cursor = next;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward, returning the entry to restore.
    pub fn forward(&mut self) -> Option<HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    /// Number of recorded entries, the initial one included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
