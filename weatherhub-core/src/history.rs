//! Recently looked-up city names

/// Maximum number of names kept.
pub const HISTORY_CAPACITY: usize = 5;

/// Bounded, deduplicated list of city names, most recent first.
///
/// Names are compared case-sensitively against the canonical name the provider
/// returned. Recording a name that is already present leaves the list as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryHistory {
    entries: Vec<String>,
}

impl QueryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name` at the front unless it is already listed.
    ///
    /// Returns `true` if the list changed.
    pub fn record(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.entries.insert(0, name.to_string());
        self.entries.truncate(HISTORY_CAPACITY);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry == name)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
