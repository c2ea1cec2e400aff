//! Navigation history: ids of objects opened during this session

use std::collections::VecDeque;

use plm_model::ObjectId;

/// Bounded, ordered history of opened object ids. Oldest entries are evicted.
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: VecDeque<ObjectId>,
    capacity: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(64)
    }
}

impl NavigationHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an opened id. Opening the same object twice in a row is recorded once.
    pub fn push(&mut self, id: &str) {
        if self.entries.back().map(String::as_str) == Some(id) {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(id.to_string());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e == id)
    }

    /// First candidate (in candidate order) that was opened before.
    pub fn first_visited<'a>(&self, candidates: &'a [ObjectId]) -> Option<&'a ObjectId> {
        candidates.iter().find(|c| self.contains(c))
    }

    pub fn last(&self) -> Option<&ObjectId> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visited_follows_candidate_order() {
        let mut h = NavigationHistory::new(8);
        h.push("B");
        h.push("A");
        let parents = vec!["A".to_string(), "B".to_string()];
        assert_eq!(h.first_visited(&parents).map(String::as_str), Some("A"));

        let mut h = NavigationHistory::new(8);
        h.push("B");
        assert_eq!(h.first_visited(&parents).map(String::as_str), Some("B"));
    }

    #[test]
    fn test_eviction_keeps_capacity() {
        let mut h = NavigationHistory::new(3);
        for id in ["1", "2", "3", "4"] {
            h.push(id);
        }
        assert_eq!(h.len(), 3);
        assert!(!h.contains("1"));
        assert_eq!(h.iter().cloned().collect::<Vec<_>>(), vec!["2", "3", "4"]);
    }

    #[test]
    fn test_consecutive_duplicates_collapse() {
        let mut h = NavigationHistory::new(3);
        h.push("1");
        h.push("1");
        h.push("2");
        h.push("1");
        assert_eq!(h.len(), 3);
        assert_eq!(h.last().map(String::as_str), Some("1"));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut h = NavigationHistory::new(0);
        h.push("x");
        assert_eq!(h.capacity(), 1);
        assert!(h.contains("x"));
    }
}
