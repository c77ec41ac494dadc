//! Catalog de-duplication by canonical (title, author) key
//!
//! Single stable pass: the first occurrence of a key is kept with its data,
//! later ones are dropped and reported.

use std::collections::HashSet;
use std::fmt;

/// Lowercased, trimmed (title, author) pair
///
/// Only used to detect duplicates; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    title: String,
    author: String,
}

impl CanonicalKey {
    pub fn new(title: &str, author: &str) -> Self {
        Self {
            title: title.trim().to_lowercase(),
            author: author.trim().to_lowercase(),
        }
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.title, self.author)
    }
}

/// Anything the de-duplicator can key
pub trait CatalogEntry {
    fn canonical_key(&self) -> CanonicalKey;

    /// Identifier reported for a dropped entry (a title, or a row id)
    fn identifier(&self) -> String;
}

/// Outcome of a de-duplication pass
#[derive(Debug, Clone)]
pub struct DedupOutcome<T> {
    /// First occurrences, in original relative order
    pub kept: Vec<T>,
    /// Identifiers of the later repeats that were removed
    pub dropped: Vec<String>,
}

impl<T> DedupOutcome<T> {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Stateful first-seen-wins filter
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<CanonicalKey>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the key; `true` if this is its first occurrence
    pub fn admit(&mut self, key: CanonicalKey) -> bool {
        self.seen.insert(key)
    }

    /// Number of distinct keys seen so far
    pub fn distinct(&self) -> usize {
        self.seen.len()
    }

    /// Run one pass over `entries`
    pub fn run<T: CatalogEntry>(
        &mut self,
        entries: impl IntoIterator<Item = T>,
    ) -> DedupOutcome<T> {
        let mut kept = Vec::new();
        let mut dropped = Vec::new();

        for entry in entries {
            if self.admit(entry.canonical_key()) {
                kept.push(entry);
            } else {
                dropped.push(entry.identifier());
            }
        }

        DedupOutcome { kept, dropped }
    }
}

/// Convenience wrapper for a fresh single pass
pub fn deduplicate<T: CatalogEntry>(entries: impl IntoIterator<Item = T>) -> DedupOutcome<T> {
    Deduplicator::new().run(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: u32,
        title: &'static str,
        author: &'static str,
    }

    impl CatalogEntry for Entry {
        fn canonical_key(&self) -> CanonicalKey {
            CanonicalKey::new(self.title, self.author)
        }

        fn identifier(&self) -> String {
            self.id.to_string()
        }
    }

    fn entry(id: u32, title: &'static str, author: &'static str) -> Entry {
        Entry { id, title, author }
    }

    #[test]
    fn test_case_and_whitespace_collapse() {
        let outcome = deduplicate(vec![
            entry(1, "Deep Learning", "Ian Goodfellow"),
            entry(2, "deep learning ", "IAN GOODFELLOW"),
        ]);

        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.kept[0].id, 1);
        assert_eq!(outcome.dropped, vec!["2".to_string()]);
    }

    #[test]
    fn test_first_seen_wins_and_order_is_stable() {
        let outcome = deduplicate(vec![
            entry(1, "B", "x"),
            entry(2, "A", "y"),
            entry(3, "b", "X"),
            entry(4, "C", "z"),
            entry(5, "a", "y"),
        ]);

        let ids: Vec<u32> = outcome.kept.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(outcome.dropped_count(), 2);
    }

    #[test]
    fn test_same_title_different_author_is_distinct() {
        let outcome = deduplicate(vec![
            entry(1, "Calculus", "Spivak"),
            entry(2, "Calculus", "Stewart"),
        ]);
        assert_eq!(outcome.kept.len(), 2);
    }

    #[test]
    fn test_output_size_is_n_minus_k() {
        let entries: Vec<Entry> = (0..20)
            .map(|i| {
                if i % 4 == 0 {
                    entry(i, "dup", "same")
                } else {
                    entry(i, "unique", "other")
                }
            })
            .collect();
        // "dup|same" appears 5 times, "unique|other" 15 times
        let outcome = deduplicate(entries);
        assert_eq!(outcome.kept.len(), 2);
        assert_eq!(outcome.kept.len() + outcome.dropped_count(), 20);
    }

    #[test]
    fn test_state_carries_across_runs() {
        let mut dedup = Deduplicator::new();
        let first = dedup.run(vec![entry(1, "A", "x")]);
        let second = dedup.run(vec![entry(2, " a", "x "), entry(3, "B", "y")]);

        assert_eq!(first.kept.len(), 1);
        assert_eq!(second.kept.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3]);
        assert_eq!(dedup.distinct(), 2);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(CanonicalKey::new(" Title ", "AUTHOR").to_string(), "title|author");
    }
}
