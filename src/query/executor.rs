use crate::index::{FileEntry, NameIndex};
use crate::query::matcher::QueryMatcher;
use crate::utils::fold_ascii;
use std::time::{Duration, Instant};

/// Result of one bounded scan
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome<'a> {
    /// Matching entries in enumeration order
    pub matches: Vec<&'a FileEntry>,
    /// Time spent scanning (zero when no scan ran)
    pub elapsed: Duration,
    /// The scan stopped early because `max_results` was reached
    pub capped: bool,
}

impl SearchOutcome<'_> {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Linear substring scan over a [`NameIndex`]
pub struct SearchEngine<'a> {
    index: &'a NameIndex,
}

impl<'a> SearchEngine<'a> {
    pub fn new(index: &'a NameIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &'a NameIndex {
        self.index
    }

    /// Find up to `max_results` entries whose name contains `query`.
    ///
    /// An empty query returns nothing without touching the index. The scan
    /// stops at the first `max_results` matches in enumeration order, so
    /// later buckets are never visited once the cap is hit.
    pub fn search(&self, query: &str, max_results: usize) -> SearchOutcome<'a> {
        if query.is_empty() || max_results == 0 {
            return SearchOutcome::default();
        }

        let start = Instant::now();
        let folded = fold_ascii(query);
        let matcher = QueryMatcher::new(&folded);

        let mut matches = Vec::with_capacity(max_results.min(64));
        let mut capped = false;

        for entry in self.index.entries() {
            if matcher.is_match(entry.folded_name()) {
                matches.push(entry);
                if matches.len() >= max_results {
                    capped = true;
                    break;
                }
            }
        }

        let elapsed = start.elapsed();
        tracing::trace!(
            query,
            found = matches.len(),
            capped,
            elapsed_us = elapsed.as_micros() as u64,
            "search"
        );

        SearchOutcome {
            matches,
            elapsed,
            capped,
        }
    }
}

/// Convenience wrapper around [`SearchEngine::search`]
pub fn search<'a>(index: &'a NameIndex, query: &str, max_results: usize) -> SearchOutcome<'a> {
    SearchEngine::new(index).search(query, max_results)
}
