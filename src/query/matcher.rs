use crate::utils::fold_ascii;
use memchr::memmem;

/// Case-insensitive (ASCII) substring test.
///
/// An empty `query` is contained in every name and matches. Non-ASCII bytes
/// are compared as-is.
pub fn matches(filename: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    if query.len() > filename.len() {
        return false;
    }
    let haystack = fold_ascii(filename);
    let needle = fold_ascii(query);
    memmem::find(&haystack, &needle).is_some()
}

/// A query folded once and reused across many candidates
pub struct QueryMatcher<'q> {
    finder: memmem::Finder<'q>,
}

impl<'q> QueryMatcher<'q> {
    /// `folded_query` must already be ASCII-lowercased
    pub fn new(folded_query: &'q [u8]) -> Self {
        Self {
            finder: memmem::Finder::new(folded_query),
        }
    }

    /// Test an already-folded candidate name
    #[inline]
    pub fn is_match(&self, folded_name: &[u8]) -> bool {
        self.finder.find(folded_name).is_some()
    }
}
