//! In-memory name table.
//!
//! Files are bucketed by a DJB2 hash of their ASCII-lowercased name. Each
//! bucket keeps its entries newest first, so enumeration order is bucket
//! order, then most-recent insert first within a bucket.

use crate::index::types::{FileEntry, TABLE_SIZE};
use std::path::PathBuf;

/// Hash a file name to its bucket.
///
/// DJB2 (`h = h * 33 + c`) over the lowercased bytes, reduced modulo
/// [`TABLE_SIZE`]. Stable for a given name across runs and platforms.
#[inline]
pub fn hash_name(name: &str) -> usize {
    let mut hash: u64 = 5381;
    for byte in name.bytes() {
        hash = (hash << 5)
            .wrapping_add(hash)
            .wrapping_add(byte.to_ascii_lowercase() as u64);
    }
    (hash % TABLE_SIZE as u64) as usize
}

/// Mapping from bucket to the entries whose names hash there
pub struct NameIndex {
    buckets: Vec<Vec<FileEntry>>,
    total_files: usize,
}

impl NameIndex {
    pub fn new() -> Self {
        let mut buckets = Vec::with_capacity(TABLE_SIZE);
        buckets.resize_with(TABLE_SIZE, Vec::new);
        Self {
            buckets,
            total_files: 0,
        }
    }

    /// Add a file. Duplicate names are kept as distinct entries.
    pub fn insert(&mut self, name: impl Into<String>, full_path: impl Into<PathBuf>) {
        let entry = FileEntry::new(name, full_path);
        let bucket = hash_name(entry.name());
        // Buckets are stored oldest first; iteration walks them in reverse
        self.buckets[bucket].push(entry);
        self.total_files += 1;
    }

    /// Drop every entry. Bucket allocations are kept for a rebuild.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.total_files = 0;
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }

    /// Bucket a name would land in
    pub fn bucket_of(&self, name: &str) -> usize {
        hash_name(name)
    }

    /// Number of entries currently stored in `bucket`
    pub fn bucket_len(&self, bucket: usize) -> usize {
        self.buckets.get(bucket).map_or(0, Vec::len)
    }

    /// Iterate every entry in enumeration order
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> + '_ {
        self.buckets.iter().flat_map(|bucket| bucket.iter().rev())
    }

    /// Visit every entry in enumeration order
    pub fn for_each_entry<F>(&self, mut visit: F)
    where
        F: FnMut(&FileEntry),
    {
        for entry in self.entries() {
            visit(entry);
        }
    }

    /// Entries whose name equals `name` case-insensitively (ASCII)
    pub fn lookup<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FileEntry> + 'a {
        self.buckets[hash_name(name)]
            .iter()
            .rev()
            .filter(move |entry| entry.name().eq_ignore_ascii_case(name))
    }
}

impl Default for NameIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameIndex")
            .field("total_files", &self.total_files)
            .field("table_size", &self.buckets.len())
            .finish()
    }
}
