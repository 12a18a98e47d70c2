use crate::utils::fold_ascii;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Number of hash buckets in the name table
pub const TABLE_SIZE: usize = 16384;

/// A single indexed file. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    name: String,
    full_path: PathBuf,
    /// ASCII-folded name bytes, computed once at insert time
    folded: Box<[u8]>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, full_path: impl Into<PathBuf>) -> Self {
        let name = name.into();
        let folded = fold_ascii(&name).into_boxed_slice();
        Self {
            name,
            full_path: full_path.into(),
            folded,
        }
    }

    /// File name (last path component) as it appeared on disk
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    #[inline]
    pub(crate) fn folded_name(&self) -> &[u8] {
        &self.folded
    }
}

/// Options for the traversal that populates the index
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Follow symbolic links while walking (loops are detected and skipped)
    pub follow_links: bool,
    /// Honour .gitignore / .ignore files and skip hidden entries
    pub respect_ignore_files: bool,
    /// Suppress the discovery spinner
    pub silent: bool,
}

/// Summary of a completed index build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    /// Files inserted into the index
    pub indexed: usize,
    /// Walk entries that could not be read and were skipped
    pub skipped: usize,
    pub elapsed: Duration,
}
