use crate::index::table::NameIndex;
use crate::index::types::{BuildStats, IndexOptions};
use crate::utils::progress::{ProgressBar, ProgressStyle};
use ignore::{DirEntry, WalkBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How often the spinner message is refreshed, in files
const PROGRESS_EVERY: usize = 1024;

/// Walk `root` and yield `(name, full_path)` for every file found.
///
/// Unreadable directories, dangling links and detected link loops are
/// skipped. `on_skip` is called once per skipped entry.
pub fn walk_files<F>(root: &Path, options: &IndexOptions, mut on_skip: F) -> impl Iterator<Item = (String, PathBuf)>
where
    F: FnMut(),
{
    let follow_links = options.follow_links;
    WalkBuilder::new(root)
        .standard_filters(options.respect_ignore_files)
        .follow_links(follow_links)
        .build()
        .filter_map(move |result| match result {
            Ok(entry) => match classify(&entry, follow_links) {
                Some(true) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    Some((name, entry.into_path()))
                }
                Some(false) => None,
                None => {
                    on_skip();
                    None
                }
            },
            Err(err) => {
                tracing::debug!("skipping unreadable entry: {}", err);
                on_skip();
                None
            }
        })
}

/// `Some(true)` for files to index, `Some(false)` for directories and other
/// non-files, `None` for entries that cannot be resolved.
fn classify(entry: &DirEntry, follow_links: bool) -> Option<bool> {
    let file_type = entry.file_type()?;
    if file_type.is_file() {
        return Some(true);
    }
    if file_type.is_symlink() && !follow_links {
        // Resolve the target once: links to files count as files, links to
        // directories are not descended into.
        return match fs::metadata(entry.path()) {
            Ok(meta) => Some(meta.is_file()),
            Err(err) => {
                tracing::debug!("dangling link {}: {}", entry.path().display(), err);
                None
            }
        };
    }
    Some(false)
}

/// Build a fresh index of every file under `root`
pub fn build_index(root: &Path, options: &IndexOptions) -> (NameIndex, BuildStats) {
    let mut index = NameIndex::new();
    let stats = populate_index(&mut index, root, options);
    (index, stats)
}

/// Insert every file under `root` into `index`
pub fn populate_index(index: &mut NameIndex, root: &Path, options: &IndexOptions) -> BuildStats {
    let start = Instant::now();
    tracing::info!(root = %root.display(), follow_links = options.follow_links, "indexing");

    let spinner = if !options.silent {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Scanning {} ...", root.display()));
        spinner.enable_steady_tick(Duration::from_millis(80));
        Some(spinner)
    } else {
        None
    };

    let before = index.total_files();
    let mut skipped = 0usize;
    let mut indexed = 0usize;

    for (name, path) in walk_files(root, options, || skipped += 1) {
        index.insert(name, path);
        indexed += 1;

        if indexed % PROGRESS_EVERY == 0
            && let Some(ref spinner) = spinner
        {
            spinner.set_message(format!("Scanning {} ... {} files", root.display(), indexed));
        }
    }

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let stats = BuildStats {
        indexed: index.total_files() - before,
        skipped,
        elapsed: start.elapsed(),
    };
    tracing::info!(
        indexed = stats.indexed,
        skipped = stats.skipped,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "index built"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn silent() -> IndexOptions {
        IndexOptions {
            silent: true,
            ..IndexOptions::default()
        }
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().expect("create temp dir");
        let root = dir.path();
        fs::create_dir_all(root.join("docs/nested")).unwrap();
        fs::write(root.join("report.pdf"), "x").unwrap();
        fs::write(root.join("docs/Report_Final.PDF"), "x").unwrap();
        fs::write(root.join("docs/nested/image.png"), "x").unwrap();
        fs::write(root.join(".hidden"), "x").unwrap();
        dir
    }

    #[test]
    fn test_build_indexes_every_file() {
        let dir = fixture();
        let (index, stats) = build_index(dir.path(), &silent());

        // Hidden files are indexed unless ignore rules are requested
        assert_eq!(stats.indexed, 4);
        assert_eq!(index.total_files(), 4);
        assert_eq!(index.lookup("image.png").count(), 1);
    }

    #[test]
    fn test_directories_are_not_indexed() {
        let dir = fixture();
        let (index, _) = build_index(dir.path(), &silent());
        assert_eq!(index.lookup("docs").count(), 0);
        assert_eq!(index.lookup("nested").count(), 0);
    }

    #[test]
    fn test_full_path_points_into_root() {
        let dir = fixture();
        let (index, _) = build_index(dir.path(), &silent());
        let entry = index.lookup("report_final.pdf").next().expect("entry");
        assert_eq!(entry.name(), "Report_Final.PDF");
        assert_eq!(entry.full_path(), dir.path().join("docs/Report_Final.PDF"));
    }

    #[test]
    fn test_respect_ignore_files_skips_hidden() {
        let dir = fixture();
        let options = IndexOptions {
            respect_ignore_files: true,
            ..silent()
        };
        let (index, _) = build_index(dir.path(), &options);
        assert_eq!(index.lookup(".hidden").count(), 0);
        assert_eq!(index.total_files(), 3);
    }

    #[test]
    fn test_missing_root_yields_empty_index() {
        let dir = TempDir::new().unwrap();
        let (index, stats) = build_index(&dir.path().join("does-not-exist"), &silent());
        assert_eq!(index.total_files(), 0);
        assert_eq!(stats.indexed, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_link_is_skipped() {
        let dir = fixture();
        std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("link.txt")).unwrap();

        let (index, stats) = build_index(dir.path(), &silent());
        assert_eq!(index.lookup("link.txt").count(), 0);
        assert_eq!(stats.skipped, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_link_to_file_is_indexed_without_following() {
        let dir = fixture();
        std::os::unix::fs::symlink(dir.path().join("report.pdf"), dir.path().join("alias.pdf")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("docs"), dir.path().join("docs-link")).unwrap();

        let (index, _) = build_index(dir.path(), &silent());
        assert_eq!(index.lookup("alias.pdf").count(), 1);
        // Directory links are not descended into
        assert_eq!(index.lookup("image.png").count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_link_loop_terminates_when_following() {
        let dir = fixture();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("docs/nested/loop")).unwrap();

        let options = IndexOptions {
            follow_links: true,
            ..silent()
        };
        let (index, stats) = build_index(dir.path(), &options);
        assert_eq!(index.lookup("image.png").count(), 1);
        assert!(stats.skipped >= 1);
    }

    #[test]
    fn test_populate_appends_to_existing_index() {
        let dir = fixture();
        let mut index = NameIndex::new();
        index.insert("manual.txt", "/manual.txt");
        let stats = populate_index(&mut index, dir.path(), &silent());
        assert_eq!(stats.indexed, 4);
        assert_eq!(index.total_files(), 5);
    }
}
