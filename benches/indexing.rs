//! Directory walk and index build benchmarks.
//!
//! Run with: `cargo bench --bench indexing`
//! Save baseline: `cargo bench --bench indexing -- --save-baseline main`
//! Compare: `cargo bench --bench indexing -- --baseline main`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use spyglass::index::{build_index, hash_name, IndexOptions};
use std::fs;
use std::hint::black_box;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a tree of `dirs` directories holding `per_dir` empty files each
fn create_tree(dirs: usize, per_dir: usize) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().to_path_buf();

    for d in 0..dirs {
        let dir = root.join(format!("dir_{}", d)).join("nested");
        fs::create_dir_all(&dir).expect("Failed to create dir");
        for f in 0..per_dir {
            fs::write(dir.join(format!("file_{}_{}.txt", d, f)), b"").expect("Failed to write file");
        }
    }

    (temp_dir, root)
}

fn bench_hash(c: &mut Criterion) {
    c.bench_function("hash_name", |b| {
        b.iter(|| hash_name(black_box("Some_Mixed_Case_File_Name.tar.gz")))
    });
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");
    group.sample_size(20);

    let options = IndexOptions {
        silent: true,
        ..IndexOptions::default()
    };

    for (dirs, per_dir) in [(10, 50), (50, 100)] {
        let (_temp_dir, root) = create_tree(dirs, per_dir);
        group.bench_with_input(BenchmarkId::from_parameter(dirs * per_dir), &root, |b, root| {
            b.iter(|| build_index(black_box(root), &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hash, bench_build);
criterion_main!(benches);
