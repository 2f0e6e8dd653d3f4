//! This bench test walks a generated directory tree with a saved pattern.

#![allow(missing_docs)]

use std::{fs, path::Path};

use criterion::{Criterion, criterion_group, criterion_main};
use findme::{Pattern, search::find_pattern};
use tempfile::TempDir;

/// Generates a tree of nested directories with a mix of file types
fn preseed_tree(root: &Path) {
    for i in 0..20 {
        let dir = root.join(format!("pkg_{i}")).join("src").join("module");
        fs::create_dir_all(&dir).unwrap();
        for j in 0..25 {
            fs::write(dir.join(format!("file_{j}.py")), "").unwrap();
            fs::write(dir.join(format!("file_{j}.txt")), "").unwrap();
        }
        fs::create_dir_all(root.join(format!("pkg_{i}")).join(".cache")).unwrap();
    }
}

fn search_tree(c: &mut Criterion) {
    let tmp = TempDir::new().unwrap();
    preseed_tree(tmp.path());

    let files = Pattern::new("py", r"\.py$").unwrap().only_files();
    let directories = Pattern::new("cache", r"^\.cache$").unwrap().only_directories();

    c.bench_function("search files", |b| {
        b.iter(|| find_pattern(tmp.path(), &files).unwrap().count());
    });

    c.bench_function("search directories", |b| {
        b.iter(|| find_pattern(tmp.path(), &directories).unwrap().count());
    });
}

criterion_group!(benches, search_tree);
criterion_main!(benches);
