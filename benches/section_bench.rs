//! Benchmarks for section store operations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sectionstore::{SectionContainer, SectionStore};
use tempfile::TempDir;

const SECTION_COUNT: usize = 64;

fn populated_store(temp: &TempDir) -> SectionStore {
    let mut store = SectionStore::with_path(temp.path().join("bench.dat"));
    for i in 0..SECTION_COUNT {
        store.save(&format!("section{:03}", i), &[i as u8; 128]).unwrap();
    }
    store
}

fn storage_benchmarks(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let mut store = populated_store(&temp);

    c.bench_function("load_first_section", |b| {
        b.iter(|| store.load(black_box("section000")).unwrap())
    });

    c.bench_function("load_last_section", |b| {
        b.iter(|| store.load(black_box("section063")).unwrap())
    });

    c.bench_function("load_missing_section", |b| {
        b.iter(|| store.load(black_box("absent")).unwrap())
    });

    c.bench_function("overwrite_in_place", |b| {
        let payload = [0x5Au8; 128];
        b.iter(|| store.save(black_box("section032"), &payload).unwrap())
    });

    c.bench_function("scan_all_sections", |b| {
        b.iter(|| store.sections().unwrap())
    });
}

criterion_group!(benches, storage_benchmarks);
criterion_main!(benches);
