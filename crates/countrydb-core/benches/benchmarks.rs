// crates/countrydb-core/benches/benchmarks.rs
use countrydb_core::prelude::*;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_apply(c: &mut Criterion) {
    let db = load_all(&FileFeed::sample()).expect("sample feed loads");

    let filtered = QuerySelection {
        search_text: "a".into(),
        region: Some("Europe".into()),
        language: Some("French".into()),
        sort_key: SortKey::PopulationDesc,
        ..Default::default()
    };

    c.bench_function("apply_default", |b| {
        b.iter(|| apply(black_box(db.countries()), black_box(&QuerySelection::default())))
    });
    c.bench_function("apply_filtered_sorted", |b| {
        b.iter(|| apply(black_box(db.countries()), black_box(&filtered)))
    });
    c.bench_function("options", |b| {
        b.iter(|| {
            (
                regions_of(black_box(db.countries())),
                subregions_of(db.countries(), Some("Europe")),
                languages_of(db.countries()),
            )
        })
    });
}

criterion_group!(benches, bench_apply);
criterion_main!(benches);
