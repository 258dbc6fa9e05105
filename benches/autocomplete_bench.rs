use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use onoma::autocomplete::AutocompleteIndex;
use onoma::institution::{Category, InstitutionRecord};
use onoma::spelling::Verbosity;

const STEMS: [&str; 12] = [
    "Harvard", "Stanford", "Boston", "Columbia", "Carleton", "Princeton", "Chicago", "Michigan",
    "Georgetown", "Vanderbilt", "Dartmouth", "Cornell",
];
const KINDS: [(&str, Category); 6] = [
    ("University", Category::Education),
    ("College", Category::Education),
    ("Medical Center", Category::Medical),
    ("Community Bank", Category::Financial),
    ("Savings Bank", Category::Financial),
    ("Institute", Category::Education),
];

fn generate_records(count: usize) -> Vec<InstitutionRecord> {
    (0..count)
        .map(|i| {
            let stem = STEMS[i % STEMS.len()];
            let (kind, category) = KINDS[(i / STEMS.len()) % KINDS.len()];
            let name = format!("{stem} {kind} {}", i / (STEMS.len() * KINDS.len()));
            InstitutionRecord::new(name, category)
        })
        .collect()
}

fn bench_autocomplete(c: &mut Criterion) {
    let records = generate_records(5_000);
    let index = AutocompleteIndex::new();
    index.initialize(records.clone()).unwrap();

    let mut group = c.benchmark_group("autocomplete");

    group.bench_function("initialize_5000", |b| {
        b.iter(|| {
            let index = AutocompleteIndex::new();
            black_box(index.initialize(black_box(records.clone())).unwrap());
        })
    });

    group.bench_function("suggest_prefix", |b| {
        b.iter(|| black_box(index.suggest(black_box("harv"), 10)))
    });

    group.bench_function("suggest_fuzzy_fallback", |b| {
        b.iter(|| black_box(index.suggest(black_box("stanfrd universty"), 10)))
    });

    group.bench_function("correct_no_match", |b| {
        b.iter(|| black_box(index.correct(black_box("zzzz qqqq xxxx"), 10)))
    });

    group.finish();
}

fn bench_dictionary_lookup(c: &mut Criterion) {
    let index = AutocompleteIndex::new();
    index.initialize(generate_records(5_000)).unwrap();
    let snapshot = index.snapshot();
    let dictionary = snapshot.corrector().dictionary();

    let mut group = c.benchmark_group("dictionary_lookup");

    for (label, word) in [("exact", "stanford"), ("one_edit", "stanfrd"), ("miss", "qqqqqq")] {
        group.bench_function(label, |b| {
            b.iter(|| black_box(dictionary.lookup(black_box(word), 2, Verbosity::Closest)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_autocomplete, bench_dictionary_lookup);
criterion_main!(benches);
