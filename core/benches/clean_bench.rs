use cloudcore::clean::StopwordFilter;
use criterion::{criterion_group, criterion_main, Criterion};
use std::collections::HashSet;

fn bench_clean(c: &mut Criterion) {
    let removed: HashSet<String> = ["data", "research", "university"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let filter = StopwordFilter::new(removed);
    let page = "Professor of Statistics. Research interests include high-dimensional \
                inference, causal discovery for observational health data, and the \
                design of reproducible computational pipelines at the university. "
        .repeat(200);
    c.bench_function("clean_corpus_page", |b| b.iter(|| filter.clean(&page)));
}

criterion_group!(benches, bench_clean);
criterion_main!(benches);
