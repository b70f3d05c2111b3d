use criterion::{criterion_group, criterion_main, Criterion};

/// Build a strict-JSON document both parsers accept, so the comparison is
/// apples to apples.
fn build_source(entries: usize) -> String {
    let entries = (0..entries)
        .map(|i| {
            format!(
                "  \"key_{i}\": {{\"index\": {i}, \"label\": \"entry number {i}\", \"flags\": [true, false, null], \"weight\": {i}.5}}"
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{{\n{entries}\n}}")
}

fn parse_comparison(c: &mut Criterion) {
    let source = build_source(2000);
    let mut group = c.benchmark_group("parse");
    group.bench_function("serde", |b| {
        b.iter(|| {
            let _ = serde_json::from_str::<serde_json::Value>(&source).unwrap();
        })
    });
    group.bench_function("treedoc-json", |b| {
        b.iter(|| {
            let _ = treedoc_json::parse(&source).unwrap();
        })
    });
}

criterion_group!(benches, parse_comparison);
criterion_main!(benches);
