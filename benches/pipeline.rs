//! Performance benchmarks for graph building and hover highlighting.
//!
//! Run with: `cargo bench --bench pipeline`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

use collation_graph::{
    GraphConfig, HoverHandler, IdentityScheme, InteractionState, LinkIndex, Pipeline,
};

/// Synthetic collation: witnesses share most readings, vary every seventh
/// level, and leave every eleventh cell empty.
fn make_rows(witnesses: usize, levels: usize) -> Vec<Vec<String>> {
    (0..witnesses)
        .map(|w| {
            let mut row = vec![format!("W{w}")];
            row.extend((0..levels).map(|l| {
                if (w + l) % 11 == 0 {
                    String::new()
                } else if l % 7 == 0 {
                    format!("var{}_{}", l, w % 3)
                } else {
                    format!("word{l}")
                }
            }));
            row
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for scheme in [IdentityScheme::Xxh64, IdentityScheme::Interned] {
        let pipeline = Pipeline::new(GraphConfig::default().with_identity(scheme)).unwrap();
        for levels in [100, 1_000] {
            let rows = make_rows(9, levels);
            group.throughput(Throughput::Elements((9 * levels) as u64));
            group.bench_with_input(
                BenchmarkId::new(scheme.to_string(), levels),
                &rows,
                |b, rows| b.iter(|| pipeline.build_rows(black_box(rows.clone())).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_link_hover(c: &mut Criterion) {
    let pipeline = Pipeline::new(GraphConfig::default()).unwrap();
    let model = Arc::new(pipeline.build_rows(make_rows(9, 1_000)).unwrap());
    let mut state = InteractionState::new(Arc::clone(&model));

    c.bench_function("link_hover_1000_levels", |b| {
        b.iter(|| {
            state.on_link_hover(Some(black_box(LinkIndex::new(0)))).unwrap();
            black_box(state.highlight().nodes.len())
        })
    });
}

criterion_group!(benches, bench_build, bench_link_hover);
criterion_main!(benches);
