use criterion::{Criterion, criterion_group, criterion_main};
use persistent_highlights_engine::{find_boundaries, materialize, parse_markdown};
mod common;

fn bench_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    let tree = parse_markdown(&content, "c");
    let text_len = tree.text_content(tree.root()).chars().count();

    for count in [10, 100] {
        let highlights = common::generate_highlights(count, text_len);
        group.bench_function(format!("{count}_highlights"), |b| {
            let mut t = tree.clone();
            let root = t.root();
            b.iter(|| {
                std::hint::black_box(materialize(&mut t, std::hint::black_box(&highlights), root));
            });
        });
    }

    group.bench_function("find_boundaries", |b| {
        b.iter(|| {
            std::hint::black_box(find_boundaries(
                &tree,
                tree.root(),
                std::hint::black_box(text_len / 3),
                std::hint::black_box(text_len / 2),
            ));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_materialize);
criterion_main!(benches);
