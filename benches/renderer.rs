use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use regex_railroad::layout::{LayoutContext, layout_regexp};
use regex_railroad::{Config, Content, Match, MatchFragment, Regexp, Repeat, render};
use std::hint::black_box;

fn wide_alternation(branches: usize) -> Regexp {
    let matches = (0..branches)
        .map(|i| {
            Match::new(vec![
                MatchFragment::new(Content::literal(format!("word{i}"))),
                MatchFragment::new(Content::AnyCharacter).with_repeat(Repeat::optional()),
            ])
        })
        .collect();
    Regexp::new(matches)
}

fn deep_nesting(depth: u32) -> Regexp {
    let mut regexp = Regexp::single(vec![
        MatchFragment::new(Content::literal("core")).with_repeat(Repeat::plus()),
    ]);
    for number in (1..=depth).rev() {
        regexp = Regexp::new(vec![
            Match::new(vec![
                MatchFragment::new(Content::group(number, regexp))
                    .with_repeat(Repeat::between(1, 3)),
            ]),
            Match::new(vec![MatchFragment::new(Content::literal("x"))]),
        ]);
    }
    regexp
}

fn kitchen_sink() -> Regexp {
    let input = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/kitchen_sink.json"
    ));
    serde_json::from_str(input).expect("fixture parse failed")
}

fn cases() -> Vec<(String, Regexp)> {
    vec![
        ("alternation_8".to_string(), wide_alternation(8)),
        ("alternation_64".to_string(), wide_alternation(64)),
        ("nesting_4".to_string(), deep_nesting(4)),
        ("nesting_16".to_string(), deep_nesting(16)),
        ("kitchen_sink".to_string(), kitchen_sink()),
    ]
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = Config::default();
    for (name, ast) in cases() {
        group.bench_with_input(BenchmarkId::from_parameter(&name), &ast, |b, data| {
            b.iter(|| {
                let node = layout_regexp(LayoutContext::new(&config), black_box(data));
                black_box(node.bbox.width);
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for (theme, config) in [("default", Config::default()), ("modern", Config::modern())] {
        for (name, ast) in cases() {
            group.bench_with_input(BenchmarkId::new(theme, &name), &ast, |b, data| {
                b.iter(|| {
                    let svg = render(black_box(data), &config);
                    black_box(svg.len());
                });
            });
        }
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_layout, bench_render
);
criterion_main!(benches);
