//! Criterion benchmarks for Rephrase.
//!
//! Covers the stages every call goes through:
//! - Tokenization and tagging
//! - Each transformation policy over a paragraph
//! - Synonym ranking

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rephrase::analysis::oracle::{LexiconOracle, NlpOracle};
use rephrase::lexicon::selection::ResourceSelection;
use rephrase::session::Session;
use rephrase::transform::config::TransformationConfig;
use rephrase::transform::pipeline::Policy;
use rephrase::transform::selector::rank;
use std::hint::black_box;

/// Generate a paragraph of simple English sentences.
fn generate_paragraph(sentences: usize) -> String {
    let templates = [
        "The quick brown fox jumps over the lazy dog.",
        "The ball was thrown by John.",
        "She quickly wrote a long letter to her friend.",
        "The sun set, but the air stayed warm.",
        "They kick the ball across the big field.",
        "A happy child played in the small garden.",
    ];

    (0..sentences)
        .map(|i| templates[(i * 7) % templates.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Benchmark tokenization and tagging.
fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    let oracle = LexiconOracle::bundled().unwrap();
    let paragraph = generate_paragraph(20);

    group.throughput(Throughput::Bytes(paragraph.len() as u64));
    group.bench_function("analyze_paragraph", |b| {
        b.iter(|| black_box(oracle.analyze(black_box(&paragraph))))
    });
    group.bench_function("split_sentences", |b| {
        b.iter(|| black_box(oracle.split_sentences(black_box(&paragraph))))
    });

    group.finish();
}

/// Benchmark each policy over the same paragraph.
fn bench_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("policies");

    let session = Session::bundled().unwrap();
    let paragraph = generate_paragraph(20);
    let config = TransformationConfig::default();
    let selection = ResourceSelection::default();

    group.throughput(Throughput::Elements(20));
    for policy in Policy::ALL {
        group.bench_function(policy.as_str(), |b| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| {
                let result =
                    session.transform_with_rng(policy, black_box(&paragraph), &config, &selection, &mut rng);
                black_box(result)
            })
        });
    }

    group.finish();
}

/// Benchmark candidate ranking.
fn bench_ranking(c: &mut Criterion) {
    let candidates: Vec<String> = [
        "enormous", "large", "huge", "vast", "immense", "great", "giant", "massive",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    c.bench_function("rank_candidates", |b| {
        b.iter(|| black_box(rank(black_box("big"), &candidates)))
    });
}

criterion_group!(benches, bench_analysis, bench_policies, bench_ranking);
criterion_main!(benches);
