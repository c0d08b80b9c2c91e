use criterion::{criterion_group, criterion_main, Criterion};

use inplay::domain::{Score, Teams};
use inplay::engine::{ProbabilityEngine, MARKETS};
use inplay::input::RawInput;
use inplay::stats::MatchStatistics;

const STATS: &str = "\
62% Posse de bola 38%
7 Chutes no alvo 3
55 Ataques perigosos 28
12 Faltas 9
6 Escanteios 2";

fn criterion_benchmark(c: &mut Criterion) {
    let engine = ProbabilityEngine::default();
    let input = RawInput::new(Teams::new("Arsenal", "Chelsea"), 78.0, Score::new(1, 0), STATS);

    // sanity check
    assert_eq!(MARKETS, engine.calculate(&input).len());

    c.bench_function("cri_engine_parse", |b| {
        b.iter(|| MatchStatistics::parse(STATS));
    });

    c.bench_function("cri_engine_calculate", |b| {
        b.iter(|| engine.calculate(&input));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
