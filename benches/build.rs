//! Diagram construction benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench build
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use robdd_equiv::checker::EquivalenceChecker;
use robdd_equiv::parser::parse;
use robdd_equiv::robdd::Robdd;

/// `x1 ^ x2 ^ ... ^ xn`: linear diagram, exponential truth table.
fn parity(n: usize) -> String {
    (1..=n).map(|i| format!("x{:02}", i)).collect::<Vec<_>>().join(" ^ ")
}

/// `(a1 & b1) | (a2 & b2) | ...`: sorted order puts every `a` before every `b`, so the diagram grows exponentially.
fn pairs(n: usize) -> String {
    (1..=n)
        .map(|i| format!("(a{:02} & b{:02})", i, i))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn bench_parse(c: &mut Criterion) {
    let text = pairs(16);
    c.bench_function("parse/pairs16", |b| b.iter(|| parse(black_box(&text)).unwrap()));
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for n in [4, 8, 12, 16] {
        let text = parity(n);
        group.bench_with_input(BenchmarkId::new("parity", n), &text, |b, text| {
            b.iter(|| {
                let bdd = Robdd::default();
                bdd.build_str(black_box(text)).unwrap()
            })
        });

        let text = pairs(n / 2);
        group.bench_with_input(BenchmarkId::new("pairs", n), &text, |b, text| {
            b.iter(|| {
                let bdd = Robdd::default();
                bdd.build_str(black_box(text)).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let bdd = Robdd::default();
    let f = bdd.build_str(&parity(16)).unwrap();
    let g = bdd.build_str(&parity(16).replace('x', "y")).unwrap();
    c.bench_function("compare/parity16", |b| b.iter(|| bdd.equivalent(black_box(f), black_box(g))));
}

fn bench_check(c: &mut Criterion) {
    c.bench_function("check/parity10", |b| {
        b.iter(|| {
            let checker = EquivalenceChecker::default();
            checker.check(black_box(&parity(10)), black_box(&parity(10).replace('x', "y"))).unwrap()
        })
    });
}

criterion_group!(benches, bench_parse, bench_build, bench_compare, bench_check);
criterion_main!(benches);
