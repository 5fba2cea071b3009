//! Criterion benchmarks for gf2-math
//!
//! These benchmarks can be run with:
//! ```bash
//! cargo bench -p gf2-math
//! ```

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gf2_math::{Buchberger, Ideal, MonomialOrder, Polynomial};
use rand::SeedableRng;
use rand::rngs::StdRng;

const COMMUTE: &str = "{ x0 x3 + x1 x2 + 1, x1 x6 + x2 x5, \
    x1 x7 + x3 x5 + x0 x5 + x1 x4, x2 x7 + x3 x6 + x0 x6 + x2 x4, \
    x4 x7 + x5 x6 + 1 }";

fn random_pair(nvars: usize, seed: u64) -> (Polynomial, Polynomial) {
    let mut rng = StdRng::seed_from_u64(seed);
    let order = MonomialOrder::GRevLex;
    (
        Polynomial::random(nvars, order.clone(), &mut rng),
        Polynomial::random(nvars, order, &mut rng),
    )
}

/// Multiplication with and without geobuckets
fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");

    for nvars in [6usize, 8, 10].iter() {
        let (p, q) = random_pair(*nvars, 0x6f2);
        group.bench_with_input(BenchmarkId::new("geobucket", nvars), &(&p, &q), |b, (p, q)| {
            b.iter(|| {
                let mut r = (*p).clone();
                r.multiply(q);
                black_box(r)
            });
        });
        group.bench_with_input(BenchmarkId::new("classic", nvars), &(&p, &q), |b, (p, q)| {
            b.iter(|| {
                let mut r = (*p).clone();
                r.mul_classic(q);
                black_box(r)
            });
        });
    }

    group.finish();
}

/// Normal forms modulo a Gröbner basis
fn bench_reduce(c: &mut Criterion) {
    let order = MonomialOrder::GRevLex;
    let system = Ideal::parse(COMMUTE, 8, order.clone()).unwrap();
    let mut bb = Buchberger::new(8, order.clone());
    bb.update_ideal(&system);
    bb.process();
    let gb = bb.done();
    let mut rng = StdRng::seed_from_u64(23);
    let p = Polynomial::random(8, order, &mut rng);

    let mut group = c.benchmark_group("reduce");
    group.bench_function("geobucket", |b| {
        b.iter(|| {
            let mut r = p.clone();
            gb.reduce(&mut r);
            black_box(r)
        });
    });
    group.bench_function("classic", |b| {
        b.iter(|| {
            let mut r = p.clone();
            gb.reduce_classic(&mut r);
            black_box(r)
        });
    });
    group.finish();
}

/// Buchberger's algorithm on the commuting matrices system
fn bench_buchberger(c: &mut Criterion) {
    let mut group = c.benchmark_group("buchberger");

    for order in [MonomialOrder::GRevLex, MonomialOrder::GrLex, MonomialOrder::Lex] {
        let system = Ideal::parse(COMMUTE, 8, order.clone()).unwrap();
        group.bench_with_input(
            BenchmarkId::new("commute", order.to_string()),
            &system,
            |b, system| {
                b.iter(|| {
                    let mut bb = Buchberger::new(8, system.order().clone());
                    bb.update_ideal(system);
                    bb.process();
                    black_box(bb.done())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_multiply, bench_reduce, bench_buchberger);
criterion_main!(benches);
