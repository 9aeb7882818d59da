//! Benchmarks for series expansion, reversion and limits.
//!
//! Includes:
//! - Taylor expansion by closed form and by differentiation
//! - Series reversion
//! - Limit computation through L'Hopital's rule

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use limes_core::{Constant, EvalContext, ExprArena, Func, NoAssumptions};
use limes_limits::{limit, Direction, LimitRequest};
use limes_series::{inverse_series, series, Expansion};

/// Benchmark expansion of E^x, which has a closed-form coefficient.
fn bench_series_closed_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_closed_form");

    for order in [5i64, 10, 20] {
        group.bench_with_input(BenchmarkId::new("exp", order), &order, |b, &order| {
            b.iter(|| {
                let mut arena = ExprArena::new();
                let x = arena.symbol("x");
                let zero = arena.zero();
                let e = arena.constant(Constant::E);
                let ex = arena.pow(e, x);
                black_box(series(&mut arena, ex, x, zero, order))
            });
        });
    }

    group.finish();
}

/// Benchmark expansion of Tan(x), which falls back to differentiation.
fn bench_series_derivatives(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_derivatives");

    for order in [3i64, 5, 7] {
        group.bench_with_input(BenchmarkId::new("tan", order), &order, |b, &order| {
            b.iter(|| {
                let mut arena = ExprArena::new();
                let x = arena.symbol("x");
                let zero = arena.zero();
                let tan = arena.apply(Func::Tan, [x]);
                black_box(series(&mut arena, tan, x, zero, order))
            });
        });
    }

    group.finish();
}

/// Benchmark reversion of the sine series.
fn bench_inverse_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse_series");

    for order in [7i64, 15, 25] {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let zero = arena.zero();
        let sin = arena.apply(Func::Sin, [x]);
        let Some(Expansion::Series(s)) = series(&mut arena, sin, x, zero, order) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("sin", order), &order, |b, _| {
            b.iter(|| black_box(inverse_series(&mut arena, &s)));
        });
    }

    group.finish();
}

/// Benchmark limits that need L'Hopital's rule.
fn bench_limit(c: &mut Criterion) {
    let mut group = c.benchmark_group("limit");

    group.bench_function("sin_x_over_x", |b| {
        b.iter(|| {
            let mut arena = ExprArena::new();
            let mut ctx = EvalContext::default();
            let x = arena.symbol("x");
            let sin = arena.apply(Func::Sin, [x]);
            let ratio = arena.div(sin, x);
            let zero = arena.zero();
            let request = LimitRequest::new(&arena, ratio, x, zero, Direction::TwoSided);
            if let Ok(request) = request {
                black_box(limit(&mut arena, &mut ctx, &NoAssumptions, &request).ok());
            }
        });
    });

    group.bench_function("one_minus_cos_over_square", |b| {
        b.iter(|| {
            let mut arena = ExprArena::new();
            let mut ctx = EvalContext::default();
            let x = arena.symbol("x");
            let cos = arena.apply(Func::Cos, [x]);
            let one = arena.one();
            let neg_cos = arena.neg(cos);
            let num = arena.add([one, neg_cos]);
            let x2 = arena.powi(x, 2);
            let ratio = arena.div(num, x2);
            let zero = arena.zero();
            let request = LimitRequest::new(&arena, ratio, x, zero, Direction::TwoSided);
            if let Ok(request) = request {
                black_box(limit(&mut arena, &mut ctx, &NoAssumptions, &request).ok());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_series_closed_form,
    bench_series_derivatives,
    bench_inverse_series,
    bench_limit
);
criterion_main!(benches);
