//! Series reversion and composition.

use num_traits::Zero;
use tracing::{debug, instrument};

use limes_core::{ExprArena, ExprHandle};

use crate::data::TruncatedSeries;

/// The composition inverse of `series`.
///
/// For `f = a₁ t + a₂ t² + ... + O(t^N)` with `t = x - x0` this returns
/// `g = x0 + b₁ x + b₂ x² + ... + O(x^N)` with `f(g(x)) = x` to that
/// order. The coefficients follow the reversion recurrence
///
/// ```text
/// b₁ = 1/a₁,   b_k = -(Σ_{j=2}^{k} a_j [g^j]_k) / a₁
/// ```
///
/// where `[g^j]_k` only involves `b₁ ... b_{k-1}`. Returns `None` unless
/// the series starts at the first power with integral exponents and a
/// nonzero rational leading coefficient.
#[instrument(level = "debug", skip_all)]
pub fn inverse_series(arena: &mut ExprArena, series: &TruncatedSeries) -> Option<TruncatedSeries> {
    if series.n_min() != 1 || series.denominator() != 1 {
        return None;
    }
    let a = series.coefficients();
    let leading = *a.first()?;
    match arena.as_rational(leading) {
        Some(r) if !r.is_zero() => {}
        _ => return None,
    }
    let n_max = series.n_max();
    let top = usize::try_from(n_max).ok()?;
    let zero = arena.zero();

    // b[i] is the coefficient of x^i; b[0] stays zero.
    let mut b = vec![zero; top];
    if top > 1 {
        b[1] = arena.recip(leading);
    }
    for k in 2..top {
        let mut sum = Vec::with_capacity(k);
        let mut power = b[..=k].to_vec();
        for j in 2..=k {
            power = truncated_product(arena, &power, &b[..=k]);
            let a_j = a[j - 1];
            if arena.is_zero(a_j) || arena.is_zero(power[k]) {
                continue;
            }
            sum.push(arena.mul([a_j, power[k]]));
        }
        let sum = arena.add(sum);
        let minus_one = arena.minus_one();
        let numerator = arena.mul([minus_one, sum]);
        b[k] = arena.div(numerator, leading);
    }
    debug!(orders = top, "reverted series");

    let x = series.variable();
    let point = series.point();
    if arena.is_zero(point) {
        b.remove(0);
        TruncatedSeries::new(arena, x, zero, b, 1, n_max, 1)
    } else {
        b[0] = point;
        TruncatedSeries::new(arena, x, zero, b, 0, n_max, 1)
    }
}

/// The product of two coefficient vectors, keeping the length of `p`.
fn truncated_product(arena: &mut ExprArena, p: &[ExprHandle], q: &[ExprHandle]) -> Vec<ExprHandle> {
    let len = p.len();
    let mut result = Vec::with_capacity(len);
    for k in 0..len {
        let mut terms = Vec::new();
        for i in 0..=k {
            let (Some(&pi), Some(&qj)) = (p.get(i), q.get(k - i)) else {
                continue;
            };
            if arena.is_zero(pi) || arena.is_zero(qj) {
                continue;
            }
            terms.push(arena.mul([pi, qj]));
        }
        result.push(arena.add(terms));
    }
    result
}

/// Composition of series. No composition algorithm is available, so this
/// always returns `None`.
#[must_use]
pub fn compose_series(series: &[TruncatedSeries]) -> Option<TruncatedSeries> {
    debug!(count = series.len(), "series composition is not supported");
    None
}
