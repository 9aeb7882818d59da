//! Closed-form and derivative-based series coefficients.
//!
//! [`series_coefficient`] returns the coefficient of `(x - x0)^n`, where
//! `n` may be a symbol. Closed forms are tried in this order: expressions
//! free of `x`, `Sin(x)` and `Cos(x)`, polynomial parts (with any residual
//! terms handled recursively), powers `x^k`, exponentials `b^x`. The last
//! resort differentiates `n` times, which needs a nonnegative integer `n`
//! and the expansion point `0`.

use limes_core::{Constant, ExprArena, ExprHandle, ExprNode, Func};
use limes_poly::decompose_monomials;
use tracing::{debug, instrument};

/// The coefficient of `(x - x0)^n` in the expansion of `expr`, or `None`
/// if no rule applies.
#[instrument(level = "debug", skip(arena))]
pub fn series_coefficient(
    arena: &mut ExprArena,
    expr: ExprHandle,
    x: ExprHandle,
    x0: ExprHandle,
    n: ExprHandle,
) -> Option<ExprHandle> {
    if arena.is_free(expr, x) {
        if arena.is_zero(n) {
            return Some(expr);
        }
        let zero = arena.zero();
        let at_zero = arena.apply(Func::Equal, [n, zero]);
        return Some(arena.apply(Func::Piecewise, [expr, at_zero, zero]));
    }

    if let ExprNode::Function { func, args } = arena.get(expr) {
        if matches!(func, Func::Sin | Func::Cos) && args.len() == 1 && args[0] == x {
            let func = *func;
            return Some(trigonometric(arena, func, x0, n));
        }
    }

    if let Some(c) = polynomial_coefficient(arena, expr, x, x0, n) {
        return Some(c);
    }

    let power = match arena.get(expr) {
        ExprNode::Pow { base, exp } => Some((*base, *exp)),
        _ => None,
    };
    if let Some((base, exp)) = power {
        if base == x && arena.is_free(exp, x) {
            return monomial(arena, exp, x0, n);
        }
        if exp == x && arena.is_free(base, x) {
            return Some(exponential(arena, base, x0, n));
        }
    }

    by_differentiation(arena, expr, x, x0, n)
}

/// `Piecewise({{value, n>=0}}, 0)`.
fn for_nonnegative_order(arena: &mut ExprArena, value: ExprHandle, n: ExprHandle) -> ExprHandle {
    let zero = arena.zero();
    let condition = arena.apply(Func::GreaterEqual, [n, zero]);
    arena.apply(Func::Piecewise, [value, condition, zero])
}

fn inverse_factorial(arena: &mut ExprArena, n: ExprHandle) -> ExprHandle {
    let factorial = arena.apply(Func::Factorial, [n]);
    arena.recip(factorial)
}

/// `Sin(x0 + n*Pi/2)/n!` and the same for `Cos`.
fn trigonometric(arena: &mut ExprArena, func: Func, x0: ExprHandle, n: ExprHandle) -> ExprHandle {
    let pi = arena.constant(Constant::Pi);
    let half = arena.fraction(1, 2);
    let shift = arena.mul([half, n, pi]);
    let angle = arena.add([x0, shift]);
    let value = arena.apply(func, [angle]);
    let scale = inverse_factorial(arena, n);
    let coefficient = arena.mul([value, scale]);
    for_nonnegative_order(arena, coefficient, n)
}

/// `x^k` around `x0`: `Binomial(k, n) x0^(k-n)`.
fn monomial(arena: &mut ExprArena, k: ExprHandle, x0: ExprHandle, n: ExprHandle) -> Option<ExprHandle> {
    // Only nonnegative integer powers have a Taylor expansion at 0, and
    // those are polynomials.
    if arena.is_zero(x0) {
        return None;
    }
    let binomial = arena.apply(Func::Binomial, [k, n]);
    let shift = arena.sub(k, n);
    let power = arena.pow(x0, shift);
    let value = arena.mul([power, binomial]);
    Some(for_nonnegative_order(arena, value, n))
}

/// `b^x` around `x0`: `b^x0 Log(b)^n / n!`.
fn exponential(arena: &mut ExprArena, b: ExprHandle, x0: ExprHandle, n: ExprHandle) -> ExprHandle {
    let at_point = arena.pow(b, x0);
    let log = arena.apply(Func::Log, [b]);
    let log_power = arena.pow(log, n);
    let scale = inverse_factorial(arena, n);
    let value = arena.mul([at_point, log_power, scale]);
    for_nonnegative_order(arena, value, n)
}

/// Coefficients of the polynomial part of `expr`, plus the recursively
/// computed coefficients of the remaining terms.
fn polynomial_coefficient(
    arena: &mut ExprArena,
    expr: ExprHandle,
    x: ExprHandle,
    x0: ExprHandle,
    n: ExprHandle,
) -> Option<ExprHandle> {
    let (monomials, residual) = decompose_monomials(arena, expr, x);
    if monomials.is_empty() && (residual.len() < 2 || !matches!(arena.get(expr), ExprNode::Add(_))) {
        return None;
    }
    debug!(monomials = monomials.len(), residual = residual.len(), "polynomial coefficient");

    let mut parts = Vec::with_capacity(residual.len() + 1);
    if !monomials.is_empty() {
        let zero = arena.zero();
        let mut piecewise = Vec::new();
        if arena.is_zero(x0) {
            // Around 0 the coefficient of x^n is read off directly.
            for (&k, &c) in &monomials {
                let k = arena.integer(i64::from(k));
                let condition = arena.apply(Func::Equal, [n, k]);
                piecewise.extend([c, condition]);
            }
        } else {
            let mut higher = Vec::with_capacity(monomials.len());
            let mut constant = Vec::with_capacity(monomials.len());
            for (&k, &c) in &monomials {
                let k = arena.integer(i64::from(k));
                let at_point = arena.pow(x0, k);
                constant.push(arena.mul([c, at_point]));
                if arena.is_zero(k) {
                    continue;
                }
                let binomial = arena.apply(Func::Binomial, [k, n]);
                let shift = arena.sub(k, n);
                let power = arena.pow(x0, shift);
                higher.push(arena.mul([c, power, binomial]));
            }
            let higher = arena.add(higher);
            let positive = arena.apply(Func::Greater, [n, zero]);
            let constant = arena.add(constant);
            let at_zero = arena.apply(Func::Equal, [n, zero]);
            piecewise.extend([higher, positive, constant, at_zero]);
        }
        piecewise.push(zero);
        parts.push(arena.apply(Func::Piecewise, piecewise));
    }
    for term in residual {
        parts.push(series_coefficient(arena, term, x, x0, n)?);
    }
    Some(arena.add(parts))
}

/// `D(expr, {x, n}) / n!` at `x0 = 0` for a nonnegative integer `n`.
fn by_differentiation(
    arena: &mut ExprArena,
    expr: ExprHandle,
    x: ExprHandle,
    x0: ExprHandle,
    n: ExprHandle,
) -> Option<ExprHandle> {
    if !arena.is_zero(x0) {
        return None;
    }
    let order = u32::try_from(arena.as_integer(n)?).ok()?;
    let derivative = arena.nth_derivative(expr, x, order)?;
    let at_point = arena.replace_all(derivative, x, x0);
    let scale = inverse_factorial(arena, n);
    let value = arena.mul([at_point, scale]);
    is_defined(arena, value).then_some(value)
}

/// False if `h` mentions `Indeterminate`, `ComplexInfinity` or an infinity.
pub(crate) fn is_defined(arena: &mut ExprArena, h: ExprHandle) -> bool {
    [
        Constant::Indeterminate,
        Constant::ComplexInfinity,
        Constant::Infinity,
        Constant::NegInfinity,
    ]
    .into_iter()
    .all(|c| {
        let c = arena.constant(c);
        arena.is_free(h, c)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_at_symbolic_point() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let f = arena.symbol("f");
        let g = arena.symbol("g");
        let n = arena.symbol("n");
        let x0 = arena.add([f, g]);
        let sin = arena.apply(Func::Sin, [x]);
        let c = series_coefficient(&mut arena, sin, x, x0, n).unwrap();

        let pi = arena.constant(Constant::Pi);
        let half = arena.fraction(1, 2);
        let shift = arena.mul([half, n, pi]);
        let angle = arena.add([f, g, shift]);
        let value = arena.apply(Func::Sin, [angle]);
        let fact = arena.apply(Func::Factorial, [n]);
        let inv = arena.recip(fact);
        let quotient = arena.mul([value, inv]);
        let zero = arena.zero();
        let cond = arena.apply(Func::GreaterEqual, [n, zero]);
        let expected = arena.apply(Func::Piecewise, [quotient, cond, zero]);
        assert_eq!(c, expected);
        assert_eq!(
            arena.render(c),
            format!("Piecewise({{{{{},n>=0}}}},0)", arena.render(quotient))
        );
    }

    #[test]
    fn test_constant() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let a = arena.symbol("a");
        let zero = arena.zero();
        let two = arena.integer(2);
        assert_eq!(series_coefficient(&mut arena, a, x, zero, zero), Some(a));
        assert_eq!(series_coefficient(&mut arena, a, x, zero, two), Some(zero));
        let n = arena.symbol("n");
        let c = series_coefficient(&mut arena, a, x, zero, n).unwrap();
        assert_eq!(arena.render(c), "Piecewise({{a,n==0}},0)");
    }

    #[test]
    fn test_polynomial_around_zero() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let zero = arena.zero();
        let three = arena.integer(3);
        let x2 = arena.powi(x, 2);
        let p = arena.mul([three, x2]);
        let one = arena.one();
        let e = arena.add([p, x, one]);
        let two = arena.integer(2);
        assert_eq!(series_coefficient(&mut arena, e, x, zero, two), Some(three));
        let four = arena.integer(4);
        assert_eq!(series_coefficient(&mut arena, e, x, zero, four), Some(zero));
        assert_eq!(series_coefficient(&mut arena, e, x, zero, zero), Some(one));
    }

    #[test]
    fn test_polynomial_around_point() {
        // x^2 around 1 is 1 + 2(x-1) + (x-1)^2.
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let one = arena.one();
        let two = arena.integer(2);
        let x2 = arena.powi(x, 2);
        let coeffs: Vec<ExprHandle> = (0..4)
            .map(|k| {
                let k = arena.integer(k);
                series_coefficient(&mut arena, x2, x, one, k).unwrap()
            })
            .collect();
        assert_eq!(coeffs, vec![one, two, one, arena.zero()]);
    }

    #[test]
    fn test_polynomial_with_residual() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let zero = arena.zero();
        let sin = arena.apply(Func::Sin, [x]);
        let x3 = arena.powi(x, 3);
        let e = arena.add([sin, x3]);
        let three = arena.integer(3);
        // 1 from x^3 and -1/6 from Sin(x).
        let c = series_coefficient(&mut arena, e, x, zero, three).unwrap();
        assert_eq!(c, arena.fraction(5, 6));
    }

    #[test]
    fn test_exponential() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let zero = arena.zero();
        let e = arena.constant(Constant::E);
        let ex = arena.pow(e, x);
        let three = arena.integer(3);
        assert_eq!(series_coefficient(&mut arena, ex, x, zero, three), Some(arena.fraction(1, 6)));

        let two = arena.integer(2);
        let two_x = arena.pow(two, x);
        let one = arena.one();
        let c = series_coefficient(&mut arena, two_x, x, zero, one).unwrap();
        assert_eq!(c, arena.apply(Func::Log, [two]));
    }

    #[test]
    fn test_reciprocal_power() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let zero = arena.zero();
        let one = arena.one();
        let inv = arena.recip(x);
        // 1/x = 1 - (x-1) + (x-1)^2 - ... around 1.
        let two = arena.integer(2);
        assert_eq!(series_coefficient(&mut arena, inv, x, one, two), Some(one));
        let minus_one = arena.minus_one();
        assert_eq!(series_coefficient(&mut arena, inv, x, one, one), Some(minus_one));
        // No Taylor expansion at the pole.
        assert_eq!(series_coefficient(&mut arena, inv, x, zero, one), None);
    }

    #[test]
    fn test_differentiation_fallback() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let zero = arena.zero();
        let tan = arena.apply(Func::Tan, [x]);
        let three = arena.integer(3);
        assert_eq!(series_coefficient(&mut arena, tan, x, zero, three), Some(arena.fraction(1, 3)));
        let n = arena.symbol("n");
        assert_eq!(series_coefficient(&mut arena, tan, x, zero, n), None);
        let one = arena.one();
        assert_eq!(series_coefficient(&mut arena, tan, x, one, three), None);
    }
}
