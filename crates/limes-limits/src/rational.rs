//! Limits of rational functions at infinity.

use std::cmp::Ordering;

use limes_core::{ExprArena, ExprHandle};
use limes_poly::ExprPolynomial;

/// The limit of `numerator / denominator` as the variable tends to
/// `target`, which must be `Infinity` or `-Infinity`.
///
/// Only degrees and leading coefficients matter. When the numerator has
/// the higher degree the result is the leading-coefficient ratio times an
/// infinity: `target` itself if the degrees differ by an odd amount,
/// `Infinity` otherwise.
pub fn rational_limit_at_infinity(
    arena: &mut ExprArena,
    numerator: &ExprPolynomial,
    denominator: &ExprPolynomial,
    target: ExprHandle,
) -> ExprHandle {
    let n = numerator.degree();
    let d = denominator.degree();
    let ratio = arena.div(numerator.leading_coefficient(), denominator.leading_coefficient());
    match n.cmp(&d) {
        Ordering::Greater => {
            let infinity = if (n + d) % 2 == 1 {
                target
            } else {
                arena.infinity()
            };
            arena.mul([ratio, infinity])
        }
        Ordering::Less => arena.zero(),
        Ordering::Equal => ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polynomial(arena: &mut ExprArena, coeffs: &[i64], x: ExprHandle) -> ExprPolynomial {
        let terms: Vec<ExprHandle> = coeffs
            .iter()
            .enumerate()
            .map(|(k, &c)| {
                let c = arena.integer(c);
                let power = arena.powi(x, i64::try_from(k).unwrap());
                arena.mul([c, power])
            })
            .collect();
        let expr = arena.add(terms);
        ExprPolynomial::from_expr(arena, expr, x).unwrap()
    }

    #[test]
    fn test_equal_degrees() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let p = polynomial(&mut arena, &[1, 0, 3], x);
        let q = polynomial(&mut arena, &[0, 5, 2], x);
        let inf = arena.infinity();
        let value = rational_limit_at_infinity(&mut arena, &p, &q, inf);
        assert_eq!(value, arena.fraction(3, 2));
    }

    #[test]
    fn test_smaller_numerator_degree() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let p = polynomial(&mut arena, &[7, 1], x);
        let q = polynomial(&mut arena, &[1, 0, 1], x);
        let inf = arena.neg_infinity();
        let value = rational_limit_at_infinity(&mut arena, &p, &q, inf);
        assert!(arena.is_zero(value));
    }

    #[test]
    fn test_parity_of_degree_sum() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let neg_inf = arena.neg_infinity();

        // (x^2 + 1) / (x + 1) behaves like x
        let p = polynomial(&mut arena, &[1, 0, 1], x);
        let q = polynomial(&mut arena, &[1, 1], x);
        assert_eq!(rational_limit_at_infinity(&mut arena, &p, &q, neg_inf), neg_inf);

        // -x^3 / x behaves like -x^2
        let p = polynomial(&mut arena, &[0, 0, 0, -1], x);
        let q = polynomial(&mut arena, &[0, 1], x);
        assert_eq!(rational_limit_at_infinity(&mut arena, &p, &q, neg_inf), neg_inf);

        let inf = arena.infinity();
        let p = polynomial(&mut arena, &[0, 0, 2], x);
        let q = polynomial(&mut arena, &[3], x);
        assert_eq!(rational_limit_at_infinity(&mut arena, &p, &q, neg_inf), inf);
    }
}
