//! Property-based tests for series expansion and reversion.

#[cfg(test)]
mod tests {
    use limes_core::{ExprArena, ExprHandle};
    use proptest::prelude::*;

    use crate::data::TruncatedSeries;
    use crate::expansion::{series, Expansion};
    use crate::inverse::inverse_series;

    fn small_coeffs() -> impl Strategy<Value = Vec<(i64, i64)>> {
        proptest::collection::vec((-9i64..=9i64, 1i64..=5i64), 1..=5)
    }

    fn build_polynomial(arena: &mut ExprArena, x: ExprHandle, coeffs: &[(i64, i64)]) -> ExprHandle {
        let mut terms = Vec::new();
        for (k, &(n, d)) in (0i64..).zip(coeffs) {
            let c = arena.fraction(n, d);
            let p = arena.powi(x, k);
            terms.push(arena.mul([c, p]));
        }
        arena.add(terms)
    }

    proptest! {
        #[test]
        fn polynomial_series_recovers_coefficients(coeffs in small_coeffs()) {
            let mut arena = ExprArena::new();
            let x = arena.symbol("x");
            let zero = arena.zero();
            let p = build_polynomial(&mut arena, x, &coeffs);
            let order = i64::try_from(coeffs.len()).unwrap();
            match series(&mut arena, p, x, zero, order) {
                Some(Expansion::Series(s)) => {
                    for (k, &(n, d)) in (0i64..).zip(&coeffs) {
                        let expected = arena.fraction(n, d);
                        let actual = s.coefficient(k).unwrap_or(zero);
                        prop_assert_eq!(actual, expected);
                    }
                    let normal = s.normal(&mut arena);
                    prop_assert_eq!(normal, p);
                }
                Some(Expansion::Constant(c)) => prop_assert_eq!(c, p),
                None => prop_assert!(false, "polynomial expansion failed"),
            }
        }

        #[test]
        fn reversion_is_involutive(lead in prop_oneof![-5i64..=-1i64, 1i64..=5i64], rest in small_coeffs()) {
            let mut arena = ExprArena::new();
            let x = arena.symbol("x");
            let zero = arena.zero();
            let mut coefficients = vec![arena.integer(lead)];
            for &(n, d) in &rest {
                coefficients.push(arena.fraction(n, d));
            }
            let n_max = i64::try_from(coefficients.len()).unwrap() + 1;
            let s = TruncatedSeries::new(&mut arena, x, zero, coefficients, 1, n_max, 1).unwrap();
            let inverse = inverse_series(&mut arena, &s).unwrap();
            let back = inverse_series(&mut arena, &inverse).unwrap();
            prop_assert_eq!(back, s);
        }
    }
}
