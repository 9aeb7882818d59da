//! Property-based tests for the limit engine.

#[cfg(test)]
mod tests {
    use limes_core::{EvalContext, ExprArena, ExprHandle, NoAssumptions};
    use proptest::prelude::*;

    use crate::direction::Direction;
    use crate::engine::limit;
    use crate::request::LimitRequest;

    fn nonzero() -> impl Strategy<Value = i64> {
        prop_oneof![-9i64..=-1i64, 1i64..=9i64]
    }

    fn limit_value(
        arena: &mut ExprArena,
        expr: ExprHandle,
        x: ExprHandle,
        value: ExprHandle,
    ) -> Option<ExprHandle> {
        let mut ctx = EvalContext::default();
        let request = LimitRequest::new(arena, expr, x, value, Direction::TwoSided).ok()?;
        limit(arena, &mut ctx, &NoAssumptions, &request)
            .ok()
            .flatten()
            .map(|outcome| outcome.value)
    }

    proptest! {
        #[test]
        fn limit_of_constant_is_constant(n in -20i64..=20, d in 1i64..=6, k in -3i64..=3, target in -5i64..=5) {
            let mut arena = ExprArena::new();
            let x = arena.symbol("x");
            let c = arena.symbol("c");
            let q = arena.fraction(n, d);
            let k = arena.integer(k);
            let kc = arena.mul([k, c]);
            let expr = arena.add([q, kc]);
            let a = arena.integer(target);
            prop_assert_eq!(limit_value(&mut arena, expr, x, a), Some(expr));
            let inf = arena.infinity();
            prop_assert_eq!(limit_value(&mut arena, expr, x, inf), Some(expr));
        }

        #[test]
        fn limit_of_variable_is_target(n in -20i64..=20, d in 1i64..=6) {
            let mut arena = ExprArena::new();
            let x = arena.symbol("x");
            let a = arena.fraction(n, d);
            prop_assert_eq!(limit_value(&mut arena, x, x, a), Some(a));
        }

        #[test]
        fn polynomial_limit_is_value(coeffs in proptest::collection::vec(-9i64..=9, 1..=5), point in -4i64..=4) {
            let mut arena = ExprArena::new();
            let x = arena.symbol("x");
            let mut terms = Vec::new();
            for (k, &c) in (0i64..).zip(&coeffs) {
                let c = arena.integer(c);
                let power = arena.powi(x, k);
                terms.push(arena.mul([c, power]));
            }
            let p = arena.add(terms);
            let a = arena.integer(point);
            let expected = arena.replace_all(p, x, a);
            prop_assert_eq!(limit_value(&mut arena, p, x, a), Some(expected));
        }

        #[test]
        fn equal_degree_ratio_at_infinity(a in nonzero(), b in -9i64..=9, c in nonzero(), d in -9i64..=9) {
            let mut arena = ExprArena::new();
            let x = arena.symbol("x");
            let x2 = arena.powi(x, 2);
            let (a_h, b_h, c_h, d_h) = (arena.integer(a), arena.integer(b), arena.integer(c), arena.integer(d));
            let ax2 = arena.mul([a_h, x2]);
            let cx2 = arena.mul([c_h, x2]);
            let num = arena.add([ax2, b_h]);
            let den = arena.add([cx2, d_h]);
            let ratio = arena.div(num, den);
            let inf = arena.infinity();
            let expected = arena.fraction(a, c);
            prop_assert_eq!(limit_value(&mut arena, ratio, x, inf), Some(expected));
        }
    }
}
