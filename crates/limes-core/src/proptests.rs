//! Property-based tests for the canonical constructors.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::expr::Func;
    use crate::{ExprArena, ExprHandle};

    /// A small expression language over `x` and `y`, built through the
    /// canonical constructors.
    #[derive(Debug, Clone)]
    enum Shape {
        Int(i64),
        Frac(i64, i64),
        X,
        Y,
        Sum(Vec<Shape>),
        Product(Vec<Shape>),
        Power(Box<Shape>, i64),
        Sin(Box<Shape>),
    }

    fn shape() -> impl Strategy<Value = Shape> {
        let leaf = prop_oneof![
            (-5i64..6).prop_map(Shape::Int),
            ((-5i64..6), (1i64..5)).prop_map(|(n, d)| Shape::Frac(n, d)),
            Just(Shape::X),
            Just(Shape::Y),
        ];
        leaf.prop_recursive(3, 16, 3, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 2..4).prop_map(Shape::Sum),
                prop::collection::vec(inner.clone(), 2..4).prop_map(Shape::Product),
                (inner.clone(), 1i64..4).prop_map(|(b, e)| Shape::Power(Box::new(b), e)),
                inner.prop_map(|a| Shape::Sin(Box::new(a))),
            ]
        })
    }

    fn build(arena: &mut ExprArena, s: &Shape) -> ExprHandle {
        match s {
            Shape::Int(n) => arena.integer(*n),
            Shape::Frac(n, d) => arena.fraction(*n, *d),
            Shape::X => arena.symbol("x"),
            Shape::Y => arena.symbol("y"),
            Shape::Sum(parts) => {
                let hs: Vec<ExprHandle> = parts.iter().map(|p| build(arena, p)).collect();
                arena.add(hs)
            }
            Shape::Product(parts) => {
                let hs: Vec<ExprHandle> = parts.iter().map(|p| build(arena, p)).collect();
                arena.mul(hs)
            }
            Shape::Power(b, e) => {
                let b = build(arena, b);
                arena.powi(b, *e)
            }
            Shape::Sin(a) => {
                let a = build(arena, a);
                arena.apply(Func::Sin, [a])
            }
        }
    }

    proptest! {
        #[test]
        fn evaluate_is_idempotent(s in shape()) {
            let mut arena = ExprArena::new();
            let h = build(&mut arena, &s);
            prop_assert_eq!(arena.evaluate(h), h);
        }

        #[test]
        fn sums_ignore_argument_order(a in shape(), b in shape(), c in shape()) {
            let mut arena = ExprArena::new();
            let ha = build(&mut arena, &a);
            let hb = build(&mut arena, &b);
            let hc = build(&mut arena, &c);
            let left = arena.add([ha, hb, hc]);
            let right = arena.add([hc, ha, hb]);
            prop_assert_eq!(left, right);
        }

        #[test]
        fn products_ignore_argument_order(a in shape(), b in shape()) {
            let mut arena = ExprArena::new();
            let ha = build(&mut arena, &a);
            let hb = build(&mut arena, &b);
            let left = arena.mul([ha, hb]);
            let right = arena.mul([hb, ha]);
            prop_assert_eq!(left, right);
        }

        #[test]
        fn subtraction_cancels(a in shape()) {
            let mut arena = ExprArena::new();
            let h = build(&mut arena, &a);
            let zero = arena.sub(h, h);
            prop_assert!(arena.is_zero(zero));
        }
    }
}
