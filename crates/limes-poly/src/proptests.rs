//! Property-based tests for polynomial division and partial fractions.

#[cfg(test)]
mod tests {
    use limes_integers::Rational;
    use proptest::prelude::*;

    use crate::dense::DensePoly;
    use crate::gcd::{poly_div_rem, poly_extended_gcd};
    use crate::partial_fractions::partial_fraction_decomposition;
    use crate::roots::rational_roots;

    // Strategy for generating small rational coefficients
    fn small_coeff() -> impl Strategy<Value = Rational> {
        (-20i64..20i64, 1i64..4i64).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    // Strategy for generating small polynomials (degree 0-4)
    fn small_poly() -> impl Strategy<Value = DensePoly<Rational>> {
        proptest::collection::vec(small_coeff(), 1..=5).prop_map(DensePoly::new)
    }

    fn nonzero_poly() -> impl Strategy<Value = DensePoly<Rational>> {
        small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    // Products of (x - r) for small integer roots, times an optional x^2 + 1.
    fn split_denominator() -> impl Strategy<Value = DensePoly<Rational>> {
        (proptest::collection::vec(-3i64..=3i64, 1..=3), any::<bool>()).prop_map(|(roots, irreducible)| {
            let mut p = roots
                .into_iter()
                .fold(DensePoly::one(), |acc, r| acc.mul(&DensePoly::linear(Rational::from(r))));
            if irreducible {
                p = p.mul(&DensePoly::new(vec![Rational::from(1), Rational::from(0), Rational::from(1)]));
            }
            p
        })
    }

    proptest! {
        #[test]
        fn div_rem_reconstructs(a in small_poly(), b in nonzero_poly()) {
            let (q, r) = poly_div_rem(&a, &b).unwrap();
            prop_assert_eq!(q.mul(&b).add(&r), a);
            prop_assert!(r.is_zero() || r.degree() < b.degree());
        }

        #[test]
        fn extended_gcd_is_bezout(a in nonzero_poly(), b in nonzero_poly()) {
            let (g, s, t) = poly_extended_gcd(&a, &b);
            prop_assert_eq!(s.mul(&a).add(&t.mul(&b)), g.clone());
            let (_, ra) = poly_div_rem(&a, &g).unwrap();
            prop_assert!(ra.is_zero());
        }

        #[test]
        fn rational_roots_factor_completely(den in split_denominator()) {
            let (roots, rest) = rational_roots(&den);
            let rebuilt = roots.iter().fold(rest, |acc, (r, m)| acc.mul(&DensePoly::linear(r.clone()).pow(*m)));
            prop_assert_eq!(rebuilt.scale(den.leading_coeff()), den);
        }

        #[test]
        fn partial_fractions_recombine(num in small_poly(), den in split_denominator()) {
            let d = partial_fraction_decomposition(&num, &den).unwrap();
            let mut total = d.polynomial_part.mul(&den);
            for term in &d.terms {
                prop_assert!(term.numerator.degree() < term.denominator_base.degree());
                let (cofactor, r) = poly_div_rem(&den, &term.denominator_base.pow(term.power)).unwrap();
                prop_assert!(r.is_zero());
                total = total.add(&term.numerator.mul(&cofactor));
            }
            prop_assert_eq!(total, num);
        }
    }
}
