//! Property-based tests for the integer tower.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::modular::{extended_gcd, mod_inverse, mod_pow};
    use crate::{Integer, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        small_int().prop_filter("nonzero", |&n| n != 0)
    }

    fn wide_int() -> impl Strategy<Value = i64> {
        -(1i64 << 40)..(1i64 << 40)
    }

    proptest! {
        #[test]
        fn gcd_lcm_product(a in small_int(), b in small_int()) {
            let (a, b) = (Integer::new(a), Integer::new(b));
            prop_assert_eq!(a.gcd(&b) * a.lcm(&b), (&a * &b).abs());
        }

        #[test]
        fn euclidean_division_identity(a in wide_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let (q, r) = a.divide_and_remainder(&b).unwrap();
            prop_assert_eq!(&q * &b + r.clone(), a.clone());
            prop_assert!(r.abs() < b.abs());
            let m = a.modulo(&b).unwrap();
            prop_assert!(!m.is_negative() && m < b.abs());
        }

        // Factorization

        #[test]
        fn factor_integer_reconstructs(n in 2i64..5_000_000i64) {
            let n = Integer::new(n);
            let pairs = n.factor_integer();
            let mut product = Integer::one();
            for (prime, count) in &pairs {
                prop_assert!(prime.is_probable_prime_with(64));
                product = product * prime.pow(*count);
            }
            prop_assert_eq!(product, n);
            prop_assert!(pairs.windows(2).all(|w| w[0].0 < w[1].0));
        }

        #[test]
        fn divisors_divide_and_are_sorted(n in 1i64..20_000i64) {
            let n = Integer::new(n);
            let divisors = n.divisors();
            prop_assert_eq!(divisors.first(), Some(&Integer::one()));
            prop_assert_eq!(divisors.last(), Some(&n));
            prop_assert!(divisors.iter().all(|d| n.is_divisible_by(d)));
            prop_assert!(divisors.windows(2).all(|w| w[0] < w[1]));
        }

        // Extended gcd and modular arithmetic

        #[test]
        fn extended_gcd_bezout(a in wide_int(), b in wide_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let r = extended_gcd(&a, &b);
            prop_assert_eq!(&a * &r.x + &b * &r.y, r.gcd.clone());
            prop_assert_eq!(r.gcd, a.gcd(&b));
        }

        #[test]
        fn mod_inverse_is_inverse(a in small_int(), m in 2i64..10_000i64) {
            let a = Integer::new(a);
            let m = Integer::new(m);
            match mod_inverse(&a, &m) {
                Ok(inv) => prop_assert!((&a * &inv).modulo(&m).unwrap().is_one()),
                Err(_) => prop_assert!(!a.gcd(&m).is_one()),
            }
        }

        #[test]
        fn fermat_little_theorem(a in 1i64..1000i64) {
            let p = Integer::new(998_244_353);
            let a = Integer::new(a);
            let exp = &p - &Integer::one();
            prop_assert!(mod_pow(&a, &exp, &p).unwrap().is_one());
        }

        // Roots

        #[test]
        fn nth_root_brackets(k in 0i64..(1i64 << 50), n in 1u32..8u32) {
            let k = Integer::new(k);
            let r = k.nth_root(n).unwrap();
            prop_assert!(r.pow(n) <= k);
            prop_assert!((r + Integer::one()).pow(n) > k);
        }

        #[test]
        fn nth_root_split_reconstructs(k in -100_000i64..100_000i64, n in prop_oneof![Just(3u32), Just(5u32)]) {
            let value = Integer::new(k);
            let (root, rest) = value.nth_root_split(n).unwrap();
            if value.is_zero() {
                prop_assert!(root.is_zero() && rest.is_one());
            } else {
                prop_assert_eq!(root.pow(n) * rest, value);
            }
        }

        #[test]
        fn rational_powers_invert(num in non_zero_int(), den in non_zero_int(), k in 0i64..6) {
            let r = Rational::from_i64(num, den);
            let up = r.powi(k).unwrap();
            let down = r.powi(-k).unwrap();
            prop_assert!((up * down).is_one());
        }

        #[test]
        fn rational_floor_brackets(num in small_int(), den in non_zero_int()) {
            let r = Rational::from_i64(num, den);
            let f = Rational::from_integer(r.floor());
            prop_assert!(f <= r);
            prop_assert!(r < f + Rational::one());
        }
    }
}
