//! Rational roots of polynomials over the rationals.

use limes_integers::{Integer, Rational};
use num_traits::{One, Zero};
use tracing::trace;

use crate::dense::DensePoly;
use crate::gcd::{make_monic, poly_div_rem};

/// The rational roots of `p` with multiplicities, and the monic cofactor
/// that has no rational root.
///
/// Candidates are `±a/b` with `a` dividing the constant term and `b` the
/// leading coefficient of the integer-normalised polynomial.
#[must_use]
pub fn rational_roots(p: &DensePoly<Rational>) -> (Vec<(Rational, u32)>, DensePoly<Rational>) {
    let mut roots = Vec::new();
    if p.is_zero() || p.degree() == 0 {
        return (roots, make_monic(p));
    }

    let zeros = p.trailing_zeros();
    let mut rest = make_monic(&p.shift_down(zeros));
    if zeros > 0 {
        roots.push((Rational::zero(), u32::try_from(zeros).unwrap_or(u32::MAX)));
    }

    while rest.degree() > 0 {
        let integral = integer_coefficients(&rest);
        let constant = &integral[0];
        let leading = &integral[integral.len() - 1];
        let Some(root) = find_root(&rest, constant, leading) else {
            break;
        };
        let mut multiplicity = 0u32;
        let factor = DensePoly::linear(root.clone());
        while let Some((q, r)) = poly_div_rem(&rest, &factor) {
            if !r.is_zero() {
                break;
            }
            rest = q;
            multiplicity += 1;
        }
        trace!(%root, multiplicity, "rational root");
        roots.push((root, multiplicity));
    }

    (roots, rest)
}

fn find_root(p: &DensePoly<Rational>, constant: &Integer, leading: &Integer) -> Option<Rational> {
    for a in constant.divisors() {
        for b in leading.divisors() {
            let candidate = Rational::new(a.clone(), b);
            if p.eval(&candidate).is_zero() {
                return Some(candidate);
            }
            let negated = -candidate;
            if p.eval(&negated).is_zero() {
                return Some(negated);
            }
        }
    }
    None
}

/// Scales `p` by the lcm of its coefficient denominators.
fn integer_coefficients(p: &DensePoly<Rational>) -> Vec<Integer> {
    let lcm = p
        .coeffs()
        .iter()
        .fold(Integer::one(), |acc, c| acc.lcm(&c.denominator()));
    let scale = Rational::from(lcm);
    p.coeffs()
        .iter()
        .map(|c| (c * &scale).numerator())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coeffs: &[i64]) -> DensePoly<Rational> {
        DensePoly::new(coeffs.iter().map(|&c| Rational::from(c)).collect())
    }

    #[test]
    fn test_simple_roots() {
        // x^2 - 1
        let (roots, rest) = rational_roots(&poly(&[-1, 0, 1]));
        assert_eq!(rest, DensePoly::one());
        assert_eq!(roots.len(), 2);
        assert!(roots.contains(&(Rational::from(1), 1)));
        assert!(roots.contains(&(Rational::from(-1), 1)));
    }

    #[test]
    fn test_repeated_and_fractional_roots() {
        // x^2 (2x - 1)^2 (x^2 + 1)
        let base = poly(&[-1, 2]).pow(2).mul(&poly(&[0, 0, 1])).mul(&poly(&[1, 0, 1]));
        let (roots, rest) = rational_roots(&base);
        assert_eq!(roots[0], (Rational::zero(), 2));
        assert!(roots.contains(&(Rational::from_i64(1, 2), 2)));
        assert_eq!(rest, poly(&[1, 0, 1]));
    }

    #[test]
    fn test_no_rational_root() {
        let (roots, rest) = rational_roots(&poly(&[-2, 0, 3]));
        assert!(roots.is_empty());
        assert_eq!(rest, DensePoly::new(vec![Rational::from_i64(-2, 3), Rational::zero(), Rational::one()]));
    }
}
