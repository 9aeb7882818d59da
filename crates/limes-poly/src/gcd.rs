//! Division with remainder and gcds of polynomials over a field.

use crate::dense::DensePoly;
use crate::traits::Field;

/// Long division: `a = quotient * b + remainder` with
/// `deg remainder < deg b`, or a zero remainder.
///
/// `None` when `b` is zero.
#[must_use]
pub fn poly_div_rem<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> Option<(DensePoly<F>, DensePoly<F>)> {
    if b.is_zero() {
        return None;
    }
    let unit = b.leading_coeff().inv()?;
    let mut quotient = DensePoly::zero();
    let mut remainder = a.clone();
    while !remainder.is_zero() && remainder.degree() >= b.degree() {
        let shift = remainder.degree() - b.degree();
        let term = DensePoly::monomial(remainder.leading_coeff().clone() * unit.clone(), shift);
        // Cancels the leading term exactly, so the degree strictly drops.
        remainder = remainder.sub(&term.mul(b));
        quotient = quotient.add(&term);
    }
    Some((quotient, remainder))
}

/// Scales `p` to leading coefficient one; zero stays zero.
#[must_use]
pub fn make_monic<F: Field>(p: &DensePoly<F>) -> DensePoly<F> {
    p.leading_coeff()
        .inv()
        .map_or_else(|| p.clone(), |unit| p.scale(&unit))
}

/// Monic gcd by Euclid's algorithm.
#[must_use]
pub fn poly_gcd<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> DensePoly<F> {
    let (g, _, _) = poly_extended_gcd(a, b);
    g
}

/// Returns `(g, s, t)` with `g = s*a + t*b` and `g` the monic gcd.
///
/// Two zero inputs give `(0, 1, 0)`.
#[must_use]
pub fn poly_extended_gcd<F: Field>(
    a: &DensePoly<F>,
    b: &DensePoly<F>,
) -> (DensePoly<F>, DensePoly<F>, DensePoly<F>) {
    // Each row [r, s, t] satisfies r = s*a + t*b.
    let mut prev = [a.clone(), DensePoly::one(), DensePoly::zero()];
    let mut curr = [b.clone(), DensePoly::zero(), DensePoly::one()];
    while let Some((q, r)) = poly_div_rem(&prev[0], &curr[0]) {
        let next = [
            r,
            prev[1].sub(&q.mul(&curr[1])),
            prev[2].sub(&q.mul(&curr[2])),
        ];
        prev = std::mem::replace(&mut curr, next);
    }
    let [g, s, t] = prev;
    match g.leading_coeff().inv() {
        Some(unit) => (g.scale(&unit), s.scale(&unit), t.scale(&unit)),
        None => (DensePoly::zero(), DensePoly::one(), DensePoly::zero()),
    }
}
