//! Dense univariate polynomials.
//!
//! Used for the exact rational arithmetic behind partial fractions; the
//! coefficient vector is indexed by degree.

use crate::traits::Ring;

/// A univariate polynomial stored as its coefficient vector, lowest degree
/// first.
///
/// The vector never has a zero leading entry, except that the zero
/// polynomial is the single coefficient `0`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DensePoly<R: Ring> {
    coeffs: Vec<R>,
}

impl<R: Ring> DensePoly<R> {
    /// Builds a polynomial, trimming zero leading coefficients.
    #[must_use]
    pub fn new(coeffs: Vec<R>) -> Self {
        let mut coeffs = coeffs;
        let len = coeffs.iter().rposition(|c| !c.is_zero()).map_or(1, |i| i + 1);
        coeffs.truncate(len);
        if coeffs.is_empty() {
            coeffs.push(R::zero());
        }
        Self { coeffs }
    }

    /// `0`.
    #[must_use]
    pub fn zero() -> Self {
        Self::constant(R::zero())
    }

    /// `1`.
    #[must_use]
    pub fn one() -> Self {
        Self::constant(R::one())
    }

    /// The constant `c`.
    #[must_use]
    pub fn constant(c: R) -> Self {
        Self { coeffs: vec![c] }
    }

    /// `x - root`.
    #[must_use]
    pub fn linear(root: R) -> Self {
        Self::new(vec![-root, R::one()])
    }

    /// `c * x^n`.
    #[must_use]
    pub fn monomial(c: R, n: usize) -> Self {
        let mut coeffs: Vec<R> = std::iter::repeat_with(R::zero).take(n).collect();
        coeffs.push(c);
        Self::new(coeffs)
    }

    /// Degree, with the zero polynomial at degree 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Whether this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self.coeffs.as_slice(), [c] if c.is_zero())
    }

    /// Coefficient of the highest power.
    #[must_use]
    pub fn leading_coeff(&self) -> &R {
        &self.coeffs[self.degree()]
    }

    /// Coefficient of `x^i`, zero past the degree.
    #[must_use]
    pub fn coeff(&self, i: usize) -> R {
        self.coeffs.get(i).cloned().unwrap_or_else(R::zero)
    }

    /// Coefficients, lowest degree first.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Value at `x` (Horner).
    #[must_use]
    pub fn eval(&self, x: &R) -> R {
        self.coeffs
            .iter()
            .rev()
            .fold(R::zero(), |acc, c| acc * x.clone() + c.clone())
    }

    /// Sum of two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        Self::new((0..len).map(|i| self.coeff(i) + other.coeff(i)).collect())
    }

    /// Additive inverse.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            coeffs: self.coeffs.iter().cloned().map(|c| -c).collect(),
        }
    }

    /// Difference of two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        Self::new((0..len).map(|i| self.coeff(i) - other.coeff(i)).collect())
    }

    /// Product, by the schoolbook convolution.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut out: Vec<R> = std::iter::repeat_with(R::zero)
            .take(self.coeffs.len() + other.coeffs.len() - 1)
            .collect();
        for (i, a) in self.coeffs.iter().enumerate() {
            for (b, slot) in other.coeffs.iter().zip(&mut out[i..]) {
                *slot = slot.clone() + a.clone() * b.clone();
            }
        }
        Self::new(out)
    }

    /// Every coefficient multiplied by `c`.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        Self::new(self.coeffs.iter().map(|a| a.clone() * c.clone()).collect())
    }

    /// `self^n` by binary powering.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        (0..u32::BITS - n.leading_zeros())
            .rev()
            .fold(Self::one(), |acc, bit| {
                let squared = acc.mul(&acc);
                if (n >> bit) & 1 == 1 {
                    squared.mul(self)
                } else {
                    squared
                }
            })
    }

    /// Formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        let mut k = R::zero();
        let coeffs = self
            .coeffs
            .iter()
            .skip(1)
            .map(|c| {
                k = k.clone() + R::one();
                c.clone() * k.clone()
            })
            .collect();
        Self::new(coeffs)
    }

    /// Multiplicity of the root 0; the zero polynomial reports 0.
    #[must_use]
    pub fn trailing_zeros(&self) -> usize {
        if self.is_zero() {
            return 0;
        }
        self.coeffs.iter().take_while(|c| c.is_zero()).count()
    }

    /// Divides by `x^k`, discarding the `k` lowest coefficients.
    #[must_use]
    pub fn shift_down(&self, k: usize) -> Self {
        Self::new(self.coeffs.get(k..).map(<[R]>::to_vec).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use limes_integers::Rational;

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }

    fn poly(coeffs: &[i64]) -> DensePoly<Rational> {
        DensePoly::new(coeffs.iter().map(|&c| q(c)).collect())
    }

    #[test]
    fn test_normalisation() {
        let p = poly(&[1, 2, 0, 0]);
        assert_eq!(p.degree(), 1);
        assert_eq!(p.coeffs().len(), 2);
        let z = poly(&[0, 0]);
        assert!(z.is_zero());
        assert_eq!(z, DensePoly::zero());
    }

    #[test]
    fn test_ring_operations() {
        // (x + 1)(x - 1) = x^2 - 1
        let a = poly(&[1, 1]);
        let b = DensePoly::linear(q(1));
        assert_eq!(a.mul(&b), poly(&[-1, 0, 1]));
        assert_eq!(a.add(&b), poly(&[0, 2]));
        assert_eq!(a.sub(&a), DensePoly::zero());
        assert_eq!(a.pow(3), poly(&[1, 3, 3, 1]));
        assert_eq!(a.scale(&q(0)), DensePoly::zero());
    }

    #[test]
    fn test_eval_and_derivative() {
        let p = poly(&[1, 2, 3]);
        assert_eq!(p.eval(&q(2)), q(17));
        assert_eq!(p.derivative(), poly(&[2, 6]));
        assert_eq!(DensePoly::constant(q(5)).derivative(), DensePoly::zero());
    }

    #[test]
    fn test_trailing_zeros() {
        let p = poly(&[0, 0, 3, 1]);
        assert_eq!(p.trailing_zeros(), 2);
        assert_eq!(p.shift_down(2), poly(&[3, 1]));
        assert_eq!(DensePoly::monomial(q(4), 3).trailing_zeros(), 3);
    }
}
