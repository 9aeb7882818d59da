//! Univariate polynomials with expression coefficients.
//!
//! [`ExprPolynomial`] views an expression as a polynomial in one symbol
//! whose coefficients are arbitrary expressions free of that symbol. It is
//! the degree and leading-coefficient oracle used by the limit evaluator,
//! and the bridge to [`DensePoly`] when every coefficient is rational.

use std::collections::BTreeMap;

use limes_core::{ExprArena, ExprHandle, ExprNode};
use limes_integers::Rational;
use smallvec::SmallVec;

use crate::dense::DensePoly;

/// Largest degree materialised as a dense coefficient vector.
const MAX_DENSE_DEGREE: u32 = 1 << 16;

/// A polynomial in `variable` with coefficients free of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExprPolynomial {
    variable: ExprHandle,
    /// Coefficients in ascending degree order, trailing zeros trimmed.
    coefficients: Vec<ExprHandle>,
}

impl ExprPolynomial {
    /// Reads `expr` as a polynomial in the symbol `x` after expansion.
    ///
    /// Returns `None` if some term depends on `x` other than through a
    /// nonnegative integer power.
    pub fn from_expr(arena: &mut ExprArena, expr: ExprHandle, x: ExprHandle) -> Option<Self> {
        let (monomials, residual) = decompose_monomials(arena, expr, x);
        if !residual.is_empty() {
            return None;
        }
        let degree = monomials.keys().next_back().copied().unwrap_or(0);
        if degree > MAX_DENSE_DEGREE {
            return None;
        }
        let zero = arena.zero();
        let mut coefficients = vec![zero; degree as usize + 1];
        for (k, c) in monomials {
            coefficients[k as usize] = c;
        }
        while coefficients.len() > 1 && coefficients.last().is_some_and(|&c| arena.is_zero(c)) {
            coefficients.pop();
        }
        Some(Self {
            variable: x,
            coefficients,
        })
    }

    /// Builds a polynomial from rational coefficients.
    pub fn from_dense(arena: &mut ExprArena, poly: &DensePoly<Rational>, x: ExprHandle) -> Self {
        let coefficients = poly.coeffs().iter().map(|c| arena.rational(c.clone())).collect();
        Self {
            variable: x,
            coefficients,
        }
    }

    /// The polynomial variable.
    #[must_use]
    pub fn variable(&self) -> ExprHandle {
        self.variable
    }

    /// The degree. The zero polynomial has degree 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// The coefficient of the highest power.
    #[must_use]
    pub fn leading_coefficient(&self) -> ExprHandle {
        self.coefficients[self.coefficients.len() - 1]
    }

    /// The coefficient of `x^k`, or `None` above the degree.
    #[must_use]
    pub fn coefficient(&self, k: usize) -> Option<ExprHandle> {
        self.coefficients.get(k).copied()
    }

    /// All coefficients in ascending degree order.
    #[must_use]
    pub fn coefficients(&self) -> &[ExprHandle] {
        &self.coefficients
    }

    /// The dense rational polynomial, if every coefficient is rational.
    #[must_use]
    pub fn to_dense(&self, arena: &ExprArena) -> Option<DensePoly<Rational>> {
        let coeffs = self
            .coefficients
            .iter()
            .map(|&c| arena.as_rational(c))
            .collect::<Option<Vec<_>>>()?;
        Some(DensePoly::new(coeffs))
    }

    /// Rebuilds the expression `sum c_k x^k`.
    pub fn to_expr(&self, arena: &mut ExprArena) -> ExprHandle {
        let mut terms: SmallVec<[ExprHandle; 8]> = SmallVec::new();
        for (k, &c) in self.coefficients.iter().enumerate() {
            let power = arena.powi(self.variable, i64::try_from(k).unwrap_or(i64::MAX));
            terms.push(arena.mul([c, power]));
        }
        arena.add(terms)
    }
}

/// Splits the expansion of `expr` into monomials in `x` and the rest.
///
/// Returns a map from exponent to the summed coefficient of `x^exponent`,
/// and the terms that depend on `x` in any other way. Terms free of `x`
/// land at exponent 0.
pub fn decompose_monomials(
    arena: &mut ExprArena,
    expr: ExprHandle,
    x: ExprHandle,
) -> (BTreeMap<u32, ExprHandle>, Vec<ExprHandle>) {
    let expanded = arena.expand(expr);
    let terms: Vec<ExprHandle> = match arena.get(expanded) {
        ExprNode::Add(args) => args.to_vec(),
        _ => vec![expanded],
    };

    let mut monomials: BTreeMap<u32, ExprHandle> = BTreeMap::new();
    let mut residual = Vec::new();
    for term in terms {
        let (free, dependent) = arena.partition_free(term, x);
        match monomial_degree(arena, dependent, x) {
            Some(k) => {
                let sum = match monomials.get(&k) {
                    Some(&prev) => arena.add([prev, free]),
                    None => free,
                };
                monomials.insert(k, sum);
            }
            None => residual.push(term),
        }
    }
    monomials.retain(|_, c| !arena.is_zero(*c));
    (monomials, residual)
}

fn monomial_degree(arena: &ExprArena, h: ExprHandle, x: ExprHandle) -> Option<u32> {
    if arena.is_one(h) {
        return Some(0);
    }
    if h == x {
        return Some(1);
    }
    match arena.get(h) {
        ExprNode::Pow { base, exp } if *base == x => {
            let n = arena.as_integer(*exp)?;
            u32::try_from(n).ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use limes_core::Func;

    #[test]
    fn test_from_expr_expands() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let a = arena.symbol("a");
        let one = arena.one();
        let sum = arena.add([x, one]);
        let sq = arena.powi(sum, 2);
        let scaled = arena.mul([a, sq]);
        let p = ExprPolynomial::from_expr(&mut arena, scaled, x).unwrap();
        assert_eq!(p.degree(), 2);
        assert_eq!(p.leading_coefficient(), a);
        let two = arena.integer(2);
        let two_a = arena.mul([two, a]);
        assert_eq!(p.coefficient(1), Some(two_a));
        assert_eq!(p.coefficient(0), Some(a));
        assert_eq!(p.coefficient(3), None);
        assert_eq!(p.to_expr(&mut arena), arena.expand(scaled));
    }

    #[test]
    fn test_cancelling_leading_term() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let x2 = arena.powi(x, 2);
        let minus_x2 = arena.neg(x2);
        let three = arena.integer(3);
        let e = arena.add([x2, three, minus_x2]);
        let p = ExprPolynomial::from_expr(&mut arena, e, x).unwrap();
        assert_eq!(p.degree(), 0);
        assert_eq!(p.leading_coefficient(), three);
    }

    #[test]
    fn test_non_polynomial() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let sin = arena.apply(Func::Sin, [x]);
        let e = arena.add([x, sin]);
        assert!(ExprPolynomial::from_expr(&mut arena, e, x).is_none());
        let inv = arena.recip(x);
        assert!(ExprPolynomial::from_expr(&mut arena, inv, x).is_none());
    }

    #[test]
    fn test_decompose_monomials() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let b = arena.symbol("b");
        let x3 = arena.powi(x, 3);
        let bx3 = arena.mul([b, x3]);
        let sin = arena.apply(Func::Sin, [x]);
        let five = arena.integer(5);
        let e = arena.add([bx3, sin, five, x]);
        let (monomials, residual) = decompose_monomials(&mut arena, e, x);
        assert_eq!(monomials.get(&3), Some(&b));
        assert_eq!(monomials.get(&1), Some(&arena.one()));
        assert_eq!(monomials.get(&0), Some(&five));
        assert_eq!(residual, vec![sin]);
    }

    #[test]
    fn test_to_dense() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let half = arena.fraction(1, 2);
        let x2 = arena.powi(x, 2);
        let term = arena.mul([half, x2]);
        let minus_one = arena.minus_one();
        let e = arena.add([term, minus_one]);
        let p = ExprPolynomial::from_expr(&mut arena, e, x).unwrap();
        let dense = p.to_dense(&arena).unwrap();
        assert_eq!(
            dense,
            DensePoly::new(vec![Rational::from(-1), Rational::from(0), Rational::from_i64(1, 2)])
        );
        let back = ExprPolynomial::from_dense(&mut arena, &dense, x);
        assert_eq!(back, p);
    }
}
