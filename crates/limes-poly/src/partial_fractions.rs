//! Partial fraction decomposition over the rationals.
//!
//! Given `P(x)/Q(x)` with rational coefficients, the denominator is split
//! into the linear factors of its rational roots and one residual factor
//! without rational roots:
//!
//! Q(x) = c * (x - r₁)^{m₁} * ... * (x - rₖ)^{mₖ} * R(x)
//!
//! Coprime factors are separated with the Bézout identity and each prime
//! power `A / q^e` is expanded as `A₁/q + ... + Aₑ/q^e` by repeated division.

use limes_core::{ExprArena, ExprHandle};
use limes_integers::Rational;
use tracing::debug;

use crate::dense::DensePoly;
use crate::expr_poly::ExprPolynomial;
use crate::gcd::{poly_div_rem, poly_extended_gcd};
use crate::roots::rational_roots;
use crate::traits::Field;

/// A single term `numerator / denominator_base^power`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialFractionTerm {
    /// Numerator polynomial, of lower degree than `denominator_base`.
    pub numerator: DensePoly<Rational>,
    /// The factor in the denominator.
    pub denominator_base: DensePoly<Rational>,
    /// The power of the denominator factor.
    pub power: u32,
}

/// Result of a partial fraction decomposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialFractionDecomposition {
    /// The polynomial part of an improper fraction.
    pub polynomial_part: DensePoly<Rational>,
    /// The fractional terms; zero numerators are dropped.
    pub terms: Vec<PartialFractionTerm>,
}

/// Decomposes `numerator / denominator` over the rationals.
///
/// Returns `None` when the denominator is zero.
#[must_use]
pub fn partial_fraction_decomposition(
    numerator: &DensePoly<Rational>,
    denominator: &DensePoly<Rational>,
) -> Option<PartialFractionDecomposition> {
    let (polynomial_part, remainder) = poly_div_rem(numerator, denominator)?;
    if remainder.is_zero() {
        return Some(PartialFractionDecomposition {
            polynomial_part,
            terms: Vec::new(),
        });
    }

    // Work with a monic denominator.
    let lead_inv = denominator.leading_coeff().inv()?;
    let proper = remainder.scale(&lead_inv);
    let (roots, residual) = rational_roots(denominator);

    let mut factors: Vec<(DensePoly<Rational>, u32)> = roots
        .into_iter()
        .map(|(root, multiplicity)| (DensePoly::linear(root), multiplicity))
        .collect();
    if residual.degree() > 0 {
        factors.push((residual, 1));
    }

    let mut terms = decompose_coprime_factors(&proper, &factors)?;
    terms.retain(|t| !t.numerator.is_zero());
    Some(PartialFractionDecomposition {
        polynomial_part,
        terms,
    })
}

/// Decomposes `A / q^e` into `A₁/q + A₂/q² + ... + Aₑ/qᵉ`.
fn decompose_single_power(
    a: &DensePoly<Rational>,
    q: &DensePoly<Rational>,
    power: u32,
) -> Option<Vec<PartialFractionTerm>> {
    let mut terms = Vec::new();
    let mut current = a.clone();
    let mut current_power = power;

    // A = Q*q + R gives A/q^e = R/q^e + Q/q^(e-1).
    while current_power > 0 && !current.is_zero() {
        let (quotient, remainder) = poly_div_rem(&current, q)?;
        terms.push(PartialFractionTerm {
            numerator: remainder,
            denominator_base: q.clone(),
            power: current_power,
        });
        current = quotient;
        current_power -= 1;
    }
    terms.reverse();
    Some(terms)
}

/// Splits `A / (q₁^e₁ ... qₖ^eₖ)` for pairwise coprime `qᵢ`.
fn decompose_coprime_factors(
    a: &DensePoly<Rational>,
    factors: &[(DensePoly<Rational>, u32)],
) -> Option<Vec<PartialFractionTerm>> {
    match factors {
        [] => Some(Vec::new()),
        [(q, e)] => decompose_single_power(a, q, *e),
        _ => {
            let mid = factors.len() / 2;
            let (left_factors, right_factors) = factors.split_at(mid);
            let left_product = factor_product(left_factors);
            let right_product = factor_product(right_factors);

            // s*L + t*R = 1, so A/(L*R) = A*t/L + A*s/R.
            let (gcd, s, t) = poly_extended_gcd(&left_product, &right_product);
            if gcd.degree() != 0 {
                return None;
            }
            let (_, left_numerator) = poly_div_rem(&a.mul(&t), &left_product)?;
            let (_, right_numerator) = poly_div_rem(&a.mul(&s), &right_product)?;

            let mut terms = decompose_coprime_factors(&left_numerator, left_factors)?;
            terms.extend(decompose_coprime_factors(&right_numerator, right_factors)?);
            Some(terms)
        }
    }
}

fn factor_product(factors: &[(DensePoly<Rational>, u32)]) -> DensePoly<Rational> {
    factors
        .iter()
        .fold(DensePoly::one(), |acc, (q, e)| acc.mul(&q.pow(*e)))
}

/// Rewrites the rational function `num / den` in `x` as a sum of partial
/// fractions.
///
/// Returns `None` unless both parts are polynomials in `x` with rational
/// coefficients and the denominator is not constant.
pub fn apart(
    arena: &mut ExprArena,
    num: ExprHandle,
    den: ExprHandle,
    x: ExprHandle,
) -> Option<ExprHandle> {
    let p = ExprPolynomial::from_expr(arena, num, x)?.to_dense(arena)?;
    let q = ExprPolynomial::from_expr(arena, den, x)?.to_dense(arena)?;
    if q.degree() == 0 {
        return None;
    }
    let decomposition = partial_fraction_decomposition(&p, &q)?;
    debug!(terms = decomposition.terms.len(), "partial fractions");

    let mut summands = Vec::with_capacity(decomposition.terms.len() + 1);
    summands.push(ExprPolynomial::from_dense(arena, &decomposition.polynomial_part, x).to_expr(arena));
    for term in &decomposition.terms {
        let numerator = ExprPolynomial::from_dense(arena, &term.numerator, x).to_expr(arena);
        let base = ExprPolynomial::from_dense(arena, &term.denominator_base, x).to_expr(arena);
        let inverse = arena.powi(base, -i64::from(term.power));
        summands.push(arena.mul([numerator, inverse]));
    }
    Some(arena.add(summands))
}
