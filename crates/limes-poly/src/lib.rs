//! # limes-poly
//!
//! Polynomial facilities for the limes limit and series engine.
//!
//! This crate provides:
//! - Dense univariate polynomials over a field, with division, gcd and
//!   extended gcd
//! - Rational root splitting over the rationals
//! - [`ExprPolynomial`], a polynomial view of an expression in one symbol,
//!   used for degree and leading-coefficient queries
//! - Monomial decomposition for series coefficients
//! - Partial fraction decomposition ([`apart`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dense;
pub mod expr_poly;
pub mod gcd;
pub mod partial_fractions;
pub mod roots;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use dense::DensePoly;
pub use expr_poly::{decompose_monomials, ExprPolynomial};
pub use gcd::{make_monic, poly_div_rem, poly_extended_gcd, poly_gcd};
pub use partial_fractions::{apart, partial_fraction_decomposition, PartialFractionDecomposition, PartialFractionTerm};
pub use roots::rational_roots;
pub use traits::{Field, Ring};
