//! # limes-integers
//!
//! Exact integer and rational arithmetic for the limes limit and series engine.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`) and rationals (`Rational`)
//! - Extended gcd, modular inverse and modular power
//! - Tiered factorization (small-prime trial division, then Pollard rho)
//! - Probabilistic primality (Miller-Rabin)
//! - Integer nth roots and the k-th power split used for exact radicals
//!
//! Narrowing conversions to machine integers are fallible and return
//! [`IntegerError`] instead of panicking.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod factor;
pub mod integer;
pub mod modular;
mod ops;
pub mod primality;
pub mod primes;
pub mod rational;
pub mod roots;

#[cfg(test)]
mod proptests;

pub use error::IntegerError;
pub use factor::Multiplicity;
pub use integer::Integer;
pub use modular::ExtendedGcd;
pub use rational::Rational;
