//! # limes-series
//!
//! Truncated power series for the limes limit and series engine.
//!
//! This crate provides:
//! - [`TruncatedSeries`], a dense Puiseux series value with an order term,
//!   and its raw constructor [`series_data`]
//! - [`series`]: Taylor expansion at the origin, from a closed-form general
//!   coefficient when one is known and by differentiation otherwise
//! - [`series_coefficient`]: the coefficient of `(x - x0)^n` for symbolic `n`
//! - [`inverse_series`]: series reversion
//!
//! All operations return `None` when they cannot give an exact answer.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coefficient;
pub mod data;
pub mod expansion;
pub mod inverse;

#[cfg(test)]
mod proptests;

pub use coefficient::series_coefficient;
pub use data::{series_data, TruncatedSeries};
pub use expansion::{series, Expansion};
pub use inverse::{compose_series, inverse_series};
