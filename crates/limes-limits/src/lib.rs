//! # limes-limits
//!
//! Symbolic limits for the limes engine.
//!
//! This crate provides:
//! - [`LimitRequest`], the validated form of `Limit(expr, x -> a[, Direction -> d])`
//! - [`limit`], a rule-driven evaluator covering substitution, sums,
//!   products, powers, logarithms and continuous functions, with
//!   L'Hopital's rule for `0/0` and `Infinity/Infinity` quotients
//! - [`rational_limit_at_infinity`] for quotients of polynomials
//!
//! ## Directions
//!
//! A limit may be requested from one side. Some rules only hold from one
//! side, in which case they narrow the direction of a two-sided request and
//! report it in the [`LimitOutcome`]. A direction is never widened.
//!
//! ## Termination
//!
//! Every rule except L'Hopital's recurses on a strictly smaller expression.
//! L'Hopital steps count against the recursion limit of the
//! [`EvalContext`](limes_core::EvalContext); without one, a budget from the
//! engine configuration is installed for the duration of the step. Running
//! out of either the budget or a caller's limit leaves the limit
//! unevaluated with a `Limit` message.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod direction;
pub mod engine;
pub mod error;
pub mod rational;
pub mod request;

#[cfg(test)]
mod proptests;

pub use direction::Direction;
pub use engine::{limit, LimitOutcome};
pub use error::{ArgumentError, LimitError};
pub use rational::rational_limit_at_infinity;
pub use request::LimitRequest;
