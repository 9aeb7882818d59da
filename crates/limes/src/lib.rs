//! # limes
//!
//! Symbolic limits and truncated power series over exact arithmetic.
//!
//! ## Features
//!
//! - **Limits**: rule-driven evaluation with L'Hopital's rule, one-sided
//!   approaches and sign assumptions
//! - **Series**: Taylor and Puiseux series values, symbolic coefficients
//!   and series reversion
//! - **Exact arithmetic**: arbitrary precision integers and rationals with
//!   factorization and primality
//!
//! ## Quick Start
//!
//! ```rust
//! use limes::prelude::*;
//!
//! let mut session = Session::new();
//! let arena = session.arena_mut();
//! let x = arena.symbol("x");
//! let sin = arena.apply(Func::Sin, [x]);
//! let ratio = arena.div(sin, x);
//! let zero = arena.zero();
//! let rule = arena.apply(Func::Rule, [x, zero]);
//! let outcome = session.limit(&[ratio, rule]).unwrap().unwrap();
//! assert_eq!(session.render(outcome.value), "1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod session;

pub use limes_core as core;
pub use limes_integers as integers;
pub use limes_limits as limits;
pub use limes_poly as poly;
pub use limes_series as series;

pub use session::Session;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::session::Session;
    pub use limes_core::{
        Constant, EngineConfig, EvalContext, ExprArena, ExprHandle, ExprNode, Func, SymbolSign,
    };
    pub use limes_integers::{Integer, Rational};
    pub use limes_limits::{Direction, LimitError, LimitOutcome, LimitRequest};
    pub use limes_series::{Expansion, TruncatedSeries};
}
