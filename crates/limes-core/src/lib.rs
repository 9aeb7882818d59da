//! # limes-core
//!
//! Core expression engine for the limes limit and series evaluator.
//!
//! This crate provides:
//! - Arena-allocated expression storage with hash-consing
//! - Canonicalising constructors (`add`, `mul`, `pow`, `apply`) that perform
//!   exact numeric folding, like-term collection and infinity arithmetic
//! - Structural queries, substitution, expansion and differentiation
//! - A per-call evaluation context carrying recursion and quiet-mode state
//! - An assumptions seam for sign queries on symbols
//!
//! ## Design Principles
//!
//! - **Hash-Consing**: every structurally unique expression is stored once,
//!   so equality is handle equality
//! - **Canonical on construction**: a handle returned by a constructor is
//!   already in normal form; [`ExprArena::evaluate`] is idempotent
//! - **No global state**: everything mutable lives in the arena or in an
//!   [`EvalContext`] owned by the caller

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod assumptions;
pub mod context;
pub mod diff;
pub mod display;
pub mod error;
pub mod eval;
pub mod expand;
pub mod expr;
pub mod functions;
pub mod handle;
pub mod intern;
pub mod numeric;
pub mod order;
pub mod subst;

#[cfg(test)]
mod proptests;

pub use arena::ExprArena;
pub use assumptions::{AssumptionSet, Assumptions, NoAssumptions, SymbolSign};
pub use context::{EngineConfig, EvalContext};
pub use display::DisplayExpr;
pub use error::EvalError;
pub use expr::{Constant, ExprNode, Func, SymbolId};
pub use handle::ExprHandle;
