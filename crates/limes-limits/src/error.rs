//! Errors raised by limit computation.

use limes_core::EvalError;
use thiserror::Error;

/// A malformed `Limit` call.
///
/// These are detected before any recursion starts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// `Limit` takes an expression, a rule and an optional direction.
    #[error("Limit called with {given} arguments; 2 or 3 arguments are expected")]
    Arity {
        /// Number of arguments supplied.
        given: usize,
    },

    /// The second argument is not of the form `x -> a`.
    #[error("rule definition expected as second argument")]
    NotARule,

    /// The left-hand side of the rule is not a symbol.
    #[error("variable symbol for rule definition expected")]
    NotASymbol,

    /// The limit point mentions the limit variable.
    #[error("limit point contains the variable of the rule definition")]
    ValueDependsOnVariable,

    /// The third argument is not `Direction -> 1`, `-1` or `Automatic`.
    #[error("invalid direction option: expected Direction -> 1, -1 or Automatic")]
    InvalidDirection,
}

/// Errors returned by [`limit`](crate::limit).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LimitError {
    /// The request was malformed.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// A recursion limit was exceeded.
    ///
    /// Raised while unwinding the evaluator. [`limit`](crate::limit) turns it
    /// into an unevaluated result with a `Limit` message, so it never reaches
    /// the caller.
    #[error("recursion limit of {limit} exceeded")]
    RecursionLimitExceeded {
        /// The limit that was in force.
        limit: usize,
    },
}

impl From<EvalError> for LimitError {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::RecursionLimitExceeded { limit } => LimitError::RecursionLimitExceeded { limit },
        }
    }
}
