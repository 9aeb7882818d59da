//! Evaluation errors.

use thiserror::Error;

/// Errors raised while evaluating inside an [`EvalContext`](crate::EvalContext).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The nesting depth passed the active recursion limit.
    #[error("recursion limit of {limit} exceeded")]
    RecursionLimitExceeded {
        /// The limit that was in force.
        limit: usize,
    },
}
