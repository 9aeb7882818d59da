//! Errors raised by the integer tower.

use thiserror::Error;

/// Failure of an integer operation that has no exact answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegerError {
    /// An even root of a negative number was requested.
    #[error("even root (index {index}) of negative integer {value}")]
    EvenRootOfNegative {
        /// The radicand.
        value: String,
        /// The root index.
        index: u32,
    },

    /// A root index of zero was requested.
    #[error("root index must be positive")]
    ZeroRootIndex,

    /// Division or reduction by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The modulus of a modular operation was not positive.
    #[error("modulus must be positive, got {0}")]
    NonPositiveModulus(String),

    /// The residue has no inverse for the given modulus.
    #[error("{value} is not invertible modulo {modulus}")]
    NotInvertible {
        /// The residue.
        value: String,
        /// The modulus.
        modulus: String,
    },

    /// A negative exponent was passed where only non-negative ones make sense.
    #[error("negative exponent {0}")]
    NegativeExponent(String),

    /// The value does not fit the requested machine integer type.
    #[error("{value} does not fit in {target}")]
    OutOfRange {
        /// Decimal rendering of the value.
        value: String,
        /// Name of the target type.
        target: &'static str,
    },
}
