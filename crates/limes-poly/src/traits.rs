//! Coefficient rings for dense polynomials.

use std::fmt::Debug;
use std::ops::{Neg, Sub};

use limes_integers::Rational;
use num_traits::{One, Zero};

/// A commutative ring with identity, usable as polynomial coefficients.
///
/// The identities and the additive and multiplicative operators come from
/// [`Zero`] and [`One`]; every type with those plus subtraction and
/// negation qualifies.
pub trait Ring: Clone + Eq + Debug + Zero + One + Sub<Output = Self> + Neg<Output = Self> {}

impl<T> Ring for T where T: Clone + Eq + Debug + Zero + One + Sub<Output = T> + Neg<Output = T> {}

/// A ring in which every nonzero element is a unit.
pub trait Field: Ring {
    /// `1 / self`, or `None` for zero.
    fn inv(&self) -> Option<Self>;
}

impl Field for Rational {
    fn inv(&self) -> Option<Self> {
        self.checked_recip()
    }
}
