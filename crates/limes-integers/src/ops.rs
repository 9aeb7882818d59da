//! Operator impls for [`Integer`] and [`Rational`].
//!
//! Both types are thin wrappers around a `dashu` value, so every operator
//! forwards to the wrapped value for each owned/borrowed operand pairing.

use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use crate::{Integer, Rational};

macro_rules! forward_binop {
    ($ty:ident, $($trait:ident :: $method:ident),+) => {
        $(
            impl $trait for $ty {
                type Output = $ty;

                fn $method(self, rhs: $ty) -> $ty {
                    $ty($trait::$method(self.0, rhs.0))
                }
            }

            impl $trait<&$ty> for $ty {
                type Output = $ty;

                fn $method(self, rhs: &$ty) -> $ty {
                    $ty($trait::$method(self.0, &rhs.0))
                }
            }

            impl $trait<$ty> for &$ty {
                type Output = $ty;

                fn $method(self, rhs: $ty) -> $ty {
                    $ty($trait::$method(&self.0, rhs.0))
                }
            }

            impl $trait for &$ty {
                type Output = $ty;

                fn $method(self, rhs: &$ty) -> $ty {
                    $ty($trait::$method(&self.0, &rhs.0))
                }
            }
        )+

        impl Neg for $ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                $ty(-self.0)
            }
        }

        impl Neg for &$ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                $ty(-&self.0)
            }
        }
    };
}

// Integer division truncates toward zero; `Rem` takes the dividend's sign.
forward_binop!(Integer, Add::add, Sub::sub, Mul::mul, Div::div, Rem::rem);
forward_binop!(Rational, Add::add, Sub::sub, Mul::mul, Div::div);
