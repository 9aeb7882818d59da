//! Modular arithmetic on arbitrary precision integers.
//!
//! Extended gcd, modular inverse and modular exponentiation. The modulus is
//! a runtime value; operations with a non-positive modulus fail instead of
//! panicking.

use num_traits::{One, Zero};

use crate::{Integer, IntegerError};

/// The triple `(g, x, y)` returned by [`extended_gcd`], with `a*x + b*y == g`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedGcd {
    /// The non-negative greatest common divisor.
    pub gcd: Integer,
    /// Bezout coefficient of the first argument.
    pub x: Integer,
    /// Bezout coefficient of the second argument.
    pub y: Integer,
}

/// Computes `gcd(a, b)` together with Bezout coefficients.
#[must_use]
pub fn extended_gcd(a: &Integer, b: &Integer) -> ExtendedGcd {
    if b.is_zero() {
        let x = if a.is_negative() {
            -Integer::one()
        } else {
            Integer::one()
        };
        return ExtendedGcd {
            gcd: a.abs(),
            x,
            y: Integer::zero(),
        };
    }
    if a.is_zero() {
        let y = if b.is_negative() {
            -Integer::one()
        } else {
            Integer::one()
        };
        return ExtendedGcd {
            gcd: b.abs(),
            x: Integer::zero(),
            y,
        };
    }

    let (mut q, mut r) = (a.clone(), b.clone());
    let (mut c1, mut d1) = (Integer::one(), Integer::zero());
    let (mut c2, mut d2) = (Integer::zero(), Integer::one());
    while !r.is_zero() {
        let quot = &q / &r;
        let rem = &q % &r;
        let x1 = &c1 - &(&quot * &d1);
        let x2 = &c2 - &(&quot * &d2);
        c1 = std::mem::replace(&mut d1, x1);
        c2 = std::mem::replace(&mut d2, x2);
        q = std::mem::replace(&mut r, rem);
    }
    if q.is_negative() {
        q = -q;
        c1 = -c1;
        c2 = -c2;
    }
    ExtendedGcd {
        gcd: q,
        x: c1,
        y: c2,
    }
}

fn check_modulus(modulus: &Integer) -> Result<(), IntegerError> {
    if modulus.is_positive() {
        Ok(())
    } else {
        Err(IntegerError::NonPositiveModulus(modulus.to_string()))
    }
}

/// Returns `a^-1 mod m` in `0..m`.
///
/// # Errors
///
/// Fails if `m <= 0` or `gcd(a, m) != 1`.
pub fn mod_inverse(a: &Integer, modulus: &Integer) -> Result<Integer, IntegerError> {
    check_modulus(modulus)?;
    let residue = a.modulo(modulus)?;
    let egcd = extended_gcd(&residue, modulus);
    if !egcd.gcd.is_one() {
        return Err(IntegerError::NotInvertible {
            value: a.to_string(),
            modulus: modulus.to_string(),
        });
    }
    egcd.x.modulo(modulus)
}

/// Returns `base^exp mod m` in `0..m`. A negative exponent inverts first.
///
/// # Errors
///
/// Fails if `m <= 0`, or if `exp < 0` and `base` is not invertible.
pub fn mod_pow(base: &Integer, exp: &Integer, modulus: &Integer) -> Result<Integer, IntegerError> {
    check_modulus(modulus)?;
    if modulus.is_one() {
        return Ok(Integer::zero());
    }
    let mut b = if exp.is_negative() {
        mod_inverse(base, modulus)?
    } else {
        base.modulo(modulus)?
    };
    let mut e = exp.abs();
    let mut result = Integer::one();
    while !e.is_zero() {
        if e.is_odd() {
            result = (&result * &b) % modulus.clone();
        }
        b = (&b * &b) % modulus.clone();
        e = e.shift_right(1);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Integer {
        Integer::new(n)
    }

    #[test]
    fn test_extended_gcd() {
        let r = extended_gcd(&int(240), &int(46));
        assert_eq!(r.gcd, int(2));
        assert_eq!(&int(240) * &r.x + &int(46) * &r.y, int(2));
    }

    #[test]
    fn test_extended_gcd_signs_and_zero() {
        let r = extended_gcd(&int(-12), &int(18));
        assert_eq!(r.gcd, int(6));
        assert_eq!(&int(-12) * &r.x + &int(18) * &r.y, int(6));

        let r = extended_gcd(&int(-5), &int(0));
        assert_eq!(r.gcd, int(5));
        assert_eq!(&int(-5) * &r.x, int(5));

        let r = extended_gcd(&int(0), &int(0));
        assert_eq!(r.gcd, int(0));
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(mod_inverse(&int(3), &int(11)), Ok(int(4)));
        assert_eq!(mod_inverse(&int(-3), &int(11)), Ok(int(7)));
        assert!(matches!(
            mod_inverse(&int(6), &int(9)),
            Err(IntegerError::NotInvertible { .. })
        ));
        assert!(matches!(
            mod_inverse(&int(1), &int(0)),
            Err(IntegerError::NonPositiveModulus(_))
        ));
    }

    #[test]
    fn test_mod_pow() {
        assert_eq!(mod_pow(&int(4), &int(13), &int(497)), Ok(int(445)));
        assert_eq!(mod_pow(&int(3), &int(-1), &int(11)), Ok(int(4)));
        assert_eq!(mod_pow(&int(7), &int(0), &int(13)), Ok(int(1)));
        assert_eq!(mod_pow(&int(7), &int(5), &int(1)), Ok(int(0)));
        assert_eq!(mod_pow(&int(-2), &int(3), &int(5)), Ok(int(2)));
    }
}
