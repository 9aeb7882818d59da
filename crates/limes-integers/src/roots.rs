//! Integer roots.

use num_traits::{One, Zero};

use crate::primes::{trial_divide, ROOT_SPLIT_LIMIT};
use crate::{Integer, IntegerError};

impl Integer {
    /// Floor of the square root of a non-negative integer.
    ///
    /// # Errors
    ///
    /// Returns [`IntegerError::EvenRootOfNegative`] for negative input.
    pub fn sqrt(&self) -> Result<Integer, IntegerError> {
        if self.is_negative() {
            return Err(IntegerError::EvenRootOfNegative {
                value: self.to_string(),
                index: 2,
            });
        }
        if self.is_zero() {
            return Ok(Integer::zero());
        }
        let mut x = Integer::one().shift_left(self.bit_len().div_ceil(2));
        loop {
            let next = (&x + &(self / &x)).shift_right(1);
            if next >= x {
                return Ok(x);
            }
            x = next;
        }
    }

    /// The integer `k`-th root, `r` with `r^k <= self < (r+1)^k` for
    /// non-negative `self`. Negative input with odd `k` gives `-root(-self)`.
    ///
    /// # Errors
    ///
    /// Fails for `k == 0` and for an even root of a negative number.
    pub fn nth_root(&self, k: u32) -> Result<Integer, IntegerError> {
        if k == 0 {
            return Err(IntegerError::ZeroRootIndex);
        }
        if k == 2 {
            return self.sqrt();
        }
        if self.is_zero() || k == 1 {
            return Ok(self.clone());
        }
        if self.is_negative() {
            if k % 2 == 0 {
                return Err(IntegerError::EvenRootOfNegative {
                    value: self.to_string(),
                    index: k,
                });
            }
            return Ok(-(-self).nth_root(k)?);
        }

        // Newton iteration from a power of two above the root.
        let k_int = Integer::from(k);
        let k_minus_one = Integer::from(k - 1);
        let bits = self.bit_len().div_ceil(k as usize);
        let mut x = Integer::one().shift_left(bits);
        loop {
            let next = (&(&k_minus_one * &x) + &(self / &x.pow(k - 1))) / k_int.clone();
            if next >= x {
                return Ok(x);
            }
            x = next;
        }
    }

    /// Splits `self` as `root^k * rest` using only primes up to 1021 for the
    /// root part.
    ///
    /// Zero splits as `(0, 1)`. A negative value with odd `k` splits its
    /// magnitude and negates `rest`.
    ///
    /// # Errors
    ///
    /// Fails for `k == 0` and for an even `k` with negative `self`.
    pub fn nth_root_split(&self, k: u32) -> Result<(Integer, Integer), IntegerError> {
        if k == 0 {
            return Err(IntegerError::ZeroRootIndex);
        }
        if self.is_zero() {
            return Ok((Integer::zero(), Integer::one()));
        }
        if self.is_negative() {
            if k % 2 == 0 {
                return Err(IntegerError::EvenRootOfNegative {
                    value: self.to_string(),
                    index: k,
                });
            }
            let (root, rest) = (-self).nth_root_split(k)?;
            return Ok((root, -rest));
        }
        if k == 1 {
            return Ok((self.clone(), Integer::one()));
        }

        let (found, mut rest) = trial_divide(self, ROOT_SPLIT_LIMIT);
        let mut root = Integer::one();
        for (p, count) in found {
            let prime = Integer::from(p);
            let whole = count / k;
            if whole > 0 {
                root = root * prime.pow(whole);
            }
            let leftover = count % k;
            if leftover > 0 {
                rest = rest * prime.pow(leftover);
            }
        }
        Ok((root, rest))
    }
}
