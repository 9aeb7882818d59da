//! Probabilistic primality testing.
//!
//! Miller-Rabin with the first twelve primes as fixed witnesses, which is
//! exact below 3.1e23, followed by pseudo-random witnesses drawn from a
//! seeded ChaCha stream so results are reproducible.

use num_traits::{One, Zero};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::modular::mod_pow;
use crate::primes::{small_primes, TRIAL_DIVISION_LIMIT};
use crate::Integer;

/// Default number of random Miller-Rabin rounds.
pub const DEFAULT_ROUNDS: u32 = 32;

const FIXED_WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

const WITNESS_SEED: u64 = 0x6c69_6d65_735f_7072;

impl Integer {
    /// Returns true if `|self|` is prime with high certainty.
    #[must_use]
    pub fn is_probable_prime(&self) -> bool {
        self.is_probable_prime_with(DEFAULT_ROUNDS)
    }

    /// Like [`Integer::is_probable_prime`] with an explicit number of random rounds.
    #[must_use]
    pub fn is_probable_prime_with(&self, rounds: u32) -> bool {
        let n = self.abs();
        if let Some(small) = n.to_i64() {
            if small < 2 {
                return false;
            }
            if small <= i64::from(TRIAL_DIVISION_LIMIT) {
                return u32::try_from(small)
                    .map(|s| small_primes().binary_search(&s).is_ok())
                    .unwrap_or(false);
            }
        }
        for &p in &small_primes()[..64] {
            if n.is_divisible_by(&Integer::from(p)) {
                return false;
            }
        }
        miller_rabin(&n, rounds)
    }
}

fn miller_rabin(n: &Integer, rounds: u32) -> bool {
    let one = Integer::one();
    let n_minus_one = n - &one;
    let mut d = n_minus_one.clone();
    let mut s = 0usize;
    while d.is_even() {
        d = d.shift_right(1);
        s += 1;
    }

    let is_witness = |a: &Integer| -> bool {
        let Ok(mut x) = mod_pow(a, &d, n) else {
            return true;
        };
        if x.is_one() || x == n_minus_one {
            return false;
        }
        for _ in 1..s {
            x = (&x * &x) % n.clone();
            if x == n_minus_one {
                return false;
            }
        }
        true
    };

    if FIXED_WITNESSES
        .iter()
        .any(|&a| is_witness(&Integer::from(a)))
    {
        return false;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(WITNESS_SEED);
    let span = n - &Integer::new(3);
    for _ in 0..rounds {
        let r = Integer::from(rng.gen::<u64>());
        let a = (r % span.clone()) + Integer::new(2);
        if a.is_zero() {
            continue;
        }
        if is_witness(&a) {
            tracing::trace!(%n, witness = %a, "composite by random witness");
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values() {
        assert!(!Integer::new(0).is_probable_prime());
        assert!(!Integer::new(1).is_probable_prime());
        assert!(Integer::new(2).is_probable_prime());
        assert!(Integer::new(-7).is_probable_prime());
        assert!(!Integer::new(32_767).is_probable_prime());
        assert!(Integer::new(32_749).is_probable_prime());
    }

    #[test]
    fn test_large_primes() {
        // 2^61 - 1 and 2^89 - 1 are Mersenne primes.
        assert!((Integer::new(2).pow(61) - Integer::new(1)).is_probable_prime());
        assert!((Integer::new(2).pow(89) - Integer::new(1)).is_probable_prime());
        assert!(!(Integer::new(2).pow(67) - Integer::new(1)).is_probable_prime());
    }

    #[test]
    fn test_carmichael_numbers() {
        for n in [561i64, 41_041, 825_265, 321_197_185] {
            assert!(!Integer::new(n).is_probable_prime(), "{n}");
        }
    }

    #[test]
    fn test_random_rounds_catch_strong_pseudoprime() {
        // Strong pseudoprime to every fixed witness: 399165290221 * 798330580441.
        let n: Integer = "318665857834031151167461".parse().unwrap();
        assert!(n.is_probable_prime_with(0));
        assert!(!n.is_probable_prime_with(DEFAULT_ROUNDS));
    }
}
